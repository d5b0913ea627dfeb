use crate::dispatcher::{must_exit, Dispatcher, Flow};
use crate::error::DisplayError;
use crate::event::Event;
use crate::haptic::{Rumble, RumbleState};
use crate::logger::{log, Verbosity};
use crate::render::{Renderer, Surface};
use crate::state::ElementState;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Pause after each frame so input is sampled soon after the next one starts.
pub const FRAME_DELAY: Duration = Duration::from_millis(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Quit event, Ctrl+C or window closed.
    Quit,
    SelectStart,
}

/// The tester's main loop and everything it owns.
pub struct Session<S: Surface> {
    surface: S,
    renderer: Renderer<S::Raster>,
    dispatcher: Dispatcher,
    state: ElementState,
    haptic: Option<Box<dyn Rumble>>,
    rumble: RumbleState,
    events: UnboundedReceiver<Event>,
    frames: u64,
}

impl<S: Surface> Session<S> {
    pub fn new(
        mut surface: S,
        dispatcher: Dispatcher,
        haptic: Option<Box<dyn Rumble>>,
        events: UnboundedReceiver<Event>,
    ) -> Self {
        let renderer = Renderer::new(&mut surface, haptic.is_some());
        Self {
            surface,
            renderer,
            dispatcher,
            state: ElementState::new(),
            haptic,
            rumble: RumbleState::default(),
            events,
            frames: 0,
        }
    }

    pub fn state(&self) -> &ElementState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn rumble_active(&self) -> bool {
        self.rumble.is_active()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One loop iteration without the pacing delay: drain input, draw,
    /// then decide whether to stop.
    pub fn run_frame(&mut self) -> Result<Option<Outcome>, DisplayError> {
        let batch: Vec<Event> = std::iter::from_fn(|| self.events.try_recv().ok()).collect();
        let mut flow = self.dispatcher.apply_all(&mut self.state, &batch);
        if self.surface.close_requested() {
            flow = Flow::Quit;
        }

        self.renderer.draw_frame(&mut self.surface, &self.state)?;
        self.frames += 1;

        let outcome = if flow == Flow::Quit {
            Some(Outcome::Quit)
        } else if must_exit(&self.state) {
            Some(Outcome::SelectStart)
        } else {
            None
        };

        if let Some(haptic) = self.haptic.as_deref_mut() {
            self.rumble.drive(self.state.shoulders_held(), haptic);
        }

        Ok(outcome)
    }

    pub async fn run(mut self) -> Result<Outcome, DisplayError> {
        loop {
            if let Some(outcome) = self.run_frame()? {
                log(
                    Verbosity::Low,
                    &format!("Leaving after {} frames ({:?})", self.frames, outcome),
                );
                return Ok(outcome);
            }
            tokio::time::sleep(FRAME_DELAY).await;
        }
    }
}
