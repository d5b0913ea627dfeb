use crate::element::Element;
use crate::event::{DeviceId, Event};
use crate::logger::{log, log_detail, Verbosity};
use crate::mapping::{element_for_button, element_for_key, hat_elements};
use crate::state::{AnalogSource, ElementState, Transition};
use evdev::Key;

/// Devices that were matched by name at startup. `None` means the device
/// was not found, and its events never arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Joysticks {
    pub built_in: Option<DeviceId>,
    pub g_sensor: Option<DeviceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where a press/release came from, for the duplicate diagnostics.
#[derive(Debug, Clone, Copy)]
enum Origin {
    Keyboard(Key),
    Joystick { device: DeviceId, button: u8 },
}

impl Origin {
    fn describe(&self) -> String {
        match self {
            Origin::Keyboard(key) => format!("keyboard {:?}", key),
            Origin::Joystick { device, button } => {
                format!("joystick {} button {}", device.0, button)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    joysticks: Joysticks,
    duplicates: u64,
}

impl Dispatcher {
    pub fn new(joysticks: Joysticks) -> Self {
        Self { joysticks, duplicates: 0 }
    }

    /// Number of duplicate press/release transitions seen so far.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    pub fn apply(&mut self, state: &mut ElementState, event: &Event) -> Flow {
        match *event {
            Event::AxisMotion { device, axis, value } => {
                if let Some(source) = self.analog_source(device) {
                    state.update_analog(source, axis, value);
                    log(
                        Verbosity::High,
                        &format!("{}: axis {} = {}", source.name(), axis, value),
                    );
                }
            }
            Event::HatMotion { device, hat, mask } => {
                if self.joysticks.built_in == Some(device) && hat == 0 {
                    for (element, pressed) in hat_elements(mask) {
                        state.set_pressed(element, pressed);
                    }
                    log(Verbosity::High, &format!("Hat 0 = {:#04x}", mask));
                }
            }
            Event::Button { device, button, pressed } => {
                if self.joysticks.built_in == Some(device) {
                    if let Some(element) = element_for_button(button) {
                        self.press(state, element, pressed, Origin::Joystick { device, button });
                    }
                }
            }
            Event::Key { key, pressed } => {
                if let Some(element) = element_for_key(key) {
                    self.press(state, element, pressed, Origin::Keyboard(key));
                }
            }
            Event::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Applies a batch of events, stopping at the first quit. The
    /// opposite-direction flag is refreshed once the batch is in.
    pub fn apply_all<'a, I>(&mut self, state: &mut ElementState, events: I) -> Flow
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut flow = Flow::Continue;
        for event in events {
            if self.apply(state, event) == Flow::Quit {
                flow = Flow::Quit;
                break;
            }
        }
        state.refresh_dpad_opposite();
        flow
    }

    fn analog_source(&self, device: DeviceId) -> Option<AnalogSource> {
        if self.joysticks.built_in == Some(device) {
            Some(AnalogSource::BuiltIn)
        } else if self.joysticks.g_sensor == Some(device) {
            Some(AnalogSource::GSensor)
        } else {
            None
        }
    }

    fn press(&mut self, state: &mut ElementState, element: Element, pressed: bool, origin: Origin) {
        match state.set_pressed(element, pressed) {
            Transition::Changed => {
                log(
                    Verbosity::High,
                    &format!(
                        "{} {} ({})",
                        element.name(),
                        if pressed { "pressed" } else { "released" },
                        origin.describe()
                    ),
                );
            }
            Transition::DuplicatePress => {
                self.duplicates += 1;
                log_detail(
                    Verbosity::Low,
                    &format!("Press received for already-pressed button {}", element.name()),
                    &origin.describe(),
                );
            }
            Transition::DuplicateRelease => {
                self.duplicates += 1;
                log_detail(
                    Verbosity::Low,
                    &format!("Release received for already-released button {}", element.name()),
                    &origin.describe(),
                );
            }
        }
    }
}

/// Select+Start ends the session.
pub fn must_exit(state: &ElementState) -> bool {
    state.select_start_held()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{HAT_CENTERED, HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};
    use crate::state::AnalogReading;

    const NUB: DeviceId = DeviceId(3);
    const GSENSOR: DeviceId = DeviceId(4);
    const STRANGER: DeviceId = DeviceId(9);

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Joysticks { built_in: Some(NUB), g_sensor: Some(GSENSOR) })
    }

    fn button(button: u8, pressed: bool) -> Event {
        Event::Button { device: NUB, button, pressed }
    }

    fn key(key: Key, pressed: bool) -> Event {
        Event::Key { key, pressed }
    }

    #[test]
    fn button_zero_is_b() {
        let mut d = dispatcher();
        let mut state = ElementState::new();

        d.apply(&mut state, &button(0, true));
        assert!(state.is_pressed(Element::B));
        assert!(state.ever_pressed(Element::B));

        d.apply(&mut state, &button(0, false));
        assert!(!state.is_pressed(Element::B));
        assert!(state.ever_pressed(Element::B));
        assert_eq!(d.duplicates(), 0);
    }

    #[test]
    fn second_press_is_counted_as_duplicate() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &button(0, true));
        d.apply(&mut state, &button(0, true));
        assert!(state.is_pressed(Element::B));
        assert_eq!(d.duplicates(), 1);

        d.apply(&mut state, &key(Key::KEY_UP, false));
        assert_eq!(d.duplicates(), 2);
    }

    #[test]
    fn buttons_from_other_devices_are_ignored() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &Event::Button { device: STRANGER, button: 1, pressed: true });
        d.apply(&mut state, &Event::Button { device: GSENSOR, button: 1, pressed: true });
        assert!(!state.ever_pressed(Element::A));
    }

    #[test]
    fn out_of_table_button_is_ignored() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &button(12, true));
        assert!(Element::ALL.iter().all(|&e| !state.ever_pressed(e)));
    }

    #[test]
    fn axes_go_to_their_source() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &Event::AxisMotion { device: NUB, axis: 0, value: 100 });
        d.apply(&mut state, &Event::AxisMotion { device: GSENSOR, axis: 1, value: -5 });
        d.apply(&mut state, &Event::AxisMotion { device: STRANGER, axis: 0, value: 77 });

        assert_eq!(state.analog(AnalogSource::BuiltIn), AnalogReading { x: 100, y: 0 });
        assert_eq!(state.analog(AnalogSource::GSensor), AnalogReading { x: 0, y: -5 });
    }

    #[test]
    fn missing_joystick_never_updates() {
        let mut d = Dispatcher::new(Joysticks { built_in: Some(NUB), g_sensor: None });
        let mut state = ElementState::new();
        d.apply(&mut state, &Event::AxisMotion { device: GSENSOR, axis: 0, value: 300 });
        assert!(state.analog(AnalogSource::GSensor).is_centered());
    }

    #[test]
    fn hat_sets_all_four_directions() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &Event::HatMotion { device: NUB, hat: 0, mask: HAT_UP | HAT_RIGHT });
        assert!(state.is_pressed(Element::DPadUp));
        assert!(state.is_pressed(Element::DPadRight));
        assert!(!state.is_pressed(Element::DPadDown));
        assert!(!state.is_pressed(Element::DPadLeft));

        d.apply(&mut state, &Event::HatMotion { device: NUB, hat: 0, mask: HAT_CENTERED });
        assert!(!state.any_pressed(&Element::DPAD));
        assert!(state.ever_pressed(Element::DPadUp));
        assert!(!state.ever_pressed(Element::DPadDown));
    }

    #[test]
    fn hat_from_second_hat_or_other_device_is_ignored() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &Event::HatMotion { device: NUB, hat: 1, mask: HAT_DOWN });
        d.apply(&mut state, &Event::HatMotion { device: GSENSOR, hat: 0, mask: HAT_LEFT });
        assert!(!state.any_pressed(&Element::DPAD));
    }

    #[test]
    fn opposite_hat_bits_latch_the_flag_after_the_batch() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        let events = [
            Event::HatMotion { device: NUB, hat: 0, mask: HAT_LEFT | HAT_RIGHT },
            Event::HatMotion { device: NUB, hat: 0, mask: HAT_CENTERED },
        ];
        // Pressed and released within one batch: only the end state is seen.
        d.apply_all(&mut state, &events);
        assert!(!state.dpad_opposite_ever_pressed());

        d.apply_all(&mut state, &events[..1]);
        assert!(state.dpad_opposite_ever_pressed());
        d.apply_all(&mut state, &events[1..]);
        assert!(state.dpad_opposite_ever_pressed());
    }

    #[test]
    fn quit_stops_the_batch() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        let events = [key(Key::KEY_TAB, true), Event::Quit, key(Key::KEY_BACKSPACE, true)];
        assert_eq!(d.apply_all(&mut state, &events), Flow::Quit);
        assert!(state.is_pressed(Element::L));
        assert!(!state.is_pressed(Element::R));
    }

    #[test]
    fn select_and_start_exit_in_either_order() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        d.apply(&mut state, &key(Key::KEY_ENTER, true));
        assert!(!must_exit(&state));
        d.apply(&mut state, &key(Key::KEY_ESC, true));
        assert!(must_exit(&state));

        let mut state = ElementState::new();
        d.apply(&mut state, &button(4, true));
        d.apply(&mut state, &button(5, true));
        assert!(must_exit(&state));
        d.apply(&mut state, &button(4, false));
        assert!(!must_exit(&state));
    }

    #[test]
    fn unmapped_keys_change_nothing() {
        let mut d = dispatcher();
        let mut state = ElementState::new();
        assert_eq!(d.apply(&mut state, &key(Key::KEY_F1, true)), Flow::Continue);
        assert!(Element::ALL.iter().all(|&e| !state.ever_pressed(e)));
        assert_eq!(d.duplicates(), 0);
    }
}
