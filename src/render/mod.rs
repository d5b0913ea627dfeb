pub mod display;
pub mod framebuffer;
pub mod surface;
pub mod text;

pub use display::Display;
pub use framebuffer::{Framebuffer, Raster};
pub use surface::{Color, Rect, Surface};
pub use text::TextRenderer;

use crate::element::Element;
use crate::error::DisplayError;
use crate::layout::*;
use crate::state::{AnalogReading, AnalogSource, ElementState};

/// Text that never changes, rendered once at startup.
pub struct Labels<R> {
    cross: R,
    analog: R,
    gravity: R,
    face: R,
    others: R,
    cross_error: R,
    exit: R,
    rumble: Option<R>,
}

impl<R> Labels<R> {
    pub fn render<S: Surface<Raster = R>>(surface: &mut S, with_rumble: bool) -> Self {
        Self {
            cross: surface.render_text(TEXT_CROSS, COLOR_CROSS),
            analog: surface.render_text(TEXT_ANALOG, COLOR_ANALOG),
            gravity: surface.render_text(TEXT_GRAVITY, COLOR_GRAVITY),
            face: surface.render_text(TEXT_FACE, COLOR_FACE),
            others: surface.render_text(TEXT_OTHERS, COLOR_OTHERS),
            cross_error: surface.render_text(TEXT_CROSS_ERROR, COLOR_ERROR),
            exit: surface.render_text(TEXT_EXIT, COLOR_PROMPT),
            rumble: with_rumble.then(|| surface.render_text(TEXT_RUMBLE, COLOR_PROMPT)),
        }
    }
}

/// Top-left of the dot for a reading, inside the analog frame.
pub fn dot_position(reading: AnalogReading) -> (i32, i32) {
    let map = |value: i16, origin: i32, size: i32| -> i32 {
        origin + ((value as i64 + 32768) * (size - DOT_SIZE) as i64 / 65536) as i32
    };
    (
        map(reading.x, INNER_SCREEN.x, INNER_SCREEN.w),
        map(reading.y, INNER_SCREEN.y, INNER_SCREEN.h),
    )
}

pub fn coords_text(reading: AnalogReading) -> String {
    format!(
        "({:.2}, {:.2})",
        reading.x as f64 / 32767.0,
        reading.y as f64 / 32767.0
    )
}

/// Puts the coordinates on the side of the dot facing the center, so they
/// stay inside the frame.
pub fn coords_position(reading: AnalogReading, dot: (i32, i32), size: (i32, i32)) -> (i32, i32) {
    let (mut x, mut y) = dot;
    let (w, h) = size;
    if reading.x < 0 {
        x += 8;
    } else {
        x -= w + 4;
    }
    if reading.y < 0 {
        y += 4;
    } else {
        y -= h + 2;
    }
    (x, y)
}

pub fn element_color(state: &ElementState, element: Element) -> Color {
    let drawn = drawn_element(element);
    if state.is_pressed(element) {
        drawn.color_pressed
    } else if state.ever_pressed(element) {
        drawn.color_ever_pressed
    } else {
        COLOR_NEVER_PRESSED
    }
}

/// Draws the diagnostic screen. Holds the static labels for the session.
pub struct Renderer<R> {
    labels: Labels<R>,
}

impl<R> Renderer<R> {
    pub fn new<S: Surface<Raster = R>>(surface: &mut S, with_rumble: bool) -> Self {
        Self { labels: Labels::render(surface, with_rumble) }
    }

    pub fn shows_rumble_prompt(&self) -> bool {
        self.labels.rumble.is_some()
    }

    /// Composes and presents one full frame.
    pub fn draw_frame<S: Surface<Raster = R>>(
        &self,
        surface: &mut S,
        state: &ElementState,
    ) -> Result<(), DisplayError> {
        let screen = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);
        surface.fill_rect(screen, COLOR_BACKGROUND);
        // Shows whether the bezel cuts the screen off.
        surface.hollow_rect(screen, COLOR_BORDER);

        for element in Element::ALL {
            surface.fill_rect(drawn_element(element).rect, element_color(state, element));
        }

        blit_right(surface, &self.labels.exit, TEXT_EXIT_RX, TEXT_EXIT_Y);
        if let Some(rumble) = &self.labels.rumble {
            blit_right(surface, rumble, TEXT_RUMBLE_RX, TEXT_RUMBLE_Y);
        }

        if state.any_pressed(&Element::DPAD) {
            blit_left(surface, &self.labels.cross, TEXT_CROSS_LX, TEXT_CROSS_Y);
        }
        if state.dpad_opposite_pressed() || state.dpad_opposite_ever_pressed() {
            blit_left(surface, &self.labels.cross_error, TEXT_CROSS_ERR_LX, TEXT_CROSS_ERR_Y);
        }
        if state.any_pressed(&Element::FACE) {
            blit_right(surface, &self.labels.face, TEXT_FACE_RX, TEXT_FACE_Y);
        }
        if state.any_pressed(&Element::OTHERS) {
            blit_right(surface, &self.labels.others, TEXT_OTHERS_RX, TEXT_OTHERS_Y);
        }

        surface.hollow_rect(INNER_SCREEN, COLOR_INNER_BORDER);

        let nub = self.draw_dot(
            surface,
            state.analog(AnalogSource::BuiltIn),
            &self.labels.analog,
            TEXT_ANALOG_CX,
            TEXT_ANALOG_Y,
            COLOR_ANALOG,
        );
        let gravity = self.draw_dot(
            surface,
            state.analog(AnalogSource::GSensor),
            &self.labels.gravity,
            TEXT_GRAVITY_CX,
            TEXT_GRAVITY_Y,
            COLOR_GRAVITY,
        );

        let presented = surface.present();
        // The backend may compose lazily, so the coordinates live until here.
        drop(nub);
        drop(gravity);
        presented
    }

    /// Returns the coordinates raster, which must outlive `present`.
    fn draw_dot<S: Surface<Raster = R>>(
        &self,
        surface: &mut S,
        reading: AnalogReading,
        label: &R,
        label_cx: i32,
        label_y: i32,
        color: Color,
    ) -> Option<R> {
        if reading.is_centered() {
            return None;
        }
        blit_centered(surface, label, label_cx, label_y);

        let dot = dot_position(reading);
        surface.fill_rect(Rect::new(dot.0, dot.1, DOT_SIZE, DOT_SIZE), color);

        let coords = surface.render_text(&coords_text(reading), color);
        let size = surface.raster_size(&coords);
        let (x, y) = coords_position(reading, dot, size);
        surface.blit(&coords, Rect::new(x, y, size.0, size.1));
        Some(coords)
    }
}

fn blit_left<S: Surface>(surface: &mut S, raster: &S::Raster, lx: i32, y: i32) {
    let (w, h) = surface.raster_size(raster);
    surface.blit(raster, Rect::new(lx, y, w, h));
}

fn blit_right<S: Surface>(surface: &mut S, raster: &S::Raster, rx: i32, y: i32) {
    let (w, h) = surface.raster_size(raster);
    surface.blit(raster, Rect::new(rx - w, y, w, h));
}

fn blit_centered<S: Surface>(surface: &mut S, raster: &S::Raster, cx: i32, y: i32) {
    let (w, h) = surface.raster_size(raster);
    surface.blit(raster, Rect::new(cx - w / 2, y, w, h));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(x: i16, y: i16) -> AnalogReading {
        AnalogReading { x, y }
    }

    #[test]
    fn dot_spans_the_frame() {
        assert_eq!(dot_position(reading(i16::MIN, i16::MIN)), (84, 61));
        assert_eq!(dot_position(reading(i16::MAX, i16::MAX)), (84 + 149, 61 + 112));
        assert_eq!(dot_position(reading(0, 1)), (84 + 75, 61 + 56));
    }

    #[test]
    fn dot_stays_inside_the_frame() {
        for v in [i16::MIN, -20000, -1, 1, 20000, i16::MAX] {
            let (x, y) = dot_position(reading(v, v));
            let dot = Rect::new(x, y, DOT_SIZE, DOT_SIZE);
            assert!(INNER_SCREEN.contains(&dot), "{:?}", dot);
        }
    }

    #[test]
    fn coords_are_normalized_to_two_decimals() {
        assert_eq!(coords_text(reading(32767, -32767)), "(1.00, -1.00)");
        assert_eq!(coords_text(reading(16384, 0)), "(0.50, 0.00)");
        assert_eq!(coords_text(reading(i16::MIN, 100)), "(-1.00, 0.00)");
    }

    #[test]
    fn coords_flip_toward_the_center() {
        let size = (60, 14);
        assert_eq!(coords_position(reading(-5, -5), (100, 100), size), (108, 104));
        assert_eq!(coords_position(reading(5, 5), (100, 100), size), (36, 84));
        assert_eq!(coords_position(reading(0, -5), (100, 100), size), (36, 104));
    }

    #[test]
    fn element_color_follows_state() {
        let mut state = ElementState::new();
        assert_eq!(element_color(&state, Element::A), COLOR_NEVER_PRESSED);
        state.set_pressed(Element::A, true);
        assert_eq!(element_color(&state, Element::A), COLOR_FACE);
        state.set_pressed(Element::A, false);
        assert_eq!(element_color(&state, Element::A), COLOR_EVER_FACE);
        assert_eq!(element_color(&state, Element::DPadUp), COLOR_NEVER_PRESSED);
    }
}
