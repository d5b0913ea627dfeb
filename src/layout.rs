// Screen layout and palette of the diagnostic screen.
use crate::element::Element;
use crate::render::{Color, Rect};

pub const FONT_FILE: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSansCondensed.ttf";
pub const FONT_SIZE: f32 = 12.0;

pub const SCREEN_WIDTH: i32 = 320;
pub const SCREEN_HEIGHT: i32 = 240;

// Console picture offset; the element rectangles below are relative to it.
pub const PIC_Y: i32 = 43;

pub const INNER_SCREEN_X: i32 = 84;
pub const INNER_SCREEN_Y: i32 = 18;
pub const INNER_SCREEN_W: i32 = 154;
pub const INNER_SCREEN_H: i32 = 117;

pub const INNER_SCREEN: Rect = Rect::new(
    INNER_SCREEN_X,
    PIC_Y + INNER_SCREEN_Y,
    INNER_SCREEN_W,
    INNER_SCREEN_H,
);
pub const DOT_SIZE: i32 = 4;

// Label anchors. LX = left edge, CX = center, RX = right edge.
pub const TEXT_CROSS_LX: i32 = 4;
pub const TEXT_CROSS_Y: i32 = 20;
pub const TEXT_ANALOG_CX: i32 = 160;
pub const TEXT_ANALOG_Y: i32 = 4;
pub const TEXT_GRAVITY_CX: i32 = 160;
pub const TEXT_GRAVITY_Y: i32 = 20;
pub const TEXT_OTHERS_RX: i32 = 316;
pub const TEXT_OTHERS_Y: i32 = 4;
pub const TEXT_FACE_RX: i32 = 316;
pub const TEXT_FACE_Y: i32 = 20;
pub const TEXT_CROSS_ERR_LX: i32 = 4;
pub const TEXT_CROSS_ERR_Y: i32 = 188;
pub const TEXT_EXIT_RX: i32 = 316;
pub const TEXT_EXIT_Y: i32 = 220;
pub const TEXT_RUMBLE_RX: i32 = 316;
pub const TEXT_RUMBLE_Y: i32 = 204;

pub const TEXT_CROSS: &str = "Directional cross";
pub const TEXT_ANALOG: &str = "Analog nub";
pub const TEXT_GRAVITY: &str = "Gravity sensor";
pub const TEXT_FACE: &str = "Face buttons";
pub const TEXT_OTHERS: &str = "Other buttons";
pub const TEXT_CROSS_ERROR: &str = "Opposite directions pressed simultaneously on the cross";
pub const TEXT_EXIT: &str = "Start+Select to exit";
pub const TEXT_RUMBLE: &str = "L+R to rumble";

pub const COLOR_BACKGROUND: Color = Color::rgb(0, 0, 0);
pub const COLOR_BORDER: Color = Color::rgb(255, 255, 255);
pub const COLOR_INNER_BORDER: Color = Color::rgb(128, 128, 128);
pub const COLOR_ERROR: Color = Color::rgb(255, 32, 32);
pub const COLOR_PROMPT: Color = Color::rgb(255, 255, 255);
pub const COLOR_NEVER_PRESSED: Color = Color::rgb(32, 32, 32);

pub const COLOR_CROSS: Color = Color::rgb(255, 255, 32);
pub const COLOR_ANALOG: Color = Color::rgb(32, 255, 32);
pub const COLOR_GRAVITY: Color = Color::rgb(255, 128, 32);
pub const COLOR_FACE: Color = Color::rgb(32, 32, 255);
pub const COLOR_OTHERS: Color = Color::rgb(255, 32, 255);

pub const COLOR_EVER_CROSS: Color = Color::rgb(64, 64, 32);
pub const COLOR_EVER_FACE: Color = Color::rgb(32, 32, 64);
pub const COLOR_EVER_OTHERS: Color = Color::rgb(64, 32, 64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnElement {
    pub rect: Rect,
    pub color_pressed: Color,
    pub color_ever_pressed: Color,
}

const fn cross(x: i32, y: i32, w: i32, h: i32) -> DrawnElement {
    DrawnElement {
        rect: Rect::new(x, y + PIC_Y, w, h),
        color_pressed: COLOR_CROSS,
        color_ever_pressed: COLOR_EVER_CROSS,
    }
}

const fn face(x: i32, y: i32) -> DrawnElement {
    DrawnElement {
        rect: Rect::new(x, y + PIC_Y, 19, 19),
        color_pressed: COLOR_FACE,
        color_ever_pressed: COLOR_EVER_FACE,
    }
}

const fn other(x: i32, y: i32, w: i32, h: i32) -> DrawnElement {
    DrawnElement {
        rect: Rect::new(x, y + PIC_Y, w, h),
        color_pressed: COLOR_OTHERS,
        color_ever_pressed: COLOR_EVER_OTHERS,
    }
}

/// Indexed by `Element::index()`.
pub const DRAWN_ELEMENTS: [DrawnElement; Element::COUNT] = [
    cross(32, 38, 14, 16),   // D-pad Up
    cross(32, 68, 14, 16),   // D-pad Down
    cross(16, 54, 16, 14),   // D-pad Left
    cross(46, 54, 16, 14),   // D-pad Right
    face(272, 33),           // Y
    face(272, 71),           // B
    face(253, 52),           // X
    face(291, 52),           // A
    other(266, 96, 31, 14),  // Select
    other(266, 118, 31, 14), // Start
    other(9, 3, 47, 19),     // L
    other(264, 3, 47, 19),   // R
    other(312, 52, 6, 21),   // Power
    other(312, 73, 6, 21),   // Hold
];

pub fn drawn_element(element: Element) -> &'static DrawnElement {
    &DRAWN_ELEMENTS[element.index()]
}
