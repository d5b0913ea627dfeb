use crate::element::Element;
use evdev::Key;

// Hat bitmask, same bit layout as the usual joystick hat values.
pub const HAT_CENTERED: u8 = 0x00;
pub const HAT_UP: u8 = 0x01;
pub const HAT_RIGHT: u8 = 0x02;
pub const HAT_DOWN: u8 = 0x04;
pub const HAT_LEFT: u8 = 0x08;

/// Keys that light up elements when the console buttons come in as a
/// keyboard (gpio-keys) instead of through the built-in joystick.
pub const KEYS_TO_ELEMENTS: [(Key, Element); Element::COUNT] = [
    (Key::KEY_LEFT, Element::DPadLeft),
    (Key::KEY_RIGHT, Element::DPadRight),
    (Key::KEY_UP, Element::DPadUp),
    (Key::KEY_DOWN, Element::DPadDown),
    (Key::KEY_LEFTCTRL, Element::A),
    (Key::KEY_LEFTALT, Element::B),
    (Key::KEY_LEFTSHIFT, Element::X),
    (Key::KEY_SPACE, Element::Y),
    (Key::KEY_TAB, Element::L),
    (Key::KEY_BACKSPACE, Element::R),
    (Key::KEY_ESC, Element::Select),
    (Key::KEY_ENTER, Element::Start),
    (Key::KEY_HOME, Element::Power),
    (Key::KEY_PAUSE, Element::Hold),
];

/// Built-in joystick buttons by index. The d-pad comes from the hat, and
/// power/hold only exist as keys.
pub const JOY_BUTTONS_TO_ELEMENTS: [Element; 8] = [
    Element::B,
    Element::A,
    Element::Y,
    Element::X,
    Element::Select,
    Element::Start,
    Element::L,
    Element::R,
];

pub fn element_for_key(key: Key) -> Option<Element> {
    KEYS_TO_ELEMENTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, element)| element)
}

pub fn element_for_button(button: u8) -> Option<Element> {
    JOY_BUTTONS_TO_ELEMENTS.get(button as usize).copied()
}

/// All four directions are decoded independently; opposite bits may both be set.
pub fn hat_elements(mask: u8) -> [(Element, bool); 4] {
    [
        (Element::DPadUp, mask & HAT_UP != 0),
        (Element::DPadDown, mask & HAT_DOWN != 0),
        (Element::DPadLeft, mask & HAT_LEFT != 0),
        (Element::DPadRight, mask & HAT_RIGHT != 0),
    ]
}

/// Builds a hat mask from a pair of `ABS_HAT0X` / `ABS_HAT0Y` values.
pub fn hat_mask(x: i32, y: i32) -> u8 {
    let mut mask = HAT_CENTERED;
    if x < 0 {
        mask |= HAT_LEFT;
    } else if x > 0 {
        mask |= HAT_RIGHT;
    }
    if y < 0 {
        mask |= HAT_UP;
    } else if y > 0 {
        mask |= HAT_DOWN;
    }
    mask
}
