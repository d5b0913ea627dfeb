use crate::element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogSource {
    BuiltIn,
    GSensor,
}

impl AnalogSource {
    pub const ALL: [AnalogSource; 2] = [AnalogSource::BuiltIn, AnalogSource::GSensor];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AnalogSource::BuiltIn => "Analog nub",
            AnalogSource::GSensor => "Gravity sensor",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalogReading {
    pub x: i16,
    pub y: i16,
}

impl AnalogReading {
    pub fn is_centered(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Result of a press/release write. The write happens in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    DuplicatePress,
    DuplicateRelease,
}

/// Everything the input side knows about the console. Created zeroed at
/// session start and only written by the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct ElementState {
    pressed: [bool; Element::COUNT],
    ever_pressed: [bool; Element::COUNT],
    analog: [AnalogReading; 2],
    dpad_opposite_ever_pressed: bool,
}

impl ElementState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&mut self, element: Element, pressed: bool) -> Transition {
        let i = element.index();
        let transition = match (self.pressed[i], pressed) {
            (true, true) => Transition::DuplicatePress,
            (false, false) => Transition::DuplicateRelease,
            _ => Transition::Changed,
        };
        self.pressed[i] = pressed;
        self.ever_pressed[i] |= pressed;
        transition
    }

    /// Axis 0 is X and axis 1 is Y; other axes are not shown.
    pub fn update_analog(&mut self, source: AnalogSource, axis: u8, value: i16) {
        let reading = &mut self.analog[source.index()];
        match axis {
            0 => reading.x = value,
            1 => reading.y = value,
            _ => {}
        }
    }

    pub fn is_pressed(&self, element: Element) -> bool {
        self.pressed[element.index()]
    }

    pub fn ever_pressed(&self, element: Element) -> bool {
        self.ever_pressed[element.index()]
    }

    pub fn analog(&self, source: AnalogSource) -> AnalogReading {
        self.analog[source.index()]
    }

    pub fn any_pressed(&self, group: &[Element]) -> bool {
        group.iter().any(|&e| self.is_pressed(e))
    }

    pub fn dpad_opposite_pressed(&self) -> bool {
        (self.is_pressed(Element::DPadUp) && self.is_pressed(Element::DPadDown))
            || (self.is_pressed(Element::DPadLeft) && self.is_pressed(Element::DPadRight))
    }

    pub fn dpad_opposite_ever_pressed(&self) -> bool {
        self.dpad_opposite_ever_pressed
    }

    /// Latches the opposite-direction flag. Never clears it.
    pub fn refresh_dpad_opposite(&mut self) {
        self.dpad_opposite_ever_pressed |= self.dpad_opposite_pressed();
    }

    pub fn select_start_held(&self) -> bool {
        self.is_pressed(Element::Select) && self.is_pressed(Element::Start)
    }

    pub fn shoulders_held(&self) -> bool {
        self.is_pressed(Element::L) && self.is_pressed(Element::R)
    }
}
