/// Binary inputs (pressed or not) shown on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Y,
    B,
    X,
    A,
    Select,
    Start,
    L,
    R,
    Power,
    Hold,
}

impl Element {
    pub const COUNT: usize = 14;

    /// Same order as the discriminants, so `ALL[e.index()] == e`.
    pub const ALL: [Element; Self::COUNT] = [
        Element::DPadUp,
        Element::DPadDown,
        Element::DPadLeft,
        Element::DPadRight,
        Element::Y,
        Element::B,
        Element::X,
        Element::A,
        Element::Select,
        Element::Start,
        Element::L,
        Element::R,
        Element::Power,
        Element::Hold,
    ];

    pub const DPAD: [Element; 4] = [
        Element::DPadUp,
        Element::DPadDown,
        Element::DPadLeft,
        Element::DPadRight,
    ];

    pub const FACE: [Element; 4] = [Element::Y, Element::B, Element::X, Element::A];

    pub const OTHERS: [Element; 6] = [
        Element::Select,
        Element::Start,
        Element::L,
        Element::R,
        Element::Power,
        Element::Hold,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::DPadUp => "D-pad Up",
            Element::DPadDown => "D-pad Down",
            Element::DPadLeft => "D-pad Left",
            Element::DPadRight => "D-pad Right",
            Element::Y => "Y",
            Element::B => "B",
            Element::X => "X",
            Element::A => "A",
            Element::Select => "Select",
            Element::Start => "Start",
            Element::L => "L",
            Element::R => "R",
            Element::Power => "Power",
            Element::Hold => "Hold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_indexed_by_discriminant() {
        for (i, element) in Element::ALL.iter().enumerate() {
            assert_eq!(element.index(), i);
        }
    }

    #[test]
    fn groups_partition_every_element() {
        let mut seen = [false; Element::COUNT];
        for e in Element::DPAD.iter().chain(&Element::FACE).chain(&Element::OTHERS) {
            assert!(!seen[e.index()], "{} is in two groups", e.name());
            seen[e.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
