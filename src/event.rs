use evdev::Key;

/// Identity of an opened input device. Assigned when the device is opened,
/// so it stays valid whatever order the devices were enumerated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u32);

/// Input as seen by the dispatcher, independent of where it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    AxisMotion { device: DeviceId, axis: u8, value: i16 },
    HatMotion { device: DeviceId, hat: u8, mask: u8 },
    Button { device: DeviceId, button: u8, pressed: bool },
    Key { key: Key, pressed: bool },
    Quit,
}
