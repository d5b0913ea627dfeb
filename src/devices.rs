use crate::dispatcher::Joysticks;
use crate::event::DeviceId;
use crate::logger::{log, log_block, log_error, Verbosity};
use crate::mapping::KEYS_TO_ELEMENTS;
use evdev::{AbsoluteAxisType, Device, Key};
use std::path::PathBuf;

const INPUT_DIR: &str = "/dev/input";

// First codes of the joystick and misc button blocks (BTN_JOYSTICK, BTN_MISC).
const BTN_JOYSTICK: Key = Key::BTN_TRIGGER;
const BTN_MISC: Key = Key::BTN_0;

// Names reported by the console's own input drivers.
pub const BUILT_IN_JOYSTICK_NAME: &str = "linkdev device (Analog 2-axis 8-button 2-hat)";
pub const GSENSOR_JOYSTICK_NAME: &str = "mxc6225";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    BuiltInJoystick,
    GSensorJoystick,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub axis: AbsoluteAxisType,
    pub min: i32,
    pub max: i32,
    /// Dead zone around the center, in device units.
    pub flat: i32,
}

impl AxisRange {
    /// Maps the device range onto -32768..=32767 with the center of the
    /// range at 0. Values within `flat` of the center read as 0.
    pub fn normalize(&self, value: i32) -> i16 {
        if self.max <= self.min {
            return value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }
        let (min, max, value) = (self.min as i64, self.max as i64, value as i64);
        let center = (min + max) / 2;
        let flat = self.flat.max(0) as i64;

        let scaled = if value > center + flat {
            let span = max - center - flat;
            if span <= 0 {
                i16::MAX as i64
            } else {
                (value - center - flat) * 32767 / span
            }
        } else if value < center - flat {
            let span = center - flat - min;
            if span <= 0 {
                i16::MIN as i64
            } else {
                (value - center + flat) * 32768 / span
            }
        } else {
            0
        };
        scaled.clamp(i16::MIN as i64, i16::MAX as i64) as i16
    }
}

/// How raw codes of one device turn into joystick button and axis indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoystickLayout {
    pub buttons: Vec<Key>,
    pub axes: Vec<AxisRange>,
}

impl JoystickLayout {
    pub fn button_index(&self, key: Key) -> Option<u8> {
        self.buttons.iter().position(|&k| k == key).map(|i| i as u8)
    }

    pub fn axis_index(&self, axis: AbsoluteAxisType) -> Option<(u8, &AxisRange)> {
        self.axes
            .iter()
            .enumerate()
            .find(|(_, range)| range.axis == axis)
            .map(|(i, range)| (i as u8, range))
    }
}

pub fn is_hat_axis(axis: AbsoluteAxisType) -> bool {
    (AbsoluteAxisType::ABS_HAT0X.0..=AbsoluteAxisType::ABS_HAT3Y.0).contains(&axis.0)
}

/// Joystick buttons are numbered from BTN_JOYSTICK upwards first, then the
/// BTN_MISC block below it. Plain keyboard keys are not buttons.
pub fn order_buttons(keys: impl IntoIterator<Item = Key>) -> Vec<Key> {
    let mut joystick = Vec::new();
    let mut misc = Vec::new();
    for key in keys {
        if key.code() >= BTN_JOYSTICK.code() {
            joystick.push(key);
        } else if key.code() >= BTN_MISC.code() {
            misc.push(key);
        }
    }
    joystick.sort_by_key(|k| k.code());
    misc.sort_by_key(|k| k.code());
    joystick.extend(misc);
    joystick
}

pub fn classify(name: &str) -> Option<Role> {
    match name {
        BUILT_IN_JOYSTICK_NAME => Some(Role::BuiltInJoystick),
        GSENSOR_JOYSTICK_NAME => Some(Role::GSensorJoystick),
        _ => None,
    }
}

fn has_mapped_key(device: &Device) -> bool {
    device
        .supported_keys()
        .is_some_and(|keys| KEYS_TO_ELEMENTS.iter().any(|&(key, _)| keys.contains(key)))
}

fn joystick_layout(device: &Device) -> JoystickLayout {
    let buttons = device
        .supported_keys()
        .map(|keys| order_buttons(keys.iter()))
        .unwrap_or_default();

    let abs_state = device.get_abs_state().ok();
    let axes = device
        .supported_absolute_axes()
        .map(|axes| {
            axes.iter()
                .filter(|&axis| !is_hat_axis(axis))
                .map(|axis| {
                    let (min, max, flat) = abs_state
                        .as_ref()
                        .and_then(|state| state.get(axis.0 as usize))
                        .map(|info| (info.minimum, info.maximum, info.flat))
                        .unwrap_or((i16::MIN as i32, i16::MAX as i32, 0));
                    AxisRange { axis, min, max, flat }
                })
                .collect()
        })
        .unwrap_or_default();

    JoystickLayout { buttons, axes }
}

/// Number of an `eventN` node, or `None` for anything else in the directory.
pub fn event_node_index(file_name: &str) -> Option<u32> {
    file_name.strip_prefix("event")?.parse().ok()
}

/// Opens every `/dev/input/eventN` in numeric order. Nodes that cannot be
/// opened are reported and skipped.
pub fn open_event_devices() -> Vec<(PathBuf, Device)> {
    let entries = match std::fs::read_dir(INPUT_DIR) {
        Ok(entries) => entries,
        Err(e) => {
            log_error(&format!("Reading {} failed (non-fatal)", INPUT_DIR), &e.to_string());
            return Vec::new();
        }
    };

    let mut nodes: Vec<(u32, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            let index = path.file_name().and_then(|n| n.to_str()).and_then(event_node_index)?;
            Some((index, path))
        })
        .collect();
    nodes.sort_by_key(|(index, _)| *index);

    nodes
        .into_iter()
        .filter_map(|(_, path)| match Device::open(&path) {
            Ok(device) => Some((path, device)),
            Err(e) => {
                log_error(
                    &format!("Opening {} failed (non-fatal)", path.display()),
                    &e.to_string(),
                );
                None
            }
        })
        .collect()
}

pub struct InputSource {
    pub id: DeviceId,
    pub role: Role,
    pub name: String,
    pub path: PathBuf,
    pub layout: JoystickLayout,
    pub device: Device,
}

/// Opens the two expected joysticks by name, plus every other device that
/// reports at least one mapped key. Anything else is left closed.
pub fn discover_input_sources() -> (Vec<InputSource>, Joysticks) {
    let mut sources = Vec::new();
    let mut joysticks = Joysticks::default();
    let mut listing = Vec::new();
    let mut next_id = 0u32;

    for (path, device) in open_event_devices() {
        let name = device.name().unwrap_or("").to_string();
        let role = match classify(&name) {
            Some(Role::BuiltInJoystick) if joysticks.built_in.is_none() => Role::BuiltInJoystick,
            Some(Role::GSensorJoystick) if joysticks.g_sensor.is_none() => Role::GSensorJoystick,
            _ if has_mapped_key(&device) => Role::Keyboard,
            _ => {
                listing.push(format!("\"{}\" ({}) unused", name, path.display()));
                continue;
            }
        };

        let id = DeviceId(next_id);
        next_id += 1;
        match role {
            Role::BuiltInJoystick => joysticks.built_in = Some(id),
            Role::GSensorJoystick => joysticks.g_sensor = Some(id),
            Role::Keyboard => {}
        }

        let layout = match role {
            Role::Keyboard => JoystickLayout::default(),
            _ => joystick_layout(&device),
        };
        listing.push(format!(
            "\"{}\" ({}) as {:?}, id {}, {} buttons, {} axes",
            name,
            path.display(),
            role,
            id.0,
            layout.buttons.len(),
            layout.axes.len()
        ));
        sources.push(InputSource { id, role, name, path, layout, device });
    }

    if listing.is_empty() {
        log(Verbosity::Low, "No input devices found (non-fatal)");
    } else {
        log_block("Input devices", listing);
    }
    if joysticks.built_in.is_none() {
        log(Verbosity::Medium, &format!("\"{}\" not present", BUILT_IN_JOYSTICK_NAME));
    }
    if joysticks.g_sensor.is_none() {
        log(Verbosity::Medium, &format!("\"{}\" not present", GSENSOR_JOYSTICK_NAME));
    }

    (sources, joysticks)
}
