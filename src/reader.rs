use crate::devices::{InputSource, JoystickLayout, Role};
use crate::event::{DeviceId, Event};
use crate::logger::{log_detail, log_error, Verbosity};
use crate::mapping::hat_mask;
use evdev::{AbsoluteAxisType, InputEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

const KEY_RELEASED: i32 = 0;
const KEY_PRESSED: i32 = 1;
// 2 is autorepeat, which is not a transition.

/// Turns raw evdev events of one device into dispatcher events.
#[derive(Debug, Clone)]
pub struct Translator {
    id: DeviceId,
    role: Role,
    layout: JoystickLayout,
    // Last (x, y) seen on each of ABS_HAT0..ABS_HAT3.
    hats: [(i32, i32); 4],
}

impl Translator {
    pub fn new(id: DeviceId, role: Role, layout: JoystickLayout) -> Self {
        Self { id, role, layout, hats: [(0, 0); 4] }
    }

    pub fn translate(&mut self, event: &evdev::InputEvent) -> Option<Event> {
        match event.kind() {
            InputEventKind::Key(key) => {
                let pressed = match event.value() {
                    KEY_RELEASED => false,
                    KEY_PRESSED => true,
                    _ => return None,
                };
                match self.layout.button_index(key) {
                    Some(button) => Some(Event::Button { device: self.id, button, pressed }),
                    None => Some(Event::Key { key, pressed }),
                }
            }
            InputEventKind::AbsAxis(axis) if self.role != Role::Keyboard => {
                self.translate_axis(axis, event.value())
            }
            _ => None,
        }
    }

    fn translate_axis(&mut self, axis: AbsoluteAxisType, value: i32) -> Option<Event> {
        let hat_base = AbsoluteAxisType::ABS_HAT0X.0;
        if (hat_base..=AbsoluteAxisType::ABS_HAT3Y.0).contains(&axis.0) {
            let offset = axis.0 - hat_base;
            let hat = (offset / 2) as usize;
            let (x, y) = &mut self.hats[hat];
            if offset % 2 == 0 {
                *x = value;
            } else {
                *y = value;
            }
            return Some(Event::HatMotion {
                device: self.id,
                hat: hat as u8,
                mask: hat_mask(*x, *y),
            });
        }

        let (index, range) = self.layout.axis_index(axis)?;
        Some(Event::AxisMotion { device: self.id, axis: index, value: range.normalize(value) })
    }
}

/// Spawns a task that forwards one device's events into the session
/// channel until the device goes away or the session ends.
pub fn spawn_reader(
    source: InputSource,
    events: UnboundedSender<Event>,
) -> std::io::Result<JoinHandle<()>> {
    let InputSource { id, role, name, path, layout, device } = source;
    let mut stream = device.into_event_stream()?;
    let mut translator = Translator::new(id, role, layout);

    Ok(tokio::spawn(async move {
        loop {
            match stream.next_event().await {
                Ok(raw) => {
                    if let Some(event) = translator.translate(&raw) {
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    log_error(
                        &format!("Input device \"{}\" stopped", name),
                        &format!("{}: {}", path.display(), e),
                    );
                    break;
                }
            }
        }
        log_detail(Verbosity::Medium, "Reader finished", &format!("id={}", id.0));
    }))
}
