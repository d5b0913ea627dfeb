use crate::devices::open_event_devices;
use crate::logger::{log, log_block, log_error, Verbosity};
use evdev::{
    Device, FFEffect, FFEffectData, FFEffectKind, FFEffectType, FFReplay, FFTrigger,
};
use std::io;
use std::path::PathBuf;

pub const RUMBLE_STRENGTH: f32 = 0.33;
pub const RUMBLE_LENGTH_MS: u16 = 15000;

/// Something that can shake.
pub trait Rumble {
    fn play(&mut self) -> io::Result<()>;
    fn stop(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RumbleCommand {
    Start,
    Stop,
}

/// Edge-triggered Idle/Active machine driven by "L and R both held".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RumbleState {
    active: bool,
}

impl RumbleState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Records the new wanted state and says what to send, if anything.
    pub fn update(&mut self, wanted: bool) -> Option<RumbleCommand> {
        let command = match (self.active, wanted) {
            (false, true) => Some(RumbleCommand::Start),
            (true, false) => Some(RumbleCommand::Stop),
            _ => None,
        };
        self.active = wanted;
        command
    }

    /// Runs one frame of the machine against a device. Failures are
    /// printed; the transition is kept either way.
    pub fn drive<R: Rumble + ?Sized>(&mut self, wanted: bool, device: &mut R) {
        match self.update(wanted) {
            Some(RumbleCommand::Start) => {
                log(Verbosity::Low, "Starting force feedback as requested by the user");
                if let Err(e) = device.play() {
                    log_error("Rumble play failed", &e.to_string());
                }
            }
            Some(RumbleCommand::Stop) => {
                log(Verbosity::Low, "Stopping force feedback as requested by the user");
                if let Err(e) = device.stop() {
                    log_error("Rumble stop failed", &e.to_string());
                }
            }
            None => {}
        }
    }
}

/// An evdev force-feedback device with a rumble effect already uploaded.
pub struct HapticDevice {
    name: String,
    effect: FFEffect,
    // The effect belongs to this device's file descriptor.
    _device: Device,
}

impl HapticDevice {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Rumble for HapticDevice {
    fn play(&mut self) -> io::Result<()> {
        self.effect.play(1)
    }

    fn stop(&mut self) -> io::Result<()> {
        self.effect.stop()
    }
}

pub fn rumble_effect(strength: f32, length_ms: u16) -> FFEffectData {
    let magnitude = (strength.clamp(0.0, 1.0) * u16::MAX as f32) as u16;
    FFEffectData {
        direction: 0,
        trigger: FFTrigger { button: 0, interval: 0 },
        replay: FFReplay { length: length_ms, delay: 0 },
        kind: FFEffectKind::Rumble {
            strong_magnitude: magnitude,
            weak_magnitude: magnitude,
        },
    }
}

fn supports_rumble(device: &Device) -> bool {
    device
        .supported_ff()
        .is_some_and(|ff| ff.contains(FFEffectType::FF_RUMBLE))
}

/// Lists force-feedback devices and opens the first one that accepts a
/// rumble effect. Every failure here is non-fatal.
pub fn open_haptic_device() -> Option<HapticDevice> {
    let candidates: Vec<(PathBuf, Device)> = open_event_devices()
        .into_iter()
        .filter(|(_, device)| supports_rumble(device))
        .collect();

    if candidates.is_empty() {
        log_error("No force feedback device (non-fatal)", "rumble disabled");
        return None;
    }

    log_block(
        "Force feedback devices",
        candidates
            .iter()
            .enumerate()
            .map(|(i, (path, device))| {
                format!(
                    "{}: \"{}\" ({})",
                    i,
                    device.name().unwrap_or("unnamed"),
                    path.display()
                )
            })
            .collect(),
    );

    let (path, mut device) = candidates.into_iter().next()?;
    let name = device.name().unwrap_or("unnamed").to_string();
    match device.upload_ff_effect(rumble_effect(RUMBLE_STRENGTH, RUMBLE_LENGTH_MS)) {
        Ok(effect) => Some(HapticDevice { name, effect, _device: device }),
        Err(e) => {
            log_error(
                "Rumble effect upload failed (non-fatal)",
                &format!("{}: {}", path.display(), e),
            );
            None
        }
    }
}
