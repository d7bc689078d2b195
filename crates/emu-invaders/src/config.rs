//! Board configuration.

use crate::input::DipSwitches;

/// 8080 clock on the Midway board.
pub const CLOCK_HZ: u64 = 2_000_000;
/// Video refresh rate.
pub const FPS: u32 = 60;
/// RST 1 (mid-screen) and RST 2 (end-of-screen) targets.
pub const INTERRUPT_VECTORS: [u16; 2] = [0x0008, 0x0010];

/// Configuration for creating an `Invaders` instance.
///
/// The defaults describe the original Midway board. Bootleg boards with a
/// different clock or interrupt wiring only need to change these fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvadersConfig {
    /// CPU clock in Hz.
    pub clock_hz: u64,
    /// Frames per second. Two interrupts fire per frame. 0 is treated
    /// as 1.
    pub fps: u32,
    /// Mid-screen and end-of-screen interrupt targets.
    pub interrupt_vectors: [u16; 2],
    /// DIP switch settings at power-on.
    pub dip_switches: DipSwitches,
}

impl InvadersConfig {
    /// Frame rate used for timing, never zero.
    #[must_use]
    pub const fn frame_rate(&self) -> u64 {
        if self.fps == 0 { 1 } else { self.fps as u64 }
    }

    /// CPU cycles per video frame.
    #[must_use]
    pub const fn cycles_per_frame(&self) -> u64 {
        self.clock_hz / self.frame_rate()
    }

    /// CPU cycles between the two interrupts of a frame.
    #[must_use]
    pub const fn cycles_per_half_frame(&self) -> u64 {
        self.cycles_per_frame() / 2
    }
}

impl Default for InvadersConfig {
    fn default() -> Self {
        Self {
            clock_hz: CLOCK_HZ,
            fps: FPS,
            interrupt_vectors: INTERRUPT_VECTORS,
            dip_switches: DipSwitches::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midway_timing() {
        let config = InvadersConfig::default();
        assert_eq!(config.cycles_per_frame(), 33_333);
        assert_eq!(config.cycles_per_half_frame(), 16_666);
    }

    #[test]
    fn zero_fps_times_as_one() {
        let config = InvadersConfig {
            fps: 0,
            ..InvadersConfig::default()
        };
        assert_eq!(config.frame_rate(), 1);
        assert_eq!(config.cycles_per_frame(), 2_000_000);
        assert_eq!(config.cycles_per_half_frame(), 1_000_000);
    }
}
