//! CPU clock configuration.

use crate::Ticks;

/// Clock configuration for a system.
///
/// Everything the scheduler needs to turn wall-clock time into a cycle
/// budget derives from this frequency.
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// Clock frequency in Hz (e.g., `2_000_000` for a 2 MHz 8080).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Ticks per frame at the given frame rate (integer division). A rate
    /// of 0 is treated as 1.
    #[must_use]
    pub const fn ticks_per_frame(&self, frames_per_second: u64) -> Ticks {
        let fps = if frames_per_second == 0 { 1 } else { frames_per_second };
        Ticks::new(self.frequency_hz / fps)
    }

    /// Ticks elapsed in `millis` milliseconds (integer division).
    #[must_use]
    pub const fn ticks_for_millis(&self, millis: u64) -> Ticks {
        Ticks::new(millis * self.frequency_hz / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_megahertz_at_sixty_fps() {
        let clock = MasterClock::new(2_000_000);
        assert_eq!(clock.ticks_per_frame(60), Ticks::new(33_333));
    }

    #[test]
    fn zero_frame_rate_does_not_divide_by_zero() {
        let clock = MasterClock::new(2_000_000);
        assert_eq!(clock.ticks_per_frame(0), Ticks::new(2_000_000));
    }

    #[test]
    fn millis_convert_to_cycles() {
        let clock = MasterClock::new(2_000_000);
        assert_eq!(clock.ticks_for_millis(16), Ticks::new(32_000));
        assert_eq!(clock.ticks_for_millis(0), Ticks::ZERO);
        assert_eq!(clock.ticks_for_millis(1000), Ticks::new(2_000_000));
    }
}
