//! Video-timed interrupts.
//!
//! The video hardware raises an interrupt when the beam reaches the middle
//! of the screen and again at the end, so the game can redraw whichever
//! half the beam isn't scanning. Each is a RST injected into the CPU.

use emu_core::{Cpu, IoBus};
use intel_8080::I8080;

/// Which half-frame boundary the beam just crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beam {
    MidScreen,
    EndOfScreen,
}

/// Counts CPU cycles against the half-frame threshold.
pub struct InterruptController {
    threshold: u64,
    vectors: [u16; 2],
    next: Beam,
}

impl InterruptController {
    /// `threshold` is cycles per half frame. `vectors` are the mid-screen
    /// and end-of-screen restart addresses.
    #[must_use]
    pub const fn new(threshold: u64, vectors: [u16; 2]) -> Self {
        Self {
            threshold,
            vectors,
            next: Beam::MidScreen,
        }
    }

    /// Call after every instruction.
    ///
    /// If the CPU's cycle count has reached the threshold, offers the next
    /// vector to the CPU (dropped if interrupts are disabled), takes the
    /// threshold off the count, and flips to the other vector. Returns the
    /// boundary crossed, if any.
    pub fn check<B: IoBus>(&mut self, cpu: &mut I8080, bus: &mut B) -> Option<Beam> {
        if cpu.cycle_count() < self.threshold {
            return None;
        }

        let beam = self.next;
        let vector = self.vector(beam);
        if !cpu.interrupt(bus, vector) {
            log::trace!("interrupt {vector:#06X} dropped, interrupts disabled");
        }
        cpu.consume_cycles(self.threshold);

        self.next = match beam {
            Beam::MidScreen => Beam::EndOfScreen,
            Beam::EndOfScreen => Beam::MidScreen,
        };
        Some(beam)
    }

    /// Vector the next boundary will use.
    #[must_use]
    pub const fn next_vector(&self) -> u16 {
        self.vector(self.next)
    }

    #[must_use]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn reset(&mut self) {
        self.next = Beam::MidScreen;
    }

    const fn vector(&self, beam: Beam) -> u16 {
        match beam {
            Beam::MidScreen => self.vectors[0],
            Beam::EndOfScreen => self.vectors[1],
        }
    }
}
