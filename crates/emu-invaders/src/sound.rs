//! Sound triggers.
//!
//! The board's sound hardware is a set of analog circuits, each fired by
//! one bit of output port 3 or port 5. The core doesn't make audio: it
//! watches those bits and emits one [`SoundEvent`] per 0 -> 1 transition
//! to whatever [`SoundSink`] the machine was built with.

use crossbeam::channel::Sender;

/// The nine discrete sounds, in trigger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Port 3 bit 0. Held while the UFO is on screen.
    Ufo,
    /// Port 3 bit 1.
    Shot,
    /// Port 3 bit 2.
    PlayerDie,
    /// Port 3 bit 3.
    InvaderDie,
    /// Port 5 bits 0-3: the four-note fleet march.
    Fleet1,
    Fleet2,
    Fleet3,
    Fleet4,
    /// Port 5 bit 4.
    UfoHit,
}

impl Sound {
    pub const ALL: [Sound; 9] = [
        Sound::Ufo,
        Sound::Shot,
        Sound::PlayerDie,
        Sound::InvaderDie,
        Sound::Fleet1,
        Sound::Fleet2,
        Sound::Fleet3,
        Sound::Fleet4,
        Sound::UfoHit,
    ];

    /// Index across both banks: 0-3 for bank 1, 4-8 for bank 2.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// One "play sound" trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundEvent {
    /// 1 for port 3, 2 for port 5.
    pub bank: u8,
    /// Index across both banks, see [`Sound::index`].
    pub index: u8,
}

impl SoundEvent {
    #[must_use]
    pub fn sound(&self) -> Option<Sound> {
        Sound::from_index(self.index)
    }
}

/// Receiver of sound triggers. Called synchronously from inside an OUT
/// instruction, so implementations must not block.
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Collects events in order.
impl SoundSink for Vec<SoundEvent> {
    fn play(&mut self, event: SoundEvent) {
        self.push(event);
    }
}

/// Hands events to an audio thread.
impl SoundSink for Sender<SoundEvent> {
    fn play(&mut self, event: SoundEvent) {
        if self.try_send(event).is_err() {
            log::warn!("sound event {event:?} dropped: channel full or closed");
        }
    }
}

/// Edge detector for one output port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundLatch {
    bank: u8,
    first_index: u8,
    bits: u8,
    last: u8,
}

impl SoundLatch {
    /// Port 3: four sounds.
    pub const BANK1: Self = Self::new(1, 0, 4);
    /// Port 5: five sounds.
    pub const BANK2: Self = Self::new(2, 4, 5);

    const fn new(bank: u8, first_index: u8, bits: u8) -> Self {
        Self {
            bank,
            first_index,
            bits,
            last: 0,
        }
    }

    /// Compare `value` against the previous write, fire one event per
    /// newly set bit, then latch `value`.
    pub fn write<S: SoundSink + ?Sized>(&mut self, value: u8, sink: &mut S) {
        let rising = value & !self.last;
        for bit in 0..self.bits {
            if rising & (1 << bit) != 0 {
                let event = SoundEvent {
                    bank: self.bank,
                    index: self.first_index + bit,
                };
                log::trace!("sound trigger {event:?}");
                sink.play(event);
            }
        }
        self.last = value;
    }

    /// Last value written to the port.
    #[must_use]
    pub const fn last(&self) -> u8 {
        self.last
    }

    /// Forget the previous write.
    pub fn clear(&mut self) {
        self.last = 0;
    }
}
