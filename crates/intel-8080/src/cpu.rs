//! Intel 8080 CPU core with per-instruction execution.

mod execute;

use emu_core::{Bus, Cpu, IoBus, Observable, Ticks, Value};

use crate::decode::OPCODES;
use crate::registers::Registers;

/// Intel 8080 CPU.
///
/// The CPU does not own the bus. The machine passes its bus to `step()` for
/// each instruction, so memory decoding and port hardware stay with the
/// machine.
pub struct I8080 {
    /// Programmer-visible state.
    pub regs: Registers,

    /// Cycles accumulated since the machine last consumed them. The
    /// machine's interrupt timing subtracts from this.
    cycle_count: u64,
    /// Total cycles since reset.
    total_cycles: Ticks,
    /// The last instruction executed was HLT. PC still points at it.
    halted: bool,
}

impl I8080 {
    /// Create a new 8080 with all registers zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            cycle_count: 0,
            total_cycles: Ticks::ZERO,
            halted: false,
        }
    }

    /// Return to the power-on state: registers zeroed, interrupts disabled.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Cycles accumulated since they were last consumed.
    #[must_use]
    pub const fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Take `cycles` off the accumulated count, keeping any overrun.
    pub fn consume_cycles(&mut self, cycles: u64) {
        self.cycle_count = self.cycle_count.saturating_sub(cycles);
    }

    /// Total cycles since reset.
    #[must_use]
    pub const fn total_cycles(&self) -> Ticks {
        self.total_cycles
    }

    /// True while spinning on HLT.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read_word(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        value
    }

    fn push<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write_word(self.regs.sp, value);
    }

    fn pop<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    fn call<B: Bus>(&mut self, bus: &mut B, address: u16) {
        self.push(bus, self.regs.pc);
        self.regs.pc = address;
    }
}

impl Default for I8080 {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: IoBus> Cpu<B> for I8080 {
    fn step(&mut self, bus: &mut B) -> u32 {
        let opcode = self.fetch(bus);
        let entry = OPCODES[opcode as usize];
        let extra = self.execute(bus, opcode, entry.instruction);

        let cycles = u32::from(entry.cycles) + extra;
        self.cycle_count += u64::from(cycles);
        self.total_cycles += cycles;
        cycles
    }

    fn reset(&mut self) {
        I8080::reset(self);
    }

    fn interrupt(&mut self, bus: &mut B, vector: u16) -> bool {
        if !self.regs.inte {
            return false;
        }
        self.regs.inte = false;
        // A halted CPU pushes the HLT address, so RET lands back on it.
        self.halted = false;
        log::trace!("interrupt to {vector:#06X} from {:#06X}", self.regs.pc);
        self.call(bus, vector);
        true
    }

    fn pc(&self) -> u16 {
        I8080::pc(self)
    }
}

impl Observable for I8080 {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        match path {
            "a" => Some(regs.a.into()),
            "b" => Some(regs.b.into()),
            "c" => Some(regs.c.into()),
            "d" => Some(regs.d.into()),
            "e" => Some(regs.e.into()),
            "h" => Some(regs.h.into()),
            "l" => Some(regs.l.into()),

            "bc" => Some(regs.bc().into()),
            "de" => Some(regs.de().into()),
            "hl" => Some(regs.hl().into()),
            "psw" => Some(regs.psw().into()),
            "sp" => Some(regs.sp.into()),
            "pc" => Some(regs.pc.into()),

            "flags.s" => Some(regs.flags.s.into()),
            "flags.z" => Some(regs.flags.z.into()),
            "flags.ac" => Some(regs.flags.ac.into()),
            "flags.p" => Some(regs.flags.p.into()),
            "flags.cy" => Some(regs.flags.cy.into()),

            "inte" => Some(regs.inte.into()),
            "cycles" => Some(self.cycle_count.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "a", "b", "c", "d", "e", "h", "l", "bc", "de", "hl", "psw", "sp", "pc", "flags.s",
            "flags.z", "flags.ac", "flags.p", "flags.cy", "inte", "cycles",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::SimpleBus;

    #[test]
    fn step_accumulates_cycles() {
        let mut cpu = I8080::new();
        let mut bus = SimpleBus::new();
        // NOP; LXI B,$1234
        bus.load(0, &[0x00, 0x01, 0x34, 0x12]);
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.step(&mut bus), 10);
        assert_eq!(cpu.cycle_count(), 14);
        assert_eq!(cpu.total_cycles(), Ticks::new(14));
        assert_eq!(cpu.regs.bc(), 0x1234);

        cpu.consume_cycles(10);
        assert_eq!(cpu.cycle_count(), 4);
        assert_eq!(cpu.total_cycles(), Ticks::new(14));
    }

    #[test]
    fn interrupt_dropped_when_disabled() {
        let mut cpu = I8080::new();
        let mut bus = SimpleBus::new();
        cpu.regs.pc = 0x1234;
        cpu.regs.sp = 0x2400;
        assert!(!cpu.interrupt(&mut bus, 0x0008));
        assert_eq!(cpu.regs.pc, 0x1234);
        assert_eq!(cpu.regs.sp, 0x2400);
    }

    #[test]
    fn interrupt_pushes_pc_and_disables() {
        let mut cpu = I8080::new();
        let mut bus = SimpleBus::new();
        cpu.regs.pc = 0x1234;
        cpu.regs.sp = 0x2400;
        cpu.regs.inte = true;
        assert!(cpu.interrupt(&mut bus, 0x0010));
        assert_eq!(cpu.regs.pc, 0x0010);
        assert_eq!(cpu.regs.sp, 0x23FE);
        assert_eq!(bus.read_word(0x23FE), 0x1234);
        assert!(!cpu.regs.inte);
    }

    #[test]
    fn interrupt_returns_to_halt() {
        let mut cpu = I8080::new();
        let mut bus = SimpleBus::new();
        // EI; HLT
        bus.load(0x0100, &[0xFB, 0x76]);
        cpu.regs.pc = 0x0100;
        cpu.regs.sp = 0x2400;
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert!(cpu.is_halted());
        assert_eq!(cpu.regs.pc, 0x0101);

        assert!(cpu.interrupt(&mut bus, 0x0008));
        assert!(!cpu.is_halted());
        assert_eq!(cpu.regs.pc, 0x0008);
        assert_eq!(bus.read_word(0x23FE), 0x0101);
    }

    #[test]
    fn reset_clears_state() {
        let mut cpu = I8080::new();
        let mut bus = SimpleBus::new();
        bus.load(0, &[0x3E, 0x42]); // MVI A,$42
        cpu.step(&mut bus);
        cpu.reset();
        assert_eq!(cpu.regs, Registers::default());
        assert_eq!(cpu.cycle_count(), 0);
        assert_eq!(cpu.total_cycles(), Ticks::ZERO);
    }

    #[test]
    fn observable_paths_resolve() {
        let mut cpu = I8080::new();
        cpu.regs.set_hl(0x2400);
        cpu.regs.flags.cy = true;
        assert_eq!(cpu.query("hl"), Some(Value::U16(0x2400)));
        assert_eq!(cpu.query("flags.cy"), Some(Value::Bool(true)));
        assert_eq!(cpu.query("psw"), Some(Value::U16(0x0003)));
        assert_eq!(cpu.query("bogus"), None);
        for path in cpu.query_paths() {
            assert!(cpu.query(path).is_some(), "{path}");
        }
    }
}
