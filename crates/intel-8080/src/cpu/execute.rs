//! Instruction execution for the 8080.

use emu_core::{Bus, IoBus};

use crate::alu;
use crate::decode::{
    AluOp, CALL_NOT_TAKEN, CALL_TAKEN, Condition, Instruction, JUMP_NOT_TAKEN, JUMP_TAKEN,
    Operand, Pair, RET_NOT_TAKEN, RET_TAKEN,
};

use super::I8080;

impl I8080 {
    /// Execute one decoded instruction. PC has already moved past the
    /// opcode byte. Returns the cycles a conditional branch adds on top of
    /// its table cost (zero for everything else).
    pub(super) fn execute<B: IoBus>(
        &mut self,
        bus: &mut B,
        opcode: u8,
        instruction: Instruction,
    ) -> u32 {
        self.halted = false;

        match instruction {
            Instruction::Nop => {}

            // Data transfer
            Instruction::Lxi(pair) => {
                let value = self.fetch_word(bus);
                self.set_pair(pair, value);
            }
            Instruction::Stax(pair) => bus.write(self.pair(pair), self.regs.a),
            Instruction::Ldax(pair) => self.regs.a = bus.read(self.pair(pair)),
            Instruction::Mvi(dst) => {
                let value = self.fetch(bus);
                self.write_operand(bus, dst, value);
            }
            Instruction::Mov(dst, src) => {
                let value = self.read_operand(bus, src);
                self.write_operand(bus, dst, value);
            }
            Instruction::Shld => {
                let address = self.fetch_word(bus);
                bus.write_word(address, self.regs.hl());
            }
            Instruction::Lhld => {
                let address = self.fetch_word(bus);
                let value = bus.read_word(address);
                self.regs.set_hl(value);
            }
            Instruction::Sta => {
                let address = self.fetch_word(bus);
                bus.write(address, self.regs.a);
            }
            Instruction::Lda => {
                let address = self.fetch_word(bus);
                self.regs.a = bus.read(address);
            }
            Instruction::Xchg => {
                let de = self.regs.de();
                self.regs.set_de(self.regs.hl());
                self.regs.set_hl(de);
            }
            Instruction::Xthl => {
                let top = bus.read_word(self.regs.sp);
                bus.write_word(self.regs.sp, self.regs.hl());
                self.regs.set_hl(top);
            }
            Instruction::Sphl => self.regs.sp = self.regs.hl(),

            // 16-bit arithmetic
            Instruction::Inx(pair) => {
                let value = self.pair(pair).wrapping_add(1);
                self.set_pair(pair, value);
            }
            Instruction::Dcx(pair) => {
                let value = self.pair(pair).wrapping_sub(1);
                self.set_pair(pair, value);
            }
            Instruction::Dad(pair) => {
                let (hl, value) = (self.regs.hl(), self.pair(pair));
                let result = alu::dad(&mut self.regs.flags, hl, value);
                self.regs.set_hl(result);
            }

            // 8-bit increment/decrement
            Instruction::Inr(operand) => {
                let value = self.read_operand(bus, operand);
                let result = alu::inr(&mut self.regs.flags, self.regs.a, value);
                self.write_operand(bus, operand, result);
            }
            Instruction::Dcr(operand) => {
                let value = self.read_operand(bus, operand);
                let result = alu::dcr(&mut self.regs.flags, self.regs.a, value);
                self.write_operand(bus, operand, result);
            }

            // Accumulator group
            Instruction::Alu(op, src) => {
                let value = self.read_operand(bus, src);
                self.alu(op, value);
            }
            Instruction::AluImmediate(op) => {
                let value = self.fetch(bus);
                self.alu(op, value);
            }
            Instruction::Rlc => self.regs.a = alu::rlc(&mut self.regs.flags, self.regs.a),
            Instruction::Rrc => self.regs.a = alu::rrc(&mut self.regs.flags, self.regs.a),
            Instruction::Ral => self.regs.a = alu::ral(&mut self.regs.flags, self.regs.a),
            Instruction::Rar => self.regs.a = alu::rar(&mut self.regs.flags, self.regs.a),
            Instruction::Daa => self.regs.a = alu::daa(&mut self.regs.flags, self.regs.a),
            Instruction::Cma => self.regs.a = !self.regs.a,
            Instruction::Stc => self.regs.flags.cy = true,
            Instruction::Cmc => self.regs.flags.cy = !self.regs.flags.cy,

            // Branches
            Instruction::Jmp => self.regs.pc = self.fetch_word(bus),
            Instruction::JmpIf(condition) => {
                let address = self.fetch_word(bus);
                if !self.condition(condition) {
                    return JUMP_NOT_TAKEN;
                }
                self.regs.pc = address;
                return JUMP_TAKEN;
            }
            Instruction::Call => {
                let address = self.fetch_word(bus);
                self.call(bus, address);
            }
            Instruction::CallIf(condition) => {
                let address = self.fetch_word(bus);
                if !self.condition(condition) {
                    return CALL_NOT_TAKEN;
                }
                self.call(bus, address);
                return CALL_TAKEN;
            }
            Instruction::Ret => self.regs.pc = self.pop(bus),
            Instruction::RetIf(condition) => {
                if !self.condition(condition) {
                    return RET_NOT_TAKEN;
                }
                self.regs.pc = self.pop(bus);
                return RET_TAKEN;
            }
            Instruction::Rst(n) => self.call(bus, u16::from(n) * 8),
            Instruction::Pchl => self.regs.pc = self.regs.hl(),

            // Stack
            Instruction::Push(pair) => {
                let value = self.stack_pair(pair);
                self.push(bus, value);
            }
            Instruction::Pop(pair) => {
                let value = self.pop(bus);
                self.set_stack_pair(pair, value);
            }

            // I/O and machine control
            Instruction::Out => {
                let port = self.fetch(bus);
                bus.write_io(port, self.regs.a);
            }
            Instruction::In => {
                let port = self.fetch(bus);
                self.regs.a = bus.read_io(port);
            }
            Instruction::Ei => self.regs.inte = true,
            Instruction::Di => self.regs.inte = false,
            Instruction::Hlt => {
                // Spin: back up onto the HLT so the next step runs it again.
                self.regs.pc = self.regs.pc.wrapping_sub(1);
                self.halted = true;
            }

            Instruction::Unknown => {
                log::warn!(
                    "unknown opcode {opcode:#04X} at {:#06X}",
                    self.regs.pc.wrapping_sub(1)
                );
            }
        }

        0
    }

    fn alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a;
        let flags = &mut self.regs.flags;
        match op {
            AluOp::Add => self.regs.a = alu::add(flags, a, value, false),
            AluOp::Adc => {
                let carry = flags.cy;
                self.regs.a = alu::add(flags, a, value, carry);
            }
            AluOp::Sub => self.regs.a = alu::sub(flags, a, value, false),
            AluOp::Sbb => {
                let borrow = flags.cy;
                self.regs.a = alu::sub(flags, a, value, borrow);
            }
            AluOp::Ana => self.regs.a = alu::ana(flags, a, value),
            AluOp::Xra => self.regs.a = alu::xra(flags, a, value),
            AluOp::Ora => self.regs.a = alu::ora(flags, a, value),
            AluOp::Cmp => alu::cmp(flags, a, value),
        }
    }

    fn condition(&self, condition: Condition) -> bool {
        let flags = &self.regs.flags;
        match condition {
            Condition::NotZero => !flags.z,
            Condition::Zero => flags.z,
            Condition::NoCarry => !flags.cy,
            Condition::Carry => flags.cy,
            Condition::ParityOdd => !flags.p,
            Condition::ParityEven => flags.p,
            Condition::Plus => !flags.s,
            Condition::Minus => flags.s,
        }
    }

    fn read_operand<B: Bus>(&self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::B => self.regs.b,
            Operand::C => self.regs.c,
            Operand::D => self.regs.d,
            Operand::E => self.regs.e,
            Operand::H => self.regs.h,
            Operand::L => self.regs.l,
            Operand::M => bus.read(self.regs.hl()),
            Operand::A => self.regs.a,
        }
    }

    fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::B => self.regs.b = value,
            Operand::C => self.regs.c = value,
            Operand::D => self.regs.d = value,
            Operand::E => self.regs.e = value,
            Operand::H => self.regs.h = value,
            Operand::L => self.regs.l = value,
            Operand::M => bus.write(self.regs.hl(), value),
            Operand::A => self.regs.a = value,
        }
    }

    /// Register pair for LXI/INX/DCX/DAD/STAX/LDAX, where the fourth slot is SP.
    fn pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::BC => self.regs.bc(),
            Pair::DE => self.regs.de(),
            Pair::HL => self.regs.hl(),
            Pair::SpOrPsw => self.regs.sp,
        }
    }

    fn set_pair(&mut self, pair: Pair, value: u16) {
        match pair {
            Pair::BC => self.regs.set_bc(value),
            Pair::DE => self.regs.set_de(value),
            Pair::HL => self.regs.set_hl(value),
            Pair::SpOrPsw => self.regs.sp = value,
        }
    }

    /// Register pair for PUSH/POP, where the fourth slot is PSW.
    fn stack_pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::SpOrPsw => self.regs.psw(),
            other => self.pair(other),
        }
    }

    fn set_stack_pair(&mut self, pair: Pair, value: u16) {
        match pair {
            Pair::SpOrPsw => self.regs.set_psw(value),
            other => self.set_pair(other, value),
        }
    }
}
