//! Opcode table: decoded instruction and base cycle cost for every byte.
//!
//! The table is built at compile time from `decode()` and `BASE_CYCLES`, so
//! the handler and its timing are always looked up together by opcode.
//! Conditional jumps, calls and returns have a base cost of zero; the
//! executor adds the taken or not-taken cost.

/// An 8-bit operand selected by a 3-bit register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    B,
    C,
    D,
    E,
    H,
    L,
    /// Memory at HL.
    M,
    A,
}

/// A 16-bit register pair selected by a 2-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pair {
    BC,
    DE,
    HL,
    /// SP for LXI/INX/DCX/DAD, PSW for PUSH/POP.
    SpOrPsw,
}

/// Branch condition selected by a 3-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

/// Accumulator operation selected by a 3-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

/// A decoded 8080 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Lxi(Pair),
    Stax(Pair),
    Ldax(Pair),
    Inx(Pair),
    Dcx(Pair),
    Dad(Pair),
    Inr(Operand),
    Dcr(Operand),
    Mvi(Operand),
    Mov(Operand, Operand),
    Rlc,
    Rrc,
    Ral,
    Rar,
    Shld,
    Lhld,
    Sta,
    Lda,
    Daa,
    Cma,
    Stc,
    Cmc,
    Hlt,
    Alu(AluOp, Operand),
    AluImmediate(AluOp),
    Jmp,
    JmpIf(Condition),
    Call,
    CallIf(Condition),
    Ret,
    RetIf(Condition),
    /// Restart: call to `n * 8`.
    Rst(u8),
    Push(Pair),
    Pop(Pair),
    Out,
    In,
    Xthl,
    Pchl,
    Xchg,
    Sphl,
    Di,
    Ei,
    /// An opcode the 8080 doesn't define. Executes as a one-byte no-op.
    Unknown,
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub instruction: Instruction,
    pub cycles: u8,
}

/// Cycles added when a conditional jump is taken.
pub const JUMP_TAKEN: u32 = 15;
/// Cycles added when a conditional jump is not taken.
pub const JUMP_NOT_TAKEN: u32 = 10;
/// Cycles added when a conditional call is taken.
pub const CALL_TAKEN: u32 = 18;
/// Cycles added when a conditional call is not taken.
pub const CALL_NOT_TAKEN: u32 = 11;
/// Cycles added when a conditional return is taken.
pub const RET_TAKEN: u32 = 11;
/// Cycles added when a conditional return is not taken.
pub const RET_NOT_TAKEN: u32 = 5;

#[rustfmt::skip]
const BASE_CYCLES: [u8; 256] = [
    4, 10,  7,  6,  5,  5,  7,  4,  4, 11,  7,  6,  5,  5,  7,  4, // 0x00
    4, 10,  7,  6,  5,  5,  7,  4,  4, 11,  7,  6,  5,  5,  7,  4, // 0x10
    4, 10, 16,  6,  5,  5,  7,  4,  4, 11, 16,  6,  5,  5,  7,  4, // 0x20
    4, 10, 13,  6, 10, 10, 10,  4,  4, 11, 13,  6,  5,  5,  7,  4, // 0x30
    5,  5,  5,  5,  5,  5,  7,  5,  5,  5,  5,  5,  5,  5,  7,  5, // 0x40
    5,  5,  5,  5,  5,  5,  7,  5,  5,  5,  5,  5,  5,  5,  7,  5, // 0x50
    5,  5,  5,  5,  5,  5,  7,  5,  5,  5,  5,  5,  5,  5,  7,  5, // 0x60
    7,  7,  7,  7,  7,  7,  7,  7,  5,  5,  5,  5,  5,  5,  7,  5, // 0x70
    4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0x80
    4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0x90
    4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0xA0
    4,  4,  4,  4,  4,  4,  7,  4,  4,  4,  4,  4,  4,  4,  7,  4, // 0xB0
    0, 10,  0, 10,  0, 11,  7, 11,  0, 10,  0, 10,  0, 17,  7, 11, // 0xC0
    0, 10,  0, 10,  0, 11,  7, 11,  0, 10,  0, 10,  0, 17,  7, 11, // 0xD0
    0, 10,  0,  4,  0, 11,  7, 11,  0, 10,  0,  4,  0, 17,  7, 11, // 0xE0
    0, 10,  0,  4,  0, 11,  7, 11,  0, 10,  0,  4,  0, 17,  7, 11, // 0xF0
];

/// Decoded instruction and base cycles for every opcode byte.
pub static OPCODES: [Opcode; 256] = build_table();

const fn build_table() -> [Opcode; 256] {
    let mut table = [Opcode {
        instruction: Instruction::Nop,
        cycles: 0,
    }; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = Opcode {
            instruction: decode(i as u8),
            cycles: BASE_CYCLES[i],
        };
        i += 1;
    }
    table
}

const fn operand(bits: u8) -> Operand {
    match bits & 0x07 {
        0 => Operand::B,
        1 => Operand::C,
        2 => Operand::D,
        3 => Operand::E,
        4 => Operand::H,
        5 => Operand::L,
        6 => Operand::M,
        _ => Operand::A,
    }
}

const fn pair(bits: u8) -> Pair {
    match bits & 0x03 {
        0 => Pair::BC,
        1 => Pair::DE,
        2 => Pair::HL,
        _ => Pair::SpOrPsw,
    }
}

const fn condition(bits: u8) -> Condition {
    match bits & 0x07 {
        0 => Condition::NotZero,
        1 => Condition::Zero,
        2 => Condition::NoCarry,
        3 => Condition::Carry,
        4 => Condition::ParityOdd,
        5 => Condition::ParityEven,
        6 => Condition::Plus,
        _ => Condition::Minus,
    }
}

const fn alu_op(bits: u8) -> AluOp {
    match bits & 0x07 {
        0 => AluOp::Add,
        1 => AluOp::Adc,
        2 => AluOp::Sub,
        3 => AluOp::Sbb,
        4 => AluOp::Ana,
        5 => AluOp::Xra,
        6 => AluOp::Ora,
        _ => AluOp::Cmp,
    }
}

/// Decode one opcode byte.
///
/// Field layout: `xx yyy zzz`, with `yyy` split as `pp q` for the
/// register-pair instructions.
#[must_use]
pub const fn decode(opcode: u8) -> Instruction {
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 1;

    match opcode >> 6 {
        0 => match z {
            // 0x08, 0x10, ... 0x38 are undocumented NOPs
            0 => Instruction::Nop,
            1 if q == 0 => Instruction::Lxi(pair(p)),
            1 => Instruction::Dad(pair(p)),
            2 => match (p, q) {
                (0 | 1, 0) => Instruction::Stax(pair(p)),
                (0 | 1, _) => Instruction::Ldax(pair(p)),
                (2, 0) => Instruction::Shld,
                (2, _) => Instruction::Lhld,
                (_, 0) => Instruction::Sta,
                _ => Instruction::Lda,
            },
            3 if q == 0 => Instruction::Inx(pair(p)),
            3 => Instruction::Dcx(pair(p)),
            4 => Instruction::Inr(operand(y)),
            5 => Instruction::Dcr(operand(y)),
            6 => Instruction::Mvi(operand(y)),
            _ => match y {
                0 => Instruction::Rlc,
                1 => Instruction::Rrc,
                2 => Instruction::Ral,
                3 => Instruction::Rar,
                4 => Instruction::Daa,
                5 => Instruction::Cma,
                6 => Instruction::Stc,
                _ => Instruction::Cmc,
            },
        },
        1 => {
            if opcode == 0x76 {
                Instruction::Hlt
            } else {
                Instruction::Mov(operand(y), operand(z))
            }
        }
        2 => Instruction::Alu(alu_op(y), operand(z)),
        _ => match z {
            0 => Instruction::RetIf(condition(y)),
            1 => match (q, p) {
                (0, _) => Instruction::Pop(pair(p)),
                // 0xD9 is an undocumented alias of RET
                (_, 0 | 1) => Instruction::Ret,
                (_, 2) => Instruction::Pchl,
                _ => Instruction::Sphl,
            },
            2 => Instruction::JmpIf(condition(y)),
            3 => match y {
                0 => Instruction::Jmp,
                2 => Instruction::Out,
                3 => Instruction::In,
                4 => Instruction::Xthl,
                5 => Instruction::Xchg,
                6 => Instruction::Di,
                7 => Instruction::Ei,
                _ => Instruction::Unknown,
            },
            4 => Instruction::CallIf(condition(y)),
            5 => match (q, p) {
                (0, _) => Instruction::Push(pair(p)),
                (_, 0) => Instruction::Call,
                _ => Instruction::Unknown,
            },
            6 => Instruction::AluImmediate(alu_op(y)),
            _ => Instruction::Rst(y),
        },
    }
}
