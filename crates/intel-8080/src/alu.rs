//! ALU operations for the 8080.
//!
//! Each operation takes the flags it updates and returns the value to store.
//! Arithmetic is done in `i32` so the carry rule can see results above $FF
//! and below zero before they are truncated.

use crate::flags::{ALL, CF, Flags, PF, SF, ZF};

/// Flags touched by INR/DCR and the logical group: everything but CY.
const NO_CARRY: u8 = ALL & !CF;

/// A + value + carry.
#[must_use]
pub fn add(flags: &mut Flags, a: u8, value: u8, carry: bool) -> u8 {
    let result = i32::from(a) + i32::from(value) + i32::from(carry);
    flags.update(ALL, a, result);
    result as u8
}

/// A - value - borrow.
#[must_use]
pub fn sub(flags: &mut Flags, a: u8, value: u8, borrow: bool) -> u8 {
    let result = i32::from(a) - i32::from(value) - i32::from(borrow);
    flags.update(ALL, a, result);
    result as u8
}

/// Compare: flags of A - value, A unchanged.
pub fn cmp(flags: &mut Flags, a: u8, value: u8) {
    flags.update(ALL, a, i32::from(a) - i32::from(value));
}

/// Increment. `a` is the accumulator, which AC is judged against even
/// when the operand is another register.
#[must_use]
pub fn inr(flags: &mut Flags, a: u8, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    flags.update(NO_CARRY, a, i32::from(result));
    result
}

/// Decrement. AC is judged against the accumulator, as for [`inr`].
#[must_use]
pub fn dcr(flags: &mut Flags, a: u8, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    flags.update(NO_CARRY, a, i32::from(result));
    result
}

/// Logical AND. Clears CY, recomputes AC.
#[must_use]
pub fn ana(flags: &mut Flags, a: u8, value: u8) -> u8 {
    let result = a & value;
    flags.update(NO_CARRY, a, i32::from(result));
    flags.cy = false;
    result
}

/// Logical XOR. Clears CY and AC.
#[must_use]
pub fn xra(flags: &mut Flags, a: u8, value: u8) -> u8 {
    let result = a ^ value;
    flags.update(SF | ZF | PF, a, i32::from(result));
    flags.cy = false;
    flags.ac = false;
    result
}

/// Logical OR. Clears CY and AC.
#[must_use]
pub fn ora(flags: &mut Flags, a: u8, value: u8) -> u8 {
    let result = a | value;
    flags.update(SF | ZF | PF, a, i32::from(result));
    flags.cy = false;
    flags.ac = false;
    result
}

/// 16-bit add for DAD. Only CY is affected.
#[must_use]
pub fn dad(flags: &mut Flags, hl: u16, value: u16) -> u16 {
    let result = u32::from(hl) + u32::from(value);
    flags.cy = result > 0xFFFF;
    result as u16
}

/// Decimal adjust accumulator.
///
/// Two passes: the low nibble is corrected first and may set AC, then the
/// high nibble is corrected and may set CY. A carry already set is never
/// cleared.
#[must_use]
pub fn daa(flags: &mut Flags, a: u8) -> u8 {
    let mut a = a;

    let lsb = a & 0x0F;
    if lsb > 9 || flags.ac {
        flags.ac = lsb + 6 > 0x0F;
        a = a.wrapping_add(0x06);
    }

    let msb = a >> 4;
    if msb > 9 || flags.cy {
        if msb + 6 > 0x0F {
            flags.cy = true;
        }
        a = a.wrapping_add(0x60);
    }

    flags.update(SF | ZF | PF, a, i32::from(a));
    a
}

/// RLC: bit 7 goes to CY and to bit 0.
#[must_use]
pub fn rlc(flags: &mut Flags, a: u8) -> u8 {
    flags.cy = a & 0x80 != 0;
    a.rotate_left(1)
}

/// RRC: bit 0 goes to CY and to bit 7.
#[must_use]
pub fn rrc(flags: &mut Flags, a: u8) -> u8 {
    flags.cy = a & 0x01 != 0;
    a.rotate_right(1)
}

/// RAL: rotate left through carry.
#[must_use]
pub fn ral(flags: &mut Flags, a: u8) -> u8 {
    let carry_in = u8::from(flags.cy);
    flags.cy = a & 0x80 != 0;
    (a << 1) | carry_in
}

/// RAR: rotate right through carry.
#[must_use]
pub fn rar(flags: &mut Flags, a: u8) -> u8 {
    let carry_in = u8::from(flags.cy);
    flags.cy = a & 0x01 != 0;
    (a >> 1) | (carry_in << 7)
}
