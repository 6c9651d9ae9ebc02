mod parse;

use crate::cpu::registers::{CpuRegister, CpuRegisterPair, CpuRegisters};
use crate::memory::AddressSpace;

pub use parse::{parse_next_instruction, ParseError};

// Fixed bit position masks used by the single-bit instructions, and their complements.
const BIT_MASKS: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];
const INVERTED_BIT_MASKS: [u8; 8] = [0xFE, 0xFD, 0xFB, 0xF7, 0xEF, 0xDF, 0xBF, 0x7F];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JumpCondition {
    NZ,
    Z,
    NC,
    C,
}

impl JumpCondition {
    fn check(self, cpu_registers: &CpuRegisters) -> bool {
        match self {
            Self::NZ => !cpu_registers.zero_flag(),
            Self::Z => cpu_registers.zero_flag(),
            Self::NC => !cpu_registers.carry_flag(),
            Self::C => cpu_registers.carry_flag(),
        }
    }
}

/// A location an instruction reads an 8-bit value from. Immediate operands are captured at decode
/// time so that execution never re-reads the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadTarget {
    Accumulator,
    Register(CpuRegister),
    Immediate(u8),
    IndirectHL,
    IndirectBC,
    IndirectDE,
    IndirectHLInc,
    IndirectHLDec,
    Direct(u16),
    FFDirect(u8),
    FFIndirectC,
}

impl ReadTarget {
    fn read(self, address_space: &AddressSpace, cpu_registers: &mut CpuRegisters) -> u8 {
        match self {
            Self::Accumulator => cpu_registers.accumulator,
            Self::Register(r) => cpu_registers.read_register(r),
            Self::Immediate(n) => n,
            Self::IndirectHL => address_space.read_byte(cpu_registers.hl()),
            Self::IndirectBC => address_space.read_byte(cpu_registers.bc()),
            Self::IndirectDE => address_space.read_byte(cpu_registers.de()),
            Self::IndirectHLInc => {
                let hl = cpu_registers.hl();
                cpu_registers.set_hl(hl.wrapping_add(1));
                address_space.read_byte(hl)
            }
            Self::IndirectHLDec => {
                let hl = cpu_registers.hl();
                cpu_registers.set_hl(hl.wrapping_sub(1));
                address_space.read_byte(hl)
            }
            Self::Direct(nn) => address_space.read_byte(nn),
            Self::FFDirect(n) => address_space.read_byte(u16::from_be_bytes([0xFF, n])),
            Self::FFIndirectC => {
                address_space.read_byte(u16::from_be_bytes([0xFF, cpu_registers.c]))
            }
        }
    }

    fn extra_cycles(self) -> u32 {
        match self {
            Self::Accumulator | Self::Register(..) => 0,
            Self::Immediate(..)
            | Self::IndirectHL
            | Self::IndirectBC
            | Self::IndirectDE
            | Self::IndirectHLInc
            | Self::IndirectHLDec
            | Self::FFIndirectC => 1,
            Self::FFDirect(..) => 2,
            Self::Direct(..) => 3,
        }
    }
}

/// A location an instruction writes an 8-bit value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteTarget {
    Accumulator,
    Register(CpuRegister),
    IndirectHL,
    IndirectBC,
    IndirectDE,
    IndirectHLInc,
    IndirectHLDec,
    Direct(u16),
    FFDirect(u8),
    FFIndirectC,
}

impl WriteTarget {
    fn write(self, address_space: &mut AddressSpace, cpu_registers: &mut CpuRegisters, value: u8) {
        match self {
            Self::Accumulator => {
                cpu_registers.accumulator = value;
            }
            Self::Register(r) => {
                cpu_registers.set_register(r, value);
            }
            Self::IndirectHL => {
                address_space.write_byte(cpu_registers.hl(), value);
            }
            Self::IndirectBC => {
                address_space.write_byte(cpu_registers.bc(), value);
            }
            Self::IndirectDE => {
                address_space.write_byte(cpu_registers.de(), value);
            }
            Self::IndirectHLInc => {
                let hl = cpu_registers.hl();
                cpu_registers.set_hl(hl.wrapping_add(1));
                address_space.write_byte(hl, value);
            }
            Self::IndirectHLDec => {
                let hl = cpu_registers.hl();
                cpu_registers.set_hl(hl.wrapping_sub(1));
                address_space.write_byte(hl, value);
            }
            Self::Direct(nn) => {
                address_space.write_byte(nn, value);
            }
            Self::FFDirect(n) => {
                address_space.write_byte(u16::from_be_bytes([0xFF, n]), value);
            }
            Self::FFIndirectC => {
                address_space.write_byte(u16::from_be_bytes([0xFF, cpu_registers.c]), value);
            }
        }
    }

    fn extra_cycles(self) -> u32 {
        match self {
            Self::Accumulator | Self::Register(..) => 0,
            Self::IndirectHL
            | Self::IndirectBC
            | Self::IndirectDE
            | Self::IndirectHLInc
            | Self::IndirectHLDec
            | Self::FFIndirectC => 1,
            Self::FFDirect(..) => 2,
            Self::Direct(..) => 3,
        }
    }
}

/// A location an instruction reads, transforms, and writes back in place.
///
/// `Accumulator` is distinct from `Register(A)`: it marks the dedicated one-byte accumulator
/// rotate opcodes, which never set the zero flag, while the 0xCB-prefixed forms compute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModifyTarget {
    Accumulator,
    Register(CpuRegister),
    IndirectHL,
}

impl ModifyTarget {
    fn read(self, address_space: &AddressSpace, cpu_registers: &CpuRegisters) -> u8 {
        match self {
            Self::Accumulator => cpu_registers.accumulator,
            Self::Register(r) => cpu_registers.read_register(r),
            Self::IndirectHL => address_space.read_byte(cpu_registers.hl()),
        }
    }

    fn write(self, address_space: &mut AddressSpace, cpu_registers: &mut CpuRegisters, value: u8) {
        match self {
            Self::Accumulator => {
                cpu_registers.accumulator = value;
            }
            Self::Register(r) => {
                cpu_registers.set_register(r, value);
            }
            Self::IndirectHL => {
                address_space.write_byte(cpu_registers.hl(), value);
            }
        }
    }

    fn updates_zero_flag(self) -> bool {
        !matches!(self, Self::Accumulator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Instruction {
    // LD <dst>, <src> in all of its 8-bit encodings
    Load(WriteTarget, ReadTarget),
    // LD rr, nn
    LoadRegisterPairImmediate(CpuRegisterPair, u16),
    // LD (nn), SP
    LoadDirectStackPointer(u16),
    // LD SP, HL
    LoadStackPointerHL,
    // LDHL SP, e
    LoadHLStackPointerOffset(i8),
    // PUSH rr
    PushStack(CpuRegisterPair),
    // POP rr
    PopStack(CpuRegisterPair),
    // ADD <src>
    Add(ReadTarget),
    // ADC <src>
    AddWithCarry(ReadTarget),
    // SUB <src>
    Subtract(ReadTarget),
    // SBC <src>
    SubtractWithCarry(ReadTarget),
    // CP <src>
    Compare(ReadTarget),
    // AND <src>
    And(ReadTarget),
    // OR <src>
    Or(ReadTarget),
    // XOR <src>
    Xor(ReadTarget),
    // INC r / INC (HL)
    Increment(ModifyTarget),
    // DEC r / DEC (HL)
    Decrement(ModifyTarget),
    // ADD HL, rr
    AddHLRegister(CpuRegisterPair),
    // INC rr
    IncRegisterPair(CpuRegisterPair),
    // DEC rr
    DecRegisterPair(CpuRegisterPair),
    // ADD SP, e
    AddSPImmediate(i8),
    // RLCA / RLC r / RLC (HL)
    RotateLeft(ModifyTarget),
    // RLA / RL r / RL (HL)
    RotateLeftThruCarry(ModifyTarget),
    // RRCA / RRC r / RRC (HL)
    RotateRight(ModifyTarget),
    // RRA / RR r / RR (HL)
    RotateRightThruCarry(ModifyTarget),
    // SLA r / SLA (HL)
    ShiftLeft(ModifyTarget),
    // SRA r / SRA (HL)
    ArithmeticShiftRight(ModifyTarget),
    // SRL r / SRL (HL)
    LogicalShiftRight(ModifyTarget),
    // SWAP r / SWAP (HL)
    Swap(ModifyTarget),
    // BIT n, r / BIT n, (HL)
    TestBit(u8, ReadTarget),
    // SET n, r / SET n, (HL)
    SetBit(u8, ModifyTarget),
    // RES n, r / RES n, (HL)
    ResetBit(u8, ModifyTarget),
    // DAA
    DecimalAdjustAccumulator,
    // CPL
    ComplementAccumulator,
    // SCF
    SetCarryFlag,
    // CCF
    ComplementCarryFlag,
    // JP nn
    Jump(u16),
    // JP HL
    JumpHL,
    // JP cc, nn
    JumpCond(JumpCondition, u16),
    // JR e
    RelativeJump(i8),
    // JR cc, e
    RelativeJumpCond(JumpCondition, i8),
    // the decrement-B-and-branch loop instruction at 0x10
    DecrementJumpNonZero(i8),
    // CALL nn
    Call(u16),
    // CALL cc, nn
    CallCond(JumpCondition, u16),
    // RET
    Return,
    // RET cc
    ReturnCond(JumpCondition),
    // RETI
    ReturnFromInterruptHandler,
    // RST n
    RestartCall(u8),
    // HALT
    Halt,
    // DI
    DisableInterrupts,
    // EI
    EnableInterrupts,
    // NOP
    NoOp,
}

impl Instruction {
    /// Apply this instruction's effects. The program counter has already been advanced past the
    /// instruction by the decode step; control flow instructions overwrite it here.
    pub(crate) fn execute(self, address_space: &mut AddressSpace, cpu_registers: &mut CpuRegisters) {
        match self {
            Self::Load(write_target, read_target) => {
                let value = read_target.read(address_space, cpu_registers);
                write_target.write(address_space, cpu_registers, value);
            }
            Self::LoadRegisterPairImmediate(rr, nn) => {
                cpu_registers.set_register_pair(rr, nn);
            }
            Self::LoadDirectStackPointer(nn) => {
                address_space.write_word(nn, cpu_registers.sp);
            }
            Self::LoadStackPointerHL => {
                cpu_registers.sp = cpu_registers.hl();
            }
            Self::LoadHLStackPointerOffset(e) => {
                let (result, carry, h_flag) = add_sp_offset(cpu_registers.sp, e);
                cpu_registers.set_hl(result);
                cpu_registers.set_flags(false, false, h_flag, carry);
            }
            Self::PushStack(rr) => {
                cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                address_space.write_word(cpu_registers.sp, cpu_registers.read_register_pair(rr));
            }
            Self::PopStack(rr) => {
                let value = address_space.read_word(cpu_registers.sp);
                cpu_registers.set_register_pair(rr, value);
                cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
            }
            Self::Add(read_target) => {
                let operand = read_target.read(address_space, cpu_registers);
                let (sum, carry, h_flag) = add(cpu_registers.accumulator, operand, false);
                cpu_registers.accumulator = sum;
                cpu_registers.set_flags(sum == 0, false, h_flag, carry);
            }
            Self::AddWithCarry(read_target) => {
                let operand = read_target.read(address_space, cpu_registers);
                let (sum, carry, h_flag) =
                    add(cpu_registers.accumulator, operand, cpu_registers.carry_flag());
                cpu_registers.accumulator = sum;
                cpu_registers.set_flags(sum == 0, false, h_flag, carry);
            }
            Self::Subtract(read_target) => {
                let operand = read_target.read(address_space, cpu_registers);
                let (difference, carry, h_flag) = sub(cpu_registers.accumulator, operand, false);
                cpu_registers.accumulator = difference;
                cpu_registers.set_flags(difference == 0, true, h_flag, carry);
            }
            Self::SubtractWithCarry(read_target) => {
                let operand = read_target.read(address_space, cpu_registers);
                let (difference, carry, h_flag) =
                    sub(cpu_registers.accumulator, operand, cpu_registers.carry_flag());
                cpu_registers.accumulator = difference;
                cpu_registers.set_flags(difference == 0, true, h_flag, carry);
            }
            Self::Compare(read_target) => {
                let operand = read_target.read(address_space, cpu_registers);
                let (difference, carry, h_flag) = sub(cpu_registers.accumulator, operand, false);
                cpu_registers.set_flags(difference == 0, true, h_flag, carry);
            }
            Self::And(read_target) => {
                let value = cpu_registers.accumulator & read_target.read(address_space, cpu_registers);
                cpu_registers.accumulator = value;
                cpu_registers.set_flags(value == 0, false, true, false);
            }
            Self::Or(read_target) => {
                let value = cpu_registers.accumulator | read_target.read(address_space, cpu_registers);
                cpu_registers.accumulator = value;
                cpu_registers.set_flags(value == 0, false, false, false);
            }
            Self::Xor(read_target) => {
                let value = cpu_registers.accumulator ^ read_target.read(address_space, cpu_registers);
                cpu_registers.accumulator = value;
                cpu_registers.set_flags(value == 0, false, false, false);
            }
            Self::Increment(modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                let (sum, _, h_flag) = add(value, 1, false);
                modify_target.write(address_space, cpu_registers, sum);
                cpu_registers.set_some_flags(Some(sum == 0), Some(false), Some(h_flag), None);
            }
            Self::Decrement(modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                let (difference, _, h_flag) = sub(value, 1, false);
                modify_target.write(address_space, cpu_registers, difference);
                cpu_registers.set_some_flags(Some(difference == 0), Some(true), Some(h_flag), None);
            }
            Self::AddHLRegister(rr) => {
                let (sum, carry, h_flag) =
                    add_u16(cpu_registers.hl(), cpu_registers.read_register_pair(rr));
                cpu_registers.set_hl(sum);
                cpu_registers.set_some_flags(None, Some(false), Some(h_flag), Some(carry));
            }
            Self::IncRegisterPair(rr) => {
                cpu_registers
                    .set_register_pair(rr, cpu_registers.read_register_pair(rr).wrapping_add(1));
            }
            Self::DecRegisterPair(rr) => {
                cpu_registers
                    .set_register_pair(rr, cpu_registers.read_register_pair(rr).wrapping_sub(1));
            }
            Self::AddSPImmediate(e) => {
                let (result, carry, h_flag) = add_sp_offset(cpu_registers.sp, e);
                cpu_registers.sp = result;
                cpu_registers.set_flags(false, false, h_flag, carry);
            }
            Self::RotateLeft(modify_target) => {
                let (value, carry) = rotate_left(modify_target.read(address_space, cpu_registers));
                modify_target.write(address_space, cpu_registers, value);
                let z = modify_target.updates_zero_flag() && value == 0;
                cpu_registers.set_flags(z, false, false, carry);
            }
            Self::RotateLeftThruCarry(modify_target) => {
                let (value, carry) = rotate_left_thru_carry(
                    modify_target.read(address_space, cpu_registers),
                    cpu_registers.carry_flag(),
                );
                modify_target.write(address_space, cpu_registers, value);
                let z = modify_target.updates_zero_flag() && value == 0;
                cpu_registers.set_flags(z, false, false, carry);
            }
            Self::RotateRight(modify_target) => {
                let (value, carry) = rotate_right(modify_target.read(address_space, cpu_registers));
                modify_target.write(address_space, cpu_registers, value);
                let z = modify_target.updates_zero_flag() && value == 0;
                cpu_registers.set_flags(z, false, false, carry);
            }
            Self::RotateRightThruCarry(modify_target) => {
                let (value, carry) = rotate_right_thru_carry(
                    modify_target.read(address_space, cpu_registers),
                    cpu_registers.carry_flag(),
                );
                modify_target.write(address_space, cpu_registers, value);
                let z = modify_target.updates_zero_flag() && value == 0;
                cpu_registers.set_flags(z, false, false, carry);
            }
            Self::ShiftLeft(modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                let carry = value & 0x80 != 0;
                let value = value << 1;
                modify_target.write(address_space, cpu_registers, value);
                cpu_registers.set_flags(value == 0, false, false, carry);
            }
            Self::ArithmeticShiftRight(modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                let carry = value & 0x01 != 0;
                let value = (value >> 1) | (value & 0x80);
                modify_target.write(address_space, cpu_registers, value);
                cpu_registers.set_flags(value == 0, false, false, carry);
            }
            Self::LogicalShiftRight(modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                let carry = value & 0x01 != 0;
                let value = value >> 1;
                modify_target.write(address_space, cpu_registers, value);
                cpu_registers.set_flags(value == 0, false, false, carry);
            }
            Self::Swap(modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                let value = (value << 4) | (value >> 4);
                modify_target.write(address_space, cpu_registers, value);
                cpu_registers.set_flags(value == 0, false, false, false);
            }
            Self::TestBit(bit, read_target) => {
                let value = read_target.read(address_space, cpu_registers);
                let z = value & BIT_MASKS[bit as usize] == 0;
                cpu_registers.set_some_flags(Some(z), Some(false), Some(true), None);
            }
            Self::SetBit(bit, modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                modify_target.write(
                    address_space,
                    cpu_registers,
                    value | BIT_MASKS[bit as usize],
                );
            }
            Self::ResetBit(bit, modify_target) => {
                let value = modify_target.read(address_space, cpu_registers);
                modify_target.write(
                    address_space,
                    cpu_registers,
                    value & INVERTED_BIT_MASKS[bit as usize],
                );
            }
            Self::DecimalAdjustAccumulator => {
                let mut a = cpu_registers.accumulator;
                let mut carry = cpu_registers.carry_flag();
                if cpu_registers.subtract_flag() {
                    let mut correction = 0x00;
                    if cpu_registers.half_carry_flag() {
                        correction |= 0x06;
                    }
                    if carry {
                        correction |= 0x60;
                    }
                    a = a.wrapping_sub(correction);
                } else {
                    let mut correction = 0x00;
                    if cpu_registers.half_carry_flag() || a & 0x0F > 0x09 {
                        correction |= 0x06;
                    }
                    if carry || a > 0x99 {
                        correction |= 0x60;
                        carry = true;
                    }
                    a = a.wrapping_add(correction);
                }
                cpu_registers.accumulator = a;
                cpu_registers.set_some_flags(Some(a == 0), None, Some(false), Some(carry));
            }
            Self::ComplementAccumulator => {
                cpu_registers.accumulator = !cpu_registers.accumulator;
                cpu_registers.set_some_flags(None, Some(true), Some(true), None);
            }
            Self::SetCarryFlag => {
                cpu_registers.set_some_flags(None, Some(false), Some(false), Some(true));
            }
            Self::ComplementCarryFlag => {
                cpu_registers.set_some_flags(
                    None,
                    Some(false),
                    Some(false),
                    Some(!cpu_registers.carry_flag()),
                );
            }
            Self::Jump(nn) => {
                cpu_registers.pc = nn;
            }
            Self::JumpHL => {
                cpu_registers.pc = cpu_registers.hl();
            }
            Self::JumpCond(cc, nn) => {
                if cc.check(cpu_registers) {
                    cpu_registers.pc = nn;
                }
            }
            Self::RelativeJump(e) => {
                cpu_registers.pc = cpu_registers.pc.wrapping_add(e as u16);
            }
            Self::RelativeJumpCond(cc, e) => {
                if cc.check(cpu_registers) {
                    cpu_registers.pc = cpu_registers.pc.wrapping_add(e as u16);
                }
            }
            Self::DecrementJumpNonZero(e) => {
                cpu_registers.b = cpu_registers.b.wrapping_sub(1);
                if cpu_registers.b != 0 {
                    cpu_registers.pc = cpu_registers.pc.wrapping_add(e as u16);
                }
            }
            Self::Call(nn) => {
                cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                address_space.write_word(cpu_registers.sp, cpu_registers.pc);
                cpu_registers.pc = nn;
            }
            Self::CallCond(cc, nn) => {
                if cc.check(cpu_registers) {
                    cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                    address_space.write_word(cpu_registers.sp, cpu_registers.pc);
                    cpu_registers.pc = nn;
                }
            }
            Self::Return => {
                cpu_registers.pc = address_space.read_word(cpu_registers.sp);
                cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
            }
            Self::ReturnCond(cc) => {
                if cc.check(cpu_registers) {
                    cpu_registers.pc = address_space.read_word(cpu_registers.sp);
                    cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
                }
            }
            Self::ReturnFromInterruptHandler => {
                cpu_registers.pc = address_space.read_word(cpu_registers.sp);
                cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
                cpu_registers.ime = true;
            }
            Self::RestartCall(rst_address) => {
                cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                address_space.write_word(cpu_registers.sp, cpu_registers.pc);
                cpu_registers.pc = u16::from(rst_address);
            }
            Self::Halt => {
                cpu_registers.halted = true;
            }
            Self::DisableInterrupts => {
                cpu_registers.ime = false;
                cpu_registers.interrupt_delay = false;
            }
            Self::EnableInterrupts => {
                // Interrupts are not honored until after the following instruction
                cpu_registers.ime = true;
                cpu_registers.interrupt_delay = true;
            }
            Self::NoOp => {}
        }
    }

    /// The number of machine cycles this instruction will consume, evaluated against the current
    /// flags so that conditional control flow is priced for whether the branch will be taken.
    pub(crate) fn cycles_required(self, cpu_registers: &CpuRegisters) -> u32 {
        match self {
            Self::Load(write_target, read_target) => {
                1 + write_target.extra_cycles() + read_target.extra_cycles()
            }
            Self::LoadRegisterPairImmediate(..) => 3,
            Self::LoadDirectStackPointer(..) => 5,
            Self::LoadStackPointerHL => 2,
            Self::LoadHLStackPointerOffset(..) => 3,
            Self::PushStack(..) => 4,
            Self::PopStack(..) => 3,
            Self::Add(read_target)
            | Self::AddWithCarry(read_target)
            | Self::Subtract(read_target)
            | Self::SubtractWithCarry(read_target)
            | Self::Compare(read_target)
            | Self::And(read_target)
            | Self::Or(read_target)
            | Self::Xor(read_target) => 1 + read_target.extra_cycles(),
            Self::Increment(modify_target) | Self::Decrement(modify_target) => {
                match modify_target {
                    ModifyTarget::IndirectHL => 3,
                    _ => 1,
                }
            }
            Self::AddHLRegister(..) | Self::IncRegisterPair(..) | Self::DecRegisterPair(..) => 2,
            Self::AddSPImmediate(..) => 4,
            Self::RotateLeft(modify_target)
            | Self::RotateLeftThruCarry(modify_target)
            | Self::RotateRight(modify_target)
            | Self::RotateRightThruCarry(modify_target) => match modify_target {
                ModifyTarget::Accumulator => 1,
                ModifyTarget::Register(..) => 2,
                ModifyTarget::IndirectHL => 4,
            },
            Self::ShiftLeft(modify_target)
            | Self::ArithmeticShiftRight(modify_target)
            | Self::LogicalShiftRight(modify_target)
            | Self::Swap(modify_target)
            | Self::SetBit(_, modify_target)
            | Self::ResetBit(_, modify_target) => match modify_target {
                ModifyTarget::IndirectHL => 4,
                _ => 2,
            },
            Self::TestBit(_, read_target) => 2 + read_target.extra_cycles(),
            Self::DecimalAdjustAccumulator
            | Self::ComplementAccumulator
            | Self::SetCarryFlag
            | Self::ComplementCarryFlag => 1,
            Self::Jump(..) => 4,
            Self::JumpHL => 1,
            Self::JumpCond(cc, _) => {
                if cc.check(cpu_registers) {
                    4
                } else {
                    3
                }
            }
            Self::RelativeJump(..) => 3,
            Self::RelativeJumpCond(cc, _) => {
                if cc.check(cpu_registers) {
                    3
                } else {
                    2
                }
            }
            Self::DecrementJumpNonZero(..) => {
                if cpu_registers.b != 0x01 {
                    3
                } else {
                    2
                }
            }
            Self::Call(..) => 6,
            Self::CallCond(cc, _) => {
                if cc.check(cpu_registers) {
                    6
                } else {
                    3
                }
            }
            Self::Return | Self::ReturnFromInterruptHandler => 4,
            Self::ReturnCond(cc) => {
                if cc.check(cpu_registers) {
                    5
                } else {
                    2
                }
            }
            Self::RestartCall(..) => 4,
            Self::Halt
            | Self::DisableInterrupts
            | Self::EnableInterrupts
            | Self::NoOp => 1,
        }
    }
}

fn add(l_value: u8, r_value: u8, carry: bool) -> (u8, bool, bool) {
    let sum = u16::from(l_value) + u16::from(r_value) + u16::from(carry);
    let result = sum as u8;
    let h_flag = (l_value ^ r_value ^ result) & 0x10 != 0;

    (result, sum > 0xFF, h_flag)
}

fn add_u16(l_value: u16, r_value: u16) -> (u16, bool, bool) {
    let (sum, carry_flag) = l_value.overflowing_add(r_value);
    let h_flag = (l_value & 0x0FFF) + (r_value & 0x0FFF) >= 0x1000;

    (sum, carry_flag, h_flag)
}

fn sub(l_value: u8, r_value: u8, carry: bool) -> (u8, bool, bool) {
    let borrow = u16::from(r_value) + u16::from(carry);
    let result = (u16::from(l_value)).wrapping_sub(borrow) as u8;
    let carry_flag = u16::from(l_value) < borrow;
    let h_flag = (l_value ^ r_value ^ result) & 0x10 != 0;

    (result, carry_flag, h_flag)
}

// ADD SP, e and LDHL SP, e both flag off of the unsigned addition of the low bytes
fn add_sp_offset(sp: u16, e: i8) -> (u16, bool, bool) {
    let result = sp.wrapping_add(e as u16);
    let carry = (sp & 0x00FF) + (e as u8 as u16) > 0x00FF;
    let h_flag = (sp & 0x000F) + (e as u8 as u16 & 0x000F) > 0x000F;

    (result, carry, h_flag)
}

fn rotate_left(value: u8) -> (u8, bool) {
    let leftmost_set = value & 0x80 != 0;
    let new_value = (value << 1) | u8::from(leftmost_set);

    (new_value, leftmost_set)
}

fn rotate_left_thru_carry(value: u8, carry: bool) -> (u8, bool) {
    let leftmost_set = value & 0x80 != 0;
    let new_value = (value << 1) | u8::from(carry);

    (new_value, leftmost_set)
}

fn rotate_right(value: u8) -> (u8, bool) {
    let rightmost_set = value & 0x01 != 0;
    let new_value = (value >> 1) | (u8::from(rightmost_set) << 7);

    (new_value, rightmost_set)
}

fn rotate_right_thru_carry(value: u8, carry: bool) -> (u8, bool) {
    let rightmost_set = value & 0x01 != 0;
    let new_value = (value >> 1) | (u8::from(carry) << 7);

    (new_value, rightmost_set)
}
