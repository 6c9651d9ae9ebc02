pub(crate) mod instructions;
mod registers;


use crate::memory::AddressSpace;
pub use registers::{CpuRegister, CpuRegisterPair, CpuRegisters};

/// Machine cycles consumed by the interrupt dispatch sequence.
pub const ISR_CYCLES_REQUIRED: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    VBlank,
    LcdStatus,
    Timer,
    Joypad,
    // serial not implemented
}

impl InterruptType {
    pub fn handler_address(self) -> u16 {
        match self {
            Self::VBlank => 0x0040,
            Self::LcdStatus => 0x0048,
            Self::Timer => 0x0050,
            Self::Joypad => 0x0060,
        }
    }

    pub fn bit(self) -> u8 {
        match self {
            Self::VBlank => 0x01,
            Self::LcdStatus => 0x02,
            Self::Timer => 0x04,
            Self::Joypad => 0x10,
        }
    }

    /// Returns the highest priority interrupt that is both requested and enabled, or None.
    pub(crate) fn highest_priority(ie_value: u8, if_value: u8) -> Option<Self> {
        let masked = ie_value & if_value;
        [Self::VBlank, Self::LcdStatus, Self::Timer, Self::Joypad]
            .into_iter()
            .find(|interrupt_type| masked & interrupt_type.bit() != 0)
    }
}

/// Whether an interrupt should be serviced before the next instruction executes.
pub(crate) fn interrupt_triggered(
    cpu_registers: &CpuRegisters,
    address_space: &AddressSpace,
) -> bool {
    cpu_registers.ime && !cpu_registers.interrupt_delay && address_space.interrupt_pending()
}

/// Dispatch the highest priority pending interrupt: push PC, clear the request bit, clear the
/// master enable, and jump to the handler vector.
pub(crate) fn execute_interrupt_service_routine(
    cpu_registers: &mut CpuRegisters,
    address_space: &mut AddressSpace,
) {
    let interrupt_type =
        InterruptType::highest_priority(address_space.get_ie_register(), address_space.get_if_register())
            .expect("interrupt service routine should only run when an interrupt has triggered");

    cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
    address_space.write_word(cpu_registers.sp, cpu_registers.pc);

    log::trace!(
        "servicing {interrupt_type:?} interrupt, replacing PC {:04X} with {:04X}",
        cpu_registers.pc,
        interrupt_type.handler_address()
    );

    cpu_registers.pc = interrupt_type.handler_address();
    address_space.clear_interrupt_flag(interrupt_type);
    cpu_registers.ime = false;
}
