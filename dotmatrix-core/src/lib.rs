//! Hardware-level emulation core for the original dot-matrix handheld: the CPU instruction
//! interpreter, the memory-mapped address space with cartridge bank switching, and the display
//! controller timing state machine, advanced in lock-step with the instruction stream.
//!
//! The [`Emulator`] facade owns all of the pieces and drives them in the required order: each
//! [`Emulator::step`] executes exactly one instruction (or services one interrupt, or idles one
//! machine cycle while halted) and then advances the display controller by the cycle count that
//! instruction consumed.

mod cpu;
mod joypad;
mod memory;
mod ppu;
mod timer;

use cpu::instructions::{self, ParseError};
use thiserror::Error;

pub use cpu::{CpuRegisters, InterruptType};
pub use memory::{AddressSpace, Cartridge, CartridgeLoadError, BOOT_ROM};
pub use ppu::{FrameBuffer, Mode, PpuState, SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    #[error("unimplemented opcode 0x{opcode:02X} at address 0x{address:04X}")]
    UnimplementedOpcode { opcode: u8, address: u16 },
    #[error("emulator previously faulted on opcode 0x{opcode:02X} at address 0x{address:04X}; reset required")]
    Faulted { opcode: u8, address: u16 },
}

/// The result of a single emulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutput {
    /// Machine cycles consumed by the instruction, interrupt dispatch, or halted idle.
    pub cycles: u32,
    /// Whether this step completed a frame; the frame buffer is valid to read when set.
    pub frame_completed: bool,
}

pub struct Emulator {
    address_space: AddressSpace,
    cpu_registers: CpuRegisters,
    fault: Option<(u8, u16)>,
}

impl Emulator {
    /// Build an emulator from a raw ROM image. The boot ROM is mapped and the CPU starts at
    /// address 0x0000, exactly as at power-on.
    pub fn new(rom: Vec<u8>) -> Result<Self, CartridgeLoadError> {
        let cartridge = Cartridge::new(rom)?;
        Ok(Self {
            address_space: AddressSpace::new(cartridge),
            cpu_registers: CpuRegisters::at_power_on(),
            fault: None,
        })
    }

    /// Restore power-on state, clearing any latched fault. The loaded cartridge is kept.
    pub fn reset(&mut self) {
        self.address_space.reset();
        self.cpu_registers = CpuRegisters::at_power_on();
        self.fault = None;
    }

    /// Execute one unit of work: an interrupt dispatch, a single instruction, or a one-cycle
    /// halted idle. The display controller is then advanced by exactly the cycles consumed, so
    /// CPU time is always accounted for before display time.
    ///
    /// A decode failure (illegal opcode) latches a fault; every subsequent call returns
    /// [`StepError::Faulted`] until [`Emulator::reset`] is called.
    pub fn step(&mut self) -> Result<StepOutput, StepError> {
        if let Some((opcode, address)) = self.fault {
            return Err(StepError::Faulted { opcode, address });
        }

        // One-time boot ROM handoff when control reaches the cartridge entry point
        if self.address_space.boot_rom_mapped()
            && self.cpu_registers.pc == memory::address::ENTRY_POINT
        {
            self.address_space.unmap_boot_rom();
        }

        let interrupt_delay_was_set = self.cpu_registers.interrupt_delay;

        // A pending enabled interrupt wakes a halted CPU even when the master enable is off
        if self.cpu_registers.halted && self.address_space.interrupt_pending() {
            self.cpu_registers.halted = false;
        }

        let cycles = if cpu::interrupt_triggered(&self.cpu_registers, &self.address_space) {
            cpu::execute_interrupt_service_routine(&mut self.cpu_registers, &mut self.address_space);
            cpu::ISR_CYCLES_REQUIRED
        } else if self.cpu_registers.halted {
            1
        } else {
            let (instruction, pc) =
                match instructions::parse_next_instruction(&self.address_space, self.cpu_registers.pc)
                {
                    Ok(parsed) => parsed,
                    Err(ParseError::UnimplementedOpcode { opcode, address }) => {
                        log::error!(
                            "halting on unimplemented opcode 0x{opcode:02X} at 0x{address:04X}"
                        );
                        self.fault = Some((opcode, address));
                        return Err(StepError::UnimplementedOpcode { opcode, address });
                    }
                };

            self.cpu_registers.pc = pc;
            let cycles = instruction.cycles_required(&self.cpu_registers);
            instruction.execute(&mut self.address_space, &mut self.cpu_registers);
            cycles
        };

        if interrupt_delay_was_set {
            self.cpu_registers.interrupt_delay = false;
        }

        let frame_completed = self.address_space.tick_display(cycles).is_some();

        Ok(StepOutput {
            cycles,
            frame_completed,
        })
    }

    /// Step until the next frame is completed, then return it.
    pub fn run_frame(&mut self) -> Result<&FrameBuffer, StepError> {
        while !self.step()?.frame_completed {}

        Ok(self.address_space.ppu().frame_buffer())
    }

    /// The most recently completed frame.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.address_space.ppu().frame_buffer()
    }

    pub fn cpu_registers(&self) -> &CpuRegisters {
        &self.cpu_registers
    }

    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }
}
