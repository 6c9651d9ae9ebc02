pub(crate) mod address;
mod bootrom;
mod mapper;

use crate::cpu::InterruptType;
use crate::joypad::Joypad;
use crate::ppu::{DisplayEvent, PpuState};
use crate::timer::Timer;
use mapper::{Mapper, MapperType, RamMapResult};
use thiserror::Error;

pub use bootrom::BOOT_ROM;

const WORKING_RAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;

#[derive(Error, Debug)]
pub enum CartridgeLoadError {
    #[error("ROM image is too short to contain a cartridge header: {length} bytes")]
    HeaderMissing { length: usize },
    #[error("unsupported cartridge type byte: 0x{mapper_byte:02X}")]
    UnsupportedMapper { mapper_byte: u8 },
}

/// An immutable cartridge ROM image plus the banking controller state derived from its header.
pub struct Cartridge {
    rom: Vec<u8>,
    mapper_type: MapperType,
    ram_size: u32,
}

impl Cartridge {
    pub fn new(rom: Vec<u8>) -> Result<Self, CartridgeLoadError> {
        if rom.len() < 0x0150 {
            return Err(CartridgeLoadError::HeaderMissing { length: rom.len() });
        }

        let mapper_byte = rom[usize::from(address::MAPPER)];
        let Some(mapper_type) = MapperType::parse_byte(mapper_byte) else {
            return Err(CartridgeLoadError::UnsupportedMapper { mapper_byte });
        };

        let ram_size = match rom[usize::from(address::RAM_SIZE)] {
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            _ => 0,
        };

        log::debug!(
            "loaded {} byte ROM, cartridge type {mapper_type:?}, {ram_size} bytes of external RAM",
            rom.len()
        );

        Ok(Self {
            rom,
            mapper_type,
            ram_size,
        })
    }

    fn read(&self, rom_offset: u32) -> u8 {
        self.rom.get(rom_offset as usize).copied().unwrap_or(0x00)
    }
}

/// The flat 64KB address space: a fixed decode over boot ROM, banked cartridge ROM/RAM, display
/// controller memory, work RAM and its mirror, peripheral registers, high RAM, and the interrupt
/// registers. Every address maps to exactly one handler; undecoded sub-ranges read as zero and
/// ignore writes.
pub struct AddressSpace {
    cartridge: Cartridge,
    mapper: Mapper,
    external_ram: Vec<u8>,
    working_ram: [u8; WORKING_RAM_SIZE],
    hram: [u8; HRAM_SIZE],
    ppu: PpuState,
    joypad: Joypad,
    timer: Timer,
    boot_rom_mapped: bool,
    interrupt_flags: u8,
    ie_register: u8,
}

impl AddressSpace {
    pub fn new(cartridge: Cartridge) -> Self {
        let mapper = Mapper::new(
            cartridge.mapper_type,
            cartridge.rom.len() as u32,
            cartridge.ram_size,
        );
        let external_ram = vec![0; cartridge.ram_size as usize];

        Self {
            cartridge,
            mapper,
            external_ram,
            working_ram: [0; WORKING_RAM_SIZE],
            hram: [0; HRAM_SIZE],
            ppu: PpuState::new(),
            joypad: Joypad::new(),
            timer: Timer::new(),
            boot_rom_mapped: true,
            interrupt_flags: 0x00,
            ie_register: 0x00,
        }
    }

    /// Restore power-on state. The cartridge ROM itself is untouched; everything derived from it
    /// is rebuilt.
    pub fn reset(&mut self) {
        self.mapper = Mapper::new(
            self.cartridge.mapper_type,
            self.cartridge.rom.len() as u32,
            self.cartridge.ram_size,
        );
        self.external_ram.fill(0);
        self.working_ram = [0; WORKING_RAM_SIZE];
        self.hram = [0; HRAM_SIZE];
        self.ppu.reset();
        self.joypad.reset();
        self.timer.reset();
        self.boot_rom_mapped = true;
        self.interrupt_flags = 0x00;
        self.ie_register = 0x00;
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        match address {
            address @ address::ROM_START..=address::BOOT_ROM_END if self.boot_rom_mapped => {
                BOOT_ROM[usize::from(address)]
            }
            address @ address::ROM_START..=address::ROM_END => {
                self.cartridge.read(self.mapper.map_rom_address(address))
            }
            address @ address::VRAM_START..=address::VRAM_END => self.ppu.read_vram(address),
            address @ address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => {
                match self.mapper.map_ram_address(address) {
                    RamMapResult::Address(ram_offset) => self
                        .external_ram
                        .get(ram_offset as usize)
                        .copied()
                        .unwrap_or(0x00),
                    RamMapResult::None => 0x00,
                }
            }
            address @ address::WORKING_RAM_START..=address::WORKING_RAM_END => {
                self.working_ram[usize::from(address - address::WORKING_RAM_START)]
            }
            // Echo RAM mirrors working RAM
            address @ address::ECHO_RAM_START..=address::ECHO_RAM_END => {
                self.working_ram[usize::from(address - address::ECHO_RAM_START)]
            }
            address @ address::OAM_START..=address::OAM_END => self.ppu.read_oam(address),
            address::UNUSABLE_START..=address::UNUSABLE_END => 0x00,
            address::JOYPAD_REGISTER => self.joypad.read_byte(address),
            address @ address::DIV_REGISTER..=address::TAC_REGISTER => {
                self.timer.read_byte(address)
            }
            address::IF_REGISTER => self.interrupt_flags,
            address @ address::LCDC_REGISTER..=address::WX_REGISTER => {
                self.ppu.read_register(address)
            }
            address::IO_REGISTERS_START..=address::IO_REGISTERS_END => 0x00,
            address @ address::HRAM_START..=address::HRAM_END => {
                self.hram[usize::from(address - address::HRAM_START)]
            }
            address::IE_REGISTER => self.ie_register,
        }
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        match address {
            address @ address::ROM_START..=address::ROM_END => {
                self.mapper.write_rom_address(address, value);
            }
            address @ address::VRAM_START..=address::VRAM_END => {
                self.ppu.write_vram(address, value);
            }
            address @ address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => {
                if let RamMapResult::Address(ram_offset) = self.mapper.map_ram_address(address) {
                    if let Some(ram_value) = self.external_ram.get_mut(ram_offset as usize) {
                        *ram_value = value;
                    }
                }
            }
            address @ address::WORKING_RAM_START..=address::WORKING_RAM_END => {
                self.working_ram[usize::from(address - address::WORKING_RAM_START)] = value;
            }
            address @ address::ECHO_RAM_START..=address::ECHO_RAM_END => {
                self.working_ram[usize::from(address - address::ECHO_RAM_START)] = value;
            }
            address @ address::OAM_START..=address::OAM_END => {
                self.ppu.write_oam(address, value);
            }
            address::UNUSABLE_START..=address::UNUSABLE_END => {}
            address::JOYPAD_REGISTER => {
                self.joypad.write_byte(address, value);
            }
            address @ address::DIV_REGISTER..=address::TAC_REGISTER => {
                self.timer.write_byte(address, value);
            }
            address::IF_REGISTER => {
                self.interrupt_flags = value & 0x1F;
            }
            address @ address::LCDC_REGISTER..=address::WX_REGISTER => {
                self.ppu.write_register(address, value);
            }
            address::IO_REGISTERS_START..=address::IO_REGISTERS_END => {}
            address @ address::HRAM_START..=address::HRAM_END => {
                self.hram[usize::from(address - address::HRAM_START)] = value;
            }
            address::IE_REGISTER => {
                self.ie_register = value;
            }
        }
    }

    /// 16-bit reads are composed of two byte reads, low byte at the lower address.
    pub fn read_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([
            self.read_byte(address),
            self.read_byte(address.wrapping_add(1)),
        ])
    }

    pub fn write_word(&mut self, address: u16, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.write_byte(address, lsb);
        self.write_byte(address.wrapping_add(1), msb);
    }

    pub fn boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }

    /// Permanently switch reads in 0x0000-0x00FF from the boot ROM to the cartridge. Called once
    /// when the program counter first reaches the cartridge entry point.
    pub fn unmap_boot_rom(&mut self) {
        log::debug!("leaving boot ROM");
        self.boot_rom_mapped = false;
    }

    /// Advance the display controller by the given number of machine cycles, forwarding any
    /// vertical blank event into the interrupt request register.
    pub(crate) fn tick_display(&mut self, m_cycles: u32) -> Option<DisplayEvent> {
        let event = self.ppu.advance(m_cycles);
        if event == Some(DisplayEvent::VBlankStart) {
            self.interrupt_flags |= InterruptType::VBlank.bit();
        }
        event
    }

    pub fn ppu(&self) -> &PpuState {
        &self.ppu
    }

    pub fn get_ie_register(&self) -> u8 {
        self.ie_register
    }

    pub fn get_if_register(&self) -> u8 {
        self.interrupt_flags
    }

    /// Whether any enabled interrupt has been requested, regardless of the master enable.
    pub fn interrupt_pending(&self) -> bool {
        self.ie_register & self.interrupt_flags & 0x1F != 0
    }

    pub(crate) fn clear_interrupt_flag(&mut self, interrupt_type: InterruptType) {
        self.interrupt_flags &= !interrupt_type.bit();
    }
}
