use crate::memory::address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapperType {
    None,
    Mbc1,
}

impl MapperType {
    /// Decode the cartridge-type byte from the header. Only the unbanked type and the first
    /// bank-switched controller family are supported.
    pub(crate) fn parse_byte(mapper_byte: u8) -> Option<Self> {
        match mapper_byte {
            0x00 => Some(Self::None),
            // 0x01 is the bare controller, 0x02 adds RAM, 0x03 adds RAM + battery
            0x01 | 0x02 | 0x03 => Some(Self::Mbc1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RamMapResult {
    // Relative address into the full external RAM array
    Address(u32),
    // RAM access is disabled or the cartridge has no RAM
    None,
}

#[derive(Debug, Clone)]
pub(crate) enum Mapper {
    None,
    Mbc1 {
        rom_bank_bit_mask: u8,
        ram_bank_bit_mask: u8,
        ram_enable: u8,
        rom_bank_number: u8,
        ram_bank_number: u8,
        banking_mode_select: u8,
    },
}

impl Mapper {
    pub(crate) fn new(mapper_type: MapperType, rom_size: u32, ram_size: u32) -> Self {
        let rom_bank_bit_mask = if rom_size >= 1 << 14 {
            ((rom_size >> 14) - 1) as u8
        } else {
            0
        };
        let ram_bank_bit_mask = if ram_size >= 1 << 13 {
            ((ram_size >> 13) - 1) as u8
        } else {
            0
        };

        log::debug!("setting ROM bit mask to {rom_bank_bit_mask:02X} for size {rom_size}");
        log::debug!("setting RAM bit mask to {ram_bank_bit_mask:02X} for size {ram_size}");

        match mapper_type {
            MapperType::None => Self::None,
            MapperType::Mbc1 => Self::Mbc1 {
                rom_bank_bit_mask,
                ram_bank_bit_mask,
                ram_enable: 0x00,
                rom_bank_number: 0x00,
                ram_bank_number: 0x00,
                banking_mode_select: 0x00,
            },
        }
    }

    /// Map a CPU address in 0x0000-0x7FFF to an offset into the cartridge ROM image.
    pub(crate) fn map_rom_address(&self, address: u16) -> u32 {
        match self {
            Self::None => u32::from(address),
            &Self::Mbc1 {
                rom_bank_bit_mask,
                rom_bank_number,
                ram_bank_number,
                banking_mode_select,
                ..
            } => match address {
                address @ 0x0000..=0x3FFF => u32::from(address),
                address @ 0x4000..=0x7FFF => {
                    // A bank register of 0 selects bank 1
                    let rom_bank_number = if rom_bank_number == 0x00 {
                        0x01
                    } else {
                        rom_bank_number
                    };
                    // In banking mode 0 the secondary register supplies bank bits 5-6
                    let bank_number = if banking_mode_select == 0x00 {
                        (rom_bank_number | (ram_bank_number << 5)) & rom_bank_bit_mask
                    } else {
                        rom_bank_number & rom_bank_bit_mask
                    };
                    u32::from(address & 0x3FFF) + (u32::from(bank_number) << 14)
                }
                _ => panic!("mapper called for address outside of cartridge address range: {address:04X}"),
            },
        }
    }

    // ROM writes don't modify the ROM (it is read-only after all) but they do modify cartridge
    // banking registers. On the unbanked type they are dropped entirely.
    pub(crate) fn write_rom_address(&mut self, address: u16, value: u8) {
        match self {
            Self::None => {}
            Self::Mbc1 {
                ram_enable,
                rom_bank_number,
                ram_bank_number,
                banking_mode_select,
                ..
            } => match address {
                _address @ 0x0000..=0x1FFF => {
                    log::trace!("ram_enable changed to {value:02X}");
                    *ram_enable = value;
                }
                _address @ 0x2000..=0x3FFF => {
                    log::trace!("rom_bank_number changed to {value:02X}");
                    *rom_bank_number = value & 0x1F;
                }
                _address @ 0x4000..=0x5FFF => {
                    log::trace!("ram_bank_number changed to {value:02X}");
                    *ram_bank_number = value & 0x03;
                }
                _address @ 0x6000..=0x7FFF => {
                    log::trace!("banking_mode_select changed to {value:02X}");
                    *banking_mode_select = value & 0x01;
                }
                _ => panic!("invalid ROM write address in MBC1 mapper: {address:04X}"),
            },
        }
    }

    /// Map a CPU address in 0xA000-0xBFFF to an offset into external cartridge RAM, if RAM is
    /// currently enabled.
    pub(crate) fn map_ram_address(&self, address: u16) -> RamMapResult {
        let relative_address = address - address::EXTERNAL_RAM_START;

        match self {
            Self::None => RamMapResult::Address(u32::from(relative_address)),
            &Self::Mbc1 {
                ram_bank_bit_mask,
                ram_enable,
                ram_bank_number,
                banking_mode_select,
                ..
            } => {
                if ram_enable & 0x0F != 0x0A {
                    return RamMapResult::None;
                }

                if banking_mode_select == 0x00 {
                    RamMapResult::Address(u32::from(relative_address))
                } else {
                    let bank_number = ram_bank_number & ram_bank_bit_mask;
                    RamMapResult::Address(
                        u32::from(relative_address) + (u32::from(bank_number) << 13),
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbanked_mapper_is_identity() {
        let mut mapper = Mapper::new(MapperType::None, 1 << 15, 0);

        assert_eq!(0x0000, mapper.map_rom_address(0x0000));
        assert_eq!(0x7FFF, mapper.map_rom_address(0x7FFF));

        // Bank-control writes are no-ops on the unbanked type
        mapper.write_rom_address(0x2000, 0x05);
        assert_eq!(0x4000, mapper.map_rom_address(0x4000));
    }

    #[test]
    fn mbc1_mapper_rom_small() {
        // 256KB ROM
        let mut mapper = Mapper::new(MapperType::Mbc1, 1 << 18, 0);

        assert_eq!(0x0000, mapper.map_rom_address(0x0000));
        assert_eq!(0x3FFF, mapper.map_rom_address(0x3FFF));
        assert_eq!(0x4000, mapper.map_rom_address(0x4000));
        assert_eq!(0x7FFF, mapper.map_rom_address(0x7FFF));

        // Set ROM bank number
        mapper.write_rom_address(0x2000, 0x05);

        assert_eq!(0x0000, mapper.map_rom_address(0x0000));
        assert_eq!(0x3FFF, mapper.map_rom_address(0x3FFF));
        assert_eq!(0x14000, mapper.map_rom_address(0x4000));
        assert_eq!(0x15324, mapper.map_rom_address(0x5324));
        assert_eq!(0x17FFF, mapper.map_rom_address(0x7FFF));

        // Set ROM bank number higher than the highest bank number, should get masked to 0x05
        mapper.write_rom_address(0x2000, 0x15);

        assert_eq!(0x14000, mapper.map_rom_address(0x4000));
        assert_eq!(0x17FFF, mapper.map_rom_address(0x7FFF));
    }

    #[test]
    fn mbc1_mapper_rom_large() {
        // 2MB ROM
        let mut mapper = Mapper::new(MapperType::Mbc1, 1 << 21, 0);

        // Set ROM bank number and the secondary register; in banking mode 0 the secondary
        // register supplies bits 5-6 of the bank number
        mapper.write_rom_address(0x2000, 0x05);
        mapper.write_rom_address(0x4000, 0x02);

        assert_eq!(0x0000, mapper.map_rom_address(0x0000));
        assert_eq!(0x114000, mapper.map_rom_address(0x4000));
        assert_eq!(0x115234, mapper.map_rom_address(0x5234));
        assert_eq!(0x117FFF, mapper.map_rom_address(0x7FFF));

        // Set ROM bank number to 00, should be treated as 01
        mapper.write_rom_address(0x2000, 0x00);

        assert_eq!(0x104000, mapper.map_rom_address(0x4000));
        assert_eq!(0x107FFF, mapper.map_rom_address(0x7FFF));
    }

    #[test]
    fn mbc1_mapper_ram() {
        // 256KB ROM, 32KB RAM
        let mut mapper = Mapper::new(MapperType::Mbc1, 1 << 18, 1 << 15);

        // RAM is disabled until the enable sequence is written
        assert_eq!(RamMapResult::None, mapper.map_ram_address(0xA000));

        // Enable RAM; only a low nibble of 0xA enables
        mapper.write_rom_address(0x0000, 0x0A);

        assert_eq!(RamMapResult::Address(0x0000), mapper.map_ram_address(0xA000));
        assert_eq!(RamMapResult::Address(0x1234), mapper.map_ram_address(0xB234));

        // RAM banking only applies in banking mode 1
        mapper.write_rom_address(0x4000, 0x02);
        assert_eq!(RamMapResult::Address(0x0000), mapper.map_ram_address(0xA000));

        mapper.write_rom_address(0x6000, 0x01);
        assert_eq!(RamMapResult::Address(0x4000), mapper.map_ram_address(0xA000));

        // Any other value disables RAM again
        mapper.write_rom_address(0x0000, 0x0B);
        assert_eq!(RamMapResult::None, mapper.map_ram_address(0xA000));
    }
}
