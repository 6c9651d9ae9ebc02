use dotmatrix_core::{AddressSpace, Cartridge, Emulator, StepError, BOOT_ROM};

const MAPPER_ADDRESS: usize = 0x0147;
const HEADER_CHECKSUM_ADDRESS: usize = 0x014D;

// The boot sequence verifies the logo bytes at 0x0104-0x0133 against its own copy and the header
// checksum over 0x0134-0x014D before handing control to the cartridge; a ROM must carry both to
// make it past the boot ROM.
fn bootable_rom(entry_point_bytes: &[u8]) -> Vec<u8> {
    let mut rom = vec![0x00; 0x8000];
    rom[0x0104..0x0134].copy_from_slice(&BOOT_ROM[0xA8..0xD8]);
    // With an all-zero title region the checksum byte works out to 0xE7
    rom[HEADER_CHECKSUM_ADDRESS] = 0xE7;
    rom[0x0100..0x0100 + entry_point_bytes.len()].copy_from_slice(entry_point_bytes);
    rom
}

fn step_until_entry_point(emulator: &mut Emulator) {
    for _ in 0..10_000_000 {
        if emulator.cpu_registers().pc == 0x0100 {
            return;
        }
        emulator.step().expect("boot sequence should not fault");
    }
    panic!(
        "program counter never reached 0x0100; stuck at 0x{:04X}",
        emulator.cpu_registers().pc
    );
}

#[test]
fn boot_rom_hands_off_at_entry_point() {
    // JR -2 at the entry point parks the CPU once the boot sequence finishes
    let rom = bootable_rom(&[0x18, 0xFE]);
    let cartridge_byte_0 = rom[0];

    let mut emulator = Emulator::new(rom).expect("bootable ROM should load");

    // While the boot ROM is mapped, low reads come from it
    assert_eq!(BOOT_ROM[0], emulator.address_space().read_byte(0x0000));

    step_until_entry_point(&mut emulator);
    emulator.step().expect("entry point instruction should run");

    // After handoff the same addresses read from the cartridge
    assert_eq!(cartridge_byte_0, emulator.address_space().read_byte(0x0000));
    assert_ne!(BOOT_ROM[0], cartridge_byte_0);
}

#[test]
fn faulting_opcode_halts_until_reset() {
    // An illegal opcode at the entry point faults the interpreter after handoff
    let rom = bootable_rom(&[0xD3]);
    let mut emulator = Emulator::new(rom).expect("bootable ROM should load");

    step_until_entry_point(&mut emulator);

    assert_eq!(
        Err(StepError::UnimplementedOpcode {
            opcode: 0xD3,
            address: 0x0100
        }),
        emulator.step(),
    );

    // The fault is latched until an explicit reset
    assert_eq!(
        Err(StepError::Faulted {
            opcode: 0xD3,
            address: 0x0100
        }),
        emulator.step(),
    );

    emulator.reset();

    // Back at power-on: boot ROM mapped, stepping works again
    assert_eq!(BOOT_ROM[0], emulator.address_space().read_byte(0x0000));
    assert_eq!(0x0000, emulator.cpu_registers().pc);
    emulator.step().expect("reset should clear the fault");
}

#[test]
fn one_frame_per_17556_machine_cycles() {
    // A ROM that fails the logo check parks the boot sequence in a tight loop, which is fine for
    // timing purposes: the display advances on every step regardless
    let mut rom = vec![0x00; 0x8000];
    rom[MAPPER_ADDRESS] = 0x00;
    let mut emulator = Emulator::new(rom).expect("ROM should load");

    // Warm up until the boot sequence has parked itself in its lock loop, then synchronize to a
    // frame boundary. In the lock loop every instruction costs the same, so the frame event lands
    // at the same in-instruction offset every time.
    for _ in 0..400 {
        emulator.run_frame().expect("stepping should not fault");
    }

    for _ in 0..3 {
        let mut cycles = 0_u64;
        loop {
            let output = emulator.step().expect("stepping should not fault");
            cycles += u64::from(output.cycles);
            if output.frame_completed {
                break;
            }
        }

        // 154 line periods of 114 machine cycles each
        assert_eq!(17556, cycles);
    }
}

#[test]
fn switched_rom_bank_reads_through_to_cartridge_offset() {
    // 512KB ROM with the bank-switched cartridge type; tag the first byte of every bank
    let mut rom = vec![0x00; 1 << 19];
    rom[MAPPER_ADDRESS] = 0x01;
    for bank in 0..32 {
        rom[bank * 0x4000] = bank as u8;
    }

    let mut address_space =
        AddressSpace::new(Cartridge::new(rom).expect("banked ROM should load"));

    for bank in 1..32_u8 {
        address_space.write_byte(0x2000, bank);
        assert_eq!(bank, address_space.read_byte(0x4000), "bank {bank}");
    }

    // Bank register 0 selects bank 1
    address_space.write_byte(0x2000, 0x00);
    assert_eq!(0x01, address_space.read_byte(0x4000));
}

#[test]
fn run_frame_returns_full_sized_buffer() {
    let rom = vec![0x00; 0x8000];
    let mut emulator = Emulator::new(rom).expect("ROM should load");

    let frame = emulator.run_frame().expect("stepping should not fault");
    assert_eq!(
        dotmatrix_core::SCREEN_WIDTH * dotmatrix_core::SCREEN_HEIGHT * 4,
        frame.len()
    );
}
