use super::{hash_map, run_test, set_in_state, ExpectedState, ALL_REGISTERS};
use std::collections::HashMap;

#[test]
fn test_bit_sets_zero_from_complement() {
    // BIT sets half-carry, clears subtract, and leaves carry untouched
    run_test(
        // OR A; LD B, 0x80; BIT 7, B
        "B70680CB78",
        &ExpectedState {
            b: Some(0x80),
            f: Some(0x20),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // OR A; LD B, 0x7F; BIT 7, B
        "B7067FCB78",
        &ExpectedState {
            b: Some(0x7F),
            f: Some(0xA0),
            ..ExpectedState::empty()
        },
    );

    // Carry survives a BIT test
    run_test(
        // OR A; SCF; LD B, 0x01; BIT 0, B
        "B7370601CB40",
        &ExpectedState {
            b: Some(0x01),
            f: Some(0x30),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn test_bit_indirect_hl() {
    run_test(
        // OR A; LD HL, 0xC080; LD (HL), 0x10; BIT 4, (HL)
        "B72180C03610CB66",
        &ExpectedState {
            f: Some(0x20),
            memory: hash_map! { 0xC080: 0x10 },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // OR A; LD HL, 0xC080; LD (HL), 0x00; BIT 4, (HL)
        "B72180C03600CB66",
        &ExpectedState {
            f: Some(0xA0),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn set_bit_touches_no_flags() {
    run_test(
        // XOR A; SET 3, A
        "AFCBDF",
        &ExpectedState {
            a: Some(0x08),
            f: Some(0x80),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD D, 0x00; SET 7, D
        "1600CBFA",
        &ExpectedState {
            d: Some(0x80),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn reset_bit_touches_no_flags() {
    run_test(
        // LD D, 0xFF; RES 0, D
        "16FFCB82",
        &ExpectedState {
            d: Some(0xFE),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD D, 0xFF; RES 7, D
        "16FFCBBA",
        &ExpectedState {
            d: Some(0x7F),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn set_reset_bit_indirect_hl() {
    run_test(
        // LD HL, 0xC090; LD (HL), 0x00; SET 5, (HL)
        "2190C03600CBEE",
        &ExpectedState {
            memory: hash_map! { 0xC090: 0x20 },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD HL, 0xC090; LD (HL), 0xFF; RES 5, (HL)
        "2190C036FFCBAE",
        &ExpectedState {
            memory: hash_map! { 0xC090: 0xDF },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn every_bit_position_round_trips() {
    for bit in 0..8_u8 {
        // SET n, E
        let set_opcode = 0xC3 | (bit << 3);
        // BIT n, E
        let bit_opcode = 0x43 | (bit << 3);

        run_test(
            // OR A; LD E, 0x00; SET n, E; BIT n, E
            &format!("B71E00CB{set_opcode:02X}CB{bit_opcode:02X}"),
            &ExpectedState {
                e: Some(1 << bit),
                f: Some(0x20),
                ..ExpectedState::empty()
            },
        );
    }
}

#[test]
fn set_bit_all_registers() {
    for r in ALL_REGISTERS {
        let load_opcode = 0x06 | (r.to_opcode_bits() << 3);
        let set_opcode = 0xC0 | r.to_opcode_bits();

        let mut expected_state = ExpectedState::empty();
        set_in_state(&mut expected_state, r, 0x01);
        run_test(
            // LD <r>, 0x00; SET 0, <r>
            &format!("{load_opcode:02X}00CB{set_opcode:02X}"),
            &expected_state,
        );
    }
}
