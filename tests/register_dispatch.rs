use ay_psg::{Bank, ChipModel, Psg, PsgConfig, Register};

fn chip(model: ChipModel) -> Psg {
    Psg::new(&PsgConfig::default().with_model(model)).unwrap()
}

fn expanded_ay8930() -> Psg {
    let mut chip = chip(ChipModel::Ay8930);
    chip.write(Register::ModeShape.addr(), 0xA0);
    chip
}

#[test]
fn compat_registers_are_masked() {
    let mut chip = chip(ChipModel::Ay8910);
    let expected: [(u8, u8); 16] = [
        (0, 0xFF),
        (1, 0x0F),
        (2, 0xFF),
        (3, 0x0F),
        (4, 0xFF),
        (5, 0x0F),
        (6, 0x1F),
        (7, 0xFF),
        (8, 0x1F),
        (9, 0x1F),
        (10, 0x1F),
        (11, 0xFF),
        (12, 0xFF),
        (13, 0x0F),
        (14, 0xFF),
        (15, 0xFF),
    ];
    for (addr, mask) in expected {
        chip.write(addr, 0xFF);
        assert_eq!(chip.read_register(addr), mask, "R{addr}");
    }
}

#[test]
fn out_of_range_addresses_are_ignored() {
    let mut chip = chip(ChipModel::Ym2149);
    for addr in [0x10, 0x16, 0x1A, 0x1D, 0x20, 0x80, 0xFF] {
        chip.write(addr, 0x5A);
    }
    assert_eq!(chip.dump_registers(), [0; 32]);
}

#[test]
fn ay8914_remaps_every_register() {
    let mut chip = chip(ChipModel::Ay8914);
    let remap = [0u8, 2, 4, 11, 1, 3, 5, 12, 7, 6, 13, 8, 9, 10, 14, 15];
    for (legacy, &canonical) in remap.iter().enumerate() {
        chip.write(legacy as u8, 0x01);
        assert_eq!(chip.dump_registers()[canonical as usize], 0x01, "8914 R{legacy}");
        assert_eq!(chip.read_register(legacy as u8), 0x01);
    }
}

#[test]
fn only_ay8930_enters_expanded_mode() {
    for model in ChipModel::ALL {
        let mut chip = chip(model);
        chip.write(0x0D, 0xA0);
        assert_eq!(chip.is_expanded(), model == ChipModel::Ay8930, "{model}");
    }
}

#[test]
fn mode_bits_select_bank() {
    let mut chip = chip(ChipModel::Ay8930);
    for (value, expanded, bank) in [
        (0x00, false, Bank::A),
        (0xA0, true, Bank::A),
        (0xB0, true, Bank::B),
        (0xBF, true, Bank::B),
        (0xC0, false, Bank::A),
        (0x10, false, Bank::A),
    ] {
        chip.write(0x0D, value);
        assert_eq!(chip.is_expanded(), expanded, "{value:#04x}");
        assert_eq!(chip.bank(), bank, "{value:#04x}");
    }
}

#[test]
fn bank_b_write_survives_bank_a_write_to_same_address() {
    let mut chip = expanded_ay8930();
    chip.write(0x0D, 0xB0);
    chip.write(0x00, 0x11); // envelope B period low
    chip.write(0x0D, 0xA0);
    chip.write(0x00, 0x22); // tone A period low

    assert_eq!(chip.read_register(0x10), 0x11);
    assert_eq!(chip.read_register(0x00), 0x22);
}

#[test]
fn bank_b_registers_are_directly_addressable() {
    let mut chip = expanded_ay8930();
    chip.write(Register::NoiseAndMask.addr(), 0xF0);
    chip.write(Register::NoiseOrMask.addr(), 0x0F);
    chip.write(Register::ChBDuty.addr(), 0xFF);
    let dump = chip.dump_registers();
    assert_eq!(dump[0x19], 0xF0);
    assert_eq!(dump[0x1A], 0x0F);
    assert_eq!(dump[0x17], 0x0F);
}

#[test]
fn mode_transition_resets_registers() {
    let mut chip = chip(ChipModel::Ay8930);
    chip.write(0x00, 0x42);
    chip.write(0x08, 0x0F);

    chip.write(0x0D, 0xA0);
    assert_eq!(chip.read_register(0x00), 0);
    assert_eq!(chip.read_register(0x08), 0);

    chip.write(0x00, 0x42);
    chip.write(0x16, 0x03);
    // Bank switch inside expanded mode keeps everything
    chip.write(0x0D, 0xB0);
    chip.write(0x0D, 0xA0);
    assert_eq!(chip.read_register(0x00), 0x42);
    assert_eq!(chip.read_register(0x16), 0x03);

    // Leaving expanded mode clears both banks
    chip.write(0x0D, 0x00);
    assert!(chip.dump_registers().iter().all(|&r| r == 0));
}

#[test]
fn mode_register_keeps_envelope_shape() {
    let mut chip = chip(ChipModel::Ay8930);
    chip.write(0x0D, 0xAE);
    assert_eq!(chip.read_register(0x0D), 0xAE);
    chip.write(0x0D, 0xBE);
    // Reachable through the bank B alias as well
    assert_eq!(chip.read_register(0x0D), 0xBE);
    assert_eq!(chip.read_register(0x1D), 0xBE);
}

#[test]
fn reset_returns_to_compat_and_zeroes_registers() {
    let mut chip = expanded_ay8930();
    chip.write(0x00, 0x42);
    chip.set_pan(0, 0.0, false);
    chip.reset();
    assert!(!chip.is_expanded());
    assert_eq!(chip.dump_registers(), [0; 32]);
}
