use crate::{
    classify_operand, BuildOptions, Condition, CycleConvention, Cycles, FlagEffect,
    InstructionTable, LiteralKind, OpcodeSpace, OperandKind, Register, Step,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn build(options: BuildOptions) -> InstructionTable {
    init_tracing();
    let sheet = data_sheet::get_data_sheet().unwrap();
    InstructionTable::build(&sheet, options).unwrap()
}

fn table() -> InstructionTable {
    build(BuildOptions::default())
}

#[test]
fn both_spaces_are_complete() {
    let table = table();

    for space in [OpcodeSpace::Unprefixed, OpcodeSpace::Prefixed] {
        let map = table.space(space);
        assert_eq!(map.len(), 256, "{}", space);
        assert!(map.is_complete());

        for code in 0..=u8::MAX {
            let record = map.get(code).unwrap();
            assert_eq!(record.code, code);
            assert_eq!(record.prefixed, space.is_prefixed());
        }
    }

    assert_eq!(table.iter().count(), 512);
}

#[test]
fn carry_condition_is_corrected() {
    let table = table();

    for code in [0x38, 0xD8, 0xDA, 0xDC] {
        let record = table.get(code, false).unwrap();
        assert_eq!(
            record.operands[0].kind,
            OperandKind::Condition(Condition::Carry),
            "{:#04X}",
            code
        );
    }
}

#[test]
fn conditional_jump() {
    let record = table().get(0xCA, false).unwrap().clone();
    assert_eq!(record.mnemonic, "JP");
    assert_eq!(record.byte_length, 3);
    assert_eq!(record.operand_bytes(), 2);
    assert_eq!(
        record.operands[0].kind,
        OperandKind::Condition(Condition::Zero)
    );
    assert_eq!(
        record.operands[1].kind,
        OperandKind::Literal(LiteralKind::Address16)
    );
    assert_eq!(record.cycles, Cycles::new(16, 4));
    assert!(record.flags.is_unaffected());

    let verbatim = build(BuildOptions {
        cycles: CycleConvention::Verbatim,
        ..Default::default()
    });
    assert_eq!(
        verbatim.get(0xCA, false).unwrap().cycles,
        Cycles::new(16, 12)
    );
}

#[test]
fn carry_register_is_kept() {
    let table = table();

    let ldh = table.get(0xE2, false).unwrap();
    assert_eq!(ldh.operands[0].kind, OperandKind::Register(Register::C));
    assert!(!ldh.operands[0].immediate);
    assert_eq!(ldh.to_string(), "LDH [C], A");

    let rl = table.get(0x11, true).unwrap();
    assert_eq!(rl.operands[0].kind, OperandKind::Register(Register::C));
    assert_eq!(rl.to_string(), "RL C");
}

#[test]
fn restart_vector() {
    let rst = table().get(0xCF, false).unwrap().clone();
    assert_eq!(rst.operands[0].kind, OperandKind::Interrupt(0x08));
    assert_eq!(rst.to_string(), "RST $08");
}

#[test]
fn register_steps() {
    let table = table();

    let ld = table.get(0x22, false).unwrap();
    assert_eq!(ld.operands[0].step, Some(Step::Increment));
    assert_eq!(ld.to_string(), "LD [HL+], A");

    let ld = table.get(0x3A, false).unwrap();
    assert_eq!(ld.operands[1].step, Some(Step::Decrement));
}

#[test]
fn flag_effects() {
    let table = table();

    let pop = table.get(0xF1, false).unwrap();
    assert_eq!(pop.flags.to_string(), "ZNHC");

    let bit = table.get(0x46, true).unwrap();
    assert_eq!(bit.flags.z, FlagEffect::Affected);
    assert_eq!(bit.flags.n, FlagEffect::Reset);
    assert_eq!(bit.flags.h, FlagEffect::Set);
    assert_eq!(bit.flags.c, FlagEffect::Unaffected);
}

#[test]
fn bit_instruction() {
    let bit = table().get(0x46, true).unwrap().clone();
    assert_eq!(bit.operands[0].kind, OperandKind::Bit(0));
    assert_eq!(bit.operands[1].kind, OperandKind::Register(Register::HL));
    assert!(!bit.operands[1].immediate);
    assert_eq!(bit.byte_length, 2);
    assert_eq!(bit.operand_bytes(), 0);
    assert_eq!(bit.cycles, Cycles::new(12, 0));
    assert_eq!(bit.to_string(), "BIT 0, [HL]");
}

#[test]
fn descriptors_classify_back_to_the_same_operands() {
    for record in table().iter() {
        for (operand, descriptor) in record.operands.iter().zip(record.operand_descriptors()) {
            assert_eq!(classify_operand(&descriptor).as_ref(), Ok(operand));
        }
    }
}

#[test]
fn builds_are_deterministic() {
    assert_eq!(table(), table());
}
