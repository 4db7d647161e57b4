use crate::{decode_instruction, DecodeError, Immediate};
use tb_opcodes::{BuildOptions, Completeness, InstructionTable, TableBuilder};

fn table() -> InstructionTable {
    let sheet = data_sheet::get_data_sheet().unwrap();
    InstructionTable::build(&sheet, BuildOptions::default()).unwrap()
}

fn decode(table: &InstructionTable, bytes: &[u8]) -> Result<String, DecodeError> {
    let mut it = bytes.iter().copied();
    decode_instruction(&mut it, table).map(|instruction| instruction.to_string())
}

#[test]
fn no_operands() {
    let table = table();
    let mut it = [0x00_u8].into_iter();
    let instruction = decode_instruction(&mut it, &table).unwrap();
    assert_eq!(instruction.opcode.mnemonic, "NOP");
    assert_eq!(instruction.data, None);
    assert_eq!(instruction.to_string(), "NOP");
    assert_eq!(it.next(), None);
}

#[test]
fn immediate_operands() {
    let table = table();
    assert_eq!(decode(&table, &[0x3E, 0x12]).unwrap(), "LD A, $12");
    assert_eq!(decode(&table, &[0x01, 0x34, 0x12]).unwrap(), "LD BC, $1234");
    assert_eq!(decode(&table, &[0xFA, 0x00, 0xC0]).unwrap(), "LD A, [$C000]");
    assert_eq!(decode(&table, &[0xE0, 0x40]).unwrap(), "LDH [$FF40], A");
}

#[test]
fn control_flow() {
    let table = table();
    assert_eq!(decode(&table, &[0xC3, 0x50, 0x01]).unwrap(), "JP $0150");
    assert_eq!(decode(&table, &[0xDA, 0x34, 0x12]).unwrap(), "JP C, $1234");
    assert_eq!(decode(&table, &[0xCA, 0x34, 0x12]).unwrap(), "JP Z, $1234");
    assert_eq!(decode(&table, &[0x18, 0xFE]).unwrap(), "JR -2");
    assert_eq!(decode(&table, &[0x38, 0x05]).unwrap(), "JR C, +5");
    assert_eq!(decode(&table, &[0xCF]).unwrap(), "RST $08");
    assert_eq!(decode(&table, &[0xD8]).unwrap(), "RET C");
}

#[test]
fn prefixed() {
    let table = table();
    let mut it = [0xCB_u8, 0x46].into_iter();
    let instruction = decode_instruction(&mut it, &table).unwrap();
    assert!(instruction.opcode.prefixed);
    assert_eq!(instruction.to_string(), "BIT 0, [HL]");
    assert_eq!(instruction.byte_len(), 2);
    assert_eq!(instruction.to_bytes(), vec![0xCB, 0x46]);

    assert_eq!(decode(&table, &[0xCB, 0x11]).unwrap(), "RL C");
}

#[test]
fn reads_operands_little_endian() {
    let table = table();
    let mut it = [0x21_u8, 0xCD, 0xAB].into_iter();
    let instruction = decode_instruction(&mut it, &table).unwrap();
    assert_eq!(instruction.data, Some(Immediate::Word(0xABCD)));
    assert_eq!(instruction.to_bytes(), vec![0x21, 0xCD, 0xAB]);
}

#[test]
fn stream_of_instructions() {
    let table = table();
    let bytes = [0x00, 0x3E, 0x01, 0xCB, 0x37, 0xC9];
    let mut it = bytes.iter().copied();

    let mut decoded = vec![];
    loop {
        match decode_instruction(&mut it, &table) {
            Ok(instruction) => decoded.push(instruction.to_string()),
            Err(DecodeError::EndOfInput) => break,
            Err(err) => panic!("{}", err),
        }
    }

    assert_eq!(decoded, vec!["NOP", "LD A, $01", "SWAP A", "RET"]);
}

#[test]
fn truncated_input() {
    let table = table();
    assert_eq!(decode(&table, &[]), Err(DecodeError::EndOfInput));
    assert_eq!(decode(&table, &[0xCB]), Err(DecodeError::CouldNotReadExtraBytes));
    assert_eq!(
        decode(&table, &[0xC3, 0x50]),
        Err(DecodeError::CouldNotReadExtraBytes)
    );
    assert_eq!(decode(&table, &[0x3E]), Err(DecodeError::CouldNotReadExtraBytes));
}

#[test]
fn opcodes_missing_from_the_table() {
    let sheet = data_sheet::from_json(
        r#"{
            "unprefixed": {
                "0x00": { "mnemonic": "NOP", "bytes": 1, "cycles": [4], "immediate": true, "operands": [] }
            }
        }"#,
    )
    .unwrap();
    let table = TableBuilder::new(BuildOptions {
        completeness: Completeness::Warn,
        ..Default::default()
    })
    .build(&sheet)
    .unwrap();

    assert_eq!(decode(&table, &[0x00]).unwrap(), "NOP");
    assert_eq!(
        decode(&table, &[0x01]),
        Err(DecodeError::InvalidOpCode {
            code: 0x01,
            prefixed: false
        })
    );
    assert_eq!(
        decode(&table, &[0xCB, 0x00]),
        Err(DecodeError::InvalidOpCode {
            code: 0x00,
            prefixed: true
        })
    );
    assert_eq!(
        DecodeError::InvalidOpCode {
            code: 0x00,
            prefixed: true
        }
        .to_string(),
        "Invalid op code (CB 0x00)"
    );
}
