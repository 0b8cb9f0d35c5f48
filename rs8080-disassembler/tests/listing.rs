use hex_literal::hex;
use indoc::indoc;
use pretty_assertions::assert_eq;
use rs8080_disassembler::*;
use std::io::Write;

fn table() -> OpcodeTable {
    OpcodeTable::load(concat!(env!("CARGO_MANIFEST_DIR"), "/instructions.json")).unwrap()
}

fn listing(bytes: &[u8]) -> String {
    let mut sink = WriteSink::new(Vec::new());
    Decoder::new(bytes.to_vec()).run(&table(), &mut sink).unwrap();
    String::from_utf8(sink.into_inner()).unwrap()
}

#[test]
fn nop() {
    assert_eq!("0000 nop\n", listing(&hex!("00")));
}

#[test]
fn mvi_immediate() {
    assert_eq!("0000 mvi    a,#05\n", listing(&hex!("3E 05")));
}

#[test]
fn lxi_immediate_word() {
    assert_eq!("0000 lxi    h,#1234\n", listing(&hex!("21 34 12")));
}

#[test]
fn in_port() {
    assert_eq!("0000 in$01\n", listing(&hex!("DB 01")));
}

#[test]
fn invaders_reset_vector() {
    // first bytes of invaders.h
    let rom = hex!("00 00 00 C3 D4 18 00 00 F5 C5 D5 E5 C3 8C 00 00");
    let expected = indoc! {"
        0000 nop
        0001 nop
        0002 nop
        0003 jmp$18d4
        0006 nop
        0007 nop
        0008 push   psw
        0009 push   b
        000a push   d
        000b push   h
        000c jmp$008c
        000f nop
    "};
    assert_eq!(expected, listing(&rom));
}

#[test]
fn ports_and_addresses() {
    let rom = hex!("D3 03 DB 02 32 00 20 3A 01 20 FE 10 CD E6 01");
    let expected = indoc! {"
        0000 out$03
        0002 in$02
        0004 sta$2000
        0007 lda$2001
        000a cpi#10
        000c call$01e6
    "};
    assert_eq!(expected, listing(&rom));
}

#[test]
fn every_single_byte_opcode() {
    let table = table();
    for (opcode, instr) in table.iter().filter(|(_, i)| i.length() == 1) {
        let lines = disassemble(&[opcode], &table).unwrap();
        assert_eq!(vec![format!("0000 {}", instr.mnemonic())], lines);
    }
}

#[test]
fn two_byte_operands_at_any_position() {
    let table = table();
    for (opcode, instr) in table.iter().filter(|(_, i)| i.length() == 2) {
        let sigil = if instr.mnemonic().contains("in") || instr.mnemonic().contains("out") {
            '$'
        } else {
            '#'
        };
        for operand in 0..=u8::MAX {
            let lines = disassemble(&[opcode, operand], &table).unwrap();
            assert_eq!(
                format!("0000 {}{}{:02x}", instr.mnemonic(), sigil, operand),
                lines[0]
            );
            let lines = disassemble(&[0x00, 0x00, 0x00, opcode, operand], &table).unwrap();
            assert_eq!(
                format!("0003 {}{}{:02x}", instr.mnemonic(), sigil, operand),
                lines[3]
            );
        }
    }
}

#[test]
fn three_byte_operands_are_little_endian() {
    let table = table();
    for (opcode, instr) in table.iter().filter(|(_, i)| i.length() == 3) {
        let sigil = if instr.mnemonic().contains("lxi") { '#' } else { '$' };
        let lines = disassemble(&[opcode, 0xcd, 0xab], &table).unwrap();
        assert_eq!(format!("0000 {}{}abcd", instr.mnemonic(), sigil), lines[0]);
    }
}

#[test]
fn truncated_tail_reports_position() {
    let table = table();
    let mut lines: Vec<String> = Vec::new();
    let mut decoder = Decoder::new(hex!("00 00 21 34").to_vec());
    let err = decoder.run(&table, &mut lines).unwrap_err();
    assert_eq!(vec!["0000 nop", "0001 nop"], lines);
    assert_eq!(
        "truncated instruction at 0002: opcode 21 needs 3 bytes, 2 left",
        err.to_string()
    );
}

#[test]
fn empty_input_lists_nothing() {
    assert_eq!("", listing(&[]));
}

#[test]
fn tee_keeps_record_identical() {
    let table = table();
    let rom = hex!("31 00 24 06 00 CD E6 01");
    let mut primary: Vec<String> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    Decoder::new(rom.to_vec())
        .run(&table, &mut Tee::new(&mut primary, &mut record))
        .unwrap();
    assert_eq!(3, primary.len());
    assert_eq!(primary, record);
    assert_eq!("0000 lxi    sp,#2400", primary[0]);
}

#[test]
fn table_and_input_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("test.rom");
    std::fs::File::create(&rom_path)
        .unwrap()
        .write_all(&hex!("3E FF D3 06"))
        .unwrap();

    let rom = read_input(&rom_path).unwrap();
    assert_eq!(
        vec!["0000 mvi    a,#ff", "0002 out$06"],
        disassemble(&rom, &table()).unwrap()
    );
}

#[test]
fn short_table_on_disk_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("instructions.json");
    std::fs::write(&path, r#"[["nop", 1], ["lxi    b,", 3]]"#).unwrap();
    let err = OpcodeTable::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::RecordCount(2)));
}
