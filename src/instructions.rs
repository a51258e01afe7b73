use crate::error::OperandError;

/// Bit layout class of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    R,
    I,
    J,
}

/// Operand grammar used to tokenize the text after the mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `$rd, $rs, $rt`
    Registers,
    /// `$rt, offset($rs)`
    Offset,
    /// `$rt, $rs, imm`
    Immediate,
    /// `target`
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrSpec {
    pub mnemonic: &'static str,
    pub format: Format,
    pub opcode: u8,
    pub funct: Option<u8>,
    pub arity: usize,
    pub mem_offset: bool,
}

impl InstrSpec {
    pub fn grammar(&self) -> Grammar {
        match (self.format, self.mem_offset) {
            (Format::R, _) => Grammar::Registers,
            (Format::I, true) => Grammar::Offset,
            (Format::I, false) => Grammar::Immediate,
            (Format::J, _) => Grammar::Jump,
        }
    }

    /// DIV and MULT write HI/LO, so their rd field is always zero.
    pub fn implicit_dest(&self) -> bool {
        matches!(self.mnemonic, "DIV" | "MULT")
    }
}

const fn r(mnemonic: &'static str, opcode: u8, funct: Option<u8>) -> InstrSpec {
    InstrSpec {
        mnemonic,
        format: Format::R,
        opcode,
        funct,
        arity: 3,
        mem_offset: false,
    }
}

const fn i(mnemonic: &'static str, opcode: u8, mem_offset: bool) -> InstrSpec {
    InstrSpec {
        mnemonic,
        format: Format::I,
        opcode,
        funct: None,
        arity: 3,
        mem_offset,
    }
}

pub const TABLE: &[InstrSpec] = &[
    r("AND", 0x00, Some(0x24)),
    r("OR", 0x00, Some(0x25)),
    r("NOR", 0x00, Some(0x27)),
    r("ADD", 0x00, Some(0x20)),
    r("SUB", 0x00, Some(0x22)),
    r("SLT", 0x00, Some(0x2A)),
    r("DIV", 0x00, Some(0x1A)),
    r("MULT", 0x00, Some(0x18)),
    r("MFHI", 0x00, Some(0x10)),
    r("MFLO", 0x00, Some(0x12)),
    // Branch offsets are not computed; BEQ takes three register operands.
    r("BEQ", 0x04, None),
    i("ADDI", 0x08, false),
    i("LW", 0x23, true),
    i("SW", 0x2B, true),
    InstrSpec {
        mnemonic: "J",
        format: Format::J,
        opcode: 0x02,
        funct: None,
        arity: 1,
        mem_offset: false,
    },
];

pub fn entries() -> &'static [InstrSpec] {
    TABLE
}

pub fn lookup(mnemonic: &str) -> Result<&'static InstrSpec, OperandError> {
    let wanted = mnemonic.to_ascii_uppercase();
    TABLE
        .iter()
        .find(|d| d.mnemonic == wanted)
        .ok_or(OperandError::Unsupported(wanted))
}

/// Reverse lookup from raw fields. `funct` is ignored for entries without one.
pub fn find_by_encoding(format: Format, opcode: u8, funct: u8) -> Option<&'static InstrSpec> {
    TABLE.iter().find(|d| {
        d.format == format && d.opcode == opcode && d.funct.map_or(true, |f| f == funct)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_is_case_insensitive() {
        let a = lookup("add").unwrap();
        let b = lookup("ADD").unwrap();
        let c = lookup("Add").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.funct, Some(0x20));
    }

    #[test]
    fn unknown_mnemonic_is_unsupported() {
        assert_eq!(lookup("foo"), Err(OperandError::Unsupported("FOO".into())));
        assert!(lookup("").is_err());
    }

    #[test]
    fn mnemonics_and_encodings_are_unique() {
        let mut names = HashSet::new();
        let mut encodings = HashSet::new();
        for d in entries() {
            assert!(names.insert(d.mnemonic), "duplicate {}", d.mnemonic);
            assert!(encodings.insert((d.format, d.opcode, d.funct)), "duplicate encoding for {}", d.mnemonic);
            assert!(d.opcode < 0x40);
            assert!(d.funct.map_or(true, |f| f < 0x40));
        }
        assert_eq!(TABLE.len(), 15);
    }

    #[test]
    fn every_mnemonic_has_its_documented_encoding() {
        use Format::*;
        let expected = [
            ("and", R, 0x00, Some(0x24), 3, false),
            ("or", R, 0x00, Some(0x25), 3, false),
            ("nor", R, 0x00, Some(0x27), 3, false),
            ("add", R, 0x00, Some(0x20), 3, false),
            ("sub", R, 0x00, Some(0x22), 3, false),
            ("slt", R, 0x00, Some(0x2A), 3, false),
            ("div", R, 0x00, Some(0x1A), 3, false),
            ("mult", R, 0x00, Some(0x18), 3, false),
            ("mfhi", R, 0x00, Some(0x10), 3, false),
            ("mflo", R, 0x00, Some(0x12), 3, false),
            ("beq", R, 0x04, None, 3, false),
            ("addi", I, 0x08, None, 3, false),
            ("lw", I, 0x23, None, 3, true),
            ("sw", I, 0x2B, None, 3, true),
            ("j", J, 0x02, None, 1, false),
        ];
        assert_eq!(expected.len(), entries().len());
        for (mn, format, opcode, funct, arity, mem_offset) in expected {
            let d = lookup(mn).unwrap();
            assert_eq!(d.mnemonic, mn.to_ascii_uppercase());
            assert_eq!(
                (d.format, d.opcode, d.funct, d.arity, d.mem_offset),
                (format, opcode, funct, arity, mem_offset),
                "{mn}"
            );
            assert_eq!(entries().iter().filter(|e| e.mnemonic == d.mnemonic).count(), 1);
        }
    }

    #[test]
    fn grammar_follows_format() {
        assert_eq!(lookup("beq").unwrap().grammar(), Grammar::Registers);
        assert_eq!(lookup("lw").unwrap().grammar(), Grammar::Offset);
        assert_eq!(lookup("sw").unwrap().grammar(), Grammar::Offset);
        assert_eq!(lookup("addi").unwrap().grammar(), Grammar::Immediate);
        assert_eq!(lookup("j").unwrap().grammar(), Grammar::Jump);
        assert_eq!(lookup("j").unwrap().arity, 1);
    }

    #[test]
    fn reverse_lookup_uses_funct_for_r_type() {
        assert_eq!(find_by_encoding(Format::R, 0, 0x2A).unwrap().mnemonic, "SLT");
        assert_eq!(find_by_encoding(Format::R, 4, 0x00).unwrap().mnemonic, "BEQ");
        assert!(find_by_encoding(Format::R, 0, 0x3F).is_none());
        assert_eq!(find_by_encoding(Format::I, 0x2B, 0).unwrap().mnemonic, "SW");
    }
}
