use crate::encoder::{layout, unpack, Field};
use crate::instructions::{self, Format, InstrSpec};

/// Raw fields of a machine word. Fields outside the word's layout are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u8,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    pub funct: u8,
    pub imm: u16,
    pub addr: u32,
}

impl Decoded {
    pub fn from_fields(format: Format, raw: u32) -> Self {
        let mut d = Decoded::default();
        for (field, v) in unpack(layout(format), raw) {
            match field {
                Field::Opcode => d.opcode = v as u8,
                Field::Rs => d.rs = v as u8,
                Field::Rt => d.rt = v as u8,
                Field::Rd => d.rd = v as u8,
                Field::Shamt => d.shamt = v as u8,
                Field::Funct => d.funct = v as u8,
                Field::Immediate => d.imm = v as u16,
                Field::Address => d.addr = v,
            }
        }
        d
    }

    /// The immediate field read as a signed 16-bit value.
    pub fn simm(&self) -> i16 {
        self.imm as i16
    }
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Option<(&'static InstrSpec, Decoded)>;
}

/// Decodes words produced from the supported instruction table.
pub struct MipsDecoder;

impl MipsDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MipsDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for MipsDecoder {
    fn decode(&self, raw32: u32) -> Option<(&'static InstrSpec, Decoded)> {
        let opcode = (raw32 >> 26) as u8;
        let funct = (raw32 & 0x3F) as u8;
        let spec = [Format::R, Format::I, Format::J]
            .into_iter()
            .find_map(|f| instructions::find_by_encoding(f, opcode, funct))?;
        Some((spec, Decoded::from_fields(spec.format, raw32)))
    }
}
