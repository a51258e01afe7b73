//! Field packing for the three MIPS word layouts.
//!
//! ```text
//! R: opcode(6) rs(5) rt(5) rd(5) shamt(5) funct(6)
//! I: opcode(6) rs(5) rt(5) immediate(16)
//! J: opcode(6) address(26)
//! ```

use std::fmt;

use bitvec::prelude::*;

use crate::instructions::{Format, InstrSpec};
use crate::operands::Operands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Opcode,
    Rs,
    Rt,
    Rd,
    Shamt,
    Funct,
    Immediate,
    Address,
}

impl Field {
    pub const fn width(self) -> usize {
        match self {
            Field::Opcode | Field::Funct => 6,
            Field::Rs | Field::Rt | Field::Rd | Field::Shamt => 5,
            Field::Immediate => 16,
            Field::Address => 26,
        }
    }

    pub const fn mask(self) -> u32 {
        (1u32 << self.width()) - 1
    }
}

pub const R_LAYOUT: &[Field] = &[
    Field::Opcode,
    Field::Rs,
    Field::Rt,
    Field::Rd,
    Field::Shamt,
    Field::Funct,
];
pub const I_LAYOUT: &[Field] = &[Field::Opcode, Field::Rs, Field::Rt, Field::Immediate];
pub const J_LAYOUT: &[Field] = &[Field::Opcode, Field::Address];

pub fn layout(format: Format) -> &'static [Field] {
    match format {
        Format::R => R_LAYOUT,
        Format::I => I_LAYOUT,
        Format::J => J_LAYOUT,
    }
}

pub(crate) type WordBits = BitArray<[u32; 1], Msb0>;

/// Pack fields MSB first. Values wider than their field are truncated.
pub fn pack(layout: &[Field], value: impl Fn(Field) -> u32) -> u32 {
    let mut bits = WordBits::ZERO;
    let mut pos = 0;
    for &field in layout {
        let w = field.width();
        bits[pos..pos + w].store_be::<u32>(value(field) & field.mask());
        pos += w;
    }
    debug_assert_eq!(pos, 32);
    bits.into_inner()[0]
}

/// Split a word into its fields, in layout order.
pub fn unpack(layout: &[Field], raw: u32) -> Vec<(Field, u32)> {
    let bits = WordBits::new([raw]);
    let mut pos = 0;
    layout
        .iter()
        .map(|&field| {
            let w = field.width();
            let v = bits[pos..pos + w].load_be::<u32>();
            pos += w;
            (field, v)
        })
        .collect()
}

/// One encoded instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineWord(pub u32);

impl fmt::Display for MachineWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<MachineWord> for u32 {
    fn from(w: MachineWord) -> u32 {
        w.0
    }
}

fn reg(r: Option<u8>) -> u32 {
    r.map_or(0, u32::from)
}

/// Encode resolved operands. Signed values are stored as two's complement and
/// silently wrapped to their field width.
pub fn encode(spec: &InstrSpec, ops: &Operands) -> MachineWord {
    let raw = match spec.format {
        Format::R => pack(R_LAYOUT, |f| match f {
            Field::Opcode => u32::from(spec.opcode),
            Field::Rs => reg(ops.src1),
            Field::Rt => reg(ops.src2),
            Field::Rd if spec.implicit_dest() => 0,
            Field::Rd => reg(ops.dest),
            Field::Funct => spec.funct.map_or(0, u32::from),
            _ => 0,
        }),
        // ADDI leaves rt zero: the destination register is not encoded.
        Format::I => pack(I_LAYOUT, |f| match f {
            Field::Opcode => u32::from(spec.opcode),
            Field::Rs => reg(ops.src1),
            Field::Rt if spec.mem_offset => reg(ops.dest),
            Field::Rt => reg(ops.src2),
            Field::Immediate => ops.immediate.or(ops.mem_offset).unwrap_or(0) as u32,
            _ => 0,
        }),
        Format::J => pack(J_LAYOUT, |f| match f {
            Field::Opcode => u32::from(spec.opcode),
            Field::Address => ops.target.as_ref().map_or(0, |t| t.address() as u32),
            _ => 0,
        }),
    };
    MachineWord(raw)
}
