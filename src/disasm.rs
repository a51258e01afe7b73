use crate::decoder::Decoded;
use crate::instructions::{Format, InstrSpec};
use crate::registers::name_of;

fn reg(i: u8) -> String {
    name_of(i).to_ascii_lowercase()
}

/// Render a decoded word in the same operand order the assembler accepts.
pub fn fmt_decoded(spec: &InstrSpec, d: &Decoded) -> String {
    let mn = spec.mnemonic.to_ascii_lowercase();
    match spec.format {
        Format::R => format!("{} {}, {}, {}", mn, reg(d.rd), reg(d.rs), reg(d.rt)),
        Format::I if spec.mem_offset => format!("{} {}, {}({})", mn, reg(d.rt), d.simm(), reg(d.rs)),
        Format::I => format!("{} {}, {}, {}", mn, reg(d.rt), reg(d.rs), d.simm()),
        Format::J => format!("{} {}", mn, d.addr),
    }
}
