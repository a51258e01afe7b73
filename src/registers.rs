use crate::error::OperandError;

/// Canonical register names, indexed by register number.
pub const NAMES: [&str; 32] = [
    "$ZERO", "$AT", "$V0", "$V1", "$A0", "$A1", "$A2", "$A3", // 0..7
    "$T0", "$T1", "$T2", "$T3", "$T4", "$T5", "$T6", "$T7", // 8..15
    "$S0", "$S1", "$S2", "$S3", "$S4", "$S5", "$S6", "$S7", // 16..23
    "$T8", "$T9", "$K0", "$K1", "$GP", "$SP", "$FP", "$RA", // 24..31
];

/// Extra spellings accepted on input.
const SYNONYMS: &[(&str, u8)] = &[("$0", 0)];

pub fn resolve(alias: &str) -> Result<u8, OperandError> {
    let wanted = alias.trim().to_ascii_uppercase();
    NAMES
        .iter()
        .position(|n| *n == wanted)
        .map(|idx| idx as u8)
        .or_else(|| SYNONYMS.iter().find(|(n, _)| *n == wanted).map(|(_, idx)| *idx))
        .ok_or_else(|| OperandError::UnknownRegister(alias.to_string()))
}

pub fn name_of(index: u8) -> &'static str {
    NAMES[(index & 0x1F) as usize]
}
