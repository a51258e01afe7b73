//! Operand tokenizers, one per grammar, and register/immediate resolution.
//!
//! The tokenizers scan left to right and skip any character that does not
//! start a token, so separators (commas, spaces) are never significant.

use crate::error::OperandError;
use crate::instructions::{Grammar, InstrSpec};
use crate::registers;

/// Address substituted for a jump target that is not a decimal literal.
pub const SENTINEL_TARGET: i64 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `$name`
    Register(&'a str),
    /// Unsigned decimal digits.
    Number(&'a str),
    /// `($name)`, stored without the parentheses.
    Based(&'a str),
    /// Verbatim jump operand.
    Target(&'a str),
}

impl<'a> Token<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Token::Register(s) | Token::Number(s) | Token::Based(s) | Token::Target(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Address(i64),
    Label(String),
}

impl Target {
    pub fn address(&self) -> i64 {
        match self {
            Target::Address(a) => *a,
            Target::Label(_) => SENTINEL_TARGET,
        }
    }
}

/// Operand values after register and literal resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operands {
    pub dest: Option<u8>,
    pub src1: Option<u8>,
    pub src2: Option<u8>,
    pub immediate: Option<i64>,
    pub mem_offset: Option<i64>,
    pub target: Option<Target>,
}

fn register_len(s: &str) -> usize {
    let b = s.as_bytes();
    if b.first() != Some(&b'$') {
        return 0;
    }
    let n = b[1..].iter().take_while(|c| c.is_ascii_alphanumeric()).count();
    if n == 0 {
        0
    } else {
        n + 1
    }
}

fn number_len(s: &str) -> usize {
    s.bytes().take_while(|c| c.is_ascii_digit()).count()
}

fn based_len(s: &str) -> usize {
    let Some(inner) = s.strip_prefix('(') else {
        return 0;
    };
    let reg = register_len(inner);
    if reg > 0 && inner.as_bytes().get(reg) == Some(&b')') {
        reg + 2
    } else {
        0
    }
}

fn scan<'a>(text: &'a str, numbers: bool, based: bool) -> Vec<Token<'a>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let reg = register_len(rest);
        if reg > 0 {
            out.push(Token::Register(&rest[..reg]));
            pos += reg;
            continue;
        }
        if numbers {
            let n = number_len(rest);
            if n > 0 {
                out.push(Token::Number(&rest[..n]));
                pos += n;
                continue;
            }
        }
        if based {
            let n = based_len(rest);
            if n > 0 {
                out.push(Token::Based(&rest[1..n - 1]));
                pos += n;
                continue;
            }
        }
        pos += rest.chars().next().map_or(1, char::len_utf8);
    }
    out
}

/// `$rd, $rs, $rt`: every register alias in order; exactly three required.
pub fn tokenize_registers(text: &str) -> Result<Vec<Token<'_>>, OperandError> {
    let toks = scan(text, false, false);
    if toks.len() != 3 {
        return Err(OperandError::Count { expected: 3, found: toks.len() });
    }
    Ok(toks)
}

/// `$rt, offset($rs)`: target register, unsigned offset, parenthesized base.
pub fn tokenize_offset(text: &str) -> Result<Vec<Token<'_>>, OperandError> {
    let toks = scan(text, true, true);
    if toks.len() != 3 {
        return Err(OperandError::Format(format!(
            "expected `$rt, offset($rs)`, found {} operands",
            toks.len()
        )));
    }
    if !matches!(
        toks.as_slice(),
        [Token::Register(_), Token::Number(_), Token::Based(_)]
    ) {
        return Err(OperandError::Format("expected `$rt, offset($rs)`".into()));
    }
    Ok(toks)
}

/// `$rt, $rs, imm`: registers and unsigned decimals; exactly three required.
pub fn tokenize_immediate(text: &str) -> Result<Vec<Token<'_>>, OperandError> {
    let toks = scan(text, true, false);
    if toks.len() != 3 {
        return Err(OperandError::Format(format!(
            "expected `$rt, $rs, imm`, found {} operands",
            toks.len()
        )));
    }
    Ok(toks)
}

/// Jump operand: the whole remaining text, trimmed, as one token.
pub fn tokenize_jump(text: &str) -> Vec<Token<'_>> {
    vec![Token::Target(text.trim())]
}

pub fn tokenize<'a>(spec: &InstrSpec, text: &'a str) -> Result<Vec<Token<'a>>, OperandError> {
    match spec.grammar() {
        Grammar::Registers => tokenize_registers(text),
        Grammar::Offset => tokenize_offset(text),
        Grammar::Immediate => tokenize_immediate(text),
        Grammar::Jump => Ok(tokenize_jump(text)),
    }
}

fn reg(tok: &Token<'_>) -> Result<u8, OperandError> {
    match tok {
        Token::Register(s) | Token::Based(s) => registers::resolve(s),
        other => Err(OperandError::Format(format!("expected a register, found `{}`", other.text()))),
    }
}

/// Parse an optionally signed decimal literal, wrapping modulo 2^64.
/// Only the low bits reach the word, so no range check is done.
pub fn parse_decimal(s: &str) -> Option<i64> {
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let v = digits
        .bytes()
        .fold(0i64, |acc, c| acc.wrapping_mul(10).wrapping_add(i64::from(c - b'0')));
    Some(if neg { v.wrapping_neg() } else { v })
}

fn number(tok: &Token<'_>) -> Result<i64, OperandError> {
    parse_decimal(tok.text())
        .ok_or_else(|| OperandError::Format(format!("`{}` is not a decimal literal", tok.text())))
}

/// Resolve tokens positionally according to the instruction's grammar.
pub fn resolve(spec: &InstrSpec, toks: &[Token<'_>]) -> Result<Operands, OperandError> {
    if toks.len() != spec.arity {
        return Err(OperandError::Count { expected: spec.arity, found: toks.len() });
    }
    let mut ops = Operands::default();
    match spec.grammar() {
        Grammar::Offset => {
            ops.dest = Some(reg(&toks[0])?);
            ops.mem_offset = Some(number(&toks[1])?);
            ops.src1 = Some(reg(&toks[2])?);
        }
        Grammar::Registers | Grammar::Immediate => {
            ops.dest = Some(reg(&toks[0])?);
            ops.src1 = Some(reg(&toks[1])?);
            match toks[2] {
                Token::Register(_) => ops.src2 = Some(reg(&toks[2])?),
                _ => ops.immediate = Some(number(&toks[2])?),
            }
            if spec.grammar() == Grammar::Immediate && ops.immediate.is_none() {
                return Err(OperandError::Format(format!(
                    "expected an immediate, found register `{}`",
                    toks[2].text()
                )));
            }
        }
        Grammar::Jump => {
            let text = toks[0].text();
            ops.target = Some(match parse_decimal(text) {
                Some(addr) => Target::Address(addr),
                None => Target::Label(text.to_string()),
            });
        }
    }
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_skips_separators() {
        let toks = scan(" $t0 ,$t1,  $t2 ", false, false);
        assert_eq!(
            toks,
            vec![Token::Register("$t0"), Token::Register("$t1"), Token::Register("$t2")]
        );
    }

    #[test]
    fn lone_dollar_is_not_a_register() {
        assert!(scan("$ , $", false, false).is_empty());
    }

    #[test]
    fn unclosed_base_falls_back_to_register() {
        let toks = scan("$t0, 4($sp", true, true);
        assert_eq!(
            toks,
            vec![Token::Register("$t0"), Token::Number("4"), Token::Register("$sp")]
        );
    }
}
