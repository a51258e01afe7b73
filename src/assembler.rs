use tracing::{debug, warn};

use crate::encoder::{encode, MachineWord};
use crate::error::AsmError;
use crate::instructions;
use crate::operands::{self, Target, SENTINEL_TARGET};

/// Non-fatal finding attached to a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub source_text: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub words: Vec<MachineWord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Split a trimmed line into its mnemonic and operand text.
fn split_mnemonic(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(p) => (&line[..p], &line[p..]),
        None => (line, ""),
    }
}

/// Encode one non-blank line. `line_no` is 1-based and only used for reporting.
pub fn assemble_line(line_no: usize, text: &str) -> Result<(MachineWord, Option<Diagnostic>), AsmError> {
    let text = text.trim();
    let (mnemonic, rest) = split_mnemonic(text);
    let spec = instructions::lookup(mnemonic).map_err(|e| e.at(line_no, text))?;
    let toks = operands::tokenize(spec, rest).map_err(|e| e.at(line_no, text))?;
    let ops = operands::resolve(spec, &toks).map_err(|e| e.at(line_no, text))?;
    let word = encode(spec, &ops);
    debug!(line = line_no, %word, "{text}");

    let diag = match &ops.target {
        Some(Target::Label(label)) => {
            let message = format!(
                "label {label:?} is not supported, use the label's address; substituted {SENTINEL_TARGET:#x}"
            );
            warn!(line = line_no, "{message}");
            Some(Diagnostic {
                line: line_no,
                source_text: text.to_string(),
                message,
            })
        }
        _ => None,
    };
    Ok((word, diag))
}

/// Assemble lines in order. The first fatal error aborts the whole program and
/// no words are returned.
pub fn assemble<'a, I>(lines: I) -> Result<Assembly, AsmError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Assembly::default();
    for (idx, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (word, diag) = assemble_line(idx + 1, line)?;
        out.words.push(word);
        out.diagnostics.extend(diag);
    }
    Ok(out)
}

pub fn assemble_source(src: &str) -> Result<Assembly, AsmError> {
    assemble(src.lines())
}
