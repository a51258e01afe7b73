/// Exit code for a program containing an unsupported mnemonic.
pub const EXIT_UNSUPPORTED: i32 = -1;
/// Exit code for malformed operands or unknown registers.
pub const EXIT_BAD_OPERANDS: i32 = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: {mnemonic} is not a supported instruction")]
    UnsupportedInstruction { line: usize, mnemonic: String },
    #[error("line {line}: `{source_text}` does not have the required {expected} inputs (found {found})")]
    OperandCountMismatch {
        line: usize,
        source_text: String,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: `{source_text}` has malformed operands: {reason}")]
    OperandFormatInvalid {
        line: usize,
        source_text: String,
        reason: String,
    },
    #[error("line {line}: unknown register {alias} in `{source_text}`")]
    UnknownRegister {
        line: usize,
        source_text: String,
        alias: String,
    },
}

impl AsmError {
    pub fn line(&self) -> usize {
        match self {
            AsmError::UnsupportedInstruction { line, .. }
            | AsmError::OperandCountMismatch { line, .. }
            | AsmError::OperandFormatInvalid { line, .. }
            | AsmError::UnknownRegister { line, .. } => *line,
        }
    }

    /// Process exit code the CLI reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AsmError::UnsupportedInstruction { .. } => EXIT_UNSUPPORTED,
            _ => EXIT_BAD_OPERANDS,
        }
    }
}

/// Line-independent failure raised by the table and tokenizer layers.
/// The assembler attaches the line number and text before surfacing it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("{0} is not a supported instruction")]
    Unsupported(String),
    #[error("expected {expected} operands, found {found}")]
    Count { expected: usize, found: usize },
    #[error("{0}")]
    Format(String),
    #[error("unknown register {0}")]
    UnknownRegister(String),
}

impl OperandError {
    pub fn at(self, line: usize, source_text: &str) -> AsmError {
        let source_text = source_text.to_string();
        match self {
            OperandError::Unsupported(mnemonic) => AsmError::UnsupportedInstruction { line, mnemonic },
            OperandError::Count { expected, found } => AsmError::OperandCountMismatch {
                line,
                source_text,
                expected,
                found,
            },
            OperandError::Format(reason) => AsmError::OperandFormatInvalid {
                line,
                source_text,
                reason,
            },
            OperandError::UnknownRegister(alias) => AsmError::UnknownRegister {
                line,
                source_text,
                alias,
            },
        }
    }
}
