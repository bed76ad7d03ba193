use thiserror::Error;

#[derive(Debug, Error)]
pub enum CutsiteError {
    #[error("target '{target}' has no recognition sequence")]
    EmptyTarget { target: String },

    #[error("target '{target}' must carry exactly one '^' cut marker in '{marked}', found {found}")]
    CutMarker {
        target: String,
        marked: String,
        found: usize,
    },

    #[error("target '{target}' contains '{letter}', which is not an IUPAC nucleotide code")]
    UnknownIupacCode { target: String, letter: char },

    #[error("target '{target}': marked strand '{marked}' does not match recognition length {expected}")]
    LengthMismatch {
        target: String,
        marked: String,
        expected: usize,
    },

    #[error("enzyme '{0}' is already defined")]
    DuplicateEnzyme(String),

    #[error("line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CutsiteError>;
