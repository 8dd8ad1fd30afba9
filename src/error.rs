use std::path::PathBuf;

/// Errors raised by the transpilation core and its file boundary.
#[derive(Debug, thiserror::Error)]
pub enum TranspileError {
    #[error("Malformed signal token '{token}': {reason}")]
    Parse { token: String, reason: String },

    #[error("Declaration references unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Conflicting observations for '{name}': {detail}")]
    SymbolConflict { name: String, detail: String },

    #[error("Rewrite rule '{rule}' did not settle after {passes} passes")]
    FixpointLimit { rule: &'static str, passes: usize },

    #[error("Cannot create {} because it already exists", .0.display())]
    OutputConflict(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranspileError {
    pub fn parse(token: &str, reason: impl Into<String>) -> Self {
        TranspileError::Parse {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub fn conflict(name: &str, detail: impl Into<String>) -> Self {
        TranspileError::SymbolConflict {
            name: name.to_string(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranspileError>;
