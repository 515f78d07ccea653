use thiserror::Error;

/// Failures of the shell around the transcoder.
///
/// The transcoding core never returns these: malformed key material degrades
/// to defaults and is reported through [`crate::Diagnostic`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown field: {0}. Expected one of LTK, KeyLength, ERand, EDIV, IRK, CSRK, CSRKInbound")]
    UnknownField(String),

    #[error("Invalid input on line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Logging setup failed: {0}")]
    Telemetry(String),
}

pub type Result<T> = std::result::Result<T, Error>;
