//! Field-level converters.
//!
//! Every converter is total: bad input never aborts, it comes back as an
//! empty or best-effort value with the [`Issue`]s that explain it.

pub mod mac;
pub mod normalize;
pub mod reverse;

pub use mac::*;
pub use normalize::*;
pub use reverse::*;

use serde::Serialize;
use std::fmt;

/// A non-fatal problem found while converting one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// Byte-group count differs from the field's declared width
    WidthMismatch { expected: usize, actual: usize },
    /// Hex string meant for octet reversal has an odd number of digits
    OddLength { len: usize },
    /// Character that is not a hex digit
    InvalidDigit { digit: char },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::WidthMismatch { expected, actual } => {
                write!(f, "expected {} bytes, got {} bytes", expected, actual)
            }
            Issue::OddLength { len } => {
                write!(f, "hex string does not have an even length ({} digits)", len)
            }
            Issue::InvalidDigit { digit } => write!(f, "invalid hex digit {:?}", digit),
        }
    }
}

/// Result of a converter: the value plus whatever went wrong producing it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converted {
    pub value: String,
    pub issues: Vec<Issue>,
}

impl Converted {
    pub fn ok(value: String) -> Self {
        Self {
            value,
            issues: Vec::new(),
        }
    }

    /// Empty value, caused by `issue`
    pub fn failed(issue: Issue) -> Self {
        Self {
            value: String::new(),
            issues: vec![issue],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
