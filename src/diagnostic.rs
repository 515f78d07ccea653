use crate::field::FieldName;
use crate::transcode::Issue;
use serde::Serialize;
use std::fmt;

/// A warning attached to one source field.
///
/// Diagnostics travel alongside the record; they never stop it from being
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub field: FieldName,
    #[serde(flatten)]
    pub issue: Issue,
}

impl Diagnostic {
    pub fn new(field: FieldName, issue: Issue) -> Self {
        Self { field, issue }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.issue)
    }
}
