use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Registry values under `BTHPORT\Parameters\Keys\<adapter>\<device>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "LTK")]
    Ltk,
    #[serde(rename = "KeyLength")]
    KeyLength,
    #[serde(rename = "ERand")]
    ERand,
    #[serde(rename = "EDIV")]
    Ediv,
    #[serde(rename = "IRK")]
    Irk,
    #[serde(rename = "CSRK")]
    Csrk,
    #[serde(rename = "CSRKInbound")]
    CsrkInbound,
}

impl FieldName {
    /// All fields, in the order they are prompted for
    pub const ALL: [FieldName; 7] = [
        FieldName::Ltk,
        FieldName::KeyLength,
        FieldName::ERand,
        FieldName::Ediv,
        FieldName::Irk,
        FieldName::Csrk,
        FieldName::CsrkInbound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Ltk => "LTK",
            FieldName::KeyLength => "KeyLength",
            FieldName::ERand => "ERand",
            FieldName::Ediv => "EDIV",
            FieldName::Irk => "IRK",
            FieldName::Csrk => "CSRK",
            FieldName::CsrkInbound => "CSRKInbound",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownField(wanted.to_string()))
    }
}

/// Raw, untrimmed field text as entered by a user or read from a file.
///
/// Empty values are kept but read back as absent, so a field that was
/// "entered as nothing" resolves the same way as one never supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFieldSet {
    values: BTreeMap<FieldName, String>,
}

impl RawFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style [`RawFieldSet::insert`]
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Supplied value, or `None` when missing or blank
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Overlay every supplied value of `other` onto `self`
    pub fn merge(&mut self, other: RawFieldSet) {
        for (field, value) in other.values {
            if !value.trim().is_empty() {
                self.values.insert(field, value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        FieldName::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Parse `Key=Value` lines. Blank lines and `#` comments are skipped.
    pub fn parse_key_values(text: &str) -> Result<Self> {
        let mut fields = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| Error::InvalidLine {
                line: idx + 1,
                reason: "expected Key=Value".into(),
            })?;
            let field: FieldName = key.parse().map_err(|e: Error| Error::InvalidLine {
                line: idx + 1,
                reason: e.to_string(),
            })?;
            fields.insert(field, value.trim());
        }
        Ok(fields)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
