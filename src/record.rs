//! Mapping from Windows registry values to a BlueZ `info` record.
//!
//! The mapping is a table of [`FieldRule`]s, one per source value. Each rule
//! names its converter, the destination keys it fills, and what to do when
//! the source is absent or degrades to nothing.

use crate::diagnostic::Diagnostic;
use crate::field::{FieldName, RawFieldSet};
use crate::transcode::{normalize, reverse_octets, reverse_to_decimal, Converted};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// `[Section]` headers of the BlueZ info file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    LongTermKey,
    LinkKey,
    IdentityResolvingKey,
    LocalSignatureKey,
    RemoteSignatureKey,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::LongTermKey => "LongTermKey",
            Section::LinkKey => "LinkKey",
            Section::IdentityResolvingKey => "IdentityResolvingKey",
            Section::LocalSignatureKey => "LocalSignatureKey",
            Section::RemoteSignatureKey => "RemoteSignatureKey",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `Key=Value` line of a destination section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DestinationField {
    LongTermKey,
    EncSize,
    Rand,
    EDiv,
    LinkKey,
    IdentityResolvingKey,
    /// Octet-reversed IRK candidate; not a BlueZ key
    IdentityResolvingKeyReversed,
    LocalSignatureKey,
    LocalSignatureCounter,
    LocalSignatureAuthenticated,
    RemoteSignatureKey,
    RemoteSignatureCounter,
    RemoteSignatureAuthenticated,
}

impl DestinationField {
    pub fn section(self) -> Section {
        use DestinationField::*;
        match self {
            LongTermKey | EncSize | Rand | EDiv => Section::LongTermKey,
            LinkKey => Section::LinkKey,
            IdentityResolvingKey | IdentityResolvingKeyReversed => Section::IdentityResolvingKey,
            LocalSignatureKey | LocalSignatureCounter | LocalSignatureAuthenticated => {
                Section::LocalSignatureKey
            }
            RemoteSignatureKey | RemoteSignatureCounter | RemoteSignatureAuthenticated => {
                Section::RemoteSignatureKey
            }
        }
    }

    /// Key name within the section
    pub fn key(self) -> &'static str {
        use DestinationField::*;
        match self {
            LongTermKey | LinkKey | IdentityResolvingKey | LocalSignatureKey
            | RemoteSignatureKey => "Key",
            EncSize => "EncSize",
            Rand => "Rand",
            EDiv => "EDiv",
            IdentityResolvingKeyReversed => "ReversedOctets",
            LocalSignatureCounter | RemoteSignatureCounter => "Counter",
            LocalSignatureAuthenticated | RemoteSignatureAuthenticated => "Authenticated",
        }
    }
}

impl fmt::Display for DestinationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key())
    }
}

/// How a source value is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Strip separators, upper-case
    Normalize,
    /// Little-endian byte groups to a decimal integer
    ReverseToDecimal { expected: Option<usize> },
}

impl Conversion {
    pub fn apply(self, raw: &str) -> Converted {
        match self {
            Conversion::Normalize => Converted::ok(normalize(raw)),
            Conversion::ReverseToDecimal { expected } => reverse_to_decimal(raw, expected),
        }
    }
}

/// What a rule writes when its source yields no value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Value(&'static str),
    /// Leave the whole section out of the record
    Omit,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub source: FieldName,
    pub conversion: Conversion,
    /// Every target receives the same converted value
    pub targets: &'static [DestinationField],
    /// Receives the octet-reversed form of the converted value
    pub reversed: Option<DestinationField>,
    pub fallback: Fallback,
    /// Written alongside the targets whenever the rule is not omitted
    pub constants: &'static [(DestinationField, &'static str)],
}

/// DWORD registry values
pub const DWORD_GROUPS: usize = 4;

pub const RULES: &[FieldRule] = &[
    FieldRule {
        source: FieldName::Ltk,
        conversion: Conversion::Normalize,
        targets: &[DestinationField::LongTermKey, DestinationField::LinkKey],
        reversed: None,
        fallback: Fallback::Value(""),
        constants: &[],
    },
    FieldRule {
        source: FieldName::KeyLength,
        conversion: Conversion::ReverseToDecimal {
            expected: Some(DWORD_GROUPS),
        },
        targets: &[DestinationField::EncSize],
        reversed: None,
        fallback: Fallback::Value("16"),
        constants: &[],
    },
    // QWORD, but captures vary in width
    FieldRule {
        source: FieldName::ERand,
        conversion: Conversion::ReverseToDecimal { expected: None },
        targets: &[DestinationField::Rand],
        reversed: None,
        fallback: Fallback::Value("0"),
        constants: &[],
    },
    FieldRule {
        source: FieldName::Ediv,
        conversion: Conversion::ReverseToDecimal {
            expected: Some(DWORD_GROUPS),
        },
        targets: &[DestinationField::EDiv],
        reversed: None,
        fallback: Fallback::Value("0"),
        constants: &[],
    },
    FieldRule {
        source: FieldName::Irk,
        conversion: Conversion::Normalize,
        targets: &[DestinationField::IdentityResolvingKey],
        reversed: Some(DestinationField::IdentityResolvingKeyReversed),
        fallback: Fallback::Value(""),
        constants: &[],
    },
    FieldRule {
        source: FieldName::Csrk,
        conversion: Conversion::Normalize,
        targets: &[DestinationField::LocalSignatureKey],
        reversed: None,
        fallback: Fallback::Value(""),
        constants: &[
            (DestinationField::LocalSignatureCounter, "0"),
            (DestinationField::LocalSignatureAuthenticated, "false"),
        ],
    },
    FieldRule {
        source: FieldName::CsrkInbound,
        conversion: Conversion::Normalize,
        targets: &[DestinationField::RemoteSignatureKey],
        reversed: None,
        fallback: Fallback::Omit,
        constants: &[
            (DestinationField::RemoteSignatureCounter, "0"),
            (DestinationField::RemoteSignatureAuthenticated, "false"),
        ],
    },
];

impl FieldRule {
    fn apply(
        &self,
        raw: Option<&str>,
        record: &mut DestinationRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let converted = raw.map(|r| self.conversion.apply(r)).unwrap_or_default();
        diagnostics.extend(
            converted
                .issues
                .iter()
                .map(|issue| Diagnostic::new(self.source, *issue)),
        );

        let value = if converted.value.is_empty() {
            match self.fallback {
                Fallback::Value(v) => v.to_string(),
                Fallback::Omit => return,
            }
        } else {
            converted.value
        };

        if let Some(reversed_field) = self.reversed {
            let reversed = reverse_octets(&value);
            diagnostics.extend(
                reversed
                    .issues
                    .iter()
                    .map(|issue| Diagnostic::new(self.source, *issue)),
            );
            record.fields.insert(reversed_field, reversed.value);
        }

        for target in self.targets {
            record.fields.insert(*target, value.clone());
        }
        for (field, constant) in self.constants {
            record.fields.insert(*field, constant.to_string());
        }
    }
}

/// The converted record, keyed by destination field.
///
/// Sections whose source was optional and absent have no keys at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationRecord {
    fields: BTreeMap<DestinationField, String>,
}

impl DestinationRecord {
    pub fn get(&self, field: DestinationField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DestinationField) -> bool {
        self.fields.contains_key(&field)
    }

    /// `true` if any key of `section` is present
    pub fn has_section(&self, section: Section) -> bool {
        self.fields.keys().any(|f| f.section() == section)
    }

    /// Present keys of one section, in declaration order
    pub fn section(&self, section: Section) -> Vec<(DestinationField, &str)> {
        self.iter().filter(|(f, _)| f.section() == section).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DestinationField, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for DestinationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(&field.to_string(), value)?;
        }
        map.end()
    }
}

/// A record plus the warnings raised while building it
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Transcoding {
    pub record: DestinationRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert raw registry values into a destination record. Never fails.
pub fn map_fields(fields: &RawFieldSet) -> Transcoding {
    let mut transcoding = Transcoding::default();

    for rule in RULES {
        rule.apply(
            fields.get(rule.source),
            &mut transcoding.record,
            &mut transcoding.diagnostics,
        );
    }

    for diagnostic in &transcoding.diagnostics {
        debug!(field = %diagnostic.field, issue = %diagnostic.issue, "field degraded");
    }
    debug!(
        fields = transcoding.record.len(),
        warnings = transcoding.diagnostics.len(),
        "record mapped"
    );

    transcoding
}
