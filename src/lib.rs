//! bt-dualboot - Windows to BlueZ Bluetooth pairing key transcoder
//!
//! Dual-booting with a paired Bluetooth LE device means pairing twice, unless
//! both systems share the same keys. Windows keeps them in the registry under
//! `BTHPORT\Parameters\Keys`; BlueZ keeps them in
//! `/var/lib/bluetooth/<adapter>/<device>/info`. This crate converts the
//! former, as hex text dumped by a registry editor, into the latter.
//!
//! ## Field mapping
//!
//! ```text
//! LTK          → normalize          → LongTermKey.Key, LinkKey.Key
//! KeyLength    → reverse to decimal → LongTermKey.EncSize   (default 16)
//! ERand        → reverse to decimal → LongTermKey.Rand      (default 0)
//! EDIV         → reverse to decimal → LongTermKey.EDiv      (default 0)
//! IRK          → normalize          → IdentityResolvingKey.Key (+ reversed octets)
//! CSRK         → normalize          → LocalSignatureKey.Key
//! CSRKInbound  → normalize          → RemoteSignatureKey.Key (omitted when absent)
//! ```
//!
//! Conversion never fails. Malformed values degrade to defaults and come
//! back as [`Diagnostic`]s next to the record.
//!
//! ## Example
//!
//! ```
//! use bt_dualboot::{map_fields, DestinationField, FieldName, RawFieldSet};
//!
//! let fields = RawFieldSet::new()
//!     .with(FieldName::Ltk, "c1 22 e9 8b")
//!     .with(FieldName::KeyLength, "10 00 00 00");
//! let transcoding = map_fields(&fields);
//!
//! assert_eq!(transcoding.record.get(DestinationField::LongTermKey), Some("C122E98B"));
//! assert_eq!(transcoding.record.get(DestinationField::EncSize), Some("16"));
//! ```

pub mod cli;
pub mod diagnostic;
pub mod error;
pub mod field;
pub mod record;
pub mod render;
pub mod telemetry;
pub mod transcode;

pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use field::{FieldName, RawFieldSet};
pub use record::{map_fields, DestinationField, DestinationRecord, Section, Transcoding};
