use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::field::RawFieldSet;
use crate::record::map_fields;
use crate::render::{render_info, render_json};
use crate::transcode::format_mac;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `[Section]` / `Key=Value` text for the BlueZ info file
    #[default]
    Info,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "info" | "bluez" => Ok(Self::Info),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Options for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// `Key=Value` or JSON file with registry values
    pub input: Option<PathBuf>,
    /// Values given directly; these override the input file
    pub fields: RawFieldSet,
    /// Device address, any separators
    pub mac: Option<String>,
    pub format: OutputFormat,
}

/// Rendered output plus the warnings raised producing it
#[derive(Debug, Clone)]
pub struct Rendered {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read registry values from a file. `.json` files hold a JSON object,
/// anything else is `Key=Value` lines.
pub fn load_fields(path: &Path) -> Result<RawFieldSet> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        RawFieldSet::from_json(&text)
    } else {
        RawFieldSet::parse_key_values(&text)
    }
}

/// Render a record from a field set, for the given device address
pub fn render(fields: &RawFieldSet, mac: Option<&str>, format: OutputFormat) -> Result<Rendered> {
    let mac = mac.map(format_mac).filter(|m| !m.is_empty());
    let transcoding = map_fields(fields);

    let output = match format {
        OutputFormat::Info => render_info(&transcoding, mac.as_deref()),
        OutputFormat::Json => render_json(&transcoding, mac.as_deref())?,
    };

    Ok(Rendered {
        output,
        diagnostics: transcoding.diagnostics,
    })
}

/// Convert registry values without prompting
pub fn convert(options: &ConvertOptions) -> Result<Rendered> {
    let mut fields = match &options.input {
        Some(path) => {
            info!(path = %path.display(), "reading registry values");
            load_fields(path)?
        }
        None => RawFieldSet::new(),
    };
    fields.merge(options.fields.clone());

    render(&fields, options.mac.as_deref(), options.format)
}
