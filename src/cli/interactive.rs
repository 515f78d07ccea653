use crate::cli::convert::{render, OutputFormat, Rendered};
use crate::error::Result;
use crate::field::{FieldName, RawFieldSet};
use crate::render::instructions;
use crate::transcode::format_mac;
use std::io::{BufRead, Write};

fn prompt_text(field: FieldName) -> &'static str {
    match field {
        FieldName::Ltk => "Enter LTK (or LinkKey from hex <DeviceMAC>):",
        FieldName::KeyLength => "Enter KeyLength (DWORD in hex, e.g., '10 00 00 00' for 16):",
        FieldName::ERand => "Enter ERand (QWORD in hex, 8 bytes):",
        FieldName::Ediv => "Enter EDIV (DWORD in hex, 4 bytes):",
        FieldName::Irk => "Enter IRK:",
        FieldName::Csrk => "Enter CSRK:",
        FieldName::CsrkInbound => "Enter CSRKInbound (optional, press Enter to skip):",
    }
}

/// Show `message`, read one line. End of input reads as an empty answer.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}\n> ", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask for the device address. `None` when skipped.
pub fn prompt_mac<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    let raw = prompt(
        input,
        output,
        "Enter the device's MAC address (hexadecimal, no separators, e.g., '60abd2916ef6'):",
    )?;
    if raw.is_empty() {
        return Ok(None);
    }

    let formatted = format_mac(&raw);
    writeln!(output, "Formatted MAC address for use in directory: {}", formatted)?;
    Ok(Some(formatted))
}

/// Ask for every registry value in turn
pub fn collect_fields<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<RawFieldSet> {
    writeln!(output, "Please enter the following keys as extracted from the Windows registry.")?;
    writeln!(output, "If a key is not available or not required, just press Enter to skip.\n")?;

    let mut fields = RawFieldSet::new();
    for field in FieldName::ALL {
        let value = prompt(input, output, prompt_text(field))?;
        fields.insert(field, value);
    }
    Ok(fields)
}

/// The full prompt-driven session: instructions, address, values, output
pub fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    format: OutputFormat,
) -> Result<Rendered> {
    writeln!(output, "{}", instructions())?;
    let mac = prompt_mac(input, output)?;
    let fields = collect_fields(input, output)?;

    writeln!(output, "\nProcessing values...\n")?;
    let rendered = render(&fields, mac.as_deref(), format)?;
    for diagnostic in &rendered.diagnostics {
        writeln!(output, "Warning: {}", diagnostic)?;
    }
    write!(output, "{}", rendered.output)?;
    output.flush()?;

    Ok(rendered)
}
