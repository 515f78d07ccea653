use crate::error::Result;
use crate::record::{DestinationField as D, Section, Transcoding};
use serde::Serialize;

/// BlueZ keeps one directory per paired device under here
pub const BLUEZ_STORAGE: &str = "/var/lib/bluetooth";

/// Render the record as `info` file sections ready to paste.
///
/// Sections with an empty key are skipped. The octet-reversed IRK is shown
/// as an alternative only when it differs from the standard key.
pub fn render_info(transcoding: &Transcoding, mac: Option<&str>) -> String {
    let record = &transcoding.record;
    let value = |field: D| record.get(field).unwrap_or_default();
    let mut output = String::new();

    output.push_str("You can try the following outputs in your 'info' file:\n");
    output.push_str("-----------------------------------------------------\n\n");
    output.push_str("=== Standard Processing ===\n\n");

    if !value(D::IdentityResolvingKey).is_empty() {
        push_section(
            &mut output,
            Section::IdentityResolvingKey,
            &[("Key", value(D::IdentityResolvingKey))],
        );
    }

    if !value(D::LongTermKey).is_empty() {
        push_section(
            &mut output,
            Section::LongTermKey,
            &[
                ("Key", value(D::LongTermKey)),
                ("EncSize", value(D::EncSize)),
                ("EDiv", value(D::EDiv)),
                ("Rand", value(D::Rand)),
                ("Authenticated", "0"),
            ],
        );
    }

    for (section, key, counter, authenticated) in [
        (
            Section::LocalSignatureKey,
            D::LocalSignatureKey,
            D::LocalSignatureCounter,
            D::LocalSignatureAuthenticated,
        ),
        (
            Section::RemoteSignatureKey,
            D::RemoteSignatureKey,
            D::RemoteSignatureCounter,
            D::RemoteSignatureAuthenticated,
        ),
    ] {
        if !value(key).is_empty() {
            push_section(
                &mut output,
                section,
                &[
                    ("Key", value(key)),
                    ("Counter", value(counter)),
                    ("Authenticated", value(authenticated)),
                ],
            );
        }
    }

    output.push_str("=== Alternative Processing (Reversed Octets) ===\n\n");
    let reversed = value(D::IdentityResolvingKeyReversed);
    if !reversed.is_empty() && reversed != value(D::IdentityResolvingKey) {
        push_section(&mut output, Section::IdentityResolvingKey, &[("Key", reversed)]);
    }

    output.push_str("-----------------------------------------------------\n");
    if let Some(mac) = mac.filter(|m| !m.is_empty()) {
        output.push_str(&format!("\nInfo file: {}/*/{}/info\n", BLUEZ_STORAGE, mac));
    }
    output.push_str("\nRemember to restart the Bluetooth service after updating the 'info' file:\n");
    output.push_str("sudo systemctl restart bluetooth\n");

    output
}

fn push_section(output: &mut String, section: Section, lines: &[(&str, &str)]) {
    output.push_str(&format!("[{}]\n", section));
    for (key, value) in lines {
        output.push_str(&format!("{}={}\n", key, value));
    }
    output.push('\n');
}

#[derive(Serialize)]
struct JsonReport<'a> {
    mac: Option<&'a str>,
    #[serde(flatten)]
    transcoding: &'a Transcoding,
}

/// Render the record and its diagnostics as pretty JSON
pub fn render_json(transcoding: &Transcoding, mac: Option<&str>) -> Result<String> {
    let report = JsonReport {
        mac: mac.filter(|m| !m.is_empty()),
        transcoding,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

/// How to pull the keys out of an offline Windows registry with chntpw
pub fn instructions() -> String {
    let mut output = String::new();

    output.push_str("This tool converts Bluetooth keys from Windows to Linux format.\n");
    output.push_str("It does not modify any files; copy and paste the output yourself.\n\n");
    output.push_str("# Extracting Bluetooth keys from the Windows registry with 'chntpw'\n");
    output.push_str("# Enter hex values with spaces as chntpw shows them\n");
    output.push_str("# (e.g. 'C1 22 E9 8B 71 DA 90 C9 45 0E EC 40 52 94 DE 49')\n\n");
    output.push_str("sudo chntpw -e /win/Windows/System32/config/SYSTEM\n");
    output.push_str("cd \\ControlSet001\\Services\\BTHPORT\\Parameters\\Keys\n");
    output.push_str("ls\n");
    output.push_str("cd <AdapterMAC>  # Replace with your adapter's MAC address\n");
    output.push_str("cd <DeviceMAC>   # Replace with your device's MAC address\n");
    output.push_str("hex <DeviceMAC>\n\n");
    output.push_str("# Extract values for the following keys:\n");
    for field in crate::field::FieldName::ALL {
        output.push_str(&format!("hex {}\n", field));
    }
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldName, RawFieldSet};
    use crate::record::map_fields;

    fn sample() -> Transcoding {
        map_fields(
            &RawFieldSet::new()
                .with(FieldName::Ltk, "c1 22 e9 8b")
                .with(FieldName::KeyLength, "10 00 00 00")
                .with(FieldName::Ediv, "4e 8a 00 00")
                .with(FieldName::ERand, "01 00 00 00 00 00 00 00")
                .with(FieldName::Irk, "a1b2c3d4")
                .with(FieldName::Csrk, "0102"),
        )
    }

    #[test]
    fn test_render_info_sections() {
        let info = render_info(&sample(), Some("60:AB:D2:91:6E:F6"));
        assert!(info.contains("[LongTermKey]\nKey=C122E98B\nEncSize=16\nEDiv=35406\nRand=1\nAuthenticated=0\n"));
        assert!(info.contains("[IdentityResolvingKey]\nKey=A1B2C3D4\n"));
        assert!(info.contains("[LocalSignatureKey]\nKey=0102\nCounter=0\nAuthenticated=false\n"));
        assert!(!info.contains("[RemoteSignatureKey]"));
        assert!(info.contains("Info file: /var/lib/bluetooth/*/60:AB:D2:91:6E:F6/info"));
        assert!(info.contains("sudo systemctl restart bluetooth"));
    }

    #[test]
    fn test_render_info_alternative_irk() {
        let info = render_info(&sample(), None);
        let (_, alternative) = info.split_once("Reversed Octets").unwrap();
        assert!(alternative.contains("[IdentityResolvingKey]\nKey=D4C3B2A1\n"));
        assert!(!info.contains("Info file:"));
    }

    #[test]
    fn test_render_info_palindromic_irk_has_no_alternative() {
        let t = map_fields(&RawFieldSet::new().with(FieldName::Irk, "ABAB"));
        let info = render_info(&t, None);
        let (_, alternative) = info.split_once("Reversed Octets").unwrap();
        assert!(!alternative.contains("[IdentityResolvingKey]"));
    }

    #[test]
    fn test_render_info_empty_record() {
        let info = render_info(&map_fields(&RawFieldSet::new()), None);
        assert!(!info.contains('['));
    }

    #[test]
    fn test_render_json() {
        let t = map_fields(&RawFieldSet::new().with(FieldName::Ediv, "01 02"));
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&t, Some("AA:BB")).unwrap()).unwrap();
        assert_eq!(json["mac"], "AA:BB");
        assert_eq!(json["record"]["LongTermKey.EDiv"], "513");
        assert_eq!(json["diagnostics"][0]["field"], "EDIV");
        assert_eq!(json["diagnostics"][0]["kind"], "width_mismatch");
    }

    #[test]
    fn test_instructions_lists_every_field() {
        let text = instructions();
        for field in FieldName::ALL {
            assert!(text.contains(&format!("hex {}\n", field)));
        }
    }
}
