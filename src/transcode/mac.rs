/// Format a device address the way BlueZ names its storage directories.
///
/// `60abd2916ef6` becomes `60:AB:D2:91:6E:F6`. No length check: a trailing
/// single character is emitted as its own group.
pub fn format_mac(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|&c| c != ':' && c != '-' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}
