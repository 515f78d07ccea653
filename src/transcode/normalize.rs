/// Strip separators and upper-case a hex string.
///
/// Spaces and commas are what the registry editor and humans put between
/// byte groups; other whitespace comes from pasted multi-line dumps.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .flat_map(char::to_uppercase)
        .collect()
}
