use super::{Converted, Issue};

/// Windows stores DWORD/QWORD registry values little-endian, one byte
/// group per token. Reassemble big-endian and render as a decimal integer.
///
/// `value` is the byte groups as entered (`"10 00 00 00"`), separated by
/// whitespace or commas. A count different from `expected` is reported but
/// conversion still uses the tokens that were supplied. Empty input yields an
/// empty value so the caller can substitute its default.
pub fn reverse_to_decimal(value: &str, expected: Option<usize>) -> Converted {
    let tokens = byte_groups(value);
    if tokens.is_empty() {
        return Converted::default();
    }

    let mut issues = Vec::new();
    if let Some(expected) = expected {
        if tokens.len() != expected {
            issues.push(Issue::WidthMismatch {
                expected,
                actual: tokens.len(),
            });
        }
    }

    let reversed: String = tokens.iter().rev().copied().collect();
    match hex_to_decimal(&reversed) {
        Ok(decimal) => Converted {
            value: decimal,
            issues,
        },
        Err(digit) => {
            issues.push(Issue::InvalidDigit { digit });
            Converted {
                value: String::new(),
                issues,
            }
        }
    }
}

/// Reverse the octet order of a contiguous hex string, keeping it as hex.
///
/// Odd-length input cannot be split into octets; the result is then empty
/// rather than a partial reversal. Length and digits are checked per
/// character. The output is always upper-case, whatever the input case.
pub fn reverse_octets(value: &str) -> Converted {
    if value.is_empty() {
        return Converted::default();
    }

    let len = value.chars().count();
    if len % 2 != 0 {
        return Converted::failed(Issue::OddLength { len });
    }
    if let Some(digit) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Converted::failed(Issue::InvalidDigit { digit });
    }

    match hex::decode(value) {
        Ok(mut octets) => {
            octets.reverse();
            Converted::ok(hex::encode_upper(octets))
        }
        Err(hex::FromHexError::InvalidHexCharacter { c, .. }) => {
            Converted::failed(Issue::InvalidDigit { digit: c })
        }
        Err(_) => Converted::failed(Issue::OddLength { len }),
    }
}

/// Split human-entered byte groups
pub fn byte_groups(value: &str) -> Vec<&str> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Base-16 to base-10 without a width limit.
/// Returns the first offending character on a non-hex digit.
fn hex_to_decimal(hex: &str) -> Result<String, char> {
    const LIMB: u64 = 1_000_000_000;

    // Little-endian base 10^9 limbs
    let mut limbs: Vec<u64> = vec![0];
    for c in hex.chars() {
        let mut carry = c.to_digit(16).ok_or(c)? as u64;
        for limb in limbs.iter_mut() {
            let v = *limb * 16 + carry;
            *limb = v % LIMB;
            carry = v / LIMB;
        }
        while carry > 0 {
            limbs.push(carry % LIMB);
            carry /= LIMB;
        }
    }

    let mut out = String::new();
    let mut iter = limbs.iter().rev();
    if let Some(top) = iter.next() {
        out.push_str(&top.to_string());
    }
    for limb in iter {
        out.push_str(&format!("{:09}", limb));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_length_dword() {
        let out = reverse_to_decimal("10 00 00 00", Some(4));
        assert_eq!(out.value, "16");
        assert!(out.is_clean());
    }

    #[test]
    fn test_width_mismatch_still_converts() {
        let out = reverse_to_decimal("01 02", Some(4));
        assert_eq!(out.value, "513");
        assert_eq!(
            out.issues,
            vec![Issue::WidthMismatch {
                expected: 4,
                actual: 2
            }]
        );
    }

    #[test]
    fn test_no_expected_width() {
        let out = reverse_to_decimal("01 02 03", None);
        assert_eq!(out.value, "197121");
        assert!(out.is_clean());
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(reverse_to_decimal("", Some(4)), Converted::default());
        assert_eq!(reverse_to_decimal("   ", None), Converted::default());
    }

    #[test]
    fn test_commas_are_separators() {
        assert_eq!(reverse_to_decimal("10,00,00,00", Some(4)).value, "16");
    }

    #[test]
    fn test_qword_max() {
        let out = reverse_to_decimal("ff ff ff ff ff ff ff ff", None);
        assert_eq!(out.value, u64::MAX.to_string());
    }

    #[test]
    fn test_wider_than_u128() {
        // 2^136 - 1
        let tokens = vec!["ff"; 17].join(" ");
        assert_eq!(
            reverse_to_decimal(&tokens, None).value,
            "87112285931760246646623899502532662132735"
        );
    }

    #[test]
    fn test_invalid_digit() {
        let out = reverse_to_decimal("0G 00", Some(2));
        assert_eq!(out.value, "");
        assert_eq!(out.issues, vec![Issue::InvalidDigit { digit: 'G' }]);
    }

    #[test]
    fn test_reverse_octets() {
        let out = reverse_octets("A1B2C3D4");
        assert_eq!(out.value, "D4C3B2A1");
        assert!(out.is_clean());
    }

    #[test]
    fn test_reverse_octets_odd_length() {
        let out = reverse_octets("A1B2C");
        assert_eq!(out.value, "");
        assert_eq!(out.issues, vec![Issue::OddLength { len: 5 }]);
    }

    #[test]
    fn test_reverse_octets_invalid_digit() {
        let out = reverse_octets("A1ZZ");
        assert_eq!(out.value, "");
        assert_eq!(out.issues, vec![Issue::InvalidDigit { digit: 'Z' }]);
    }

    #[test]
    fn test_reverse_octets_counts_characters_not_bytes() {
        // 3 characters, 4 bytes
        let out = reverse_octets("ABé");
        assert_eq!(out.value, "");
        assert_eq!(out.issues, vec![Issue::OddLength { len: 3 }]);
    }

    #[test]
    fn test_reverse_octets_reports_non_ascii_digit() {
        let out = reverse_octets("A1é2");
        assert_eq!(out.value, "");
        assert_eq!(out.issues, vec![Issue::InvalidDigit { digit: 'é' }]);
    }

    #[test]
    fn test_reverse_octets_upper_cases_output() {
        let out = reverse_octets("a1b2c3d4");
        assert_eq!(out.value, "D4C3B2A1");
        assert!(out.is_clean());
    }

    #[test]
    fn test_reverse_octets_empty() {
        assert_eq!(reverse_octets(""), Converted::default());
    }

    #[test]
    fn test_hex_to_decimal_leading_zeros() {
        assert_eq!(hex_to_decimal("00000010").unwrap(), "16");
        assert_eq!(hex_to_decimal("0").unwrap(), "0");
        assert_eq!(hex_to_decimal("3B9ACA00").unwrap(), "1000000000");
    }

    proptest! {
        #[test]
        fn prop_reverse_octets_involutive(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
            let s = hex::encode_upper(&bytes);
            let once = reverse_octets(&s);
            prop_assert!(once.is_clean());
            prop_assert_eq!(reverse_octets(&once.value).value, s);
        }

        #[test]
        fn prop_token_order_reverses_back(tokens in proptest::collection::vec("[0-9A-F]{2}", 1..12)) {
            let joined = tokens.join(" ");
            let reversed: Vec<&str> = byte_groups(&joined).into_iter().rev().collect();
            let rejoined = reversed.join(" ");
            let restored: Vec<&str> = byte_groups(&rejoined).into_iter().rev().collect();
            prop_assert_eq!(restored, tokens.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn prop_dword_matches_from_le_bytes(n in any::<u32>()) {
            let entered = n
                .to_le_bytes()
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let out = reverse_to_decimal(&entered, Some(4));
            prop_assert!(out.is_clean());
            prop_assert_eq!(out.value, n.to_string());
        }

        #[test]
        fn prop_qword_matches_from_le_bytes(n in any::<u64>()) {
            let entered = hex::encode(n.to_le_bytes())
                .as_bytes()
                .chunks(2)
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            prop_assert_eq!(reverse_to_decimal(&entered, None).value, n.to_string());
        }
    }
}
