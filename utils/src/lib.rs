//! Leverage common functionality across the anti-klepto host crates.

/// Converts bytes to a hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Commonly used
/// in testing to encode external test vectors without modification and when reading values
/// pasted on the command line.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}

/// Converts a hexadecimal string to a fixed-size array, returning `None` if the
/// decoded length is not exactly `N`.
pub fn from_hex_array<const N: usize>(hex: &str) -> Option<[u8; N]> {
    from_hex_formatted(hex)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        // Test case 0: empty bytes
        let b = &[];
        let h = hex(b);
        assert_eq!(h, "");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 1: single byte
        let b = &[0x01];
        let h = hex(b);
        assert_eq!(h, "01");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 2: multiple bytes
        let b = &[0x02, 0xab, 0xff];
        let h = hex(b);
        assert_eq!(h, "02abff");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Test case 3: odd number of characters
        assert!(from_hex("0203a").is_none());

        // Test case 4: invalid hexadecimal character
        assert!(from_hex("02g3").is_none());

        // Test case 5: non-ascii input
        assert!(from_hex("éé").is_none());
    }

    #[test]
    fn test_from_hex_formatted() {
        let b = [0x04, 0x79, 0xbe];

        // Test case 0: plain
        assert_eq!(from_hex_formatted("0479be").unwrap(), b.to_vec());

        // Test case 1: whitespace
        assert_eq!(from_hex_formatted("04 79 be").unwrap(), b.to_vec());

        // Test case 2: 0x prefix
        assert_eq!(from_hex_formatted("0x0479be").unwrap(), b.to_vec());

        // Test case 3: 0x prefix + different whitespace chars
        let h = "    \n\n0x\r\n04
                            79\tbe\n";
        assert_eq!(from_hex_formatted(h).unwrap(), b.to_vec());

        // Test case 4: invalid
        assert!(from_hex_formatted("0x0479b").is_none());
    }

    #[test]
    fn test_from_hex_array() {
        assert_eq!(from_hex_array::<2>("0x0102"), Some([0x01, 0x02]));
        assert_eq!(from_hex_array::<3>("0102"), None);
        assert_eq!(from_hex_array::<1>("0102"), None);
    }
}
