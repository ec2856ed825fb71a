// Rolling string hash for comparing page data snapshots
// Not wired into any handler yet

/// `hash * 31 + code_unit` over UTF-16 code units with 32-bit wraparound,
/// rendered as a signed decimal string.
pub fn hash_string(input: &str) -> String {
    let hash = input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_hashes_to_zero() {
        assert_eq!(hash_string(""), "0");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(hash_string("a"), "97");
        assert_eq!(hash_string("ab"), "3105");
        assert_eq!(hash_string("hello"), "99162322");
        assert_eq!(hash_string("hello world"), "1794106052");
        // Overflows 32 bits and wraps negative
        assert_eq!(hash_string("https://wplace.live"), "-1118403845");
    }

    #[test]
    fn test_deterministic() {
        let input = "pixel canvas 1234";
        assert_eq!(hash_string(input), hash_string(input));
    }

    #[test]
    fn test_single_character_change() {
        assert_ne!(hash_string("canvas-a"), hash_string("canvas-b"));
        assert_ne!(hash_string("abc"), hash_string("abd"));
    }

    #[test]
    fn test_hashes_utf16_code_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00
        let expected = (0xD83Di32).wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(hash_string("\u{1F600}"), expected.to_string());
    }
}
