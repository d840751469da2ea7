//! Code 39.

use super::{Encoded, pattern_widths};

const ALPHABET: &[u8; 44] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%*";

/// Nine elements per character (bar first), 1 = narrow, 2 = wide.
const PATTERNS: [&str; 44] = [
    "111221211", "211211112", "112211112", "212211111", "111221112",
    "211221111", "112221111", "111211212", "211211211", "112211211",
    "211112112", "112112112", "212112111", "111122112", "211122111",
    "112122111", "111112212", "211112211", "112112211", "111122211",
    "211111122", "112111122", "212111121", "111121122", "211121121",
    "112121121", "111111222", "211111221", "112111221", "111121221",
    "221111112", "122111112", "222111111", "121121112", "221121111",
    "122121111", "121111212", "221111211", "122111211", "121212111",
    "121211121", "121112121", "111212121", "121121211",
];

/// Encode with an automatic `*` start/stop pair. A payload already wrapped
/// in one pair is accepted as is.
pub(super) fn encode(data: &str) -> Option<Encoded> {
    let body = data.strip_prefix('*').unwrap_or(data);
    let body = body.strip_suffix('*').unwrap_or(body);
    if body.is_empty() {
        return None;
    }

    let mut indices = Vec::with_capacity(body.len() + 2);
    indices.push(ALPHABET.len() - 1);
    for b in body.bytes() {
        // '*' is reserved for start/stop
        let i = ALPHABET[..43].iter().position(|&a| a == b)?;
        indices.push(i);
    }
    indices.push(ALPHABET.len() - 1);

    let mut modules = Vec::with_capacity(indices.len() * 10);
    for (n, &i) in indices.iter().enumerate() {
        if n > 0 {
            // inter-character gap
            modules.push(1);
        }
        modules.extend(pattern_widths(PATTERNS[i]));
    }

    Some(Encoded {
        modules,
        text: format!("*{}*", body),
        check: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_has_three_wide_elements() {
        for p in PATTERNS {
            assert_eq!(p.len(), 9);
            assert_eq!(p.bytes().filter(|&b| b == b'2').count(), 3, "{}", p);
        }
    }

    #[test]
    fn test_encode_adds_start_stop() {
        let e = encode("AB").unwrap();
        assert_eq!(e.text, "*AB*");
        // 4 characters of 9 elements plus 3 gaps
        assert_eq!(e.modules.len(), 4 * 9 + 3);
        assert_eq!(&e.modules[..9], &[1, 2, 1, 1, 2, 1, 2, 1, 1]);
        assert!(e.check.is_none());
    }

    #[test]
    fn test_encode_accepts_wrapped_payload() {
        assert_eq!(encode("*AB*").unwrap().modules, encode("AB").unwrap().modules);
    }

    #[test]
    fn test_encode_rejects_invalid_characters() {
        assert!(encode("abc").is_none());
        assert!(encode("A*B").is_none());
        assert!(encode("").is_none());
        assert!(encode("**").is_none());
    }
}
