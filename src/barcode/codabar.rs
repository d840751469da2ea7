//! Codabar (NW-7).

use super::Encoded;

const ALPHABET: &[u8; 20] = b"0123456789-$:/.+ABCD";

/// Seven elements per character (bar first), `1` marks a wide element.
const PATTERNS: [&str; 20] = [
    "0000011", "0000110", "0001001", "1100000", "0010010",
    "1000010", "0100001", "0100100", "0110000", "1001000",
    "0001100", "0011000", "1000101", "1010001", "1010100",
    "0010101", "0011010", "0101001", "0001011", "0001110",
];

/// Encode a payload that carries its own A-D start and stop characters.
pub(super) fn encode(data: &str) -> Option<Encoded> {
    let upper = data.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    let is_guard = |b: u8| (b'A'..=b'D').contains(&b);
    if !is_guard(bytes[0]) || !is_guard(bytes[bytes.len() - 1]) {
        return None;
    }

    let mut modules = Vec::with_capacity(bytes.len() * 8);
    for (n, &b) in bytes.iter().enumerate() {
        let inner = n > 0 && n < bytes.len() - 1;
        if inner && is_guard(b) {
            return None;
        }
        let i = ALPHABET.iter().position(|&a| a == b)?;
        if n > 0 {
            modules.push(1);
        }
        modules.extend(PATTERNS[i].bytes().map(|w| if w == b'1' { 2 } else { 1 }));
    }

    Some(Encoded {
        modules,
        text: data.to_string(),
        check: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_with_guards() {
        let e = encode("A40156B").unwrap();
        assert_eq!(e.modules.len(), 7 * 7 + 6);
        assert_eq!(e.text, "A40156B");
    }

    #[test]
    fn test_lowercase_guards() {
        assert_eq!(encode("a123d").unwrap().modules, encode("A123D").unwrap().modules);
    }

    #[test]
    fn test_requires_guards() {
        assert!(encode("40156").is_none());
        assert!(encode("A40156").is_none());
        assert!(encode("AB").is_none());
        assert!(encode("A1B2C").is_none());
        assert!(encode("A1X2C").is_none());
    }
}
