//! Code 93 with full ASCII escapes.

use super::{Checksum, Encoded, pattern_widths};

/// Six elements per symbol (bar first). Indices 0-42 are the printable
/// alphabet `0-9 A-Z - . space $ / + %`, 43-46 the shift symbols
/// ($) (%) (/) (+), 47 the start/stop symbol.
const PATTERNS: [&str; 48] = [
    "131112", "111213", "111312", "111411", "121113", "121212", "121311", "111114",
    "131211", "141111", "211113", "211212", "211311", "221112", "221211", "231111",
    "112113", "112212", "112311", "122112", "132111", "111123", "111222", "111321",
    "121122", "131121", "212112", "212211", "211122", "211221", "221121", "222111",
    "112122", "112221", "122121", "123111", "121131", "311112", "311211", "321111",
    "112131", "113121", "211131", "121221", "312111", "311121", "122211", "111141",
];

const SHIFT_DOLLAR: u8 = 43;
const SHIFT_PERCENT: u8 = 44;
const SHIFT_SLASH: u8 = 45;
const SHIFT_PLUS: u8 = 46;
const START_STOP: usize = 47;

fn letter(c: u8) -> u8 {
    c - b'A' + 10
}

/// Symbol values for one byte: one value for the native alphabet, a shift
/// pair for everything else.
fn expand(b: u8) -> Option<Vec<u8>> {
    let values = match b {
        b'0'..=b'9' => vec![b - b'0'],
        b'A'..=b'Z' => vec![letter(b)],
        b'-' => vec![36],
        b'.' => vec![37],
        b' ' => vec![38],
        b'$' => vec![39],
        b'/' => vec![40],
        b'+' => vec![41],
        b'%' => vec![42],
        0 => vec![SHIFT_PERCENT, letter(b'U')],
        1..=26 => vec![SHIFT_DOLLAR, letter(b'A' + b - 1)],
        27..=31 => vec![SHIFT_PERCENT, letter(b'A' + b - 27)],
        33..=47 => vec![SHIFT_SLASH, letter(b'A' + b - 33)],
        b':' => vec![SHIFT_SLASH, letter(b'Z')],
        59..=63 => vec![SHIFT_PERCENT, letter(b'F' + b - 59)],
        b'@' => vec![SHIFT_PERCENT, letter(b'V')],
        91..=95 => vec![SHIFT_PERCENT, letter(b'K' + b - 91)],
        b'`' => vec![SHIFT_PERCENT, letter(b'W')],
        b'a'..=b'z' => vec![SHIFT_PLUS, letter(b - 32)],
        123..=127 => vec![SHIFT_PERCENT, letter(b'P' + b - 123)],
        _ => return None,
    };
    Some(values)
}

/// Weighted sum from the right with weights cycling 1..=`max_weight`, mod 47.
fn check_value(values: &[u8], max_weight: usize) -> u8 {
    let sum: usize = values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| usize::from(v) * (i % max_weight + 1))
        .sum();
    (sum % 47) as u8
}

pub(super) fn encode(data: &str) -> Option<Encoded> {
    if data.is_empty() {
        return None;
    }

    let mut values = Vec::with_capacity(data.len() * 2 + 2);
    for b in data.bytes() {
        values.extend(expand(b)?);
    }
    let c = check_value(&values, 20);
    values.push(c);
    let k = check_value(&values, 15);
    values.push(k);

    let mut modules = Vec::with_capacity((values.len() + 2) * 6 + 1);
    modules.extend(pattern_widths(PATTERNS[START_STOP]));
    for &v in &values {
        modules.extend(pattern_widths(PATTERNS[usize::from(v)]));
    }
    modules.extend(pattern_widths(PATTERNS[START_STOP]));
    // termination bar
    modules.push(1);

    Some(Encoded {
        modules,
        text: data.to_string(),
        check: Some(Checksum::Code93 { c, k }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_nine_modules() {
        for p in PATTERNS {
            assert_eq!(pattern_widths(p).sum::<u32>(), 9, "{}", p);
        }
    }

    #[test]
    fn test_known_check_characters() {
        // "TEST93" carries the check characters '+' (41) and '6'
        let values: Vec<u8> = b"TEST93".iter().flat_map(|&b| expand(b).unwrap()).collect();
        assert_eq!(values, vec![29, 14, 28, 29, 9, 3]);
        let c = check_value(&values, 20);
        // 29*6 + 14*5 + 28*4 + 29*3 + 9*2 + 3*1 = 464, 464 mod 47 = 41
        assert_eq!(c, 41);
        let mut with_c = values.clone();
        with_c.push(c);
        // 29*7 + 14*6 + 28*5 + 29*4 + 9*3 + 3*2 + 41*1 = 617, 617 mod 47 = 6
        assert_eq!(check_value(&with_c, 15), 6);
        let e = encode("TEST93").unwrap();
        assert_eq!(e.check, Some(Checksum::Code93 { c: 41, k: 6 }));
    }

    #[test]
    fn test_full_ascii_escapes() {
        assert_eq!(expand(b'a').unwrap(), vec![SHIFT_PLUS, 10]);
        assert_eq!(expand(0).unwrap(), vec![SHIFT_PERCENT, letter(b'U')]);
        assert_eq!(expand(b'\r').unwrap(), vec![SHIFT_DOLLAR, letter(b'M')]);
        assert_eq!(expand(b'!').unwrap(), vec![SHIFT_SLASH, 10]);
        assert_eq!(expand(b':').unwrap(), vec![SHIFT_SLASH, 35]);
        assert_eq!(expand(127).unwrap(), vec![SHIFT_PERCENT, letter(b'T')]);
        assert!(expand(200).is_none());
    }

    #[test]
    fn test_module_layout() {
        let e = encode("A").unwrap();
        // start + A + C + K + stop + termination bar
        assert_eq!(e.modules.len(), 5 * 6 + 1);
        assert_eq!(e.modules.iter().sum::<u32>(), 5 * 9 + 1);
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(encode("caf\u{e9}").is_none());
        assert!(encode("").is_none());
    }
}
