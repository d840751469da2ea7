//! Code 128 with automatic code set selection.
//!
//! The encoder is a three-state machine over code sets A, B and C:
//!
//! | In set | Next input | Action |
//! |--------|------------|--------|
//! | any | 4+ digits remain (A/B) | odd run: one digit in place, then Code C |
//! | C | 2+ digits remain | digit pair |
//! | C | otherwise | Code A/B, whichever the lookahead prefers |
//! | A/B | character in set | emit |
//! | A/B | lone out-of-set character | Shift + character |
//! | A/B | 2+ out-of-set characters | Code B/A |

use super::{Checksum, Encoded, pattern_widths};

/// Six elements per value (bar first); 106 is the seven-element stop.
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232", "2331112",
];

const SHIFT: u8 = 98;
const CODE_C: u8 = 99;
const CODE_B: u8 = 100;
const CODE_A: u8 = 101;
const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 106;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeSet {
    A,
    B,
    C,
}

impl CodeSet {
    fn start(self) -> u8 {
        match self {
            CodeSet::A => START_A,
            CodeSet::B => START_B,
            CodeSet::C => START_C,
        }
    }

    /// Value that switches into this set.
    fn latch(self) -> u8 {
        match self {
            CodeSet::A => CODE_A,
            CodeSet::B => CODE_B,
            CodeSet::C => CODE_C,
        }
    }

    fn contains(self, b: u8) -> bool {
        match self {
            CodeSet::A => b < 96,
            CodeSet::B => (32..128).contains(&b),
            CodeSet::C => b.is_ascii_digit(),
        }
    }

    /// Value of a single character in set A or B.
    fn value(self, b: u8) -> u8 {
        match self {
            CodeSet::A if b < 32 => b + 64,
            _ => b - 32,
        }
    }

    fn other(self) -> CodeSet {
        if self == CodeSet::A { CodeSet::B } else { CodeSet::A }
    }
}

fn digit_run(data: &[u8], i: usize) -> usize {
    data[i..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// A if a control character comes before any lowercase one, else B.
fn preferred_set(data: &[u8], i: usize) -> CodeSet {
    for &b in &data[i..] {
        if b < 32 {
            return CodeSet::A;
        }
        if b >= 96 {
            return CodeSet::B;
        }
    }
    CodeSet::B
}

/// Start code followed by data values, without check or stop.
fn symbol_values(data: &[u8]) -> Option<Vec<u8>> {
    if data.is_empty() || !data.is_ascii() {
        return None;
    }

    let lead = digit_run(data, 0);
    let mut set = if lead >= 4 || (lead == 2 && data.len() == 2) {
        CodeSet::C
    } else {
        preferred_set(data, 0)
    };

    let mut values = vec![set.start()];
    let mut i = 0;
    while i < data.len() {
        match set {
            CodeSet::C => {
                if digit_run(data, i) >= 2 {
                    values.push((data[i] - b'0') * 10 + (data[i + 1] - b'0'));
                    i += 2;
                } else {
                    set = preferred_set(data, i);
                    values.push(set.latch());
                }
            }
            CodeSet::A | CodeSet::B => {
                let run = digit_run(data, i);
                if run >= 4 {
                    if run % 2 == 1 {
                        values.push(set.value(data[i]));
                        i += 1;
                    }
                    set = CodeSet::C;
                    values.push(CODE_C);
                    continue;
                }

                let b = data[i];
                if set.contains(b) {
                    values.push(set.value(b));
                    i += 1;
                } else {
                    let other = set.other();
                    let next_out = data.get(i + 1).is_some_and(|&n| !set.contains(n));
                    if next_out {
                        set = other;
                        values.push(set.latch());
                    } else {
                        values.push(SHIFT);
                        values.push(other.value(b));
                        i += 1;
                    }
                }
            }
        }
    }
    Some(values)
}

/// Mod 103 sum: start value plus each data value times its position.
fn checksum(values: &[u8]) -> u8 {
    let sum: usize = values
        .iter()
        .enumerate()
        .map(|(i, &v)| usize::from(v) * i.max(1))
        .sum();
    (sum % 103) as u8
}

pub(super) fn encode(data: &str) -> Option<Encoded> {
    let mut values = symbol_values(data.as_bytes())?;
    let check = checksum(&values);
    values.push(check);
    values.push(STOP);

    let modules = values
        .iter()
        .flat_map(|&v| pattern_widths(PATTERNS[usize::from(v)]))
        .collect();

    Some(Encoded {
        modules,
        text: data.to_string(),
        check: Some(Checksum::Mod103 { value: check }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_eleven_modules() {
        for p in &PATTERNS[..106] {
            assert_eq!(pattern_widths(p).sum::<u32>(), 11, "{}", p);
        }
        assert_eq!(pattern_widths(PATTERNS[106]).sum::<u32>(), 13);
    }

    #[test]
    fn test_digits_use_set_c() {
        assert_eq!(symbol_values(b"123456").unwrap(), vec![START_C, 12, 34, 56]);
        assert_eq!(symbol_values(b"12").unwrap(), vec![START_C, 12]);
    }

    #[test]
    fn test_odd_digit_run_leaves_set_c() {
        assert_eq!(
            symbol_values(b"1234567").unwrap(),
            vec![START_C, 12, 34, 56, CODE_B, 23]
        );
    }

    #[test]
    fn test_short_digit_runs_stay_in_b() {
        assert_eq!(symbol_values(b"A12").unwrap(), vec![START_B, 33, 17, 18]);
        assert_eq!(symbol_values(b"123").unwrap(), vec![START_B, 17, 18, 19]);
    }

    #[test]
    fn test_switch_to_c_mid_stream() {
        // odd run: one digit in B, then pairs
        assert_eq!(
            symbol_values(b"X12345").unwrap(),
            vec![START_B, 56, 17, CODE_C, 23, 45]
        );
        assert_eq!(symbol_values(b"X1234").unwrap(), vec![START_B, 56, CODE_C, 12, 34]);
    }

    #[test]
    fn test_single_control_uses_shift() {
        assert_eq!(
            symbol_values(b"ab\tcd").unwrap(),
            vec![START_B, 65, 66, SHIFT, 73, 67, 68]
        );
    }

    #[test]
    fn test_control_run_latches_set_a() {
        assert_eq!(
            symbol_values(b"a\r\n").unwrap(),
            vec![START_B, 65, CODE_A, 77, 74]
        );
        assert_eq!(symbol_values(b"\tA").unwrap(), vec![START_A, 73, 33]);
    }

    #[test]
    fn test_checksum_weights() {
        // "PJJ123C": 104 + 48*1 + 42*2 + 42*3 + 17*4 + 18*5 + 19*6 + 35*7 = 879, 879 mod 103 = 55
        let values = symbol_values(b"PJJ123C").unwrap();
        assert_eq!(values, vec![START_B, 48, 42, 42, 17, 18, 19, 35]);
        assert_eq!(checksum(&values), 55);
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(encode("\u{e9}t\u{e9}").is_none());
        assert!(encode("").is_none());
    }

    #[test]
    fn test_ends_with_stop() {
        let e = encode("Hello").unwrap();
        assert_eq!(&e.modules[e.modules.len() - 7..], &[2, 3, 3, 1, 1, 1, 2]);
    }

    #[test]
    fn test_modules_decode_to_checksum() {
        for data in ["1234567", "Hello, World", "ab\tcd", "X12345", "0"] {
            let e = encode(data).unwrap();
            let body = &e.modules[..e.modules.len() - 7];
            let values: Vec<u8> = body
                .chunks(6)
                .map(|chunk| {
                    let pattern: String = chunk.iter().map(|m| m.to_string()).collect();
                    PATTERNS.iter().position(|p| *p == pattern).unwrap() as u8
                })
                .collect();
            let (check, data_values) = values.split_last().unwrap();
            assert_eq!(checksum(data_values), *check, "{:?}", data);
            assert_eq!(e.check, Some(Checksum::Mod103 { value: *check }));
        }
    }
}
