//! UPC-A, UPC-E, EAN-13 and EAN-8.

use super::{Checksum, Encoded};

/// Left-hand odd parity (L) widths, space first. Right-hand (R) codes use the
/// same widths bar first; even parity (G) codes are the reversed widths.
const L_CODES: [[u32; 4]; 10] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
];

/// EAN-13 left-half parity, keyed by the leading digit.
const EAN13_PARITY: [&[u8; 6]; 10] = [
    b"LLLLLL", b"LLGLGG", b"LLGGLG", b"LLGGGL", b"LGLLGG",
    b"LGGLLG", b"LGGGLL", b"LGLGLG", b"LGLGGL", b"LGGLGL",
];

/// UPC-E parity for number system 0, keyed by the check digit.
/// Number system 1 swaps L and G.
const UPCE_PARITY: [&[u8; 6]; 10] = [
    b"GGGLLL", b"GGLGLL", b"GGLLGL", b"GGLLLG", b"GLGGLL",
    b"GLLGGL", b"GLLLGG", b"GLGLGL", b"GLGLLG", b"GLLGLG",
];

const GUARD: [u32; 3] = [1, 1, 1];
const CENTER: [u32; 5] = [1, 1, 1, 1, 1];
const UPCE_END: [u32; 6] = [1, 1, 1, 1, 1, 1];

fn digits(data: &str) -> Option<Vec<u8>> {
    data.bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

/// Mod 10 check digit with weights 3, 1, 3, ... counted from the rightmost
/// data digit. This is the (3,1) weighting of UPC-A and the (1,3) weighting
/// of EAN-13/EAN-8 read from the left.
pub(super) fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn push_digit(modules: &mut Vec<u32>, digit: u8, parity: u8) {
    let code = L_CODES[digit as usize];
    if parity == b'G' {
        modules.extend(code.iter().rev());
    } else {
        modules.extend(code);
    }
}

fn text_of(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Take `len - 1` data digits from a payload of `len - 1` or `len` digits
/// and append a freshly computed check digit.
fn with_check(data: &str, len: usize) -> Option<(Vec<u8>, u8)> {
    let mut d = digits(data)?;
    if d.len() != len && d.len() != len - 1 {
        return None;
    }
    d.truncate(len - 1);
    let check = check_digit(&d);
    d.push(check);
    Some((d, check))
}

fn ean13_modules(full: &[u8]) -> Vec<u32> {
    let parity = EAN13_PARITY[full[0] as usize];
    let mut modules = Vec::with_capacity(59);
    modules.extend(GUARD);
    for (i, &d) in full[1..7].iter().enumerate() {
        push_digit(&mut modules, d, parity[i]);
    }
    modules.extend(CENTER);
    for &d in &full[7..13] {
        push_digit(&mut modules, d, b'R');
    }
    modules.extend(GUARD);
    modules
}

/// EAN-13 from 12 or 13 digits.
pub(super) fn ean13(data: &str) -> Option<Encoded> {
    let (full, check) = with_check(data, 13)?;
    Some(Encoded {
        modules: ean13_modules(&full),
        text: text_of(&full),
        check: Some(Checksum::Digit { value: check }),
    })
}

/// UPC-A from 11 or 12 digits. Encoded as EAN-13 with a leading zero.
pub(super) fn upc_a(data: &str) -> Option<Encoded> {
    let (full, check) = with_check(data, 12)?;
    let mut ean = Vec::with_capacity(13);
    ean.push(0);
    ean.extend(&full);
    Some(Encoded {
        modules: ean13_modules(&ean),
        text: text_of(&full),
        check: Some(Checksum::Digit { value: check }),
    })
}

/// EAN-8 from 7 or 8 digits.
pub(super) fn ean8(data: &str) -> Option<Encoded> {
    let (full, check) = with_check(data, 8)?;
    let mut modules = Vec::with_capacity(43);
    modules.extend(GUARD);
    for &d in &full[0..4] {
        push_digit(&mut modules, d, b'L');
    }
    modules.extend(CENTER);
    for &d in &full[4..8] {
        push_digit(&mut modules, d, b'R');
    }
    modules.extend(GUARD);
    Some(Encoded {
        modules,
        text: text_of(&full),
        check: Some(Checksum::Digit { value: check }),
    })
}

/// Expand the six UPC-E digits to the eleven UPC-A data digits.
fn expand_upc_e(ns: u8, d: &[u8]) -> Vec<u8> {
    let mut a = vec![ns];
    match d[5] {
        0..=2 => a.extend([d[0], d[1], d[5], 0, 0, 0, 0, d[2], d[3], d[4]]),
        3 => a.extend([d[0], d[1], d[2], 0, 0, 0, 0, 0, d[3], d[4]]),
        4 => a.extend([d[0], d[1], d[2], d[3], 0, 0, 0, 0, 0, d[4]]),
        _ => a.extend([d[0], d[1], d[2], d[3], d[4], 0, 0, 0, 0, d[5]]),
    }
    a
}

/// UPC-E from 6 digits (number system 0), 7 digits (number system first)
/// or 8 digits (trailing check digit discarded).
pub(super) fn upc_e(data: &str) -> Option<Encoded> {
    let d = digits(data)?;
    let (ns, body) = match d.len() {
        6 => (0, &d[..]),
        7 | 8 => (d[0], &d[1..7]),
        _ => return None,
    };
    if ns > 1 {
        return None;
    }

    let check = check_digit(&expand_upc_e(ns, body));
    let parity = UPCE_PARITY[check as usize];

    let mut modules = Vec::with_capacity(33);
    modules.extend(GUARD);
    for (i, &digit) in body.iter().enumerate() {
        let p = match (ns, parity[i]) {
            (1, b'G') => b'L',
            (1, _) => b'G',
            (_, p) => p,
        };
        push_digit(&mut modules, digit, p);
    }
    modules.extend(UPCE_END);

    let mut full = vec![ns];
    full.extend(body);
    full.push(check);
    Some(Encoded {
        modules,
        text: text_of(&full),
        check: Some(Checksum::Digit { value: check }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Weighted sum over the full number, check digit included.
    fn verifies(text: &str) -> bool {
        let d = digits(text).unwrap();
        let sum: u32 = d
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &x)| u32::from(x) * if i % 2 == 0 { 1 } else { 3 })
            .sum();
        sum % 10 == 0
    }

    #[test]
    fn test_ean13_check_digit() {
        let e = ean13("590123412345").unwrap();
        assert_eq!(e.text, "5901234123457");
        assert_eq!(e.check, Some(Checksum::Digit { value: 7 }));
        assert!(verifies(&e.text));
    }

    #[test]
    fn test_ean13_recomputes_supplied_check() {
        let e = ean13("5901234123450").unwrap();
        assert_eq!(e.text, "5901234123457");
    }

    #[test]
    fn test_ean13_module_count() {
        let e = ean13("4901234567894").unwrap();
        // 95 modules: 3 + 6*7 + 5 + 6*7 + 3
        assert_eq!(e.modules.iter().sum::<u32>(), 95);
        assert_eq!(e.modules.len(), 59);
        assert!(verifies(&e.text));
    }

    #[test]
    fn test_upc_a() {
        let e = upc_a("03600029145").unwrap();
        assert_eq!(e.text, "036000291452");
        assert!(verifies(&e.text));
        assert_eq!(e.modules.iter().sum::<u32>(), 95);
    }

    #[test]
    fn test_ean8() {
        let e = ean8("9638507").unwrap();
        assert_eq!(e.text, "96385074");
        assert!(verifies(&e.text));
        assert_eq!(e.modules.iter().sum::<u32>(), 67);
    }

    #[test]
    fn test_upc_e_expansion_and_check() {
        let e = upc_e("0425261").unwrap();
        assert_eq!(e.text, "04252614");
        assert_eq!(e.check, Some(Checksum::Digit { value: 4 }));
        assert_eq!(expand_upc_e(0, &[4, 2, 5, 2, 6, 1]), vec![0, 4, 2, 1, 0, 0, 0, 0, 5, 2, 6]);
        // 3 + 6*7 + 6
        assert_eq!(e.modules.iter().sum::<u32>(), 51);
    }

    #[test]
    fn test_upc_e_rules() {
        assert_eq!(expand_upc_e(0, &[1, 2, 3, 4, 5, 3]), vec![0, 1, 2, 3, 0, 0, 0, 0, 0, 4, 5]);
        assert_eq!(expand_upc_e(0, &[1, 2, 3, 4, 5, 4]), vec![0, 1, 2, 3, 4, 0, 0, 0, 0, 0, 5]);
        assert_eq!(expand_upc_e(1, &[1, 2, 3, 4, 5, 7]), vec![1, 1, 2, 3, 4, 5, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn test_upc_e_six_digits_implies_number_system_zero() {
        assert_eq!(upc_e("425261").unwrap().text, "04252614");
    }

    #[test]
    fn test_upc_e_invalid() {
        assert!(upc_e("12345").is_none());
        assert!(upc_e("123456789").is_none());
        assert!(upc_e("2425261").is_none());
        assert!(upc_e("04a5261").is_none());
    }

    #[test]
    fn test_upc_e_number_system_one_swaps_parity() {
        let zero = upc_e("0425261").unwrap();
        let one = upc_e("1425261").unwrap();
        assert_ne!(zero.modules, one.modules);
        assert_eq!(one.modules.iter().sum::<u32>(), 51);
    }

    #[test]
    fn test_wrong_lengths() {
        assert!(ean13("12345678901").is_none());
        assert!(upc_a("1234567890").is_none());
        assert!(ean8("123456").is_none());
    }
}
