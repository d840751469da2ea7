//! Interleaved 2 of 5.

use super::Encoded;

/// Five elements per digit, `1` marks a wide element.
const PATTERNS: [&[u8; 5]; 10] = [
    b"00110", b"10001", b"01001", b"11000", b"00101",
    b"10100", b"01100", b"00011", b"10010", b"01010",
];

const START: [u32; 4] = [1, 1, 1, 1];
const STOP: [u32; 3] = [2, 1, 1];

fn width(flag: u8) -> u32 {
    if flag == b'1' { 2 } else { 1 }
}

/// Encode an even-length digit string. The first digit of each pair sets
/// the bar widths, the second the space widths.
pub(super) fn encode(data: &str) -> Option<Encoded> {
    let bytes = data.as_bytes();
    if bytes.is_empty() || bytes.len() % 2 != 0 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let mut modules = Vec::with_capacity(bytes.len() * 5 + 7);
    modules.extend(START);
    for pair in bytes.chunks(2) {
        let bars = PATTERNS[(pair[0] - b'0') as usize];
        let spaces = PATTERNS[(pair[1] - b'0') as usize];
        for k in 0..5 {
            modules.push(width(bars[k]));
            modules.push(width(spaces[k]));
        }
    }
    modules.extend(STOP);

    Some(Encoded {
        modules,
        text: data.to_string(),
        check: None,
    })
}
