//! Property blocks: `{key:value; key:value}`.
//!
//! A block occupies a whole column. Members are separated by `;` (escape a
//! literal one as `\;`), keys are identifiers and may be abbreviated to one
//! letter:
//!
//! | Key       | Short | Value                                           |
//! |-----------|-------|-------------------------------------------------|
//! | `align`   | `a`   | `left`, `center`, `right`                       |
//! | `border`  | `b`   | `line`, `space`, `none`, `0`-`2`                |
//! | `code`    | `c`   | barcode or QR payload                           |
//! | `image`   | `i`   | base64 PNG                                      |
//! | `option`  | `o`   | symbology, module, height, `hri`, cell, level   |
//! | `text`    | `t`   | `wrap`, `nowrap`                                |
//! | `width`   | `w`   | `auto` or a list of cell counts and `*`         |
//! | `command` | `x`   | raw device command                              |
//! | `comment` | `_`   | ignored                                         |

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::escape;
use super::types::{BORDER_LINE, CodeOptions, FLEXIBLE, LineAlign};
use crate::barcode::{QrLevel, Symbology};

static MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\t ]*([A-Za-z_][A-Za-z0-9_]*)[\t ]*:[\t ]*([^\t ].*?)[\t ]*$")
        .expect("member pattern is valid")
});

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ,]+").expect("separator pattern is valid"));

/// Largest column width a `width` token can ask for.
pub const MAX_WIDTH: i32 = u16::MAX as i32;

/// Parsed members of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBlock {
    /// Full key name to decoded value. A repeated key keeps its last value.
    pub members: BTreeMap<String, String>,
    /// A non-blank member did not have the `key: value` shape.
    pub error: bool,
}

impl PropertyBlock {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.members.get(key).map(String::as_str)
    }
}

/// Whether a trimmed column is a property block.
pub fn is_block(column: &str) -> bool {
    column.len() >= 2
        && column.starts_with('{')
        && column.ends_with('}')
        && !column[1..column.len() - 1].contains(['{', '}'])
}

/// Parse the body of a block (including its braces).
pub fn parse_block(block: &str) -> PropertyBlock {
    let inner = &block[1..block.len() - 1];
    let mut result = PropertyBlock::default();
    for member in escape::protect_semicolons(inner).split(';') {
        if member.chars().all(|c| c == ' ' || c == '\t') {
            continue;
        }
        match MEMBER.captures(member) {
            Some(caps) => {
                let key = expand_key(&caps[1]);
                let value = escape::decode(&caps[2].replace(r"\n", "\n"));
                result.members.insert(key.to_string(), value);
            }
            None => result.error = true,
        }
    }
    result
}

fn expand_key(key: &str) -> &str {
    match key {
        "a" => "align",
        "b" => "border",
        "c" => "code",
        "i" => "image",
        "o" => "option",
        "t" => "text",
        "w" => "width",
        "x" => "command",
        "_" => "comment",
        other => other,
    }
}

fn tokens(value: &str) -> Vec<String> {
    TOKEN_SEPARATOR
        .split(&value.to_lowercase())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decimal digits to a number, saturating at `u32::MAX`.
fn number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.parse().unwrap_or(u32::MAX))
}

/// `border` value to a border width.
pub fn parse_border(value: &str) -> i32 {
    match value.to_lowercase().as_str() {
        "line" => BORDER_LINE,
        "space" => 1,
        "none" => 0,
        other => match number(other) {
            Some(n) if n <= 2 => n as i32,
            _ => 1,
        },
    }
}

/// `width` value to a width list. `auto` anywhere yields an empty list.
pub fn parse_widths(value: &str) -> Vec<i32> {
    let tokens = tokens(value);
    if tokens.iter().any(|t| t == "auto") {
        return Vec::new();
    }
    tokens
        .iter()
        .map(|t| {
            if t == "*" {
                FLEXIBLE
            } else {
                number(t).map_or(0, |n| n.min(MAX_WIDTH as u32) as i32)
            }
        })
        .collect()
}

pub fn parse_align(value: &str) -> LineAlign {
    match value.to_lowercase().as_str() {
        "left" => LineAlign::Left,
        "right" => LineAlign::Right,
        _ => LineAlign::Center,
    }
}

/// `text` value to the wrap flag.
pub fn parse_wrap(value: &str) -> bool {
    value.to_lowercase() != "nowrap"
}

/// `option` value to a fresh option set. Every setting not named falls back
/// to its default.
pub fn parse_option(value: &str, quiet_zone: bool) -> CodeOptions {
    let tokens = tokens(value);
    let first_number = |range: std::ops::RangeInclusive<u32>, default: u32| {
        tokens
            .iter()
            .filter_map(|t| number(t))
            .find(|n| range.contains(n))
            .unwrap_or(default)
    };
    CodeOptions {
        symbology: tokens
            .iter()
            .find_map(|t| Symbology::from_keyword(t))
            .unwrap_or(Symbology::Code128),
        module: first_number(2..=4, 2),
        height: first_number(24..=240, 72),
        hri: tokens.iter().any(|t| t == "hri"),
        cell: first_number(3..=8, 3),
        level: tokens
            .iter()
            .find_map(|t| QrLevel::from_letter(t))
            .unwrap_or(QrLevel::L),
        quiet_zone,
    }
}

/// Keep only base64 characters before any padding, then repair the padding.
pub fn sanitize_image(value: &str) -> String {
    let body = value.split('=').next().unwrap_or_default();
    let mut data: String = body
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+' || *c == '/')
        .collect();
    match data.len() % 4 {
        1 => {
            data.pop();
        }
        2 => data.push_str("=="),
        3 => data.push('='),
        _ => {}
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_block() {
        assert!(is_block("{width:*}"));
        assert!(is_block("{}"));
        assert!(!is_block("{a{b}"));
        assert!(!is_block("{open"));
        assert!(!is_block("text"));
    }

    #[test]
    fn test_parse_block_abbreviations() {
        let block = parse_block("{w:10 *; b:line; a:right}");
        assert!(!block.error);
        assert_eq!(block.get("width"), Some("10 *"));
        assert_eq!(block.get("border"), Some("line"));
        assert_eq!(block.get("align"), Some("right"));
    }

    #[test]
    fn test_parse_block_escapes() {
        let block = parse_block(r"{comment: a\;b; command: x\ny; code: \x41}");
        assert_eq!(block.get("comment"), Some("a;b"));
        assert_eq!(block.get("command"), Some("x\ny"));
        assert_eq!(block.get("code"), Some("A"));
    }

    #[test]
    fn test_parse_block_error_keeps_valid_members() {
        let block = parse_block("{border:line; nonsense; ;}");
        assert!(block.error);
        assert_eq!(block.get("border"), Some("line"));
    }

    #[test]
    fn test_parse_border() {
        assert_eq!(parse_border("line"), -1);
        assert_eq!(parse_border("SPACE"), 1);
        assert_eq!(parse_border("none"), 0);
        assert_eq!(parse_border("2"), 2);
        assert_eq!(parse_border("3"), 1);
        assert_eq!(parse_border("thick"), 1);
    }

    #[test]
    fn test_parse_widths() {
        assert_eq!(parse_widths("auto"), Vec::<i32>::new());
        assert_eq!(parse_widths("* 10 x"), vec![-1, 10, 0]);
        assert_eq!(parse_widths("8,*"), vec![8, -1]);
    }

    #[test]
    fn test_parse_widths_comma_and_space() {
        assert_eq!(parse_widths("10, *"), vec![10, -1]);
        assert_eq!(parse_widths(" 8 ,* "), vec![8, -1]);
        assert_eq!(parse_widths("4,,\t6"), vec![4, 6]);
    }

    #[test]
    fn test_parse_widths_clamped() {
        assert_eq!(parse_widths("2147483647 2147483648"), vec![MAX_WIDTH, MAX_WIDTH]);
        assert_eq!(parse_widths("99999999999999999999 *"), vec![MAX_WIDTH, -1]);
    }

    #[test]
    fn test_parse_option() {
        let option = parse_option("ean 3 100 hri", false);
        assert_eq!(option.symbology, Symbology::Ean);
        assert_eq!(option.module, 3);
        assert_eq!(option.height, 100);
        assert!(option.hri);

        let option = parse_option("qrcode 5 h", true);
        assert_eq!(option.symbology, Symbology::QrCode);
        assert_eq!(option.cell, 5);
        assert_eq!(option.level, QrLevel::H);
        assert!(option.quiet_zone);
    }

    #[test]
    fn test_parse_option_defaults() {
        let option = parse_option("nohri 1 999", false);
        assert_eq!(option, CodeOptions::default());
    }

    #[test]
    fn test_sanitize_image() {
        assert_eq!(sanitize_image("QUJD"), "QUJD");
        assert_eq!(sanitize_image("QU JD RA"), "QUJDRA==");
        assert_eq!(sanitize_image("QUJDRA="), "QUJDRA==");
        assert_eq!(sanitize_image("QUJDR"), "QUJD");
        assert_eq!(sanitize_image("QUJDREU=junk"), "QUJDREU=");
    }
}
