//! Backslash escapes.
//!
//! Delimiter characters escaped with a backslash are turned into `\xHH`
//! placeholders before any splitting happens, so they never act as
//! delimiters. [`decode`] turns placeholders back into characters once the
//! structure of the line is known.

/// Replace `\\`, `\{`, `\|` and `\}` with hex placeholders.
pub fn protect_delimiters(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '\\' | '{' | '|' | '}') {
                    chars.next();
                    push_hex(&mut out, next);
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Replace `\;` with a hex placeholder inside a property block.
pub fn protect_semicolons(block: &str) -> String {
    block.replace(r"\;", r"\x3b")
}

/// Prepare a text column for splitting into segments.
///
/// Control characters (raw or as `\x00`-`\x1f` / `\x7f` placeholders) are
/// removed, escaped decoration characters become placeholders, `\n` becomes
/// a line feed and `~` becomes a space.
pub fn prepare_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().filter(|c| !is_control(*c)).collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            match chars.get(i + 1) {
                Some('x') if is_control_placeholder(chars.get(i + 2), chars.get(i + 3)) => {
                    i += 4;
                    continue;
                }
                Some(&next) if matches!(next, '-' | '=' | '_' | '"' | '`' | '^' | '~') => {
                    push_hex(&mut out, next);
                    i += 2;
                    continue;
                }
                Some('n') => {
                    out.push('\n');
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }
        out.push(if c == '~' { ' ' } else { c });
        i += 1;
    }
    out
}

/// Decode escapes in a literal run.
///
/// `\xHH` becomes the character with that code. A malformed `\x` loses
/// only the `\x` itself; a trailing backslash and any other backslash pair
/// are removed.
pub fn decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            None => i += 1,
            Some('x') => {
                let hi = chars.get(i + 2).and_then(|c| c.to_digit(16));
                let lo = chars.get(i + 3).and_then(|c| c.to_digit(16));
                match hi.zip(lo).and_then(|(hi, lo)| char::from_u32(hi * 16 + lo)) {
                    Some(decoded) => {
                        out.push(decoded);
                        i += 4;
                    }
                    None => i += 2,
                }
            }
            Some(_) => i += 2,
        }
    }
    out
}

fn push_hex(out: &mut String, c: char) {
    out.push_str(&format!("\\x{:02x}", c as u32));
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{1f}' | '\u{7f}')
}

fn is_control_placeholder(hi: Option<&char>, lo: Option<&char>) -> bool {
    match (hi, lo) {
        (Some('0' | '1'), Some(lo)) => lo.is_ascii_hexdigit(),
        (Some('7'), Some('f' | 'F')) => true,
        _ => false,
    }
}
