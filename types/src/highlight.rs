//! JSON syntax classification for the formalization panel.
//!
//! A single left-to-right pass over the text with explicit character
//! classes (outside-string, in-string, number, bare word) instead of a
//! regex engine. Malformed near-JSON never fails or loops: whatever cannot
//! be classified is carried through as [`TokenKind::Punct`], and
//! concatenating the token texts always reconstructs the input
//! byte-for-byte.

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// String literal followed by a colon (an object key). The colon and
    /// any whitespace before it are absorbed into the token.
    Key,
    /// Any other string literal.
    Str,
    Number,
    Bool,
    Null,
    /// Structure, whitespace, and anything unclassifiable.
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// Escape the three markup-significant characters (`&`, `<`, `>`).
///
/// On the markup path this runs before tokenization, so classification
/// markers can never be confused with payload text.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Tokenize `input` in a single pass.
///
/// A string literal followed by optional whitespace and a colon is a
/// [`TokenKind::Key`]; the whitespace and colon are part of the token, as
/// in the pattern this lexer replaces. A string *value* containing
/// quote-colon sequences is consumed as one string token first, so only
/// pathological inputs are classified best-effort.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut punct_start = 0;
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        if ch == '"' {
            let string_len = scan_string(rest);
            let (kind, len) = classify_string(rest, string_len);
            flush_punct(&mut tokens, input, punct_start, i);
            tokens.push(Token {
                kind,
                text: rest[..len].to_string(),
            });
            i += len;
            punct_start = i;
        } else if ch == '-' || ch.is_ascii_digit() {
            if let Some(len) = scan_number(rest) {
                flush_punct(&mut tokens, input, punct_start, i);
                tokens.push(Token {
                    kind: TokenKind::Number,
                    text: rest[..len].to_string(),
                });
                i += len;
                punct_start = i;
            } else {
                // A bare minus: stays in the surrounding punct run.
                i += ch.len_utf8();
            }
        } else if ch.is_ascii_alphabetic() {
            let len = scan_word(rest);
            let kind = match &rest[..len] {
                "true" | "false" => Some(TokenKind::Bool),
                "null" => Some(TokenKind::Null),
                _ => None,
            };
            if let Some(kind) = kind {
                flush_punct(&mut tokens, input, punct_start, i);
                tokens.push(Token {
                    kind,
                    text: rest[..len].to_string(),
                });
                i += len;
                punct_start = i;
            } else {
                i += len;
            }
        } else {
            i += ch.len_utf8();
        }
    }

    flush_punct(&mut tokens, input, punct_start, input.len());
    tokens
}

/// Escape, tokenize, and wrap each classified token in a span marker.
///
/// Stripping the markers from the result reconstructs the escaped input
/// exactly; `Punct` tokens pass through unwrapped.
#[must_use]
pub fn highlight(json_text: &str) -> String {
    let escaped = escape(json_text);
    let mut out = String::with_capacity(escaped.len());
    for token in tokenize(&escaped) {
        match marker_class(token.kind) {
            Some(class) => {
                out.push_str("<span class=\"");
                out.push_str(class);
                out.push_str("\">");
                out.push_str(&token.text);
                out.push_str("</span>");
            }
            None => out.push_str(&token.text),
        }
    }
    out
}

const fn marker_class(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Key => Some("json-key"),
        TokenKind::Str => Some("json-string"),
        TokenKind::Number => Some("json-number"),
        TokenKind::Bool => Some("json-boolean"),
        TokenKind::Null => Some("json-null"),
        TokenKind::Punct => None,
    }
}

fn flush_punct(tokens: &mut Vec<Token>, input: &str, start: usize, end: usize) {
    if start < end {
        tokens.push(Token {
            kind: TokenKind::Punct,
            text: input[start..end].to_string(),
        });
    }
}

/// Byte length of the string literal at the start of `s` (which begins
/// with `"`), including both quotes. A backslash escapes the next
/// character. An unterminated literal consumes the rest of `s`.
fn scan_string(s: &str) -> usize {
    let mut chars = s.char_indices();
    chars.next(); // opening quote

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '"' => return idx + 1,
            _ => {}
        }
    }

    s.len()
}

/// Decide Key vs Str for the string literal of byte length `string_len`
/// at the start of `s`, absorbing trailing whitespace and colon into a
/// Key token.
fn classify_string(s: &str, string_len: usize) -> (TokenKind, usize) {
    let bytes = s.as_bytes();
    let mut j = string_len;
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    if j < bytes.len() && bytes[j] == b':' {
        (TokenKind::Key, j + 1)
    } else {
        (TokenKind::Str, string_len)
    }
}

/// Byte length of the numeric literal at the start of `s`, or `None` if
/// `s` starts with a minus that no digit follows.
///
/// Grammar: optional minus, digits, optional `.` with any (possibly zero)
/// digits, optional exponent consumed only when it carries digits.
fn scan_number(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = usize::from(bytes[0] == b'-');

    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exponent_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent_digits {
            i = j;
        }
    }

    Some(i)
}

/// Byte length of the bare word at the start of `s`. Runs of word
/// characters keep `true1` or `null_check` from classifying.
fn scan_word(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}
