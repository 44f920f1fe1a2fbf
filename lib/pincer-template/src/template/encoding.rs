//! Percent-encoding for template literals and expanded values.
//!
//! Existing `%XX` triplets are never re-encoded, so expanding an already
//! encoded value, or re-parsing an expanded uri, is stable.

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};

use super::Encoding;

/// Escaped in literal template text. Reserved characters pass through.
const LITERAL_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Everything but unreserved characters, sub-delims, `:`, `@` and `/`.
const PATH_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/');

const PATH_VALUE_SLASH_ENCODE_SET: &AsciiSet = &PATH_VALUE_ENCODE_SET.add(b'/');

/// Path set plus the characters that delimit query pairs.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &PATH_VALUE_ENCODE_SET.add(b'&').add(b'=').add(b'+');

const QUERY_VALUE_SLASH_ENCODE_SET: &AsciiSet = &QUERY_VALUE_ENCODE_SET.add(b'/');

pub(super) fn encode_literal(text: &str, encoding: Encoding) -> String {
    match encoding {
        Encoding::Path { .. } | Encoding::Query { .. } => encode(text, LITERAL_ENCODE_SET),
        Encoding::None => text.to_string(),
    }
}

pub(super) fn encode_value(value: &str, encoding: Encoding) -> String {
    match encoding {
        Encoding::Path { encode_slash: false } => encode(value, PATH_VALUE_ENCODE_SET),
        Encoding::Path { encode_slash: true } => encode(value, PATH_VALUE_SLASH_ENCODE_SET),
        Encoding::Query { encode_slash: false } => encode(value, QUERY_VALUE_ENCODE_SET),
        Encoding::Query { encode_slash: true } => encode(value, QUERY_VALUE_SLASH_ENCODE_SET),
        Encoding::None => value.to_string(),
    }
}

/// Percent-encode `value` with `set`, copying valid `%XX` triplets verbatim.
/// A stray `%` becomes `%25`.
fn encode(value: &str, set: &'static AsciiSet) -> String {
    let mut encoded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some((head, tail)) = rest.split_once('%') {
        encoded.extend(utf8_percent_encode(head, set));
        let hex = tail.get(..2).filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()));
        match hex {
            Some(hex) => {
                encoded.push('%');
                encoded.push_str(hex);
                rest = tail.get(2..).unwrap_or_default();
            }
            None => {
                encoded.push_str("%25");
                rest = tail;
            }
        }
    }
    encoded.extend(utf8_percent_encode(rest, set));

    encoded
}
