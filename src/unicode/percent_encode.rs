use crate::compat::{String, Vec};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Encode sets of the WHATWG URL Standard
// Based on https://url.spec.whatwg.org/#percent-encoded-bytes

/// C0 control percent-encode set (opaque paths, opaque hosts)
pub const C0_CONTROL_SET: &AsciiSet = CONTROLS;

/// Fragment percent-encode set
/// C0 control + space, ", <, >, \`
pub const FRAGMENT_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Query percent-encode set (for non-special URLs)
/// C0 control + space, ", #, <, >
pub const QUERY_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Special-query percent-encode set: query set + '
pub const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

/// Path percent-encode set
/// Query set + ?, ^, \`, {, }
pub const PATH_SET: &AsciiSet = &QUERY_SET
    .add(b'?')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Userinfo percent-encode set
/// Path + /, :, ;, =, @, [, \, ], |
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Write percent-encoded string directly to buffer
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode a single code point into buffer
pub fn percent_encode_char_into(buffer: &mut String, c: char, encode_set: &'static AsciiSet) {
    let mut utf8 = [0u8; 4];
    percent_encode_into(buffer, c.encode_utf8(&mut utf8), encode_set);
}

/// Percent-encode for userinfo
pub fn percent_encode_userinfo(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    percent_encode_into(&mut encoded, input, USERINFO_SET);
    encoded
}

/// Percent-decode to raw bytes. Malformed escapes pass through untouched.
pub fn percent_decode_bytes(input: &str) -> Vec<u8> {
    percent_encoding::percent_decode_str(input).collect()
}

/// Check that every `%` starts a two-hex-digit escape
pub fn has_only_valid_escapes(input: &str) -> bool {
    let bytes = input.as_bytes();
    memchr::memchr_iter(b'%', bytes).all(|pos| {
        bytes.get(pos + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(pos + 2).is_some_and(u8::is_ascii_hexdigit)
    })
}
