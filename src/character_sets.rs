/// Check if a character is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// C0 control or space (trimmed from both ends of URL input)
pub fn is_c0_control_or_space(c: char) -> bool {
    c <= ' '
}

/// Scheme code points after the first one
pub fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Host code point classification
/// Bit 0: forbidden host code point, bit 1: forbidden domain code point
const HOST_CHAR_TABLE: [u8; 128] = {
    let mut table = [0u8; 128];

    // C0 controls and DEL are forbidden in domains only, except NUL/tab/LF/CR
    let mut i = 0;
    while i < 0x20 {
        table[i] = 2;
        i += 1;
    }
    table[0x7F] = 2;

    let forbidden_host: [u8; 17] = [
        0x00, b'\t', b'\n', b'\r', b' ', b'#', b'/', b':', b'<', b'>', b'?', b'@', b'[', b'\\',
        b']', b'^', b'|',
    ];
    let mut j = 0;
    while j < forbidden_host.len() {
        table[forbidden_host[j] as usize] = 3;
        j += 1;
    }
    table[b'%' as usize] = 2;

    table
};

/// Forbidden host code point (checked on opaque hosts)
pub fn is_forbidden_host_code_point(c: char) -> bool {
    c.is_ascii() && HOST_CHAR_TABLE[c as usize] & 1 != 0
}

/// Forbidden domain code point (checked after domain-to-ASCII)
pub fn is_forbidden_domain_code_point(c: char) -> bool {
    c.is_ascii() && HOST_CHAR_TABLE[c as usize] != 0
}

/// Characters that end the authority of a URL
pub fn is_authority_delimiter(c: char, special: bool) -> bool {
    matches!(c, '/' | '?' | '#') || (special && c == '\\')
}
