use crate::ipv4::parse_ipv4_number;

/// Check whether a domain "ends in a number" and must go through the IPv4 parser.
/// A single trailing dot is ignored.
pub fn ends_in_a_number(input: &str) -> bool {
    let input = match input.strip_suffix('.') {
        Some("") => return false,
        Some(rest) => rest,
        None => input,
    };

    let last = input.rsplit('.').next().unwrap_or(input);
    if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }

    parse_ipv4_number(last).is_ok()
}

/// Parse the digits collected by the port state.
/// Leading zeros are accepted; values above 65535 are rejected.
pub fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = port.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    if digits.len() > 5 {
        return None;
    }
    digits.parse::<u16>().ok()
}

/// Two code points: an ASCII letter followed by `:` or `|`
pub fn is_windows_drive_letter(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphabetic() && matches!(b[1], b':' | b'|')
}

/// Windows drive letter whose second code point is `:`
pub fn is_normalized_windows_drive_letter(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

/// Code points starting at `pos` begin with a drive letter that is followed
/// by nothing or by `/`, `\`, `?` or `#`.
pub fn starts_with_windows_drive_letter(chars: &[char], pos: usize) -> bool {
    let Some(rest) = chars.get(pos..) else {
        return false;
    };
    if rest.len() < 2 || !rest[0].is_ascii_alphabetic() || !matches!(rest[1], ':' | '|') {
        return false;
    }
    rest.len() == 2 || matches!(rest[2], '/' | '\\' | '?' | '#')
}

/// `.` or `%2e` (ASCII case-insensitive)
pub fn is_single_dot_segment(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

/// `..` in any mix of literal and percent-encoded dots
pub fn is_double_dot_segment(segment: &str) -> bool {
    matches!(segment.len(), 2 | 4 | 6)
        && (segment == ".."
            || segment.eq_ignore_ascii_case(".%2e")
            || segment.eq_ignore_ascii_case("%2e.")
            || segment.eq_ignore_ascii_case("%2e%2e"))
}
