use crate::character_sets::is_forbidden_domain_code_point;
use crate::compat::{Cow, String};
use crate::error::{ParseError, Result};

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if any label of the domain is Punycode (xn-- prefix, case insensitive)
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }

    is_punycode_prefix(bytes)
        || memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Domain to ASCII with the URL Standard's (non-strict) UTS #46 flags,
/// followed by the forbidden domain code point check.
pub fn domain_to_ascii(domain: &str) -> Result<String> {
    // Plain ASCII labels only need lowercasing; Punycode labels still go
    // through IDNA so that bogus ones get rejected
    let ascii = if domain.is_ascii() && !has_punycode(domain) {
        domain.to_ascii_lowercase()
    } else if domain.split('.').any(|label| label.eq_ignore_ascii_case("xn--")) {
        return Err(ParseError::IdnaError);
    } else {
        idna::domain_to_ascii(domain).map_err(|_| ParseError::IdnaError)?
    };

    if ascii.is_empty() {
        return Err(ParseError::IdnaError);
    }
    if ascii.chars().any(is_forbidden_domain_code_point) {
        return Err(ParseError::InvalidDomainCharacter);
    }
    Ok(ascii)
}

/// Domain to Unicode, for Unicode origin serialization.
/// Labels that fail to decode are left as they were.
pub fn domain_to_unicode(domain: &str) -> Cow<'_, str> {
    if !has_punycode(domain) {
        return Cow::Borrowed(domain);
    }
    let (unicode, _errors) = idna::domain_to_unicode(domain);
    Cow::Owned(unicode)
}
