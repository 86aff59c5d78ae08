//! Host parsing and serialization.
//!
//! Bracketed input is always IPv6. Hosts of special URLs go through
//! percent-decoding, domain-to-ASCII and the IPv4 parser; hosts of other
//! URLs are kept as opaque, percent-encoded strings.

use crate::character_sets::is_forbidden_host_code_point;
use crate::checkers::ends_in_a_number;
use crate::compat::String;
use crate::error::{ParseError, Result};
use crate::ipv4::{parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::parser::{ValidationError, Violations};
use crate::types::SchemeType;
use crate::unicode::idna::domain_to_ascii;
use crate::unicode::percent_encode::{
    C0_CONTROL_SET, has_only_valid_escapes, percent_decode_bytes, percent_encode_into,
};
use core::fmt;

/// A parsed host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// ASCII domain of a special URL
    Domain(String),
    /// IPv4 address
    Ipv4(u32),
    /// IPv6 address as eight 16-bit pieces
    Ipv6([u16; 8]),
    /// Percent-encoded host of a non-special URL
    Opaque(String),
    /// The empty host (`file:///`, `sc:///`)
    Empty,
}

impl Host {
    /// Check if this is the empty host
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Domain hosts compare case-sensitively here; they are already lowercase
    pub fn is_localhost(&self) -> bool {
        matches!(self, Self::Domain(domain) if domain == "localhost")
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(domain) | Self::Opaque(domain) => f.write_str(domain),
            Self::Ipv4(address) => f.write_str(&serialize_ipv4(*address)),
            Self::Ipv6(pieces) => write!(f, "[{}]", serialize_ipv6(pieces)),
            Self::Empty => Ok(()),
        }
    }
}

/// Parse `input` as the host of a URL whose scheme is `scheme_type`.
///
/// # Errors
///
/// Fails on malformed IPv6, forbidden code points, IDNA failure, an empty
/// host for a special non-file scheme, and input that ends in a number but
/// is not a valid IPv4 address.
pub fn parse_host(
    input: &str,
    scheme_type: SchemeType,
    violations: &mut Violations,
) -> Result<Host> {
    if let Some(inner) = input.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            violations.record(ValidationError::IPv6Unclosed);
            return Err(ParseError::InvalidIpv6);
        };
        return parse_ipv6(inner, violations).map(Host::Ipv6);
    }

    if !scheme_type.is_special() {
        return parse_opaque_host(input, violations);
    }

    if input.is_empty() {
        if scheme_type == SchemeType::File {
            return Ok(Host::Empty);
        }
        violations.record(ValidationError::HostMissing);
        return Err(ParseError::HostMissing);
    }

    let decoded = percent_decode_bytes(input);
    let domain = String::from_utf8_lossy(&decoded);

    let ascii = domain_to_ascii(&domain).inspect_err(|_| {
        violations.record(ValidationError::DomainToAscii);
    })?;

    if ends_in_a_number(&ascii) {
        return parse_ipv4(&ascii, violations).map(Host::Ipv4);
    }

    Ok(Host::Domain(ascii))
}

/// Opaque host: only forbidden host code points are rejected; everything
/// else is kept, with C0 controls and non-ASCII percent-encoded.
fn parse_opaque_host(input: &str, violations: &mut Violations) -> Result<Host> {
    if input.chars().any(is_forbidden_host_code_point) {
        violations.record(ValidationError::HostInvalidCodePoint);
        return Err(ParseError::InvalidHost);
    }
    if !has_only_valid_escapes(input) {
        violations.record(ValidationError::InvalidUrlUnit);
    }
    if input.is_empty() {
        return Ok(Host::Empty);
    }

    let mut encoded = String::with_capacity(input.len());
    percent_encode_into(&mut encoded, input, C0_CONTROL_SET);
    Ok(Host::Opaque(encoded))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::ToString;

    fn parse(input: &str, scheme_type: SchemeType) -> Result<Host> {
        parse_host(input, scheme_type, &mut Violations::default())
    }

    #[test]
    fn test_parse_domain() {
        assert_eq!(
            parse("EXAMPLE.com", SchemeType::Http).unwrap(),
            Host::Domain("example.com".to_string())
        );
        assert_eq!(
            parse("ex%41mple.com", SchemeType::Http).unwrap(),
            Host::Domain("example.com".to_string())
        );
    }

    #[test]
    fn test_parse_ipv4_host() {
        assert_eq!(
            parse("127.0.0.1", SchemeType::Http).unwrap(),
            Host::Ipv4(0x7F00_0001)
        );
        assert_eq!(
            parse("0x7f.1", SchemeType::Https).unwrap(),
            Host::Ipv4(0x7F00_0001)
        );
        // Looks numeric but is out of range: fatal, not a domain
        assert_eq!(
            parse("256.0.0.1", SchemeType::Http),
            Err(ParseError::InvalidIpv4)
        );
        assert_eq!(
            parse("foo.09", SchemeType::Http),
            Err(ParseError::InvalidIpv4)
        );
    }

    #[test]
    fn test_parse_ipv6_host() {
        let host = parse("[::1]", SchemeType::Http).unwrap();
        assert_eq!(host, Host::Ipv6([0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(host.to_string(), "[::1]");
        assert_eq!(parse("[::1", SchemeType::Http), Err(ParseError::InvalidIpv6));
        assert!(parse("[::1]", SchemeType::NotSpecial).is_ok());
    }

    #[test]
    fn test_parse_empty_host() {
        assert_eq!(parse("", SchemeType::File).unwrap(), Host::Empty);
        assert_eq!(parse("", SchemeType::Http), Err(ParseError::HostMissing));
        assert_eq!(parse("", SchemeType::NotSpecial).unwrap(), Host::Empty);
    }

    #[test]
    fn test_parse_opaque_host() {
        assert_eq!(
            parse("EXAMPLE.com", SchemeType::NotSpecial).unwrap(),
            Host::Opaque("EXAMPLE.com".to_string())
        );
        assert_eq!(
            parse("1.2.3.4.5", SchemeType::NotSpecial).unwrap(),
            Host::Opaque("1.2.3.4.5".to_string())
        );
        assert_eq!(
            parse("ü", SchemeType::NotSpecial).unwrap(),
            Host::Opaque("%C3%BC".to_string())
        );
        assert_eq!(
            parse("a b", SchemeType::NotSpecial),
            Err(ParseError::InvalidHost)
        );
    }

    #[test]
    fn test_special_host_forbidden_code_points() {
        assert!(parse("exa mple.com", SchemeType::Http).is_err());
        assert!(parse("a%00b", SchemeType::Http).is_err());
        assert!(parse("a<b", SchemeType::Http).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Host::Ipv4(0xC0A8_0101).to_string(), "192.168.1.1");
        assert_eq!(Host::Empty.to_string(), "");
        assert_eq!(Host::Domain("a.b".to_string()).to_string(), "a.b");
    }
}
