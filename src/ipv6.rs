/// IPv6 address parsing and serialization
/// Follows the WHATWG URL Standard for IPv6 addresses
use crate::compat::{String, Vec};
use crate::error::{ParseError, Result};
use crate::parser::{ValidationError, Violations};
use core::fmt::Write;

/// Parse the inside of a bracketed host (e.g. "`::1`" or "`2001:db8::1`").
/// Returns the 8 u16 pieces if valid, or an error if malformed.
pub fn parse_ipv6(input: &str, violations: &mut Violations) -> Result<[u16; 8]> {
    let fail = |violations: &mut Violations, kind| {
        violations.record(kind);
        Err(ParseError::InvalidIpv6)
    };

    let chars: Vec<char> = input.chars().collect();
    let at = |i: usize| chars.get(i).copied();

    let mut address = [0u16; 8];
    let mut piece_index = 0usize;
    let mut compress: Option<usize> = None;
    let mut pointer = 0usize;

    if at(0) == Some(':') {
        if at(1) != Some(':') {
            return fail(violations, ValidationError::IPv6InvalidCompression);
        }
        pointer += 2;
        piece_index += 1;
        compress = Some(piece_index);
    }

    while let Some(c) = at(pointer) {
        if piece_index == 8 {
            return fail(violations, ValidationError::IPv6TooManyPieces);
        }

        if c == ':' {
            if compress.is_some() {
                return fail(violations, ValidationError::IPv6MultipleCompression);
            }
            pointer += 1;
            piece_index += 1;
            compress = Some(piece_index);
            continue;
        }

        let mut value: u16 = 0;
        let mut length = 0;
        while length < 4 {
            let Some(digit) = at(pointer).and_then(|c| c.to_digit(16)) else {
                break;
            };
            value = value * 0x10 + digit as u16;
            pointer += 1;
            length += 1;
        }

        match at(pointer) {
            Some('.') => {
                if length == 0 {
                    return fail(violations, ValidationError::IPv4InIPv6InvalidCodePoint);
                }
                pointer -= length;
                if piece_index > 6 {
                    return fail(violations, ValidationError::IPv4InIPv6TooManyPieces);
                }
                parse_embedded_ipv4(&chars[pointer..], &mut address, piece_index, violations)?;
                piece_index += 2;
                pointer = chars.len();
                break;
            }
            Some(':') => {
                pointer += 1;
                if at(pointer).is_none() {
                    return fail(violations, ValidationError::IPv6InvalidCodePoint);
                }
            }
            Some(_) => return fail(violations, ValidationError::IPv6InvalidCodePoint),
            None => {}
        }

        address[piece_index] = value;
        piece_index += 1;
    }

    if let Some(compress) = compress {
        // Move the pieces after the "::" to the end of the address
        let mut swaps = piece_index - compress;
        piece_index = 7;
        while piece_index != 0 && swaps > 0 {
            address.swap(piece_index, compress + swaps - 1);
            piece_index -= 1;
            swaps -= 1;
        }
    } else if piece_index != 8 {
        return fail(violations, ValidationError::IPv6TooFewPieces);
    }

    Ok(address)
}

/// Parse a dotted-decimal tail ("`127.0.0.1`") into two address pieces.
/// Only plain decimal without leading zeros is accepted here.
fn parse_embedded_ipv4(
    chars: &[char],
    address: &mut [u16; 8],
    mut piece_index: usize,
    violations: &mut Violations,
) -> Result<()> {
    let mut numbers_seen = 0;
    let mut pointer = 0;

    while pointer < chars.len() {
        if numbers_seen > 0 {
            if chars[pointer] == '.' && numbers_seen < 4 {
                pointer += 1;
            } else {
                violations.record(ValidationError::IPv4InIPv6InvalidCodePoint);
                return Err(ParseError::InvalidIpv6);
            }
        }

        let mut piece: Option<u16> = None;
        while let Some(digit) = chars.get(pointer).and_then(|c| c.to_digit(10)) {
            piece = match piece {
                None => Some(digit as u16),
                Some(0) => {
                    violations.record(ValidationError::IPv4InIPv6InvalidCodePoint);
                    return Err(ParseError::InvalidIpv6);
                }
                Some(value) => Some(value * 10 + digit as u16),
            };
            if piece.is_some_and(|value| value > 255) {
                violations.record(ValidationError::IPv4InIPv6OutOfRangePart);
                return Err(ParseError::InvalidIpv6);
            }
            pointer += 1;
        }

        let Some(piece) = piece else {
            violations.record(ValidationError::IPv4InIPv6InvalidCodePoint);
            return Err(ParseError::InvalidIpv6);
        };

        address[piece_index] = address[piece_index] * 0x100 + piece;
        numbers_seen += 1;
        if numbers_seen == 2 || numbers_seen == 4 {
            piece_index += 1;
        }
    }

    if numbers_seen != 4 {
        violations.record(ValidationError::IPv4InIPv6TooFewParts);
        return Err(ParseError::InvalidIpv6);
    }
    Ok(())
}

/// Serialize IPv6 pieces with zero compression, without brackets.
pub fn serialize_ipv6(pieces: &[u16; 8]) -> String {
    let compress = find_longest_zero_sequence(pieces);

    let mut result = String::with_capacity(39);
    let mut ignore_zero = false;

    for (i, &piece) in pieces.iter().enumerate() {
        if ignore_zero && piece == 0 {
            continue;
        }
        ignore_zero = false;

        if compress == Some(i) {
            result.push_str(if i == 0 { "::" } else { ":" });
            ignore_zero = true;
            continue;
        }

        let _ = write!(&mut result, "{piece:x}");
        if i != 7 {
            result.push(':');
        }
    }

    result
}

/// Start of the first longest run of two or more zero pieces.
fn find_longest_zero_sequence(pieces: &[u16; 8]) -> Option<usize> {
    let mut best_start: Option<usize> = None;
    let mut best_len = 1;
    let mut current_start: Option<usize> = None;
    let mut current_len = 0;

    for (i, &piece) in pieces.iter().enumerate() {
        if piece == 0 {
            if current_start.is_none() {
                current_start = Some(i);
                current_len = 0;
            }
            current_len += 1;
            if current_len > best_len {
                best_start = current_start;
                best_len = current_len;
            }
        } else {
            current_start = None;
        }
    }

    best_start
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<[u16; 8]> {
        parse_ipv6(input, &mut Violations::default())
    }

    #[test]
    fn test_parse_ipv6_loopback() {
        assert_eq!(parse("::1").unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(parse("::").unwrap(), [0; 8]);
    }

    #[test]
    fn test_parse_ipv6_full() {
        let result = parse("2001:db8:0:0:1:0:0:1").unwrap();
        assert_eq!(result, [0x2001, 0xdb8, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_parse_ipv6_compressed() {
        let result = parse("2001:db8::1").unwrap();
        assert_eq!(result, [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
        let result = parse("1::").unwrap();
        assert_eq!(result, [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_ipv6_with_ipv4() {
        let result = parse("::127.0.0.1").unwrap();
        assert_eq!(result, [0, 0, 0, 0, 0, 0, 0x7f00, 0x0001]);

        let result = parse("::ffff:192.168.1.1").unwrap();
        assert_eq!(result, [0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x0101]);
    }

    #[test]
    fn test_parse_ipv6_failures() {
        assert!(parse("").is_err());
        assert!(parse(":1").is_err());
        assert!(parse("1:2:3:4:5:6:7").is_err());
        assert!(parse("1:2:3:4:5:6:7:8:9").is_err());
        assert!(parse("1::2::3").is_err());
        assert!(parse("12345::").is_err());
        assert!(parse("1:").is_err());
        assert!(parse("::1.2.3").is_err());
        assert!(parse("::1.2.3.04").is_err());
        assert!(parse("::1.2.3.256").is_err());
        assert!(parse("fe80::1%eth0").is_err());
    }

    #[test]
    fn test_serialize_ipv6() {
        assert_eq!(serialize_ipv6(&[0, 0, 0, 0, 0, 0, 0, 1]), "::1");
        assert_eq!(serialize_ipv6(&[0; 8]), "::");
        assert_eq!(
            serialize_ipv6(&[0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]),
            "2001:db8::1"
        );
        assert_eq!(serialize_ipv6(&[1, 0, 0, 0, 0, 0, 0, 0]), "1::");
        // A single zero piece is not compressed
        assert_eq!(serialize_ipv6(&[1, 0, 2, 3, 4, 5, 6, 7]), "1:0:2:3:4:5:6:7");
        // The first of two equally long runs wins
        assert_eq!(serialize_ipv6(&[1, 0, 0, 2, 0, 0, 3, 4]), "1::2:0:0:3:4");
    }
}
