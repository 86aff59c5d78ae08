/// IPv4 address parser supporting decimal, octal, and hexadecimal notation
/// Follows the WHATWG URL Standard IPv4 parser
use crate::compat::{String, Vec, format};
use crate::error::{ParseError, Result};
use crate::parser::{ValidationError, Violations};

/// Parse an IPv4 address string into a u32.
/// Supports:
/// - Decimal: 192.168.1.1
/// - Hex: 0xC0A80101
/// - Octal: 0300.0250.01.01
/// - Mixed: 192.0x00A80001
/// - Short forms where the last part fills the remaining bytes: 127.1
pub fn parse_ipv4(input: &str, violations: &mut Violations) -> Result<u32> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    let mut parts: Vec<&str> = input.split('.').collect();
    if parts.last().is_some_and(|last| last.is_empty()) {
        violations.record(ValidationError::IPv4EmptyPart);
        if parts.len() > 1 {
            parts.pop();
        }
    }

    let part_count = parts.len();
    if part_count > 4 {
        violations.record(ValidationError::IPv4TooManyParts);
        return Err(ParseError::InvalidIpv4);
    }

    let mut numbers: Vec<u64> = Vec::with_capacity(part_count);
    for part in &parts {
        let (number, non_decimal) = parse_ipv4_number(part).map_err(|_| {
            violations.record(ValidationError::IPv4NonNumericPart);
            ParseError::InvalidIpv4
        })?;
        if non_decimal {
            violations.record(ValidationError::IPv4NonDecimalPart);
        }
        numbers.push(number);
    }

    if numbers.iter().any(|&n| n > 255) {
        violations.record(ValidationError::IPv4OutOfRangePart);
    }
    if numbers.iter().take(part_count - 1).any(|&n| n > 255) {
        return Err(ParseError::InvalidIpv4);
    }

    // The last number fills every byte the leading parts did not claim
    let last = numbers[part_count - 1];
    if last >= 256u64.pow((5 - part_count) as u32) {
        return Err(ParseError::InvalidIpv4);
    }

    let mut ipv4 = last as u32;
    for (i, &number) in numbers.iter().enumerate().take(part_count - 1) {
        ipv4 |= (number as u32) << ((3 - i) * 8);
    }

    Ok(ipv4)
}

/// Parse a single IPv4 number component (supports decimal, hex, octal).
/// Returns the value and whether a non-decimal radix was used.
pub fn parse_ipv4_number(input: &str) -> Result<(u64, bool)> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    let (digits, radix) = if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        (hex, 16)
    } else if input.len() >= 2 && input.starts_with('0') {
        (&input[1..], 8)
    } else {
        (input, 10)
    };

    // Bare "0x" is zero
    if digits.is_empty() {
        return Ok((0, true));
    }

    // from_str_radix accepts a leading sign; the URL grammar does not
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidIpv4);
    }

    // Anything too large for u64 is certainly out of range for an address,
    // so saturate and let the range checks reject it
    let value = u64::from_str_radix(digits, radix).unwrap_or(u64::MAX);
    Ok((value, radix != 10))
}

/// Serialize an IPv4 address (u32) to dotted decimal notation
pub fn serialize_ipv4(ipv4: u32) -> String {
    let [a, b, c, d] = ipv4.to_be_bytes();
    format!("{a}.{b}.{c}.{d}")
}
