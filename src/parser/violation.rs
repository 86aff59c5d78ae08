use crate::compat::Vec;
use thiserror::Error;

/// Non-fatal validation errors. The parser records these and keeps going;
/// they never change the resulting URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("leading or trailing C0 control or space")]
    LeadingOrTrailingC0ControlOrSpace,
    #[error("ASCII tab or newline in input")]
    TabOrNewline,
    #[error("domain-to-ASCII failed")]
    DomainToAscii,
    #[error("forbidden domain code point")]
    DomainInvalidCodePoint,
    #[error("forbidden host code point")]
    HostInvalidCodePoint,
    #[error("IPv4 address ends with an empty part")]
    IPv4EmptyPart,
    #[error("IPv4 address has more than four parts")]
    IPv4TooManyParts,
    #[error("IPv4 part is not numeric")]
    IPv4NonNumericPart,
    #[error("IPv4 part uses hexadecimal or octal")]
    IPv4NonDecimalPart,
    #[error("IPv4 part exceeds 255")]
    IPv4OutOfRangePart,
    #[error("IPv6 address is missing its closing bracket")]
    IPv6Unclosed,
    #[error("IPv6 address begins with an improper compression")]
    IPv6InvalidCompression,
    #[error("IPv6 address has more than eight pieces")]
    IPv6TooManyPieces,
    #[error("IPv6 address is compressed in more than one spot")]
    IPv6MultipleCompression,
    #[error("IPv6 address contains an invalid code point")]
    IPv6InvalidCodePoint,
    #[error("uncompressed IPv6 address has fewer than eight pieces")]
    IPv6TooFewPieces,
    #[error("embedded IPv4 address does not fit in the IPv6 address")]
    IPv4InIPv6TooManyPieces,
    #[error("embedded IPv4 address contains an invalid code point")]
    IPv4InIPv6InvalidCodePoint,
    #[error("embedded IPv4 part exceeds 255")]
    IPv4InIPv6OutOfRangePart,
    #[error("embedded IPv4 address has fewer than four parts")]
    IPv4InIPv6TooFewParts,
    #[error("invalid URL unit")]
    InvalidUrlUnit,
    #[error("special scheme not followed by \"//\"")]
    SpecialSchemeMissingFollowingSolidus,
    #[error("relative input without a hierarchical base")]
    MissingSchemeNonRelativeUrl,
    #[error("backslash used as a path separator")]
    InvalidReverseSolidus,
    #[error("URL includes credentials")]
    InvalidCredentials,
    #[error("special URL is missing its host")]
    HostMissing,
    #[error("port is out of range")]
    PortOutOfRange,
    #[error("port is not a number")]
    PortInvalid,
    #[error("relative input starts with a Windows drive letter")]
    FileInvalidWindowsDriveLetter,
    #[error("file host is a Windows drive letter")]
    FileInvalidWindowsDriveLetterHost,
}

/// Validation errors collected during one parse, in the order they were hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<ValidationError>);

impl Violations {
    pub fn record(&mut self, violation: ValidationError) {
        tracing::trace!(%violation, "url validation error");
        self.0.push(violation);
    }

    pub fn contains(&self, violation: ValidationError) -> bool {
        self.0.contains(&violation)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}
