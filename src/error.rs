use thiserror::Error;

/// Fatal failures of the URL parser and its host sub-parsers.
///
/// A failed parse never leaves a partially built record behind: callers get
/// this value instead of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input does not start with a scheme and cannot be resolved
    #[error("Invalid scheme")]
    InvalidScheme,
    /// Relative input without a usable base URL
    #[error("Relative URL without base")]
    RelativeUrlWithoutBase,
    /// A special URL (or a URL with credentials) is missing its host
    #[error("Host missing")]
    HostMissing,
    /// The host contains a forbidden host code point
    #[error("Invalid host")]
    InvalidHost,
    /// The host contains a forbidden domain code point after IDNA processing
    #[error("Invalid domain character")]
    InvalidDomainCharacter,
    /// IDNA processing rejected the domain
    #[error("IDNA processing error")]
    IdnaError,
    /// Host ends in a number but is not a valid IPv4 address
    #[error("Invalid IPv4 address")]
    InvalidIpv4,
    /// Bracketed host is not a valid IPv6 address
    #[error("Invalid IPv6 address")]
    InvalidIpv6,
    /// Port contains something other than ASCII digits
    #[error("Invalid port")]
    InvalidPort,
    /// Port is larger than 65535
    #[error("Port out of range")]
    PortOutOfRange,
    /// A state override asked to modify a component the URL's shape does not have
    #[error("State override not applicable to this URL")]
    OverrideNotApplicable,
    /// A state override was given input that the override state rejects
    #[error("State override rejected input")]
    OverrideRejected,
}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;
