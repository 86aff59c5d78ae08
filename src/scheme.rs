use crate::types::SchemeType;

/// Get the scheme type from a lowercase scheme string.
/// Uses perfect hash based on length + first byte to minimize comparisons.
pub fn get_scheme_type(scheme: &str) -> SchemeType {
    let bytes = scheme.as_bytes();

    match (bytes.len(), bytes.first()) {
        (2, Some(b'w')) if bytes == b"ws" => SchemeType::Ws,
        (3, Some(b'w')) if bytes == b"wss" => SchemeType::Wss,
        (3, Some(b'f')) if bytes == b"ftp" => SchemeType::Ftp,
        (4, Some(b'h')) if bytes == b"http" => SchemeType::Http,
        (4, Some(b'f')) if bytes == b"file" => SchemeType::File,
        (5, Some(b'h')) if bytes == b"https" => SchemeType::Https,
        _ => SchemeType::NotSpecial,
    }
}

/// Default port of `scheme`, if it has one
pub fn default_port(scheme: &str) -> Option<u16> {
    get_scheme_type(scheme).default_port()
}
