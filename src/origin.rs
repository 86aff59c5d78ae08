//! Origins of URL records and their serializations.

use crate::compat::{String, format};
use crate::host::Host;
use crate::types::SchemeType;
use crate::unicode::idna::domain_to_unicode;
use crate::url::{Url, UrlKind};
use core::fmt;

/// How the origin of a `file:` URL is rendered by
/// [`Origin::unicode_serialization`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileOrigin {
    /// `"null"`, like every other opaque origin
    #[default]
    Opaque,
    /// `"file://"`
    SchemeOnly,
    /// `""`
    Empty,
}

/// Origin rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginPolicy {
    pub file: FileOrigin,
    /// `blob:` URLs whose path is an `http`/`https` URL take that URL's origin
    pub unwrap_blob: bool,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self {
            file: FileOrigin::Opaque,
            unwrap_blob: true,
        }
    }
}

/// Origin of a URL record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    /// (scheme, host, port) of an `http`, `https`, `ws`, `wss` or `ftp` URL
    Tuple {
        scheme: String,
        host: Host,
        port: Option<u16>,
    },
    /// Opaque origin of a `file:` URL
    File,
    /// Any other opaque origin
    Opaque,
}

impl Origin {
    /// Compute the origin of `url`
    pub fn of(url: &Url, policy: &OriginPolicy) -> Self {
        let scheme_type = url.scheme_type();
        if scheme_type == SchemeType::File {
            return Self::File;
        }
        if url.scheme() == "blob" && policy.unwrap_blob {
            return Self::of_blob(url, policy);
        }
        if !scheme_type.has_tuple_origin() {
            return Self::Opaque;
        }
        match url.host_value() {
            Some(host) => Self::Tuple {
                scheme: url.scheme().into(),
                host: host.clone(),
                port: url.port_value(),
            },
            None => Self::Opaque,
        }
    }

    fn of_blob(url: &Url, policy: &OriginPolicy) -> Self {
        let UrlKind::Opaque(path) = url.kind() else {
            return Self::Opaque;
        };
        match Url::parse(path, None) {
            Ok(inner) if matches!(inner.scheme_type(), SchemeType::Http | SchemeType::Https) => {
                Self::of(&inner, policy)
            }
            _ => Self::Opaque,
        }
    }

    pub fn is_opaque(&self) -> bool {
        !matches!(self, Self::Tuple { .. })
    }

    /// ASCII serialization: `scheme://host[:port]`, or `"null"` when opaque
    pub fn ascii_serialization(&self) -> String {
        match self {
            Self::Tuple { scheme, host, port } => serialize_tuple(scheme, &format!("{host}"), *port),
            Self::File | Self::Opaque => String::from("null"),
        }
    }

    /// Unicode serialization: like the ASCII one, with the domain decoded
    /// from Punycode and `file:` origins rendered per `policy`
    pub fn unicode_serialization(&self, policy: &OriginPolicy) -> String {
        match self {
            Self::Tuple { scheme, host, port } => {
                let host = match host {
                    Host::Domain(domain) => domain_to_unicode(domain).into_owned(),
                    other => format!("{other}"),
                };
                serialize_tuple(scheme, &host, *port)
            }
            Self::File => match policy.file {
                FileOrigin::Opaque => String::from("null"),
                FileOrigin::SchemeOnly => String::from("file://"),
                FileOrigin::Empty => String::new(),
            },
            Self::Opaque => String::from("null"),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ascii_serialization())
    }
}

fn serialize_tuple(scheme: &str, host: &str, port: Option<u16>) -> String {
    match port {
        Some(port) => format!("{scheme}://{host}:{port}"),
        None => format!("{scheme}://{host}"),
    }
}
