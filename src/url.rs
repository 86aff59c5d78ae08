//! The URL record.
//!
//! A record is either hierarchical (authority plus a list of path segments)
//! or has an opaque path (`mailto:`, `javascript:`, `data:` ...). Components
//! that only exist on hierarchical records live in [`Hierarchy`], so code
//! holding an opaque record cannot reach them.

use crate::compat::{String, ToString, Vec, format};
use crate::error::{ParseError, Result};
use crate::host::Host;
use crate::origin::{Origin, OriginPolicy};
use crate::parser::{self, StateOverride, Violations};
use crate::scheme::get_scheme_type;
use crate::serializer;
use crate::types::SchemeType;
use crate::unicode::percent_encode::percent_encode_userinfo;
use core::fmt;
use core::str::FromStr;

/// Authority and path of a hierarchical URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Hierarchy {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) host: Option<Host>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Vec<String>,
}

impl Hierarchy {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Username or password is non-empty
    pub fn includes_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// Credentials and ports need a non-empty host and a scheme other than `file`
    pub fn cannot_have_credentials_or_port(&self, scheme: &str) -> bool {
        !matches!(&self.host, Some(host) if !host.is_empty()) || scheme == "file"
    }

    /// Percent-encode `username` with the userinfo set and store it
    pub fn set_username(&mut self, username: &str) {
        self.username = percent_encode_userinfo(username);
    }

    /// Percent-encode `password` with the userinfo set and store it
    pub fn set_password(&mut self, password: &str) {
        self.password = percent_encode_userinfo(password);
    }
}

/// Shape of a URL record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlKind {
    Hierarchical(Hierarchy),
    /// Opaque path, kept verbatim (already percent-encoded)
    Opaque(String),
}

/// A parsed URL record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    pub(crate) scheme: String,
    pub(crate) kind: UrlKind,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl Url {
    /// The record the parser starts from: no scheme, hierarchical, empty path
    pub(crate) fn empty() -> Self {
        Self {
            scheme: String::new(),
            kind: UrlKind::Hierarchical(Hierarchy::default()),
            query: None,
            fragment: None,
        }
    }

    /// Parse `input`, resolving it against `base` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` fails to parse on its own or if `input`
    /// is not a valid URL relative to it.
    pub fn parse(input: &str, base: Option<&str>) -> Result<Self> {
        let base = base.map(|base| Self::parse(base, None)).transpose()?;
        Self::parse_with_base(input, base.as_ref())
    }

    /// Parse `input` against an already parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is not a valid URL relative to `base`.
    pub fn parse_with_base(input: &str, base: Option<&Self>) -> Result<Self> {
        parser::parse(input, base, &mut Violations::default())
    }

    /// Parse and also return every validation error hit along the way.
    pub fn parse_with_violations(input: &str, base: Option<&Self>) -> (Result<Self>, Violations) {
        let mut violations = Violations::default();
        let result = parser::parse(input, base, &mut violations);
        (result, violations)
    }

    /// Check if `input` parses, without keeping the result
    pub fn can_parse(input: &str, base: Option<&str>) -> bool {
        Self::parse(input, base).is_ok()
    }

    /// Re-run the parser on this record starting at `state_override`.
    ///
    /// The state machine works on a scratch copy. On success only the
    /// components in the override's scope are copied back:
    ///
    /// | override | components |
    /// |---|---|
    /// | `SchemeStart` | scheme, port |
    /// | `Host` | host, port, path |
    /// | `Hostname` | host, path |
    /// | `Port` | port |
    /// | `PathStart` | path |
    /// | `Query` | query |
    /// | `Fragment` | fragment |
    ///
    /// # Errors
    ///
    /// On error `self` is unchanged.
    pub fn reparse(&mut self, input: &str, state_override: StateOverride) -> Result<()> {
        let mut scratch = self.clone();
        parser::parse_with_override(
            input,
            &mut scratch,
            state_override,
            &mut Violations::default(),
        )?;
        self.commit(scratch, state_override)
    }

    fn commit(&mut self, scratch: Self, state_override: StateOverride) -> Result<()> {
        match state_override {
            StateOverride::Query => self.query = scratch.query,
            StateOverride::Fragment => self.fragment = scratch.fragment,
            StateOverride::SchemeStart => {
                self.scheme = scratch.scheme;
                if let (UrlKind::Hierarchical(target), UrlKind::Hierarchical(source)) =
                    (&mut self.kind, scratch.kind)
                {
                    target.port = source.port;
                }
            }
            StateOverride::Host
            | StateOverride::Hostname
            | StateOverride::Port
            | StateOverride::PathStart => {
                let (UrlKind::Hierarchical(target), UrlKind::Hierarchical(source)) =
                    (&mut self.kind, scratch.kind)
                else {
                    return Err(ParseError::OverrideNotApplicable);
                };
                match state_override {
                    StateOverride::Host => {
                        target.host = source.host;
                        target.port = source.port;
                        target.path = source.path;
                    }
                    StateOverride::Hostname => {
                        target.host = source.host;
                        target.path = source.path;
                    }
                    StateOverride::Port => target.port = source.port,
                    _ => target.path = source.path,
                }
            }
        }
        Ok(())
    }

    /// Lowercase scheme, without the trailing `:`
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn scheme_type(&self) -> SchemeType {
        get_scheme_type(&self.scheme)
    }

    pub fn is_special(&self) -> bool {
        self.scheme_type().is_special()
    }

    pub fn kind(&self) -> &UrlKind {
        &self.kind
    }

    /// Hierarchical records are re-derived from their attribute on every
    /// access; opaque ones are frozen once parsed
    pub fn is_hierarchical(&self) -> bool {
        matches!(self.kind, UrlKind::Hierarchical(_))
    }

    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        match &self.kind {
            UrlKind::Hierarchical(hierarchy) => Some(hierarchy),
            UrlKind::Opaque(_) => None,
        }
    }

    pub fn hierarchy_mut(&mut self) -> Option<&mut Hierarchy> {
        match &mut self.kind {
            UrlKind::Hierarchical(hierarchy) => Some(hierarchy),
            UrlKind::Opaque(_) => None,
        }
    }

    pub fn host_value(&self) -> Option<&Host> {
        self.hierarchy().and_then(Hierarchy::host)
    }

    pub fn port_value(&self) -> Option<u16> {
        self.hierarchy().and_then(Hierarchy::port)
    }

    /// Path segments of a hierarchical URL
    pub fn path_segments(&self) -> Option<&[String]> {
        self.hierarchy().map(Hierarchy::path)
    }

    pub fn opaque_path(&self) -> Option<&str> {
        match &self.kind {
            UrlKind::Opaque(path) => Some(path),
            UrlKind::Hierarchical(_) => None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn set_query(&mut self, query: Option<String>) {
        self.query = query;
    }

    pub fn set_fragment(&mut self, fragment: Option<String>) {
        self.fragment = fragment;
    }

    /// Serialize the whole record
    pub fn href(&self) -> String {
        serializer::serialize(self, false)
    }

    pub fn protocol(&self) -> String {
        format!("{}:", self.scheme)
    }

    pub fn username(&self) -> &str {
        self.hierarchy().map_or("", Hierarchy::username)
    }

    pub fn password(&self) -> &str {
        self.hierarchy().map_or("", Hierarchy::password)
    }

    /// Host and, when present, `:port`
    pub fn host(&self) -> String {
        match (self.host_value(), self.port_value()) {
            (None, _) => String::new(),
            (Some(host), None) => host.to_string(),
            (Some(host), Some(port)) => format!("{host}:{port}"),
        }
    }

    pub fn hostname(&self) -> String {
        self.host_value().map(ToString::to_string).unwrap_or_default()
    }

    pub fn port(&self) -> String {
        self.port_value().map(|port| port.to_string()).unwrap_or_default()
    }

    pub fn pathname(&self) -> String {
        serializer::serialize_path(&self.kind)
    }

    /// `?query`, or empty when the query is absent or empty
    pub fn search(&self) -> String {
        match self.query.as_deref() {
            None | Some("") => String::new(),
            Some(query) => format!("?{query}"),
        }
    }

    /// `#fragment`, or empty when the fragment is absent or empty
    pub fn hash(&self) -> String {
        match self.fragment.as_deref() {
            None | Some("") => String::new(),
            Some(fragment) => format!("#{fragment}"),
        }
    }

    pub fn origin(&self) -> Origin {
        Origin::of(self, &OriginPolicy::default())
    }

    pub fn origin_with_policy(&self, policy: &OriginPolicy) -> Origin {
        Origin::of(self, policy)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl FromStr for Url {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input, None)
    }
}
