/// URL parser state machine states
/// Based on WHATWG URL Standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Scheme start state
    SchemeStart,
    /// Scheme state
    Scheme,
    /// No scheme state
    NoScheme,
    /// Special relative or authority state
    SpecialRelativeOrAuthority,
    /// Path or authority state
    PathOrAuthority,
    /// Relative state
    Relative,
    /// Relative slash state
    RelativeSlash,
    /// Special authority slashes state
    SpecialAuthoritySlashes,
    /// Special authority ignore slashes state
    SpecialAuthorityIgnoreSlashes,
    /// Authority state
    Authority,
    /// Host state
    Host,
    /// Hostname state (host state entered through a hostname override)
    Hostname,
    /// Port state
    Port,
    /// File state
    File,
    /// File slash state
    FileSlash,
    /// File host state
    FileHost,
    /// Path start state
    PathStart,
    /// Path state
    Path,
    /// Opaque path state (for non-special schemes)
    OpaquePath,
    /// Query state
    Query,
    /// Fragment state
    Fragment,
}

/// Entry state for re-running the parser against an existing URL.
///
/// Only the components reachable from the entry state are committed back;
/// see [`Url::reparse`](crate::Url::reparse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOverride {
    /// Replace the scheme (`protocol` setter)
    SchemeStart,
    /// Replace host and port (`host` setter)
    Host,
    /// Replace the host only (`hostname` setter)
    Hostname,
    /// Replace the port (`port` setter)
    Port,
    /// Replace the path (`pathname` setter)
    PathStart,
    /// Replace the query (`search` setter)
    Query,
    /// Replace the fragment (`hash` setter)
    Fragment,
}

impl From<StateOverride> for State {
    fn from(state_override: StateOverride) -> Self {
        match state_override {
            StateOverride::SchemeStart => Self::SchemeStart,
            StateOverride::Host => Self::Host,
            StateOverride::Hostname => Self::Hostname,
            StateOverride::Port => Self::Port,
            StateOverride::PathStart => Self::PathStart,
            StateOverride::Query => Self::Query,
            StateOverride::Fragment => Self::Fragment,
        }
    }
}
