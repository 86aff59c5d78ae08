#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod checkers;
mod helpers;
mod ipv4;
mod ipv6;
mod scheme;
mod serializer;
mod types;
mod unicode;

mod dom;
mod error;
mod host;
mod hyperlink;
mod options;
mod origin;
mod parser;
mod url;

// Public API
pub use dom::{Document, HtmlAnchorElement, HtmlAreaElement};
pub use error::{ParseError, Result};
pub use host::Host;
pub use hyperlink::{CacheState, HREF, HyperlinkElementUtils, UrlCache};
pub use options::{ABOUT_BLANK, DocumentOptions, NormalizedOptions, OptionsError, ParsingMode};
pub use origin::{FileOrigin, Origin, OriginPolicy};
pub use parser::{StateOverride, ValidationError, Violations};
pub use types::SchemeType;
pub use url::{Hierarchy, Url, UrlKind};
