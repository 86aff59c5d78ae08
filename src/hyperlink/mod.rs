//! URL decomposition accessors for hyperlink elements (`<a>`, `<area>`).
//!
//! The `href` attribute is the source of truth. Every accessor re-parses it
//! against the owner document's base URL, except when the cached record has
//! an opaque path: that record is frozen and used as is. Setters run a
//! state-override parse on a copy of the record and write the serialization
//! back to the attribute. Nothing here ever reports an error; rejected input
//! leaves the element unchanged.

mod cache;

pub use cache::{CacheState, UrlCache};

use crate::compat::{String, ToString, format};
use crate::dom::Document;
use crate::error::ParseError;
use crate::parser::StateOverride;
use crate::url::Url;
use core::fmt;

/// Name of the attribute the accessors are bound to
pub const HREF: &str = "href";

/// The `HTMLHyperlinkElementUtils` mixin.
///
/// Implementors supply attribute storage, the owner document and a
/// [`UrlCache`]; every accessor is provided.
pub trait HyperlinkElementUtils {
    fn get_attribute(&self, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, name: &str, value: &str);

    fn owner_document(&self) -> &Document;

    fn url_cache(&self) -> &UrlCache;

    /// Serialized record, or the raw attribute text when it does not parse
    fn href(&self) -> String {
        reinitialize_url(self);
        self.url_cache().with(|url| match url {
            Some(url) => url.href(),
            None => self.get_attribute(HREF).unwrap_or_default().into(),
        })
    }

    /// Store the attribute verbatim; the record is re-derived on next access
    fn set_href(&mut self, value: impl fmt::Display) {
        self.set_attribute(HREF, &value.to_string());
        self.url_cache().invalidate();
    }

    /// Unicode serialization of the origin, rendered per the owner
    /// document's origin policy
    fn origin(&self) -> String {
        reinitialize_url(self);
        let policy = *self.owner_document().origin_policy();
        read(self, |url| url.origin().unicode_serialization(&policy))
    }

    fn protocol(&self) -> String {
        reinitialize_url(self);
        self.url_cache()
            .with(|url| url.map_or_else(|| String::from(":"), Url::protocol))
    }

    fn set_protocol(&mut self, value: impl fmt::Display) {
        let input = format!("{value}:");
        update_url(self, "protocol", |url| {
            Ok(url.reparse(&input, StateOverride::SchemeStart)?)
        });
    }

    fn username(&self) -> String {
        reinitialize_url(self);
        read(self, |url| url.username().into())
    }

    fn set_username(&mut self, value: impl fmt::Display) {
        let value = value.to_string();
        update_url(self, "username", |url| {
            guard_credentials_or_port(url)?;
            if let Some(hierarchy) = url.hierarchy_mut() {
                hierarchy.set_username(&value);
            }
            Ok(())
        });
    }

    fn password(&self) -> String {
        reinitialize_url(self);
        read(self, |url| url.password().into())
    }

    fn set_password(&mut self, value: impl fmt::Display) {
        let value = value.to_string();
        update_url(self, "password", |url| {
            guard_credentials_or_port(url)?;
            if let Some(hierarchy) = url.hierarchy_mut() {
                hierarchy.set_password(&value);
            }
            Ok(())
        });
    }

    fn host(&self) -> String {
        reinitialize_url(self);
        read(self, Url::host)
    }

    fn set_host(&mut self, value: impl fmt::Display) {
        let input = value.to_string();
        update_url(self, "host", |url| {
            guard_hierarchical(url)?;
            Ok(url.reparse(&input, StateOverride::Host)?)
        });
    }

    fn hostname(&self) -> String {
        reinitialize_url(self);
        read(self, Url::hostname)
    }

    fn set_hostname(&mut self, value: impl fmt::Display) {
        let input = value.to_string();
        update_url(self, "hostname", |url| {
            guard_hierarchical(url)?;
            Ok(url.reparse(&input, StateOverride::Hostname)?)
        });
    }

    fn port(&self) -> String {
        reinitialize_url(self);
        read(self, Url::port)
    }

    /// An empty value removes the port
    fn set_port(&mut self, value: impl fmt::Display) {
        let input = value.to_string();
        update_url(self, "port", |url| {
            guard_credentials_or_port(url)?;
            if input.is_empty() {
                if let Some(hierarchy) = url.hierarchy_mut() {
                    hierarchy.port = None;
                }
                return Ok(());
            }
            Ok(url.reparse(&input, StateOverride::Port)?)
        });
    }

    /// Opaque path as is, or the `/`-joined segments
    fn pathname(&self) -> String {
        reinitialize_url(self);
        read(self, Url::pathname)
    }

    fn set_pathname(&mut self, value: impl fmt::Display) {
        let input = value.to_string();
        update_url(self, "pathname", |url| {
            guard_hierarchical(url)?;
            if let Some(hierarchy) = url.hierarchy_mut() {
                hierarchy.path.clear();
            }
            Ok(url.reparse(&input, StateOverride::PathStart)?)
        });
    }

    fn search(&self) -> String {
        reinitialize_url(self);
        read(self, Url::search)
    }

    /// An empty value removes the query; a leading `?` is skipped
    fn set_search(&mut self, value: impl fmt::Display) {
        let value = value.to_string();
        update_url(self, "search", |url| {
            if value.is_empty() {
                url.set_query(None);
                return Ok(());
            }
            let input = value.strip_prefix('?').unwrap_or(&value);
            url.set_query(Some(String::new()));
            Ok(url.reparse(input, StateOverride::Query)?)
        });
    }

    fn hash(&self) -> String {
        reinitialize_url(self);
        read(self, Url::hash)
    }

    /// An empty value removes the fragment; a leading `#` is skipped.
    /// `javascript:` URLs are left alone.
    fn set_hash(&mut self, value: impl fmt::Display) {
        let value = value.to_string();
        update_url(self, "hash", |url| {
            if url.scheme() == "javascript" {
                return Err(Refusal::Guard("scheme is javascript"));
            }
            if value.is_empty() {
                url.set_fragment(None);
                return Ok(());
            }
            let input = value.strip_prefix('#').unwrap_or(&value);
            url.set_fragment(Some(String::new()));
            Ok(url.reparse(input, StateOverride::Fragment)?)
        });
    }
}

/// Why a setter left the element unchanged
enum Refusal {
    /// The setter's precondition does not hold
    Guard(&'static str),
    /// The state-override parse failed
    Rejected(ParseError),
}

impl From<ParseError> for Refusal {
    fn from(error: ParseError) -> Self {
        Self::Rejected(error)
    }
}

/// Re-derive the record from the attribute unless it is frozen
fn reinitialize_url<E: HyperlinkElementUtils + ?Sized>(element: &E) {
    if element.url_cache().is_frozen() {
        tracing::trace!("opaque url record is frozen, skipping refresh");
        return;
    }
    let url = element.get_attribute(HREF).and_then(|href| {
        let base = element.owner_document().base_url();
        Url::parse_with_base(href, Some(&base))
            .inspect_err(|error| {
                tracing::debug!(%error, href, %base, "href does not resolve to a url");
            })
            .ok()
    });
    element.url_cache().replace(url);
}

/// Apply `f` to the record, or return the empty string when there is none
fn read<E, F>(element: &E, f: F) -> String
where
    E: HyperlinkElementUtils + ?Sized,
    F: FnOnce(&Url) -> String,
{
    element.url_cache().with(|url| url.map(f).unwrap_or_default())
}

fn guard_hierarchical(url: &Url) -> Result<(), Refusal> {
    if url.is_hierarchical() {
        Ok(())
    } else {
        Err(Refusal::Guard("url has an opaque path"))
    }
}

fn guard_credentials_or_port(url: &Url) -> Result<(), Refusal> {
    match url.hierarchy() {
        None => Err(Refusal::Guard("url has an opaque path")),
        Some(hierarchy) if hierarchy.cannot_have_credentials_or_port(url.scheme()) => {
            Err(Refusal::Guard("url cannot have credentials or a port"))
        }
        Some(_) => Ok(()),
    }
}

/// Refresh, mutate a copy of the record, and commit it on success
fn update_url<E, F>(element: &mut E, setter: &'static str, mutate: F)
where
    E: HyperlinkElementUtils + ?Sized,
    F: FnOnce(&mut Url) -> Result<(), Refusal>,
{
    reinitialize_url(element);
    let Some(mut url) = element.url_cache().get() else {
        tracing::debug!(setter, "no url record, setter ignored");
        return;
    };

    match mutate(&mut url) {
        Ok(()) => {
            let href = url.href();
            element.url_cache().replace(Some(url));
            element.set_attribute(HREF, &href);
        }
        Err(Refusal::Guard(reason)) => tracing::debug!(setter, reason, "setter guard not met"),
        Err(Refusal::Rejected(error)) => {
            tracing::debug!(setter, %error, "setter input rejected");
        }
    }
}
