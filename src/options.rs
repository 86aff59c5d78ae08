//! Owner document configuration.

use crate::compat::String;
use crate::error::ParseError;
use crate::origin::OriginPolicy;
use crate::url::Url;
use core::fmt;
use core::str::FromStr;
use thiserror::Error;

/// Document URL and referrer when none is configured
pub const ABOUT_BLANK: &str = "about:blank";

/// Errors from [`DocumentOptions::normalize`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("parsingMode must be \"html\" or \"xml\", got {0:?}")]
    InvalidParsingMode(String),
    #[error("{option} is not a valid absolute URL: {source}")]
    InvalidUrl {
        option: &'static str,
        #[source]
        source: ParseError,
    },
}

/// How the owner document was parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsingMode {
    #[default]
    Html,
    Xml,
}

impl ParsingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
        }
    }

    /// Content type used when none is configured
    pub fn default_content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Xml => "application/xml",
        }
    }
}

impl FromStr for ParsingMode {
    type Err = OptionsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "html" => Ok(Self::Html),
            "xml" => Ok(Self::Xml),
            other => Err(OptionsError::InvalidParsingMode(other.into())),
        }
    }
}

impl fmt::Display for ParsingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for building a [`Document`](crate::Document). Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    pub parsing_mode: Option<ParsingMode>,
    pub content_type: Option<String>,
    pub url: Option<String>,
    pub referrer: Option<String>,
    pub origin_policy: Option<OriginPolicy>,
}

/// [`DocumentOptions`] with defaults filled in and URLs canonicalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOptions {
    pub parsing_mode: ParsingMode,
    pub content_type: String,
    pub url: Url,
    pub referrer: String,
    pub origin_policy: OriginPolicy,
}

impl DocumentOptions {
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    #[must_use]
    pub fn with_parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
        self.parsing_mode = Some(parsing_mode);
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn with_origin_policy(mut self, origin_policy: OriginPolicy) -> Self {
        self.origin_policy = Some(origin_policy);
        self
    }

    /// Fill in defaults and canonicalize the document URL and referrer.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidUrl`] when `url` or `referrer` is not
    /// an absolute URL.
    pub fn normalize(self) -> Result<NormalizedOptions, OptionsError> {
        let parsing_mode = self.parsing_mode.unwrap_or_default();
        let content_type = self
            .content_type
            .unwrap_or_else(|| parsing_mode.default_content_type().into());
        let url = absolute_url("url", self.url.as_deref())?;
        let referrer = absolute_url("referrer", self.referrer.as_deref())?.href();

        Ok(NormalizedOptions {
            parsing_mode,
            content_type,
            url,
            referrer,
            origin_policy: self.origin_policy.unwrap_or_default(),
        })
    }
}

fn absolute_url(option: &'static str, value: Option<&str>) -> Result<Url, OptionsError> {
    Url::parse(value.unwrap_or(ABOUT_BLANK), None)
        .map_err(|source| OptionsError::InvalidUrl { option, source })
}
