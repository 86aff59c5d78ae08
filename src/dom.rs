//! A minimal owner document and the two hyperlink element kinds.

use crate::compat::{BTreeMap, Rc, String};
use crate::hyperlink::{HREF, HyperlinkElementUtils, UrlCache};
use crate::options::{DocumentOptions, NormalizedOptions, OptionsError, ParsingMode};
use crate::origin::OriginPolicy;
use crate::url::Url;
use core::cell::RefCell;
use core::fmt;

/// Owner document of hyperlink elements
#[derive(Debug)]
pub struct Document {
    url: Url,
    referrer: String,
    content_type: String,
    parsing_mode: ParsingMode,
    origin_policy: OriginPolicy,
    base_href: RefCell<Option<String>>,
}

impl Document {
    /// Build a document from options.
    ///
    /// # Errors
    ///
    /// Returns an error when the options do not normalize.
    pub fn new(options: DocumentOptions) -> Result<Rc<Self>, OptionsError> {
        options.normalize().map(|options| Rc::new(Self::from(options)))
    }

    /// Document URL, serialized
    pub fn url(&self) -> String {
        self.url.href()
    }

    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn parsing_mode(&self) -> ParsingMode {
        self.parsing_mode
    }

    pub fn origin_policy(&self) -> &OriginPolicy {
        &self.origin_policy
    }

    /// Set or clear the `href` of the document's `<base>` element
    pub fn set_base_href(&self, href: Option<&str>) {
        self.base_href.replace(href.map(String::from));
    }

    /// The `<base href>` resolved against the document URL, falling back to
    /// the document URL when there is none or it does not resolve
    pub fn base_url(&self) -> Url {
        self.base_href
            .borrow()
            .as_deref()
            .and_then(|href| Url::parse_with_base(href, Some(&self.url)).ok())
            .unwrap_or_else(|| self.url.clone())
    }
}

impl From<NormalizedOptions> for Document {
    fn from(options: NormalizedOptions) -> Self {
        Self {
            url: options.url,
            referrer: options.referrer,
            content_type: options.content_type,
            parsing_mode: options.parsing_mode,
            origin_policy: options.origin_policy,
            base_href: RefCell::new(None),
        }
    }
}

/// Attribute storage shared by both element kinds. Names are lowercased.
#[derive(Debug, Clone, Default)]
struct Attributes(BTreeMap<String, String>);

impl Attributes {
    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&name.to_ascii_lowercase())
    }
}

macro_rules! hyperlink_element {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            attributes: Attributes,
            document: Rc<Document>,
            url: UrlCache,
        }

        impl $name {
            pub const TAG_NAME: &'static str = $tag;

            pub fn new(document: Rc<Document>) -> Self {
                Self {
                    attributes: Attributes::default(),
                    document,
                    url: UrlCache::new(),
                }
            }

            /// Element with its `href` attribute already set
            pub fn with_href(document: Rc<Document>, href: &str) -> Self {
                let mut element = Self::new(document);
                element.attributes.set(HREF, href);
                element
            }

            pub fn get_attribute(&self, name: &str) -> Option<&str> {
                self.attributes.get(name)
            }

            /// Plain attribute write. A frozen URL record is not invalidated.
            pub fn set_attribute(&mut self, name: &str, value: &str) {
                self.attributes.set(name, value);
            }

            pub fn has_attribute(&self, name: &str) -> bool {
                self.attributes.get(name).is_some()
            }

            pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
                self.attributes.remove(name)
            }
        }

        impl HyperlinkElementUtils for $name {
            fn get_attribute(&self, name: &str) -> Option<&str> {
                self.attributes.get(name)
            }

            fn set_attribute(&mut self, name: &str, value: &str) {
                self.attributes.set(name, value);
            }

            fn owner_document(&self) -> &Document {
                &self.document
            }

            fn url_cache(&self) -> &UrlCache {
                &self.url
            }
        }

        /// `toString()`: same as the `href` getter
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.href())
            }
        }
    };
}

hyperlink_element!(
    /// `<a>` element
    HtmlAnchorElement,
    "a"
);

hyperlink_element!(
    /// `<area>` element
    HtmlAreaElement,
    "area"
);
