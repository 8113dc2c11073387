//! Locale lookup.
//!
//! Widgets never translate. They carry a default string and, optionally, a
//! pre-translated alternate, and ask the ambient [`LocaleSource`] which one to
//! show. The alternate locale is Chinese (`zh`).

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToastError};

/// A two-letter, lowercase locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale([u8; 2]);

impl Locale {
    /// English, the default locale.
    pub const EN: Locale = Locale(*b"en");
    /// Chinese, the locale served by alternate strings.
    pub const ZH: Locale = Locale(*b"zh");

    /// Parse a two-letter tag, case-insensitively.
    pub fn new(tag: &str) -> Result<Self> {
        match tag.trim().as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok(Self([a.to_ascii_lowercase(), b.to_ascii_lowercase()]))
            }
            _ => Err(ToastError::InvalidLocale(tag.to_owned())),
        }
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII letters by construction.
        std::str::from_utf8(&self.0).unwrap_or("en")
    }

    /// Whether alternate strings should be shown for this locale.
    pub fn is_alternate(&self) -> bool {
        *self == Self::ZH
    }

    /// Pick `alternate` when this is the alternate locale and one was
    /// supplied, `default` otherwise.
    pub fn pick<'a>(&self, default: &'a str, alternate: Option<&'a str>) -> &'a str {
        match alternate {
            Some(alt) if self.is_alternate() => alt,
            _ => default,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::EN
    }
}

impl FromStr for Locale {
    type Err = ToastError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that knows the ambient locale.
pub trait LocaleSource {
    fn locale(&self) -> Locale;
}

/// A locale fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedLocale(pub Locale);

impl LocaleSource for FixedLocale {
    fn locale(&self) -> Locale {
        self.0
    }
}

/// Reads the `locale` cookie out of a `Cookie` header value.
///
/// A missing or malformed cookie means English.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieLocale {
    header: String,
}

impl CookieLocale {
    /// Name of the cookie holding the locale tag.
    pub const COOKIE: &'static str = "locale";

    /// Wrap a raw header value such as `"theme=dark; locale=zh"`.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// The raw value of cookie `name`, if present.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.header.split(';').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then(|| value.trim())
        })
    }
}

impl LocaleSource for CookieLocale {
    fn locale(&self) -> Locale {
        match self.cookie(Self::COOKIE).map(Locale::new) {
            Some(Ok(locale)) => locale,
            Some(Err(err)) => {
                tracing::debug!(%err, "ignoring locale cookie");
                Locale::EN
            }
            None => Locale::EN,
        }
    }
}
