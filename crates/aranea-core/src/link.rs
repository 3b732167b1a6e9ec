//! The link model: hyperlinks exactly as they appear in markup.
//!
//! Discovered hrefs are never resolved against the page that carried them.
//! An href with a scheme and host becomes [`Link::Absolute`]; everything
//! else (paths, fragments, query-only references) stays verbatim as
//! [`Link::Relative`]. Normalization is deliberately minimal: one trailing
//! slash is trimmed from the path before a link is used as a dedup key.
//! Nothing else is canonicalized, so URLs differing in query parameter
//! order (for example) are distinct identities.

use std::fmt;

use url::Url;

/// A hyperlink discovered in a page, preserved as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Link {
    /// Fully qualified URL with scheme and host.
    Absolute(Url),
    /// Relative or fragment-only reference, unresolved.
    Relative(String),
}

impl Link {
    /// Parse an href value.
    ///
    /// A value with no scheme is a relative reference, not an error; only
    /// genuinely malformed input (bad IPv6 literal, invalid characters in
    /// the host) is rejected.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        match Url::parse(href) {
            Ok(url) => Ok(Link::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Link::Relative(href.to_string())),
            Err(e) => Err(e),
        }
    }

    /// The identity used for frontier membership and dedup: the same link
    /// with one trailing slash trimmed from its path component.
    ///
    /// The `url` crate always serializes the root path of an http(s) URL as
    /// `/`, so `http://x` and `http://x/` already compare equal; trimming
    /// applies to non-root paths only.
    pub fn normalized(&self) -> Link {
        match self {
            Link::Absolute(url) => {
                let path = url.path();
                if path.len() > 1 && path.ends_with('/') {
                    let trimmed = path[..path.len() - 1].to_string();
                    let mut url = url.clone();
                    url.set_path(&trimmed);
                    Link::Absolute(url)
                } else {
                    Link::Absolute(url.clone())
                }
            }
            Link::Relative(raw) => Link::Relative(trim_relative_path(raw)),
        }
    }

    /// True for links that carry a scheme and host and can be fetched.
    pub fn is_absolute(&self) -> bool {
        matches!(self, Link::Absolute(_))
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Link::Absolute(url)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Absolute(url) => url.fmt(f),
            Link::Relative(raw) => f.write_str(raw),
        }
    }
}

/// Trim one trailing slash from the path portion of a relative reference,
/// leaving any query or fragment intact.
fn trim_relative_path(raw: &str) -> String {
    let cut = raw.find(['?', '#']).unwrap_or(raw.len());
    let (path, rest) = raw.split_at(cut);
    match path.strip_suffix('/') {
        Some(stripped) => format!("{stripped}{rest}"),
        None => raw.to_string(),
    }
}
