//! Page location: path, query string and fragment.

use crate::language::LanguageCode;

/// A parsed page URL, reduced to the parts the site cares about.
///
/// Scheme and host are dropped; every URL handled here is same-origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Path, always starting with `/`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    /// Parse an absolute URL or a path (`/en/page?lang=en#top`).
    pub fn parse(url: &str) -> Self {
        let rest = match url.find("://") {
            Some(i) => {
                let after = &url[i + 3..];
                match after.find(['/', '?', '#']) {
                    Some(j) => &after[j..],
                    None => "",
                }
            }
            None => url,
        };

        let (rest, hash) = match rest.find('#') {
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, String::new()),
        };
        let (path, query) = match rest.find('?') {
            Some(i) => (&rest[..i], rest[i + 1..].to_string()),
            None => (rest, String::new()),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self { path, query, hash }
    }

    /// `?query` or empty.
    pub fn search(&self) -> String {
        if self.query.is_empty() {
            String::new()
        } else {
            format!("?{}", self.query)
        }
    }

    /// Path, query and fragment reassembled.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.path, self.search(), self.hash)
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .find_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                if decode_component(key) == name {
                    Some(decode_component(value))
                } else {
                    None
                }
            })
    }

    /// Language carried by the first path segment, if it is a supported code.
    ///
    /// Segment based: `/en` and `/en/page` match, `/english` does not.
    pub fn language_prefix(&self) -> Option<LanguageCode> {
        let first = self.path.trim_start_matches('/').split('/').next()?;
        // Only an exact lower-case segment counts as a prefix.
        LanguageCode::ALL
            .into_iter()
            .find(|lang| lang.as_str() == first)
    }

    /// Path with the language prefix removed; `/` for a language root.
    pub fn base_page(&self) -> String {
        match self.language_prefix() {
            Some(lang) => {
                let trimmed = self.path.trim_start_matches('/');
                let stripped = &trimmed[lang.as_str().len()..];
                if stripped.is_empty() || stripped == "/" {
                    "/".to_string()
                } else {
                    stripped.to_string()
                }
            }
            None => self.path.clone(),
        }
    }

    /// The same page under another language prefix.
    pub fn path_for(&self, lang: LanguageCode) -> String {
        prefixed_path(lang, &self.base_page())
    }
}

/// Put `page` under `/<lang>`. Root-like pages collapse to `/<lang>`.
pub fn prefixed_path(lang: LanguageCode, page: &str) -> String {
    match page {
        "" | "/" | "/index.html" => format!("/{lang}"),
        _ if page.starts_with('/') => format!("/{lang}{page}"),
        _ => format!("/{lang}/{page}"),
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
