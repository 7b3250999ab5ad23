//! Input sanitizer used before rendering and before text conversion

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_ELEMENTS: Vec<Regex> = vec![
        Regex::new(r"(?si)<script\b[^>]*>.*?</script\s*>").unwrap(),
        Regex::new(r"(?si)<iframe\b[^>]*>.*?</iframe\s*>").unwrap(),
        Regex::new(r"(?si)<object\b[^>]*>.*?</object\s*>").unwrap(),
        Regex::new(r"(?i)<embed\b[^>]*>").unwrap(),
    ];
    static ref EVENT_HANDLER_ATTR: Regex =
        Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap();
    static ref JAVASCRIPT_URL: Regex =
        Regex::new(r#"(?i)(href|src)\s*=\s*(["']?)\s*javascript:[^"'\s>]*"#).unwrap();
}

/// HTML and text cleaning applied to message bodies.
///
/// `purify` runs on the HTML body before placeholders are substituted,
/// `textarea` runs first when building the plain-text alternative.
pub trait Sanitizer: Send + Sync {
    /// Neutralize unsafe markup while keeping presentational HTML
    fn purify(&self, html: &str) -> String;

    /// Clean a multi-line text value while keeping visible text and line structure
    fn textarea(&self, text: &str) -> String;
}

/// Pattern-based sanitizer
#[derive(Debug, Clone, Default)]
pub struct BasicSanitizer {
    /// Character cap for `textarea`; unlimited when `None`
    max_length: Option<usize>,
}

impl BasicSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap `textarea` output at `max_length` characters.
    ///
    /// The cap applies to the raw HTML, so head and style blocks count
    /// toward it.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl Sanitizer for BasicSanitizer {
    fn purify(&self, html: &str) -> String {
        let mut out = html.to_string();
        for pattern in UNSAFE_ELEMENTS.iter() {
            out = pattern.replace_all(&out, "").into_owned();
        }
        out = EVENT_HANDLER_ATTR.replace_all(&out, "").into_owned();
        JAVASCRIPT_URL
            .replace_all(&out, "${1}=${2}#")
            .into_owned()
    }

    fn textarea(&self, text: &str) -> String {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        normalized
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .take(self.max_length.unwrap_or(usize::MAX))
            .collect()
    }
}
