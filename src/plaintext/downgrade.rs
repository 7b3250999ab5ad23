//! HTML to plain-text conversion for the multipart alternative body

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::sanitizer::{BasicSanitizer, Sanitizer};

/// Two-character whitespace runs and the character each collapses to.
/// Applied in this order on every pass.
const WHITESPACE_PAIRS: [(&str, &str); 16] = [
    ("  ", " "),
    (" \t", " "),
    (" \r", " "),
    (" \n", " "),
    ("\t\t", "\t"),
    ("\t ", "\t"),
    ("\t\r", "\t"),
    ("\t\n", "\t"),
    ("\r\r", "\r"),
    ("\r ", "\r"),
    ("\r\t", "\r"),
    ("\r\n", "\r"),
    ("\n\n", "\n"),
    ("\n ", "\n"),
    ("\n\t", "\n"),
    ("\n\r", "\n"),
];

lazy_static! {
    static ref ANCHOR: Regex = Regex::new(r#"(?i)<a href="(.*?)">(.*?)</a>"#).unwrap();
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref TRIPLE_BRACKET: Regex = Regex::new(r"<<<|>>>").unwrap();
    static ref INVISIBLE_BLOCKS: Vec<Regex> = vec![
        Regex::new(r"(?si)<head[^>]*?>.*?</head>").unwrap(),
        Regex::new(r"(?si)<style[^>]*?>.*?</style>").unwrap(),
        Regex::new(r"(?si)<script[^>]*?.*?</script>").unwrap(),
        Regex::new(r"(?si)<noscript[^>]*?.*?</noscript>").unwrap(),
    ];
    // ASCII whitespace only: U+00A0 marks an empty placeholder and must survive
    static ref LINE_BREAKS: Regex = Regex::new(r"(?i)(<br */?>(?-u:\s)*)+").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[a-zA-Z/!?][^>]*>").unwrap();
}

/// Converts rendered HTML bodies into readable plain text
#[derive(Clone)]
pub struct PlainTextDowngrader {
    sanitizer: Arc<dyn Sanitizer>,
}

impl Default for PlainTextDowngrader {
    fn default() -> Self {
        Self::new(Arc::new(BasicSanitizer::default()))
    }
}

impl PlainTextDowngrader {
    pub fn new(sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self { sanitizer }
    }

    /// Run the full conversion pipeline. Stages that find nothing to change
    /// pass their input through untouched.
    pub fn downgrade(&self, html: &str) -> String {
        let text = self.sanitizer.textarea(html);
        let text = inline_links(&text);
        let text = COMMENT.replace_all(&text, "").into_owned();
        let text = TRIPLE_BRACKET.replace_all(&text, "").into_owned();
        let text = remove_invisible_blocks(&text);
        let text = LINE_BREAKS.replace_all(&text, "<br />").into_owned();
        let text = TAG.replace_all(&text, "").into_owned();
        collapse_whitespace(&text)
    }
}

/// Convert HTML to plain text with the default sanitizer
pub fn to_plain_text(html: &str) -> String {
    PlainTextDowngrader::default().downgrade(html)
}

/// Rewrite `<a href="URL">TEXT</a>` as `TEXT (URL)`
fn inline_links(html: &str) -> String {
    let html = html.replace(" target=\"_blank\"", "");
    ANCHOR.replace_all(&html, "${2} (${1})").into_owned()
}

fn remove_invisible_blocks(html: &str) -> String {
    INVISIBLE_BLOCKS
        .iter()
        .fold(html.to_string(), |acc, pattern| {
            pattern.replace_all(&acc, "").into_owned()
        })
}

/// Collapse adjacent whitespace characters until a fixed point is reached.
///
/// Every effective pass shortens the string, so the loop is bounded by its length.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut current = text.to_string();

    for _ in 0..=text.len() {
        let next = WHITESPACE_PAIRS
            .iter()
            .fold(current.clone(), |acc, (pair, first)| acc.replace(pair, first));

        if next == current {
            break;
        }
        current = next;
    }

    current
}
