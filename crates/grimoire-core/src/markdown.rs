//! The limited markdown-to-HTML transform for card bodies.
//!
//! Card bodies are not full markdown. The backend emits a small dialect -
//! bold, single-underscore italics, relative links, and `---` rules - and
//! the transform below is an ordered chain of independent substitutions.
//! The order is load-bearing: links are rendered before `---` substitution
//! so the rule pass never rewrites text a link pass produced.

use std::sync::LazyLock;

use regex::Regex;

/// Origin prepended to the relative URLs in `[label](url)` links.
pub const LINK_ORIGIN: &str = "https://2e.aonprd.com";

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold regex should compile"));

/// Single-underscore spans with no underscores or newlines inside.
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\r\n]*?)_").expect("italic regex should compile"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("link regex should compile"));

/// Three or more consecutive line breaks, collapsed to a paragraph break.
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]{3,}").expect("paragraph regex should compile"));

/// Extract and transform the printable body of a record's markdown text.
///
/// The printable portion starts at the first `---` separator (the text
/// before it is front matter). When no separator exists the whole string
/// is used.
pub fn card_body(markdown: &str) -> String {
    let start = markdown.find("---").unwrap_or(0);
    transform(markdown[start..].trim())
}

/// Apply the ordered substitution chain to an already-extracted body.
///
/// The sequence is fixed: bold, italics, links, paragraph breaks, then
/// horizontal rules.
pub fn transform(body: &str) -> String {
    let body = BOLD_RE.replace_all(body, "<strong>$1</strong>");
    let body = ITALIC_RE.replace_all(&body, "<emph>$1</emph>");
    let body = LINK_RE.replace_all(&body, |caps: &regex::Captures| {
        format!("<a href=\"{}{}\">{}</a>", LINK_ORIGIN, &caps[2], &caps[1])
    });
    let body = PARAGRAPH_RE.replace_all(&body, "\n<p>\n");
    body.replace("---", "<hr />")
}
