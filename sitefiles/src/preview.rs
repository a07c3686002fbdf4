//! Preview assembler: inline the stylesheet and script into the HTML page.
//!
//! Produces one self-contained document suitable for a sandboxed viewer.
//! Only the first matching `<link>`/`<script>` reference (or the first
//! `</head>`/`</body>`) is rewritten. A file with empty content counts as
//! absent.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::files::FileSet;

/// Returned when the file set has no HTML document.
pub const NO_HTML_PLACEHOLDER: &str = "<html><body><h1>No HTML found</h1></body></html>";

static STYLE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*href=["'].*style\.css["'][^>]*>"#).expect("style link pattern")
});
static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]*src=["'].*script\.js["'][^>]*></script>"#).expect("script tag pattern")
});
static HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head>").expect("head pattern"));
static BODY_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</body>").expect("body pattern"));

/// Build a single previewable HTML document from `files`.
#[must_use]
pub fn assemble_preview(files: &FileSet) -> String {
    let Some(html) = pick(files, "index.html", ".html") else {
        return NO_HTML_PLACEHOLDER.to_owned();
    };
    let mut page = html.to_owned();

    if let Some(css) = pick(files, "style.css", ".css") {
        let inline = format!("<style>{css}</style>");
        page = splice(&page, &STYLE_LINK, &inline)
            .unwrap_or_else(|| insert_before(&page, &HEAD_CLOSE, &inline));
    }

    if let Some(js) = pick(files, "script.js", ".js") {
        let inline = format!("<script>{js}</script>");
        page = splice(&page, &SCRIPT_TAG, &inline)
            .unwrap_or_else(|| insert_before(&page, &BODY_CLOSE, &inline));
    }

    page
}

/// Content of `preferred`, else of the first file ending in `suffix`.
fn pick<'a>(files: &'a FileSet, preferred: &str, suffix: &str) -> Option<&'a str> {
    files
        .get(preferred)
        .filter(|content| !content.is_empty())
        .or_else(|| files.find_by_suffix(suffix).map(|(_, content)| content))
        .filter(|content| !content.is_empty())
}

/// Replace the first match of `re` with `replacement`; `None` if no match.
fn splice(page: &str, re: &Regex, replacement: &str) -> Option<String> {
    re.is_match(page)
        .then(|| re.replacen(page, 1, NoExpand(replacement)).into_owned())
}

/// Insert `content` in front of the first match of `re`. Unchanged when the
/// closing tag is missing.
fn insert_before(page: &str, re: &Regex, content: &str) -> String {
    match re.find(page) {
        Some(m) => {
            let mut out = String::with_capacity(page.len() + content.len());
            out.push_str(&page[..m.start()]);
            out.push_str(content);
            out.push_str(&page[m.start()..]);
            out
        }
        None => page.to_owned(),
    }
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
