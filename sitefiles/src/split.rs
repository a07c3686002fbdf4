//! Response splitter: model text → named website files.
//!
//! DESIGN
//! ======
//! The model is asked for `index.html`, `style.css` and `script.js` in
//! separate fenced blocks, but it does not always comply. Each fenced
//! segment is named by the first rule in this chain that matches:
//!
//! 1. `Hint`: a filename comment in the first three lines of the body.
//! 2. `Tag`: the fence's language tag (`html`, `css`, `js`).
//! 3. `Content`: recognizable markup/style/script in the body.
//! 4. `Fallback`: `file1.<ext>`, `file2.<ext>`, ... unique within one call.
//!
//! Tag and content checks are interleaved per file kind: an `html` tag or
//! HTML-looking body wins over any CSS evidence, and so on down the list.
//! The whole routine is a pure function of its input.

use std::sync::LazyLock;

use regex::Regex;

use crate::files::FileSet;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:([A-Za-z0-9_]+)\s*\n)?(.*?)```").expect("fence pattern"));

/// Comment styles checked for a filename hint, in priority order.
static HINTS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"<!--\s*([A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+)\s*-->",
        r"//\s*([A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+)",
        r"/\*\s*([A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+)\s*\*/",
        r"#\s*([A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("hint pattern"))
});

static HTML_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype html|<html").expect("html pattern"));
static CSS_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)body\s*\{|\.[A-Za-z0-9_-]+\s*\{").expect("css pattern"));
static JS_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"document\.|window\.|addEventListener").expect("js pattern"));

const HINT_LINES: usize = 3;

// =============================================================================
// TYPES
// =============================================================================

/// One fenced block found in the model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Lower-cased language tag; empty when the fence had none.
    pub tag: String,
    /// Block body with surrounding whitespace trimmed.
    pub body: &'a str,
}

/// Which rule named a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameRule {
    Hint(String),
    Tag(&'static str),
    Content(&'static str),
    /// No rule matched; carries the extension (with leading dot) for
    /// generated `fileN` names.
    Fallback(&'static str),
}

struct FileKind {
    name: &'static str,
    tags: &'static [&'static str],
    body: &'static LazyLock<Regex>,
}

static KINDS: [FileKind; 3] = [
    FileKind { name: "index.html", tags: &["html"], body: &HTML_BODY },
    FileKind { name: "style.css", tags: &["css"], body: &CSS_BODY },
    FileKind { name: "script.js", tags: &["js", "javascript"], body: &JS_BODY },
];

// =============================================================================
// PUBLIC API
// =============================================================================

/// Split a model response into an ordered filename → content mapping.
///
/// Returns an empty set when the text has no fenced segments; callers are
/// expected to show the raw text in that case.
#[must_use]
pub fn split_response(text: &str) -> FileSet {
    let mut files = FileSet::new();
    for segment in fenced_segments(text) {
        let name = match resolve_name(&segment.tag, segment.body) {
            NameRule::Hint(name) => name,
            NameRule::Tag(name) | NameRule::Content(name) => name.to_owned(),
            NameRule::Fallback(ext) => next_free_name(&files, ext),
        };
        files.insert(name, segment.body);
    }
    files
}

/// Iterate over every fenced segment in order of appearance.
pub fn fenced_segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    FENCE.captures_iter(text).map(|caps| Segment {
        tag: caps
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default(),
        body: caps.get(2).map_or("", |m| m.as_str().trim()),
    })
}

/// Apply the naming chain to one segment. Earlier rules always win.
#[must_use]
pub fn resolve_name(tag: &str, body: &str) -> NameRule {
    if let Some(name) = filename_hint(body) {
        return NameRule::Hint(name);
    }

    for kind in KINDS.iter() {
        if kind.tags.contains(&tag) {
            return NameRule::Tag(kind.name);
        }
        if kind.body.is_match(body) {
            return NameRule::Content(kind.name);
        }
    }

    NameRule::Fallback(fallback_extension(tag))
}

/// Look for a filename comment in the first three lines of `body`.
#[must_use]
pub fn filename_hint(body: &str) -> Option<String> {
    let head = body.lines().take(HINT_LINES).collect::<Vec<_>>().join("\n");
    HINTS
        .iter()
        .find_map(|re| re.captures(&head))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

// =============================================================================
// HELPERS
// =============================================================================

fn fallback_extension(tag: &str) -> &'static str {
    match tag {
        "css" => ".css",
        "html" => ".html",
        t if t.starts_with("js") => ".js",
        _ => ".txt",
    }
}

/// First `fileN<ext>` (N from 1) not yet present in `files`.
fn next_free_name(files: &FileSet, ext: &str) -> String {
    (1_usize..)
        .map(|i| format!("file{i}{ext}"))
        .find(|name| !files.contains(name))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "split_test.rs"]
mod tests;
