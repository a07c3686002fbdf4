use super::*;

const THREE_FILES: &str = "```html\n<!DOCTYPE html><html><head></head><body></body></html>\n```\n\
```css\nbody { margin: 0; }\n```\n```js\nconsole.log('hi');\n```";

fn kinds(session: &Session) -> Vec<MessageKind> {
    session.messages().iter().map(|m| m.kind).collect()
}

// =============================================================================
// begin
// =============================================================================

#[test]
fn begin_records_trimmed_user_message_and_wraps_prompt() {
    let mut session = Session::new();
    let wire = session.begin("  a bakery landing page \n").unwrap();

    assert!(session.is_processing());
    assert_eq!(kinds(&session), vec![MessageKind::User]);
    assert_eq!(session.messages()[0].text, "a bakery landing page");
    assert!(wire.ends_with("The user asked: a bakery landing page"));
    assert!(wire.contains("index.html, style.css, script.js"));
}

#[test]
fn begin_rejects_blank_prompt_without_side_effects() {
    let mut session = Session::new();
    assert_eq!(session.begin("   \t"), Err(SessionError::EmptyPrompt));
    assert!(session.messages().is_empty());
    assert!(!session.is_processing());
}

#[test]
fn begin_rejects_second_outstanding_request() {
    let mut session = Session::new();
    session.begin("first").unwrap();
    assert_eq!(session.begin("second"), Err(SessionError::Busy));
    assert_eq!(session.messages().len(), 1);
}

// =============================================================================
// complete / fail
// =============================================================================

#[test]
fn complete_with_files_records_ai_then_success() {
    let mut session = Session::new();
    session.begin("site").unwrap();
    let extracted = session.complete(THREE_FILES);

    assert!(!session.is_processing());
    assert_eq!(extracted.len(), 3);
    assert_eq!(kinds(&session), vec![MessageKind::User, MessageKind::Ai, MessageKind::Success]);
    assert_eq!(session.messages()[1].text, THREE_FILES);
    assert_eq!(session.messages()[2].text, "✅ Generated 3 files: index.html, style.css, script.js");
    assert_eq!(session.files().len(), 3);
}

#[test]
fn complete_without_files_warns_then_shows_raw_text() {
    let mut session = Session::new();
    session.begin("explain flexbox").unwrap();
    let extracted = session.complete("Flexbox lays items out along one axis.");

    assert!(extracted.is_empty());
    assert_eq!(kinds(&session), vec![MessageKind::User, MessageKind::Warning, MessageKind::Ai]);
    assert_eq!(session.messages()[1].text, NO_FILES_WARNING);
    assert_eq!(session.messages()[2].text, "Flexbox lays items out along one axis.");
    assert!(session.files().is_empty());
}

#[test]
fn files_accumulate_across_generations() {
    let mut session = Session::new();
    session.begin("site").unwrap();
    session.complete(THREE_FILES);

    session.begin("new page").unwrap();
    session.complete("```html\n<!-- about.html -->\n<p>about</p>\n```\n```css\n.x { color: red; }\n```");

    let names: Vec<_> = session.files().names().collect();
    assert_eq!(names, vec!["index.html", "style.css", "script.js", "about.html"]);
    assert_eq!(session.files().get("style.css"), Some(".x { color: red; }"));
}

#[test]
fn fail_records_error_and_releases_flag() {
    let mut session = Session::new();
    session.begin("site").unwrap();
    session.fail("Server error: Prompt required");

    assert!(!session.is_processing());
    assert_eq!(kinds(&session), vec![MessageKind::User, MessageKind::Error]);
    assert!(session.begin("retry").is_ok());
}

// =============================================================================
// clear / preview
// =============================================================================

#[test]
fn clear_wipes_everything() {
    let mut session = Session::new();
    session.begin("site").unwrap();
    session.complete(THREE_FILES);
    session.clear();

    assert!(session.messages().is_empty());
    assert!(session.files().is_empty());
    assert!(!session.is_processing());
}

#[test]
fn preview_uses_accumulated_files() {
    let mut session = Session::new();
    assert_eq!(session.preview(), crate::preview::NO_HTML_PLACEHOLDER);

    session.begin("site").unwrap();
    session.complete(THREE_FILES);
    let preview = session.preview();
    assert!(preview.contains("<style>body { margin: 0; }</style></head>"));
    assert!(preview.contains("<script>console.log('hi');</script></body>"));
}

#[test]
fn message_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&MessageKind::Warning).unwrap(), "\"warning\"");
    assert_eq!(MessageKind::Ai.as_str(), "ai");
}
