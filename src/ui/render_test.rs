use syntect::highlighting::ThemeSet;

use super::*;
use crate::config::constants::LIGHT_HIGHLIGHT_THEME;

fn themed() -> Renderer {
    let mut themes = ThemeSet::load_defaults();
    Renderer::new(themes.themes.remove(LIGHT_HIGHLIGHT_THEME).unwrap())
}

const ANSWER: &str = "Use the helper:\n```python\nprint(\"hi\")\n```\nDone.";

#[test]
fn test_plain_content_keeps_text() {
    let out = Renderer::plain().content(ANSWER).unwrap();
    assert_eq!(out, ANSWER);
}

#[test]
fn test_highlighted_code_block() {
    let out = themed().content(ANSWER).unwrap();
    assert!(out.starts_with("Use the helper:\n```python\n"));
    assert!(out.ends_with("\n```\nDone."));
    assert!(out.contains("\x1b[38;2;"));
    assert!(out.contains("print"));
}

#[test]
fn test_message_labels() {
    let renderer = Renderer::plain();
    assert_eq!(
        renderer.message(&Message::user("Hello")).unwrap(),
        "you>\nHello"
    );
    assert_eq!(
        renderer.message(&Message::assistant("Hi there")).unwrap(),
        "assistant>\nHi there"
    );
}

#[test]
fn test_failed_reply_is_error_notice() {
    let renderer = Renderer::plain();
    let message = Message::assistant("Sorry").with_failed(true);
    assert_eq!(renderer.message(&message).unwrap(), "[error] Sorry");
}

#[test]
fn test_notice_colors() {
    let notice = NoticeMessage::warning("careful");
    assert_eq!(Renderer::plain().notice(&notice), "[warning] careful");
    assert_eq!(
        themed().notice(&notice),
        "\x1b[38;2;251;140;0m[warning]\x1b[0m careful"
    );
}
