#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use eyre::{Context, Result};
use syntect::{easy::HighlightLines, highlighting::Theme, util::as_24_bit_terminal_escaped};

use crate::models::{Block, Message, NoticeMessage, Role, conversation::split_blocks};

use super::syntaxes::{SYNTAX_SET, Syntaxes};

const RESET: &str = "\x1b[0m";
const USER_COLOR: (u8, u8, u8) = (94, 53, 177);
const ASSISTANT_COLOR: (u8, u8, u8) = (0, 137, 123);

/// Wrap `text` in a 24-bit foreground color escape.
pub fn paint(text: &str, (r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m{}{}", r, g, b, text, RESET)
}

/// Turns messages and notices into terminal text. Without a highlight theme
/// everything is rendered without escapes.
pub struct Renderer {
    theme: Option<Theme>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }

    pub fn plain() -> Self {
        Self { theme: None }
    }

    fn color(&self, text: &str, color: (u8, u8, u8)) -> String {
        match self.theme {
            Some(_) => paint(text, color),
            None => text.to_string(),
        }
    }

    pub fn notice(&self, notice: &NoticeMessage) -> String {
        let label = format!("[{}]", notice.kind().label());
        format!(
            "{} {}",
            self.color(&label, notice.kind().color()),
            notice.message()
        )
    }

    pub fn message(&self, message: &Message) -> Result<String> {
        if message.failed() {
            return Ok(self.notice(&NoticeMessage::error(message.content.as_str())));
        }

        let (label, color) = match message.role {
            Role::User => ("you", USER_COLOR),
            Role::Assistant => ("assistant", ASSISTANT_COLOR),
            Role::System => ("system", ASSISTANT_COLOR),
        };
        let body = match message.role {
            Role::Assistant => self.content(&message.content)?,
            _ => message.content.clone(),
        };
        Ok(format!("{}\n{}", self.color(&format!("{}>", label), color), body))
    }

    /// Markdown content with fenced code blocks highlighted.
    pub fn content(&self, content: &str) -> Result<String> {
        let mut out = vec![];
        for block in split_blocks(content) {
            match block {
                Block::Text(text) => out.push(text),
                Block::Code(code) => {
                    out.push(format!("```{}", code.language));
                    out.push(self.highlight(&code.language, &code.code)?);
                    out.push("```".to_string());
                }
            }
        }
        Ok(out.join("\n"))
    }

    fn highlight(&self, language: &str, code: &str) -> Result<String> {
        let Some(theme) = &self.theme else {
            return Ok(code.to_string());
        };

        let mut highlight = HighlightLines::new(Syntaxes::get(language), theme);
        let mut lines = vec![];
        for line in code.split('\n') {
            let line_nl = format!("{}\n", line);
            let ranges = highlight
                .highlight_line(&line_nl, &SYNTAX_SET)
                .wrap_err("highlighting code block")?;
            let escaped = as_24_bit_terminal_escaped(&ranges, false);
            lines.push(format!("{}{}", escaped.trim_end_matches('\n'), RESET));
        }
        Ok(lines.join("\n"))
    }
}
