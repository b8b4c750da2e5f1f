#[cfg(test)]
#[path = "input_test.rs"]
mod tests;

use eyre::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented reader over stdin shared by prompts and the chat loop.
pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one line. `None` means stdin was closed.
    pub async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush().wrap_err("flushing stdout")?;
        self.lines.next_line().await.wrap_err("reading stdin")
    }

    /// Ask a `y/N` question. Anything but `y`/`yes` is a no, and so is a
    /// closed stdin.
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{} [y/N] ", question)).await?;
        Ok(is_yes(answer.as_deref().unwrap_or_default()))
    }

    /// Read a value that must not be blank, asking again until it is given.
    pub async fn required(&mut self, prompt: &str) -> Result<String> {
        loop {
            match self.read_line(prompt).await? {
                Some(value) if !value.trim().is_empty() => return Ok(value.trim().to_string()),
                Some(_) => continue,
                None => eyre::bail!("input closed"),
            }
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
