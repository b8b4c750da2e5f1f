#[cfg(test)]
#[path = "typing_test.rs"]
mod tests;

use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use tokio::task::JoinHandle;

const FRAMES: [&str; 4] = ["   ", ".  ", ".. ", "..."];
const FRAME_INTERVAL: Duration = Duration::from_millis(300);

/// Animated "assistant is typing" line on stderr. It stops and clears itself
/// when dropped.
pub struct TypingIndicator {
    task: Option<JoinHandle<()>>,
}

impl TypingIndicator {
    pub fn start(label: &str) -> Self {
        let label = label.to_string();
        let task = tokio::spawn(async move {
            let mut frame = 0;
            loop {
                eprint!("\r{}{}", label, FRAMES[frame % FRAMES.len()]);
                let _ = std::io::stderr().flush();
                frame += 1;
                tokio::time::sleep(FRAME_INTERVAL).await;
            }
        });
        Self { task: Some(task) }
    }

    /// An indicator that draws nothing, for non-interactive output.
    pub fn hidden() -> Self {
        Self { task: None }
    }

    /// Animate only when stderr is a terminal.
    pub fn on_terminal(label: &str) -> Self {
        if std::io::stderr().is_terminal() {
            Self::start(label)
        } else {
            Self::hidden()
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            eprint!("\r\x1b[2K");
            let _ = std::io::stderr().flush();
        }
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        self.stop();
    }
}
