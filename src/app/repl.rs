#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use eyre::Result;

use crate::{
    api::is_unauthorized,
    config::Configuration,
    info_notice,
    models::NoticeMessage,
    success_notice,
    ui::{self, Input, Renderer, TypingIndicator, table},
    warn_notice,
};

use super::{ChatSession, ThemeManager};

pub const HELP: &str = "Commands:
  /new             start a new conversation
  /list            list your conversations
  /open <n|id>     open a conversation by list number or id
  /delete <n|id>   delete a conversation
  /clear           delete all conversations
  /rename <title>  rename the open conversation
  /theme           toggle between light and dark
  /help            show this help
  /quit, /exit     leave the chat
Anything else is sent to the assistant.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Send(String),
    New,
    List,
    Open(String),
    Delete(String),
    Clear,
    Rename(String),
    Theme,
    Help,
    Quit,
    Usage(&'static str),
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Send(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name.to_lowercase().as_str(), arg) {
        ("new", _) => ReplCommand::New,
        ("list" | "ls", _) => ReplCommand::List,
        ("open", "") => ReplCommand::Usage("/open <n|id>"),
        ("open", arg) => ReplCommand::Open(arg.to_string()),
        ("delete" | "rm", "") => ReplCommand::Usage("/delete <n|id>"),
        ("delete" | "rm", arg) => ReplCommand::Delete(arg.to_string()),
        ("clear", _) => ReplCommand::Clear,
        ("rename", "") => ReplCommand::Usage("/rename <title>"),
        ("rename", arg) => ReplCommand::Rename(arg.to_string()),
        ("theme", _) => ReplCommand::Theme,
        ("help" | "?", _) => ReplCommand::Help,
        ("quit" | "exit" | "q", _) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive chat on stdin/stdout.
pub struct Repl {
    chat: ChatSession,
    theme: ThemeManager,
    renderer: Renderer,
    input: Input,
    assume_yes: bool,
    interactive: bool,
}

impl Repl {
    pub fn new(chat: ChatSession, theme: ThemeManager, input: Input) -> Self {
        let renderer = theme.renderer();
        Self {
            chat,
            theme,
            renderer,
            input,
            assume_yes: false,
            interactive: true,
        }
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Open an existing conversation before the loop starts.
    pub async fn open(&mut self, reference: &str) -> Result<()> {
        self.handle(ReplCommand::Open(reference.to_string())).await?;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", Configuration::instance().hello_message());
        println!("Type /help for commands.");

        loop {
            let prompt = format!("{}> ", self.chat.title());
            let Some(line) = self.input.read_line(&prompt).await? else {
                println!();
                break;
            };

            match self.handle(parse_line(&line)).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => {
                    if is_unauthorized(&err) {
                        return Err(err);
                    }
                    log::error!("Command failed: {:#}", err);
                    self.notice(NoticeMessage::error(format!("{:#}", err)));
                }
            }
        }
        Ok(())
    }

    pub async fn handle(&mut self, command: ReplCommand) -> Result<Flow> {
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Send(text) => self.send(&text).await?,
            ReplCommand::New => {
                self.chat.start_new_chat();
                self.notice(info_notice!("Started a new conversation"));
            }
            ReplCommand::List => {
                self.chat.load_conversations().await?;
                println!(
                    "{}",
                    table::conversation_table(self.chat.conversations(), self.chat.current())
                );
            }
            ReplCommand::Open(reference) => {
                let id = self.resolve(&reference).await?;
                self.chat.open_conversation(&id).await?;
                println!("== {} ==", self.chat.title());
                for message in self.chat.transcript() {
                    println!("{}\n", self.renderer.message(message)?);
                }
            }
            ReplCommand::Delete(reference) => {
                let id = self.resolve(&reference).await?;
                if self.confirm(&format!("Delete conversation {}?", id)).await? {
                    self.chat.delete_conversation(&id).await?;
                    self.notice(success_notice!("Conversation deleted"));
                }
            }
            ReplCommand::Clear => {
                let count = self.chat.load_conversations().await?.len();
                if count == 0 {
                    self.notice(info_notice!("No conversations to delete"));
                } else if self
                    .confirm(&format!("Delete all {} conversations?", count))
                    .await?
                {
                    let deleted = self.chat.clear_all().await?;
                    self.notice(success_notice!(format!(
                        "Deleted {} conversations",
                        deleted
                    )));
                }
            }
            ReplCommand::Rename(title) => match self.chat.current().map(str::to_string) {
                Some(id) => {
                    self.chat.rename_conversation(&id, &title).await?;
                    self.notice(success_notice!(format!(
                        "Renamed to {}",
                        self.chat.title()
                    )));
                }
                None => self.notice(warn_notice!(
                    "Send a message or open a conversation before renaming it"
                )),
            },
            ReplCommand::Theme => {
                let theme = self.theme.toggle_theme().await?;
                self.renderer = self.theme.renderer();
                self.notice(info_notice!(format!("Switched to the {} theme", theme)));
            }
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => return Ok(Flow::Quit),
            ReplCommand::Usage(usage) => self.notice(warn_notice!(format!("usage: {}", usage))),
            ReplCommand::Unknown(command) => self.notice(warn_notice!(format!(
                "unknown command {}, type /help for the list of commands",
                command
            ))),
        }
        Ok(Flow::Continue)
    }

    async fn send(&mut self, text: &str) -> Result<()> {
        let mut typing = if self.interactive {
            TypingIndicator::start("assistant is typing")
        } else {
            TypingIndicator::hidden()
        };
        let reply = self.chat.send_message(text).await;
        typing.stop();

        if let Some(reply) = reply {
            println!("{}\n", self.renderer.message(&reply)?);
        }
        match self.chat.take_error() {
            Some(err) if is_unauthorized(&err) => Err(err),
            _ => Ok(()),
        }
    }

    async fn resolve(&mut self, reference: &str) -> Result<String> {
        if self.chat.conversations().is_empty() {
            self.chat.load_conversations().await?;
        }
        Ok(self.chat.resolve(reference)?)
    }

    async fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.input.confirm(question).await
    }

    fn notice(&self, notice: NoticeMessage) {
        ui::print_notice(&self.renderer, &notice);
    }
}
