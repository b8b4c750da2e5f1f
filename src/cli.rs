#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use std::path::PathBuf;

use crate::config::{self, Configuration, load_configuration, lookup_config_path};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"A terminal client for the regulation lookup assistant

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/regbot/config.toml
    * $HOME/.config/regbot/config.toml
    * $HOME/.regbot.toml

Without a command, regbot opens the page that fits the stored session: the
chat for users, the dashboard for administrators and a login hint otherwise.
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Backend base url, overrides `api.base_url`
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Print start-up steps
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Show the version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        email: Option<String>,
        /// Log in right after registering
        #[arg(long)]
        login: bool,
    },
    /// Log out and forget the stored session
    Logout {
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the logged in user
    Whoami {
        /// Fetch the profile from the backend instead of the stored copy
        #[arg(long)]
        refresh: bool,
    },
    /// Ask a question, or start an interactive chat without one
    Chat {
        /// Continue a conversation by list number or id
        #[arg(short, long, value_name = "ID")]
        conversation: Option<String>,
        message: Vec<String>,
    },
    /// Manage your conversations
    #[command(subcommand, visible_alias = "conv")]
    Conversations(ConversationsCommand),
    /// Manage the knowledge base (administrators only)
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ConversationsCommand {
    /// List conversations
    #[command(visible_alias = "ls")]
    List,
    /// Print the messages of a conversation
    Show { conversation: String },
    /// Delete a conversation
    #[command(visible_alias = "rm")]
    Delete {
        conversation: String,
        #[command(flatten)]
        confirm: Confirm,
    },
    /// Delete every conversation
    Clear {
        #[command(flatten)]
        confirm: Confirm,
    },
    /// Rename a conversation
    Rename {
        conversation: String,
        #[arg(required = true)]
        title: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum AdminCommand {
    /// Knowledge base statistics
    Stats,
    /// List uploaded documents
    #[command(visible_alias = "docs")]
    Documents,
    /// Upload documents (.pdf, .docx, .doc, .txt)
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete an uploaded document
    Delete {
        filename: String,
        #[command(flatten)]
        confirm: Confirm,
    },
    /// Rebuild the knowledge base from the uploaded documents
    Rebuild {
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ThemeCommand {
    Show,
    Toggle,
    Set { theme: String },
}

#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct Confirm {
    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        let mut config = if config_path.is_empty() {
            // No config path is specified just use the default config
            Configuration::default()
        } else {
            load_configuration(config_path.as_str()).wrap_err("loading configuration")?
        };

        if let Some(api_url) = &self.api_url {
            config.api.base_url = api_url.clone();
        }
        if self.verbose {
            config.general.verbose = true;
        }
        Ok(config)
    }

    pub fn subcommand(&self) -> Option<&Commands> {
        self.command.as_ref()
    }

    pub fn take_command(&mut self) -> Option<Commands> {
        self.command.take()
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }
}
