pub mod admin;
pub mod auth;
pub mod chat;
pub mod commands;
pub mod repl;
pub mod session;
pub mod theme;

#[cfg(test)]
pub(crate) mod testutils;

pub use admin::{AdminConsole, UploadError, validate_document};
pub use auth::Auth;
pub use chat::{ChatError, ChatSession};
pub use repl::Repl;
pub use session::Session;
pub use theme::ThemeManager;

use crate::{api::ArcApi, config::Configuration, storage::ArcStorage};

/// Everything a command needs: the backend client, the stored session and
/// the theme preference.
pub struct App {
    pub api: ArcApi,
    pub storage: ArcStorage,
    pub session: Session,
    pub config: Configuration,
}

impl App {
    pub fn new(api: ArcApi, storage: ArcStorage, config: Configuration) -> Self {
        let session = Session::new(storage.clone());
        Self {
            api,
            storage,
            session,
            config,
        }
    }

    pub fn auth(&self) -> Auth {
        Auth::new(self.api.clone(), self.session.clone())
    }

    pub fn chat(&self) -> ChatSession {
        ChatSession::new(self.api.clone())
    }

    pub async fn admin(&self) -> eyre::Result<AdminConsole> {
        AdminConsole::open(self.api.clone(), &self.session).await
    }

    pub async fn theme(&self) -> eyre::Result<ThemeManager> {
        ThemeManager::init(self.storage.clone(), self.config.theme.clone()).await
    }
}
