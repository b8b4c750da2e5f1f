#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use eyre::{Context, Result};

use crate::{
    api::ArcApi,
    config::constants::{TOKEN_KEY, USER_KEY},
    models::{AccessError, Page, User, require_admin, require_authenticated},
    storage::ArcStorage,
};

/// The persisted login: a bearer token and the profile it belongs to.
#[derive(Clone)]
pub struct Session {
    storage: ArcStorage,
}

impl Session {
    pub fn new(storage: ArcStorage) -> Self {
        Self { storage }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        let token = self.storage.get(TOKEN_KEY).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub async fn save_token(&self, token: &str) -> Result<()> {
        self.storage
            .set(TOKEN_KEY, token)
            .await
            .wrap_err("saving token")
    }

    /// The stored profile. A profile that no longer parses is treated as
    /// missing.
    pub async fn user(&self) -> Result<Option<User>> {
        let raw = match self.storage.get(USER_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                log::warn!("Ignoring unreadable stored user: {}", err);
                Ok(None)
            }
        }
    }

    pub async fn save_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user).wrap_err("serializing user")?;
        self.storage
            .set(USER_KEY, &raw)
            .await
            .wrap_err("saving user")
    }

    /// Forget the token and profile. The theme preference is kept.
    pub async fn clear(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY).await?;
        self.storage.remove(USER_KEY).await?;
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token().await?.is_some())
    }

    pub async fn is_admin(&self) -> Result<bool> {
        Ok(self
            .user()
            .await?
            .map(|user| user.is_superuser)
            .unwrap_or(false))
    }

    pub async fn landing_page(&self) -> Result<Page> {
        if !self.is_authenticated().await? {
            return Ok(Page::Login);
        }
        Ok(Page::landing(self.user().await?.as_ref()))
    }

    pub async fn require_authenticated(&self) -> Result<()> {
        require_authenticated(self.token().await?.as_deref())?;
        Ok(())
    }

    pub async fn require_admin(&self) -> Result<User> {
        let token = self.token().await?;
        let user = self.user().await?;
        require_admin(token.as_deref(), user.as_ref())?;
        user.ok_or_else(|| AccessError::NotAdmin.into())
    }

    /// Hand the stored token to the API client.
    pub async fn restore(&self, api: &ArcApi) -> Result<()> {
        let token = self.token().await?;
        log::debug!("Restoring session (token present: {})", token.is_some());
        api.set_token(token);
        Ok(())
    }
}
