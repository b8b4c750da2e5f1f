#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use eyre::{Context, Result};

use crate::{
    api::ArcApi,
    models::{Page, RegisterRequest, User},
};

use super::Session;

/// Login, registration and logout against the backend, keeping the local
/// session in step.
pub struct Auth {
    api: ArcApi,
    session: Session,
}

impl Auth {
    pub fn new(api: ArcApi, session: Session) -> Self {
        Self { api, session }
    }

    /// Log in and store the session. Returns the profile and the page the
    /// user should land on.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, Page)> {
        let token = self
            .api
            .login(username.trim().to_string(), password.to_string())
            .await?;

        self.session.save_token(&token.access_token).await?;
        self.api.set_token(Some(token.access_token));

        let user = match self.api.me().await {
            Ok(user) => user,
            Err(err) => {
                log::error!("Failed to fetch profile after login: {}", err);
                self.forget().await?;
                return Err(err.wrap_err("fetching profile"));
            }
        };

        self.session.save_user(&user).await?;
        log::info!("Logged in as {} ({})", user.username, user.role());
        let page = Page::landing(Some(&user));
        Ok((user, page))
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<User> {
        let request = RegisterRequest::new(username.trim(), password).with_email(email);
        let user = self.api.register(request).await?;
        log::info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Always ends with a cleared session, even when the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        if let Err(err) = self.api.logout().await {
            log::error!("Logout error: {}", err);
        }
        self.forget().await
    }

    pub async fn refresh_profile(&self) -> Result<User> {
        self.session.require_authenticated().await?;
        let user = self.api.me().await.wrap_err("fetching profile")?;
        self.session.save_user(&user).await?;
        Ok(user)
    }

    pub async fn current_user(&self) -> Result<Option<User>> {
        if !self.session.is_authenticated().await? {
            return Ok(None);
        }
        self.session.user().await
    }

    /// Drop the local session without talking to the backend.
    pub async fn forget(&self) -> Result<()> {
        self.api.set_token(None);
        self.session.clear().await
    }
}
