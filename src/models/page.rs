#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

use std::fmt::Display;
use thiserror::Error;

use super::User;

/// The screens of the client. Every invocation without a subcommand lands on
/// one of them depending on the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Chat,
    Admin,
}

impl Page {
    pub fn landing(user: Option<&User>) -> Page {
        match user {
            None => Page::Login,
            Some(user) if user.is_superuser => Page::Admin,
            Some(_) => Page::Chat,
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Login => write!(f, "login"),
            Page::Chat => write!(f, "chat"),
            Page::Admin => write!(f, "admin"),
        }
    }
}

/// Client-side access checks. These only steer the user to the right page;
/// the backend enforces the real permissions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("you are not logged in, run `regbot login` first")]
    NotAuthenticated,
    #[error("you do not have permission to access the admin dashboard")]
    NotAdmin,
}

pub fn require_authenticated(token: Option<&str>) -> Result<(), AccessError> {
    match token {
        Some(token) if !token.is_empty() => Ok(()),
        _ => Err(AccessError::NotAuthenticated),
    }
}

pub fn require_admin(token: Option<&str>, user: Option<&User>) -> Result<(), AccessError> {
    require_authenticated(token)?;
    match user {
        Some(user) if user.is_superuser => Ok(()),
        _ => Err(AccessError::NotAdmin),
    }
}
