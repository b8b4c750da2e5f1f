#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;

use eyre::{Context, Result};
use syntect::highlighting;

use crate::{
    config::{ThemeConfig, constants::THEME_KEY, load_highlight_theme},
    models::Theme,
    storage::ArcStorage,
    ui::Renderer,
};

/// The light/dark preference, persisted across runs, and the code
/// highlighting theme that goes with it.
pub struct ThemeManager {
    storage: ArcStorage,
    config: ThemeConfig,
    current: Theme,
}

impl ThemeManager {
    /// Load the saved preference. Missing or unknown values fall back to the
    /// light theme, which is then persisted.
    pub async fn init(storage: ArcStorage, config: ThemeConfig) -> Result<Self> {
        let saved = storage.get(THEME_KEY).await?;
        let current = Theme::from_stored(saved.as_deref());

        let manager = Self {
            storage,
            config,
            current,
        };
        manager.persist().await?;
        Ok(manager)
    }

    pub fn current_theme(&self) -> Theme {
        self.current
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.current = theme;
        self.persist().await?;
        log::debug!("Theme set to {}", theme);
        Ok(theme)
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.current.toggled()).await
    }

    pub fn highlight_theme_name(&self) -> &str {
        match self.current {
            Theme::Light => &self.config.light,
            Theme::Dark => &self.config.dark,
        }
    }

    pub fn highlight_theme(&self) -> Result<highlighting::Theme> {
        load_highlight_theme(&self.config, self.highlight_theme_name())
    }

    /// A renderer for the current theme. An unusable highlight theme falls
    /// back to plain output.
    pub fn renderer(&self) -> Renderer {
        match self.highlight_theme() {
            Ok(theme) => Renderer::new(theme),
            Err(err) => {
                log::warn!("Rendering without highlighting: {}", err);
                Renderer::plain()
            }
        }
    }

    async fn persist(&self) -> Result<()> {
        self.storage
            .set(THEME_KEY, self.current.as_str())
            .await
            .wrap_err("saving theme")
    }
}
