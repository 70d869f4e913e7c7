//! Persisted light/dark preference.
//!
//! The preference lives under its own key in the same adapter as the
//! collections, as the bare string `"light"` or `"dark"`. Failures here never
//! reach the caller: a failed read falls back to the system scheme and a
//! failed write keeps the in-memory choice for the rest of the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::storage::KeyValueStore;

pub const DEFAULT_THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
    pub loaded: bool,
}

#[derive(Debug)]
pub struct ThemeStore<S: KeyValueStore> {
    storage: S,
    key: String,
    state: watch::Sender<ThemeState>,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_THEME_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            state: watch::Sender::new(ThemeState {
                theme: Theme::Light,
                loaded: false,
            }),
        }
    }

    /// Read the stored preference. Without a valid stored value the system
    /// scheme decides: dark only when the system reports dark.
    pub async fn load(&self, system: Option<Theme>) -> Theme {
        let fallback = match system {
            Some(Theme::Dark) => Theme::Dark,
            _ => Theme::Light,
        };

        let theme = match self.storage.get(&self.key).await {
            Ok(Some(stored)) => stored.parse().unwrap_or_else(|err: UnknownTheme| {
                tracing::warn!(key = %self.key, error = %err, "ignoring stored theme");
                fallback
            }),
            Ok(None) => fallback,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to load theme");
                self.theme()
            }
        };

        self.state.send_replace(ThemeState {
            theme,
            loaded: true,
        });
        theme
    }

    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    /// Flip the theme in memory, then persist it. The new theme is returned
    /// even if saving failed.
    pub async fn toggle(&self) -> Theme {
        let mut next = Theme::Light;
        self.state.send_modify(|state| {
            state.theme = state.theme.toggled();
            next = state.theme;
        });

        if let Err(err) = self.storage.set(&self.key, next.as_str().to_string()).await {
            tracing::error!(key = %self.key, error = %err, "failed to save theme");
        }
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.state.subscribe()
    }
}
