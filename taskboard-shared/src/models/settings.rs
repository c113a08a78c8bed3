/// Per-user preferences

use serde::{Deserialize, Serialize};

/// UI color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Stored user settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: Theme,

    /// When false, board events do not produce notifications
    pub notifications_enabled: bool,

    /// UI language tag
    pub language: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications_enabled: true,
            language: "es".to_string(),
        }
    }
}

/// Partial settings update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettings {
    pub theme: Option<Theme>,
    pub notifications_enabled: Option<bool>,
    pub language: Option<String>,
}

impl UserSettings {
    /// Applies a patch; an empty language is rejected
    pub fn apply(&mut self, patch: UpdateSettings) -> Result<(), String> {
        let language = match patch.language {
            Some(lang) => {
                let lang = lang.trim().to_string();
                if lang.is_empty() {
                    return Err("Language cannot be empty".to_string());
                }
                Some(lang)
            }
            None => None,
        };

        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(enabled) = patch.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(lang) = language {
            self.language = lang;
        }
        Ok(())
    }
}
