use serde::{Deserialize, Serialize};

use super::tab::DisplayMode;

/// Options read once when the popup opens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionSettings {
    /// List only the tabs of the window that opened the popup.
    pub only_current_window: bool,
    pub theme: ThemeSettings,
    /// Upper bound on any single host call; 0 waits forever.
    pub gateway_timeout_ms: u64,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            only_current_window: true,
            theme: ThemeSettings::default(),
            gateway_timeout_ms: 5000,
        }
    }
}

impl ExtensionSettings {
    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_only_current_window(self.only_current_window)
    }
}

/// Theme selection, consumed by the view layer only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeSettings {
    pub name: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            name: "dark".to_string(),
        }
    }
}
