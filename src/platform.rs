// Tabfinder platform paths
// Linux:   $XDG_CONFIG_HOME/tabfinder or ~/.config/tabfinder
// macOS:   ~/Library/Application Support/Tabfinder
// Windows: %APPDATA%/Tabfinder

use std::env;
use std::path::PathBuf;

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory for Tabfinder.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Tabfinder")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("Tabfinder")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("tabfinder"),
            _ => home_dir().join(".config").join("tabfinder"),
        }
    }
}
