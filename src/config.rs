use std::fs;
use std::path::PathBuf;

use crossterm::event::KeyCode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile mode for the application, selected by the --dev CLI flag. Dev uses
/// a separate config file and log file so experiments never touch real state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(&self) -> &'static str {
        match self {
            Profile::Dev => "trk-dev",
            Profile::Prod => "trk",
        }
    }
}

fn project_dirs(profile: Profile) -> Option<ProjectDirs> {
    ProjectDirs::from("com", "trk", profile.app_name())
}

/// Config directory for the given profile.
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    project_dirs(profile).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Data directory (log files live here) for the given profile.
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    project_dirs(profile).map(|dirs| dirs.data_dir().to_path_buf())
}

pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width_percent: u16,
    #[serde(default = "default_tab")]
    pub default_tab: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            sidebar_width_percent: default_sidebar_width(),
            default_tab: default_tab(),
            key_bindings: KeyBindings::default(),
            config_version: default_config_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_refresh")]
    pub refresh: String,
    #[serde(default = "default_timer_toggle")]
    pub timer_toggle: String,
    #[serde(default = "default_versions")]
    pub versions: String,
    #[serde(default = "default_help")]
    pub help: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            new: default_new(),
            edit: default_edit(),
            delete: default_delete(),
            search: default_search(),
            filter: default_filter(),
            refresh: default_refresh(),
            timer_toggle: default_timer_toggle(),
            versions: default_versions(),
            help: default_help(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_sidebar_width() -> u16 {
    30
}

fn default_tab() -> String {
    "todo".to_string()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_search() -> String {
    "/".to_string()
}

fn default_filter() -> String {
    "f".to_string()
}

fn default_refresh() -> String {
    "r".to_string()
}

fn default_timer_toggle() -> String {
    "s".to_string()
}

fn default_versions() -> String {
    "v".to_string()
}

fn default_help() -> String {
    "?".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirError,
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration for the profile, writing a default file when none
    /// exists yet.
    pub fn load_with_profile(profile: Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            Ok(toml::from_str(&contents)?)
        } else {
            let mut config = Config::default();
            config.save_with_profile(profile)?;
            Ok(config)
        }
    }

    pub fn save_with_profile(&mut self, profile: Profile) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Ok(())
    }

    pub fn get_config_path(profile: Profile) -> Result<PathBuf, ConfigError> {
        let dir = get_config_dir(profile).ok_or(ConfigError::ConfigDirError)?;
        Ok(dir.join("config.toml"))
    }
}

/// Key binding parsed from a config string such as "q", "Enter" or "Ctrl+s".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub requires_ctrl: bool,
}

/// Parse a key binding string from config. Unknown strings fall back to the
/// raw character form only when they are a single char.
pub fn parse_key_binding(value: &str) -> Result<KeyBinding, String> {
    let value = value.trim();
    if let Some(rest) = value.strip_prefix("Ctrl+") {
        return Ok(KeyBinding {
            code: parse_key_code(rest)?,
            requires_ctrl: true,
        });
    }
    Ok(KeyBinding {
        code: parse_key_code(value)?,
        requires_ctrl: false,
    })
}

fn parse_key_code(value: &str) -> Result<KeyCode, String> {
    match value {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Tab" => Ok(KeyCode::Tab),
        "Backspace" => Ok(KeyCode::Backspace),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                _ => Err(format!("Unknown key binding: {}", value)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = toml::from_str("server_url = \"http://box:9000\"").unwrap();
        assert_eq!(config.server_url, "http://box:9000");
        assert_eq!(config.sidebar_width_percent, 30);
        assert_eq!(config.key_bindings.quit, "q");
    }

    #[test]
    fn key_binding_parsing() {
        assert_eq!(
            parse_key_binding("q").unwrap(),
            KeyBinding { code: KeyCode::Char('q'), requires_ctrl: false }
        );
        assert_eq!(
            parse_key_binding("Ctrl+s").unwrap(),
            KeyBinding { code: KeyCode::Char('s'), requires_ctrl: true }
        );
        assert_eq!(
            parse_key_binding("Enter").unwrap().code,
            KeyCode::Enter
        );
        assert!(parse_key_binding("SuperKey").is_err());
    }
}
