//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/standup/standup.toml` (or `--config`)
//! 3. Environment variables: `STANDUP_*` prefix
//!
//! The `--data-dir` flag is applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::{expand_env_vars, expand_path};

/// Default heading date, e.g. `Monday, Oct 19, 2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%A, %b %-d, %Y";

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub store_file: Option<String>,
    pub editor: Option<String>,
    pub date_format: Option<String>,
    pub confirm_reset: Option<bool>,
}

/// Unified configuration for standup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the store file (default: XDG data dir)
    pub data_dir: PathBuf,
    /// Store file name inside `data_dir`
    pub store_file: String,
    /// Editor command (default: $EDITOR or "vim")
    pub editor: String,
    /// chrono format for the heading date
    pub date_format: String,
    /// Ask before `reset` deletes saved data
    pub confirm_reset: bool,
}

impl Default for Settings {
    fn default() -> Self {
        // Try $EDITOR, fall back to vim
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".into());

        Self {
            data_dir: default_data_dir(),
            store_file: "storage.json".into(),
            editor,
            date_format: DEFAULT_DATE_FORMAT.into(),
            confirm_reset: true,
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "standup")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.standup"))
}

/// Get the XDG config directory for standup.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "standup").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("standup.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Full path of the key-value store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.data_dir = expand_path(&self.data_dir);
        // may contain path like ~/bin/myeditor
        self.editor = expand_env_vars(&self.editor);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            store_file: overlay
                .store_file
                .clone()
                .unwrap_or_else(|| self.store_file.clone()),
            editor: overlay
                .editor
                .clone()
                .unwrap_or_else(|| self.editor.clone()),
            date_format: overlay
                .date_format
                .clone()
                .unwrap_or_else(|| self.date_format.clone()),
            confirm_reset: overlay.confirm_reset.unwrap_or(self.confirm_reset),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist when given.
    ///   Without it the global config is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply STANDUP_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("STANDUP").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("store_file") {
            settings.store_file = val;
        }
        if let Ok(val) = config.get_string("editor") {
            settings.editor = val;
        }
        if let Ok(val) = config.get_string("date_format") {
            settings.date_format = val;
        }
        if let Ok(val) = config.get_bool("confirm_reset") {
            settings.confirm_reset = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# standup configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/standup/standup.toml (or --config PATH)
#   Env:  STANDUP_* environment variables (e.g. STANDUP_DATA_DIR)
#   CLI:  --data-dir

# Directory holding the saved roster
# data_dir = "~/.local/share/standup"

# Store file name inside data_dir
# store_file = "storage.json"

# Editor used by `standup edit`
# editor = "vim"

# Heading date (chrono strftime syntax)
# date_format = "%A, %b %-d, %Y"

# Ask before `standup reset` deletes saved data
# confirm_reset = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_store_path_is_in_data_dir() {
        let settings = Settings::default();
        assert!(settings.store_path().ends_with("storage.json"));
        assert!(settings.store_path().starts_with(&settings.data_dir));
        assert!(settings.confirm_reset);
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn given_tilde_in_data_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_dir: PathBuf::from("~/.standup"),
            editor: "${HOME}/bin/myeditor".to_string(),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.data_dir.starts_with(&home));
        assert!(!settings.data_dir.to_string_lossy().contains('~'));
        assert!(settings.editor.starts_with(&home));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            store_file: Some("team.json".into()),
            confirm_reset: Some(false),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.store_file, "team.json");
        assert!(!merged.confirm_reset);
        assert_eq!(merged.data_dir, base.data_dir);
        assert_eq!(merged.date_format, base.date_format);
    }

    #[test]
    fn given_template_when_parsed_then_all_fields_unspecified() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.data_dir.is_none());
        assert!(raw.confirm_reset.is_none());
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
