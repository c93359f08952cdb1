use crate::dialog::{
    DialogOptions, ElementSelectors, DEFAULT_CANCEL_TEXT, DEFAULT_CONFIRM_TEXT, DEFAULT_TITLE,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default dialog settings applied before command line flags
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogDefaults {
    pub title: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub show_cancel: bool,
    pub html: bool,
}

impl Default for DialogDefaults {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            confirm_text: DEFAULT_CONFIRM_TEXT.to_string(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
            show_cancel: true,
            html: false,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Selectors used to locate the dialog elements in the host document
    pub selectors: ElementSelectors,

    /// Defaults for every dialog request
    pub dialog: DialogDefaults,

    /// Disable mouse capture in the terminal host
    pub disable_mouse: bool,
}

impl Config {
    /// Initialize configuration from various sources
    ///
    /// An explicit `path` must exist; otherwise the first of the well-known
    /// locations that exists is used. Environment variables win over files.
    pub async fn init(path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match path {
            Some(path) => Self::load_from_path(path).await?,
            None => Self::load_from_file().await?.unwrap_or_default(),
        };

        config.load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Config file locations, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.confirm-modal.json"),
            PathBuf::from("./confirm-modal.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("confirm-modal").join("config.json"));
        }

        paths
    }

    /// Load the first config file found in [`Config::search_paths`]
    pub async fn load_from_file() -> Result<Option<Self>> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }
        Ok(None)
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply `CONFIRM_MODAL_*` overrides read through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(title) = var("CONFIRM_MODAL_TITLE") {
            self.dialog.title = title;
        }

        if let Some(text) = var("CONFIRM_MODAL_CONFIRM_TEXT") {
            self.dialog.confirm_text = text;
        }

        if let Some(text) = var("CONFIRM_MODAL_CANCEL_TEXT") {
            self.dialog.cancel_text = text;
        }

        if let Some(flag) = var("CONFIRM_MODAL_SHOW_CANCEL").and_then(|v| parse_flag(&v)) {
            self.dialog.show_cancel = flag;
        }

        if let Some(flag) = var("CONFIRM_MODAL_HTML").and_then(|v| parse_flag(&v)) {
            self.dialog.html = flag;
        }

        if let Some(flag) = var("CONFIRM_MODAL_MOUSE").and_then(|v| parse_flag(&v)) {
            self.disable_mouse = !flag;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.dialog.confirm_text.trim().is_empty() {
            return Err(anyhow::anyhow!("confirmText must not be empty"));
        }

        if self.dialog.show_cancel && self.dialog.cancel_text.trim().is_empty() {
            return Err(anyhow::anyhow!("cancelText must not be empty while the cancel button is shown"));
        }

        for (role, selector) in self.selectors.iter() {
            if selector.trim_start_matches(['#', '.']).is_empty() {
                return Err(anyhow::anyhow!("selector for '{}' must not be empty", role));
            }
        }

        Ok(())
    }

    /// Dialog options for `message` with the configured defaults
    pub fn dialog_options(&self, message: impl Into<String>) -> DialogOptions {
        DialogOptions::new(message)
            .with_title(self.dialog.title.clone())
            .with_confirm_text(self.dialog.confirm_text.clone())
            .with_cancel_text(self.dialog.cancel_text.clone())
            .show_cancel(self.dialog.show_cancel)
            .html(self.dialog.html)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dialog.title, "Alert");
        assert_eq!(config.selectors.surface, "#modal");
        assert!(!config.disable_mouse);
    }

    #[tokio::test]
    async fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("confirm-modal.json");
        std::fs::write(
            &path,
            r##"{"dialog": {"title": "Heads up", "showCancel": false},
                "selectors": {"surface": "#dialog"}}"##,
        )
        .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.dialog.title, "Heads up");
        assert!(!config.dialog.show_cancel);
        assert_eq!(config.dialog.confirm_text, "Confirm");
        assert_eq!(config.selectors.surface, "#dialog");
        assert_eq!(config.selectors.body, "#modal-body");
    }

    #[tokio::test]
    async fn test_init_with_missing_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let err = Config::init(Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn test_invalid_json_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_path(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CONFIRM_MODAL_TITLE", "Careful"),
            ("CONFIRM_MODAL_CONFIRM_TEXT", "Go"),
            ("CONFIRM_MODAL_SHOW_CANCEL", "no"),
            ("CONFIRM_MODAL_HTML", "TRUE"),
            ("CONFIRM_MODAL_MOUSE", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dialog.title, "Careful");
        assert_eq!(config.dialog.confirm_text, "Go");
        assert_eq!(config.dialog.cancel_text, "Cancel");
        assert!(!config.dialog.show_cancel);
        assert!(config.dialog.html);
        assert!(config.disable_mouse);
    }

    #[test]
    fn test_unparseable_flag_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "CONFIRM_MODAL_SHOW_CANCEL").then(|| "maybe".to_string()));
        assert!(config.dialog.show_cancel);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.dialog.confirm_text = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.dialog.cancel_text = String::new();
        assert!(config.validate().is_err());
        config.dialog.show_cancel = false;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.selectors.close = ".".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dialog_options() {
        let mut config = Config::default();
        config.dialog.title = "Delete?".to_string();
        config.dialog.show_cancel = false;

        let options = config.dialog_options("Remove this item?");
        assert_eq!(options.title, "Delete?");
        assert_eq!(options.message, "Remove this item?");
        assert!(!options.show_cancel);
        assert!(!options.html);
    }
}
