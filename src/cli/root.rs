use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::dialog::{DialogError, DialogOptions, DialogResult};
use crate::tui;

/// Ask a yes/no question in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "confirm-modal",
    version,
    about = "Show a confirmation dialog in the terminal and report the answer",
    long_about = r#"Shows a single confirm/alert dialog and exits with the user's answer.

Exit status is 0 when confirmed, 1 when the dialog was dismissed
(cancel, close, click outside, Escape) and 2 on any other failure.

Examples:
  confirm-modal "Remove this item?" --title "Delete?" --confirm-text Delete --cancel-text Keep
  confirm-modal --no-cancel "Backup finished"
  confirm-modal --html "<b>Really</b> overwrite?""#
)]
pub struct Cli {
    /// Message shown in the dialog body
    pub message: Option<String>,

    /// Dialog title
    #[arg(short = 't', long = "title")]
    pub title: Option<String>,

    /// Interpret the message as a markup fragment
    #[arg(long = "html")]
    pub html: bool,

    /// Label of the confirm button
    #[arg(long = "confirm-text")]
    pub confirm_text: Option<String>,

    /// Label of the cancel button
    #[arg(long = "cancel-text")]
    pub cancel_text: Option<String>,

    /// Hide the cancel button (alert mode)
    #[arg(long = "no-cancel")]
    pub no_cancel: bool,

    /// Configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

/// Final answer of a dialog run
#[derive(Debug)]
pub enum Outcome {
    Confirmed,
    Dismissed(DialogError),
    Failed(DialogError),
}

impl From<DialogResult<bool>> for Outcome {
    fn from(result: DialogResult<bool>) -> Self {
        match result {
            Ok(_) => Self::Confirmed,
            Err(e) if e.is_dismissal() => Self::Dismissed(e),
            Err(e) => Self::Failed(e),
        }
    }
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Confirmed => 0,
            Self::Dismissed(_) => 1,
            Self::Failed(_) => 2,
        }
    }

    /// Line printed on stdout after the terminal is restored
    pub fn report(&self) -> String {
        match self {
            Self::Confirmed => "confirmed".to_string(),
            Self::Dismissed(e) | Self::Failed(e) => format!("rejected: {}", e),
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<Outcome> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let config = Config::init(self.config.as_deref()).await?;
        debug!("Configuration initialized");

        let options = self.dialog_options(&config);
        info!("Opening dialog: {:?}", options);

        let result = tui::run(&config, options).await?;
        Ok(Outcome::from(result))
    }

    /// Config defaults overridden by command line flags
    pub fn dialog_options(&self, config: &Config) -> DialogOptions {
        let mut options = config.dialog_options(self.message.clone().unwrap_or_default());

        if let Some(title) = &self.title {
            options.title = title.clone();
        }
        if let Some(text) = &self.confirm_text {
            options.confirm_text = text.clone();
        }
        if let Some(text) = &self.cancel_text {
            options.cancel_text = text.clone();
        }
        if self.html {
            options.html = true;
        }
        if self.no_cancel {
            options.show_cancel = false;
        }

        options
            .on_confirm(|| info!("Dialog confirmed"))
            .on_cancel(|| info!("Dialog cancelled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "confirm-modal",
            "Remove this item?",
            "--title",
            "Delete?",
            "--confirm-text",
            "Delete",
            "--cancel-text",
            "Keep",
            "--no-cancel",
            "--html",
        ]);

        let options = cli.dialog_options(&Config::default());
        assert_eq!(options.message, "Remove this item?");
        assert_eq!(options.title, "Delete?");
        assert_eq!(options.confirm_text, "Delete");
        assert_eq!(options.cancel_text, "Keep");
        assert!(!options.show_cancel);
        assert!(options.html);
        assert!(options.on_confirm.is_some());
        assert!(options.on_cancel.is_some());
    }

    #[test]
    fn test_config_defaults_apply() {
        let mut config = Config::default();
        config.dialog.title = "Heads up".to_string();
        config.dialog.show_cancel = false;

        let cli = Cli::parse_from(["confirm-modal"]);
        let options = cli.dialog_options(&config);
        assert_eq!(options.title, "Heads up");
        assert_eq!(options.message, "");
        assert!(!options.show_cancel);
    }

    #[test]
    fn test_outcome() {
        let confirmed = Outcome::from(Ok(true));
        assert_eq!(confirmed.exit_code(), 0);
        assert_eq!(confirmed.report(), "confirmed");

        let dismissed = Outcome::from(Err(DialogError::EscapePressed));
        assert_eq!(dismissed.exit_code(), 1);
        assert_eq!(dismissed.report(), "rejected: Escape key pressed");

        let failed = Outcome::from(Err(DialogError::ElementMissing));
        assert_eq!(failed.exit_code(), 2);
        assert_eq!(failed.report(), "rejected: Modal element not found");
    }
}
