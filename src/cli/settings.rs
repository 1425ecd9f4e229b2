//! Settings subcommand implementation.
//!
//! Handles the `justqr settings` command for inspecting and creating the
//! settings file.

use crate::cli::{load_settings, Cli};
use crate::config::{AppSettings, Paths};
use crate::error::{CliError, CliResult};
use crate::output;
use clap::{Parser, Subcommand};

/// Manage settings.
#[derive(Parser, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

/// Settings actions.
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the effective settings as JSON
    Show,

    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the settings file path
    Path,
}

impl SettingsCommand {
    /// Execute the settings command.
    pub fn execute(&self, cli: &Cli) -> CliResult<()> {
        match &self.action {
            SettingsAction::Show => {
                let settings = load_settings(cli)?;
                output::print_json(&settings)?;
            }
            SettingsAction::Init { force } => {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => Paths::get()?.settings_file(),
                };
                if path.exists() && !force {
                    return Err(CliError::Other(format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    )));
                }
                AppSettings::default().save_to(&path)?;
                if !cli.quiet {
                    output::print_success(&format!("Wrote {}", path.display()));
                }
            }
            SettingsAction::Path => match &cli.config {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", Paths::get()?.settings_file().display()),
            },
        }
        Ok(())
    }
}
