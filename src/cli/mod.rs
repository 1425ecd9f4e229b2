//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `justqr generate <url>` - Generate and store a QR code
//! - `justqr history` - List stored QR codes, newest first
//! - `justqr show <id>` - Show one stored QR code
//! - `justqr download <id>` - Write a stored QR code to a PNG file
//! - `justqr settings show|init|path` - Manage settings

mod download;
mod generate;
mod history;
mod settings;
mod show;

pub use download::DownloadCommand;
pub use generate::GenerateCommand;
pub use history::HistoryCommand;
pub use settings::SettingsCommand;
pub use show::ShowCommand;

use crate::config::{AppSettings, Paths, RemoteConfig};
use crate::encoder::PngEncoder;
use crate::error::{CliError, CliResult};
use crate::storage::{open_store, LocalRecords, QrRecord, RecordStore};
use crate::workflow::Workflow;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// justqr - No fluff, just QR codes.
///
/// Enter any URL and justqr creates a high-resolution QR code, keeps a
/// history of everything generated, and lets you view or download past
/// codes. Records are stored locally, and in a Supabase table when
/// SUPABASE_URL and SUPABASE_ANON_KEY are set.
#[derive(Parser, Debug)]
#[command(name = "justqr")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "No fluff, just QR codes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for downloaded PNG files
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for the local record store
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Supabase project URL
    #[arg(long, global = true, env = "SUPABASE_URL", value_name = "URL", hide_env_values = true)]
    pub supabase_url: Option<String>,

    /// Supabase anon key
    #[arg(long, global = true, env = "SUPABASE_ANON_KEY", value_name = "KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    // Shorthand mode: if no subcommand, treat first arg as the URL
    /// URL to generate a QR code for (shorthand for 'justqr generate')
    #[arg(value_name = "URL", hide = true)]
    pub shorthand_url: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a QR code for a URL
    #[command(alias = "g")]
    Generate(GenerateCommand),

    /// View QR code history
    #[command(alias = "h")]
    History(HistoryCommand),

    /// Show a stored QR code
    #[command(alias = "s")]
    Show(ShowCommand),

    /// Download a stored QR code as PNG
    #[command(alias = "d")]
    Download(DownloadCommand),

    /// Manage settings
    Settings(SettingsCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format (image payload omitted)
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Everything a record command needs, resolved once per process.
pub struct Context {
    pub settings: AppSettings,
    pub store: Arc<dyn RecordStore>,
    pub output_dir: Option<PathBuf>,
    pub verbose: bool,
    pub quiet: bool,
}

impl Context {
    /// Load settings and select the store strategy.
    pub fn open(cli: &Cli) -> CliResult<Self> {
        let settings = load_settings(cli)?;

        let data_dir = match cli.data_dir.clone().or_else(|| settings.data_dir.clone()) {
            Some(dir) => dir,
            None => Paths::get()?.data_dir.clone(),
        };
        debug!(data_dir = %data_dir.display(), "local record store");

        let remote = RemoteConfig::from_parts(cli.supabase_url.clone(), cli.supabase_key.clone());
        let store = open_store(
            remote.as_ref(),
            settings.remote_timeout(),
            LocalRecords::in_dir(data_dir),
        );

        Ok(Self {
            settings,
            store: Arc::from(store),
            output_dir: cli.output_dir.clone(),
            verbose: cli.verbose,
            quiet: cli.quiet,
        })
    }

    /// A workflow over this context's store with the configured encoder.
    pub fn workflow(&self) -> CliResult<Workflow> {
        let encoder = PngEncoder::new(self.settings.encode_options()?);
        Ok(Workflow::new(Arc::clone(&self.store), Arc::new(encoder)))
    }

    /// Refresh history and select exactly one record by id or short id.
    pub async fn find_record(&self, key: &str) -> CliResult<QrRecord> {
        let workflow = self.workflow()?;
        workflow.refresh_history().await;

        let matches = workflow.select(key);
        match matches.len() {
            0 => Err(CliError::NotFound(key.to_string())),
            1 => workflow
                .current()
                .ok_or_else(|| CliError::NotFound(key.to_string())),
            n => Err(CliError::Ambiguous(key.to_string(), n)),
        }
    }

    /// Where a downloaded file should go when no explicit path is given.
    pub fn download_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Settings from `--config`, or the default location.
pub fn load_settings(cli: &Cli) -> CliResult<AppSettings> {
    let settings = match &cli.config {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };
    Ok(settings)
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
    fn test_parse_generate() {
        let cli = Cli::try_parse_from(["justqr", "generate", "google.com", "--format", "json"])
            .unwrap();
        match cli.command {
            Some(Commands::Generate(cmd)) => {
                assert_eq!(cmd.url, "google.com");
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_shorthand_url() {
        let cli = Cli::try_parse_from(["justqr", "example.com"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.shorthand_url.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_parse_history_alias() {
        let cli = Cli::try_parse_from(["justqr", "h", "-n", "3"]).unwrap();
        match cli.command {
            Some(Commands::History(cmd)) => assert_eq!(cmd.count, Some(3)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_context_find_record() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "justqr",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--config",
            dir.path().join("missing.json").to_str().unwrap(),
            "history",
        ])
        .unwrap();

        // A missing explicit settings file is an error, not a silent default.
        assert!(Context::open(&cli).is_err());

        AppSettings {
            qr_width: 100,
            ..AppSettings::default()
        }
        .save_to(&dir.path().join("missing.json"))
        .unwrap();

        let mut ctx = Context::open(&cli).unwrap();
        // Force local mode regardless of the test environment.
        ctx.store = Arc::new(crate::storage::LocalOnlyStore::new(LocalRecords::in_dir(dir.path())));

        let generated = ctx.workflow().unwrap().generate("google.com").await.unwrap();
        let found = ctx.find_record(generated.record.short_id.as_str()).await.unwrap();
        assert_eq!(found, generated.record);

        assert!(matches!(
            ctx.find_record("nothing").await,
            Err(CliError::NotFound(_))
        ));
    }
}
