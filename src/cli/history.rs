//! History subcommand implementation.
//!
//! Handles the `justqr history` command for listing stored QR codes.

use crate::cli::{Context, OutputFormat};
use crate::error::CliResult;
use crate::output;
use clap::Parser;

/// View QR code history.
#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// Number of recent QR codes to show (all by default)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl HistoryCommand {
    /// Execute the history command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let loaded = ctx.store.load_all().await;
        if ctx.verbose {
            output::print_info(&format!(
                "{} records from {}",
                loaded.records.len(),
                loaded.source
            ));
        }

        let mut records = loaded.records;
        if let Some(count) = self.count {
            records.truncate(count);
        }

        output::format_history(&records, self.format)?;
        Ok(())
    }
}
