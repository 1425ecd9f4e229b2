//! Generate subcommand implementation.
//!
//! Handles the `justqr generate <url>` command.

use crate::cli::{Context, OutputFormat};
use crate::encoder::decode_data_uri;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::workflow::Generation;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;

/// Generate a QR code for a URL.
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// URL to encode
    ///
    /// Examples:
    ///   google.com              Scheme is added (https://google.com)
    ///   http://example.com/a    Used as-is
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output format for the new record
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Also write the PNG as qr-code-<short_id>.png into the output directory
    #[arg(long)]
    pub save_png: bool,
}

impl GenerateCommand {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: OutputFormat::Plain,
            save_png: false,
        }
    }

    /// Execute the generate command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let workflow = ctx.workflow()?;

        let spinner = (!ctx.quiet && self.format == OutputFormat::Plain).then(spinner);
        let result = workflow.generate(&self.url).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        let generation = result?;

        if ctx.verbose {
            report(&generation);
        }

        output::format_record(&generation.record, self.format)?;

        if !generation.outcome.is_durable() && !ctx.quiet {
            output::print_warning("the QR code could not be saved and will not appear in history");
        }

        if self.save_png {
            let record = &generation.record;
            let path = ctx.download_path(&record.download_file_name());
            let png = decode_data_uri(&record.qr_code_data)
                .ok_or_else(|| CliError::BadPayload(record.id.to_string()))?;
            fs::write(&path, png).map_err(|e| CliError::WriteFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            if !ctx.quiet {
                output::print_success(&format!("Saved {}", path.display()));
            }
        }

        Ok(())
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Generating...");
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn report(generation: &Generation) {
    output::print_info(&format!("Saved to: {}", generation.outcome));
    output::print_info(&format!("History source: {}", generation.history_source));
}
