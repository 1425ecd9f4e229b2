//! Download subcommand implementation.
//!
//! Handles the `justqr download <id>` command, writing the stored PNG to
//! `qr-code-<short_id>.png` unless a path is given.

use crate::cli::Context;
use crate::encoder::decode_data_uri;
use crate::error::{CliError, CliResult};
use crate::output;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Download a stored QR code as PNG.
#[derive(Parser, Debug)]
pub struct DownloadCommand {
    /// Record id or short id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output file path (defaults to qr-code-<short_id>.png)
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,
}

impl DownloadCommand {
    /// Execute the download command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let record = ctx.find_record(&self.id).await?;

        let png = decode_data_uri(&record.qr_code_data)
            .ok_or_else(|| CliError::BadPayload(record.id.to_string()))?;

        let path = self
            .output_file
            .clone()
            .unwrap_or_else(|| ctx.download_path(&record.download_file_name()));

        fs::write(&path, png).map_err(|e| CliError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if !ctx.quiet {
            output::print_success(&format!(
                "Downloaded {} to {}",
                record.short_id,
                path.display()
            ));
        }

        Ok(())
    }
}
