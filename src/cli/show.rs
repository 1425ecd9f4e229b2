//! Show subcommand implementation.

use crate::cli::{Context, OutputFormat};
use crate::error::CliResult;
use crate::output;
use clap::Parser;

/// Show a stored QR code.
#[derive(Parser, Debug)]
pub struct ShowCommand {
    /// Record id or short id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl ShowCommand {
    /// Execute the show command.
    pub async fn execute(&self, ctx: &Context) -> CliResult<()> {
        let record = ctx.find_record(&self.id).await?;
        output::format_record(&record, self.format)?;
        Ok(())
    }
}
