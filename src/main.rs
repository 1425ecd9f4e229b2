// justqr - No fluff, just QR codes.

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use justqr::cli::{Cli, Commands, Context, GenerateCommand};
use justqr::config::{KEY_ENV, URL_ENV};
use justqr::output;
use justqr::storage::StoreMode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Settings(cmd)) = &cli.command {
        return Ok(cmd.execute(&cli)?);
    }

    if cli.command.is_none() && cli.shorthand_url.is_none() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let ctx = Context::open(&cli).context("failed to initialize")?;
    if ctx.verbose && ctx.store.mode() == StoreMode::LocalOnly {
        output::print_info(&format!(
            "Remote backend not configured (set {} and {}), using local storage",
            URL_ENV, KEY_ENV
        ));
    }

    match &cli.command {
        Some(Commands::Generate(cmd)) => cmd.execute(&ctx).await?,
        Some(Commands::History(cmd)) => cmd.execute(&ctx).await?,
        Some(Commands::Show(cmd)) => cmd.execute(&ctx).await?,
        Some(Commands::Download(cmd)) => cmd.execute(&ctx).await?,
        Some(Commands::Settings(_)) => {}
        None => {
            if let Some(url) = &cli.shorthand_url {
                GenerateCommand::new(url.clone()).execute(&ctx).await?;
            }
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "justqr=debug"
    } else if quiet {
        "off"
    } else {
        "justqr=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
