use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vulnscope::cli::{self, Cli, Commands};
use vulnscope::config::{self, VulnScopeConfig};
use vulnscope::errors::VulnScopeError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        build = option_env!("GIT_HASH").unwrap_or("dev"),
        built_at = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        "Starting vulnscope"
    );

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                VulnScopeError::Config(_) => 2,
                VulnScopeError::NotFound(_) => 3,
                VulnScopeError::Probe(_) => 4,
                VulnScopeError::Network(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: Cli) -> Result<(), VulnScopeError> {
    if let Commands::Validate(args) = &cli.command {
        return handle_validate(args).await;
    }

    let config = match &cli.config {
        Some(path) => config::parse_config(Path::new(path)).await?,
        None => VulnScopeConfig::default(),
    };

    match cli.command {
        Commands::List(args) => cli::list::handle_list(args, &config).await,
        Commands::Search(args) => cli::search::handle_search(args, &config).await,
        Commands::Show(args) => cli::show::handle_show(args, &config).await,
        Commands::Discover(args) => cli::discover::handle_discover(args, &config).await,
        Commands::Inspect(args) => cli::inspect::handle_inspect(args, &config).await,
        Commands::Validate(_) => unreachable!("handled above"),
    }
}

async fn handle_validate(args: &cli::commands::ValidateArgs) -> Result<(), VulnScopeError> {
    let path = std::path::PathBuf::from(&args.config);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
