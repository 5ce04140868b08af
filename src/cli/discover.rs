use std::time::Duration;

use console::style;
use indicatif::ProgressBar;
use tracing::info;

use crate::cli::commands::DiscoverArgs;
use crate::config::VulnScopeConfig;
use crate::discovery::{DiscoveryOptions, DiscoveryPipeline, HttpProber};
use crate::errors::VulnScopeError;

pub async fn handle_discover(
    args: DiscoverArgs,
    config: &VulnScopeConfig,
) -> Result<(), VulnScopeError> {
    let catalog = config.query_catalog();
    let output_base = format!(
        "{}/{}",
        config.dataset.base_url.trim_end_matches('/'),
        config.dataset.output_dir
    );

    let mut options = DiscoveryOptions::new(&output_base);
    if args.strict {
        options = options.strict();
    }

    let prober = HttpProber::new();
    let pipeline = DiscoveryPipeline::new(&prober, &catalog, options);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Crawling {}", args.db_name));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = pipeline.discover(&args.db_name).await;
    spinner.finish_and_clear();

    let pairs = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    for pair in &pairs {
        let title = catalog.title(&pair.query).unwrap_or(&pair.query);
        println!(
            "  {}  {}  {}",
            style(&pair.run_id).cyan(),
            style(title).white().bold(),
            style(&pair.query).dim(),
        );
    }
    println!(
        "\n{}",
        style(format!(
            "{} result sets under {}/{}",
            pairs.len(),
            config.dataset.output_dir,
            args.db_name
        ))
        .dim()
    );

    info!(db = %args.db_name, pairs = pairs.len(), "Discovery complete");
    Ok(())
}
