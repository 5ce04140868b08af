use console::style;
use tracing::info;

use crate::cli::commands::ListArgs;
use crate::client::ArtifactClient;
use crate::config::VulnScopeConfig;
use crate::dataset;
use crate::errors::VulnScopeError;
use crate::render::render_record_line;

pub async fn handle_list(args: ListArgs, config: &VulnScopeConfig) -> Result<(), VulnScopeError> {
    let client = ArtifactClient::new(&config.dataset.base_url);
    let records = dataset::load_records(&client, &config.dataset).await?;
    let visible = dataset::browsable(&records, args.cwe);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    for record in &visible {
        println!("{}", render_record_line(record));
    }
    println!("\n{}", style(format!("{} entries", visible.len())).dim());

    info!(total = records.len(), visible = visible.len(), cwe = ?args.cwe, "Listed entries");
    Ok(())
}
