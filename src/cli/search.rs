use console::style;

use crate::cli::commands::SearchArgs;
use crate::client::ArtifactClient;
use crate::config::VulnScopeConfig;
use crate::dataset;
use crate::errors::VulnScopeError;
use crate::models::CveRecord;
use crate::render::render_record_line;

pub async fn handle_search(
    args: SearchArgs,
    config: &VulnScopeConfig,
) -> Result<(), VulnScopeError> {
    let client = ArtifactClient::new(&config.dataset.base_url);
    let records = dataset::load_records(&client, &config.dataset).await?;
    let browsable: Vec<CveRecord> = dataset::browsable(&records, None)
        .into_iter()
        .cloned()
        .collect();
    let matches = dataset::search_records(&browsable, &args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    for record in &matches {
        println!("{}", render_record_line(record));
    }
    println!(
        "\n{}",
        style(format!("{} matches for '{}'", matches.len(), args.query)).dim()
    );
    Ok(())
}
