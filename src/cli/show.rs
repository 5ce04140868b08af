use console::style;
use tracing::{debug, warn};

use crate::cli::commands::ShowArgs;
use crate::client::ArtifactClient;
use crate::config::VulnScopeConfig;
use crate::dataset;
use crate::discovery::fold;
use crate::errors::VulnScopeError;
use crate::forge::ForgeClient;
use crate::nvd::NvdClient;
use crate::render::{
    render_commit, render_commit_badges, render_detail_header, render_fix_locations,
    render_nvd_summary,
};

pub async fn handle_show(args: ShowArgs, config: &VulnScopeConfig) -> Result<(), VulnScopeError> {
    let client = ArtifactClient::new(&config.dataset.base_url);
    let records = dataset::load_records(&client, &config.dataset).await?;
    let record = dataset::find_record(&records, &args.cve_id).ok_or_else(|| {
        VulnScopeError::NotFound(format!("{} is not in the dataset", args.cve_id))
    })?;

    println!("{}", render_detail_header(record, &config.forge));

    if !args.no_nvd {
        let nvd = NvdClient::new(&config.nvd);
        match nvd.fetch_summary(&record.cve_id).await {
            Ok(summary) => println!("\n{}", render_nvd_summary(&summary)),
            Err(e) => warn!(error = %e, "NVD lookup failed; continuing without description"),
        }
    }

    let fix_index = dataset::load_fix_index(&client, &config.dataset, &record.cve_id).await?;

    println!("\n{}", style("Fixing commits").bold());
    println!("{}", render_commit_badges(record, &config.forge));

    if !fix_index.is_empty() {
        println!("\n{}", style("Fixed methods").bold());
        println!(
            "{}",
            render_fix_locations(
                &fix_index,
                record,
                &config.forge,
                &config.dataset.source_extension
            )
        );
    }

    if !args.no_diffs {
        let forge = ForgeClient::new(&config.forge);
        let extension = config.dataset.source_extension.as_str();

        // Commit fetches are chained strictly in order through the fold; a
        // commit the forge can't serve contributes nothing to the view.
        let rendered = fold(
            record.fix_commit_ids.clone(),
            String::new(),
            |_, sha, acc| {
                let forge = &forge;
                async move {
                    match forge
                        .fetch_commit(
                            &record.github_username,
                            &record.github_repository_name,
                            &sha,
                        )
                        .await
                    {
                        Ok(commit) => {
                            let block = render_commit(&commit, extension);
                            if acc.is_empty() {
                                block
                            } else {
                                format!("{}\n\n{}", acc, block)
                            }
                        }
                        Err(e) => {
                            debug!(sha = %sha, error = %e, "Commit fetch failed; skipping");
                            acc
                        }
                    }
                }
            },
        )
        .await;

        if !rendered.is_empty() {
            println!("\n{}\n{}", style("Commits and fixes").bold(), rendered);
        }
    }

    Ok(())
}
