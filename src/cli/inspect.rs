use console::style;
use tracing::warn;

use crate::cli::commands::InspectArgs;
use crate::client::ArtifactClient;
use crate::config::VulnScopeConfig;
use crate::dataset::{self, flow_labels, StepLabels};
use crate::errors::VulnScopeError;
use crate::models::{CveRecord, FixIndex, ItemLocation, SarifLog};
use crate::render::render_flow_step;
use crate::utils::clamp_text;

struct GroundTruth {
    record: CveRecord,
    fix: FixIndex,
    classes: Vec<ItemLocation>,
    funcs: Vec<ItemLocation>,
}

pub async fn handle_inspect(
    args: InspectArgs,
    config: &VulnScopeConfig,
) -> Result<(), VulnScopeError> {
    let client = ArtifactClient::new(&config.dataset.base_url);
    let catalog = config.query_catalog();
    if !catalog.recognizes(&args.query) {
        warn!(query = %args.query, "Query is not in the recognized catalog");
    }

    let sarif_path = format!(
        "{}/{}/{}/{}/results.sarif",
        config.dataset.output_dir, args.db_name, args.run_id, args.query
    );
    let sarif: SarifLog = client.fetch_json(&sarif_path).await?;

    let truth = match &args.cve {
        Some(cve_id) => Some(load_ground_truth(&client, config, &args, cve_id).await?),
        None => None,
    };

    let mut result_count = 0;
    for run in &sarif.runs {
        for result in &run.results {
            result_count += 1;
            let rule = result.rule_id.as_deref().unwrap_or("<no rule>");
            let message = result
                .message
                .as_ref()
                .and_then(|m| m.text.as_deref())
                .unwrap_or("");
            println!("\n{} {}", style(rule).cyan().bold(), clamp_text(message, 120));

            let Some(flow) = result.primary_flow() else {
                continue;
            };
            let labels = match &truth {
                Some(truth) => flow_labels(&truth.fix, flow, &truth.classes, &truth.funcs),
                None => vec![StepLabels::default(); flow.locations.len()],
            };

            for (i, (step, label)) in flow
                .locations
                .iter()
                .zip(labels)
                .take(args.max_steps)
                .enumerate()
            {
                match &truth {
                    Some(truth) => println!("{}", render_flow_step(i, step, label, &truth.record)),
                    None => println!(
                        "  {:>2}.    {}",
                        i + 1,
                        clamp_text(step.message_text().unwrap_or("<no message>"), 100)
                    ),
                }
            }
            if flow.locations.len() > args.max_steps {
                println!(
                    "  {}",
                    style(format!("... {} more steps", flow.locations.len() - args.max_steps))
                        .dim()
                );
            }
        }
    }

    println!(
        "\n{}",
        style(format!(
            "{} results in {}/{}/{}",
            result_count, args.db_name, args.run_id, args.query
        ))
        .dim()
    );
    Ok(())
}

/// Fixed-method index plus class/function extents for labeling. Missing
/// extent CSVs disable method-level labels but don't fail the view.
async fn load_ground_truth(
    client: &ArtifactClient,
    config: &VulnScopeConfig,
    args: &InspectArgs,
    cve_id: &str,
) -> Result<GroundTruth, VulnScopeError> {
    let records = dataset::load_records(client, &config.dataset).await?;
    let record = dataset::find_record(&records, cve_id)
        .ok_or_else(|| VulnScopeError::NotFound(format!("{} is not in the dataset", cve_id)))?
        .clone();
    let fix = dataset::load_fix_index(client, &config.dataset, cve_id).await?;

    let classes = dataset::load_class_locations(client, &config.dataset, &args.db_name, &args.run_id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Class extents unavailable; method-level labels disabled");
            Vec::new()
        });
    let funcs = dataset::load_func_locations(client, &config.dataset, &args.db_name, &args.run_id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Function extents unavailable; method-level labels disabled");
            Vec::new()
        });

    Ok(GroundTruth {
        record,
        fix,
        classes,
        funcs,
    })
}
