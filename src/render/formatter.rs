use console::style;

use crate::config::ForgeConfig;
use crate::dataset::StepLabels;
use crate::forge;
use crate::models::{CveRecord, FixIndex, FlowStep};
use crate::nvd::NvdSummary;
use crate::utils::{clamp_text, short_sha};

const FLOW_MESSAGE_WIDTH: usize = 100;

pub fn cwe_badges(record: &CveRecord) -> String {
    record
        .cwe_ids
        .iter()
        .map(|c| format!("{}", style(format!("[{}]", c)).magenta()))
        .collect::<Vec<_>>()
        .join("")
}

/// One sidebar-style line: CVE id, CWE badges, project coordinates.
pub fn render_record_line(record: &CveRecord) -> String {
    format!(
        "{}  {}  {}",
        style(&record.cve_id).cyan().bold(),
        cwe_badges(record),
        style(format!(
            "{} / {} / {}",
            record.author, record.package, record.tag
        ))
        .dim(),
    )
}

pub fn render_detail_header(record: &CveRecord, cfg: &ForgeConfig) -> String {
    let title = format!(
        "{} {} {}",
        style(&record.cve_id).cyan().bold(),
        cwe_badges(record),
        style(format!(
            "{} / {} @ {}",
            record.author, record.package, record.tag
        ))
        .white()
        .bold(),
    );

    let repo = forge::tree_url(
        cfg,
        &record.github_username,
        &record.github_repository_name,
        &record.tag,
    );

    format!(
        "{}\n  {} {}\n  {} {}",
        title,
        style("source:").dim(),
        repo,
        style("nvd:").dim(),
        record.nvd_url(),
    )
}

pub fn render_nvd_summary(summary: &NvdSummary) -> String {
    let mut lines = vec![summary.description.clone()];

    let mut meta = Vec::new();
    if let (Some(score), Some(severity)) = (&summary.base_score, &summary.base_severity) {
        meta.push(format!("CVSS {} ({})", score, severity));
    }
    if let Some(published) = &summary.published {
        meta.push(format!("published {}", published.format("%Y-%m-%d")));
    }
    if let Some(modified) = &summary.last_modified {
        meta.push(format!("modified {}", modified.format("%Y-%m-%d")));
    }
    if !meta.is_empty() {
        lines.push(format!("{}", style(meta.join(" | ")).dim()));
    }

    lines.join("\n")
}

/// The fixing commits as short styled badges with their forge links.
pub fn render_commit_badges(record: &CveRecord, cfg: &ForgeConfig) -> String {
    record
        .fix_commit_ids
        .iter()
        .map(|sha| {
            let url = forge::commit_url(
                cfg,
                &record.github_username,
                &record.github_repository_name,
                sha,
            );
            format!("  {}  {}", style(short_sha(sha)).cyan(), style(url).dim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed-method labels with blob links at the fixing commit.
pub fn render_fix_locations(
    index: &FixIndex,
    record: &CveRecord,
    cfg: &ForgeConfig,
    extension: &str,
) -> String {
    index
        .method_labels(extension)
        .into_iter()
        .map(|(label, loc)| {
            let url = forge::blob_url(
                cfg,
                &record.github_username,
                &record.github_repository_name,
                &loc.commit,
                &loc.file,
            );
            format!("  {}  {}", style(label).yellow(), style(url).dim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One labeled code-flow step. Method-level matches get the gold marker,
/// file-level ones silver, mirroring the benchmark's grading convention.
pub fn render_flow_step(
    step_index: usize,
    step: &FlowStep,
    labels: StepLabels,
    record: &CveRecord,
) -> String {
    let marker = if labels.method_match {
        "🥇"
    } else if labels.file_match {
        "🥈"
    } else {
        "  "
    };

    let message = clamp_text(step.message_text().unwrap_or("<no message>"), FLOW_MESSAGE_WIDTH);

    let link = match (step.uri(), step.start_line()) {
        (Some(uri), Some(line)) => {
            let url = forge::source_line_url(&record.repository_url, &record.tag, uri, line);
            format!("\n      {}", style(url).dim())
        }
        _ => String::new(),
    };

    format!("  {:>2}. {} {}{}", step_index + 1, marker, message, link)
}
