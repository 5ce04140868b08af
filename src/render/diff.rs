use console::style;

use crate::forge::{CommitDetail, CommitFile};
use crate::utils::short_sha;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    Add,
    Remove,
    Context,
}

pub fn classify_line(line: &str) -> DiffLineKind {
    match line.as_bytes().first() {
        Some(b'+') => DiffLineKind::Add,
        Some(b'-') => DiffLineKind::Remove,
        _ => DiffLineKind::Context,
    }
}

/// Only files in the dataset's source language get their patch rendered;
/// everything else is listed as a bare link.
pub fn is_source_file(filename: &str, extension: &str) -> bool {
    filename.ends_with(extension)
}

pub fn render_patch(patch: &str) -> String {
    patch
        .lines()
        .map(|line| match classify_line(line) {
            DiffLineKind::Add => format!("  {}", style(line).green()),
            DiffLineKind::Remove => format!("  {}", style(line).red()),
            DiffLineKind::Context => format!("  {}", style(line).dim()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_file(commit: &CommitDetail, file: &CommitFile, extension: &str) -> String {
    let header = format!(
        "  {} : {}",
        style(short_sha(&commit.sha)).cyan(),
        style(&file.filename).bold(),
    );

    match &file.patch {
        Some(patch) if is_source_file(&file.filename, extension) => {
            format!("{}\n{}", header, render_patch(patch))
        }
        _ => format!("{}\n    {}", header, style(&file.blob_url).dim()),
    }
}

/// One commit's worth of the fix view: every touched file, with inline
/// diffs for source files.
pub fn render_commit(commit: &CommitDetail, extension: &str) -> String {
    commit
        .files
        .iter()
        .map(|file| render_file(commit, file, extension))
        .collect::<Vec<_>>()
        .join("\n\n")
}
