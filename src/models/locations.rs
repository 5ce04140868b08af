use serde::Deserialize;

/// Raw row of a `fetch_class_locs`/`fetch_func_locs` results CSV. Line
/// columns arrive as text and may be junk; conversion filters those rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub start_line: String,
    #[serde(default)]
    pub end_line: String,
}

/// Source extent of one named item (a class or a function) in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLocation {
    pub name: String,
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl ItemLocation {
    pub fn from_row(row: &ItemRow) -> Option<Self> {
        let start_line = row.start_line.trim().parse().ok()?;
        let end_line = row.end_line.trim().parse().ok()?;
        Some(Self {
            name: row.name.clone(),
            file: row.file.clone(),
            start_line,
            end_line,
        })
    }

    pub fn from_rows(rows: &[ItemRow]) -> Vec<Self> {
        rows.iter().filter_map(Self::from_row).collect()
    }
}

/// Find the name of the innermost item enclosing `line` in `file`.
///
/// An item encloses the line if its extent covers it with one line of slack
/// on each side (analysis line numbers and extraction line numbers disagree
/// by one around annotations). Among enclosing items the one starting last
/// wins, which selects the innermost nested item.
pub fn enclosing_item<'a>(file: &str, line: u32, items: &'a [ItemLocation]) -> Option<&'a str> {
    let mut found: Option<&ItemLocation> = None;
    for item in items {
        if item.file != file {
            continue;
        }
        if item.start_line > line + 1 || item.end_line + 1 < line {
            continue;
        }
        if found.map_or(true, |best| item.start_line > best.start_line) {
            found = Some(item);
        }
    }
    found.map(|item| item.name.as_str())
}
