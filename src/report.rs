//! Report payloads built around a [`WorkbookDiff`] for command-line output.

use crate::config::{DiffConfig, OutputProfile};
use crate::diff::{DiffSummary, WorkbookDiff};
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub old: String,
    pub new: String,
    pub change_count: usize,
    pub summary: DiffSummary,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<WorkbookDiff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<SheetRanges>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SheetRanges {
    pub sheet_id: String,
    pub sheet_name: String,
    pub change_count: usize,
    pub ranges: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ranges_truncated: bool,
}

/// Builds the report for one comparison. Counts and ranges always describe the
/// complete diff; `max_changes` only caps the cell changes carried in `diff`.
pub fn build_report(
    old: impl Into<String>,
    new: impl Into<String>,
    mut diff: WorkbookDiff,
    config: &DiffConfig,
) -> DiffReport {
    let summary = diff.summary();
    let change_count = diff.change_count();

    match config.output_profile {
        OutputProfile::Full => {
            let truncated = config
                .max_changes
                .is_some_and(|max| truncate_changes(&mut diff, max));
            DiffReport {
                old: old.into(),
                new: new.into(),
                change_count,
                summary,
                truncated,
                diff: Some(diff),
                sheets: Vec::new(),
            }
        }
        OutputProfile::Summary => {
            let sheets = diff
                .modified_sheets
                .iter()
                .map(|sheet| {
                    let (ranges, ranges_truncated) = sheet.changed_ranges(config.range_limit);
                    SheetRanges {
                        sheet_id: sheet.sheet_id.clone(),
                        sheet_name: sheet.sheet_name.clone(),
                        change_count: sheet.cell_changes.len(),
                        ranges,
                        ranges_truncated,
                    }
                })
                .collect();
            DiffReport {
                old: old.into(),
                new: new.into(),
                change_count,
                summary,
                truncated: false,
                diff: None,
                sheets,
            }
        }
    }
}

/// Keeps the first `max` cell changes in sheet order and drops the rest. Sheets left
/// with no changes are removed. Returns whether anything was dropped.
pub fn truncate_changes(diff: &mut WorkbookDiff, max: usize) -> bool {
    let mut remaining = max;
    let mut truncated = false;
    for sheet in &mut diff.modified_sheets {
        if sheet.cell_changes.len() > remaining {
            sheet.cell_changes.truncate(remaining);
            truncated = true;
        }
        remaining -= sheet.cell_changes.len();
    }
    diff.modified_sheets
        .retain(|sheet| !sheet.cell_changes.is_empty());
    truncated
}
