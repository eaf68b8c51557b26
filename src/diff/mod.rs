pub mod cells;
pub mod ranges;
pub mod style;
pub mod summary;

use crate::address::CellCoord;
use crate::model::{Sheet, WorkbookSnapshot};
use ahash::AHashSet;
use globset::{Glob, GlobMatcher};
use schemars::JsonSchema;
use serde::Serialize;

pub use cells::{CellChange, CellChanges, ChangeFlags, ChangeType, diff_cells};
pub use ranges::compress_coords_to_ranges;
pub use style::{PropertyChange, StyleChanges, StyleProperty, diff_styles};
pub use summary::DiffSummary;

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookDiff {
    pub added_sheets: Vec<String>,
    pub deleted_sheets: Vec<String>,
    pub modified_sheets: Vec<SheetDiff>,
}

impl WorkbookDiff {
    pub fn is_empty(&self) -> bool {
        self.added_sheets.is_empty()
            && self.deleted_sheets.is_empty()
            && self.modified_sheets.is_empty()
    }

    /// Number of cell-level changes across all modified sheets.
    pub fn change_count(&self) -> usize {
        self.modified_sheets
            .iter()
            .map(|sheet| sheet.cell_changes.len())
            .sum()
    }

    pub fn sheet(&self, sheet_id: &str) -> Option<&SheetDiff> {
        self.modified_sheets
            .iter()
            .find(|sheet| sheet.sheet_id == sheet_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SheetDiff {
    pub sheet_id: String,
    pub sheet_name: String,
    pub cell_changes: Vec<CellChange>,
}

impl SheetDiff {
    pub fn change_at(&self, coord: CellCoord) -> Option<&CellChange> {
        self.cell_changes
            .binary_search_by(|change| change.coord().cmp(&coord))
            .ok()
            .map(|idx| &self.cell_changes[idx])
    }

    /// Changed coordinates folded into A1 ranges, for highlighting in an editor view.
    pub fn changed_ranges(&self, limit: usize) -> (Vec<String>, bool) {
        let coords: Vec<CellCoord> = self.cell_changes.iter().map(CellChange::coord).collect();
        compress_coords_to_ranges(&coords, limit)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Only cell-diff common sheets whose id or name matches.
    pub sheet_filter: Option<GlobMatcher>,
    /// Compare values and formulas only.
    pub ignore_styles: bool,
}

impl DiffOptions {
    pub fn with_sheet_filter(mut self, pattern: &str) -> Result<Self, globset::Error> {
        self.sheet_filter = Some(Glob::new(pattern)?.compile_matcher());
        Ok(self)
    }

    pub fn ignore_styles(mut self, ignore: bool) -> Self {
        self.ignore_styles = ignore;
        self
    }

    fn includes(&self, sheet: &Sheet) -> bool {
        match &self.sheet_filter {
            Some(matcher) => matcher.is_match(&sheet.id) || matcher.is_match(&sheet.name),
            None => true,
        }
    }
}

/// Compares two workbook snapshots.
///
/// Sheet ids present only in `new` are reported in `added_sheets` (in `new`'s sheet
/// order), ids present only in `old` in `deleted_sheets` (in `old`'s order). Sheets
/// present in both are diffed cell by cell in `new`'s sheet order; a sheet with no
/// cell changes is left out of `modified_sheets`.
///
/// The function never fails and keeps no state between calls.
pub fn diff_workbooks(old: &WorkbookSnapshot, new: &WorkbookSnapshot) -> WorkbookDiff {
    diff_workbooks_with(old, new, &DiffOptions::default())
}

pub fn diff_workbooks_with(
    old: &WorkbookSnapshot,
    new: &WorkbookSnapshot,
    options: &DiffOptions,
) -> WorkbookDiff {
    let old_order = old.ordered_sheet_ids();
    let new_order = new.ordered_sheet_ids();
    let old_ids: AHashSet<&str> = old_order.iter().copied().collect();
    let new_ids: AHashSet<&str> = new_order.iter().copied().collect();

    let added_sheets = new_order
        .iter()
        .filter(|id| !old_ids.contains(*id))
        .map(|id| id.to_string())
        .collect();
    let deleted_sheets = old_order
        .iter()
        .filter(|id| !new_ids.contains(*id))
        .map(|id| id.to_string())
        .collect();

    let mut modified_sheets = Vec::new();
    for id in &new_order {
        let (Some(old_sheet), Some(new_sheet)) = (old.sheet(id), new.sheet(id)) else {
            continue;
        };
        if !options.includes(new_sheet) {
            tracing::debug!(sheet = %id, "sheet excluded by filter");
            continue;
        }

        let sheet_diff = diff_sheets_with(old_sheet, new_sheet, options);
        tracing::debug!(
            sheet = %id,
            changes = sheet_diff.cell_changes.len(),
            "sheet compared"
        );
        if !sheet_diff.cell_changes.is_empty() {
            modified_sheets.push(sheet_diff);
        }
    }

    WorkbookDiff {
        added_sheets,
        deleted_sheets,
        modified_sheets,
    }
}

/// Cell-level diff of two versions of the same sheet. The result carries the new
/// sheet's id and name.
pub fn diff_sheets(old: &Sheet, new: &Sheet) -> SheetDiff {
    diff_sheets_with(old, new, &DiffOptions::default())
}

fn diff_sheets_with(old: &Sheet, new: &Sheet, options: &DiffOptions) -> SheetDiff {
    SheetDiff {
        sheet_id: new.id.clone(),
        sheet_name: new.name.clone(),
        cell_changes: CellChanges::new(old, new, !options.ignore_styles).collect(),
    }
}
