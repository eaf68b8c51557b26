use super::cells::ChangeType;
use super::{SheetDiff, WorkbookDiff};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub added_sheets: usize,
    pub deleted_sheets: usize,
    pub modified_sheets: usize,
    pub cells_added: usize,
    pub cells_modified: usize,
    pub cells_deleted: usize,
    pub value_changes: usize,
    pub formula_changes: usize,
    pub style_changes: usize,
    /// How many cells changed each style property, keyed by property name.
    pub style_properties: BTreeMap<String, usize>,
}

impl DiffSummary {
    pub fn total_cell_changes(&self) -> usize {
        self.cells_added + self.cells_modified + self.cells_deleted
    }

    fn absorb(&mut self, sheet: &SheetDiff) {
        for change in &sheet.cell_changes {
            match change.change_type {
                ChangeType::Added => self.cells_added += 1,
                ChangeType::Modified => self.cells_modified += 1,
                ChangeType::Deleted => self.cells_deleted += 1,
            }
            let flags = change.change_flags;
            self.value_changes += usize::from(flags.value_changed);
            self.formula_changes += usize::from(flags.formula_changed);
            self.style_changes += usize::from(flags.style_changed);

            if let Some(style_changes) = &change.style_changes {
                for property in style_changes.changed_properties() {
                    *self
                        .style_properties
                        .entry(property.as_ref().to_string())
                        .or_default() += 1;
                }
            }
        }
    }
}

impl WorkbookDiff {
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary {
            added_sheets: self.added_sheets.len(),
            deleted_sheets: self.deleted_sheets.len(),
            modified_sheets: self.modified_sheets.len(),
            ..DiffSummary::default()
        };
        for sheet in &self.modified_sheets {
            summary.absorb(sheet);
        }
        summary
    }
}
