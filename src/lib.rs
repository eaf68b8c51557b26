//! Cell-level comparison of workbook snapshots.
//!
//! [`diff_workbooks`] takes two [`WorkbookSnapshot`]s and reports which sheets were
//! added or deleted and, for every sheet present in both, which cells were added,
//! modified, or deleted, with separate flags for value, formula, and style changes.
//!
//! ```
//! use workbook_diff::{CellCoord, CellRecord, Sheet, WorkbookSnapshot, diff_workbooks};
//!
//! let old = WorkbookSnapshot::new()
//!     .with_sheet(Sheet::new("s1", "Sheet1").with_cell(CellCoord::new(0, 0), CellRecord::value("x")));
//! let new = WorkbookSnapshot::new()
//!     .with_sheet(Sheet::new("s1", "Sheet1").with_cell(CellCoord::new(0, 0), CellRecord::value("y")));
//!
//! let diff = diff_workbooks(&old, &new);
//! let change = &diff.modified_sheets[0].cell_changes[0];
//! assert_eq!(change.address, "A1");
//! assert!(change.change_flags.value_changed);
//! ```

pub mod address;
pub mod cli;
pub mod config;
pub mod diff;
pub mod errors;
pub mod model;
pub mod report;

pub use address::CellCoord;
pub use config::{DiffConfig, OutputProfile};
pub use diff::{
    CellChange, ChangeFlags, ChangeType, DiffOptions, DiffSummary, SheetDiff, StyleChanges,
    WorkbookDiff, diff_sheets, diff_workbooks, diff_workbooks_with,
};
pub use errors::SnapshotError;
pub use model::{CellRecord, CellStyle, CellValue, Sheet, WorkbookSnapshot};
