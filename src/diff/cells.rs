use super::style::{StyleChanges, diff_styles};
use crate::address::CellCoord;
use crate::model::{CellRecord, CellStyle, CellValue, Sheet};
use schemars::JsonSchema;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::btree_map;
use std::iter::Peekable;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeFlags {
    pub value_changed: bool,
    pub formula_changed: bool,
    pub style_changed: bool,
}

impl ChangeFlags {
    pub fn any(&self) -> bool {
        self.value_changed || self.formula_changed || self.style_changed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CellChange {
    pub row: u32,
    pub col: u32,
    pub address: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_style: Option<CellStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_style: Option<CellStyle>,
    pub change_flags: ChangeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_changes: Option<StyleChanges>,
}

impl CellChange {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.row, self.col)
    }

    fn new(
        coord: CellCoord,
        change_type: ChangeType,
        old: Option<&CellRecord>,
        new: Option<&CellRecord>,
        style_changes: Option<StyleChanges>,
    ) -> Self {
        let change_flags = ChangeFlags {
            value_changed: old.and_then(|c| c.value.as_ref())
                != new.and_then(|c| c.value.as_ref()),
            formula_changed: old.map_or("", CellRecord::formula_text)
                != new.map_or("", CellRecord::formula_text),
            style_changed: style_changes.is_some(),
        };

        Self {
            row: coord.row,
            col: coord.col,
            address: coord.a1(),
            change_type,
            old_value: old.and_then(|c| c.value.clone()),
            old_formula: old.and_then(|c| c.formula.clone()),
            old_style: old.and_then(|c| c.style.clone()),
            new_value: new.and_then(|c| c.value.clone()),
            new_formula: new.and_then(|c| c.formula.clone()),
            new_style: new.and_then(|c| c.style.clone()),
            change_flags,
            style_changes,
        }
    }
}

/// Classifies one coordinate. `old`/`new` are `None` when the coordinate has no
/// entry in that snapshot's cell map.
///
/// A coordinate that is blank (see [`CellRecord::is_blank`]) or missing on both
/// sides yields nothing. A key present in both maps is `modified`, so a value that
/// was cleared in place keeps its cell identity. Every returned change has at
/// least one flag set.
///
/// Values compare strictly: `5` and `"5"` are different values. Formulas compare
/// as text with a missing formula equal to `""`.
pub fn diff_cells(
    coord: CellCoord,
    old: Option<&CellRecord>,
    new: Option<&CellRecord>,
    compare_styles: bool,
) -> Option<CellChange> {
    let occupied = |record: Option<&CellRecord>| record.is_some_and(|c| !c.is_blank());
    if !occupied(old) && !occupied(new) {
        return None;
    }

    let style_changes = if compare_styles {
        diff_styles(
            old.and_then(|c| c.style.as_ref()),
            new.and_then(|c| c.style.as_ref()),
        )
    } else {
        None
    };

    let change_type = match (old, new) {
        (None, _) => ChangeType::Added,
        (_, None) => ChangeType::Deleted,
        (Some(_), Some(_)) => ChangeType::Modified,
    };

    // With styles ignored, a style-only cell compares equal to an absent one.
    let change = CellChange::new(coord, change_type, old, new, style_changes);
    change.change_flags.any().then_some(change)
}

/// Lazily yields the changes between two sheets in row-major order.
///
/// Both cell maps are walked once in lockstep; coordinates missing from both
/// sides are never visited. Call [`CellChanges::new`] again to restart.
pub struct CellChanges<'a> {
    old: Peekable<btree_map::Iter<'a, CellCoord, CellRecord>>,
    new: Peekable<btree_map::Iter<'a, CellCoord, CellRecord>>,
    compare_styles: bool,
}

impl<'a> CellChanges<'a> {
    pub fn new(old: &'a Sheet, new: &'a Sheet, compare_styles: bool) -> Self {
        Self {
            old: old.cells.iter().peekable(),
            new: new.cells.iter().peekable(),
            compare_styles,
        }
    }
}

impl Iterator for CellChanges<'_> {
    type Item = CellChange;

    fn next(&mut self) -> Option<CellChange> {
        loop {
            let order = match (self.old.peek(), self.new.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((old_coord, _)), Some((new_coord, _))) => old_coord.cmp(new_coord),
            };

            let (coord, old, new) = match order {
                Ordering::Less => {
                    let (coord, old) = self.old.next()?;
                    (*coord, Some(old), None)
                }
                Ordering::Greater => {
                    let (coord, new) = self.new.next()?;
                    (*coord, None, Some(new))
                }
                Ordering::Equal => {
                    let (coord, old) = self.old.next()?;
                    let (_, new) = self.new.next()?;
                    (*coord, Some(old), Some(new))
                }
            };

            if let Some(change) = diff_cells(coord, old, new, self.compare_styles) {
                return Some(change);
            }
        }
    }
}
