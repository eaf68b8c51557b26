//! In-memory workbook snapshots.
//!
//! A snapshot is a set of sheets keyed by a stable sheet id, each holding a sparse
//! grid of [`CellRecord`]s. The grid is a `BTreeMap` keyed by [`CellCoord`], so
//! walking it always yields row-major order.

mod parse;

use crate::address::CellCoord;
use ahash::AHashSet;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

/// A scalar cell value. Variants never compare equal across kinds, so `5` and
/// `"5"` differ. Numbers compare by value with `NaN` equal to itself.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Number(a), CellValue::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Visual attributes of a cell. Every field is optional; `None` means the snapshot
/// did not set it. Colors are kept exactly as written in the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Horizontal alignment code as stored by the editor (`0` unspecified, `1` left,
    /// `2` center, `3` right, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<i64>,
    /// Border descriptor, compared as an opaque value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<serde_json::Value>,
}

impl CellStyle {
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none()
            && self.text_color.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.font_size.is_none()
            && self.horizontal_align.is_none()
            && self.border.is_none()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellRecord {
    pub value: Option<CellValue>,
    pub formula: Option<String>,
    pub style: Option<CellStyle>,
}

impl CellRecord {
    pub fn value(value: impl Into<CellValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Formula text with absent treated as the empty string.
    pub fn formula_text(&self) -> &str {
        self.formula.as_deref().unwrap_or("")
    }

    /// True when the record carries no value, no formula, and no style property.
    pub fn is_blank(&self) -> bool {
        self.value.is_none()
            && self.formula_text().is_empty()
            && self.style.as_ref().is_none_or(CellStyle::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub id: String,
    pub name: String,
    pub cells: BTreeMap<CellCoord, CellRecord>,
}

impl Sheet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, coord: CellCoord, record: CellRecord) -> Self {
        self.cells.insert(coord, record);
        self
    }

    /// Inserts a cell by A1 address. Returns `None` if the address does not parse.
    pub fn set_cell(&mut self, address: &str, record: CellRecord) -> Option<CellCoord> {
        let coord = CellCoord::parse(address)?;
        self.cells.insert(coord, record);
        Some(coord)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&CellRecord> {
        self.cells.get(&coord)
    }

    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut CellRecord> {
        self.cells.get_mut(&coord)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookSnapshot {
    pub sheets: IndexMap<String, Sheet>,
    pub sheet_order: Vec<String>,
}

impl WorkbookSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.push_sheet(sheet);
        self
    }

    /// Adds a sheet at the end of the sheet order, replacing any sheet with the same id.
    pub fn push_sheet(&mut self, sheet: Sheet) {
        if !self.sheet_order.iter().any(|id| id == &sheet.id) {
            self.sheet_order.push(sheet.id.clone());
        }
        self.sheets.insert(sheet.id.clone(), sheet);
    }

    pub fn remove_sheet(&mut self, id: &str) -> Option<Sheet> {
        self.sheet_order.retain(|existing| existing != id);
        self.sheets.shift_remove(id)
    }

    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.get(id)
    }

    pub fn sheet_mut(&mut self, id: &str) -> Option<&mut Sheet> {
        self.sheets.get_mut(id)
    }

    pub fn contains_sheet(&self, id: &str) -> bool {
        self.sheets.contains_key(id)
    }

    /// Sheet ids in display order: `sheet_order` first (skipping ids with no sheet
    /// and duplicates), then any unlisted sheets in document order.
    pub fn ordered_sheet_ids(&self) -> Vec<&str> {
        let mut seen = AHashSet::with_capacity(self.sheets.len());
        let mut ids = Vec::with_capacity(self.sheets.len());
        for id in &self.sheet_order {
            if self.sheets.contains_key(id) && seen.insert(id.as_str()) {
                ids.push(id.as_str());
            }
        }
        for id in self.sheets.keys() {
            if seen.insert(id.as_str()) {
                ids.push(id.as_str());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_ids_follow_sheet_order_then_document_order() {
        let mut snapshot = WorkbookSnapshot::new()
            .with_sheet(Sheet::new("a", "A"))
            .with_sheet(Sheet::new("b", "B"))
            .with_sheet(Sheet::new("c", "C"));
        snapshot.sheet_order = vec!["c".into(), "missing".into(), "a".into(), "c".into()];

        assert_eq!(snapshot.ordered_sheet_ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn blank_record_ignores_empty_style_and_formula() {
        let record = CellRecord {
            value: None,
            formula: Some(String::new()),
            style: Some(CellStyle::default()),
        };
        assert!(record.is_blank());
        assert!(!CellRecord::value("x").is_blank());
        assert!(!CellRecord::default().with_style(CellStyle::default().bold(false)).is_blank());
    }

    #[test]
    fn values_compare_within_their_kind() {
        assert_eq!(CellValue::Number(f64::NAN), CellValue::Number(f64::NAN));
        assert_eq!(CellValue::from(5), CellValue::Number(5.0));
        assert_ne!(CellValue::from(5), CellValue::from("5"));
        assert_ne!(CellValue::from(1), CellValue::from(true));
    }
}
