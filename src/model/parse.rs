//! Permissive decoding of editor snapshots.
//!
//! The accepted shape is the editor's workbook JSON:
//!
//! ```json
//! {
//!   "sheetOrder": ["s1"],
//!   "styles": { "st1": { "bl": 1 } },
//!   "sheets": {
//!     "s1": { "id": "s1", "name": "Sheet1",
//!             "cellData": { "0": { "0": { "v": 1, "f": "=A2", "s": "st1" } } } }
//!   }
//! }
//! ```
//!
//! Anything below the `sheets` member that has an unexpected shape is skipped
//! (with a warning) instead of failing the whole snapshot.

use super::{CellRecord, CellStyle, CellValue, Sheet, WorkbookSnapshot};
use crate::address::CellCoord;
use crate::errors::SnapshotError;
use serde_json::{Map, Value};
use std::io::Read;

impl WorkbookSnapshot {
    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, SnapshotError> {
        let root = value
            .as_object()
            .ok_or_else(|| SnapshotError::invalid_root("expected a JSON object"))?;

        let styles = root.get("styles").and_then(Value::as_object);

        let mut snapshot = WorkbookSnapshot::new();
        match root.get("sheets") {
            None | Some(Value::Null) => {}
            Some(Value::Object(sheets)) => {
                for (key, entry) in sheets {
                    match parse_sheet(key, entry, styles) {
                        Some(sheet) => {
                            snapshot.sheets.insert(sheet.id.clone(), sheet);
                        }
                        None => tracing::warn!(sheet = %key, "skipping non-object sheet entry"),
                    }
                }
            }
            Some(_) => return Err(SnapshotError::invalid_root("`sheets` must be an object")),
        }

        snapshot.sheet_order = root
            .get("sheetOrder")
            .and_then(Value::as_array)
            .map(|order| {
                order
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(snapshot)
    }
}

fn parse_sheet(key: &str, entry: &Value, styles: Option<&Map<String, Value>>) -> Option<Sheet> {
    let obj = entry.as_object()?;
    // The map key wins over any embedded `id`.
    let id = key.to_string();
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    let mut sheet = Sheet::new(id, name);
    let Some(cell_data) = obj.get("cellData") else {
        return Some(sheet);
    };
    let Some(rows) = cell_data.as_object() else {
        tracing::warn!(sheet = %key, "cellData is not an object; treating sheet as empty");
        return Some(sheet);
    };

    for (row_key, columns) in rows {
        let Some(row) = parse_index(row_key) else {
            tracing::warn!(sheet = %key, row = %row_key, "skipping row with invalid index");
            continue;
        };
        let Some(columns) = columns.as_object() else {
            tracing::warn!(sheet = %key, row, "skipping non-object row");
            continue;
        };
        for (col_key, cell) in columns {
            let Some(col) = parse_index(col_key) else {
                tracing::warn!(sheet = %key, row, col = %col_key, "skipping column with invalid index");
                continue;
            };
            let coord = CellCoord::new(row, col);
            match parse_cell(cell, styles) {
                Some(record) => {
                    sheet.cells.insert(coord, record);
                }
                None => tracing::warn!(sheet = %key, cell = %coord, "skipping non-object cell"),
            }
        }
    }

    Some(sheet)
}

fn parse_index(key: &str) -> Option<u32> {
    key.trim().parse::<u32>().ok()
}

fn parse_cell(cell: &Value, styles: Option<&Map<String, Value>>) -> Option<CellRecord> {
    let obj = cell.as_object()?;

    let value = match field(obj, "v", "value") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(CellValue::Text(s.clone())),
        Some(Value::Number(n)) => n.as_f64().map(CellValue::Number),
        Some(Value::Bool(b)) => Some(CellValue::Bool(*b)),
        Some(other) => {
            tracing::warn!(value = %other, "ignoring structured cell value");
            None
        }
    };

    let formula = field(obj, "f", "formula")
        .and_then(Value::as_str)
        .map(str::to_string);

    let style = match field(obj, "s", "style") {
        None | Some(Value::Null) => None,
        Some(Value::Object(inline)) => Some(parse_style(inline)),
        Some(Value::String(style_id)) => {
            let resolved = styles
                .and_then(|table| table.get(style_id))
                .and_then(Value::as_object)
                .map(parse_style);
            if resolved.is_none() {
                tracing::warn!(style_id = %style_id, "unresolved style id");
            }
            resolved
        }
        Some(other) => {
            tracing::warn!(style = %other, "ignoring malformed cell style");
            None
        }
    };

    Some(CellRecord {
        value,
        formula,
        style,
    })
}

fn field<'a>(obj: &'a Map<String, Value>, short: &str, long: &str) -> Option<&'a Value> {
    obj.get(short).or_else(|| obj.get(long))
}

fn parse_style(obj: &Map<String, Value>) -> CellStyle {
    CellStyle {
        background_color: field(obj, "bg", "backgroundColor").and_then(parse_color),
        text_color: field(obj, "cl", "textColor").and_then(parse_color),
        bold: field(obj, "bl", "bold").and_then(parse_flag),
        italic: field(obj, "it", "italic").and_then(parse_flag),
        underline: field(obj, "ul", "underline").and_then(parse_flag),
        strikethrough: field(obj, "st", "strikethrough").and_then(parse_flag),
        font_size: field(obj, "fs", "fontSize").and_then(Value::as_f64),
        horizontal_align: field(obj, "ht", "horizontalAlign").and_then(parse_code),
        border: field(obj, "bd", "border")
            .filter(|v| !v.is_null())
            .cloned(),
    }
}

fn parse_color(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("rgb").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Flags appear as booleans, `0`/`1`, or `{ "s": 0|1 }` text-decoration objects.
fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::Object(obj) => obj.get("s").and_then(parse_flag),
        _ => None,
    }
}

fn parse_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn style_accepts_editor_short_keys() {
        let raw = json!({
            "bg": { "rgb": "FF0000" },
            "cl": "00ff00",
            "bl": 1,
            "it": 0,
            "ul": { "s": 1 },
            "st": { "s": 0 },
            "fs": 14,
            "ht": 2,
            "bd": { "b": { "s": 1 } }
        });
        let style = parse_style(raw.as_object().unwrap());

        assert_eq!(style.background_color.as_deref(), Some("FF0000"));
        assert_eq!(style.text_color.as_deref(), Some("00ff00"));
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.italic, Some(false));
        assert_eq!(style.underline, Some(true));
        assert_eq!(style.strikethrough, Some(false));
        assert_eq!(style.font_size, Some(14.0));
        assert_eq!(style.horizontal_align, Some(2));
        assert_eq!(style.border, Some(json!({ "b": { "s": 1 } })));
    }

    #[test]
    fn style_accepts_long_keys() {
        let raw = json!({ "backgroundColor": "abcdef", "bold": true, "fontSize": 11.5 });
        let style = parse_style(raw.as_object().unwrap());
        assert_eq!(style.background_color.as_deref(), Some("abcdef"));
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.font_size, Some(11.5));
    }

    #[test]
    fn garbage_style_fields_are_dropped() {
        let raw = json!({ "bg": 12, "bl": "yes", "ht": 1.5, "bd": null });
        let style = parse_style(raw.as_object().unwrap());
        assert!(style.is_empty());
    }
}
