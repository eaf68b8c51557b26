#![allow(dead_code)]
use serde_json::{Map, Value, json};
use workbook_diff::{CellCoord, CellRecord, Sheet, WorkbookSnapshot};

pub fn at(address: &str) -> CellCoord {
    CellCoord::parse(address).expect("valid A1 address")
}

pub fn sheet(id: &str, name: &str, cells: &[(&str, CellRecord)]) -> Sheet {
    cells
        .iter()
        .fold(Sheet::new(id, name), |sheet, (address, record)| {
            sheet.with_cell(at(address), record.clone())
        })
}

pub fn workbook(sheets: Vec<Sheet>) -> WorkbookSnapshot {
    sheets
        .into_iter()
        .fold(WorkbookSnapshot::new(), WorkbookSnapshot::with_sheet)
}

/// Editor-shaped JSON for a workbook. Each sheet is `(id, name, [(address, cell)])`.
pub fn snapshot_json(sheets: &[(&str, &str, Vec<(&str, Value)>)]) -> Value {
    let mut sheet_map = Map::new();
    let mut order = Vec::new();
    for (id, name, cells) in sheets {
        let mut rows: Map<String, Value> = Map::new();
        for (address, cell) in cells {
            let coord = at(address);
            let row = rows
                .entry(coord.row.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            row.as_object_mut()
                .expect("row object")
                .insert(coord.col.to_string(), cell.clone());
        }
        sheet_map.insert(
            id.to_string(),
            json!({ "id": id, "name": name, "cellData": rows }),
        );
        order.push(Value::String(id.to_string()));
    }
    json!({ "sheets": sheet_map, "sheetOrder": order })
}
