use crate::address::CellCoord;
use std::collections::BTreeMap;

/// Folds a set of coordinates into A1 ranges: horizontal runs per row first, then
/// identical column spans on consecutive rows merge into rectangles. Returns at
/// most `limit` ranges and whether the list was cut short.
pub fn compress_coords_to_ranges(coords: &[CellCoord], limit: usize) -> (Vec<String>, bool) {
    if coords.is_empty() || limit == 0 {
        return (Vec::new(), !coords.is_empty());
    }

    let mut rows: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for coord in coords {
        rows.entry(coord.row).or_default().push(coord.col);
    }
    for cols in rows.values_mut() {
        cols.sort_unstable();
        cols.dedup();
    }

    let mut spans_by_cols: BTreeMap<(u32, u32), Vec<u32>> = BTreeMap::new();
    for (row, cols) in rows {
        let mut start = cols[0];
        let mut prev = cols[0];
        for col in cols.into_iter().skip(1) {
            if col == prev + 1 {
                prev = col;
            } else {
                spans_by_cols.entry((start, prev)).or_default().push(row);
                start = col;
                prev = col;
            }
        }
        spans_by_cols.entry((start, prev)).or_default().push(row);
    }

    let mut ranges = Vec::new();
    let mut truncated = false;

    'outer: for ((start_col, end_col), span_rows) in spans_by_cols {
        // Rows arrive sorted and unique from the BTreeMap walk above.
        let mut run_start = span_rows[0];
        let mut prev_row = span_rows[0];
        for row in span_rows.into_iter().skip(1) {
            if row == prev_row + 1 {
                prev_row = row;
                continue;
            }
            if ranges.len() >= limit {
                truncated = true;
                break 'outer;
            }
            ranges.push(format_range(start_col, end_col, run_start, prev_row));
            run_start = row;
            prev_row = row;
        }
        if ranges.len() >= limit {
            truncated = true;
            break;
        }
        ranges.push(format_range(start_col, end_col, run_start, prev_row));
    }

    (ranges, truncated)
}

fn format_range(start_col: u32, end_col: u32, start_row: u32, end_row: u32) -> String {
    let start_addr = CellCoord::new(start_row, start_col).a1();
    let end_addr = CellCoord::new(end_row, end_col).a1();
    if start_addr == end_addr {
        start_addr
    } else {
        format!("{start_addr}:{end_addr}")
    }
}
