use crate::diff::WorkbookDiff;
use anyhow::Result;
use serde_json::Value;

pub fn schema() -> Result<Value> {
    let schema = schemars::schema_for!(WorkbookDiff);
    Ok(serde_json::to_value(schema)?)
}
