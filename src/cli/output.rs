use anyhow::Result;
use serde_json::Value;
use std::io::Write;

/// Writes the payload as JSON; the output format is checked before any command runs.
pub fn emit_value(value: &Value, compact: bool, quiet: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if compact || quiet {
        serde_json::to_writer(&mut handle, value)?;
    } else {
        serde_json::to_writer_pretty(&mut handle, value)?;
    }
    handle.write_all(b"\n")?;
    Ok(())
}
