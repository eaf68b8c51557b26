use crate::config::DiffConfig;
use crate::diff::diff_workbooks_with;
use crate::model::WorkbookSnapshot;
use crate::report::build_report;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub async fn diff(old: PathBuf, new: PathBuf, config: DiffConfig) -> Result<Value> {
    let old = normalize_existing_file(&old)?;
    let new = normalize_existing_file(&new)?;
    let options = config.diff_options()?;

    let (old_snapshot, new_snapshot) = tokio::try_join!(load_snapshot(&old), load_snapshot(&new))?;
    tracing::debug!(
        old_sheets = old_snapshot.sheets.len(),
        new_sheets = new_snapshot.sheets.len(),
        "snapshots loaded"
    );

    let diff = tokio::task::spawn_blocking(move || {
        diff_workbooks_with(&old_snapshot, &new_snapshot, &options)
    })
    .await
    .context("diff task failed")?;

    let report = build_report(
        old.display().to_string(),
        new.display().to_string(),
        diff,
        &config,
    );
    Ok(serde_json::to_value(report)?)
}

async fn load_snapshot(path: &Path) -> Result<WorkbookSnapshot> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read snapshot '{}'", path.display()))?;
    WorkbookSnapshot::from_reader(bytes.as_slice())
        .with_context(|| format!("failed to load snapshot '{}'", path.display()))
}

fn normalize_existing_file(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !absolute.exists() {
        bail!("file '{}' does not exist", absolute.display());
    }
    if !absolute.is_file() {
        bail!("path '{}' is not a file", absolute.display());
    }
    Ok(std::fs::canonicalize(&absolute).unwrap_or(absolute))
}
