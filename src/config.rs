use crate::diff::DiffOptions;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_MAX_CHANGES: usize = 10_000;
const DEFAULT_RANGE_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputProfile {
    /// Full diff with every cell change.
    #[default]
    Full,
    /// Counts plus changed ranges per sheet.
    Summary,
}

impl std::fmt::Display for OutputProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputProfile::Full => write!(f, "full"),
            OutputProfile::Summary => write!(f, "summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    pub sheet_filter: Option<String>,
    pub ignore_styles: bool,
    pub max_changes: Option<usize>,
    pub range_limit: usize,
    pub output_profile: OutputProfile,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            sheet_filter: None,
            ignore_styles: false,
            max_changes: Some(DEFAULT_MAX_CHANGES),
            range_limit: DEFAULT_RANGE_LIMIT,
            output_profile: OutputProfile::default(),
        }
    }
}

impl DiffConfig {
    pub fn from_args(args: ConfigArgs) -> Result<Self> {
        let ConfigArgs {
            config,
            sheet: cli_sheet,
            ignore_styles: cli_ignore_styles,
            max_changes: cli_max_changes,
            range_limit: cli_range_limit,
            output_profile: cli_output_profile,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            sheet: file_sheet,
            ignore_styles: file_ignore_styles,
            max_changes: file_max_changes,
            range_limit: file_range_limit,
            output_profile: file_output_profile,
        } = file_config;

        let sheet_filter = cli_sheet
            .or(file_sheet)
            .map(|pattern| pattern.trim().to_string())
            .filter(|pattern| !pattern.is_empty());

        let ignore_styles = cli_ignore_styles || file_ignore_styles.unwrap_or(false);

        let max_changes = cli_max_changes
            .or(file_max_changes)
            .unwrap_or(DEFAULT_MAX_CHANGES);
        let max_changes = if max_changes == 0 {
            None
        } else {
            Some(max_changes)
        };

        let range_limit = cli_range_limit
            .or(file_range_limit)
            .unwrap_or(DEFAULT_RANGE_LIMIT)
            .max(1);

        let output_profile = cli_output_profile
            .or(file_output_profile)
            .unwrap_or_default();

        Ok(Self {
            sheet_filter,
            ignore_styles,
            max_changes,
            range_limit,
            output_profile,
        })
    }

    pub fn diff_options(&self) -> Result<DiffOptions> {
        let options = DiffOptions::default().ignore_styles(self.ignore_styles);
        match self.sheet_filter.as_deref() {
            Some(pattern) => options
                .with_sheet_filter(pattern)
                .with_context(|| format!("invalid sheet filter '{pattern}'")),
            None => Ok(options),
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    #[arg(
        long,
        env = "WORKBOOK_DIFF_CONFIG",
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "WORKBOOK_DIFF_SHEET",
        value_name = "GLOB",
        help = "Only compare cells of sheets whose id or name matches this glob",
        global = true
    )]
    pub sheet: Option<String>,

    #[arg(
        long,
        env = "WORKBOOK_DIFF_IGNORE_STYLES",
        help = "Compare values and formulas only",
        global = true
    )]
    pub ignore_styles: bool,

    #[arg(
        long,
        env = "WORKBOOK_DIFF_MAX_CHANGES",
        value_name = "N",
        help = "Max cell changes in a report before truncation (default: 10000; 0 disables)",
        value_parser = clap::value_parser!(usize),
        global = true
    )]
    pub max_changes: Option<usize>,

    #[arg(
        long,
        env = "WORKBOOK_DIFF_RANGE_LIMIT",
        value_name = "N",
        help = "Max changed ranges listed per sheet in summaries (default: 50)",
        value_parser = clap::value_parser!(usize),
        global = true
    )]
    pub range_limit: Option<usize>,

    #[arg(
        long,
        env = "WORKBOOK_DIFF_OUTPUT_PROFILE",
        value_enum,
        value_name = "PROFILE",
        help = "Report shape (full or summary)",
        global = true
    )]
    pub output_profile: Option<OutputProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    sheet: Option<String>,
    ignore_styles: Option<bool>,
    max_changes: Option<usize>,
    range_limit: Option<usize>,
    output_profile: Option<OutputProfile>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = DiffConfig::from_args(ConfigArgs::default()).unwrap();
        assert_eq!(config, DiffConfig::default());
    }

    #[test]
    fn flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "sheet: Budget*\nmax_changes: 5\noutput_profile: summary").unwrap();

        let config = DiffConfig::from_args(ConfigArgs {
            config: Some(path),
            max_changes: Some(0),
            ..ConfigArgs::default()
        })
        .unwrap();

        assert_eq!(config.sheet_filter.as_deref(), Some("Budget*"));
        assert_eq!(config.max_changes, None);
        assert_eq!(config.output_profile, OutputProfile::Summary);
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.toml");
        fs::write(&path, "sheet = 'x'").unwrap();

        let err = DiffConfig::from_args(ConfigArgs {
            config: Some(path),
            ..ConfigArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("unsupported config extension"));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let config = DiffConfig {
            sheet_filter: Some("[".into()),
            ..DiffConfig::default()
        };
        let err = config.diff_options().unwrap_err();
        assert!(err.to_string().contains("invalid sheet filter"));
    }
}
