use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "DTI_VIEWER_CONFIG";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Top-level configuration. Every field has a default, so a config file only
/// needs to list what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: SourceConfig,
    pub columns: ColumnConfig,
}

/// Where the two datasets are looked for, in priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub panel_candidates: Vec<PathBuf>,
    pub industry_candidates: Vec<PathBuf>,
    /// Substitute the built-in sample when no panel candidate exists.
    pub fallback_to_sample: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            panel_candidates: vec![
                PathBuf::from("APP ALL/两版合并后的年报数据_完整版.xlsx"),
                PathBuf::from("data/两版合并后的年报数据_完整版.xlsx"),
                PathBuf::from("两版合并后的年报数据_完整版.xlsx"),
                PathBuf::from("sample_panel.parquet"),
            ],
            industry_candidates: vec![
                PathBuf::from("APP ALL/最终数据dta格式-上市公司年度行业代码至2021.xlsx"),
                PathBuf::from("data/最终数据dta格式-上市公司年度行业代码至2021.xlsx"),
                PathBuf::from("最终数据dta格式-上市公司年度行业代码至2021.xlsx"),
                PathBuf::from("sample_industry.csv"),
            ],
            fallback_to_sample: true,
        }
    }
}

/// Header names used to discover column roles. Matching is by literal name,
/// except metrics which match by substring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Canonical stock-code header shared by both datasets after normalization.
    pub code: String,
    /// Industry-file headers holding the stock code, first present wins.
    pub industry_code_sources: Vec<String>,
    pub year: String,
    /// Alternate year headers renamed to `year` in the industry file.
    pub year_aliases: Vec<String>,
    pub company_name: String,
    pub industry_name: String,
    pub industry_code: String,
    pub metric_markers: Vec<String>,
    pub code_width: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            code: "股票代码".into(),
            industry_code_sources: vec!["股票代码全称".into(), "股票代码".into()],
            year: "年份".into(),
            year_aliases: vec!["年度".into()],
            company_name: "企业名称".into(),
            industry_name: "行业名称".into(),
            industry_code: "行业代码".into(),
            metric_markers: vec!["指数".into(), "词频".into()],
            code_width: 6,
        }
    }
}

impl AppConfig {
    /// Parse a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config from `DTI_VIEWER_CONFIG` or the first CLI argument.
    /// A broken config file is logged and replaced by the defaults.
    pub fn resolve() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| std::env::args_os().nth(1).map(PathBuf::from));

        match path {
            Some(path) => match Self::from_json_file(&path) {
                Ok(config) => {
                    log::info!("Using config {}", path.display());
                    config
                }
                Err(e) => {
                    log::error!("Ignoring config: {e:#}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
