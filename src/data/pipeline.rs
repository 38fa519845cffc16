use std::path::PathBuf;

use crate::config::{AppConfig, ColumnConfig};

use super::error::{LoadError, Notice};
use super::loader::{locate, read_table};
use super::merge::merge_industry;
use super::model::{Panel, Table};
use super::normalize::{normalize_code_column, rename_year_column};
use super::sample::sample_table;
use super::schema::{detect_industry_columns, detect_panel_columns, IndustryColumns};

/// Where the panel rows came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSource {
    File(PathBuf),
    Sample,
}

/// A fully prepared panel plus everything the UI should tell the user about it.
#[derive(Debug, Clone)]
pub struct LoadedPanel {
    pub panel: Panel,
    pub source: PanelSource,
    pub industry_source: Option<PathBuf>,
    pub notices: Vec<Notice>,
}

/// Load, normalize and merge both datasets.
///
/// Only the panel can fail the load. Industry problems and missing metric
/// columns are reported as notices on an otherwise usable result.
pub fn load(config: &AppConfig) -> Result<LoadedPanel, LoadError> {
    let cols = &config.columns;
    let mut notices = Vec::new();

    let (table, source) = match locate(&config.sources.panel_candidates) {
        Some(path) => {
            let table = read_table(&path).map_err(|e| {
                log::error!("Failed to read {}: {e:#}", path.display());
                LoadError::Read {
                    path: path.clone(),
                    reason: format!("{e:#}"),
                }
            })?;
            (table, PanelSource::File(path))
        }
        None if config.sources.fallback_to_sample => {
            log::warn!("No panel file found, falling back to the built-in sample");
            notices.push(Notice::SampleData);
            (sample_table(), PanelSource::Sample)
        }
        None => {
            return Err(LoadError::NoPanelSource {
                candidates: config.sources.panel_candidates.len(),
            })
        }
    };

    let table = normalize_code_column(
        table,
        std::slice::from_ref(&cols.code),
        &cols.code,
        cols.code_width,
    );
    let roles = detect_panel_columns(&table, cols)?;
    let mut panel = Panel::from_table(table, roles);

    let mut industry_source = None;
    match load_industry(config) {
        Ok((path, table, industry_cols)) => {
            panel = merge_industry(panel, &table, industry_cols);
            industry_source = Some(path);
        }
        Err(reason) => {
            log::warn!("Industry data unavailable: {reason}");
            notices.push(Notice::IndustryUnavailable(reason));
        }
    }

    if panel.roles.metrics.is_empty() {
        log::warn!("No metric columns match markers {:?}", cols.metric_markers);
        notices.push(Notice::MissingMetricColumns);
    }

    log::info!(
        "Loaded {} rows with columns {:?} from {:?}",
        panel.len(),
        panel.columns,
        source
    );

    Ok(LoadedPanel {
        panel,
        source,
        industry_source,
        notices,
    })
}

/// Locate, read and normalize the industry table. Errors are user-facing reasons.
fn load_industry(config: &AppConfig) -> Result<(PathBuf, Table, IndustryColumns), String> {
    let path = locate(&config.sources.industry_candidates)
        .ok_or_else(|| "industry file not found".to_string())?;
    let table = read_table(&path).map_err(|e| format!("{}: {e:#}", path.display()))?;
    let (table, cols) = prepare_industry(table, &config.columns).map_err(|e| e.to_string())?;
    Ok((path, table, cols))
}

fn prepare_industry(
    table: Table,
    cols: &ColumnConfig,
) -> Result<(Table, IndustryColumns), LoadError> {
    let table = normalize_code_column(
        table,
        &cols.industry_code_sources,
        &cols.code,
        cols.code_width,
    );
    let table = rename_year_column(table, &cols.year_aliases, &cols.year);
    let industry_cols = detect_industry_columns(&table, cols)?;
    Ok((table, industry_cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{select, YearSelector};
    use crate::data::model::CellValue;
    use crate::data::query::summary;
    use std::path::Path;

    fn config_in(dir: &Path, panel: &str, industry: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.sources.panel_candidates = vec![dir.join("missing.xlsx"), dir.join(panel)];
        config.sources.industry_candidates = vec![dir.join(industry)];
        config
    }

    #[test]
    fn missing_files_fall_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&config_in(dir.path(), "nope.xlsx", "nope.xlsx")).unwrap();

        assert_eq!(loaded.source, PanelSource::Sample);
        assert!(loaded.notices.contains(&Notice::SampleData));
        assert!(matches!(loaded.notices[1], Notice::IndustryUnavailable(_)));

        let s = summary(&loaded.panel);
        assert_eq!(s.stock_count, 2);
        assert_eq!(s.year_range_label(), "2020 - 2021");
        assert_eq!(s.row_count, 4);

        let rows = select(&loaded.panel, "000001", YearSelector::Year(2020));
        assert_eq!(rows.len(), 1);
        let col = loaded.panel.columns.iter().position(|c| c == "数字化转型指数").unwrap();
        assert_eq!(loaded.panel.rows[rows[0]].cells[col].as_f64(), Some(60.0));
    }

    #[test]
    fn disabled_fallback_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "nope.csv", "nope.csv");
        config.sources.fallback_to_sample = false;
        let err = load(&config).unwrap_err();
        assert!(matches!(err, LoadError::NoPanelSource { candidates: 2 }));
    }

    #[test]
    fn unreadable_panel_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("panel.xlsx"), b"garbage").unwrap();
        let err = load(&config_in(dir.path(), "panel.xlsx", "nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn panel_without_code_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("panel.csv"), "年份,数字化转型指数\n2020,1\n").unwrap();
        let err = load(&config_in(dir.path(), "panel.csv", "nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column } if column == "股票代码"));
    }

    #[test]
    fn industry_file_is_normalized_and_joined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("panel.csv"),
            "股票代码,企业名称,年份,数字化转型指数\n1,平安银行,2020,60\n1,平安银行,2021,68.5\n600000,浦发银行,2020,40\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("industry.csv"),
            "股票代码全称,年度,行业代码,行业名称\n1,2020,J66,货币金融服务\n600000,2021,J66,货币金融服务\n",
        )
        .unwrap();

        let loaded = load(&config_in(dir.path(), "panel.csv", "industry.csv")).unwrap();
        assert!(loaded.notices.is_empty());
        assert_eq!(loaded.industry_source, Some(dir.path().join("industry.csv")));

        let panel = &loaded.panel;
        assert_eq!(panel.len(), 3);
        assert_eq!(panel.rows[0].code, "000001");
        assert_eq!(panel.rows[0].cells[0], CellValue::String("000001".into()));
        assert_eq!(panel.columns.last().map(String::as_str), Some("行业名称"));

        let industry = panel.roles.industry.unwrap().index;
        assert_eq!(panel.rows[0].cells[industry], CellValue::String("货币金融服务".into()));
        assert!(panel.rows[1].cells[industry].is_null());
        assert!(panel.rows[2].cells[industry].is_null());
    }

    #[test]
    fn spreadsheets_load_end_to_end() {
        let dir = tempfile::tempdir().unwrap();

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["股票代码", "企业名称", "年份", "数字化转型指数"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_string(1, 1, "平安银行").unwrap();
        sheet.write_number(1, 2, 2020.0).unwrap();
        sheet.write_number(1, 3, 60.0).unwrap();
        sheet.write_number(2, 0, 1.0).unwrap();
        sheet.write_string(2, 1, "平安银行").unwrap();
        sheet.write_number(2, 2, 2021.0).unwrap();
        sheet.write_number(2, 3, 68.5).unwrap();
        workbook.save(dir.path().join("panel.xlsx")).unwrap();

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["股票代码全称", "年度", "行业代码"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_number(1, 1, 2020.0).unwrap();
        sheet.write_string(1, 2, "J66").unwrap();
        workbook.save(dir.path().join("industry.xlsx")).unwrap();

        let loaded = load(&config_in(dir.path(), "panel.xlsx", "industry.xlsx")).unwrap();
        assert!(loaded.notices.is_empty());
        assert_eq!(loaded.source, PanelSource::File(dir.path().join("panel.xlsx")));

        let panel = &loaded.panel;
        let rows = select(panel, "000001", YearSelector::Year(2020));
        assert_eq!(rows.len(), 1);
        assert_eq!(panel.rows[rows[0]].cells[3].as_f64(), Some(60.0));
        assert_eq!(
            crate::data::query::industry_label(panel, &rows).as_deref(),
            Some("Industry code: J66")
        );

        let all = select(panel, "000001", YearSelector::All);
        assert_eq!(all.len(), 2);
        assert!(crate::data::query::trend_series(panel, &all).is_some());
    }

    #[test]
    fn broken_industry_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("panel.csv"), "股票代码,年份,数字化转型指数\n1,2020,60\n").unwrap();
        std::fs::write(dir.path().join("industry.xlsx"), b"garbage").unwrap();

        let loaded = load(&config_in(dir.path(), "panel.csv", "industry.xlsx")).unwrap();
        assert_eq!(loaded.panel.len(), 1);
        assert_eq!(loaded.industry_source, None);
        assert!(matches!(loaded.notices.as_slice(), [Notice::IndustryUnavailable(_)]));
    }

    #[test]
    fn industry_without_year_skips_merge() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("panel.csv"), "股票代码,年份,数字化转型指数\n1,2020,60\n").unwrap();
        std::fs::write(dir.path().join("industry.csv"), "股票代码,行业名称\n1,货币金融服务\n").unwrap();

        let loaded = load(&config_in(dir.path(), "panel.csv", "industry.csv")).unwrap();
        assert_eq!(loaded.panel.columns, vec!["股票代码", "年份", "数字化转型指数"]);
        assert!(matches!(
            loaded.notices.as_slice(),
            [Notice::IndustryUnavailable(reason)] if reason.contains("年份")
        ));
    }

    #[test]
    fn panel_without_metrics_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("panel.csv"), "股票代码,年份,资产总计\n1,2020,100\n").unwrap();

        let loaded = load(&config_in(dir.path(), "panel.csv", "nope.csv")).unwrap();
        assert!(loaded.notices.contains(&Notice::MissingMetricColumns));
    }
}
