//! Column discovery: header names → logical roles.
//!
//! Nothing downstream addresses a column by position in the source file.
//! Roles are resolved once here from literal header names (code, year,
//! company name, industry) and marker substrings (metrics).

use crate::config::ColumnConfig;

use super::error::LoadError;
use super::model::{IndustryColumn, IndustryKind, PanelColumns, Table};

/// Join keys and the carried value column of the industry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryColumns {
    pub code: usize,
    pub year: usize,
    /// `None` when the table has neither an industry name nor an industry code.
    pub value: Option<IndustryColumn>,
}

/// Resolve the roles of a normalized panel table. Code and year are required.
pub fn detect_panel_columns(table: &Table, cfg: &ColumnConfig) -> Result<PanelColumns, LoadError> {
    let code = required(table, &cfg.code)?;
    let year = required(table, &cfg.year)?;
    let company_name = table.column_index(&cfg.company_name);
    let industry = industry_column(table, cfg);

    let metrics = table
        .columns
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != code && i != year && Some(i) != company_name)
        .filter(|(_, name)| is_metric(name, &cfg.metric_markers))
        .map(|(i, _)| i)
        .collect();

    Ok(PanelColumns {
        code,
        year,
        company_name,
        industry,
        metrics,
    })
}

/// Resolve the join keys of a normalized industry table.
pub fn detect_industry_columns(
    table: &Table,
    cfg: &ColumnConfig,
) -> Result<IndustryColumns, LoadError> {
    Ok(IndustryColumns {
        code: required(table, &cfg.code)?,
        year: required(table, &cfg.year)?,
        value: industry_column(table, cfg),
    })
}

/// Industry name wins over industry code; never both.
fn industry_column(table: &Table, cfg: &ColumnConfig) -> Option<IndustryColumn> {
    let name = table
        .column_index(&cfg.industry_name)
        .map(|index| IndustryColumn {
            kind: IndustryKind::Name,
            index,
        });
    name.or_else(|| {
        table
            .column_index(&cfg.industry_code)
            .map(|index| IndustryColumn {
                kind: IndustryKind::Code,
                index,
            })
    })
}

pub fn is_metric(header: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| header.contains(m.as_str()))
}

fn required(table: &Table, column: &str) -> Result<usize, LoadError> {
    table
        .column_index(column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn panel_roles_are_found_by_name_and_marker() {
        let t = table(&["企业名称", "年份", "股票代码", "人工智能技术词频", "资产总计", "数字化转型指数"]);
        let roles = detect_panel_columns(&t, &ColumnConfig::default()).unwrap();
        assert_eq!(roles.code, 2);
        assert_eq!(roles.year, 1);
        assert_eq!(roles.company_name, Some(0));
        assert_eq!(roles.metrics, vec![3, 5]);
        assert_eq!(roles.industry, None);
    }

    #[test]
    fn panel_without_year_is_rejected() {
        let t = table(&["股票代码", "数字化转型指数"]);
        let err = detect_panel_columns(&t, &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column } if column == "年份"));
    }

    #[test]
    fn panel_without_metrics_still_resolves() {
        let t = table(&["股票代码", "年份"]);
        let roles = detect_panel_columns(&t, &ColumnConfig::default()).unwrap();
        assert!(roles.metrics.is_empty());
    }

    #[test]
    fn industry_name_is_preferred_over_code() {
        let t = table(&["股票代码", "年份", "行业代码", "行业名称"]);
        let cols = detect_industry_columns(&t, &ColumnConfig::default()).unwrap();
        assert_eq!(
            cols.value,
            Some(IndustryColumn {
                kind: IndustryKind::Name,
                index: 3
            })
        );
    }

    #[test]
    fn industry_code_is_used_when_name_is_absent() {
        let t = table(&["股票代码", "年份", "行业代码"]);
        let cols = detect_industry_columns(&t, &ColumnConfig::default()).unwrap();
        assert_eq!(cols.value.map(|c| c.kind), Some(IndustryKind::Code));
    }

    #[test]
    fn industry_keys_only_has_no_value_column() {
        let t = table(&["股票代码", "年份"]);
        let cols = detect_industry_columns(&t, &ColumnConfig::default()).unwrap();
        assert_eq!(cols.value, None);
    }
}
