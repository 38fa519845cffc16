//! Read-only views over a loaded panel, consumed by the UI.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{IndustryKind, Panel};

/// How many metrics the headline grid shows.
pub const HEADLINE_METRICS: usize = 6;

/// Sorted distinct stock codes. Rows without a code are left out.
pub fn codes(panel: &Panel) -> Vec<String> {
    panel
        .rows
        .iter()
        .filter(|r| !r.code.is_empty())
        .map(|r| r.code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Code → first non-null company name on record.
pub fn name_map(panel: &Panel) -> BTreeMap<String, String> {
    let mut names = BTreeMap::new();
    for row in &panel.rows {
        if names.contains_key(&row.code) {
            continue;
        }
        if let Some(name) = panel.company_name(row) {
            names.insert(row.code.clone(), name.to_string());
        }
    }
    names
}

/// Sorted distinct years recorded for `code`.
pub fn years_for(panel: &Panel, code: &str) -> Vec<i64> {
    panel
        .rows
        .iter()
        .filter(|r| r.code == code)
        .filter_map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Dataset-wide counts for the overview strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub stock_count: usize,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub row_count: usize,
}

impl Summary {
    pub fn year_range_label(&self) -> String {
        match (self.year_min, self.year_max) {
            (Some(min), Some(max)) => format!("{min} - {max}"),
            _ => "-".to_string(),
        }
    }
}

pub fn summary(panel: &Panel) -> Summary {
    let years = panel.rows.iter().filter_map(|r| r.year);
    Summary {
        stock_count: codes(panel).len(),
        year_min: years.clone().min(),
        year_max: years.max(),
        row_count: panel.len(),
    }
}

/// Heading for a selection: the company name of its first row, else the code.
pub fn display_name(panel: &Panel, rows: &[usize], code: &str) -> String {
    rows.first()
        .and_then(|&i| panel.company_name(&panel.rows[i]))
        .map_or_else(|| code.to_string(), str::to_string)
}

/// Industry of the first selected row, if the panel carries one.
pub fn industry_label(panel: &Panel, rows: &[usize]) -> Option<String> {
    let &first = rows.first()?;
    let (kind, value) = panel.industry(&panel.rows[first])?;
    Some(match kind {
        IndustryKind::Name => format!("Industry: {value}"),
        IndustryKind::Code => format!("Industry code: {value}"),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    pub name: String,
    pub value: f64,
}

/// The first [`HEADLINE_METRICS`] metric columns of the first selected row,
/// rounded to four decimals. Empty or non-numeric cells are left out.
pub fn headline_metrics(panel: &Panel, rows: &[usize]) -> Vec<MetricValue> {
    let Some(&first) = rows.first() else {
        return Vec::new();
    };
    let row = &panel.rows[first];
    panel
        .roles
        .metrics
        .iter()
        .take(HEADLINE_METRICS)
        .filter_map(|&col| {
            let value = row.cells[col].as_f64()?;
            Some(MetricValue {
                name: panel.columns[col].clone(),
                value: (value * 1e4).round() / 1e4,
            })
        })
        .collect()
}

/// One line of the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub name: String,
    /// `[year, value]` sorted by year.
    pub points: Vec<[f64; 2]>,
}

/// One series per metric across the selected rows.
///
/// `None` when there is nothing to trend: a single row, or no metric columns.
pub fn trend_series(panel: &Panel, rows: &[usize]) -> Option<Vec<TrendSeries>> {
    if rows.len() < 2 || panel.roles.metrics.is_empty() {
        return None;
    }
    let mut ordered: Vec<_> = rows
        .iter()
        .map(|&i| &panel.rows[i])
        .filter_map(|r| r.year.map(|y| (y, r)))
        .collect();
    ordered.sort_by_key(|(year, _)| *year);

    let series = panel
        .roles
        .metrics
        .iter()
        .map(|&col| TrendSeries {
            name: panel.columns[col].clone(),
            points: ordered
                .iter()
                .filter_map(|(year, row)| row.cells[col].as_f64().map(|v| [*year as f64, v]))
                .collect(),
        })
        .collect();
    Some(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnConfig;
    use crate::data::filter::{select, YearSelector};
    use crate::data::model::{CellValue, Table};
    use crate::data::sample::sample_table;
    use crate::data::schema::detect_panel_columns;

    fn panel_from(table: Table) -> Panel {
        let roles = detect_panel_columns(&table, &ColumnConfig::default()).unwrap();
        Panel::from_table(table, roles)
    }

    #[test]
    fn sample_summary() {
        let panel = panel_from(sample_table());
        let s = summary(&panel);
        assert_eq!(s.stock_count, 2);
        assert_eq!(s.year_range_label(), "2020 - 2021");
        assert_eq!(s.row_count, 4);
    }

    #[test]
    fn codes_names_and_years() {
        let panel = panel_from(sample_table());
        assert_eq!(codes(&panel), vec!["000001", "000002"]);
        assert_eq!(name_map(&panel).get("000002").map(String::as_str), Some("万科A"));
        assert_eq!(years_for(&panel, "000001"), vec![2020, 2021]);
        assert!(years_for(&panel, "123456").is_empty());
    }

    #[test]
    fn rows_without_code_are_not_listed() {
        let mut t = Table::new(vec!["股票代码".into(), "年份".into(), "数字化转型指数".into()]);
        t.push_row(vec![CellValue::Null, CellValue::Integer(2020), CellValue::Float(1.0)]);
        t.push_row(vec![
            CellValue::String("000001".into()),
            CellValue::Integer(2020),
            CellValue::Float(2.0),
        ]);
        let panel = panel_from(t);

        assert_eq!(codes(&panel), vec!["000001"]);
        let s = summary(&panel);
        assert_eq!(s.stock_count, 1);
        assert_eq!(s.row_count, 2);
    }

    #[test]
    fn name_map_skips_null_names() {
        let mut t = Table::new(vec!["股票代码".into(), "年份".into(), "企业名称".into()]);
        t.push_row(vec![
            CellValue::String("000005".into()),
            CellValue::Integer(2019),
            CellValue::Null,
        ]);
        t.push_row(vec![
            CellValue::String("000005".into()),
            CellValue::Integer(2020),
            CellValue::String("世纪星源".into()),
        ]);
        let panel = panel_from(t);
        assert_eq!(name_map(&panel).get("000005").map(String::as_str), Some("世纪星源"));
    }

    #[test]
    fn headline_metrics_are_rounded_and_capped() {
        let mut t = Table::new(vec!["股票代码".into(), "年份".into()]);
        t.columns.extend((1..=8).map(|i| format!("指数{i}")));
        let mut row = vec![CellValue::String("000001".into()), CellValue::Integer(2020)];
        row.push(CellValue::Float(1.234_56));
        row.push(CellValue::Null);
        row.extend((3..=8).map(|i| CellValue::Integer(i)));
        t.push_row(row);
        let panel = panel_from(t);

        let metrics = headline_metrics(&panel, &[0]);
        assert_eq!(metrics.len(), 5);
        assert_eq!(metrics[0].value, 1.2346);
        assert_eq!(metrics[1].name, "指数3");
        assert!(headline_metrics(&panel, &[]).is_empty());
    }

    #[test]
    fn trend_needs_more_than_one_row() {
        let panel = panel_from(sample_table());
        let one = select(&panel, "000001", YearSelector::Year(2021));
        assert!(trend_series(&panel, &one).is_none());

        let all = select(&panel, "000001", YearSelector::All);
        let series = trend_series(&panel, &all).unwrap();
        assert_eq!(series.len(), 6);
        let composite = series.iter().find(|s| s.name == "数字化转型指数").unwrap();
        assert_eq!(composite.points, vec![[2020.0, 60.0], [2021.0, 68.5]]);
    }

    #[test]
    fn trend_points_are_sorted_by_year() {
        let mut t = Table::new(vec!["股票代码".into(), "年份".into(), "数字化转型指数".into()]);
        for (year, v) in [(2022, 3.0), (2020, 1.0), (2021, 2.0)] {
            t.push_row(vec![
                CellValue::String("000001".into()),
                CellValue::Integer(year),
                CellValue::Float(v),
            ]);
        }
        let panel = panel_from(t);
        let series = trend_series(&panel, &[0, 1, 2]).unwrap();
        assert_eq!(series[0].points, vec![[2020.0, 1.0], [2021.0, 2.0], [2022.0, 3.0]]);
    }

    #[test]
    fn display_name_falls_back_to_code() {
        let panel = panel_from(sample_table());
        assert_eq!(display_name(&panel, &[0], "000001"), "平安银行");
        assert_eq!(display_name(&panel, &[], "000001"), "000001");
        assert_eq!(industry_label(&panel, &[0]), None);
    }
}
