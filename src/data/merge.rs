use std::collections::HashMap;

use super::model::{CellValue, IndustryColumn, IndustryKind, Panel, Table};
use super::schema::IndustryColumns;

/// Left-join the industry table onto the panel on (code, year).
///
/// Panel order is preserved. A panel row with no match gets a `Null`
/// industry cell; a row with several matches is repeated once per match.
/// Rows whose key cannot be read never match. When the panel already owns a
/// column named like the carried one, the two become `<name>_x` (panel) and
/// `<name>_y` (industry).
pub fn merge_industry(panel: Panel, industry: &Table, cols: IndustryColumns) -> Panel {
    let mut index: HashMap<(String, i64), Vec<usize>> = HashMap::new();
    for (i, row) in industry.rows.iter().enumerate() {
        let (Some(code), Some(year)) = (row[cols.code].as_str(), row[cols.year].as_year()) else {
            continue;
        };
        index.entry((code.to_string(), year)).or_default().push(i);
    }

    let Panel {
        mut columns,
        rows,
        mut roles,
    } = panel;

    if let Some(value) = cols.value {
        let name = &industry.columns[value.index];
        let header = match columns.iter().position(|c| c == name) {
            Some(existing) => {
                columns[existing] = format!("{name}_x");
                format!("{name}_y")
            }
            None => name.clone(),
        };
        columns.push(header);
        // A name already on the panel outranks a carried code.
        let panel_has_name = matches!(roles.industry, Some(c) if c.kind == IndustryKind::Name);
        if value.kind == IndustryKind::Name || !panel_has_name {
            roles.industry = Some(IndustryColumn {
                kind: value.kind,
                index: columns.len() - 1,
            });
        }
    }

    let source_rows = rows.len();
    let mut merged = Vec::with_capacity(source_rows);
    let mut unmatched = 0usize;
    for row in rows {
        let hits = row
            .year
            .and_then(|year| index.get(&(row.code.clone(), year)))
            .map(Vec::as_slice)
            .unwrap_or_default();

        if hits.is_empty() {
            unmatched += 1;
            let mut out = row;
            if cols.value.is_some() {
                out.cells.push(CellValue::Null);
            }
            merged.push(out);
            continue;
        }

        for &hit in hits {
            let mut out = row.clone();
            if let Some(value) = cols.value {
                out.cells.push(industry.rows[hit][value.index].clone());
            }
            merged.push(out);
        }
    }

    log::info!(
        "merged industry data: {source_rows} panel rows -> {} rows, {unmatched} without a match",
        merged.len()
    );

    Panel {
        columns,
        rows: merged,
        roles,
    }
}
