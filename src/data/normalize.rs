use super::model::{whole_f64, CellValue, Table};

/// Rewrite a stock code as a zero-padded string of `width` characters.
///
/// Integers, whole floats and text are all accepted. Values already at or
/// beyond `width` pass through unmodified; `Null` stays `Null`.
pub fn normalize_code(value: &CellValue, width: usize) -> CellValue {
    let text = match value {
        CellValue::Null => return CellValue::Null,
        CellValue::Integer(i) => i.to_string(),
        CellValue::Float(v) => whole_f64(*v).map_or_else(|| v.to_string(), |i| i.to_string()),
        CellValue::String(s) => s.trim().to_string(),
        CellValue::Bool(b) => b.to_string(),
    };
    CellValue::String(zero_pad(&text, width))
}

fn zero_pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut padded = "0".repeat(width - len);
    padded.push_str(text);
    padded
}

/// Normalize the first present `sources` column into `target`.
///
/// `target` is appended when it does not exist yet (the industry file keeps
/// its code under a different header). Tables without any source column are
/// returned untouched.
pub fn normalize_code_column<S: AsRef<str>>(
    mut table: Table,
    sources: &[S],
    target: &str,
    width: usize,
) -> Table {
    let Some(src) = table.first_column_of(sources) else {
        return table;
    };
    let dst = match table.column_index(target) {
        Some(i) => i,
        None => {
            table.columns.push(target.to_string());
            for row in &mut table.rows {
                row.push(CellValue::Null);
            }
            table.columns.len() - 1
        }
    };
    for row in &mut table.rows {
        row[dst] = normalize_code(&row[src], width);
    }
    table
}

/// Rename the first alias header to `target` unless `target` already exists.
pub fn rename_year_column<S: AsRef<str>>(mut table: Table, aliases: &[S], target: &str) -> Table {
    if table.column_index(target).is_some() {
        return table;
    }
    if let Some(i) = table.first_column_of(aliases) {
        log::debug!("renaming column '{}' to '{target}'", table.columns[i]);
        table.columns[i] = target.to_string();
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn pads_numbers_and_text() {
        assert_eq!(normalize_code(&CellValue::Integer(1), 6), code("000001"));
        assert_eq!(normalize_code(&CellValue::Float(600000.0), 6), code("600000"));
        assert_eq!(normalize_code(&code("2"), 6), code("000002"));
        assert_eq!(normalize_code(&code(" 300750 "), 6), code("300750"));
        assert_eq!(normalize_code(&code("000001"), 6), code("000001"));
    }

    #[test]
    fn long_codes_pass_through() {
        assert_eq!(normalize_code(&code("1234567"), 6), code("1234567"));
        assert_eq!(normalize_code(&code("000001.SZ"), 6), code("000001.SZ"));
    }

    #[test]
    fn null_code_stays_null() {
        assert_eq!(normalize_code(&CellValue::Null, 6), CellValue::Null);
    }

    #[test]
    fn code_column_is_created_from_alternate_header() {
        let mut table = Table::new(vec!["股票代码全称".into(), "年度".into()]);
        table.push_row(vec![CellValue::Integer(2), CellValue::Integer(2020)]);

        let table = normalize_code_column(table, &["股票代码全称", "股票代码"], "股票代码", 6);
        assert_eq!(table.columns, vec!["股票代码全称", "年度", "股票代码"]);
        assert_eq!(table.rows[0][2], code("000002"));
        assert_eq!(table.rows[0][0], CellValue::Integer(2));
    }

    #[test]
    fn code_column_is_rewritten_in_place() {
        let mut table = Table::new(vec!["股票代码".into()]);
        table.push_row(vec![CellValue::Integer(1)]);
        table.push_row(vec![CellValue::Null]);

        let table = normalize_code_column(table, &["股票代码"], "股票代码", 6);
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.rows[0][0], code("000001"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_without_code_column_is_untouched() {
        let mut table = Table::new(vec!["x".into()]);
        table.push_row(vec![CellValue::Integer(1)]);
        let before = table.clone();
        assert_eq!(normalize_code_column(table, &["股票代码"], "股票代码", 6), before);
    }

    #[test]
    fn year_alias_is_renamed_only_when_target_missing() {
        let table = Table::new(vec!["年度".into(), "行业名称".into()]);
        let renamed = rename_year_column(table, &["年度"], "年份");
        assert_eq!(renamed.columns, vec!["年份", "行业名称"]);

        let table = Table::new(vec!["年度".into(), "年份".into()]);
        let kept = rename_year_column(table, &["年度"], "年份");
        assert_eq!(kept.columns, vec!["年度", "年份"]);
    }

    proptest! {
        #[test]
        fn digit_strings_pad_to_six(digits in "[0-9]{1,6}") {
            let out = normalize_code(&CellValue::String(digits.clone()), 6);
            let s = out.as_str().unwrap();
            prop_assert_eq!(s.len(), 6);
            prop_assert!(s.ends_with(&digits));
            prop_assert!(s[..6 - digits.len()].bytes().all(|b| b == b'0'));
        }

        #[test]
        fn integers_pad_to_six(n in 0i64..1_000_000) {
            let out = normalize_code(&CellValue::Integer(n), 6);
            prop_assert_eq!(out, CellValue::String(format!("{n:06}")));
        }
    }
}
