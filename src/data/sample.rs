//! Built-in fallback panel shown when no data file is found.

use super::model::{CellValue, Table};

/// Term-frequency metrics of the sample, followed by the composite index.
const SAMPLE_METRICS: [&str; 6] = [
    "人工智能技术词频",
    "区块链技术词频",
    "云计算技术词频",
    "大数据技术词频",
    "数字技术应用词频",
    "数字化转型指数",
];

/// (code, name, year, five term frequencies, composite index)
const SAMPLE_ROWS: [(&str, &str, i64, [i64; 5], f64); 4] = [
    ("000001", "平安银行", 2020, [35, 4, 18, 27, 51], 60.0),
    ("000001", "平安银行", 2021, [42, 6, 21, 33, 58], 68.5),
    ("000002", "万科A", 2020, [3, 0, 5, 8, 12], 21.0),
    ("000002", "万科A", 2021, [5, 1, 7, 11, 15], 25.25),
];

/// Two stocks over two years with the same headers as the real panel file.
pub fn sample_table() -> Table {
    let mut columns = vec!["股票代码".to_string(), "企业名称".to_string(), "年份".to_string()];
    columns.extend(SAMPLE_METRICS.iter().map(|m| m.to_string()));

    let mut table = Table::new(columns);
    for (code, name, year, freqs, index) in SAMPLE_ROWS {
        let mut row = vec![
            CellValue::String(code.to_string()),
            CellValue::String(name.to_string()),
            CellValue::Integer(year),
        ];
        row.extend(freqs.iter().map(|&f| CellValue::Integer(f)));
        row.push(CellValue::Float(index));
        table.push_row(row);
    }
    table
}
