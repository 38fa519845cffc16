use std::io::Write;

use anyhow::{Context, Result};

use super::filter::YearSelector;
use super::model::Panel;

/// UTF-8 byte-order mark; spreadsheet tools need it to detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the header and the given rows as CSV.
pub fn write_csv<W: Write>(panel: &Panel, rows: &[usize], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&panel.columns)
        .context("writing CSV header")?;
    for &i in rows {
        let row = &panel.rows[i];
        csv.write_record(row.cells.iter().map(|c| c.to_field()))
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    csv.flush().context("flushing CSV")?;
    Ok(())
}

/// CSV bytes of the selection, BOM first.
pub fn csv_bytes(panel: &Panel, rows: &[usize]) -> Result<Vec<u8>> {
    let mut out = UTF8_BOM.to_vec();
    write_csv(panel, rows, &mut out)?;
    Ok(out)
}

/// `{company-or-code}_{year-or-all}_data.csv`
pub fn export_file_name(name: &str, year: YearSelector) -> String {
    let year = match year {
        YearSelector::All => "all".to_string(),
        YearSelector::Year(y) => y.to_string(),
    };
    let name: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{name}_{year}_data.csv")
}
