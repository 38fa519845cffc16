use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Poisson-ish count around `mean`, never negative.
    fn count(&mut self, mean: f64) -> i64 {
        let jitter = (self.next_f64() - 0.5) * mean;
        (mean + jitter).round().max(0.0) as i64
    }
}

/// (code, name, industry code, industry name, digital intensity)
const FIRMS: [(i64, &str, &str, &str, f64); 8] = [
    (1, "平安银行", "J66", "货币金融服务", 1.6),
    (2, "万科A", "K70", "房地产业", 0.4),
    (333, "美的集团", "C38", "电气机械和器材制造业", 1.1),
    (651, "格力电器", "C38", "电气机械和器材制造业", 0.9),
    (2415, "海康威视", "C39", "计算机、通信和其他电子设备制造业", 2.2),
    (300750, "宁德时代", "C38", "电气机械和器材制造业", 1.3),
    (600519, "贵州茅台", "C15", "酒、饮料和精制茶制造业", 0.3),
    (601318, "中国平安", "J68", "保险业", 1.8),
];

const TERMS: [&str; 5] = [
    "人工智能技术词频",
    "区块链技术词频",
    "云计算技术词频",
    "大数据技术词频",
    "数字技术应用词频",
];

const FIRST_YEAR: i64 = 2011;
const LAST_YEAR: i64 = 2021;
/// The industry table stops a year early so some panel rows stay unmatched.
const LAST_INDUSTRY_YEAR: i64 = 2020;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut codes = Vec::new();
    let mut names = Vec::new();
    let mut years = Vec::new();
    let mut terms: Vec<Vec<i64>> = vec![Vec::new(); TERMS.len()];
    let mut index = Vec::new();

    for &(code, name, _, _, intensity) in &FIRMS {
        for year in FIRST_YEAR..=LAST_YEAR {
            let trend = 1.0 + (year - FIRST_YEAR) as f64 * 0.25;
            let mut total = 0.0;
            for (t, column) in terms.iter_mut().enumerate() {
                let mean = intensity * trend * (12.0 - 2.0 * t as f64);
                let n = rng.count(mean);
                total += n as f64;
                column.push(n);
            }
            codes.push(code);
            names.push(name);
            years.push(year);
            let composite = 100.0 * (1.0 + total).ln() / 6.0;
            index.push((composite * 100.0).round() / 100.0);
        }
    }

    let panel_rows = codes.len();

    // ---- Panel: parquet with raw integer codes ----
    let mut fields = vec![
        Field::new("股票代码", DataType::Int64, false),
        Field::new("企业名称", DataType::Utf8, false),
        Field::new("年份", DataType::Int64, false),
    ];
    fields.extend(TERMS.iter().map(|t| Field::new(*t, DataType::Int64, false)));
    fields.push(Field::new("数字化转型指数", DataType::Float64, false));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<arrow::array::ArrayRef> = vec![
        Arc::new(Int64Array::from(codes)),
        Arc::new(StringArray::from(names)),
        Arc::new(Int64Array::from(years)),
    ];
    arrays.extend(
        terms
            .into_iter()
            .map(|column| Arc::new(Int64Array::from(column)) as arrow::array::ArrayRef),
    );
    arrays.push(Arc::new(Float64Array::from(index)));

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let panel_path = "sample_panel.parquet";
    let file = std::fs::File::create(panel_path).context("creating panel file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing panel batch")?;
    writer.close().context("closing parquet writer")?;

    // ---- Industry: CSV keyed by 股票代码全称 / 年度 ----
    let industry_path = "sample_industry.csv";
    let mut csv = csv::Writer::from_path(industry_path).context("creating industry file")?;
    csv.write_record(["股票代码全称", "年度", "行业代码", "行业名称"])?;
    let mut industry_rows = 0;
    for &(code, _, industry_code, industry_name, _) in &FIRMS {
        for year in FIRST_YEAR..=LAST_INDUSTRY_YEAR {
            csv.write_record([
                code.to_string(),
                year.to_string(),
                industry_code.to_string(),
                industry_name.to_string(),
            ])?;
            industry_rows += 1;
        }
    }
    csv.flush()?;

    println!(
        "Wrote {panel_rows} panel rows to {panel_path} and {industry_rows} industry rows to {industry_path}"
    );
    Ok(())
}
