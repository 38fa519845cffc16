use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a spreadsheet column can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for metric display and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as a fiscal year. Whole floats (`2020.0`) and
    /// numeric strings are accepted; anything else has no year.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) => whole_f64(*v),
            CellValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_f64))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Full-precision text for CSV output. `Null` becomes an empty field.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

/// `Some(n)` when `v` is a finite whole number that fits in an `i64`.
pub fn whole_f64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Table – a raw sheet as read from disk
// ---------------------------------------------------------------------------

/// Header names plus rectangular rows. Readers pad short rows with `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of the first of `names` present in the header.
    pub fn first_column_of<S: AsRef<str>>(&self, names: &[S]) -> Option<usize> {
        names.iter().find_map(|n| self.column_index(n.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Panel – the normalized (and possibly merged) firm-year dataset
// ---------------------------------------------------------------------------

/// Whether the carried industry column holds a name or a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryKind {
    Name,
    Code,
}

/// Location and meaning of the industry column in a merged panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryColumn {
    pub kind: IndustryKind,
    pub index: usize,
}

/// Logical role → physical column index, resolved once by header scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelColumns {
    pub code: usize,
    pub year: usize,
    pub company_name: Option<usize>,
    pub industry: Option<IndustryColumn>,
    /// Metric columns in header order.
    pub metrics: Vec<usize>,
}

/// One (stock code, year) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    /// Zero-padded code, duplicated out of `cells` for keyed lookups.
    pub code: String,
    pub year: Option<i64>,
    /// Every cell of the row in header order.
    pub cells: Vec<CellValue>,
}

/// The firm-year panel with its resolved column roles.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub columns: Vec<String>,
    pub rows: Vec<PanelRow>,
    pub roles: PanelColumns,
}

impl Panel {
    /// Key every row of a normalized table by its code and year cells.
    pub fn from_table(table: Table, roles: PanelColumns) -> Self {
        let rows = table
            .rows
            .into_iter()
            .map(|cells| PanelRow {
                code: cells[roles.code].to_field(),
                year: cells[roles.year].as_year(),
                cells,
            })
            .collect();
        Self {
            columns: table.columns,
            rows,
            roles,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn company_name<'r>(&self, row: &'r PanelRow) -> Option<&'r str> {
        self.roles
            .company_name
            .and_then(|i| row.cells.get(i))
            .filter(|v| !v.is_null())
            .and_then(|v| v.as_str())
    }

    /// Industry value of a row together with its kind, if the panel was merged
    /// with an industry column and the row matched.
    pub fn industry<'r>(&self, row: &'r PanelRow) -> Option<(IndustryKind, &'r CellValue)> {
        let col = self.roles.industry?;
        row.cells
            .get(col.index)
            .filter(|v| !v.is_null())
            .map(|v| (col.kind, v))
    }

    pub fn metric_names(&self) -> Vec<&str> {
        self.roles
            .metrics
            .iter()
            .map(|&i| self.columns[i].as_str())
            .collect()
    }
}
