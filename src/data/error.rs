use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Conditions that stop the pipeline before any panel is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no panel dataset found among {candidates} candidate path(s) and the sample fallback is disabled")]
    NoPanelSource { candidates: usize },

    #[error("failed to read panel dataset {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("dataset has no '{column}' column")]
    MissingColumn { column: String },
}

/// Non-fatal conditions. The pipeline and the selector keep going and the
/// UI shows these next to whatever could still be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No panel file was found; the built-in sample is shown instead.
    SampleData,
    /// The industry table could not be used; panel shown without industries.
    IndustryUnavailable(String),
    /// No header matched the metric markers.
    MissingMetricColumns,
    /// The chosen (code, year) has no rows.
    EmptySelection,
    /// Fewer than two rows or no metrics, so there is nothing to trend.
    InsufficientTrendData,
}

impl Notice {
    /// Warnings are degraded data; the rest are informational.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::SampleData | Notice::IndustryUnavailable(_) | Notice::MissingMetricColumns
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SampleData => write!(f, "Data file not found, showing built-in sample data"),
            Notice::IndustryUnavailable(reason) => {
                write!(f, "Industry data unavailable ({reason}), using panel data only")
            }
            Notice::MissingMetricColumns => {
                write!(f, "No digital transformation index columns found")
            }
            Notice::EmptySelection => write!(f, "No data for the selected stock and year"),
            Notice::InsufficientTrendData => write!(f, "Not enough data to draw a trend chart"),
        }
    }
}
