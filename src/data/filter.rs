use std::fmt;

use super::model::Panel;

// ---------------------------------------------------------------------------
// Selection predicate: one stock, one year or all of them
// ---------------------------------------------------------------------------

/// Which fiscal years of the chosen stock to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearSelector {
    /// Every year on record for the stock.
    #[default]
    All,
    Year(i64),
}

impl YearSelector {
    fn accepts(self, year: Option<i64>) -> bool {
        match self {
            YearSelector::All => true,
            YearSelector::Year(wanted) => year == Some(wanted),
        }
    }
}

impl fmt::Display for YearSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearSelector::All => write!(f, "All years"),
            YearSelector::Year(y) => write!(f, "{y}"),
        }
    }
}

/// Return indices of panel rows matching `code` and `year`, in panel order.
///
/// An empty result is a valid answer: the stock simply has no row for that
/// year. Callers surface it as a notice.
pub fn select(panel: &Panel, code: &str, year: YearSelector) -> Vec<usize> {
    panel
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.code == code && year.accepts(row.year))
        .map(|(i, _)| i)
        .collect()
}
