use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::error::Notice;
use crate::data::export::{csv_bytes, export_file_name};
use crate::data::filter::{select, YearSelector};
use crate::data::pipeline::{self, LoadedPanel};
use crate::data::query::{self, display_name};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Prepared panel (None when the last load failed).
    pub loaded: Option<LoadedPanel>,

    /// Fatal load error shown instead of the dashboard.
    pub load_error: Option<String>,

    /// Sorted distinct codes and their company names.
    pub codes: Vec<String>,
    pub names: BTreeMap<String, String>,

    /// Current selection.
    pub selected_code: Option<String>,
    pub years: Vec<i64>,
    pub year: YearSelector,

    /// Indices of panel rows matching the selection (cached).
    pub selection: Vec<usize>,

    /// Colour per metric series.
    pub color_map: ColorMap,

    /// Status message shown in the UI (export results, dialog errors).
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and run the first load.
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            config,
            loaded: None,
            load_error: None,
            codes: Vec::new(),
            names: BTreeMap::new(),
            selected_code: None,
            years: Vec::new(),
            year: YearSelector::All,
            selection: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        };
        state.reload();
        state
    }

    /// Re-run the whole pipeline from disk.
    pub fn reload(&mut self) {
        match pipeline::load(&self.config) {
            Ok(loaded) => self.set_loaded(loaded),
            Err(e) => {
                log::error!("Failed to load data: {e}");
                self.loaded = None;
                self.load_error = Some(e.to_string());
                self.codes.clear();
                self.names.clear();
                self.selected_code = None;
                self.years.clear();
                self.selection.clear();
            }
        }
    }

    /// Put a user-picked panel file in front of the configured candidates.
    pub fn open_panel_file(&mut self, path: PathBuf) {
        self.config.sources.panel_candidates.retain(|p| p != &path);
        self.config.sources.panel_candidates.insert(0, path);
        self.reload();
    }

    /// Ingest a freshly loaded panel, keeping the chosen stock when it survives.
    fn set_loaded(&mut self, loaded: LoadedPanel) {
        self.codes = query::codes(&loaded.panel);
        self.names = query::name_map(&loaded.panel);
        self.color_map = ColorMap::new(loaded.panel.metric_names().as_slice());
        self.loaded = Some(loaded);
        self.load_error = None;

        let code = self
            .selected_code
            .take()
            .filter(|c| self.codes.contains(c))
            .or_else(|| self.codes.first().cloned());
        match code {
            Some(code) => self.select_code(code),
            None => {
                self.years.clear();
                self.selection.clear();
            }
        }
    }

    /// Choose a stock. The year choice is kept when the stock has that year.
    pub fn select_code(&mut self, code: String) {
        if let Some(loaded) = &self.loaded {
            self.years = query::years_for(&loaded.panel, &code);
        }
        if let YearSelector::Year(y) = self.year {
            if !self.years.contains(&y) {
                self.year = YearSelector::All;
            }
        }
        self.selected_code = Some(code);
        self.reselect();
    }

    pub fn select_year(&mut self, year: YearSelector) {
        self.year = year;
        self.reselect();
    }

    /// Recompute `selection` after a selector change.
    pub fn reselect(&mut self) {
        self.selection = match (&self.loaded, &self.selected_code) {
            (Some(loaded), Some(code)) => select(&loaded.panel, code, self.year),
            _ => Vec::new(),
        };
    }

    /// `code - name` label for the stock picker.
    pub fn code_label(&self, code: &str) -> String {
        match self.names.get(code) {
            Some(name) => format!("{code} - {name}"),
            None => code.to_string(),
        }
    }

    /// Load notices plus whatever the current selection adds.
    pub fn notices(&self) -> Vec<Notice> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        let mut notices = loaded.notices.clone();
        if self.selected_code.is_some() {
            if self.selection.is_empty() {
                notices.push(Notice::EmptySelection);
            } else if query::trend_series(&loaded.panel, &self.selection).is_none() {
                notices.push(Notice::InsufficientTrendData);
            }
        }
        notices
    }

    /// Suggested download name for the current selection.
    pub fn export_file_name(&self) -> Option<String> {
        let loaded = self.loaded.as_ref()?;
        let code = self.selected_code.as_deref()?;
        let name = display_name(&loaded.panel, &self.selection, code);
        Some(export_file_name(&name, self.year))
    }

    /// Write the current selection to `path` as BOM-prefixed CSV.
    pub fn export_selection(&self, path: &Path) -> Result<()> {
        let loaded = self.loaded.as_ref().context("no data loaded")?;
        let bytes = csv_bytes(&loaded.panel, &self.selection)?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} rows to {}", self.selection.len(), path.display());
        Ok(())
    }
}
