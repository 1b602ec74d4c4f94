//! Application state — single-owner, main-thread only.
//!
//! The snapshot is loaded once and kept until the user reloads; every
//! selection change rebuilds the chart view from that snapshot.

use tracing::{info, warn};

use valuelens_core::data::{Dataset, ValuationRepository};
use valuelens_core::{ChartDataBuilder, ChartView, Metric};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct AppState {
    pub running: bool,
    pub repo: ValuationRepository,
    pub builder: ChartDataBuilder,
    pub dataset: Option<Dataset>,
    pub tickers: Vec<String>,
    /// Index into `tickers`.
    pub cursor: usize,
    pub metric: Metric,
    pub start_year: i32,
    pub view: Option<ChartView>,
    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(repo: ValuationRepository, builder: ChartDataBuilder, start_year: i32) -> Self {
        let mut app = Self {
            running: true,
            repo,
            builder,
            dataset: None,
            tickers: Vec::new(),
            cursor: 0,
            metric: Metric::Pe,
            start_year,
            view: None,
            status_message: None,
        };
        app.reload();
        app
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: String) {
        self.status_message = Some((msg, StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: String) {
        self.status_message = Some((msg, StatusLevel::Error));
    }

    pub fn selected_ticker(&self) -> Option<&str> {
        self.tickers.get(self.cursor).map(String::as_str)
    }

    /// Re-read the snapshot file, keeping the selected ticker when it survives.
    pub fn reload(&mut self) {
        let previous = self.selected_ticker().map(str::to_string);

        match self.repo.load() {
            Ok(dataset) => {
                self.tickers = dataset.tickers();
                self.cursor = previous
                    .and_then(|t| self.tickers.iter().position(|x| *x == t))
                    .unwrap_or(0);
                if let Some((min, max)) = dataset.year_range() {
                    self.start_year = self.start_year.clamp(min, max);
                }
                info!(
                    rows = dataset.len(),
                    tickers = self.tickers.len(),
                    snapshot = dataset.hash().short(),
                    "tui loaded snapshot"
                );
                self.set_status(format!(
                    "Loaded {} rows, {} tickers ({})",
                    dataset.len(),
                    self.tickers.len(),
                    dataset.hash().short()
                ));
                self.dataset = Some(dataset);
                self.refresh_view();
            }
            Err(e) => {
                warn!(error = %e, "tui load failed");
                self.dataset = None;
                self.tickers.clear();
                self.cursor = 0;
                self.view = None;
                self.set_error(e.to_string());
            }
        }
    }

    /// Rebuild the chart view for the current selection.
    pub fn refresh_view(&mut self) {
        let (Some(dataset), Some(ticker)) = (&self.dataset, self.tickers.get(self.cursor)) else {
            self.view = None;
            return;
        };

        match self
            .builder
            .build(dataset, ticker, self.metric, self.start_year)
        {
            Ok(view) => self.view = view,
            Err(e) => {
                self.view = None;
                self.set_error(e.to_string());
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.tickers.len() {
            self.cursor += 1;
            self.refresh_view();
        }
    }

    pub fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.refresh_view();
        }
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if self.metric != metric {
            self.metric = metric;
            self.refresh_view();
        }
    }

    pub fn cycle_metric(&mut self) {
        self.set_metric(self.metric.next());
    }

    /// Move the start year by `delta`, staying inside the snapshot's years.
    pub fn shift_start_year(&mut self, delta: i32) {
        let Some((min, max)) = self.dataset.as_ref().and_then(Dataset::year_range) else {
            return;
        };
        let year = (self.start_year + delta).clamp(min, max);
        if year != self.start_year {
            self.start_year = year;
            self.refresh_view();
        } else {
            self.set_warning(format!("Start year limited to {min}-{max}"));
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
