//! Aggregation engine: the record set, the filter configuration and the view
//! derived from them.
//!
//! The engine is a plain synchronous state machine. Loading itself happens
//! elsewhere; the engine only tracks which load is current through
//! [`LoadTicket`]s so that a superseded load can never overwrite newer data.

use dashboard_core::error::Result;
use dashboard_core::filters::{FilterConfig, FilterUpdate};
use dashboard_core::models::Creative;
use dashboard_core::samples::sample_creatives;
use dashboard_data::aggregator::{CreatorConversions, KpiSummary, MonthlyRoas, ProductBudget};
use dashboard_data::parser::{ParseOutcome, RowWarning};
use dashboard_data::view::FilteredView;
use serde::Serialize;

// ── Public types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    #[default]
    Idle,
    Loading,
}

/// Identifies one load; only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub state: EngineState,
    pub config: FilterConfig,
    pub view: FilteredView,
    pub kpis: KpiSummary,
    pub roas_by_month: Vec<MonthlyRoas>,
    pub budget_by_product: Vec<ProductBudget>,
    pub top_creatives: Vec<Creative>,
    pub top_creators: Vec<CreatorConversions>,
    /// User-facing message of the last failed load.
    pub error: Option<String>,
    pub warning_count: usize,
}

// ── AggregationEngine ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct AggregationEngine {
    records: Vec<Creative>,
    config: FilterConfig,
    view: FilteredView,
    state: EngineState,
    generation: u64,
    error: Option<String>,
    warnings: Vec<RowWarning>,
}

impl AggregationEngine {
    /// An idle engine with no records.
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// An idle engine over `records`, view already computed.
    pub fn with_records(records: Vec<Creative>, config: FilterConfig) -> Self {
        let mut engine = Self {
            records,
            config,
            ..Default::default()
        };
        engine.recompute();
        engine
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Enter `Loading` and supersede any load already in flight.
    ///
    /// The current view stays visible until the load finishes.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = EngineState::Loading;
        tracing::debug!(generation = self.generation, "load started");
        LoadTicket(self.generation)
    }

    /// Complete the load identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when the ticket is stale. A failed
    /// load replaces the records with the built-in sample set and keeps a
    /// user-facing message; either way the engine ends up `Idle`.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<ParseOutcome>) -> bool {
        if ticket.0 != self.generation || self.state != EngineState::Loading {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "ignoring superseded load result"
            );
            return false;
        }

        match result {
            Ok(outcome) => {
                tracing::info!(
                    creatives = outcome.creatives.len(),
                    warnings = outcome.warnings.len(),
                    "export loaded"
                );
                self.records = outcome.creatives;
                self.warnings = outcome.warnings;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed; using sample creatives");
                self.records = sample_creatives();
                self.warnings.clear();
                self.error = Some(e.user_message());
            }
        }

        self.state = EngineState::Idle;
        self.recompute();
        true
    }

    // ── Filtering ─────────────────────────────────────────────────────────

    /// Apply one configuration change; the view is not rebuilt.
    ///
    /// Returns `true` when the configuration actually changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        self.config.apply(update)
    }

    /// Rebuild the view from the records and the current configuration.
    pub fn recompute(&mut self) {
        self.view = FilteredView::compute(&self.records, &self.config);
        tracing::debug!(
            records = self.records.len(),
            visible = self.view.len(),
            "view recomputed"
        );
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == EngineState::Loading
    }

    pub fn records(&self) -> &[Creative] {
        &self.records
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn warnings(&self) -> &[RowWarning] {
        &self.warnings
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            state: self.state,
            config: self.config.clone(),
            view: self.view.clone(),
            kpis: self.view.kpis(),
            roas_by_month: self.view.roas_by_month(),
            budget_by_product: self.view.budget_by_product(),
            top_creatives: self.view.top5_by_roas(),
            top_creators: self.view.top5_creators_by_conversions(),
            error: self.error.clone(),
            warning_count: self.warnings.len(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
