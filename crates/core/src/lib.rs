pub mod errors;
pub mod models;
pub mod services;
pub mod sources;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use models::{
    chart_set::ChartSet,
    selection::{Interval, Selection},
    settings::Settings,
};
use services::binder::{BinderEvent, BinderState, ReactiveBinder};
use sources::traits::TableSource;
use storage::manager::TableStore;

use errors::CoreError;

/// Main entry point for the dashboard core library.
/// Holds the loaded table store and the binder that keeps the seven charts
/// in step with the user's inputs.
#[must_use]
pub struct Dashboard {
    store: Arc<TableStore>,
    binder: ReactiveBinder,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("case_rows", &self.store.cases().len())
            .field("series", &self.store.catalog().len())
            .field("binder", &self.binder)
            .finish()
    }
}

impl Dashboard {
    /// Build a dashboard over an already loaded table store.
    pub fn new(store: TableStore, settings: Settings) -> Result<Self, CoreError> {
        let store = Arc::new(store);
        let binder = ReactiveBinder::new(Arc::clone(&store), settings)?;
        Ok(Self { store, binder })
    }

    /// Load both archives from disk (zip files or extracted directories).
    pub fn load_from_paths(
        case_path: impl AsRef<Path>,
        stocks_path: impl AsRef<Path>,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        let store = TableStore::load_from_paths(case_path, stocks_path)?;
        Self::new(store, settings)
    }

    /// Load from arbitrary table sources.
    pub fn load(
        case_source: &mut dyn TableSource,
        stock_source: &mut dyn TableSource,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        let store = TableStore::load(case_source, stock_source)?;
        Self::new(store, settings)
    }

    // ── Inputs ──────────────────────────────────────────────────────

    /// Options for the multi-select: every series identifier.
    #[must_use]
    pub fn series_ids(&self) -> Vec<&str> {
        self.store.catalog().ids()
    }

    /// Initial date-picker range: the full span of the case table.
    #[must_use]
    pub fn default_interval(&self) -> Interval {
        self.store.default_interval()
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.binder.selection()
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.binder.interval()
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Feed one input change through the binder and return the new charts.
    pub fn dispatch(&mut self, event: BinderEvent) -> Result<Arc<ChartSet>, CoreError> {
        self.binder.dispatch(event)
    }

    /// Replace the selection.
    pub fn select(&mut self, ids: Vec<String>) -> Result<Arc<ChartSet>, CoreError> {
        self.dispatch(BinderEvent::SelectionChanged(ids))
    }

    /// Replace both ends of the date range.
    pub fn set_interval(&mut self, interval: Interval) -> Result<Arc<ChartSet>, CoreError> {
        self.dispatch(BinderEvent::IntervalChanged(interval))
    }

    /// The charts currently on display.
    #[must_use]
    pub fn charts(&self) -> Arc<ChartSet> {
        self.binder.published()
    }

    #[must_use]
    pub fn binder_state(&self) -> BinderState {
        self.binder.state()
    }

    #[must_use]
    pub fn store(&self) -> &Arc<TableStore> {
        &self.store
    }

    /// Hand the binder over to a dedicated owner (e.g. an event-queue task).
    pub fn into_binder(self) -> ReactiveBinder {
        self.binder
    }
}
