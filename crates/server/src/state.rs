use std::sync::Arc;

use dashboard_core::models::selection::Interval;
use dashboard_core::storage::manager::TableStore;
use dashboard_core::Dashboard;

use crate::worker::BinderHandle;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    /// Read-only after load; handlers read it without locking.
    pub store: Arc<TableStore>,
    pub binder: BinderHandle,
    pub default_interval: Interval,
}

impl AppState {
    /// Must be called inside a Tokio runtime: it spawns the binder's task.
    pub fn new(dashboard: Dashboard) -> Arc<Self> {
        let store = Arc::clone(dashboard.store());
        let default_interval = dashboard.default_interval();
        let binder = BinderHandle::spawn(dashboard.into_binder());
        Arc::new(Self {
            store,
            binder,
            default_interval,
        })
    }
}
