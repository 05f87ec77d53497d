use std::sync::Arc;

use dashboard_core::errors::CoreError;
use dashboard_core::models::chart_set::ChartSet;
use dashboard_core::services::binder::{BinderEvent, ChartInputs, ReactiveBinder};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};

use crate::error::ApiError;

const QUEUE_CAPACITY: usize = 64;

/// One complete, atomically published chart set with the inputs it reflects.
#[derive(Debug, Clone, Serialize)]
pub struct Publication {
    pub generation: u64,
    pub inputs: ChartInputs,
    pub charts: Arc<ChartSet>,
}

impl Publication {
    fn of(binder: &ReactiveBinder) -> Self {
        Self {
            generation: binder.generation(),
            inputs: binder.inputs(),
            charts: binder.published(),
        }
    }
}

struct BinderRequest {
    event: BinderEvent,
    reply: oneshot::Sender<Result<Arc<Publication>, CoreError>>,
}

/// Handle to the binder's event queue.
///
/// A single task owns the `ReactiveBinder` and drains the queue one event at
/// a time, so recomputations never overlap and never get cancelled halfway.
/// Readers see publications through a `watch` channel, always whole.
/// Clone-able; all clones feed the same queue.
#[derive(Clone)]
pub struct BinderHandle {
    tx: mpsc::Sender<BinderRequest>,
    published: watch::Receiver<Arc<Publication>>,
}

impl BinderHandle {
    /// Move the binder onto its own task. Must be called inside a Tokio runtime.
    pub fn spawn(binder: ReactiveBinder) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let (publish, published) = watch::channel(Arc::new(Publication::of(&binder)));
        tokio::spawn(run(binder, rx, publish));
        Self { tx, published }
    }

    /// Queue an input change and wait for its publication.
    pub async fn dispatch(&self, event: BinderEvent) -> Result<Arc<Publication>, ApiError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(BinderRequest { event, reply })
            .await
            .map_err(|_| ApiError::WorkerUnavailable)?;
        let result = rx.await.map_err(|_| ApiError::WorkerUnavailable)?;
        Ok(result?)
    }

    /// The latest publication.
    pub fn current(&self) -> Arc<Publication> {
        Arc::clone(&self.published.borrow())
    }
}

async fn run(
    mut binder: ReactiveBinder,
    mut rx: mpsc::Receiver<BinderRequest>,
    publish: watch::Sender<Arc<Publication>>,
) {
    while let Some(BinderRequest { event, reply }) = rx.recv().await {
        tracing::debug!(?event, "Processing dashboard event");
        let result = binder.dispatch(event).map(|_| {
            let publication = Arc::new(Publication::of(&binder));
            publish.send_replace(Arc::clone(&publication));
            publication
        });
        // The requester may have gone away; the publication stands regardless.
        let _ = reply.send(result);
    }
    tracing::debug!("Dashboard event queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::catalog::SeriesCatalog;
    use dashboard_core::models::settings::Settings;
    use dashboard_core::models::table::{CaseRow, CaseTable, PriceRow, PriceTable};
    use dashboard_core::storage::manager::TableStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn binder() -> ReactiveBinder {
        let cases = CaseTable::new(vec![
            CaseRow::new(d(2020, 1, 1), 10.0),
            CaseRow::new(d(2020, 1, 2), 20.0),
        ]);
        let mut catalog = SeriesCatalog::new();
        catalog.insert("A.csv", PriceTable::new(vec![PriceRow::new(d(2020, 1, 1), 100.0, 1000.0)]));
        catalog.insert("B.csv", PriceTable::new(vec![PriceRow::new(d(2020, 1, 2), 200.0, 2000.0)]));
        let store = Arc::new(TableStore::new(cases, catalog));
        ReactiveBinder::new(store, Settings::default()).unwrap()
    }

    #[tokio::test]
    async fn initial_publication_is_generation_zero() {
        let handle = BinderHandle::spawn(binder());
        let current = handle.current();
        assert_eq!(current.generation, 0);
        assert!(current.inputs.selection.is_empty());
    }

    #[tokio::test]
    async fn dispatch_publishes_to_every_handle() {
        let handle = BinderHandle::spawn(binder());
        let other = handle.clone();

        let publication = handle
            .dispatch(BinderEvent::SelectionChanged(vec!["A.csv".into()]))
            .await
            .unwrap();
        assert_eq!(publication.generation, 1);

        let seen = other.current();
        assert_eq!(seen.generation, 1);
        assert_eq!(seen.charts.stocks_time_series.traces.len(), 1);
    }

    #[tokio::test]
    async fn rejected_event_keeps_previous_publication() {
        let handle = BinderHandle::spawn(binder());
        handle
            .dispatch(BinderEvent::SelectionChanged(vec!["A.csv".into()]))
            .await
            .unwrap();

        let err = handle
            .dispatch(BinderEvent::SelectionChanged(vec!["Z.csv".into()]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Core(CoreError::UnknownSeries(ref id)) if id == "Z.csv"));

        let current = handle.current();
        assert_eq!(current.generation, 1);
        assert_eq!(current.inputs.selection.first(), Some("A.csv"));
    }

    #[tokio::test]
    async fn concurrent_dispatches_are_serialized() {
        let handle = BinderHandle::spawn(binder());
        let mut tasks = Vec::new();
        for i in 0..10 {
            let h = handle.clone();
            let id = if i % 2 == 0 { "A.csv" } else { "B.csv" };
            let ids = vec![id.to_string()];
            tasks.push(tokio::spawn(async move {
                h.dispatch(BinderEvent::SelectionChanged(ids)).await
            }));
        }
        let mut generations = Vec::new();
        for t in tasks {
            generations.push(t.await.unwrap().unwrap().generation);
        }
        generations.sort_unstable();
        assert_eq!(generations, (1..=10).collect::<Vec<u64>>());
        assert_eq!(handle.current().generation, 10);
    }
}
