use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::catalog::SeriesId;
use crate::models::chart::ChartKind;
use crate::models::chart_set::ChartSet;
use crate::models::selection::{Interval, Selection};
use crate::models::settings::Settings;
use crate::services::chart_service::{validate, ChartService};
use crate::storage::manager::TableStore;

/// A change to one of the dashboard's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BinderEvent {
    SelectionChanged(Vec<SeriesId>),
    StartDateChanged(NaiveDate),
    EndDateChanged(NaiveDate),
    /// Both ends at once, as a range picker reports them.
    IntervalChanged(Interval),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderState {
    Idle,
    Recomputing,
}

/// Everything one recomputation reads besides the table store.
///
/// `previous_selection` is the selection as it was before the triggering
/// change; only the parallel-coordinates chart reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartInputs {
    pub selection: Selection,
    pub previous_selection: Selection,
    pub interval: Interval,
}

/// Recompute all seven charts from `inputs`. Pure: equal inputs give
/// structurally equal chart sets.
///
/// An empty selection yields placeholders everywhere except the
/// parallel-coordinates chart, which still follows the previous selection.
pub fn recompute(
    store: &TableStore,
    charts: &ChartService,
    inputs: &ChartInputs,
) -> Result<ChartSet, CoreError> {
    let catalog = store.catalog();
    validate(catalog, inputs.selection.iter())?;
    validate(catalog, inputs.previous_selection.iter())?;

    let parallel_coordinates = charts.parallel_coordinates(catalog, &inputs.previous_selection)?;

    if inputs.selection.is_empty() {
        return Ok(ChartSet {
            covid_time_series: charts.placeholder(ChartKind::TimeSeries),
            stocks_time_series: charts.placeholder(ChartKind::TimeSeries),
            small_multiples: charts.placeholder(ChartKind::SmallMultiples),
            bar_chart: charts.placeholder(ChartKind::Bar),
            pie_chart: charts.placeholder(ChartKind::Pie),
            scatter_plot: charts.placeholder(ChartKind::ScatterMatrix),
            parallel_coordinates,
        });
    }

    let selection = &inputs.selection;
    let interval = &inputs.interval;
    Ok(ChartSet {
        covid_time_series: charts.covid_time_series(store.cases(), interval),
        stocks_time_series: charts.stocks_time_series(catalog, selection, interval)?,
        small_multiples: charts.small_multiples(catalog, selection, interval)?,
        bar_chart: charts.bar_chart(catalog, selection.first(), interval)?,
        pie_chart: charts.pie_chart(catalog, selection.first())?,
        scatter_plot: charts.scatter_matrix(catalog, selection, interval)?,
        parallel_coordinates,
    })
}

/// The Reactive Binder.
///
/// Two states: `Idle`, waiting for an event, and `Recomputing`, running the
/// builders. `dispatch` runs one event to completion; callers that may
/// receive events concurrently must funnel them through a single owner
/// (the server does this with a queue). The published chart set is swapped
/// in one assignment, so it is always either entirely old or entirely new.
pub struct ReactiveBinder {
    store: Arc<TableStore>,
    charts: ChartService,
    state: BinderState,
    selection: Selection,
    previous_selection: Selection,
    interval: Interval,
    published: Arc<ChartSet>,
    generation: u64,
}

impl std::fmt::Debug for ReactiveBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveBinder")
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("previous_selection", &self.previous_selection)
            .field("interval", &self.interval)
            .field("generation", &self.generation)
            .finish()
    }
}

impl ReactiveBinder {
    /// Start with the default inputs (nothing selected, full case-table span)
    /// and publish the charts for them.
    pub fn new(store: Arc<TableStore>, settings: Settings) -> Result<Self, CoreError> {
        let charts = ChartService::with_settings(settings);
        let interval = store.default_interval();
        let inputs = ChartInputs {
            selection: Selection::empty(),
            previous_selection: Selection::empty(),
            interval,
        };
        let published = Arc::new(recompute(&store, &charts, &inputs)?);
        Ok(Self {
            store,
            charts,
            state: BinderState::Idle,
            selection: inputs.selection,
            previous_selection: inputs.previous_selection,
            interval,
            published,
            generation: 0,
        })
    }

    /// Apply one input change and republish all seven charts.
    ///
    /// A rejected event (unknown series) leaves inputs and publication as
    /// they were.
    pub fn dispatch(&mut self, event: BinderEvent) -> Result<Arc<ChartSet>, CoreError> {
        self.state = BinderState::Recomputing;
        let result = self.apply(event);
        self.state = BinderState::Idle;
        result
    }

    fn apply(&mut self, event: BinderEvent) -> Result<Arc<ChartSet>, CoreError> {
        let mut inputs = self.inputs();
        inputs.previous_selection = self.selection.clone();
        match event {
            BinderEvent::SelectionChanged(ids) => inputs.selection = Selection::new(ids),
            BinderEvent::StartDateChanged(start) => {
                inputs.interval = inputs.interval.with_start(start)
            }
            BinderEvent::EndDateChanged(end) => inputs.interval = inputs.interval.with_end(end),
            BinderEvent::IntervalChanged(interval) => inputs.interval = interval,
        }

        let set = match recompute(&self.store, &self.charts, &inputs) {
            Ok(set) => Arc::new(set),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected dashboard input change");
                return Err(e);
            }
        };
        if inputs.interval.is_inverted() {
            tracing::debug!(interval = %inputs.interval, "Inverted interval, charts will be empty");
        }

        self.selection = inputs.selection;
        self.previous_selection = inputs.previous_selection;
        self.interval = inputs.interval;
        self.published = Arc::clone(&set);
        self.generation += 1;
        tracing::debug!(generation = self.generation, "Published chart set");
        Ok(set)
    }

    /// The inputs of the currently published chart set.
    pub fn inputs(&self) -> ChartInputs {
        ChartInputs {
            selection: self.selection.clone(),
            previous_selection: self.previous_selection.clone(),
            interval: self.interval,
        }
    }

    pub fn state(&self) -> BinderState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn previous_selection(&self) -> &Selection {
        &self.previous_selection
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// The last complete publication.
    pub fn published(&self) -> Arc<ChartSet> {
        Arc::clone(&self.published)
    }

    /// Number of successful publications since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &Arc<TableStore> {
        &self.store
    }
}
