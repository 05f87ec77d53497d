use crate::errors::CoreError;
use crate::models::catalog::SeriesCatalog;
use crate::models::chart::{
    AxisValue, BarMode, ChartKind, ChartPoint, ChartSpec, Grid, Panel, Trace, TraceKind,
};
use crate::models::selection::{Interval, Selection};
use crate::models::settings::Settings;
use crate::models::table::{CaseTable, PriceRow};
use crate::services::range_filter::filter_rows;

pub const COVID_TITLE: &str = "COVID case time series";
pub const STOCKS_TITLE: &str = "Stock price time series";
pub const SMALL_MULTIPLES_TITLE: &str = "Small multiples: closing prices";
pub const BAR_TITLE: &str = "Bar chart: closing prices";
pub const SCATTER_MATRIX_TITLE: &str = "Scatter matrix";
pub const PARALLEL_TITLE: &str = "Parallel coordinates";

/// Trace name of the case-count line.
pub const COVID_TRACE: &str = "Total COVID Cases";

/// Measures shown in the scatter matrix, in row/column order.
const MATRIX_MEASURES: [(&str, fn(&PriceRow) -> Option<f64>); 2] =
    [("Close", close_of), ("Volume", volume_of)];

/// Builds chart specifications from the table store's tables.
///
/// Every builder is a pure function of its arguments: no shared state,
/// no I/O. Series identifiers are checked against the catalog before
/// anything is built, so an unknown one fails with `UnknownSeries`
/// instead of producing a misleading empty chart.
pub struct ChartService {
    settings: Settings,
}

impl ChartService {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Empty chart carrying the "nothing selected" title.
    pub fn placeholder(&self, kind: ChartKind) -> ChartSpec {
        ChartSpec::placeholder(kind, self.settings.placeholder_title.clone())
    }

    /// Single line of total cases over the interval.
    pub fn covid_time_series(&self, cases: &CaseTable, interval: &Interval) -> ChartSpec {
        let points = filter_rows(cases, interval)
            .map(|r| ChartPoint::new(r.date, r.total_cases))
            .collect();
        ChartSpec::new(ChartKind::TimeSeries, COVID_TITLE)
            .with_traces(vec![Trace::new(COVID_TRACE, TraceKind::Line, points)])
    }

    /// One closing-price line per selected series, over the interval.
    pub fn stocks_time_series(
        &self,
        catalog: &SeriesCatalog,
        selection: &Selection,
        interval: &Interval,
    ) -> Result<ChartSpec, CoreError> {
        validate(catalog, selection.iter())?;
        if selection.is_empty() {
            return Ok(self.placeholder(ChartKind::TimeSeries));
        }

        let mut traces = Vec::with_capacity(selection.len());
        for id in selection.iter() {
            let table = catalog.require(id)?;
            traces.push(Trace::new(
                close_trace_name(id),
                TraceKind::Line,
                close_points(filter_rows(table, interval)),
            ));
        }
        Ok(ChartSpec::new(ChartKind::TimeSeries, STOCKS_TITLE).with_traces(traces))
    }

    /// One stacked panel per selected series, in selection order.
    /// Height is `panel_height × panel count`, capped at `u32::MAX`. Panels share
    /// one date axis.
    pub fn small_multiples(
        &self,
        catalog: &SeriesCatalog,
        selection: &Selection,
        interval: &Interval,
    ) -> Result<ChartSpec, CoreError> {
        validate(catalog, selection.iter())?;
        if selection.is_empty() {
            return Ok(self.placeholder(ChartKind::SmallMultiples));
        }

        let mut panels = Vec::with_capacity(selection.len());
        for (i, id) in selection.iter().enumerate() {
            let table = catalog.require(id)?;
            let name = close_trace_name(id);
            panels.push(Panel {
                row: i as u32 + 1,
                col: 1,
                title: name.clone(),
                traces: vec![Trace::new(
                    name,
                    TraceKind::Line,
                    close_points(filter_rows(table, interval)),
                )],
            });
        }
        let rows = panels.len() as u32;
        Ok(ChartSpec::new(ChartKind::SmallMultiples, SMALL_MULTIPLES_TITLE)
            .with_panels(Grid { rows, cols: 1 }, panels)
            .with_height(self.settings.panel_height.saturating_mul(rows))
            .with_shared_x())
    }

    /// Closing prices of a single series as bars, over the interval.
    ///
    /// The dashboard passes only the first selected series here.
    pub fn bar_chart(
        &self,
        catalog: &SeriesCatalog,
        series: Option<&str>,
        interval: &Interval,
    ) -> Result<ChartSpec, CoreError> {
        let Some(id) = series else {
            return Ok(self.placeholder(ChartKind::Bar));
        };
        let table = catalog.require(id)?;
        let trace = Trace::new(
            close_trace_name(id),
            TraceKind::Bar,
            close_points(filter_rows(table, interval)),
        );
        Ok(ChartSpec::new(ChartKind::Bar, BAR_TITLE)
            .with_traces(vec![trace])
            .with_bar_mode(BarMode::Stack))
    }

    /// Closing prices of a single series as pie slices labelled by date.
    ///
    /// Uses every row of the series; the date interval does not apply.
    pub fn pie_chart(
        &self,
        catalog: &SeriesCatalog,
        series: Option<&str>,
    ) -> Result<ChartSpec, CoreError> {
        let Some(id) = series else {
            return Ok(self.placeholder(ChartKind::Pie));
        };
        let table = catalog.require(id)?;
        let points = table
            .iter()
            .map(|r| ChartPoint::new(AxisValue::Label(r.date.to_string()), r.close))
            .collect();
        Ok(ChartSpec::new(ChartKind::Pie, format!("Pie chart: {id}"))
            .with_traces(vec![Trace::new(id, TraceKind::Pie, points)]))
    }

    /// Pairwise scatter matrix of (Close, Volume) for every selected series.
    ///
    /// Each series gets a 2×2 block: histograms on the diagonal, one measure
    /// against the other off the diagonal. Cell `(row, col)` plots the column
    /// measure on x and the row measure on y. Rows missing a needed measure
    /// are left out of that cell.
    pub fn scatter_matrix(
        &self,
        catalog: &SeriesCatalog,
        selection: &Selection,
        interval: &Interval,
    ) -> Result<ChartSpec, CoreError> {
        validate(catalog, selection.iter())?;
        if selection.is_empty() {
            return Ok(self.placeholder(ChartKind::ScatterMatrix));
        }

        let n = MATRIX_MEASURES.len() as u32;
        let mut panels = Vec::new();
        for (block, id) in selection.iter().enumerate() {
            let table = catalog.require(id)?;
            let rows: Vec<&PriceRow> = filter_rows(table, interval).collect();
            let top = block as u32 * n;

            for (ri, (row_name, row_measure)) in MATRIX_MEASURES.iter().enumerate() {
                for (ci, (col_name, col_measure)) in MATRIX_MEASURES.iter().enumerate() {
                    let trace = if ri == ci {
                        let points = rows
                            .iter()
                            .copied()
                            .filter_map(row_measure)
                            .map(|v| ChartPoint::new(v, None))
                            .collect();
                        Trace::new(format!("{id} {row_name}"), TraceKind::Histogram, points)
                    } else {
                        let points = rows
                            .iter()
                            .copied()
                            .filter_map(|r| {
                                Some(ChartPoint::new(col_measure(r)?, Some(row_measure(r)?)))
                            })
                            .collect();
                        Trace::new(
                            format!("{id} {row_name} vs {col_name}"),
                            TraceKind::Scatter,
                            points,
                        )
                    };
                    panels.push(Panel {
                        row: top + ri as u32 + 1,
                        col: ci as u32 + 1,
                        title: trace.name.clone(),
                        traces: vec![trace],
                    });
                }
            }
        }
        let grid = Grid {
            rows: selection.len() as u32 * n,
            cols: n,
        };
        Ok(ChartSpec::new(ChartKind::ScatterMatrix, SCATTER_MATRIX_TITLE).with_panels(grid, panels))
    }

    /// One closing-price line per series of the selection as it was
    /// *before* the latest change, over all rows.
    ///
    /// Callers pass the previous selection explicitly; comparing it with
    /// the other charts gives a before/after view.
    pub fn parallel_coordinates(
        &self,
        catalog: &SeriesCatalog,
        previous: &Selection,
    ) -> Result<ChartSpec, CoreError> {
        validate(catalog, previous.iter())?;
        let mut traces = Vec::with_capacity(previous.len());
        for id in previous.iter() {
            let table = catalog.require(id)?;
            traces.push(Trace::new(
                close_trace_name(id),
                TraceKind::Line,
                close_points(table.iter()),
            ));
        }
        Ok(ChartSpec::new(ChartKind::ParallelCoordinates, PARALLEL_TITLE).with_traces(traces))
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Fail with `UnknownSeries` on the first identifier missing from the catalog.
pub fn validate<'a>(
    catalog: &SeriesCatalog,
    mut ids: impl Iterator<Item = &'a str>,
) -> Result<(), CoreError> {
    match ids.find(|id| !catalog.contains(id)) {
        Some(id) => Err(CoreError::UnknownSeries(id.to_string())),
        None => Ok(()),
    }
}

fn close_of(row: &PriceRow) -> Option<f64> {
    row.close
}

fn volume_of(row: &PriceRow) -> Option<f64> {
    row.volume
}

fn close_trace_name(id: &str) -> String {
    format!("Stock {id} Close")
}

fn close_points<'a>(rows: impl Iterator<Item = &'a PriceRow>) -> Vec<ChartPoint> {
    rows.map(|r| ChartPoint::new(r.date, r.close)).collect()
}
