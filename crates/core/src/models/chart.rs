use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which of the dashboard's chart families a spec belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    TimeSeries,
    SmallMultiples,
    Bar,
    Pie,
    ScatterMatrix,
    ParallelCoordinates,
}

/// How a single trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Histogram,
}

/// Layout for bar charts with more than one bar trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Stack,
    Group,
}

/// An x value: a date for time axes, a number for scatter axes,
/// a label for pie slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Date(NaiveDate),
    Number(f64),
    Label(String),
}

impl From<NaiveDate> for AxisValue {
    fn from(d: NaiveDate) -> Self {
        AxisValue::Date(d)
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        AxisValue::Number(v)
    }
}

/// A single `(x, y)` data point.
///
/// `y` is `None` for missing observations (rendered as a gap) and for
/// histogram samples, which only have an x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: AxisValue,
    pub y: Option<f64>,
}

impl ChartPoint {
    pub fn new(x: impl Into<AxisValue>, y: Option<f64>) -> Self {
        Self { x: x.into(), y }
    }
}

/// One named data series inside a chart or panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub kind: TraceKind,
    pub points: Vec<ChartPoint>,
}

impl Trace {
    pub fn new(name: impl Into<String>, kind: TraceKind, points: Vec<ChartPoint>) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
        }
    }
}

/// One cell of a multi-panel chart. Rows and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub row: u32,
    pub col: u32,
    pub title: String,
    pub traces: Vec<Trace>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

/// Declarative, render-agnostic description of one chart.
///
/// Built fresh on every recomputation and never mutated afterwards.
/// Single-panel charts use `traces`; multi-panel charts use `panels` + `grid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub traces: Vec<Trace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub panels: Vec<Panel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    /// Total height in pixels, when the chart dictates it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    /// Panels stacked in one column share a single date axis.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shared_x: bool,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            traces: Vec::new(),
            panels: Vec::new(),
            grid: None,
            height: None,
            bar_mode: None,
            shared_x: false,
        }
    }

    /// An empty chart that only carries a title.
    pub fn placeholder(kind: ChartKind, title: impl Into<String>) -> Self {
        Self::new(kind, title)
    }

    pub fn with_traces(mut self, traces: Vec<Trace>) -> Self {
        self.traces = traces;
        self
    }

    pub fn with_panels(mut self, grid: Grid, panels: Vec<Panel>) -> Self {
        self.grid = Some(grid);
        self.panels = panels;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_bar_mode(mut self, mode: BarMode) -> Self {
        self.bar_mode = Some(mode);
        self
    }

    pub fn with_shared_x(mut self) -> Self {
        self.shared_x = true;
        self
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.panels.is_empty()
    }

    /// Number of data points across all traces and panels.
    pub fn point_count(&self) -> usize {
        let top: usize = self.traces.iter().map(|t| t.points.len()).sum();
        let nested: usize = self
            .panels
            .iter()
            .flat_map(|p| p.traces.iter())
            .map(|t| t.points.len())
            .sum();
        top + nested
    }
}
