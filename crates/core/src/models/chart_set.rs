use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::chart::ChartSpec;

/// The seven independently addressable chart regions of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartRegion {
    CovidTimeSeries,
    StocksTimeSeries,
    SmallMultiples,
    BarChart,
    PieChart,
    ScatterPlot,
    ParallelCoordinates,
}

impl ChartRegion {
    pub const ALL: [ChartRegion; 7] = [
        ChartRegion::CovidTimeSeries,
        ChartRegion::StocksTimeSeries,
        ChartRegion::SmallMultiples,
        ChartRegion::BarChart,
        ChartRegion::PieChart,
        ChartRegion::ScatterPlot,
        ChartRegion::ParallelCoordinates,
    ];

    /// DOM id of the region on the dashboard page.
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartRegion::CovidTimeSeries => "covid-time-series-plot",
            ChartRegion::StocksTimeSeries => "stocks-time-series-plot",
            ChartRegion::SmallMultiples => "small-multiples",
            ChartRegion::BarChart => "bar-chart",
            ChartRegion::PieChart => "pie-chart",
            ChartRegion::ScatterPlot => "scatter-plot",
            ChartRegion::ParallelCoordinates => "parallel-coordinates-plot",
        }
    }
}

impl std::fmt::Display for ChartRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_id())
    }
}

/// One complete publication: a spec for every region.
///
/// Published as a unit. Consumers never see a mix of old and new charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub covid_time_series: ChartSpec,
    pub stocks_time_series: ChartSpec,
    pub small_multiples: ChartSpec,
    pub bar_chart: ChartSpec,
    pub pie_chart: ChartSpec,
    pub scatter_plot: ChartSpec,
    pub parallel_coordinates: ChartSpec,
}

impl ChartSet {
    pub fn get(&self, region: ChartRegion) -> &ChartSpec {
        match region {
            ChartRegion::CovidTimeSeries => &self.covid_time_series,
            ChartRegion::StocksTimeSeries => &self.stocks_time_series,
            ChartRegion::SmallMultiples => &self.small_multiples,
            ChartRegion::BarChart => &self.bar_chart,
            ChartRegion::PieChart => &self.pie_chart,
            ChartRegion::ScatterPlot => &self.scatter_plot,
            ChartRegion::ParallelCoordinates => &self.parallel_coordinates,
        }
    }

    /// Every region paired with its spec, in page order.
    pub fn outputs(&self) -> [(ChartRegion, &ChartSpec); 7] {
        ChartRegion::ALL.map(|region| (region, self.get(region)))
    }

    /// Serialize the whole publication for a renderer.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
