use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use dashboard_core::errors::CoreError;
use dashboard_core::models::chart_set::ChartRegion;
use dashboard_core::models::selection::Interval;
use dashboard_core::models::settings::Settings;
use dashboard_core::services::binder::{BinderEvent, BinderState};
use dashboard_core::Dashboard;
use zip::write::SimpleFileOptions;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Fixtures: archives shaped like Data_Covid.zip / Data_stocks.zip
// ═══════════════════════════════════════════════════════════════════

const OWID_CSV: &str = "\
iso_code,continent,location,date,total_cases,new_cases
OWID_WRL,,World,2020-01-22,557,
OWID_WRL,,World,2020-01-23,655,98
OWID_WRL,,World,2020-01-24,941,286
OWID_WRL,,World,2020-01-25,1434,493
OWID_WRL,,World,2020-01-26,2118,684
";

fn price_csv(base: f64) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for (i, day) in (22..=26).enumerate() {
        let close = base + i as f64;
        out.push_str(&format!(
            "2020-01-{day} 00:00:00-05:00,{close},{close},{close},{close},{close},{}\n",
            (i + 1) * 100
        ));
    }
    out
}

fn write_zip(path: &Path, entries: &[(&str, String)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

struct Fixture {
    _dir: tempfile::TempDir,
    covid: std::path::PathBuf,
    stocks: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let covid = dir.path().join("Data_Covid.zip");
    let stocks = dir.path().join("Data_stocks.zip");
    write_zip(&covid, &[("owid-covid-data.csv", OWID_CSV.to_string())]);
    write_zip(
        &stocks,
        &[
            ("MSFT.csv", price_csv(160.0)),
            ("AAPL.csv", price_csv(78.0)),
            ("TSLA.csv", price_csv(100.0)),
        ],
    );
    Fixture { _dir: dir, covid, stocks }
}

fn dashboard() -> (Fixture, Dashboard) {
    let f = fixture();
    let dash = Dashboard::load_from_paths(&f.covid, &f.stocks, Settings::default()).unwrap();
    (f, dash)
}

// ═══════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════

mod loading {
    use super::*;

    #[test]
    fn exposes_series_and_default_interval() {
        let (_f, dash) = dashboard();
        assert_eq!(dash.series_ids(), vec!["AAPL.csv", "MSFT.csv", "TSLA.csv"]);
        assert_eq!(dash.default_interval(), Interval::new(d(2020, 1, 22), d(2020, 1, 26)));
        assert_eq!(dash.interval(), dash.default_interval());
        assert!(dash.selection().is_empty());
        assert_eq!(dash.binder_state(), BinderState::Idle);
    }

    #[test]
    fn initial_charts_are_placeholders() {
        let (_f, dash) = dashboard();
        let charts = dash.charts();
        assert!(charts.outputs().iter().all(|(_, spec)| spec.is_empty()));
    }

    #[test]
    fn missing_archive_is_a_load_error() {
        let f = fixture();
        let err = Dashboard::load_from_paths(
            f.covid.with_file_name("missing.zip"),
            &f.stocks,
            Settings::default(),
        )
        .unwrap_err();
        assert!(err.is_load_error());
        assert!(matches!(err, CoreError::ArchiveNotFound(ref p) if p.ends_with("missing.zip")));
    }

    #[test]
    fn archive_without_csv_is_a_load_error() {
        let f = fixture();
        write_zip(&f.stocks, &[("README.txt", "nothing here".to_string())]);
        let err = Dashboard::load_from_paths(&f.covid, &f.stocks, Settings::default()).unwrap_err();
        assert!(matches!(err, CoreError::NoTabularFile(_)));
    }

    #[test]
    fn extracted_directories_load_too() {
        let dir = tempfile::tempdir().unwrap();
        let covid = dir.path().join("covid");
        let stocks = dir.path().join("stocks");
        std::fs::create_dir(&covid).unwrap();
        std::fs::create_dir(&stocks).unwrap();
        std::fs::write(covid.join("owid.csv"), OWID_CSV).unwrap();
        std::fs::write(stocks.join("AAPL.csv"), price_csv(78.0)).unwrap();

        let dash = Dashboard::load_from_paths(&covid, &stocks, Settings::default()).unwrap();
        assert_eq!(dash.series_ids(), vec!["AAPL.csv"]);
        assert_eq!(dash.store().cases().len(), 5);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Interaction
// ═══════════════════════════════════════════════════════════════════

mod interaction {
    use super::*;

    #[test]
    fn select_then_narrow_the_range() {
        let (_f, mut dash) = dashboard();
        dash.select(vec!["MSFT.csv".into(), "AAPL.csv".into()]).unwrap();
        let charts = dash
            .set_interval(Interval::new(d(2020, 1, 23), d(2020, 1, 24)))
            .unwrap();

        assert_eq!(charts.covid_time_series.point_count(), 2);
        assert_eq!(charts.stocks_time_series.traces.len(), 2);
        assert_eq!(charts.stocks_time_series.point_count(), 4);
        assert_eq!(charts.small_multiples.height, Some(600));
        assert_eq!(charts.bar_chart.traces[0].name, "Stock MSFT.csv Close");
        assert_eq!(charts.bar_chart.point_count(), 2);
        assert_eq!(charts.pie_chart.point_count(), 5);
        assert_eq!(charts.scatter_plot.panels.len(), 8);
        assert_eq!(charts.parallel_coordinates.traces.len(), 2);
    }

    #[test]
    fn every_region_changes_together() {
        let (_f, mut dash) = dashboard();
        let before = dash.charts();
        let after = dash.select(vec!["TSLA.csv".into()]).unwrap();
        for region in ChartRegion::ALL {
            if region == ChartRegion::ParallelCoordinates {
                continue;
            }
            assert_ne!(before.get(region), after.get(region), "{region} was not republished");
        }
    }

    #[test]
    fn clearing_the_selection() {
        let (_f, mut dash) = dashboard();
        dash.select(vec!["AAPL.csv".into()]).unwrap();
        let charts = dash.select(vec![]).unwrap();
        assert!(charts.stocks_time_series.is_empty());
        assert_eq!(charts.parallel_coordinates.traces[0].name, "Stock AAPL.csv Close");
    }

    #[test]
    fn unknown_series_is_rejected() {
        let (_f, mut dash) = dashboard();
        dash.select(vec!["AAPL.csv".into()]).unwrap();
        let err = dash.select(vec!["GOOG.csv".into()]).unwrap_err();
        assert!(matches!(err, CoreError::UnknownSeries(ref id) if id == "GOOG.csv"));
        assert_eq!(dash.selection().first(), Some("AAPL.csv"));
    }

    #[test]
    fn dispatch_date_events() {
        let (_f, mut dash) = dashboard();
        dash.select(vec!["AAPL.csv".into()]).unwrap();
        dash.dispatch(BinderEvent::StartDateChanged(d(2020, 1, 25))).unwrap();
        let charts = dash.dispatch(BinderEvent::EndDateChanged(d(2020, 1, 25))).unwrap();
        assert_eq!(charts.stocks_time_series.point_count(), 1);
        assert_eq!(dash.interval(), Interval::new(d(2020, 1, 25), d(2020, 1, 25)));
    }

    #[test]
    fn charts_serialize_to_json() {
        let (_f, mut dash) = dashboard();
        let charts = dash.select(vec!["AAPL.csv".into()]).unwrap();
        let json = serde_json::to_value(&*charts).unwrap();
        assert_eq!(json["stocks_time_series"]["kind"], "time_series");
        assert_eq!(json["stocks_time_series"]["traces"][0]["points"][0]["x"], "2020-01-22");
        assert_eq!(json["stocks_time_series"]["traces"][0]["points"][0]["y"], 78.0);
        assert_eq!(json["scatter_plot"]["grid"]["rows"], 2);
    }
}
