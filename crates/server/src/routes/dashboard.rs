use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use dashboard_core::models::selection::{Interval, Selection};
use dashboard_core::services::binder::BinderEvent;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::worker::Publication;

/// The display layer: a static page that renders published chart specs.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Everything the page needs to build its input widgets.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Multi-select options.
    pub series: Vec<String>,
    /// Date-picker default: full span of the case table.
    pub default_interval: Interval,
    /// Earliest and latest selectable dates.
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    /// Inputs of the current publication, so a reloaded page resumes.
    pub selection: Selection,
    pub interval: Interval,
}

/// Build the dashboard sub-router.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/options", get(get_options))
        .route("/api/charts", get(get_charts))
        .route("/api/events", post(post_event))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let current = state.binder.current();
    Json(OptionsResponse {
        series: state.store.catalog().ids().into_iter().map(String::from).collect(),
        default_interval: state.default_interval,
        min_date: state.default_interval.start,
        max_date: state.default_interval.end,
        selection: current.inputs.selection.clone(),
        interval: current.inputs.interval,
    })
}

pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<Arc<Publication>> {
    Json(state.binder.current())
}

pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<BinderEvent>,
) -> Result<Json<Arc<Publication>>, ApiError> {
    let publication = state.binder.dispatch(event).await?;
    Ok(Json(publication))
}
