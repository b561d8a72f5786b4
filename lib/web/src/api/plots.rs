use crate::api::run;
use crate::error::FarmGraphServerError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use farmgraph::{Advisor, PlotYearSummary, YieldRecordRow};
use serde::Serialize;

#[derive(Serialize)]
pub struct PlotList {
    plots: Vec<String>,
}

/// The yield records of a plot in a given year.
#[derive(Serialize)]
pub struct YieldRecords {
    plot_id: String,
    year: i32,
    records: Vec<YieldRecordRow>,
}

pub async fn handle_list_plots(
    State(state): State<AppState>,
) -> Result<Json<PlotList>, FarmGraphServerError> {
    let plots = run(state, Advisor::list_plots).await?;
    Ok(Json(PlotList { plots }))
}

pub async fn handle_plot_year_summary(
    State(state): State<AppState>,
    Path((plot_id, year)): Path<(String, i32)>,
) -> Result<Json<PlotYearSummary>, FarmGraphServerError> {
    let requested = plot_id.clone();
    let summary = run(state, move |advisor| {
        advisor.plot_year_summary(&requested, year)
    })
    .await?;
    summary
        .map(Json)
        .ok_or(FarmGraphServerError::NotFound { plot_id, year })
}

pub async fn handle_yield_records(
    State(state): State<AppState>,
    Path((plot_id, year)): Path<(String, i32)>,
) -> Result<Json<YieldRecords>, FarmGraphServerError> {
    let requested = plot_id.clone();
    let records = run(state, move |advisor| advisor.yield_records(&requested, year)).await?;
    Ok(Json(YieldRecords {
        plot_id,
        year,
        records,
    }))
}
