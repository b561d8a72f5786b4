use crate::api::run;
use crate::error::FarmGraphServerError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use farmgraph::{
    Advisor, CropRotationRecommendation, FertilizerRecommendation, HighPestRiskPlot,
    NextCropRecommendation, PostponeFertilizerPlot,
};
use serde::Serialize;

/// The plots that a recommendation applies to.
#[derive(Serialize)]
pub struct PlotRecommendation<T> {
    recommendation: &'static str,
    plots: Vec<T>,
}

#[derive(Serialize)]
pub struct NextCropRotation {
    recommendation: &'static str,
    items: Vec<NextCropRecommendation>,
}

/// The inferred recommendations of a plot in a given year.
#[derive(Serialize)]
pub struct DerivedRecommendations<T> {
    plot_id: String,
    year: i32,
    recommendations: Vec<T>,
}

pub async fn handle_needs_fertilizer(
    State(state): State<AppState>,
) -> Result<Json<PlotRecommendation<String>>, FarmGraphServerError> {
    let plots = run(state, Advisor::plots_needing_fertilizer).await?;
    Ok(Json(PlotRecommendation {
        recommendation: "NeedsFertilizerPlot",
        plots,
    }))
}

pub async fn handle_postpone_fertilizer(
    State(state): State<AppState>,
) -> Result<Json<PlotRecommendation<PostponeFertilizerPlot>>, FarmGraphServerError> {
    let plots = run(state, Advisor::plots_to_postpone_fertilizer).await?;
    Ok(Json(PlotRecommendation {
        recommendation: "PostponeFertilizerPlot",
        plots,
    }))
}

pub async fn handle_high_pest_risk(
    State(state): State<AppState>,
) -> Result<Json<PlotRecommendation<HighPestRiskPlot>>, FarmGraphServerError> {
    let plots = run(state, Advisor::plots_with_high_pest_risk).await?;
    Ok(Json(PlotRecommendation {
        recommendation: "HighPestRiskPlot",
        plots,
    }))
}

pub async fn handle_next_crop(
    State(state): State<AppState>,
) -> Result<Json<NextCropRotation>, FarmGraphServerError> {
    let items = run(state, Advisor::next_crop_recommendations).await?;
    Ok(Json(NextCropRotation {
        recommendation: "NextCropRotation",
        items,
    }))
}

pub async fn handle_fertilizer_recommendations(
    State(state): State<AppState>,
    Path((plot_id, year)): Path<(String, i32)>,
) -> Result<Json<DerivedRecommendations<FertilizerRecommendation>>, FarmGraphServerError> {
    let requested = plot_id.clone();
    let recommendations = run(state, move |advisor| {
        advisor.fertilizer_recommendations(&requested, year)
    })
    .await?;
    Ok(Json(DerivedRecommendations {
        plot_id,
        year,
        recommendations,
    }))
}

pub async fn handle_crop_rotation_recommendations(
    State(state): State<AppState>,
    Path((plot_id, year)): Path<(String, i32)>,
) -> Result<Json<DerivedRecommendations<CropRotationRecommendation>>, FarmGraphServerError> {
    let requested = plot_id.clone();
    let recommendations = run(state, move |advisor| {
        advisor.crop_rotation_recommendations(&requested, year)
    })
    .await?;
    Ok(Json(DerivedRecommendations {
        plot_id,
        year,
        recommendations,
    }))
}
