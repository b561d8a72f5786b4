use crate::api::run;
use crate::error::FarmGraphServerError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use farmgraph::{Advisor, CropEntry};
use serde::Serialize;

#[derive(Serialize)]
pub struct LegumeCrops {
    legume_crops: Vec<CropEntry>,
}

#[derive(Serialize)]
pub struct CerealCrops {
    cereal_crops: Vec<CropEntry>,
}

pub async fn handle_legume_crops(
    State(state): State<AppState>,
) -> Result<Json<LegumeCrops>, FarmGraphServerError> {
    let legume_crops = run(state, Advisor::legume_crops).await?;
    Ok(Json(LegumeCrops { legume_crops }))
}

pub async fn handle_cereal_crops(
    State(state): State<AppState>,
) -> Result<Json<CerealCrops>, FarmGraphServerError> {
    let cereal_crops = run(state, Advisor::cereal_crops).await?;
    Ok(Json(CerealCrops { cereal_crops }))
}
