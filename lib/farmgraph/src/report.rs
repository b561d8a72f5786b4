use serde::Serialize;

/// The yield record of a plot in a given year together with the soil and weather observations of
/// the same plot and year.
///
/// Values that are not present in the graph are [None]. They are serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotYearSummary {
    pub plot_id: String,
    pub year: i32,
    pub yield_kg_per_ha: Option<f64>,
    pub crop_name: Option<String>,
    pub treatment: Option<String>,
    pub soil: SoilValues,
    pub weather: WeatherValues,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilValues {
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    #[serde(rename = "P_mg_per_kg")]
    pub p_mg_per_kg: Option<f64>,
    #[serde(rename = "K_mg_per_kg")]
    pub k_mg_per_kg: Option<f64>,
    #[serde(rename = "Ca_mg_per_kg")]
    pub ca_mg_per_kg: Option<f64>,
    #[serde(rename = "Mg_mg_per_kg")]
    pub mg_mg_per_kg: Option<f64>,
    #[serde(rename = "CEC")]
    pub cec: Option<f64>,
    #[serde(rename = "OM_pct")]
    pub om_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherValues {
    pub total_precip_mm: Option<f64>,
    #[serde(rename = "avg_tmax_C")]
    pub avg_tmax_c: Option<f64>,
    #[serde(rename = "avg_tmin_C")]
    pub avg_tmin_c: Option<f64>,
}

/// A yield record with the observations it links to through `sf:usesWeatherSummary` and
/// `sf:usesSoilMeasurement`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldRecordRow {
    pub crop: Option<String>,
    pub yield_kg_ha: Option<f64>,
    /// The forecast rainfall of the linked weather summary.
    pub precip_mm: Option<f64>,
    #[serde(rename = "soil_pH")]
    pub soil_ph: Option<f64>,
}

/// A crop entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropEntry {
    pub uri: String,
    pub name: String,
}

/// A plot with enough soil phosphorus where heavy rainfall is forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostponeFertilizerPlot {
    pub plot_id: String,
    #[serde(rename = "soil_P_mg_per_kg")]
    pub soil_p_mg_per_kg: f64,
    pub forecast_rainfall_mm: f64,
}

/// A maize plot with heavy forecast rainfall and a low yield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighPestRiskPlot {
    pub plot_id: String,
    pub crop_name: String,
    pub forecast_rainfall_mm: f64,
    pub yield_kg_per_ha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CropClass {
    LegumeCrop,
    CerealCrop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextCropRecommendation {
    pub plot_id: String,
    pub year: i32,
    pub current_crop: String,
    pub recommended_next_crop: String,
    pub recommended_next_crop_class: CropClass,
}

/// A `sf:FertilizerRecommendation` that was inferred for a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FertilizerRecommendation {
    pub action: String,
    pub justification: String,
}

/// A `sf:CropRotationRecommendation` that was inferred for a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropRotationRecommendation {
    /// The local name of the recommended crop.
    pub recommended_crop: String,
    pub justification: String,
}
