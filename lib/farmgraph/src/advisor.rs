use crate::plots::PlotIds;
use crate::report::{
    CropClass, CropEntry, CropRotationRecommendation, FertilizerRecommendation, HighPestRiskPlot,
    NextCropRecommendation, PlotYearSummary, PostponeFertilizerPlot, SoilValues, WeatherValues,
    YieldRecordRow,
};
use farmgraph_engine::{
    var, Expression, GraphPattern, Query, QueryEngine, QueryEvaluationError, QueryOptions,
    Solution,
};
use farmgraph_model::vocab::{rdf, rdfs, sf};
use farmgraph_model::{local_name, Literal, NamedNodeRef, Term};
use farmgraph_storage::{FactStore, LoaderError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

/// Yields below this value indicate a nutrient limited plot.
pub const LOW_YIELD_KG_PER_HA: f64 = 1111.0;
/// Soil phosphorus below this value indicates a nutrient limited plot.
pub const LOW_SOIL_P_MG_PER_KG: f64 = 15.0;
/// Soil nitrogen below this value indicates a nutrient limited plot.
pub const LOW_SOIL_N_MG_PER_KG: f64 = 10.0;
/// Fertilizing is only postponed if the soil has at least this much phosphorus.
pub const POSTPONE_MIN_SOIL_P_MG_PER_KG: f64 = 15.0;
/// Fertilizing is postponed if more rainfall than this is forecast.
pub const POSTPONE_MIN_RAINFALL_MM: f64 = 650.0;
/// Maize plots with more forecast rainfall than this are at risk.
pub const PEST_MIN_RAINFALL_MM: f64 = 950.0;
/// Maize plots with a yield below this value are at risk.
pub const PEST_MAX_YIELD_KG_PER_HA: f64 = 2500.0;

/// The crop name of maize.
pub const MAIZE: &str = "Zea mays L.";
/// The crop name of soybean.
pub const SOYBEAN: &str = "Glycine max L.";

/// Answers agronomic questions over a [FactStore].
///
/// All operations are pure functions of the store. An operation whose queries cannot be evaluated
/// logs the error and returns an empty result (or [None]), so callers never need to handle query
/// errors.
///
/// The advisor is cheap to clone and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Advisor {
    store: Arc<FactStore>,
    options: QueryOptions,
}

impl Advisor {
    pub fn new(store: Arc<FactStore>) -> Self {
        Self::with_options(store, QueryOptions::default())
    }

    pub fn with_options(store: Arc<FactStore>, options: QueryOptions) -> Self {
        Self { store, options }
    }

    /// Loads the schema and instance documents and creates an advisor for them.
    pub fn load(
        schema: impl AsRef<Path>,
        instances: impl AsRef<Path>,
    ) -> Result<Self, LoaderError> {
        Ok(Self::new(Arc::new(FactStore::load(schema, instances)?)))
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Returns the sorted identifiers of all plots.
    pub fn list_plots(&self) -> Vec<String> {
        self.try_list_plots().unwrap_or_else(|error| {
            tracing::error!(operation = "list_plots", %error, "Query evaluation failed");
            Vec::new()
        })
    }

    /// Summarizes the yield, soil and weather observations of a plot in a given year.
    ///
    /// Returns [None] if the plot has no yield record for `year`.
    pub fn plot_year_summary(&self, plot_id: &str, year: i32) -> Option<PlotYearSummary> {
        self.try_plot_year_summary(plot_id, year).unwrap_or_else(|error| {
            tracing::error!(
                operation = "plot_year_summary",
                plot_id,
                year,
                %error,
                "Query evaluation failed"
            );
            None
        })
    }

    /// Lists the yield records of a plot in a given year together with their linked weather
    /// summary and soil measurement.
    ///
    /// Only records with a crop are listed. A record linked to several observations yields one row
    /// per combination.
    pub fn yield_records(&self, plot_id: &str, year: i32) -> Vec<YieldRecordRow> {
        self.try_yield_records(plot_id, year).unwrap_or_else(|error| {
            tracing::error!(
                operation = "yield_records",
                plot_id,
                year,
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    /// Returns the sorted identifiers of plots with a low yield, low soil phosphorus or low soil
    /// nitrogen in any year.
    pub fn plots_needing_fertilizer(&self) -> Vec<String> {
        self.try_plots_needing_fertilizer().unwrap_or_else(|error| {
            tracing::error!(
                operation = "plots_needing_fertilizer",
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    /// Returns the legume crops, sorted by name.
    pub fn legume_crops(&self) -> Vec<CropEntry> {
        self.try_crops_named(SOYBEAN).unwrap_or_else(|error| {
            tracing::error!(operation = "legume_crops", %error, "Query evaluation failed");
            Vec::new()
        })
    }

    /// Returns the cereal crops, sorted by name.
    pub fn cereal_crops(&self) -> Vec<CropEntry> {
        self.try_crops_named(MAIZE).unwrap_or_else(|error| {
            tracing::error!(operation = "cereal_crops", %error, "Query evaluation failed");
            Vec::new()
        })
    }

    /// Returns the plots where fertilizing should be postponed: the soil has enough phosphorus
    /// and heavy rainfall is forecast.
    pub fn plots_to_postpone_fertilizer(&self) -> Vec<PostponeFertilizerPlot> {
        self.try_plots_to_postpone_fertilizer().unwrap_or_else(|error| {
            tracing::error!(
                operation = "plots_to_postpone_fertilizer",
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    /// Returns the maize plots with heavy forecast rainfall and a low yield.
    pub fn plots_with_high_pest_risk(&self) -> Vec<HighPestRiskPlot> {
        self.try_plots_with_high_pest_risk().unwrap_or_else(|error| {
            tracing::error!(
                operation = "plots_with_high_pest_risk",
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    /// Recommends the next crop for every maize and soybean yield record.
    pub fn next_crop_recommendations(&self) -> Vec<NextCropRecommendation> {
        self.try_next_crop_recommendations().unwrap_or_else(|error| {
            tracing::error!(
                operation = "next_crop_recommendations",
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    /// Returns the inferred fertilizer recommendations of a plot in a given year.
    pub fn fertilizer_recommendations(
        &self,
        plot_id: &str,
        year: i32,
    ) -> Vec<FertilizerRecommendation> {
        self.try_fertilizer_recommendations(plot_id, year).unwrap_or_else(|error| {
            tracing::error!(
                operation = "fertilizer_recommendations",
                plot_id,
                year,
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    /// Returns the inferred crop rotation recommendations of a plot in a given year.
    pub fn crop_rotation_recommendations(
        &self,
        plot_id: &str,
        year: i32,
    ) -> Vec<CropRotationRecommendation> {
        self.try_crop_rotation_recommendations(plot_id, year).unwrap_or_else(|error| {
            tracing::error!(
                operation = "crop_rotation_recommendations",
                plot_id,
                year,
                %error,
                "Query evaluation failed"
            );
            Vec::new()
        })
    }

    fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::with_options(&self.store, self.options)
    }

    fn try_list_plots(&self) -> Result<Vec<String>, QueryEvaluationError> {
        let query = Query::new(
            GraphPattern::new()
                .triple(var("plot"), rdf::TYPE.into_owned(), sf::PLOT.into_owned())
                .optional(GraphPattern::new().triple(
                    var("plot"),
                    sf::HAS_PLOT_ID.into_owned(),
                    var("pid"),
                )),
        );
        let mut plots = BTreeSet::new();
        for solution in self.engine().evaluate(&query)? {
            let id = match (solution.str("pid"), solution.get("plot")) {
                (Some(pid), _) => pid,
                (None, Some(Term::NamedNode(node))) => local_name(node.as_str()),
                _ => continue,
            };
            plots.insert(id.to_owned());
        }
        Ok(plots.into_iter().collect())
    }

    fn try_plot_year_summary(
        &self,
        plot_id: &str,
        year: i32,
    ) -> Result<Option<PlotYearSummary>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?.plots_with_id(plot_id);
        if plots.is_empty() {
            return Ok(None);
        }

        let records = Query::new(
            GraphPattern::new()
                .triple(var("rec"), rdf::TYPE.into_owned(), sf::YIELD_RECORD.into_owned())
                .triple(var("rec"), sf::ABOUT_PLOT.into_owned(), var("plot"))
                .triple(var("rec"), sf::HAS_YEAR.into_owned(), var("yr"))
                .triple(var("rec"), sf::YIELD_KG_PER_HA.into_owned(), var("yield"))
                .optional(
                    GraphPattern::new()
                        .triple(var("rec"), sf::FOR_CROP.into_owned(), var("crop"))
                        .triple(var("crop"), sf::HAS_CROP_NAME.into_owned(), var("cropName")),
                )
                .optional(
                    GraphPattern::new()
                        .triple(var("rec"), sf::WITH_TREATMENT.into_owned(), var("treat"))
                        .triple(var("treat"), rdfs::LABEL.into_owned(), var("treatment")),
                )
                .filter(year_equals("yr", year)),
        )
        .values(var("plot"), plots)
        .order_by([var("rec")]);
        let records = engine.evaluate(&records)?;
        let Some(record) = records.iter().next() else {
            return Ok(None);
        };
        let (Some(plot), Some(year_term)) = (record.get("plot"), record.get("yr")) else {
            return Ok(None);
        };

        let soil = self.soil_values(&engine, plot, year_term)?;
        let weather = self.weather_values(&engine, plot, year_term)?;
        Ok(Some(PlotYearSummary {
            plot_id: plot_id.to_owned(),
            year,
            yield_kg_per_ha: record.f64("yield"),
            crop_name: record.str("cropName").map(ToOwned::to_owned),
            treatment: record.str("treatment").map(ToOwned::to_owned),
            soil,
            weather,
        }))
    }

    fn try_yield_records(
        &self,
        plot_id: &str,
        year: i32,
    ) -> Result<Vec<YieldRecordRow>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?.plots_with_id(plot_id);
        if plots.is_empty() {
            return Ok(Vec::new());
        }

        let query = Query::new(
            GraphPattern::new()
                .triple(var("rec"), rdf::TYPE.into_owned(), sf::YIELD_RECORD.into_owned())
                .triple(var("rec"), sf::ABOUT_PLOT.into_owned(), var("plot"))
                .triple(var("rec"), sf::HAS_YEAR.into_owned(), var("yr"))
                .triple(var("rec"), sf::FOR_CROP.into_owned(), var("crop"))
                .optional(GraphPattern::new().triple(
                    var("crop"),
                    sf::HAS_CROP_NAME.into_owned(),
                    var("cropName"),
                ))
                .optional(GraphPattern::new().triple(
                    var("rec"),
                    sf::YIELD_KG_PER_HA.into_owned(),
                    var("yield"),
                ))
                .optional(
                    GraphPattern::new()
                        .triple(var("rec"), sf::USES_WEATHER_SUMMARY.into_owned(), var("w"))
                        .triple(
                            var("w"),
                            sf::FORECAST_RAINFALL_AMOUNT_MM.into_owned(),
                            var("precip"),
                        ),
                )
                .optional(
                    GraphPattern::new()
                        .triple(var("rec"), sf::USES_SOIL_MEASUREMENT.into_owned(), var("s"))
                        .triple(var("s"), sf::SOIL_PH.into_owned(), var("ph")),
                )
                .filter(year_equals("yr", year)),
        )
        .values(var("plot"), plots)
        .order_by([var("rec"), var("w"), var("s")]);
        Ok(engine
            .evaluate(&query)?
            .iter()
            .map(|solution| YieldRecordRow {
                crop: solution.str("cropName").map(ToOwned::to_owned),
                yield_kg_ha: solution.f64("yield"),
                precip_mm: solution.f64("precip"),
                soil_ph: solution.f64("ph"),
            })
            .collect())
    }

    /// The soil measurement of `plot` in the year `year`. The first measurement in identifier
    /// order is used.
    fn soil_values(
        &self,
        engine: &QueryEngine<'_>,
        plot: &Term,
        year: &Term,
    ) -> Result<SoilValues, QueryEvaluationError> {
        let attributes = [
            ("pH", sf::SOIL_PH),
            ("P", sf::SOIL_P_MG_PER_KG),
            ("K", sf::SOIL_K_MG_PER_KG),
            ("Ca", sf::SOIL_CA_MG_PER_KG),
            ("Mg", sf::SOIL_MG_MG_PER_KG),
            ("CEC", sf::SOIL_CEC),
            ("OM", sf::SOIL_OM_PCT),
        ];
        let Some(values) =
            self.observation(engine, sf::SOIL_MEASUREMENT, plot, year, &attributes)?
        else {
            return Ok(SoilValues::default());
        };
        Ok(SoilValues {
            ph: values.f64("pH"),
            p_mg_per_kg: values.f64("P"),
            k_mg_per_kg: values.f64("K"),
            ca_mg_per_kg: values.f64("Ca"),
            mg_mg_per_kg: values.f64("Mg"),
            cec: values.f64("CEC"),
            om_pct: values.f64("OM"),
        })
    }

    /// The weather summary of `plot` in the year `year`.
    fn weather_values(
        &self,
        engine: &QueryEngine<'_>,
        plot: &Term,
        year: &Term,
    ) -> Result<WeatherValues, QueryEvaluationError> {
        let attributes = [
            ("precip", sf::TOTAL_PRECIP_MM),
            ("rain", sf::FORECAST_RAINFALL_AMOUNT_MM),
            ("tmax", sf::AVG_TMAX_C),
            ("tmin", sf::AVG_TMIN_C),
        ];
        let Some(values) =
            self.observation(engine, sf::WEATHER_SUMMARY, plot, year, &attributes)?
        else {
            return Ok(WeatherValues::default());
        };
        Ok(WeatherValues {
            total_precip_mm: values.f64("precip").or_else(|| values.f64("rain")),
            avg_tmax_c: values.f64("tmax"),
            avg_tmin_c: values.f64("tmin"),
        })
    }

    /// Returns the optional `attributes` of the first `class` entity about `plot` in `year`.
    fn observation(
        &self,
        engine: &QueryEngine<'_>,
        class: NamedNodeRef<'_>,
        plot: &Term,
        year: &Term,
        attributes: &[(&str, NamedNodeRef<'_>)],
    ) -> Result<Option<Solution>, QueryEvaluationError> {
        let mut pattern = GraphPattern::new()
            .triple(var("obs"), rdf::TYPE.into_owned(), class.into_owned())
            .triple(var("obs"), sf::ABOUT_PLOT.into_owned(), var("plot"))
            .triple(var("obs"), sf::HAS_YEAR.into_owned(), var("yr"));
        for (name, predicate) in attributes {
            pattern = pattern.optional(GraphPattern::new().triple(
                var("obs"),
                predicate.into_owned(),
                var(name),
            ));
        }
        let query = Query::new(pattern)
            .values(var("plot"), [plot.clone()])
            .values(var("yr"), [year.clone()])
            .order_by([var("obs")]);
        Ok(engine.evaluate(&query)?.into_iter().next())
    }

    fn try_plots_needing_fertilizer(&self) -> Result<Vec<String>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?;
        let low_yield = readings(
            &engine,
            &plots,
            sf::YIELD_RECORD,
            sf::YIELD_KG_PER_HA,
            Expression::less(var("value"), LOW_YIELD_KG_PER_HA),
        )?;
        let low_phosphorus = readings(
            &engine,
            &plots,
            sf::SOIL_MEASUREMENT,
            sf::SOIL_P_MG_PER_KG,
            Expression::less(var("value"), LOW_SOIL_P_MG_PER_KG),
        )?;
        let low_nitrogen = readings(
            &engine,
            &plots,
            sf::SOIL_MEASUREMENT,
            sf::SOIL_N_MG_PER_KG,
            Expression::less(var("value"), LOW_SOIL_N_MG_PER_KG),
        )?;

        let plots: BTreeSet<String> = low_yield
            .into_keys()
            .chain(low_phosphorus.into_keys())
            .chain(low_nitrogen.into_keys())
            .collect();
        Ok(plots.into_iter().collect())
    }

    fn try_crops_named(&self, name: &str) -> Result<Vec<CropEntry>, QueryEvaluationError> {
        let query = Query::new(
            GraphPattern::new()
                .triple(var("crop"), rdf::TYPE.into_owned(), sf::CROP.into_owned())
                .triple(var("crop"), sf::HAS_CROP_NAME.into_owned(), var("name"))
                .filter(crop_name_matches("name", name)),
        )
        .select([var("crop"), var("name")])
        .order_by([var("name"), var("crop")]);
        Ok(self
            .engine()
            .evaluate(&query)?
            .iter()
            .filter_map(|solution| {
                Some(CropEntry {
                    uri: solution.str("crop")?.to_owned(),
                    name: solution.str("name")?.to_owned(),
                })
            })
            .collect())
    }

    fn try_plots_to_postpone_fertilizer(
        &self,
    ) -> Result<Vec<PostponeFertilizerPlot>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?;
        let phosphorus = readings(
            &engine,
            &plots,
            sf::SOIL_MEASUREMENT,
            sf::SOIL_P_MG_PER_KG,
            Expression::greater_or_equal(var("value"), POSTPONE_MIN_SOIL_P_MG_PER_KG),
        )?;
        let rainfall = readings(
            &engine,
            &plots,
            sf::WEATHER_SUMMARY,
            sf::FORECAST_RAINFALL_AMOUNT_MM,
            Expression::greater(var("value"), POSTPONE_MIN_RAINFALL_MM),
        )?;

        Ok(rainfall
            .into_iter()
            .filter_map(|(plot_id, rainfall)| {
                let phosphorus = phosphorus.get(&plot_id)?;
                let wettest = highest(&rainfall)?;
                // Prefer the phosphorus reading of the year with the most rainfall
                let reading = phosphorus
                    .iter()
                    .find(|reading| wettest.year.is_some() && reading.year == wettest.year)
                    .or_else(|| phosphorus.first())?;
                Some(PostponeFertilizerPlot {
                    plot_id,
                    soil_p_mg_per_kg: reading.value,
                    forecast_rainfall_mm: wettest.value,
                })
            })
            .collect())
    }

    fn try_plots_with_high_pest_risk(&self) -> Result<Vec<HighPestRiskPlot>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?;

        let maize = Query::new(
            GraphPattern::new()
                .triple(var("rec"), rdf::TYPE.into_owned(), sf::YIELD_RECORD.into_owned())
                .triple(var("rec"), sf::ABOUT_PLOT.into_owned(), var("plot"))
                .triple(var("rec"), sf::FOR_CROP.into_owned(), var("crop"))
                .triple(var("crop"), sf::HAS_CROP_NAME.into_owned(), var("name"))
                .filter(crop_name_matches("name", MAIZE)),
        )
        .order_by([var("rec")]);
        let mut maize_names = BTreeMap::new();
        for solution in engine.evaluate(&maize)? {
            let (Some(plot_id), Some(name)) = (
                solution.get("plot").and_then(|plot| plots.get(plot)),
                solution.str("name"),
            ) else {
                continue;
            };
            maize_names
                .entry(plot_id.to_owned())
                .or_insert_with(|| name.to_owned());
        }

        let rainfall = readings(
            &engine,
            &plots,
            sf::WEATHER_SUMMARY,
            sf::FORECAST_RAINFALL_AMOUNT_MM,
            Expression::greater(var("value"), PEST_MIN_RAINFALL_MM),
        )?;
        let low_yield = readings(
            &engine,
            &plots,
            sf::YIELD_RECORD,
            sf::YIELD_KG_PER_HA,
            Expression::less(var("value"), PEST_MAX_YIELD_KG_PER_HA),
        )?;

        Ok(maize_names
            .into_iter()
            .filter_map(|(plot_id, crop_name)| {
                let rainfall = highest(rainfall.get(&plot_id)?)?;
                let yield_kg_per_ha = lowest(low_yield.get(&plot_id)?)?;
                Some(HighPestRiskPlot {
                    plot_id,
                    crop_name,
                    forecast_rainfall_mm: rainfall.value,
                    yield_kg_per_ha: yield_kg_per_ha.value,
                })
            })
            .collect())
    }

    fn try_next_crop_recommendations(
        &self,
    ) -> Result<Vec<NextCropRecommendation>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?;

        let rotations = [
            (MAIZE, SOYBEAN, CropClass::LegumeCrop),
            (SOYBEAN, MAIZE, CropClass::CerealCrop),
        ];
        let mut recommendations = BTreeMap::new();
        for (current, next, class) in rotations {
            let query = Query::new(
                GraphPattern::new()
                    .triple(var("rec"), rdf::TYPE.into_owned(), sf::YIELD_RECORD.into_owned())
                    .triple(var("rec"), sf::ABOUT_PLOT.into_owned(), var("plot"))
                    .triple(var("rec"), sf::HAS_YEAR.into_owned(), var("yr"))
                    .triple(var("rec"), sf::FOR_CROP.into_owned(), var("crop"))
                    .triple(var("crop"), sf::HAS_CROP_NAME.into_owned(), var("name"))
                    .filter(crop_name_matches("name", current)),
            )
            .order_by([var("rec")]);
            for solution in engine.evaluate(&query)? {
                let plot_id = solution.get("plot").and_then(|plot| plots.get(plot));
                let year = solution.i64("yr").and_then(|year| i32::try_from(year).ok());
                let (Some(plot_id), Some(year), Some(name)) = (plot_id, year, solution.str("name"))
                else {
                    continue;
                };
                let key = (plot_id.to_owned(), year, name.to_owned());
                recommendations
                    .entry(key)
                    .or_insert_with(|| NextCropRecommendation {
                        plot_id: plot_id.to_owned(),
                        year,
                        current_crop: name.to_owned(),
                        recommended_next_crop: next.to_owned(),
                        recommended_next_crop_class: class,
                    });
            }
        }
        // The keys start with (plot, year), hence the values are already sorted.
        Ok(recommendations.into_values().collect())
    }

    fn try_fertilizer_recommendations(
        &self,
        plot_id: &str,
        year: i32,
    ) -> Result<Vec<FertilizerRecommendation>, QueryEvaluationError> {
        let solutions = self.derived_recommendations(
            sf::FERTILIZER_RECOMMENDATION,
            sf::RECOMMENDED_FERTILIZER_ACTION,
            plot_id,
            year,
        )?;
        Ok(solutions
            .iter()
            .filter_map(|solution| {
                Some(FertilizerRecommendation {
                    action: solution.str("value")?.to_owned(),
                    justification: solution.str("just")?.to_owned(),
                })
            })
            .collect())
    }

    fn try_crop_rotation_recommendations(
        &self,
        plot_id: &str,
        year: i32,
    ) -> Result<Vec<CropRotationRecommendation>, QueryEvaluationError> {
        let solutions = self.derived_recommendations(
            sf::CROP_ROTATION_RECOMMENDATION,
            sf::RECOMMENDS_CROP,
            plot_id,
            year,
        )?;
        Ok(solutions
            .iter()
            .filter_map(|solution| {
                Some(CropRotationRecommendation {
                    recommended_crop: local_name(solution.str("value")?).to_owned(),
                    justification: solution.str("just")?.to_owned(),
                })
            })
            .collect())
    }

    /// Finds the `class` individuals targeting the plot in `year` with their `predicate` value and
    /// justification.
    fn derived_recommendations(
        &self,
        class: NamedNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        plot_id: &str,
        year: i32,
    ) -> Result<Vec<Solution>, QueryEvaluationError> {
        let engine = self.engine();
        let plots = PlotIds::resolve(&engine)?.plots_with_id(plot_id);
        if plots.is_empty() {
            return Ok(Vec::new());
        }

        let query = Query::new(
            GraphPattern::new()
                .triple(var("rec"), rdf::TYPE.into_owned(), class.into_owned())
                .triple(var("rec"), sf::TARGETS_PLOT.into_owned(), var("plot"))
                .triple(var("rec"), sf::FOR_YEAR.into_owned(), var("yr"))
                .triple(var("rec"), predicate.into_owned(), var("value"))
                .triple(var("rec"), sf::HAS_JUSTIFICATION_TEXT.into_owned(), var("just"))
                .filter(year_equals("yr", year)),
        )
        .values(var("plot"), plots)
        .order_by([var("rec")]);
        Ok(engine.evaluate(&query)?.into_iter().collect())
    }
}

/// A numeric reading of an observation.
#[derive(Debug, Clone)]
struct Reading {
    year: Option<String>,
    value: f64,
}

/// Collects the `predicate` values of all `class` entities that pass `filter`, grouped by plot
/// identifier. The filter refers to the value as `?value`.
///
/// Readings are in identifier order of the observation entity.
fn readings(
    engine: &QueryEngine<'_>,
    plots: &PlotIds,
    class: NamedNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
    filter: Expression,
) -> Result<BTreeMap<String, Vec<Reading>>, QueryEvaluationError> {
    let query = Query::new(
        GraphPattern::new()
            .triple(var("obs"), rdf::TYPE.into_owned(), class.into_owned())
            .triple(var("obs"), sf::ABOUT_PLOT.into_owned(), var("plot"))
            .triple(var("obs"), predicate.into_owned(), var("value"))
            .optional(GraphPattern::new().triple(
                var("obs"),
                sf::HAS_YEAR.into_owned(),
                var("yr"),
            ))
            .filter(filter),
    )
    .order_by([var("obs")]);

    let mut readings: BTreeMap<String, Vec<Reading>> = BTreeMap::new();
    for solution in engine.evaluate(&query)? {
        let plot_id = solution.get("plot").and_then(|plot| plots.get(plot));
        let (Some(plot_id), Some(value)) = (plot_id, solution.f64("value")) else {
            continue;
        };
        readings.entry(plot_id.to_owned()).or_default().push(Reading {
            year: solution.str("yr").map(ToOwned::to_owned),
            value,
        });
    }
    Ok(readings)
}

/// The first reading with the highest value.
fn highest(readings: &[Reading]) -> Option<&Reading> {
    readings
        .iter()
        .reduce(|best, reading| if reading.value > best.value { reading } else { best })
}

/// The first reading with the lowest value.
fn lowest(readings: &[Reading]) -> Option<&Reading> {
    readings
        .iter()
        .reduce(|best, reading| if reading.value < best.value { reading } else { best })
}

/// `STR(?variable) = "year"`
fn year_equals(variable: &str, year: i32) -> Expression {
    Expression::equal(
        Expression::str(var(variable)),
        Literal::new_simple_literal(year.to_string()),
    )
}

/// `LCASE(STR(?variable)) = LCASE("name")`
fn crop_name_matches(variable: &str, name: &str) -> Expression {
    Expression::equal(
        Expression::lower_case(Expression::str(var(variable))),
        Literal::new_simple_literal(name.to_lowercase()),
    )
}
