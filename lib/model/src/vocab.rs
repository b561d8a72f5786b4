//! Provides ready to use [`NamedNodeRef`](super::NamedNodeRef)s for the vocabularies used by the
//! smart-farming knowledge graph.

pub use oxrdf::vocab::{rdf, rdfs, xsd};

pub mod sf {
    //! The [smart-farming ontology](http://example.org/smart-farming#) vocabulary.
    use oxrdf::NamedNodeRef;

    // Classes

    /// A physical field unit under study.
    pub const PLOT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#Plot");
    pub const CROP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#Crop");
    /// The harvest of one plot in one year.
    pub const YIELD_RECORD: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#YieldRecord");
    pub const SOIL_MEASUREMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#SoilMeasurement");
    pub const WEATHER_SUMMARY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#WeatherSummary");
    /// Inferred by the offline reasoner; never produced at query time.
    pub const FERTILIZER_RECOMMENDATION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#FertilizerRecommendation");
    /// Inferred by the offline reasoner; never produced at query time.
    pub const CROP_ROTATION_RECOMMENDATION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://example.org/smart-farming#CropRotationRecommendation",
    );

    // Object properties

    pub const ABOUT_PLOT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#aboutPlot");
    pub const FOR_CROP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#forCrop");
    pub const WITH_TREATMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#withTreatment");
    /// Links a yield record to the soil measurement taken for it.
    pub const USES_SOIL_MEASUREMENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#usesSoilMeasurement");
    /// Links a yield record to the weather summary of its season.
    pub const USES_WEATHER_SUMMARY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#usesWeatherSummary");
    pub const TARGETS_PLOT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#targetsPlot");
    pub const RECOMMENDS_CROP: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#recommendsCrop");

    // Data properties

    pub const HAS_PLOT_ID: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#hasPlotID");
    pub const HAS_CROP_NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#hasCropName");
    /// The year of an observation record, usually a `xsd:gYear`.
    pub const HAS_YEAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#hasYear");
    /// The year of a derived recommendation.
    pub const FOR_YEAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#forYear");
    pub const YIELD_KG_PER_HA: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#yield_kg_per_ha");
    pub const SOIL_PH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_pH");
    pub const SOIL_P_MG_PER_KG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_P_mg_per_kg");
    /// Part of the schema, but not produced by the ingestion pipeline.
    pub const SOIL_N_MG_PER_KG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_N_mg_per_kg");
    pub const SOIL_K_MG_PER_KG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_K_mg_per_kg");
    pub const SOIL_CA_MG_PER_KG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_Ca_mg_per_kg");
    pub const SOIL_MG_MG_PER_KG: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_Mg_mg_per_kg");
    pub const SOIL_CEC: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_CEC");
    pub const SOIL_OM_PCT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#soil_OM_pct");
    pub const TOTAL_PRECIP_MM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#totalPrecip_mm");
    pub const FORECAST_RAINFALL_AMOUNT_MM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#forecastRainfallAmount_mm");
    pub const AVG_TMAX_C: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#avgTmax_C");
    pub const AVG_TMIN_C: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#avgTmin_C");
    pub const RECOMMENDED_FERTILIZER_ACTION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://example.org/smart-farming#recommendedFertilizerAction",
    );
    pub const HAS_JUSTIFICATION_TEXT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.org/smart-farming#hasJustificationText");
}
