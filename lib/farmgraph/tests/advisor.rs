#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use farmgraph::engine::QueryOptions;
use farmgraph::storage::FactStore;
use farmgraph::{
    Advisor, CropClass, CropEntry, CropRotationRecommendation, FertilizerRecommendation,
    HighPestRiskPlot, NextCropRecommendation, PostponeFertilizerPlot, SoilValues, WeatherValues,
    YieldRecordRow,
};
use oxrdfio::RdfFormat;
use std::error::Error;
use std::sync::Arc;

const DATA: &str = r#"
@prefix sf: <http://example.org/smart-farming#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

sf:T1_R1 a sf:Plot ; sf:hasPlotID "T1_R1" .
sf:T1_R2 a sf:Plot ; sf:hasPlotID "T1_R2" .
sf:T2_R1 a sf:Plot ; sf:hasPlotID "T2_R1" .
sf:T3_R1 a sf:Plot ; sf:hasPlotID "T3_R1" .
sf:T4_R1 a sf:Plot .

sf:Crop_Zea_mays_L a sf:Crop ; sf:hasCropName "Zea mays L." .
sf:Crop_ZEA_MAYS_L a sf:Crop ; sf:hasCropName "ZEA MAYS L." .
sf:Crop_Glycine_max_L a sf:Crop ; sf:hasCropName "Glycine max L." .
sf:Crop_Zea_mays a sf:Crop ; sf:hasCropName "Zea mays" .
sf:Treatment_T1 a sf:Treatment ; rdfs:label "T1" .

sf:YieldRecord_T1_R1_2015_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T1_R1 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:yield_kg_per_ha "5000.0"^^xsd:float ;
    sf:forCrop sf:Crop_Zea_mays_L ;
    sf:withTreatment sf:Treatment_T1 .
sf:SoilMeasurement_T1_R1_2015 a sf:SoilMeasurement ;
    sf:aboutPlot sf:T1_R1 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:soil_pH "6.2"^^xsd:float ;
    sf:soil_P_mg_per_kg "20.0"^^xsd:float .
sf:YieldRecord_T1_R1_2016_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T1_R1 ;
    sf:hasYear "2016"^^xsd:gYear ;
    sf:yield_kg_per_ha "3000.0"^^xsd:float ;
    sf:forCrop sf:Crop_Glycine_max_L .
sf:WeatherSummary_T1_R1_2016 a sf:WeatherSummary ;
    sf:aboutPlot sf:T1_R1 ;
    sf:hasYear "2016"^^xsd:gYear ;
    sf:forecastRainfallAmount_mm "700.0"^^xsd:float ;
    sf:totalPrecip_mm "690.0"^^xsd:float ;
    sf:avgTmax_C "27.5"^^xsd:float ;
    sf:avgTmin_C "14.0"^^xsd:float .

sf:YieldRecord_T1_R2_2015_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T1_R2 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:yield_kg_per_ha "1111.0"^^xsd:float ;
    sf:forCrop sf:Crop_ZEA_MAYS_L .
sf:SoilMeasurement_T1_R2_2015 a sf:SoilMeasurement ;
    sf:aboutPlot sf:T1_R2 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:soil_P_mg_per_kg "30.0"^^xsd:float .
sf:WeatherSummary_T1_R2_2015 a sf:WeatherSummary ;
    sf:aboutPlot sf:T1_R2 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:forecastRainfallAmount_mm "600.0"^^xsd:float .

sf:YieldRecord_T2_R1_2015_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T2_R1 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:yield_kg_per_ha "1110.99"^^xsd:float ;
    sf:forCrop sf:Crop_Zea_mays_L .
sf:YieldRecord_T2_R1_2016_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T2_R1 ;
    sf:hasYear "2016"^^xsd:gYear ;
    sf:yield_kg_per_ha "2400.0"^^xsd:float ;
    sf:forCrop sf:Crop_Zea_mays_L .
sf:SoilMeasurement_T2_R1_2015 a sf:SoilMeasurement ;
    sf:aboutPlot sf:T2_R1 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:soil_P_mg_per_kg "16.0"^^xsd:float .
sf:SoilMeasurement_T2_R1_2016 a sf:SoilMeasurement ;
    sf:aboutPlot sf:T2_R1 ;
    sf:hasYear "2016"^^xsd:gYear ;
    sf:soil_P_mg_per_kg "18.0"^^xsd:float .
sf:WeatherSummary_T2_R1_2015 a sf:WeatherSummary ;
    sf:aboutPlot sf:T2_R1 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:forecastRainfallAmount_mm "960.0"^^xsd:float .
sf:WeatherSummary_T2_R1_2016 a sf:WeatherSummary ;
    sf:aboutPlot sf:T2_R1 ;
    sf:hasYear "2016"^^xsd:gYear ;
    sf:forecastRainfallAmount_mm "1000.0"^^xsd:float .

sf:YieldRecord_T3_R1_2020_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T3_R1 ;
    sf:hasYear "2020"^^xsd:gYear ;
    sf:yield_kg_per_ha "4000.0"^^xsd:float ;
    sf:forCrop sf:Crop_Zea_mays_L .
sf:YieldRecord_T3_R1_2020_1 a sf:YieldRecord ;
    sf:aboutPlot sf:T3_R1 ;
    sf:hasYear "2020"^^xsd:gYear ;
    sf:yield_kg_per_ha "4200.0"^^xsd:float ;
    sf:forCrop sf:Crop_Zea_mays_L .
sf:YieldRecord_T3_R1_unknown a sf:YieldRecord ;
    sf:aboutPlot sf:T3_R1 ;
    sf:hasYear "unknown" ;
    sf:yield_kg_per_ha "4100.0"^^xsd:float ;
    sf:forCrop sf:Crop_Zea_mays_L .
sf:WeatherSummary_T3_R1_2020 a sf:WeatherSummary ;
    sf:aboutPlot sf:T3_R1 ;
    sf:hasYear "2020"^^xsd:gYear ;
    sf:forecastRainfallAmount_mm "1200.0"^^xsd:float .

sf:YieldRecord_T4_R1_2015_0 a sf:YieldRecord ;
    sf:aboutPlot sf:T4_R1 ;
    sf:hasYear "2015"^^xsd:gYear ;
    sf:yield_kg_per_ha "900.0"^^xsd:float .

sf:FertilizerRecommendation_T1_R1_2015 a sf:FertilizerRecommendation ;
    sf:targetsPlot sf:T1_R1 ;
    sf:forYear "2015"^^xsd:gYear ;
    sf:recommendedFertilizerAction "ApplyNitrogen" ;
    sf:hasJustificationText "Maize after maize" .
sf:CropRotationRecommendation_T1_R1_2015 a sf:CropRotationRecommendation ;
    sf:targetsPlot sf:T1_R1 ;
    sf:forYear "2015"^^xsd:gYear ;
    sf:recommendsCrop sf:Crop_Glycine_max_L ;
    sf:hasJustificationText "Rotate maize with a legume" .
"#;

fn advisor() -> Result<Advisor, Box<dyn Error>> {
    let store = FactStore::from_reader(RdfFormat::Turtle, DATA.as_bytes())?;
    Ok(Advisor::new(Arc::new(store)))
}

#[test]
fn list_plots_is_sorted_and_unique() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    assert_eq!(
        advisor.list_plots(),
        vec!["T1_R1", "T1_R2", "T2_R1", "T3_R1", "T4_R1"]
    );
    Ok(())
}

#[test]
fn summary_of_yield_record_with_soil_and_without_weather() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    let summary = advisor
        .plot_year_summary("T1_R1", 2015)
        .ok_or("summary not found")?;

    assert_eq!(summary.plot_id, "T1_R1");
    assert_eq!(summary.year, 2015);
    assert_eq!(summary.yield_kg_per_ha, Some(5000.0));
    assert_eq!(summary.crop_name.as_deref(), Some("Zea mays L."));
    assert_eq!(summary.treatment.as_deref(), Some("T1"));
    assert_eq!(
        summary.soil,
        SoilValues {
            ph: Some(6.2),
            p_mg_per_kg: Some(20.0),
            ..SoilValues::default()
        }
    );
    assert_eq!(summary.weather, WeatherValues::default());
    Ok(())
}

#[test]
fn summary_joins_weather_of_the_same_year() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    let summary = advisor
        .plot_year_summary("T1_R1", 2016)
        .ok_or("summary not found")?;

    assert_eq!(summary.yield_kg_per_ha, Some(3000.0));
    assert_eq!(summary.crop_name.as_deref(), Some("Glycine max L."));
    assert_eq!(summary.treatment, None);
    assert_eq!(summary.soil, SoilValues::default());
    assert_eq!(
        summary.weather,
        WeatherValues {
            total_precip_mm: Some(690.0),
            avg_tmax_c: Some(27.5),
            avg_tmin_c: Some(14.0),
        }
    );
    Ok(())
}

#[test]
fn summary_of_plot_identified_by_local_name() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    let summary = advisor
        .plot_year_summary("T4_R1", 2015)
        .ok_or("summary not found")?;
    assert_eq!(summary.yield_kg_per_ha, Some(900.0));
    assert_eq!(summary.crop_name, None);
    Ok(())
}

#[test]
fn summary_not_found() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    assert_eq!(advisor.plot_year_summary("T1_R1", 2017), None);
    assert_eq!(advisor.plot_year_summary("T9_R9", 2015), None);
    assert_eq!(advisor.plot_year_summary("\" } ?x ?y ?z { \"", 2015), None);
    Ok(())
}

#[test]
fn summary_serializes_unknown_values_as_null() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    let summary = advisor
        .plot_year_summary("T1_R1", 2015)
        .ok_or("summary not found")?;
    let json = serde_json::to_value(&summary)?;

    assert_eq!(json["yield_kg_per_ha"], 5000.0);
    assert_eq!(json["soil"]["pH"], 6.2);
    assert_eq!(json["soil"]["P_mg_per_kg"], 20.0);
    assert!(json["soil"]["K_mg_per_kg"].is_null());
    assert!(json["weather"]["total_precip_mm"].is_null());
    assert!(json["weather"]["avg_tmax_C"].is_null());
    Ok(())
}

#[test]
fn needs_fertilizer_threshold_is_strict() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    // T1_R2 has a yield of exactly 1111.0, T2_R1 of 1110.99
    assert_eq!(advisor.plots_needing_fertilizer(), vec!["T2_R1", "T4_R1"]);
    Ok(())
}

#[test]
fn needs_fertilizer_with_low_phosphorus() -> Result<(), Box<dyn Error>> {
    let data = r#"
        @prefix sf: <http://example.org/smart-farming#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        sf:P1 a sf:Plot ; sf:hasPlotID "P1" .
        sf:P2 a sf:Plot ; sf:hasPlotID "P2" .
        sf:SoilMeasurement_P1_2015 a sf:SoilMeasurement ;
            sf:aboutPlot sf:P1 ;
            sf:soil_P_mg_per_kg "14.9"^^xsd:float .
        sf:SoilMeasurement_P2_2015 a sf:SoilMeasurement ;
            sf:aboutPlot sf:P2 ;
            sf:soil_N_mg_per_kg "9.0"^^xsd:float .
    "#;
    let store = FactStore::from_reader(RdfFormat::Turtle, data.as_bytes())?;
    let advisor = Advisor::new(Arc::new(store));
    assert_eq!(advisor.plots_needing_fertilizer(), vec!["P1", "P2"]);
    Ok(())
}

#[test]
fn only_typed_plots_are_reported() -> Result<(), Box<dyn Error>> {
    let data = r#"
        @prefix sf: <http://example.org/smart-farming#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        sf:P1 a sf:Plot ; sf:hasPlotID "P1" .
        sf:Untyped sf:hasPlotID "U1" .
        sf:YieldRecord_P1_2015_0 a sf:YieldRecord ;
            sf:aboutPlot sf:P1 ;
            sf:hasYear "2015"^^xsd:gYear ;
            sf:yield_kg_per_ha "800.0"^^xsd:float .
        sf:YieldRecord_U1_2015_0 a sf:YieldRecord ;
            sf:aboutPlot sf:Untyped ;
            sf:hasYear "2015"^^xsd:gYear ;
            sf:yield_kg_per_ha "800.0"^^xsd:float .
    "#;
    let store = FactStore::from_reader(RdfFormat::Turtle, data.as_bytes())?;
    let advisor = Advisor::new(Arc::new(store));
    assert_eq!(advisor.list_plots(), vec!["P1"]);
    assert_eq!(advisor.plots_needing_fertilizer(), vec!["P1"]);
    assert_eq!(advisor.plot_year_summary("U1", 2015), None);
    Ok(())
}

#[test]
fn crops_are_matched_case_insensitively() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    assert_eq!(
        advisor.legume_crops(),
        vec![CropEntry {
            uri: "http://example.org/smart-farming#Crop_Glycine_max_L".into(),
            name: "Glycine max L.".into(),
        }]
    );
    assert_eq!(
        advisor.cereal_crops(),
        vec![
            CropEntry {
                uri: "http://example.org/smart-farming#Crop_ZEA_MAYS_L".into(),
                name: "ZEA MAYS L.".into(),
            },
            CropEntry {
                uri: "http://example.org/smart-farming#Crop_Zea_mays_L".into(),
                name: "Zea mays L.".into(),
            }
        ]
    );
    Ok(())
}

#[test]
fn postpone_fertilizer_intersects_plot_sets() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    // T1_R2 has enough phosphorus but too little rain. T3_R1 has heavy rain but no soil data.
    // T1_R1 qualifies through unrelated records of different years.
    assert_eq!(
        advisor.plots_to_postpone_fertilizer(),
        vec![
            PostponeFertilizerPlot {
                plot_id: "T1_R1".into(),
                soil_p_mg_per_kg: 20.0,
                forecast_rainfall_mm: 700.0,
            },
            PostponeFertilizerPlot {
                plot_id: "T2_R1".into(),
                soil_p_mg_per_kg: 18.0,
                forecast_rainfall_mm: 1000.0,
            }
        ]
    );
    Ok(())
}

#[test]
fn high_pest_risk_reports_worst_case() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    // T3_R1 is rainy maize with a high yield. T1_R2 is maize with a low yield but little rain.
    assert_eq!(
        advisor.plots_with_high_pest_risk(),
        vec![HighPestRiskPlot {
            plot_id: "T2_R1".into(),
            crop_name: "Zea mays L.".into(),
            forecast_rainfall_mm: 1000.0,
            yield_kg_per_ha: 1110.99,
        }]
    );
    Ok(())
}

#[test]
fn next_crop_recommendations_are_complete_and_sorted() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    let legume = |plot_id: &str, year, current_crop: &str| NextCropRecommendation {
        plot_id: plot_id.into(),
        year,
        current_crop: current_crop.into(),
        recommended_next_crop: "Glycine max L.".into(),
        recommended_next_crop_class: CropClass::LegumeCrop,
    };

    assert_eq!(
        advisor.next_crop_recommendations(),
        vec![
            legume("T1_R1", 2015, "Zea mays L."),
            NextCropRecommendation {
                plot_id: "T1_R1".into(),
                year: 2016,
                current_crop: "Glycine max L.".into(),
                recommended_next_crop: "Zea mays L.".into(),
                recommended_next_crop_class: CropClass::CerealCrop,
            },
            legume("T1_R2", 2015, "ZEA MAYS L."),
            legume("T2_R1", 2015, "Zea mays L."),
            legume("T2_R1", 2016, "Zea mays L."),
            legume("T3_R1", 2020, "Zea mays L."),
        ]
    );
    Ok(())
}

#[test]
fn next_crop_for_single_maize_record() -> Result<(), Box<dyn Error>> {
    let data = r#"
        @prefix sf: <http://example.org/smart-farming#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        sf:P1 a sf:Plot ; sf:hasPlotID "P1" .
        sf:Maize a sf:Crop ; sf:hasCropName "zea mays l." .
        sf:YieldRecord_P1_2020_0 a sf:YieldRecord ;
            sf:aboutPlot sf:P1 ;
            sf:hasYear "2020"^^xsd:gYear ;
            sf:forCrop sf:Maize .
        sf:YieldRecord_P1_2020_0 sf:forCrop sf:Maize .
    "#;
    let store = FactStore::from_reader(RdfFormat::Turtle, data.as_bytes())?;
    let advisor = Advisor::new(Arc::new(store));
    assert_eq!(
        advisor.next_crop_recommendations(),
        vec![NextCropRecommendation {
            plot_id: "P1".into(),
            year: 2020,
            current_crop: "zea mays l.".into(),
            recommended_next_crop: "Glycine max L.".into(),
            recommended_next_crop_class: CropClass::LegumeCrop,
        }]
    );
    Ok(())
}

#[test]
fn derived_recommendations_of_plot_and_year() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    assert_eq!(
        advisor.fertilizer_recommendations("T1_R1", 2015),
        vec![FertilizerRecommendation {
            action: "ApplyNitrogen".into(),
            justification: "Maize after maize".into(),
        }]
    );
    assert_eq!(
        advisor.crop_rotation_recommendations("T1_R1", 2015),
        vec![CropRotationRecommendation {
            recommended_crop: "Crop_Glycine_max_L".into(),
            justification: "Rotate maize with a legume".into(),
        }]
    );
    assert!(advisor.fertilizer_recommendations("T1_R1", 2016).is_empty());
    assert!(advisor.crop_rotation_recommendations("T2_R1", 2015).is_empty());
    Ok(())
}

#[test]
fn yield_records_follow_observation_links() -> Result<(), Box<dyn Error>> {
    let data = r#"
        @prefix sf: <http://example.org/smart-farming#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        sf:P1 a sf:Plot ; sf:hasPlotID "P1" .
        sf:Crop_Zea_mays_L a sf:Crop ; sf:hasCropName "Zea mays L." .
        sf:Crop_Unnamed a sf:Crop .

        sf:SoilMeasurement_P1_2015 a sf:SoilMeasurement ; sf:soil_pH "6.5"^^xsd:float .
        sf:WeatherSummary_P1_2015 a sf:WeatherSummary ;
            sf:forecastRainfallAmount_mm "820.0"^^xsd:float .

        sf:YieldRecord_P1_2015_0 a sf:YieldRecord ;
            sf:aboutPlot sf:P1 ;
            sf:hasYear "2015"^^xsd:gYear ;
            sf:yield_kg_per_ha "5000.0"^^xsd:float ;
            sf:forCrop sf:Crop_Zea_mays_L ;
            sf:usesSoilMeasurement sf:SoilMeasurement_P1_2015 ;
            sf:usesWeatherSummary sf:WeatherSummary_P1_2015 .
        sf:YieldRecord_P1_2015_1 a sf:YieldRecord ;
            sf:aboutPlot sf:P1 ;
            sf:hasYear "2015"^^xsd:gYear ;
            sf:forCrop sf:Crop_Unnamed .
        sf:YieldRecord_P1_2015_2 a sf:YieldRecord ;
            sf:aboutPlot sf:P1 ;
            sf:hasYear "2015"^^xsd:gYear ;
            sf:yield_kg_per_ha "4000.0"^^xsd:float .
        sf:YieldRecord_P1_2016_0 a sf:YieldRecord ;
            sf:aboutPlot sf:P1 ;
            sf:hasYear "2016"^^xsd:gYear ;
            sf:forCrop sf:Crop_Zea_mays_L .
    "#;
    let store = FactStore::from_reader(RdfFormat::Turtle, data.as_bytes())?;
    let advisor = Advisor::new(Arc::new(store));

    assert_eq!(
        advisor.yield_records("P1", 2015),
        vec![
            YieldRecordRow {
                crop: Some("Zea mays L.".into()),
                yield_kg_ha: Some(5000.0),
                precip_mm: Some(820.0),
                soil_ph: Some(6.5),
            },
            YieldRecordRow {
                crop: None,
                yield_kg_ha: None,
                precip_mm: None,
                soil_ph: None,
            }
        ]
    );
    assert_eq!(advisor.yield_records("P1", 2016).len(), 1);
    assert!(advisor.yield_records("P1", 2017).is_empty());
    assert!(advisor.yield_records("P9", 2015).is_empty());
    Ok(())
}

#[test]
fn operations_are_deterministic() -> Result<(), Box<dyn Error>> {
    let first = advisor()?;
    let second = advisor()?;
    assert_eq!(first.list_plots(), second.list_plots());
    assert_eq!(
        first.plot_year_summary("T2_R1", 2016),
        second.plot_year_summary("T2_R1", 2016)
    );
    assert_eq!(
        first.plots_to_postpone_fertilizer(),
        second.plots_to_postpone_fertilizer()
    );
    assert_eq!(
        first.plots_with_high_pest_risk(),
        second.plots_with_high_pest_risk()
    );
    assert_eq!(
        first.next_crop_recommendations(),
        second.next_crop_recommendations()
    );
    Ok(())
}

#[test]
fn advisor_is_shared_between_threads() -> Result<(), Box<dyn Error>> {
    let advisor = advisor()?;
    let expected = advisor.plots_to_postpone_fertilizer();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let advisor = advisor.clone();
                scope.spawn(move || advisor.plots_to_postpone_fertilizer())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().ok(), Some(expected.clone()));
        }
    });
    Ok(())
}

#[test]
fn evaluation_errors_become_empty_results() -> Result<(), Box<dyn Error>> {
    let store = FactStore::from_reader(RdfFormat::Turtle, DATA.as_bytes())?;
    let advisor = Advisor::with_options(Arc::new(store), QueryOptions { max_solutions: 1 });
    assert!(advisor.list_plots().is_empty());
    assert_eq!(advisor.plot_year_summary("T1_R1", 2015), None);
    assert!(advisor.plots_needing_fertilizer().is_empty());
    assert!(advisor.next_crop_recommendations().is_empty());
    Ok(())
}
