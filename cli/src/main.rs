use crate::cli::{Args, Command, Documents, Operation};
use anyhow::{bail, Context};
use clap::Parser;
use farmgraph::Advisor;
use farmgraph_web::ServerConfig;
use serde_json::Value;
use std::io::{self, stdout, Write};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    init_tracing();
    let matches = Args::parse();
    match matches.command {
        Command::Serve {
            bind,
            documents,
            cors,
        } => {
            let advisor = load(&documents)?;
            farmgraph_web::serve(ServerConfig {
                advisor,
                bind,
                cors,
            })
            .await
        }
        Command::Query {
            operation,
            documents,
            plot,
            year,
        } => {
            let advisor = load(&documents)?;
            let result = evaluate(&advisor, operation, plot.as_deref(), year)?;
            let mut stdout = stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &result)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

/// Logs go to stderr so that JSON written to stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(documents: &Documents) -> anyhow::Result<Advisor> {
    Advisor::load(&documents.schema, &documents.instances).with_context(|| {
        format!(
            "Failed to load the knowledge graph from {} and {}",
            documents.schema.display(),
            documents.instances.display()
        )
    })
}

fn evaluate(
    advisor: &Advisor,
    operation: Operation,
    plot: Option<&str>,
    year: Option<i32>,
) -> anyhow::Result<Value> {
    Ok(match operation {
        Operation::Plots => serde_json::to_value(advisor.list_plots())?,
        Operation::Summary => {
            let (plot, year) = plot_and_year(plot, year)?;
            let Some(summary) = advisor.plot_year_summary(plot, year) else {
                bail!("No data found for plot {plot} in {year}");
            };
            serde_json::to_value(summary)?
        }
        Operation::NeedsFertilizer => serde_json::to_value(advisor.plots_needing_fertilizer())?,
        Operation::Legumes => serde_json::to_value(advisor.legume_crops())?,
        Operation::Cereals => serde_json::to_value(advisor.cereal_crops())?,
        Operation::PostponeFertilizer => {
            serde_json::to_value(advisor.plots_to_postpone_fertilizer())?
        }
        Operation::HighPestRisk => serde_json::to_value(advisor.plots_with_high_pest_risk())?,
        Operation::NextCrop => serde_json::to_value(advisor.next_crop_recommendations())?,
        Operation::Records => {
            let (plot, year) = plot_and_year(plot, year)?;
            serde_json::to_value(advisor.yield_records(plot, year))?
        }
        Operation::Fertilizer => {
            let (plot, year) = plot_and_year(plot, year)?;
            serde_json::to_value(advisor.fertilizer_recommendations(plot, year))?
        }
        Operation::CropRotation => {
            let (plot, year) = plot_and_year(plot, year)?;
            serde_json::to_value(advisor.crop_rotation_recommendations(plot, year))?
        }
    })
}

fn plot_and_year(plot: Option<&str>, year: Option<i32>) -> anyhow::Result<(&str, i32)> {
    let (Some(plot), Some(year)) = (plot, year) else {
        bail!("This operation requires both --plot and --year");
    };
    Ok((plot, year))
}
