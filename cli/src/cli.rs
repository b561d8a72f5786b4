use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "farmgraph")]
/// FarmGraph command line tool and agronomic HTTP API server
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the FarmGraph HTTP server
    Serve {
        /// Host and port to listen to
        #[arg(
            short,
            long,
            default_value = "localhost:7878",
            env = "FARMGRAPH_BIND",
            value_hint = ValueHint::Hostname
        )]
        bind: String,
        #[command(flatten)]
        documents: Documents,
        /// Allows cross-origin requests
        #[arg(long)]
        cors: bool,
    },
    /// Evaluate a single operation against the knowledge graph and print the result as JSON
    Query {
        /// The operation to evaluate
        #[arg(value_enum)]
        operation: Operation,
        #[command(flatten)]
        documents: Documents,
        /// The plot identifier
        ///
        /// Required by `summary`, `records`, `fertilizer` and `crop-rotation`.
        #[arg(long)]
        plot: Option<String>,
        /// The year
        ///
        /// Required by `summary`, `records`, `fertilizer` and `crop-rotation`.
        #[arg(long)]
        year: Option<i32>,
    },
}

/// The documents that make up the knowledge graph.
#[derive(clap::Args)]
pub struct Documents {
    /// The ontology document (Turtle or RDF/XML)
    #[arg(long, env = "FARMGRAPH_SCHEMA", value_hint = ValueHint::FilePath)]
    pub schema: PathBuf,
    /// The instance data document (Turtle or RDF/XML)
    #[arg(long, env = "FARMGRAPH_INSTANCES", value_hint = ValueHint::FilePath)]
    pub instances: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Operation {
    /// List all plot identifiers
    Plots,
    /// Yield, soil and weather values of a plot in a year
    Summary,
    /// Yield records of a plot in a year with their linked weather and soil observations
    Records,
    /// Plots with a low yield, low soil phosphorus or low soil nitrogen
    NeedsFertilizer,
    /// Legume crops
    Legumes,
    /// Cereal crops
    Cereals,
    /// Plots where fertilization should be postponed because of forecast rainfall
    PostponeFertilizer,
    /// Maize plots with a high pest risk
    HighPestRisk,
    /// Next crop recommendations for every maize or soybean planting
    NextCrop,
    /// Inferred fertilizer recommendations of a plot in a year
    Fertilizer,
    /// Inferred crop rotation recommendations of a plot in a year
    CropRotation,
}
