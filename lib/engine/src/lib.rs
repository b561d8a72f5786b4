//! Evaluation of structured graph pattern queries over a [FactStore](farmgraph_storage::FactStore).
//!
//! Queries are plain data. Values supplied by callers are bound through [Query::values] and never
//! spliced into query text.

mod error;
mod evaluate;
mod expression;
mod query;
mod solution;

pub use error::QueryEvaluationError;
pub use evaluate::{QueryEngine, QueryOptions, DEFAULT_MAX_SOLUTIONS};
pub use expression::Expression;
pub use query::{var, GraphPattern, Query};
pub use solution::{QuerySolutions, Solution};
