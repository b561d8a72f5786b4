use farmgraph_model::Variable;

/// An error raised while evaluating a [`Query`](crate::Query).
///
/// Filter expressions never raise a [QueryEvaluationError]. Their failures are expected and
/// reject the current solution instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryEvaluationError {
    /// A projected, ordered or seeded variable does not occur in the graph pattern.
    #[error("The variable {0} does not occur in the graph pattern")]
    UnknownVariable(Variable),
    /// The triple pattern contains a term that cannot be matched against the store.
    #[error("The term {0} is not supported in triple patterns")]
    UnsupportedTerm(String),
    /// The evaluation produced more intermediate solutions than allowed.
    #[error("The evaluation exceeded the limit of {limit} intermediate solutions")]
    TooManySolutions {
        /// The configured limit.
        limit: usize,
    },
}
