use farmgraph_model::{numeric_value, term_str, Term, Variable};
use std::sync::Arc;

/// A single solution of a [`Query`](crate::Query).
///
/// Values are accessed by variable name. A variable that is projected but not bound (e.g., by an
/// optional group that did not match) has no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    variables: Arc<[Variable]>,
    values: Vec<Option<Term>>,
}

impl Solution {
    pub(crate) fn new(variables: Arc<[Variable]>, values: Vec<Option<Term>>) -> Self {
        Self { variables, values }
    }

    /// Returns the term bound to the variable `name`.
    pub fn get(&self, name: &str) -> Option<&Term> {
        let position = self
            .variables
            .iter()
            .position(|variable| variable.as_str() == name)?;
        self.values.get(position)?.as_ref()
    }

    /// Returns the lexical form (or IRI) of the term bound to `name`.
    pub fn str(&self, name: &str) -> Option<&str> {
        term_str(self.get(name)?.as_ref())
    }

    /// Returns the numeric value of the term bound to `name`.
    ///
    /// Literals with a non-numeric datatype or an invalid lexical form have no number.
    pub fn f64(&self, name: &str) -> Option<f64> {
        numeric_value(self.get(name)?.as_ref())
    }

    /// Parses the lexical form of the term bound to `name` as an integer.
    ///
    /// This also accepts literals such as `"2015"^^xsd:gYear`.
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.str(name)?.trim().parse().ok()
    }
}

/// The solutions of a query in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySolutions {
    variables: Arc<[Variable]>,
    solutions: Vec<Solution>,
}

impl QuerySolutions {
    pub(crate) fn new(variables: Arc<[Variable]>, solutions: Vec<Solution>) -> Self {
        Self {
            variables,
            solutions,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }
}

impl IntoIterator for QuerySolutions {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuerySolutions {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}
