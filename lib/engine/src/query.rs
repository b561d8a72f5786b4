use crate::Expression;
use farmgraph_model::{NamedNodePattern, Term, TermPattern, TriplePattern, Variable};
use rustc_hash::FxHashSet;

/// A group graph pattern: a basic graph pattern, optional groups and filters.
///
/// The mandatory triple patterns are joined first. Then, each optional group extends the
/// solutions in declaration order. Lastly, the filters are applied to the solutions of the group.
/// Filters of an optional group are part of the optional match. If they reject every extension of
/// a solution, the solution is kept without the optional bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphPattern {
    pub(crate) triples: Vec<TriplePattern>,
    pub(crate) optionals: Vec<GraphPattern>,
    pub(crate) filters: Vec<Expression>,
}

impl GraphPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mandatory triple pattern.
    #[must_use]
    pub fn triple(
        mut self,
        subject: impl Into<TermPattern>,
        predicate: impl Into<NamedNodePattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        self.triples.push(TriplePattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        });
        self
    }

    /// Adds an optional group.
    #[must_use]
    pub fn optional(mut self, pattern: GraphPattern) -> Self {
        self.optionals.push(pattern);
        self
    }

    /// Adds a filter to this group.
    #[must_use]
    pub fn filter(mut self, expression: Expression) -> Self {
        self.filters.push(expression);
        self
    }

    pub fn triples(&self) -> &[TriplePattern] {
        &self.triples
    }

    /// Visits the variables of the pattern, including those of nested groups and filters.
    pub(crate) fn for_each_variable(&self, callback: &mut impl FnMut(&Variable)) {
        for triple in &self.triples {
            if let TermPattern::Variable(variable) = &triple.subject {
                callback(variable);
            }
            if let NamedNodePattern::Variable(variable) = &triple.predicate {
                callback(variable);
            }
            if let TermPattern::Variable(variable) = &triple.object {
                callback(variable);
            }
        }
        for optional in &self.optionals {
            optional.for_each_variable(callback);
        }
        for filter in &self.filters {
            filter.for_each_variable(callback);
        }
    }
}

/// A seed for a variable. Each term yields one initial solution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValuesSeed {
    pub variable: Variable,
    pub terms: Vec<Term>,
}

/// A select query over a [GraphPattern].
///
/// ```
/// use farmgraph_engine::{var, Expression, GraphPattern, Query};
/// use farmgraph_model::vocab::sf;
///
/// let query = Query::new(
///     GraphPattern::new()
///         .triple(var("rec"), sf::ABOUT_PLOT.into_owned(), var("plot"))
///         .triple(var("rec"), sf::YIELD_KG_PER_HA.into_owned(), var("y"))
///         .filter(Expression::less(var("y"), 1111.0)),
/// )
/// .select([var("plot")])
/// .distinct();
/// assert_eq!(query.projection().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) pattern: GraphPattern,
    pub(crate) projection: Vec<Variable>,
    pub(crate) distinct: bool,
    pub(crate) order_by: Vec<Variable>,
    pub(crate) values: Vec<ValuesSeed>,
}

impl Query {
    /// Creates a query that projects all variables of `pattern`.
    pub fn new(pattern: GraphPattern) -> Self {
        Self {
            pattern,
            projection: Vec::new(),
            distinct: false,
            order_by: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Sets the projected variables.
    #[must_use]
    pub fn select(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.projection = variables.into_iter().collect();
        self
    }

    /// Removes duplicate solutions after the projection.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Orders the solutions by the string form of the given variables. Unbound values come first.
    #[must_use]
    pub fn order_by(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.order_by = variables.into_iter().collect();
        self
    }

    /// Binds `variable` to each of `terms` before the pattern is evaluated.
    ///
    /// Multiple seeds are combined as a cross product.
    #[must_use]
    pub fn values(mut self, variable: Variable, terms: impl IntoIterator<Item = Term>) -> Self {
        self.values.push(ValuesSeed {
            variable,
            terms: terms.into_iter().collect(),
        });
        self
    }

    pub fn pattern(&self) -> &GraphPattern {
        &self.pattern
    }

    /// Returns the projected variables. If empty, all variables of the pattern are projected.
    pub fn projection(&self) -> &[Variable] {
        &self.projection
    }

    /// All variables of the pattern in order of first occurrence.
    pub(crate) fn pattern_variables(&self) -> Vec<Variable> {
        let mut seen = FxHashSet::default();
        let mut variables = Vec::new();
        let mut add = |variable: &Variable| {
            if seen.insert(variable.clone()) {
                variables.push(variable.clone());
            }
        };
        self.pattern.for_each_variable(&mut add);
        variables
    }
}

/// Creates a variable. The name must be a valid SPARQL variable name.
pub fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}
