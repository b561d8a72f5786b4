use crate::query::ValuesSeed;
use crate::{Expression, GraphPattern, Query, QueryEvaluationError, QuerySolutions, Solution};
use farmgraph_model::{NamedNodePattern, Term, TermPattern, TriplePattern, Variable};
use farmgraph_storage::{EncodedTriplePattern, FactStore, TermId};
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// A solution during evaluation. Each variable has a fixed slot.
type EncodedSolution = Vec<Option<TermId>>;

/// The default for [QueryOptions::max_solutions].
pub const DEFAULT_MAX_SOLUTIONS: usize = 1_000_000;

/// Options for evaluating a [Query].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// The maximum number of intermediate solutions a single evaluation may produce.
    pub max_solutions: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_solutions: DEFAULT_MAX_SOLUTIONS,
        }
    }
}

/// Evaluates queries against a [FactStore].
///
/// The engine holds no state besides the borrowed store. Hence, a single store can be queried by
/// many engines on different threads at the same time.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'store> {
    store: &'store FactStore,
    options: QueryOptions,
}

impl<'store> QueryEngine<'store> {
    pub fn new(store: &'store FactStore) -> Self {
        Self::with_options(store, QueryOptions::default())
    }

    pub fn with_options(store: &'store FactStore, options: QueryOptions) -> Self {
        Self { store, options }
    }

    /// Evaluates `query`.
    ///
    /// The solutions are ordered, projected and deduplicated in this order. Without `ORDER BY`,
    /// the order follows the store indexes and is stable for a given store.
    pub fn evaluate(&self, query: &Query) -> Result<QuerySolutions, QueryEvaluationError> {
        let plan = Plan::compile(self.store, query)?;

        let mut counter = SolutionCounter::new(self.options.max_solutions);
        let seeds = plan.seeds(self.store);
        let mut solutions = self.evaluate_group(&plan.group, seeds, &plan, &mut counter)?;
        tracing::trace!(
            solutions = solutions.len(),
            intermediate = counter.produced,
            "Evaluated graph pattern"
        );

        if !plan.order_by.is_empty() {
            solutions.sort_by_cached_key(|solution| {
                plan.order_by
                    .iter()
                    .map(|slot| solution[*slot].map(|id| sort_key(self.store.decode(id))))
                    .collect::<Vec<_>>()
            });
        }

        let mut projected: Vec<EncodedSolution> = solutions
            .into_iter()
            .map(|solution| plan.projection.iter().map(|slot| solution[*slot]).collect())
            .collect();
        if plan.distinct {
            let mut seen = FxHashSet::default();
            projected.retain(|solution| seen.insert(solution.clone()));
        }

        let variables: Arc<[Variable]> = plan
            .projection
            .iter()
            .map(|slot| plan.variables[*slot].clone())
            .collect();
        let solutions = projected
            .into_iter()
            .map(|solution| {
                let values = solution
                    .into_iter()
                    .map(|id| id.map(|id| self.store.decode(id).clone()))
                    .collect();
                Solution::new(Arc::clone(&variables), values)
            })
            .collect();
        Ok(QuerySolutions::new(variables, solutions))
    }

    fn evaluate_group(
        &self,
        group: &CompiledGroup,
        input: Vec<EncodedSolution>,
        plan: &Plan,
        counter: &mut SolutionCounter,
    ) -> Result<Vec<EncodedSolution>, QueryEvaluationError> {
        let mut solutions = input;
        for pattern in &group.triples {
            let mut joined = Vec::new();
            for solution in &solutions {
                for extended in self.match_pattern(pattern, solution) {
                    counter.count()?;
                    joined.push(extended);
                }
            }
            solutions = joined;
            if solutions.is_empty() {
                return Ok(solutions);
            }
        }

        for optional in &group.optionals {
            let mut joined = Vec::with_capacity(solutions.len());
            for solution in solutions {
                let extended =
                    self.evaluate_group(optional, vec![solution.clone()], plan, counter)?;
                if extended.is_empty() {
                    joined.push(solution);
                } else {
                    joined.extend(extended);
                }
            }
            solutions = joined;
        }

        if !group.filters.is_empty() {
            solutions.retain(|solution| {
                let lookup = |variable: &Variable| {
                    let slot = plan.slots.get(variable)?;
                    solution[*slot].map(|id| self.store.decode(id))
                };
                group
                    .filters
                    .iter()
                    .all(|filter| filter.effective_boolean_value(&lookup).unwrap_or(false))
            });
        }
        Ok(solutions)
    }

    /// Returns all extensions of `solution` that match `pattern`.
    fn match_pattern<'a>(
        &'a self,
        pattern: &'a CompiledTriplePattern,
        solution: &'a EncodedSolution,
    ) -> impl Iterator<Item = EncodedSolution> + 'a {
        let encoded = pattern.bind(solution);
        encoded
            .into_iter()
            .flat_map(move |encoded| self.store.scan(&encoded))
            .filter_map(move |triple| {
                let mut extended = solution.clone();
                for (position, component) in pattern.components.iter().enumerate() {
                    if let PatternComponent::Variable(slot) = component {
                        match extended[*slot] {
                            None => extended[*slot] = Some(triple[position]),
                            // The same variable may occur twice in a pattern
                            Some(bound) if bound != triple[position] => return None,
                            Some(_) => {}
                        }
                    }
                }
                Some(extended)
            })
    }
}

/// A query whose variables are assigned to slots and whose constants are encoded.
struct Plan {
    variables: Vec<Variable>,
    slots: FxHashMap<Variable, usize>,
    group: CompiledGroup,
    values: Vec<ValuesSeed>,
    projection: Vec<usize>,
    order_by: Vec<usize>,
    distinct: bool,
}

impl Plan {
    fn compile(store: &FactStore, query: &Query) -> Result<Self, QueryEvaluationError> {
        let variables = query.pattern_variables();
        let slots: FxHashMap<Variable, usize> = variables
            .iter()
            .enumerate()
            .map(|(slot, variable)| (variable.clone(), slot))
            .collect();
        let slot_of = |variable: &Variable| {
            slots
                .get(variable)
                .copied()
                .ok_or_else(|| QueryEvaluationError::UnknownVariable(variable.clone()))
        };

        let projection = if query.projection.is_empty() {
            (0..variables.len()).collect()
        } else {
            query
                .projection
                .iter()
                .map(slot_of)
                .collect::<Result<Vec<_>, _>>()?
        };
        let order_by = query
            .order_by
            .iter()
            .map(slot_of)
            .collect::<Result<Vec<_>, _>>()?;
        for seed in &query.values {
            slot_of(&seed.variable)?;
        }

        let group = CompiledGroup::compile(store, &query.pattern, &slots)?;
        Ok(Self {
            variables,
            slots,
            group,
            values: query.values.clone(),
            projection,
            order_by,
            distinct: query.distinct,
        })
    }

    /// The initial solutions. Without seeds, this is a single empty solution.
    ///
    /// Seeded terms that do not occur in the store cannot be part of any match and are dropped.
    fn seeds(&self, store: &FactStore) -> Vec<EncodedSolution> {
        let empty = vec![None; self.variables.len()];
        if self.values.is_empty() {
            return vec![empty];
        }

        self.values
            .iter()
            .map(|seed| {
                let slot = self.slots.get(&seed.variable).copied();
                seed.terms
                    .iter()
                    .filter_map(|term| store.term_id(term.as_ref()))
                    .unique()
                    .map(move |id| (slot, id))
                    .collect::<Vec<_>>()
            })
            .multi_cartesian_product()
            .filter_map(|bindings| {
                let mut solution = empty.clone();
                for (slot, id) in bindings {
                    let slot = slot?;
                    match solution[slot] {
                        Some(bound) if bound != id => return None,
                        _ => solution[slot] = Some(id),
                    }
                }
                Some(solution)
            })
            .collect()
    }
}

struct CompiledGroup {
    triples: Vec<CompiledTriplePattern>,
    optionals: Vec<CompiledGroup>,
    filters: Vec<Expression>,
}

impl CompiledGroup {
    fn compile(
        store: &FactStore,
        pattern: &GraphPattern,
        slots: &FxHashMap<Variable, usize>,
    ) -> Result<Self, QueryEvaluationError> {
        Ok(Self {
            triples: pattern
                .triples
                .iter()
                .map(|triple| CompiledTriplePattern::compile(store, triple, slots))
                .collect::<Result<_, _>>()?,
            optionals: pattern
                .optionals
                .iter()
                .map(|optional| CompiledGroup::compile(store, optional, slots))
                .collect::<Result<_, _>>()?,
            filters: pattern.filters.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternComponent {
    Constant(TermId),
    /// A constant that does not occur in the store.
    Missing,
    Variable(usize),
}

struct CompiledTriplePattern {
    components: [PatternComponent; 3],
}

impl CompiledTriplePattern {
    fn compile(
        store: &FactStore,
        pattern: &TriplePattern,
        slots: &FxHashMap<Variable, usize>,
    ) -> Result<Self, QueryEvaluationError> {
        let variable = |variable: &Variable| {
            slots
                .get(variable)
                .copied()
                .map(PatternComponent::Variable)
                .ok_or_else(|| QueryEvaluationError::UnknownVariable(variable.clone()))
        };
        let constant = |term: Term| {
            store
                .term_id(term.as_ref())
                .map_or(PatternComponent::Missing, PatternComponent::Constant)
        };
        let term_pattern = |term: &TermPattern| match term {
            TermPattern::Variable(v) => variable(v),
            TermPattern::NamedNode(node) => Ok(constant(node.clone().into())),
            TermPattern::Literal(literal) => Ok(constant(literal.clone().into())),
            other => Err(QueryEvaluationError::UnsupportedTerm(other.to_string())),
        };

        let predicate = match &pattern.predicate {
            NamedNodePattern::NamedNode(node) => constant(node.clone().into()),
            NamedNodePattern::Variable(v) => variable(v)?,
        };
        Ok(Self {
            components: [
                term_pattern(&pattern.subject)?,
                predicate,
                term_pattern(&pattern.object)?,
            ],
        })
    }

    /// Encodes the pattern under the bindings of `solution`. Returns [None] if a constant does not
    /// occur in the store.
    fn bind(&self, solution: &EncodedSolution) -> Option<EncodedTriplePattern> {
        let mut encoded = [None; 3];
        for (position, component) in self.components.iter().enumerate() {
            encoded[position] = match component {
                PatternComponent::Constant(id) => Some(*id),
                PatternComponent::Missing => return None,
                PatternComponent::Variable(slot) => solution[*slot],
            };
        }
        Some(encoded)
    }
}

struct SolutionCounter {
    produced: usize,
    limit: usize,
}

impl SolutionCounter {
    fn new(limit: usize) -> Self {
        Self { produced: 0, limit }
    }

    fn count(&mut self) -> Result<(), QueryEvaluationError> {
        self.produced += 1;
        if self.produced > self.limit {
            return Err(QueryEvaluationError::TooManySolutions { limit: self.limit });
        }
        Ok(())
    }
}

/// The key used by `ORDER BY`: the lexical form of literals and the IRI of named nodes.
fn sort_key(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_owned(),
        Term::BlankNode(node) => node.as_str().to_owned(),
        Term::Literal(literal) => literal.value().to_owned(),
        #[allow(unreachable_patterns, reason = "Only reachable with RDF-star")]
        other => other.to_string(),
    }
}
