use farmgraph_engine::{var, GraphPattern, Query, QueryEngine, QueryEvaluationError};
use farmgraph_model::vocab::{rdf, sf};
use farmgraph_model::{local_name, Term};
use rustc_hash::FxHashMap;

/// Maps plot entities to their plot identifier.
///
/// Only `sf:Plot` entities are plots. The identifier of a plot is its `sf:hasPlotID`. If a plot has
/// multiple identifiers, the smallest is used. A plot without `sf:hasPlotID` is identified by the
/// local name of its IRI. Blank node plots without `sf:hasPlotID` have no identifier.
#[derive(Debug, Default)]
pub(crate) struct PlotIds {
    ids: FxHashMap<Term, String>,
    /// The plots in resolution order.
    plots: Vec<Term>,
}

impl PlotIds {
    pub fn resolve(engine: &QueryEngine<'_>) -> Result<Self, QueryEvaluationError> {
        let mut result = Self::default();

        let explicit = Query::new(
            GraphPattern::new()
                .triple(var("plot"), rdf::TYPE.into_owned(), sf::PLOT.into_owned())
                .triple(var("plot"), sf::HAS_PLOT_ID.into_owned(), var("pid")),
        )
        .order_by([var("plot"), var("pid")]);
        for solution in engine.evaluate(&explicit)? {
            if let (Some(plot), Some(pid)) = (solution.get("plot"), solution.str("pid")) {
                result.insert(plot, pid);
            }
        }

        let typed = Query::new(GraphPattern::new().triple(
            var("plot"),
            rdf::TYPE.into_owned(),
            sf::PLOT.into_owned(),
        ))
        .order_by([var("plot")]);
        for solution in engine.evaluate(&typed)? {
            if let Some(plot @ Term::NamedNode(node)) = solution.get("plot") {
                result.insert(plot, local_name(node.as_str()));
            }
        }

        Ok(result)
    }

    fn insert(&mut self, plot: &Term, id: &str) {
        if !self.ids.contains_key(plot) {
            self.ids.insert(plot.clone(), id.to_owned());
            self.plots.push(plot.clone());
        }
    }

    /// Returns the identifier of `plot`.
    pub fn get(&self, plot: &Term) -> Option<&str> {
        self.ids.get(plot).map(String::as_str)
    }

    /// Returns all plot entities with the identifier `id`.
    pub fn plots_with_id(&self, id: &str) -> Vec<Term> {
        self.plots
            .iter()
            .filter(|plot| self.get(plot) == Some(id))
            .cloned()
            .collect()
    }
}
