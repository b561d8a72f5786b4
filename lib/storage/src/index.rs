use crate::TermId;
use std::collections::BTreeSet;

/// Represents a triple with encoded terms in subject, predicate, object order.
pub type EncodedTriple = [TermId; 3];

/// A triple pattern with encoded terms in subject, predicate, object order. [None] matches any
/// term.
pub type EncodedTriplePattern = [Option<TermId>; 3];

/// Identifies the order of the triple components within an index.
///
/// The pattern `<S> <P> ?o` can be best served by an SPO index. The scan looks up `<S>`, then
/// `<P>` and lastly binds the remaining entries to `?o`. The pattern `?s <P> <O>` cannot be
/// efficiently evaluated with an SPO index. For this pattern, the store should use the POS index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum IndexComponents {
    SPO,
    POS,
    OSP,
}

impl IndexComponents {
    /// The position of each index level within an SPO triple.
    fn positions(self) -> [usize; 3] {
        match self {
            IndexComponents::SPO => [0, 1, 2],
            IndexComponents::POS => [1, 2, 0],
            IndexComponents::OSP => [2, 0, 1],
        }
    }

    fn reorder<T: Copy>(self, spo: [T; 3]) -> [T; 3] {
        self.positions().map(|position| spo[position])
    }

    fn restore<T: Copy>(self, ordered: [T; 3]) -> [T; 3] {
        let mut spo = ordered;
        for (level, position) in self.positions().into_iter().enumerate() {
            spo[position] = ordered[level];
        }
        spo
    }

    /// The number of leading index levels that `pattern` binds. A higher score means less
    /// entries to scan.
    fn compute_scan_score(self, pattern: &EncodedTriplePattern) -> usize {
        self.reorder(*pattern)
            .iter()
            .take_while(|component| component.is_some())
            .count()
    }
}

/// A single sorted index over all triples.
#[derive(Debug)]
struct TripleIndex {
    components: IndexComponents,
    entries: BTreeSet<EncodedTriple>,
}

impl TripleIndex {
    fn new(components: IndexComponents) -> Self {
        Self {
            components,
            entries: BTreeSet::new(),
        }
    }

    fn scan<'a>(
        &'a self,
        pattern: &EncodedTriplePattern,
    ) -> impl Iterator<Item = EncodedTriple> + 'a {
        let ordered = self.components.reorder(*pattern);
        let prefix_len = self.components.compute_scan_score(pattern);

        let mut from = [TermId::MIN; 3];
        let mut to = [TermId::MAX; 3];
        for level in 0..prefix_len {
            if let Some(id) = ordered[level] {
                from[level] = id;
                to[level] = id;
            }
        }

        let components = self.components;
        self.entries
            .range(from..=to)
            .filter(move |entry| {
                entry
                    .iter()
                    .zip(ordered.iter())
                    .skip(prefix_len)
                    .all(|(id, bound)| bound.is_none_or(|bound| bound == *id))
            })
            .map(move |entry| components.restore(*entry))
    }
}

/// Represents a set of multiple indexes, each of which indexes a different ordering of the
/// triple components. This is necessary as different triple patterns require different index
/// structures.
///
/// With SPO, POS, and OSP, every combination of bound components has an index where the bound
/// components form a prefix.
#[derive(Debug)]
pub(crate) struct IndexPermutations {
    indexes: Vec<TripleIndex>,
}

impl IndexPermutations {
    pub fn new() -> Self {
        Self {
            indexes: vec![
                TripleIndex::new(IndexComponents::SPO),
                TripleIndex::new(IndexComponents::POS),
                TripleIndex::new(IndexComponents::OSP),
            ],
        }
    }

    /// Inserts a triple into all indexes. Returns `true` if the triple was not already present.
    pub fn insert(&mut self, triple: EncodedTriple) -> bool {
        let mut inserted = false;
        for index in &mut self.indexes {
            inserted = index.entries.insert(index.components.reorder(triple));
        }
        inserted
    }

    /// Chooses the index for scanning the given `pattern`.
    #[cfg(test)]
    pub fn choose_index(&self, pattern: &EncodedTriplePattern) -> IndexComponents {
        self.choose(pattern).components
    }

    /// Returns all triples matching `pattern` in the order of the chosen index.
    pub fn scan<'a>(
        &'a self,
        pattern: &EncodedTriplePattern,
    ) -> impl Iterator<Item = EncodedTriple> + 'a {
        self.choose(pattern).scan(pattern)
    }

    pub fn len(&self) -> usize {
        self.indexes[0].entries.len()
    }

    fn choose(&self, pattern: &EncodedTriplePattern) -> &TripleIndex {
        let mut best = &self.indexes[0];
        for index in &self.indexes[1..] {
            // Prefer SPO on equality
            if index.components.compute_scan_score(pattern)
                > best.components.compute_scan_score(pattern)
            {
                best = index;
            }
        }
        best
    }
}
