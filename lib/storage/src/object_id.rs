use farmgraph_model::{Term, TermRef};
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// Identifies a term within a single [FactStore](crate::FactStore).
///
/// Ids are assigned in insertion order. They are only meaningful for the store that created them.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct TermId(u32);

impl TermId {
    pub(crate) const MIN: TermId = TermId(0);
    pub(crate) const MAX: TermId = TermId(u32::MAX);

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A bidirectional mapping between terms and their [TermId].
#[derive(Debug, Default)]
pub(crate) struct TermIdMapping {
    id2term: Vec<Term>,
    term2id: FxHashMap<Term, TermId>,
}

impl TermIdMapping {
    /// Returns the id of `term` if the term has been interned.
    pub fn try_get_id(&self, term: TermRef<'_>) -> Option<TermId> {
        // The lookup requires an owned term as oxrdf does not implement `Borrow` for terms.
        self.term2id.get(&term.into_owned()).copied()
    }

    /// Returns the id of `term`, assigning a new one if the term is new.
    ///
    /// Returns [None] if the id space is exhausted.
    pub fn obtain_id(&mut self, term: Term) -> Option<TermId> {
        if let Some(id) = self.term2id.get(&term) {
            return Some(*id);
        }

        let id = TermId(u32::try_from(self.id2term.len()).ok()?);
        if id == TermId::MAX {
            return None;
        }
        self.id2term.push(term.clone());
        self.term2id.insert(term, id);
        Some(id)
    }

    /// Returns the term that is identified by `id`.
    ///
    /// Ids are only handed out by this mapping, therefore every id has a term.
    pub fn decode(&self, id: TermId) -> &Term {
        &self.id2term[id.index()]
    }

    pub fn len(&self) -> usize {
        self.id2term.len()
    }
}
