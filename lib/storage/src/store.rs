//! API to access the in-memory fact store.
//!
//! Usage example:
//! ```
//! use farmgraph_model::vocab::{rdf, sf};
//! use farmgraph_model::NamedNodeRef;
//! use farmgraph_storage::FactStore;
//! use oxrdfio::RdfFormat;
//!
//! let data = r#"
//! @prefix sf: <http://example.org/smart-farming#> .
//! sf:T1_R1 a sf:Plot ; sf:hasPlotID "T1_R1" .
//! "#;
//! let store = FactStore::from_reader(RdfFormat::Turtle, data.as_bytes())?;
//!
//! let plots: Vec<_> = store
//!     .triples_for_pattern(None, Some(rdf::TYPE), Some(sf::PLOT.into()))
//!     .collect();
//! assert_eq!(plots.len(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::LoaderError;
use crate::index::{EncodedTriple, EncodedTriplePattern, IndexPermutations};
use crate::object_id::TermIdMapping;
use crate::TermId;
use farmgraph_model::{NamedNodeRef, Term, TermRef, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// An immutable, in-memory set of triples.
///
/// The store merges all loaded documents into a single graph. Named graphs are ignored and their
/// triples are added to that graph. As the store never changes after [FactStoreBuilder::build],
/// it is `Send + Sync` and can be shared by concurrent readers without locking.
#[derive(Debug)]
pub struct FactStore {
    mapping: TermIdMapping,
    index: IndexPermutations,
}

impl FactStore {
    /// Creates a new [FactStoreBuilder].
    pub fn builder() -> FactStoreBuilder {
        FactStoreBuilder::new()
    }

    /// Loads the schema document and the instance document into a single store.
    ///
    /// Both documents are required. The RDF format of each document is guessed from its file
    /// extension.
    pub fn load(
        schema: impl AsRef<Path>,
        instances: impl AsRef<Path>,
    ) -> Result<FactStore, LoaderError> {
        let mut builder = FactStoreBuilder::new();
        builder.load_file(schema)?;
        builder.load_file(instances)?;
        let store = builder.build();
        tracing::info!(
            triples = store.len(),
            terms = store.term_count(),
            "Fact store is ready"
        );
        Ok(store)
    }

    /// Creates a store from a single document.
    pub fn from_reader(
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<FactStore, LoaderError> {
        let mut builder = FactStoreBuilder::new();
        builder.load_from_reader(parser, reader)?;
        Ok(builder.build())
    }

    /// Returns the number of triples in the store.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of distinct terms in the store.
    pub fn term_count(&self) -> usize {
        self.mapping.len()
    }

    /// Returns the [TermId] of `term`, or [None] if the term does not occur in any triple.
    pub fn term_id(&self, term: TermRef<'_>) -> Option<TermId> {
        self.mapping.try_get_id(term)
    }

    /// Returns the term identified by `id`.
    ///
    /// `id` must have been handed out by this store.
    pub fn decode(&self, id: TermId) -> &Term {
        self.mapping.decode(id)
    }

    /// Returns all encoded triples matching `pattern`.
    ///
    /// The triples are returned in the order of the chosen index. Hence, for a given store and
    /// pattern, the order is always the same.
    pub fn scan(&self, pattern: &EncodedTriplePattern) -> impl Iterator<Item = EncodedTriple> + '_ {
        self.index.scan(pattern)
    }

    /// Returns all triples matching the given constant subject, predicate, and object. [None]
    /// matches any term.
    pub fn triples_for_pattern<'a>(
        &'a self,
        subject: Option<TermRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> impl Iterator<Item = [&'a Term; 3]> + 'a {
        self.encode_pattern(subject, predicate.map(Into::into), object)
            .into_iter()
            .flat_map(move |pattern| self.index.scan(&pattern))
            .map(move |[s, p, o]| [self.decode(s), self.decode(p), self.decode(o)])
    }

    /// Checks whether the store contains the given triple.
    pub fn contains(
        &self,
        subject: TermRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> bool {
        self.triples_for_pattern(Some(subject), Some(predicate), Some(object))
            .next()
            .is_some()
    }

    /// Encodes the constant terms of a pattern. Returns [None] if any constant term does not occur
    /// in the store, as then nothing can match.
    fn encode_pattern(
        &self,
        subject: Option<TermRef<'_>>,
        predicate: Option<TermRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Option<EncodedTriplePattern> {
        let encode = |term: Option<TermRef<'_>>| match term {
            None => Some(None),
            Some(term) => self.term_id(term).map(Some),
        };
        Some([encode(subject)?, encode(predicate)?, encode(object)?])
    }
}

/// Collects the triples of one or more documents and creates a [FactStore].
#[derive(Debug)]
pub struct FactStoreBuilder {
    mapping: TermIdMapping,
    index: IndexPermutations,
}

impl Default for FactStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FactStoreBuilder {
    pub fn new() -> Self {
        Self {
            mapping: TermIdMapping::default(),
            index: IndexPermutations::new(),
        }
    }

    /// Parses a document from `reader` and adds its triples.
    ///
    /// Blank nodes are renamed such that blank nodes of different documents never collide.
    /// Returns the number of triples that were not already present.
    pub fn load_from_reader(
        &mut self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<usize, LoaderError> {
        let mut inserted = 0;
        for quad in parser.into().rename_blank_nodes().for_reader(reader) {
            let quad = quad?;
            if self.insert(Triple::new(quad.subject, quad.predicate, quad.object))? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Opens the document at `path` and adds its triples. The RDF format is guessed from the file
    /// extension.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoaderError> {
        let path = path.as_ref();
        let format = rdf_format_from_path(path)?;
        let file = File::open(path).map_err(|error| LoaderError::Open {
            path: path.to_owned(),
            error,
        })?;

        let inserted = self
            .load_from_reader(format, BufReader::new(file))
            .map_err(|error| match error {
                LoaderError::Parsing(error) => LoaderError::InvalidDocument {
                    path: path.to_owned(),
                    error,
                },
                error => error,
            })?;
        tracing::info!(
            path = %path.display(),
            format = %format,
            triples = inserted,
            "Loaded document"
        );
        Ok(inserted)
    }

    /// Adds a single triple. Returns `true` if the triple was not already present.
    pub fn insert(&mut self, triple: Triple) -> Result<bool, LoaderError> {
        let subject = self.obtain_id(Term::from(triple.subject))?;
        let predicate = self.obtain_id(Term::from(triple.predicate))?;
        let object = self.obtain_id(triple.object)?;
        Ok(self.index.insert([subject, predicate, object]))
    }

    /// Freezes the collected triples.
    pub fn build(self) -> FactStore {
        FactStore {
            mapping: self.mapping,
            index: self.index,
        }
    }

    fn obtain_id(&mut self, term: Term) -> Result<TermId, LoaderError> {
        self.mapping
            .obtain_id(term)
            .ok_or(LoaderError::TooManyTerms)
    }
}

fn rdf_format_from_path(path: &Path) -> Result<RdfFormat, LoaderError> {
    let format = match path.extension().and_then(OsStr::to_str) {
        // Ontology editors store RDF/XML documents with these extensions.
        Some("owl" | "xml") => Some(RdfFormat::RdfXml),
        Some(extension) => RdfFormat::from_extension(extension),
        None => None,
    };
    format.ok_or_else(|| LoaderError::UnknownFormat {
        path: path.to_owned(),
    })
}
