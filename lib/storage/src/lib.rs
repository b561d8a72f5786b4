//! The in-memory fact store of FarmGraph.
//!
//! The store is built once from RDF documents using a [FactStoreBuilder] and is immutable
//! afterward. It can be shared between threads without any synchronization.

mod error;
mod index;
mod object_id;
mod store;

pub use error::LoaderError;
pub use index::{EncodedTriple, EncodedTriplePattern};
pub use object_id::TermId;
pub use store::{FactStore, FactStoreBuilder};
