mod error;
mod value;
pub mod vocab;

pub use error::*;
pub use value::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    NamedOrBlankNode, Quad, Subject, SubjectRef, Term, TermRef, Triple, TripleRef, Variable,
    VariableNameParseError, VariableRef,
};

// Re-export the pattern types of spargebra. Queries are always built from these values and never
// from query text.
pub use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};
