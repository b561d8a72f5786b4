use oxrdfio::RdfParseError;
use std::io;
use std::path::PathBuf;

/// An error raised while loading a document into a [`FactStore`](crate::FactStore).
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An error raised while parsing a document from a reader.
    #[error(transparent)]
    Parsing(#[from] RdfParseError),
    /// The document could not be opened.
    #[error("Unable to open the document '{}'", path.display())]
    Open {
        /// The path of the document.
        path: PathBuf,
        /// The I/O error.
        #[source]
        error: io::Error,
    },
    /// The document could be opened but is not a valid RDF document.
    #[error("Unable to parse the document '{}'", path.display())]
    InvalidDocument {
        /// The path of the document.
        path: PathBuf,
        /// The parsing error.
        #[source]
        error: RdfParseError,
    },
    /// The RDF format could not be guessed from the file name.
    #[error("Not able to guess the RDF format of '{}' from its file extension", path.display())]
    UnknownFormat {
        /// The path of the document.
        path: PathBuf,
    },
    /// The store cannot hold more distinct terms.
    #[error("The store cannot hold more than {} distinct terms", u32::MAX)]
    TooManyTerms,
}
