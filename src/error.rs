use thiserror::Error;

/// Errors that can occur while translating swagger documents.
#[derive(Debug, Error)]
pub enum GenError {
    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a valid schema document
    #[error("Failed to parse schema document '{path}': {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `$ref` that does not point at an entry of `definitions`
    #[error("Unresolved reference '{reference}' at {location}")]
    UnresolvedReference { reference: String, location: String },

    #[error("Operation '{method} {path}' has no 200 response schema")]
    MissingSuccessResponse { method: String, path: String },

    #[error("Operation 'post {path}' has no body schema parameter")]
    MissingBodySchema { path: String },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Root directory does not exist: {0}")]
    RootNotFound(String),

    /// Any of the above, tagged with the input file it came from.
    #[error("Failed to translate '{path}': {source}")]
    Translate {
        path: String,
        #[source]
        source: Box<GenError>,
    },
}
