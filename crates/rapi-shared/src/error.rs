use thiserror::Error;

/// Pre-flight failures detected before any request leaves the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Login and password are required")]
    MissingCredentials,

    #[error("Unknown task type {0}")]
    UnknownTask(String),

    #[error("Uploaded file must not be empty")]
    EmptyContent,

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("Filename {0} does not match pattern")]
    FilenamePattern(String),

    #[error("Signed file for {0} is missing from the batch")]
    MissingSignedFile(String),

    #[error("Duplicate file name {0}")]
    DuplicateFileName(String),

    #[error("File {0} has no repository information")]
    NoRepository(String),

    #[error("Message has no identifier")]
    MissingIdentifier,
}

/// Failures while mapping between wire JSON and domain entities.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("Invalid identifier {value:?}: {source}")]
    Identifier {
        value: String,
        #[source]
        source: uuid::Error,
    },

    #[error("Invalid timestamp {0:?}")]
    Timestamp(String),

    #[error("Expected a JSON body, got {0} raw bytes")]
    NotJson(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
