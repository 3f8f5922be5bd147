use thiserror::Error;

pub type ChunkResult<T> = Result<T, ChunkError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("These parameters are required, missing: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("{kind} `{value}` is not a plain SQL identifier")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("Chunk count must be greater than 0")]
    InvalidChunkCount,

    #[error("Table `{table}` has no PRIMARY key, pass --db-primary-key")]
    PrimaryKeyNotFound { table: String },

    #[error("Unable to look up the primary key of `{table}`: {message}")]
    PrimaryKeyLookup { table: String, message: String },

    #[error(
        "Table has {rows} rows, which is not more than the requested {chunk_count} chunks, bailing"
    )]
    TooFewRows { rows: usize, chunk_count: usize },

    #[error("Unable to read table keys ({cause}) and no --db-max-id was given to fall back on")]
    NoKeySource { cause: String },

    #[error("Database unavailable: {0}")]
    Connectivity(String),
}

impl ChunkError {
    /// Connectivity failures are the only ones the key-source selector may recover from.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ChunkError::Connectivity(_))
    }
}
