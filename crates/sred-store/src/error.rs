use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feedback log line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialisation error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid sync cursor: {0:?}")]
    BadCursor(String),

    #[error("cannot advance sync cursor to {cursor}: log holds {len} records")]
    CursorBeyondEnd { cursor: usize, len: usize },
}
