use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FlumpError {
    /// An atlas image or the manifest itself could not be fetched or decoded.
    #[error("failed to fetch '{path}': {source}")]
    Fetch {
        path: String,
        #[source]
        source: BoxedCause,
    },

    #[error("malformed library manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A keyframe names a symbol that no movie or atlas declares.
    #[error("missing symbol '{name}' referenced by movie '{movie}'")]
    MissingSymbol { name: String, movie: String },

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("symbol '{name}' is not a {expected}")]
    SymbolKind { name: String, expected: &'static str },

    #[error("texture '{name}' lies outside atlas '{file}'")]
    RegionOutOfBounds { name: String, file: String },

    /// The packer did not hand back a region for a key it was given.
    #[error("packer returned no region for '{key}'")]
    PackingConsistency { key: String },

    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FlumpError {
    pub fn fetch(path: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        FlumpError::Fetch {
            path: path.into(),
            source: cause.into(),
        }
    }
}
