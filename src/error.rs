/// Everything that can stop a collector.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("invalid JSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("token request failed: {0}")]
    Auth(String),
    #[error("missing credential `{0}` in auth file")]
    MissingCredential(&'static str),
}

impl CollectError {
    pub(crate) fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        CollectError::Json { origin: origin.into(), source }
    }
}
