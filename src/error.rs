use thiserror::Error;

/// Errors surfaced by the resolver to its callers
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No registered platform recognizes the pasted link
    #[error("This link isn't supported: {0}")]
    UnsupportedSource(String),

    /// Failed to build the shared HTTP client
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Reasons a single metadata tier could not answer.
///
/// These never leave the provider chain; they only feed logging.
#[derive(Error, Debug)]
pub enum TierError {
    /// Credential-gated tier invoked without its credential
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// Transport failure or non-success status.
    ///
    /// The request URL is stripped; credentials travel as query parameters.
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Request exceeded its time bound
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Response parsed but lacked the expected shape or fields
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Every federated mirror failed
    #[error("all {0} mirrors failed")]
    MirrorsExhausted(usize),
}

impl TierError {
    /// Skips are expected whenever the user has not configured a credential.
    pub fn is_skip(&self) -> bool {
        matches!(self, TierError::MissingCredential(_))
    }
}

impl From<reqwest::Error> for TierError {
    fn from(e: reqwest::Error) -> Self {
        TierError::Http(e.without_url())
    }
}

impl From<serde_json::Error> for TierError {
    fn from(e: serde_json::Error) -> Self {
        TierError::MalformedResponse(e.to_string())
    }
}
