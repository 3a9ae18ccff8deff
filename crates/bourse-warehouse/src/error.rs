use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// One of the dashboard endpoints could not be fetched or decoded.
    #[error("failed to fetch {endpoint}: {source:#}")]
    Fetch {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },

    /// A symbol or range key is absent from a payload mapping.
    #[error("{what} not found: {key}")]
    KeyNotFound { what: &'static str, key: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid input: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn key_not_found(what: &'static str, key: impl Into<String>) -> Self {
        Error::KeyNotFound {
            what,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
