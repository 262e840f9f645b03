//! SurrealRest Client Library
//!
//! HTTP client for the SurrealDB REST interface: SurrealQL queries over
//! `/sql` and token issuance over `/signin` and `/signup`.

mod client;
mod request;

pub use client::Client;
pub use request::Body;
pub use surrealrest_core::{
    AuthResult, AuthState, ClientConfig, ProtocolVersion, QueryResult, QueryStatus, RequestError,
    SigninVars, SignupVars,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Server error: {0}")]
    Server(RequestError),

    #[error("Authentication failed: {details}")]
    AuthFailure { details: String },

    #[error("Authentication succeeded but the server returned no token")]
    MissingToken,

    #[error("Serialization error: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Invalid request: {0}")]
    RequestConstruction(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err)
        } else {
            ClientError::Transport(err)
        }
    }

    /// The uniform error record for this failure.
    ///
    /// Server errors are returned verbatim, everything else is reported
    /// with code 500.
    pub fn request_error(&self) -> RequestError {
        match self {
            ClientError::Server(err) => err.clone(),
            ClientError::ReadBody(err) => RequestError {
                code: 500,
                details: "Failed to read response body".to_string(),
                description: "There was an error reading the response body.".to_string(),
                information: err.to_string(),
            },
            ClientError::Transport(err) | ClientError::Timeout(err) => {
                RequestError::local(err.to_string())
            }
            ClientError::Decode(err) | ClientError::Encoding(err) => {
                RequestError::local(err.to_string())
            }
            ClientError::AuthFailure { details } => RequestError::local(details.clone()),
            ClientError::MissingToken => RequestError::local(self.to_string()),
            ClientError::RequestConstruction(msg) => RequestError::local(msg.clone()),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ClientError::Server(err) => err.code,
            _ => 500,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }
}

impl From<ClientError> for RequestError {
    fn from(err: ClientError) -> Self {
        err.request_error()
    }
}
