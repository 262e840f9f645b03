//! Request construction and response normalization

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use surrealrest_core::{AuthResult, AuthState, ProtocolVersion, RequestError};

use crate::{ClientError, Result};

/// Request payload encoding policy
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Sent verbatim, used for SurrealQL text
    Raw(String),
    /// JSON-encoded key/value payload
    Json(serde_json::Map<String, serde_json::Value>),
    Empty,
}

impl Body {
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Body::Raw(text) => Ok(text.into_bytes()),
            Body::Json(map) => serde_json::to_vec(&map).map_err(ClientError::Encoding),
            Body::Empty => Ok(Vec::new()),
        }
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ClientError::RequestConstruction(format!("invalid header name {name}: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::RequestConstruction(format!("invalid header value: {e}")))
}

/// Build the full header set for one request.
///
/// `auth` is a snapshot; the caller reads it once per request.
pub(crate) fn request_headers(
    version: ProtocolVersion,
    namespace: &str,
    database: &str,
    auth: Option<&AuthState>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let ns_header = header_name(version.namespace_header())?;
    let db_header = header_name(version.database_header())?;
    headers.insert(ns_header.clone(), header_value(namespace)?);
    headers.insert(db_header.clone(), header_value(database)?);

    match auth {
        Some(AuthState::Root {
            username,
            password,
            namespace,
            database,
        }) => {
            let credentials = STANDARD.encode(format!("{username}:{password}"));
            headers.insert(AUTHORIZATION, header_value(&format!("Basic {credentials}"))?);

            // Auth-level scope wins over client-level scope
            if let Some(ns) = namespace.as_deref().filter(|ns| !ns.is_empty()) {
                headers.insert(ns_header, header_value(ns)?);
            }
            if let Some(db) = database.as_deref().filter(|db| !db.is_empty()) {
                headers.insert(db_header, header_value(db)?);
            }
        }
        Some(AuthState::Token { token }) => {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        }
        Some(AuthState::Scope {
            scope,
            username,
            password,
            namespace,
            database,
        }) => {
            headers.insert(header_name("SC")?, header_value(scope)?);
            headers.insert(header_name("username")?, header_value(username)?);
            headers.insert(header_name("password")?, header_value(password)?);
            let ns = namespace.as_deref().unwrap_or_default();
            let db = database.as_deref().unwrap_or_default();
            headers.insert(header_name("namespace")?, header_value(ns)?);
            headers.insert(header_name("database")?, header_value(db)?);
        }
        None => {}
    }

    Ok(headers)
}

/// Convert query variables into URL parameters.
///
/// Null values are skipped, strings are sent bare, anything else as JSON
/// text. Pairs are sorted by key.
pub(crate) fn query_params(vars: &HashMap<String, serde_json::Value>) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vars
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect();
    params.sort();
    params
}

/// Decode a completed exchange into the expected shape or a structured error
pub(crate) fn normalize<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if status != StatusCode::OK {
        let error: RequestError = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!("Undecodable error body for status {}: {}", status, e);
            ClientError::Decode(e)
        })?;
        tracing::warn!("Server returned status {}: {}", status, error);
        return Err(ClientError::Server(error));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Failed to decode response body: {}", e);
        ClientError::Decode(e)
    })
}

/// Extract the token from a decoded signin/signup result
pub(crate) fn auth_token(result: AuthResult) -> Result<String> {
    if result.code != i64::from(StatusCode::OK.as_u16()) {
        tracing::warn!("Authentication rejected with code {}", result.code);
        return Err(ClientError::AuthFailure {
            details: result.details,
        });
    }
    result.token.ok_or(ClientError::MissingToken)
}
