use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::ProtocolVersion;

/// Outcome of one statement in a `/sql` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub result: serde_json::Value,
    pub status: QueryStatus,
    #[serde(default)]
    pub time: String,
}

/// Per-statement status reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERR")]
    Err,
}

impl QueryResult {
    pub fn is_ok(&self) -> bool {
        self.status == QueryStatus::Ok
    }

    /// Deserialize the statement result into a concrete type
    pub fn take<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.result)
    }
}

/// Normalized failure record.
///
/// Either decoded from a non-200 server response or synthesized locally
/// with `code = 500`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code} {details}: {information}")]
pub struct RequestError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub information: String,
}

pub const GENERIC_DETAILS: &str = "Request problems detected";
pub const GENERIC_DESCRIPTION: &str =
    "There is a problem with your request. Refer to the documentation for further information.";

impl RequestError {
    /// A locally synthesized error carrying `information` as its cause
    pub fn local(information: impl Into<String>) -> Self {
        Self {
            code: 500,
            details: GENERIC_DETAILS.to_string(),
            description: GENERIC_DESCRIPTION.to_string(),
            information: information.into(),
        }
    }
}

/// Body returned by `/signin` and `/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Payload for `/signin`. Absent fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SigninVars {
    pub ns: Option<String>,
    pub db: Option<String>,
    /// Access method, sent only to current-protocol servers
    pub ac: Option<String>,
    /// Scope, sent only to legacy-protocol servers
    pub sc: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Extra variables, merged last and overwriting named fields on collision
    pub vars: HashMap<String, serde_json::Value>,
}

/// Payload for `/signup`; same shape as signin.
pub type SignupVars = SigninVars;

impl SigninVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ns(mut self, ns: impl Into<String>) -> Self {
        self.ns = Some(ns.into());
        self
    }

    pub fn db(mut self, db: impl Into<String>) -> Self {
        self.db = Some(db.into());
        self
    }

    pub fn ac(mut self, ac: impl Into<String>) -> Self {
        self.ac = Some(ac.into());
        self
    }

    pub fn sc(mut self, sc: impl Into<String>) -> Self {
        self.sc = Some(sc.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Assemble the JSON body for the given protocol version
    pub fn payload(&self, version: ProtocolVersion) -> serde_json::Map<String, serde_json::Value> {
        let mut payload = serde_json::Map::new();

        let named = [
            ("ns", &self.ns),
            ("db", &self.db),
            ("user", &self.user),
            ("pass", &self.pass),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                payload.insert(key.to_string(), value.clone().into());
            }
        }

        match version {
            ProtocolVersion::Current => {
                if let Some(ac) = &self.ac {
                    payload.insert("ac".to_string(), ac.clone().into());
                }
            }
            ProtocolVersion::Legacy => {
                if let Some(sc) = &self.sc {
                    payload.insert("sc".to_string(), sc.clone().into());
                }
            }
        }

        for (key, value) in &self.vars {
            payload.insert(key.clone(), value.clone());
        }

        payload
    }
}
