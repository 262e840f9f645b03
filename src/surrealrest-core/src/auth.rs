use serde::{Deserialize, Serialize};

/// Authentication attached to every request a client sends.
///
/// Exactly one scheme is active; setting a new state replaces the old one.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum AuthState {
    /// HTTP Basic credentials. Non-empty `namespace`/`database` replace the
    /// client-level scope headers.
    Root {
        username: String,
        password: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        database: Option<String>,
    },
    /// Pre-issued bearer token, typically returned by signin/signup
    Token { token: String },
    /// Credentials scoped to a named access method. Sent as `SC` plus one
    /// header per credential field; an unset namespace or database goes out
    /// as an empty header.
    Scope {
        scope: String,
        username: String,
        password: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        database: Option<String>,
    },
}

impl AuthState {
    pub fn root(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthState::Root {
            username: username.into(),
            password: password.into(),
            namespace: None,
            database: None,
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        AuthState::Token {
            token: token.into(),
        }
    }

    pub fn scope(
        scope: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        AuthState::Scope {
            scope: scope.into(),
            username: username.into(),
            password: password.into(),
            namespace: None,
            database: None,
        }
    }

    /// Attach a namespace to Root or Scope credentials. No effect on tokens.
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        match &mut self {
            AuthState::Root { namespace, .. } | AuthState::Scope { namespace, .. } => {
                *namespace = Some(ns.into())
            }
            AuthState::Token { .. } => {}
        }
        self
    }

    /// Attach a database to Root or Scope credentials. No effect on tokens.
    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        match &mut self {
            AuthState::Root { database, .. } | AuthState::Scope { database, .. } => {
                *database = Some(db.into())
            }
            AuthState::Token { .. } => {}
        }
        self
    }

    pub fn method(&self) -> &'static str {
        match self {
            AuthState::Root { .. } => "Root",
            AuthState::Token { .. } => "Token",
            AuthState::Scope { .. } => "Scope",
        }
    }
}

// Credentials never reach log output.
impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthState::Root {
                username,
                namespace,
                database,
                ..
            } => f
                .debug_struct("Root")
                .field("username", username)
                .field("password", &"<redacted>")
                .field("namespace", namespace)
                .field("database", database)
                .finish(),
            AuthState::Token { .. } => f
                .debug_struct("Token")
                .field("token", &"<redacted>")
                .finish(),
            AuthState::Scope {
                scope,
                username,
                namespace,
                database,
                ..
            } => f
                .debug_struct("Scope")
                .field("scope", scope)
                .field("username", username)
                .field("password", &"<redacted>")
                .field("namespace", namespace)
                .field("database", database)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_deserialization() {
        let root: AuthState = serde_json::from_str(
            r#"{"method": "Root", "username": "root", "password": "pw", "namespace": "ops"}"#,
        )
        .unwrap();
        assert_eq!(root, AuthState::root("root", "pw").with_namespace("ops"));

        let scope: AuthState = serde_json::from_str(
            r#"{"method": "Scope", "scope": "user", "username": "a", "password": "b"}"#,
        )
        .unwrap();
        assert_eq!(scope.method(), "Scope");
    }

    #[test]
    fn test_token_ignores_scope_overrides() {
        let auth = AuthState::token("t").with_namespace("ns").with_database("db");
        assert_eq!(auth, AuthState::token("t"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", AuthState::root("root", "hunter2"));
        assert!(rendered.contains("root"));
        assert!(!rendered.contains("hunter2"));

        let rendered = format!("{:?}", AuthState::token("eyJsecret"));
        assert!(!rendered.contains("eyJsecret"));
    }
}
