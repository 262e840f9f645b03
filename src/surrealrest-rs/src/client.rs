use crate::request::{self, Body};
use crate::{ClientError, Result};
use parking_lot::RwLock;
use reqwest::{Client as HttpClient, Method, Request, StatusCode};
use std::collections::HashMap;
use surrealrest_core::{AuthResult, AuthState, ClientConfig, QueryResult, SigninVars, SignupVars};
use url::Url;

/// SurrealDB REST API Client
///
/// Holds the connection target and the current authentication state. Every
/// operation issues exactly one HTTP request; nothing is retried.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    auth: RwLock<Option<AuthState>>,
    client: HttpClient,
}

impl Client {
    /// Create a new client for the given configuration.
    ///
    /// `config.auth` becomes the initial authentication state.
    pub fn new(mut config: ClientConfig) -> Result<Self> {
        let auth = config.auth.take();

        let mut builder = HttpClient::builder().timeout(config.timeout());
        if config.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::RequestConstruction(e.to_string()))?;

        tracing::debug!(
            "SurrealDB client for {} (version {}, ns={}, db={})",
            config.url,
            config.version,
            config.namespace,
            config.database
        );

        Ok(Self {
            config,
            auth: RwLock::new(auth),
            client,
        })
    }

    /// Connection configuration. Authentication lives in [`Client::auth`].
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the current authentication state
    pub fn auth(&self) -> Option<AuthState> {
        self.auth.read().clone()
    }

    /// Replace the authentication state used by subsequent requests
    pub fn authenticate(&self, auth: AuthState) {
        tracing::info!("Authentication set to {} method", auth.method());
        *self.auth.write() = Some(auth);
    }

    /// Drop authentication; subsequent requests are anonymous
    pub fn invalidate(&self) {
        if self.auth.write().take().is_some() {
            tracing::info!("Authentication invalidated");
        }
    }

    /// Build a fully-headered request for `path` relative to the base URL
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Body,
    ) -> Result<Request> {
        let mut url = Url::parse(&self.config.endpoint(path))
            .map_err(|e| ClientError::RequestConstruction(format!("{}: {}", e, self.config.url)))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let auth = self.auth();
        let headers = request::request_headers(
            self.config.version,
            &self.config.namespace,
            &self.config.database,
            auth.as_ref(),
        )?;
        let body = body.into_bytes()?;

        self.client
            .request(method, url)
            .headers(headers)
            .body(body)
            .build()
            .map_err(|e| ClientError::RequestConstruction(e.to_string()))
    }

    /// Send a request and collect status and body
    async fn execute(&self, request: Request) -> Result<(StatusCode, Vec<u8>)> {
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            ClientError::transport(e)
        })?;

        let status = response.status();
        tracing::debug!("Response status {}", status);

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read response body: {}", e);
            if e.is_timeout() {
                ClientError::Timeout(e)
            } else {
                ClientError::ReadBody(e)
            }
        })?;

        Ok((status, body.to_vec()))
    }

    /// Execute SurrealQL, passing non-null `vars` as URL parameters
    pub async fn query(
        &self,
        sql: &str,
        vars: &HashMap<String, serde_json::Value>,
    ) -> Result<Vec<QueryResult>> {
        let params = request::query_params(vars);
        let req = self.build_request(Method::POST, "sql", &params, Body::Raw(sql.to_string()))?;

        let (status, body) = self.execute(req).await?;
        request::normalize(status, &body)
    }

    /// Sign in and return the issued token
    pub async fn signin(&self, vars: SigninVars) -> Result<String> {
        self.issue_token("signin", &vars).await
    }

    /// Sign up and return the issued token
    pub async fn signup(&self, vars: SignupVars) -> Result<String> {
        self.issue_token("signup", &vars).await
    }

    async fn issue_token(&self, path: &str, vars: &SigninVars) -> Result<String> {
        let payload = vars.payload(self.config.version);
        let req = self.build_request(Method::POST, path, &[], Body::Json(payload))?;

        let (status, body) = self.execute(req).await?;
        let result: AuthResult = request::normalize(status, &body)?;
        request::auth_token(result)
    }

    /// Health check
    pub async fn health(&self) -> Result<()> {
        let req = self.build_request(Method::GET, "health", &[], Body::Empty)?;

        let (status, body) = self.execute(req).await?;
        if status != StatusCode::OK {
            return request::normalize(status, &body);
        }
        Ok(())
    }

    /// Server version string, e.g. `surrealdb-2.0.4`
    pub async fn version(&self) -> Result<String> {
        let req = self.build_request(Method::GET, "version", &[], Body::Empty)?;

        let (status, body) = self.execute(req).await?;
        if status != StatusCode::OK {
            return request::normalize(status, &body);
        }
        Ok(String::from_utf8_lossy(&body).trim().to_string())
    }
}
