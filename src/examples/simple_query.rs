//! Simple Query Example
//!
//! Runs a SurrealQL statement against a local server using root credentials.
//!
//! Run with: cargo run --example simple_query

use std::collections::HashMap;
use surrealrest_rs::{AuthState, Client, ClientConfig, ProtocolVersion};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("surrealrest_rs=debug")
        .init();

    // Load configuration, falling back to a local instance
    let config = ClientConfig::load("config.json").unwrap_or_else(|_| {
        tracing::warn!("Failed to load config.json, using defaults");
        ClientConfig::new("http://localhost:8000", "test", "test")
            .with_version(ProtocolVersion::Current)
            .with_auth(AuthState::root("root", "root"))
    });

    let client = Client::new(config)?;
    println!("Connected to {}\n", client.config().url);

    let mut vars = HashMap::new();
    vars.insert("name".to_string(), serde_json::json!("Tobie"));

    let results = match client
        .query("CREATE person SET name = $name; SELECT * FROM person;", &vars)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            let record = e.request_error();
            anyhow::bail!("{} ({}): {}", record.details, record.code, record.information);
        }
    };

    for (i, result) in results.iter().enumerate() {
        println!("{}. [{:?} in {}] {}", i + 1, result.status, result.time, result.result);
    }

    Ok(())
}
