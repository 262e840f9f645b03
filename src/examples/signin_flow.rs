//! Signin Flow Example
//!
//! Signs up a record user, then queries with the issued token.
//!
//! Run with: cargo run --example signin_flow

use std::collections::HashMap;
use surrealrest_rs::{AuthState, Client, ClientConfig, SigninVars, SignupVars};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("surrealrest_rs=info")
        .init();

    let client = Client::new(ClientConfig::new("http://localhost:8000", "test", "test"))?;
    client.health().await?;
    println!("Server version: {}", client.version().await?);

    let signup = SignupVars::new()
        .ns("test")
        .db("test")
        .ac("user")
        .var("email", "tobie@surrealdb.com")
        .var("pass", "123456");

    let token = match client.signup(signup).await {
        Ok(token) => token,
        Err(e) => {
            println!("Signup failed ({}), trying signin", e);
            let signin = SigninVars::new()
                .ns("test")
                .db("test")
                .ac("user")
                .var("email", "tobie@surrealdb.com")
                .var("pass", "123456");
            client.signin(signin).await?
        }
    };

    client.authenticate(AuthState::token(token));
    let results = client.query("SELECT * FROM $auth;", &HashMap::new()).await?;
    println!("Authenticated as: {}", results[0].result);

    client.invalidate();
    Ok(())
}
