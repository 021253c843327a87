//! Integration tests for the konto account service.
//!
//! This suite exercises the `konto` binary end to end by:
//! 1. Resetting the schema on the database named by `KONTO_TEST_DSN`.
//! 2. Spawning the actual `konto` binary as a supervised child process.
//! 3. Driving the account lifecycle over real HTTP requests.
//!
//! The test is skipped when `KONTO_TEST_DSN` is not set.

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::{Connection, PgConnection};
use std::{
    env,
    net::TcpListener,
    process::{Child, Command, Stdio},
    time::Duration,
};
use tokio::time::sleep;

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/db/sql/schema.sql"));

struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn pick_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind a local port")?;
    Ok(listener
        .local_addr()
        .context("Failed to read local port")?
        .port())
}

async fn reset_schema(dsn: &str) -> Result<()> {
    let mut conn = PgConnection::connect(dsn)
        .await
        .context("Failed to connect to the test database")?;

    sqlx::query("DROP TABLE IF EXISTS accounts")
        .execute(&mut conn)
        .await?;
    sqlx::query("DROP TYPE IF EXISTS account_status")
        .execute(&mut conn)
        .await?;

    for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement)
            .execute(&mut conn)
            .await
            .with_context(|| format!("Failed to execute schema statement: {statement}"))?;
    }

    Ok(())
}

async fn wait_for_ready(client: &reqwest::Client, base: &str) -> Result<()> {
    for _ in 0..40 {
        match client.get(format!("{base}/health")).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => sleep(Duration::from_millis(250)).await,
        }
    }
    bail!("konto did not become ready at {base}");
}

#[tokio::test]
async fn server_serves_the_account_lifecycle() -> Result<()> {
    let Ok(dsn) = env::var("KONTO_TEST_DSN") else {
        eprintln!("Skipping integration test: KONTO_TEST_DSN is not set");
        return Ok(());
    };

    reset_schema(&dsn).await?;

    let port = pick_port()?;
    let base = format!("http://127.0.0.1:{port}");

    // Spawn binary
    let mut command = Command::new(env!("CARGO_BIN_EXE_konto"));
    command.env("KONTO_LOG_LEVEL", "debug");
    // Clear conflicting env vars that might leak from the host
    command.env_remove("KONTO_PORT");
    command.env_remove("KONTO_DSN");
    command.env_remove("KONTO_TOKEN_SECRET");

    let _child = ChildGuard(
        command
            .args([
                "--port",
                &port.to_string(),
                "--dsn",
                &dsn,
                "--token-secret",
                "integration-secret",
            ])
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("Failed to spawn konto binary")?,
    );

    let client = reqwest::Client::builder()
        .user_agent(konto::konto::APP_USER_AGENT)
        .build()?;

    wait_for_ready(&client, &base).await?;

    // A fresh registration lands pending
    let resp = client
        .post(format!("{base}/register"))
        .json(&json!({"username": "alice", "password": "hunter2open"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["status"], "pending");

    // Pending accounts cannot log in
    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({"username": "alice", "password": "hunter2open"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await?;
    assert_eq!(
        body["message"],
        "Your account is pending approval. Please wait for admin approval."
    );

    // The listing exposes ids but never password hashes
    let resp = client.get(format!("{base}/getusers")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Value = resp.json().await?;
    let alice = users
        .as_array()
        .and_then(|users| users.iter().find(|user| user["username"] == "alice"))
        .context("alice missing from /getusers")?;
    assert_eq!(alice["status"], "pending");
    assert!(alice.get("password_hash").is_none());
    let user_id = alice["id"].as_str().context("missing id")?.to_string();

    // Activate the account
    let resp = client
        .put(format!("{base}/updateStatus"))
        .json(&json!({"userId": user_id, "status": "active"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "User status updated successfully");

    // Active accounts get a token
    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({"username": "alice", "password": "hunter2open"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().context("missing token")?.to_string();

    // The profile requires the bearer token
    let resp = client.get(format!("{base}/getuser")).send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{base}/getuser"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["id"].as_str(), Some(user_id.as_str()));
    assert!(body.get("password_hash").is_none());

    // Changing the password needs the current one
    let resp = client
        .put(format!("{base}/updateuser"))
        .bearer_auth(&token)
        .json(&json!({"oldPassword": "wrong", "password": "n3w-password"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Old password is incorrect.");

    let resp = client
        .put(format!("{base}/updateuser"))
        .bearer_auth(&token)
        .json(&json!({"oldPassword": "hunter2open", "password": "hunter2open"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(
        body["message"],
        "New password cannot be the same as the old password."
    );

    let resp = client
        .put(format!("{base}/updateuser"))
        .bearer_auth(&token)
        .json(&json!({"oldPassword": "hunter2open", "password": "n3w-password"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "User updated successfully");

    // The old password stops working, the new one logs in
    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({"username": "alice", "password": "hunter2open"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{base}/login"))
        .json(&json!({"username": "alice", "password": "n3w-password"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // Duplicate usernames are rejected
    let resp = client
        .post(format!("{base}/register"))
        .json(&json!({"username": "alice", "password": "whatever123"}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Username already in use");

    Ok(())
}
