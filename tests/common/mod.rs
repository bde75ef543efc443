#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

pub const TOKEN: &str = "integration-token";

/// A server process backed by the in-memory store, killed on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_show-tracker"))
            .env("SHOWS_API_PORT", port.to_string())
            .env("SHOWS_STORE", "memory")
            .env("APP_WRITE_TOKEN", TOKEN)
            .env("API_ENABLE_REQUEST_LOGGING", "false")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub async fn create_show(server: &TestServer, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
    let mut request = reqwest::Client::new().post(server.url("/shows")).json(&body);
    if let Some(token) = token {
        request = request.header("x-app-token", token);
    }
    let res = request.send().await?;
    Ok((res.status(), res.json().await?))
}

pub async fn delete_show(server: &TestServer, token: Option<&str>, id: &str) -> Result<(StatusCode, Value)> {
    let mut request = reqwest::Client::new()
        .delete(server.url("/shows"))
        .query(&[("id", id)]);
    if let Some(token) = token {
        request = request.header("x-app-token", token);
    }
    let res = request.send().await?;
    Ok((res.status(), res.json().await?))
}

pub async fn list_shows(server: &TestServer, year: i32) -> Result<Vec<Value>> {
    let res = reqwest::Client::new()
        .get(server.url("/shows"))
        .query(&[("year", year)])
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "list failed with {}", res.status());

    let body = res.json::<Value>().await?;
    body.get("data")
        .and_then(|d| d.as_array())
        .cloned()
        .with_context(|| format!("data should be an array: {}", body))
}
