use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::auth::WRITE_TOKEN_HEADER;
use crate::database::models::Show;

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    data: Vec<Show>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// HTTP client for the show endpoints
pub struct ShowsClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ShowsClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", base_url, e))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("Server URL must use http or https: {}", base_url);
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub async fn list(&self, year: i32) -> anyhow::Result<Vec<Show>> {
        let mut url = self.shows_url()?;
        url.query_pairs_mut().append_pair("year", &year.to_string());

        let response = self.http.get(url).send().await?;
        let envelope: DataEnvelope = Self::read_success(response).await?.json().await?;
        Ok(envelope.data)
    }

    pub async fn create(&self, show_date: &str, venue: &str, band: &str) -> anyhow::Result<()> {
        let token = self.require_token()?;

        let response = self
            .http
            .post(self.shows_url()?)
            .header(WRITE_TOKEN_HEADER, token)
            .json(&json!({
                "show_date": show_date,
                "venue": venue,
                "band": band,
            }))
            .send()
            .await?;

        Self::read_success(response).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        let token = self.require_token()?;

        let mut url = self.shows_url()?;
        url.query_pairs_mut().append_pair("id", id);

        let response = self.http.delete(url).header(WRITE_TOKEN_HEADER, token).send().await?;
        Self::read_success(response).await?;
        Ok(())
    }

    fn require_token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No write token saved; run `shows token set <token>` first"))
    }

    fn shows_url(&self) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Server URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .push("shows");
        Ok(url)
    }

    /// Pass 2xx through; otherwise surface the server's `{error}` message verbatim
    async fn read_success(response: Response) -> anyhow::Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        };

        if status == StatusCode::UNAUTHORIZED {
            anyhow::bail!("{} (check the saved write token)", message);
        }
        anyhow::bail!(message)
    }
}
