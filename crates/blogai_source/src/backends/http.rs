use async_trait::async_trait;
use blogai_core::{decode_articles, Article, ArticleSource, Error, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

/// Error body returned by the article service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Article source backed by the REST article service
/// (`GET /article/` and `GET /article/:id`).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                base_url,
                base_url.scheme()
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn upstream_error(url: &Url, response: reqwest::Response) -> Error {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        Error::Source(format!("{} returned {}: {}", url, status.as_u16(), message))
    }
}

#[async_trait]
impl ArticleSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        let url = self.endpoint(&["article", ""])?;
        tracing::debug!("Fetching articles from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(&url, response).await);
        }
        let records: Vec<serde_json::Value> = response.json().await?;
        Ok(decode_articles(records))
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let url = self.endpoint(&["article", id])?;
        tracing::debug!("Fetching article from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(Self::upstream_error(&url, response).await),
        }
    }
}
