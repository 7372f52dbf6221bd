use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use blogai_core::Article;
use blogai_render::html::{escape, escape_attr};
use blogai_render::{ArticleRenderer, HtmlRenderer, RenderPolicy};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::{PublishError, Publisher, Result};

pub const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;
const IMAGE_STYLE: &str = "max-width: 100%; height: auto; max-height: 400px; object-fit: cover;";

/// WordPress site address and application credentials.
#[derive(Clone)]
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Publish,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
        }
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "publish" => Ok(PostStatus::Publish),
            other => Err(format!("Invalid post status: {} (expected draft or publish)", other)),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of the create-post request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

/// The created post, as far as WordPress reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublishedPost {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WordPressError {
    message: Option<String>,
}

/// Client for the WordPress REST posts endpoint. Each call makes exactly one
/// request; failures are reported, never retried.
#[derive(Clone)]
pub struct WordPressClient {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
    preview_limit: usize,
}

impl fmt::Debug for WordPressClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPressClient")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("credentials", &self.credentials)
            .field("preview_limit", &self.preview_limit)
            .finish()
    }
}

impl WordPressClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let endpoint = posts_endpoint(&credentials.base_url)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            credentials,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        })
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn build_post(&self, article: &Article, status: PostStatus) -> PostPayload {
        PostPayload {
            title: article.title.clone(),
            content: post_content(article, self.preview_limit),
            status,
        }
    }
}

#[async_trait]
impl Publisher for WordPressClient {
    fn name(&self) -> &str {
        "WordPress"
    }

    async fn publish(&self, article: &Article, status: PostStatus) -> Result<PublishedPost> {
        let payload = self.build_post(article, status);
        tracing::info!("📝 Posting \"{}\" to {} as {}", payload.title, self.endpoint, status);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", self.credentials.basic_auth())
            .json(&payload)
            .send()
            .await?;

        let code = response.status();
        if !code.is_success() {
            let reason = code.canonical_reason().unwrap_or("unexpected response");
            let message = response
                .json::<WordPressError>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| reason.to_string());
            return Err(PublishError::Rejected {
                status: code.as_u16(),
                message,
            });
        }

        Ok(response.json::<PublishedPost>().await.unwrap_or_default())
    }
}

/// `<base>/wp-json/wp/v2/posts`, with any trailing slashes of `base` dropped.
pub fn posts_endpoint(base_url: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}{}", base, POSTS_PATH))
        .map_err(|e| PublishError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(PublishError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

/// Lead image, summary paragraph and a preview of the article body.
pub fn post_content(article: &Article, preview_limit: usize) -> String {
    let mut content = String::new();
    if let Some(path) = article.image_path() {
        let alt = article
            .main_image
            .as_ref()
            .map(|image| image.alt_text.as_str())
            .unwrap_or(article.title.as_str());
        content.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" style=\"{}\">\n",
            escape_attr(path),
            escape_attr(alt),
            IMAGE_STYLE
        ));
    }
    content.push_str(&format!("<p>{}</p>\n", escape(&article.summary)));
    content.push_str(
        &HtmlRenderer::new(RenderPolicy::preview(preview_limit)).render_body(&article.body),
    );
    content
}
