use async_trait::async_trait;
use blogai_core::{decode_articles, Article, ArticleSource, Result};
use std::sync::Arc;

const BUNDLED_ARTICLES: &str = include_str!("../../data/articles.json");

/// In-memory article collection, seeded from the bundled data set or a
/// caller supplied vector.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    articles: Arc<Vec<Article>>,
}

impl StaticSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: Arc::new(articles),
        }
    }

    /// The sample collection compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let records: Vec<serde_json::Value> = serde_json::from_str(BUNDLED_ARTICLES)?;
        Ok(Self::new(decode_articles(records)))
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.to_vec())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.articles.iter().find(|a| a.id.as_deref() == Some(id)).cloned())
    }
}
