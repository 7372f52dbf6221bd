use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch the whole article collection
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Fetch one article by id, `None` when the source does not know it
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;
}
