use async_trait::async_trait;
use blogai_core::Article;

pub mod error;
pub mod session;
pub mod wordpress;

pub use error::{PublishError, Result};
pub use session::{NoticeKind, PublishNotice, PublishSession};
pub use wordpress::{Credentials, PostPayload, PostStatus, PublishedPost, WordPressClient};

/// A destination that republishes articles.
#[async_trait]
pub trait Publisher: Send + Sync {
    fn name(&self) -> &str;
    async fn publish(&self, article: &Article, status: PostStatus) -> Result<PublishedPost>;
}
