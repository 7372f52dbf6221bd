use blogai_core::Article;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{PostStatus, PublishError, Publisher};

pub const SUCCESS_TEXT: &str = "Blog successfully posted to WordPress!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Message shown to the user once a submission finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishNotice {
    pub kind: NoticeKind,
    pub text: String,
}

impl PublishNotice {
    pub fn success() -> Self {
        Self {
            kind: NoticeKind::Success,
            text: SUCCESS_TEXT.to_string(),
        }
    }

    pub fn failure(error: &PublishError) -> Self {
        Self {
            kind: NoticeKind::Failure,
            text: format!("Failed to post blog to WordPress. Error: {}", error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

/// Clears the posting flag however the submission ends.
struct PostingGuard<'a>(&'a AtomicBool);

impl Drop for PostingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Serialises submissions to one publisher: at most one post is in flight.
pub struct PublishSession {
    publisher: Arc<dyn Publisher>,
    posting: AtomicBool,
}

impl PublishSession {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self {
            publisher,
            posting: AtomicBool::new(false),
        }
    }

    pub fn is_posting(&self) -> bool {
        self.posting.load(Ordering::SeqCst)
    }

    pub async fn submit(&self, article: &Article, status: PostStatus) -> PublishNotice {
        if self
            .posting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Ignoring submission of \"{}\", a post is in flight", article.title);
            return PublishNotice::failure(&PublishError::AlreadyPosting);
        }
        let _guard = PostingGuard(&self.posting);

        match self.publisher.publish(article, status).await {
            Ok(post) => {
                tracing::info!(
                    "✅ Posted \"{}\" to {} (id: {:?})",
                    article.title,
                    self.publisher.name(),
                    post.id
                );
                PublishNotice::success()
            }
            Err(e) => {
                tracing::error!("Error posting to {}: {}", self.publisher.name(), e);
                PublishNotice::failure(&e)
            }
        }
    }
}
