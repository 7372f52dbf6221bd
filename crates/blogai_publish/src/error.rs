use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Invalid WordPress URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to post to WordPress: {message}")]
    Rejected { status: u16, message: String },

    #[error("Could not reach WordPress")]
    Network(#[from] reqwest::Error),

    #[error("A post is already being submitted")]
    AlreadyPosting,
}

pub type Result<T> = std::result::Result<T, PublishError>;
