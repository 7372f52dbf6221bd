pub mod catalog;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod filter;
pub mod preferences;
pub mod source;
pub mod types;

pub use catalog::FilterCatalog;
pub use dashboard::{article_key, Dashboard};
pub use domain::{extract_domain, extract_domains, UNKNOWN_DOMAIN};
pub use error::{Error, Result};
pub use filter::{DomainSelection, FilterCategory, FilterState};
pub use preferences::{PreferenceStore, UiPreferences};
pub use source::ArticleSource;
pub use types::{decode_articles, Article, ArticleBody, StructureType};

pub mod prelude {
    pub use crate::{Article, ArticleBody, ArticleSource, Dashboard, Error, FilterCategory, FilterState, Result};
}
