//! Domain extraction for the domain selector.
//!
//! Links that cannot be parsed degrade to [`UNKNOWN_DOMAIN`] and are left out
//! of the selectable domains. Such articles are only listed under `all`.

use std::collections::HashSet;
use url::Url;

use crate::types::Article;

/// Sentinel produced for links without a parseable hostname.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Hostname of `link` with one leading `www.` removed, or [`UNKNOWN_DOMAIN`].
pub fn extract_domain(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => match url.host_str() {
            Some(host) if !host.is_empty() => host.strip_prefix("www.").unwrap_or(host).to_string(),
            _ => UNKNOWN_DOMAIN.to_string(),
        },
        Err(e) => {
            tracing::debug!("Could not extract domain from {:?}: {}", link, e);
            UNKNOWN_DOMAIN.to_string()
        }
    }
}

/// The selectable domain of an article, if its link yields one.
pub fn article_domain(article: &Article) -> Option<String> {
    let link = article.link.as_deref().filter(|link| !link.is_empty())?;
    let domain = extract_domain(link);
    (domain != UNKNOWN_DOMAIN && !domain.is_empty()).then_some(domain)
}

/// Unique domains of the collection in first-seen order.
pub fn extract_domains<'a, I>(articles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter_map(article_domain)
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}
