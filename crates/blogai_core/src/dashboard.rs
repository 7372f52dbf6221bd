use crate::domain::extract_domains;
use crate::filter::FilterState;
use crate::source::ArticleSource;
use crate::types::Article;

/// State owner of one dashboard page: the loaded articles, the domains
/// derived from them and the active filters.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    articles: Vec<Article>,
    domains: Vec<String>,
    filters: FilterState,
}

impl Dashboard {
    pub fn new(articles: Vec<Article>) -> Self {
        let mut dashboard = Self::default();
        dashboard.set_articles(articles);
        dashboard
    }

    /// Replaces the collection and recomputes the selectable domains.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.domains = extract_domains(&articles);
        self.articles = articles;
    }

    /// Loads the collection from `source`. On failure the collection is
    /// emptied and the returned message is meant for the user.
    pub async fn refresh(&mut self, source: &dyn ArticleSource) -> Option<String> {
        match source.list_articles().await {
            Ok(articles) => {
                tracing::info!("Loaded {} articles from {}", articles.len(), source.name());
                self.set_articles(articles);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load articles from {}: {}", source.name(), e);
                self.set_articles(Vec::new());
                Some(format!("Could not load articles: {}", e))
            }
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Articles passing the current filters, in collection order.
    pub fn visible_articles(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| self.filters.matches(article))
            .collect()
    }

    /// Looks an article up by key. `@n` always names the article at
    /// zero-based position `n`; any other key is matched against ids first
    /// and then read as a position.
    pub fn find(&self, key: &str) -> Option<&Article> {
        if let Some(index) = index_key(key) {
            return self.articles.get(index);
        }
        self.articles
            .iter()
            .find(|article| article.id.as_deref() == Some(key))
            .or_else(|| key.parse::<usize>().ok().and_then(|index| self.articles.get(index)))
    }
}

/// The key that [`Dashboard::find`] resolves back to `article`: its id, or
/// `@index` when it has none.
pub fn article_key(index: usize, article: &Article) -> String {
    article
        .id
        .clone()
        .unwrap_or_else(|| format!("@{}", index))
}

/// Position named by an `@n` key.
pub fn index_key(key: &str) -> Option<usize> {
    key.strip_prefix('@')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCategory;
    use crate::{Error, Result};
    use async_trait::async_trait;

    fn article(id: &str, link: Option<&str>, keywords: &[&str]) -> Article {
        Article {
            id: Some(id.to_string()),
            title: format!("Article {}", id),
            link: link.map(str::to_string),
            key_words: keywords.iter().map(|k| k.to_string()).collect(),
            ..Article::default()
        }
    }

    fn sample() -> Dashboard {
        Dashboard::new(vec![
            article("1", Some("https://www.a.com/x"), &["AI"]),
            article("2", Some("https://b.org/y"), &["Data Science"]),
            article("3", Some("not a url"), &["ai"]),
            article("4", None, &[]),
        ])
    }

    struct FailingSource;

    #[async_trait]
    impl ArticleSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn list_articles(&self) -> Result<Vec<Article>> {
            Err(Error::Source("connection refused".to_string()))
        }

        async fn get_article(&self, _id: &str) -> Result<Option<Article>> {
            Ok(None)
        }
    }

    #[test]
    fn test_domains_follow_collection() {
        let mut dashboard = sample();
        assert_eq!(dashboard.domains(), ["a.com".to_string(), "b.org".to_string()]);

        dashboard.set_articles(vec![article("9", Some("https://c.net"), &[])]);
        assert_eq!(dashboard.domains(), ["c.net".to_string()]);
    }

    #[test]
    fn test_domain_filter() {
        let mut dashboard = sample();
        assert_eq!(dashboard.visible_articles().len(), 4);

        dashboard.filters_mut().set_domain("a.com");
        let visible: Vec<_> = dashboard.visible_articles().iter().map(|a| a.title.clone()).collect();
        assert_eq!(visible, vec!["Article 1"]);

        dashboard.filters_mut().set_domain("nowhere.test");
        assert!(dashboard.visible_articles().is_empty());

        dashboard.filters_mut().set_domain("unknown");
        assert!(dashboard.visible_articles().is_empty());
    }

    #[test]
    fn test_keyword_filter_is_case_insensitive() {
        let mut dashboard = sample();
        dashboard.filters_mut().toggle(FilterCategory::Keywords, "AI");
        let ids: Vec<_> = dashboard
            .visible_articles()
            .iter()
            .filter_map(|a| a.id.clone())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        dashboard.filters_mut().clear_all();
        assert_eq!(dashboard.visible_articles().len(), 4);
    }

    #[test]
    fn test_find_by_id_or_index() {
        let dashboard = sample();
        assert_eq!(dashboard.find("2").and_then(|a| a.id.as_deref()), Some("2"));
        assert_eq!(dashboard.find("0").and_then(|a| a.id.as_deref()), Some("1"));
        assert!(dashboard.find("42").is_none());
        assert!(dashboard.find("missing").is_none());
    }

    #[test]
    fn test_index_keys_do_not_collide_with_numeric_ids() {
        let untitled = Article {
            title: "No id".to_string(),
            ..Article::default()
        };
        let dashboard = Dashboard::new(vec![untitled.clone(), article("0", None, &[])]);

        let key = article_key(0, &dashboard.articles()[0]);
        assert_eq!(key, "@0");
        assert_eq!(dashboard.find(&key), Some(&untitled));
        assert_eq!(dashboard.find("0").and_then(|a| a.id.as_deref()), Some("0"));
        assert_eq!(article_key(1, &dashboard.articles()[1]), "0");
        assert!(dashboard.find("@7").is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_falls_back_to_empty() {
        let mut dashboard = sample();
        let notice = dashboard.refresh(&FailingSource).await;

        assert!(notice.unwrap().contains("connection refused"));
        assert!(dashboard.articles().is_empty());
        assert!(dashboard.domains().is_empty());
    }
}
