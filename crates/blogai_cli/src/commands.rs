use anyhow::{anyhow, bail, Result};
use blogai_core::domain::article_domain;
use blogai_core::{article_key, Article, ArticleSource, Dashboard, FilterCatalog, FilterState, PreferenceStore};
use blogai_publish::{Credentials, PostStatus, PublishSession, WordPressClient};
use blogai_render::{ArticleRenderer, HtmlRenderer, RenderPolicy};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const CARD_TAG_LIMIT: usize = 3;

/// Parses a `category=value` filter selection.
pub fn parse_selection(s: &str) -> std::result::Result<(String, String), String> {
    let (category, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid selection '{}', expected category=value", s))?;
    let (category, value) = (category.trim(), value.trim());
    if category.is_empty() || value.is_empty() {
        return Err(format!("invalid selection '{}', expected category=value", s));
    }
    Ok((category.to_string(), value.to_string()))
}

/// Builds a filter state from a domain choice and `category=value` selections.
pub fn build_filters(domain: Option<&str>, selections: &[(String, String)]) -> Result<FilterState> {
    let mut filters = FilterState::new();
    if let Some(domain) = domain {
        filters.set_domain(domain);
    }
    for (category, value) in selections {
        filters.toggle_named(category, value.as_str())?;
    }
    Ok(filters)
}

/// One entry of the article listing.
pub fn listing_line(key: &str, article: &Article) -> String {
    let domain = article_domain(article).unwrap_or_else(|| "no link".to_string());
    let kind = article.body.type_name().unwrap_or("feed");
    let date = article
        .published_at()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "undated".to_string());
    format!("[{}] {}\n      {} | {} | {}", key, article.title, domain, kind, date)
}

async fn load(source: &dyn ArticleSource) -> Dashboard {
    let mut dashboard = Dashboard::default();
    if let Some(notice) = dashboard.refresh(source).await {
        eprintln!("{}", notice);
    }
    dashboard
}

async fn find(source: &dyn ArticleSource, key: &str) -> Result<Article> {
    let dashboard = Dashboard::new(source.list_articles().await?);
    dashboard
        .find(key)
        .cloned()
        .ok_or_else(|| anyhow!("No article with id or index '{}'", key))
}

pub async fn serve(source: Arc<dyn ArticleSource>, addr: SocketAddr) -> Result<()> {
    blogai_web::serve(addr, blogai_web::AppState::new(source)).await?;
    Ok(())
}

pub async fn domains(source: &dyn ArticleSource) -> Result<()> {
    let dashboard = load(source).await;
    println!("all");
    for domain in dashboard.domains() {
        println!("{}", domain);
    }
    Ok(())
}

pub async fn list(
    source: &dyn ArticleSource,
    domain: Option<&str>,
    selections: &[(String, String)],
) -> Result<()> {
    let mut dashboard = load(source).await;
    *dashboard.filters_mut() = build_filters(domain, selections)?;

    let mut shown = 0;
    for (index, article) in dashboard.articles().iter().enumerate() {
        if !dashboard.filters().matches(article) {
            continue;
        }
        let key = article_key(index, article);
        println!("{}", listing_line(&key, article));
        shown += 1;
    }
    if shown == 0 {
        println!("No blogs available.");
    }
    info!("📋 {} of {} articles shown", shown, dashboard.articles().len());
    Ok(())
}

pub fn filters(selections: &[(String, String)]) -> Result<()> {
    let state = build_filters(None, selections)?;
    let catalog = FilterCatalog::default();

    for (category, options) in catalog.visible_groups(&state) {
        println!("{}", category.label());
        for option in options {
            let mark = if state.is_selected(category, option) { "x" } else { " " };
            println!("  [{}] {}", mark, option);
        }
    }
    Ok(())
}

pub async fn render(
    source: &dyn ArticleSource,
    key: &str,
    preview: Option<usize>,
    card: bool,
) -> Result<()> {
    let article = find(source, key).await?;
    let policy = preview.map(RenderPolicy::preview).unwrap_or_default();
    let renderer = HtmlRenderer::new(policy);

    if card {
        print!("{}", renderer.render_card(&article, CARD_TAG_LIMIT));
    } else {
        print!("{}", renderer.render_article(&article));
    }
    Ok(())
}

pub async fn publish(
    source: &dyn ArticleSource,
    key: &str,
    credentials: Credentials,
    status: PostStatus,
    preview: usize,
) -> Result<()> {
    let article = find(source, key).await?;
    let client = WordPressClient::new(credentials)?.with_preview_limit(preview);
    let session = PublishSession::new(Arc::new(client));

    let notice = session.submit(&article, status).await;
    println!("{}", notice.text);
    if !notice.is_success() {
        bail!("publishing \"{}\" failed", article.title);
    }
    Ok(())
}

pub fn sidebar(path: &Path, toggle: bool) -> Result<()> {
    let mut store = PreferenceStore::open(path)?;
    let expanded = if toggle {
        store.toggle_sidebar()?
    } else {
        store.preferences().sidebar_expanded
    };
    println!("Sidebar: {}", if expanded { "expanded" } else { "collapsed" });
    Ok(())
}
