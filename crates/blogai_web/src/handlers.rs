use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use blogai_core::dashboard::index_key;
use blogai_core::{article_key, Article, Dashboard, DomainSelection, FilterCategory};
use blogai_render::html::{escape, escape_attr};
use blogai_render::ArticleRenderer;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Blog not found";
const CARD_TAG_LIMIT: usize = 3;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub domain: Option<String>,
    pub keyword: Option<String>,
}

fn upstream_failure(e: blogai_core::Error) -> Response {
    tracing::warn!("Article source failed: {}", e);
    (StatusCode::BAD_GATEWAY, Json(json!({ "message": e.to_string() }))).into_response()
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    ))
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> Response {
    match state.source.list_articles().await {
        Ok(articles) => {
            tracing::info!("Served {} articles", articles.len());
            Json(articles).into_response()
        }
        Err(e) => upstream_failure(e),
    }
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.source.get_article(&id).await {
        Ok(Some(article)) => {
            tracing::info!("Served article {}", id);
            Json(article).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": NOT_FOUND_MESSAGE })),
        )
            .into_response(),
        Err(e) => upstream_failure(e),
    }
}

/// Resolves a card key: `@n` by position only, anything else by id and
/// then, when numeric, by position.
async fn find_article(state: &AppState, key: &str) -> blogai_core::Result<Option<Article>> {
    if index_key(key).is_none() {
        if let Some(article) = state.source.get_article(key).await? {
            return Ok(Some(article));
        }
        if key.parse::<usize>().is_err() {
            return Ok(None);
        }
    }
    let dashboard = Dashboard::new(state.source.list_articles().await?);
    Ok(dashboard.find(key).cloned())
}

pub async fn blog_page(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match find_article(&state, &id).await {
        Ok(Some(article)) => {
            let body = format!(
                "<p><a href=\"/\">Back to dashboard</a></p>\n{}",
                state.renderer.render_article(&article)
            );
            page(&article.title, &body).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response(),
        Err(e) => upstream_failure(e),
    }
}

/// Card grid of the collection with domain and keyword filters applied.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let mut dashboard = Dashboard::default();
    let notice = dashboard.refresh(state.source.as_ref()).await;

    if let Some(domain) = query.domain.filter(|d| !d.is_empty()) {
        dashboard.filters_mut().set_domain(domain);
    }
    if let Some(keyword) = query.keyword.filter(|k| !k.is_empty()) {
        dashboard.filters_mut().toggle(FilterCategory::Keywords, keyword);
    }

    let mut body = String::from("<h1>Dashboard</h1>\n");
    if let Some(notice) = notice {
        body.push_str(&format!("<p class=\"notice\">{}</p>\n", escape(&notice)));
    }

    body.push_str("<form method=\"get\" action=\"/\">\n<select name=\"domain\">\n");
    let selected = dashboard.filters().domain().clone();
    body.push_str(&format!(
        "<option value=\"{}\"{}>All</option>\n",
        DomainSelection::ALL,
        if selected == DomainSelection::All { " selected" } else { "" }
    ));
    for domain in dashboard.domains() {
        let is_selected = selected == DomainSelection::Only(domain.clone());
        body.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_attr(domain),
            if is_selected { " selected" } else { "" },
            escape(domain)
        ));
    }
    body.push_str("</select>\n<button type=\"submit\">Filter</button>\n</form>\n");

    if dashboard.visible_articles().is_empty() {
        body.push_str("<p>No blogs available.</p>\n");
    }
    for (index, article) in dashboard.articles().iter().enumerate() {
        if !dashboard.filters().matches(article) {
            continue;
        }
        let key = article_key(index, article);
        body.push_str(&format!("<a href=\"/blog/{}\">\n", escape_attr(&key)));
        body.push_str(&state.renderer.render_card(article, CARD_TAG_LIMIT));
        body.push_str("</a>\n");
    }

    page("Dashboard", &body)
}
