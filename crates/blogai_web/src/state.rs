use blogai_core::ArticleSource;
use blogai_render::HtmlRenderer;
use std::sync::Arc;

pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub renderer: HtmlRenderer,
}

impl AppState {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self {
            source,
            renderer: HtmlRenderer::default(),
        }
    }
}
