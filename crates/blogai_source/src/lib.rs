use blogai_core::{ArticleSource, Error, Result};
use std::sync::Arc;

pub mod backends;

pub use backends::*;

pub const DEFAULT_SOURCE_URL: &str = "http://127.0.0.1:8000";

/// Builds the article source named by `kind` (`static` or `http`).
///
/// `url` is only read by the http source and defaults to [`DEFAULT_SOURCE_URL`].
pub fn create_source(kind: &str, url: Option<&str>) -> Result<Arc<dyn ArticleSource>> {
    let source: Arc<dyn ArticleSource> = match kind.trim().to_lowercase().as_str() {
        "static" | "memory" => Arc::new(StaticSource::bundled()?),
        "http" => Arc::new(HttpSource::new(url.unwrap_or(DEFAULT_SOURCE_URL))?),
        other => {
            return Err(Error::Source(format!(
                "Unknown source '{}', expected one of: static, http",
                other
            )))
        }
    };
    tracing::info!("📚 Using {} article source", source.name());
    Ok(source)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_source;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source_kinds() {
        assert_eq!(create_source("static", None).unwrap().name(), "static");
        assert_eq!(create_source("HTTP", Some("http://localhost:9")).unwrap().name(), "http");

        assert!(matches!(create_source("ftp", None), Err(Error::Source(_))));
        assert!(matches!(create_source("http", Some("::nope")), Err(Error::InvalidUrl(_))));
    }
}
