pub mod html;
pub mod policy;
pub mod renderer;

pub use policy::{RenderPolicy, Truncated};
pub use renderer::{ArticleRenderer, HtmlRenderer, FALLBACK_MESSAGE};
