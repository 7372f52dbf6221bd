//! Article rendering.
//!
//! Every article body variant has exactly one rendering branch, chosen by an
//! exhaustive match on [`ArticleBody`]. Bodies whose `structure_type` is not
//! recognised render [`FALLBACK_MESSAGE`] instead of failing the page.

use blogai_core::types::{
    ComparisonBody, Image, InterviewBody, ListicleBody, NewsUpdateBody, OpinionBody, ReviewBody,
    Section, SectionedBody, TutorialBody,
};
use blogai_core::{Article, ArticleBody};

use crate::html::{escape, escape_attr};
use crate::policy::RenderPolicy;

pub const FALLBACK_MESSAGE: &str = "Content not available for this blog type.";

/// Trait defining article rendering operations.
pub trait ArticleRenderer {
    /// Variant-specific part of the article.
    fn render_body(&self, body: &ArticleBody) -> String;

    /// Full article: title, lead image, summary, tags, introduction and body.
    fn render_article(&self, article: &Article) -> String;
}

/// Renders articles as HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    policy: RenderPolicy,
}

impl HtmlRenderer {
    pub fn new(policy: RenderPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Compact card for list views: the first `tag_limit` tags are shown,
    /// the rest are counted.
    pub fn render_card(&self, article: &Article, tag_limit: usize) -> String {
        let mut out = String::from("<div class=\"card\">\n");
        if let Some(path) = article.image_path() {
            let alt = article
                .main_image
                .as_ref()
                .map(|image| image.alt_text.as_str())
                .unwrap_or(article.title.as_str());
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">\n",
                escape_attr(path),
                escape_attr(alt)
            ));
        }
        out.push_str(&format!("<h3>{}</h3>\n", escape(&article.title)));
        out.push_str(&format!("<p class=\"summary\">{}</p>\n", escape(&article.summary)));

        let tags = RenderPolicy::preview(tag_limit).take(&article.tags);
        if !article.tags.is_empty() {
            out.push_str("<div class=\"tags\">");
            for tag in tags.shown {
                out.push_str(&format!("<span class=\"tag\">{}</span>", escape(tag)));
            }
            if tags.remaining > 0 {
                out.push_str(&format!("<span class=\"more\">+{} more</span>", tags.remaining));
            }
            out.push_str("</div>\n");
        }

        out.push_str(&format!(
            "<p class=\"type\">Type: {}</p>\n",
            escape(article.body.type_name().unwrap_or("unknown"))
        ));
        out.push_str("</div>\n");
        out
    }

    fn figure(image: &Image) -> String {
        let mut out = format!(
            "<figure><img src=\"{}\" alt=\"{}\">",
            escape_attr(&image.path),
            escape_attr(&image.alt_text)
        );
        if !image.caption.is_empty() {
            out.push_str(&format!("<figcaption>{}</figcaption>", escape(&image.caption)));
        }
        out.push_str("</figure>\n");
        out
    }

    fn more(remaining: usize, noun: &str) -> String {
        if remaining == 0 {
            return String::new();
        }
        format!("<p class=\"more\">...and {} more {}</p>\n", remaining, noun)
    }

    fn conclusion(conclusion: Option<&str>) -> String {
        match conclusion.filter(|text| !text.is_empty()) {
            Some(text) => format!("<p class=\"conclusion\">{}</p>\n", escape(text)),
            None => String::new(),
        }
    }

    fn string_list(&self, heading: &str, class: &str, items: &[String]) -> String {
        let items = self.policy.take(items);
        let mut out = format!("<h3>{}</h3>\n<ul class=\"{}\">\n", heading, class);
        for item in items.shown {
            out.push_str(&format!("<li>{}</li>\n", escape(item)));
        }
        out.push_str("</ul>\n");
        out.push_str(&Self::more(items.remaining, &heading.to_lowercase()));
        out
    }

    fn sections(&self, sections: &[Section]) -> String {
        let sections = self.policy.take(sections);
        let mut out = String::new();
        for section in sections.shown {
            out.push_str("<div class=\"section\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", escape(&section.title)));
            if let Some(image) = &section.image {
                out.push_str(&Self::figure(image));
            }
            out.push_str(&format!("<p>{}</p>\n", escape(&section.content)));
            out.push_str("</div>\n");
        }
        out.push_str(&Self::more(sections.remaining, "sections"));
        out
    }

    fn tutorial(&self, body: &TutorialBody) -> String {
        let steps = self.policy.take(&body.steps);
        let mut out = String::from("<h2>Steps</h2>\n");
        for step in steps.shown {
            out.push_str("<div class=\"step\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", escape(&step.title)));
            out.push_str(&format!("<p>{}</p>\n", escape(&step.instruction)));
            if let Some(image) = &step.image {
                out.push_str(&Self::figure(image));
            }
            out.push_str("</div>\n");
        }
        out.push_str(&Self::more(steps.remaining, "steps"));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }

    fn comparison(&self, body: &ComparisonBody) -> String {
        let points = self.policy.take(&body.comparison_points);
        let mut out = String::from("<h2>Comparison Points</h2>\n");
        for point in points.shown {
            out.push_str("<div class=\"comparison-point\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", escape(&point.feature)));
            for side in &point.sides {
                out.push_str(&format!(
                    "<p><strong>{}:</strong> {}</p>\n",
                    escape(&side_label(&side.label)),
                    escape(&side.value)
                ));
            }
            out.push_str("</div>\n");
        }
        out.push_str(&Self::more(points.remaining, "points"));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }

    fn review(&self, body: &ReviewBody) -> String {
        let mut out = String::from("<h2>Review</h2>\n");
        out.push_str(&self.sections(&body.sections));
        out.push_str(&self.string_list("Pros", "pros", &body.pros));
        out.push_str(&self.string_list("Cons", "cons", &body.cons));
        if !body.verdict.is_empty() {
            out.push_str(&format!(
                "<p class=\"verdict\"><strong>Verdict:</strong> {}</p>\n",
                escape(&body.verdict)
            ));
        }
        out
    }

    fn sectioned(&self, heading: &str, body: &SectionedBody) -> String {
        let mut out = format!("<h2>{}</h2>\n", heading);
        out.push_str(&self.sections(&body.sections));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }

    fn opinion(&self, body: &OpinionBody) -> String {
        let paragraphs = self.policy.take(&body.body.paragraphs);
        let mut out = String::from("<h2>Opinion</h2>\n");
        for paragraph in paragraphs.shown {
            out.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
        }
        out.push_str(&Self::more(paragraphs.remaining, "paragraphs"));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }

    fn news_update(&self, body: &NewsUpdateBody) -> String {
        let details = self.policy.take(&body.details);
        let mut out = String::from("<h2>Details</h2>\n");
        for detail in details.shown {
            out.push_str("<div class=\"detail\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", escape(&detail.title)));
            if let Some(image) = &detail.image {
                out.push_str(&Self::figure(image));
            }
            out.push_str(&format!("<p>{}</p>\n", escape(&detail.description)));
            out.push_str("</div>\n");
        }
        out.push_str(&Self::more(details.remaining, "details"));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }

    fn listicle(&self, body: &ListicleBody) -> String {
        let items = self.policy.take(&body.list_items);
        let mut out = String::from("<h2>The List</h2>\n<ol class=\"listicle\">\n");
        for item in items.shown {
            out.push_str(&format!("<li value=\"{}\">\n", item.rank));
            out.push_str(&format!("<h3>{}</h3>\n", escape(&item.title)));
            if let Some(image) = &item.image {
                out.push_str(&Self::figure(image));
            }
            out.push_str(&format!("<p>{}</p>\n", escape(&item.description)));
            out.push_str("</li>\n");
        }
        out.push_str("</ol>\n");
        out.push_str(&Self::more(items.remaining, "items"));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }

    fn interview(&self, body: &InterviewBody) -> String {
        let pairs = self.policy.take(&body.questions_and_answers);
        let mut out = String::from("<h2>Interview</h2>\n");
        for pair in pairs.shown {
            out.push_str("<div class=\"qa\">\n");
            out.push_str(&format!(
                "<p class=\"question\"><strong>Q:</strong> {}</p>\n",
                escape(&pair.question)
            ));
            out.push_str(&format!(
                "<p class=\"answer\"><strong>A:</strong> {}</p>\n",
                escape(&pair.answer)
            ));
            out.push_str("</div>\n");
        }
        out.push_str(&Self::more(pairs.remaining, "questions"));
        out.push_str(&Self::conclusion(body.conclusion.as_deref()));
        out
    }
}

impl ArticleRenderer for HtmlRenderer {
    fn render_body(&self, body: &ArticleBody) -> String {
        let inner = match body {
            ArticleBody::Tutorial(body) => self.tutorial(body),
            ArticleBody::Comparison(body) => self.comparison(body),
            ArticleBody::Review(body) => self.review(body),
            ArticleBody::CaseStudy(body) => self.sectioned("Case Study", body),
            ArticleBody::IndustryAnalysis(body) => self.sectioned("Industry Analysis", body),
            ArticleBody::Opinion(body) => self.opinion(body),
            ArticleBody::NewsUpdate(body) => self.news_update(body),
            ArticleBody::Listicle(body) => self.listicle(body),
            ArticleBody::Interview(body) => self.interview(body),
            ArticleBody::Unsupported { structure_type } => {
                tracing::debug!("No layout for structure type {:?}", structure_type);
                return format!("<p class=\"fallback\">{}</p>\n", FALLBACK_MESSAGE);
            }
        };

        // Known variants always carry their discriminant.
        let kind = body.type_name().unwrap_or_default();
        format!("<section class=\"body {}\">\n{}</section>\n", kind, inner)
    }

    fn render_article(&self, article: &Article) -> String {
        let mut out = String::from("<article class=\"blog\">\n");
        out.push_str(&format!("<h1>{}</h1>\n", escape(&article.title)));

        match (&article.main_image, article.image_path()) {
            (Some(image), _) => out.push_str(&Self::figure(image)),
            (None, Some(path)) => out.push_str(&format!(
                "<figure><img src=\"{}\" alt=\"{}\"></figure>\n",
                escape_attr(path),
                escape_attr(&article.title)
            )),
            (None, None) => {}
        }

        if !article.summary.is_empty() {
            out.push_str(&format!("<p class=\"summary\">{}</p>\n", escape(&article.summary)));
        }

        if !article.tags.is_empty() {
            out.push_str("<div class=\"tags\">");
            for tag in &article.tags {
                out.push_str(&format!("<span class=\"tag\">{}</span>", escape(tag)));
            }
            out.push_str("</div>\n");
        }

        if let Some(introduction) = &article.introduction {
            out.push_str(&format!(
                "<p class=\"introduction\">{}</p>\n",
                escape(&introduction.text)
            ));
        }

        out.push_str(&self.render_body(&article.body));
        out.push_str("</article>\n");
        out
    }
}

/// Human label for a comparison side key, e.g. `mirrorless` -> `Mirrorless`.
fn side_label(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
