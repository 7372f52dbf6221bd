use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserializer};
use serde::ser::{self, SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introduction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// Reads an absent or `null` field as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordField {
    List(Vec<String>),
    Text(String),
}

/// Keywords arrive either as a list or as one comma separated string.
fn keyword_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<KeywordField>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(KeywordField::List(keywords)) => keywords,
        Some(KeywordField::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Discriminant of the article body, as found in the `structure_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureType {
    Tutorial,
    Comparison,
    Review,
    CaseStudy,
    IndustryAnalysis,
    Opinion,
    NewsUpdate,
    Listicle,
    Interview,
}

impl StructureType {
    pub const ALL: [StructureType; 9] = [
        StructureType::Tutorial,
        StructureType::Comparison,
        StructureType::Review,
        StructureType::CaseStudy,
        StructureType::IndustryAnalysis,
        StructureType::Opinion,
        StructureType::NewsUpdate,
        StructureType::Listicle,
        StructureType::Interview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureType::Tutorial => "tutorial",
            StructureType::Comparison => "comparison",
            StructureType::Review => "review",
            StructureType::CaseStudy => "case_study",
            StructureType::IndustryAnalysis => "industry_analysis",
            StructureType::Opinion => "opinion",
            StructureType::NewsUpdate => "news_update",
            StructureType::Listicle => "listicle",
            StructureType::Interview => "interview",
        }
    }
}

impl FromStr for StructureType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StructureType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown structure type: {}", s))
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub step_number: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default)]
    pub instruction: String,
}

/// One labelled value of a comparison point, e.g. `("dslr", "Excellent image quality")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparedSide {
    pub label: String,
    pub value: String,
}

/// A compared feature. Every key other than `feature` is a compared side,
/// kept in the order it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonPoint {
    pub feature: String,
    pub sides: Vec<ComparedSide>,
}

impl Serialize for ComparisonPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sides.len() + 1))?;
        map.serialize_entry("feature", &self.feature)?;
        for side in &self.sides {
            map.serialize_entry(&side.label, &side.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComparisonPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut feature = None;
        let mut sides = Vec::with_capacity(fields.len());

        for (key, value) in fields {
            if key == "feature" {
                match value {
                    Value::String(text) => feature = Some(text),
                    other => {
                        return Err(de::Error::custom(format!(
                            "feature must be a string, got {}",
                            other
                        )))
                    }
                }
                continue;
            }
            let value = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            sides.push(ComparedSide { label: key, value });
        }

        let feature = feature.ok_or_else(|| de::Error::missing_field("feature"))?;
        Ok(Self { feature, sides })
    }
}

/// Titled block with optional figure, shared by reviews, case studies and
/// industry analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDetail {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub rank: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialBody {
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonBody {
    pub comparison_points: Vec<ComparisonPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewBody {
    pub sections: Vec<Section>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub verdict: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionedBody {
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpinionText {
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpinionBody {
    pub body: OpinionText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsUpdateBody {
    pub details: Vec<NewsDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListicleBody {
    pub list_items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewBody {
    pub questions_and_answers: Vec<QuestionAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

/// Variant-specific part of an article, selected by `structure_type`.
///
/// Decoding never fails because of the discriminant: an unrecognised or
/// missing `structure_type` becomes [`ArticleBody::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleBody {
    Tutorial(TutorialBody),
    Comparison(ComparisonBody),
    Review(ReviewBody),
    CaseStudy(SectionedBody),
    IndustryAnalysis(SectionedBody),
    Opinion(OpinionBody),
    NewsUpdate(NewsUpdateBody),
    Listicle(ListicleBody),
    Interview(InterviewBody),
    Unsupported { structure_type: Option<String> },
}

impl ArticleBody {
    pub fn structure_type(&self) -> Option<StructureType> {
        match self {
            ArticleBody::Tutorial(_) => Some(StructureType::Tutorial),
            ArticleBody::Comparison(_) => Some(StructureType::Comparison),
            ArticleBody::Review(_) => Some(StructureType::Review),
            ArticleBody::CaseStudy(_) => Some(StructureType::CaseStudy),
            ArticleBody::IndustryAnalysis(_) => Some(StructureType::IndustryAnalysis),
            ArticleBody::Opinion(_) => Some(StructureType::Opinion),
            ArticleBody::NewsUpdate(_) => Some(StructureType::NewsUpdate),
            ArticleBody::Listicle(_) => Some(StructureType::Listicle),
            ArticleBody::Interview(_) => Some(StructureType::Interview),
            ArticleBody::Unsupported { .. } => None,
        }
    }

    /// The discriminant text as stored, including unrecognised values.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ArticleBody::Unsupported { structure_type } => structure_type.as_deref(),
            known => known.structure_type().map(|kind| kind.as_str()),
        }
    }
}

impl Default for ArticleBody {
    fn default() -> Self {
        ArticleBody::Unsupported { structure_type: None }
    }
}

impl Serialize for ArticleBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = match self {
            ArticleBody::Tutorial(body) => serde_json::to_value(body),
            ArticleBody::Comparison(body) => serde_json::to_value(body),
            ArticleBody::Review(body) => serde_json::to_value(body),
            ArticleBody::CaseStudy(body) => serde_json::to_value(body),
            ArticleBody::IndustryAnalysis(body) => serde_json::to_value(body),
            ArticleBody::Opinion(body) => serde_json::to_value(body),
            ArticleBody::NewsUpdate(body) => serde_json::to_value(body),
            ArticleBody::Listicle(body) => serde_json::to_value(body),
            ArticleBody::Interview(body) => serde_json::to_value(body),
            ArticleBody::Unsupported { .. } => Ok(Value::Object(Map::new())),
        }
        .map_err(ser::Error::custom)?;

        let mut map = Map::new();
        if let Some(name) = self.type_name() {
            map.insert("structure_type".to_string(), Value::String(name.to_string()));
        }
        if let Value::Object(fields) = fields {
            map.extend(fields);
        }
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArticleBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let tag = value
            .get("structure_type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let Some(kind) = tag.as_deref().and_then(|t| t.parse::<StructureType>().ok()) else {
            return Ok(ArticleBody::Unsupported { structure_type: tag });
        };

        let body = match kind {
            StructureType::Tutorial => serde_json::from_value(value).map(ArticleBody::Tutorial),
            StructureType::Comparison => serde_json::from_value(value).map(ArticleBody::Comparison),
            StructureType::Review => serde_json::from_value(value).map(ArticleBody::Review),
            StructureType::CaseStudy => serde_json::from_value(value).map(ArticleBody::CaseStudy),
            StructureType::IndustryAnalysis => {
                serde_json::from_value(value).map(ArticleBody::IndustryAnalysis)
            }
            StructureType::Opinion => serde_json::from_value(value).map(ArticleBody::Opinion),
            StructureType::NewsUpdate => serde_json::from_value(value).map(ArticleBody::NewsUpdate),
            StructureType::Listicle => serde_json::from_value(value).map(ArticleBody::Listicle),
            StructureType::Interview => serde_json::from_value(value).map(ArticleBody::Interview),
        };
        body.map_err(de::Error::custom)
    }
}

/// An article record as served by the article endpoint or bundled with the
/// dashboard. Feed records (`summary_result`, `image_url`, no body) and
/// structured blogs share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, alias = "summary_result", deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<Introduction>,
    #[serde(
        default,
        alias = "keywords",
        alias = "keyword_result",
        deserialize_with = "keyword_list"
    )]
    pub key_words: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_result: Option<String>,
    /// Generated blog payload of feed records, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_result: Option<Value>,
    #[serde(flatten)]
    pub body: ArticleBody,
}

impl Article {
    pub fn structure_type(&self) -> Option<StructureType> {
        self.body.structure_type()
    }

    /// Publication date, accepting the RFC 2822 form used by feeds and RFC 3339.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.published.as_deref()?.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }

    /// Lead image location: the structured main image, else the feed's `image_url`.
    pub fn image_path(&self) -> Option<&str> {
        self.main_image
            .as_ref()
            .map(|image| image.path.as_str())
            .or(self.image_url.as_deref())
            .filter(|path| !path.is_empty())
    }
}

/// Decodes each record on its own. Records that do not decode are logged
/// and skipped so one bad record cannot empty the collection.
pub fn decode_articles(records: Vec<Value>) -> Vec<Article> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Article>(record) {
            Ok(article) => Some(article),
            Err(e) => {
                tracing::warn!("Skipping article record {}: {}", index, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tutorial_decodes_with_base_fields() {
        let article: Article = serde_json::from_value(json!({
            "structure_type": "tutorial",
            "title": "Sourdough",
            "main_image": { "path": "https://img/bread.jpg", "alt_text": "bread", "caption": "Fresh" },
            "summary": "Bake it",
            "key_words": ["Baking"],
            "tags": ["Cooking"],
            "steps": [
                { "step_number": 1, "title": "Starter", "instruction": "Mix flour and water" },
                { "step_number": 2, "title": "Dough", "instruction": "Combine" }
            ],
            "conclusion": "Enjoy"
        }))
        .unwrap();

        assert_eq!(article.title, "Sourdough");
        assert_eq!(article.key_words, vec!["Baking"]);
        match &article.body {
            ArticleBody::Tutorial(body) => {
                assert_eq!(body.steps.len(), 2);
                assert_eq!(body.steps[1].title, "Dough");
                assert_eq!(body.conclusion.as_deref(), Some("Enjoy"));
            }
            other => panic!("expected tutorial, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_or_missing_discriminant_is_unsupported() {
        let haiku: Article =
            serde_json::from_value(json!({ "title": "Poem", "structure_type": "haiku" })).unwrap();
        assert_eq!(
            haiku.body,
            ArticleBody::Unsupported { structure_type: Some("haiku".to_string()) }
        );
        assert_eq!(haiku.body.type_name(), Some("haiku"));

        let feed: Article = serde_json::from_value(json!({
            "id": "672310ae209dfa9b0c8212f5",
            "title": "Recycling plant",
            "published": "Wed, 30 Oct 2024 08:00:00 GMT",
            "link": "https://trellis.net/article/x/",
            "image_url": "https://trellis.net/a.jpg",
            "summary_result": "Aluminum recovery",
            "scrape_result": "<p>Article content here...</p>"
        }))
        .unwrap();
        assert_eq!(feed.body, ArticleBody::Unsupported { structure_type: None });
        assert_eq!(feed.summary, "Aluminum recovery");
        assert_eq!(feed.scrape_result.as_deref(), Some("<p>Article content here...</p>"));
        assert_eq!(feed.image_path(), Some("https://trellis.net/a.jpg"));
        assert!(feed.published_at().is_some());
    }

    #[test]
    fn test_comparison_sides_keep_stored_order() {
        let body: ArticleBody = serde_json::from_value(json!({
            "structure_type": "comparison",
            "comparison_points": [
                { "feature": "Weight", "mirrorless": "Light", "dslr": "Bulky" }
            ]
        }))
        .unwrap();

        let ArticleBody::Comparison(body) = body else {
            panic!("expected comparison");
        };
        let labels: Vec<&str> = body.comparison_points[0]
            .sides
            .iter()
            .map(|side| side.label.as_str())
            .collect();
        assert_eq!(labels, vec!["mirrorless", "dslr"]);
    }

    #[test]
    fn test_serialized_body_carries_discriminant() {
        let article = Article {
            title: "Chat".to_string(),
            body: ArticleBody::Interview(InterviewBody {
                questions_and_answers: vec![QuestionAnswer {
                    question: "Why?".to_string(),
                    answer: "Because.".to_string(),
                }],
                conclusion: None,
            }),
            ..Article::default()
        };

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["structure_type"], "interview");
        assert_eq!(value["questions_and_answers"][0]["answer"], "Because.");

        let decoded: Article = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, article);
    }

    #[test]
    fn test_null_base_fields_fall_back_to_defaults() {
        let article: Article = serde_json::from_value(json!({
            "id": "2",
            "title": null,
            "summary_result": null,
            "tags": null,
            "key_words": null,
            "main_image": { "path": "https://img/a.jpg", "alt_text": null, "caption": null }
        }))
        .unwrap();

        assert_eq!(article.id.as_deref(), Some("2"));
        assert!(article.title.is_empty());
        assert!(article.summary.is_empty());
        assert!(article.tags.is_empty());
        assert!(article.key_words.is_empty());
        assert_eq!(article.image_path(), Some("https://img/a.jpg"));
    }

    #[test]
    fn test_decode_articles_skips_only_bad_records() {
        let articles = decode_articles(vec![
            json!({ "id": "1", "summary_result": "fine" }),
            json!({ "id": "2", "summary_result": null }),
            json!({ "id": "3", "tags": "not a list" }),
            json!("not an object"),
        ]);

        let ids: Vec<_> = articles.iter().filter_map(|a| a.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(articles[0].summary, "fine");
    }

    #[test]
    fn test_keyword_result_accepts_text_or_list() {
        let text: Article =
            serde_json::from_value(json!({ "keyword_result": "AI, robots, " })).unwrap();
        assert_eq!(text.key_words, vec!["AI", "robots"]);

        let list: Article = serde_json::from_value(json!({ "keyword_result": ["AI"] })).unwrap();
        assert_eq!(list.key_words, vec!["AI"]);
    }

    #[test]
    fn test_feed_record_survives_reserialization() {
        let record = json!({
            "id": "x",
            "title": "Recycling plant",
            "link": "https://trellis.net/article/x/",
            "summary_result": "Aluminum recovery",
            "keyword_result": ["AI"],
            "blog_result": { "structure_type": "news_update", "details": [{ "title": "Robots" }] }
        });
        let article: Article = serde_json::from_value(record.clone()).unwrap();

        let served = serde_json::to_value(&article).unwrap();
        assert_eq!(served["blog_result"], record["blog_result"]);
        assert_eq!(served["key_words"], json!(["AI"]));
        assert!(served.get("structure_type").is_none());

        let reread: Article = serde_json::from_value(served).unwrap();
        assert_eq!(reread, article);
    }

    #[test]
    fn test_structure_type_parse() {
        assert_eq!("case_study".parse::<StructureType>(), Ok(StructureType::CaseStudy));
        assert!("haiku".parse::<StructureType>().is_err());
    }
}
