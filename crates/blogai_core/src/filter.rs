use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::domain::article_domain;
use crate::types::Article;
use crate::{Error, Result};

/// Facets a reader can filter the article list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    ContentType,
    ResourceType,
    Keywords,
    Website,
    Pdf,
    Youtube,
    Docs,
}

/// Dependent sub-filters and the `resourceType` value that reveals each one.
const DEPENDENT_FILTERS: [(FilterCategory, &str); 4] = [
    (FilterCategory::Website, "Website"),
    (FilterCategory::Pdf, "PDF"),
    (FilterCategory::Youtube, "YouTube"),
    (FilterCategory::Docs, "Docs"),
];

impl FilterCategory {
    pub const ALL: [FilterCategory; 7] = [
        FilterCategory::ContentType,
        FilterCategory::ResourceType,
        FilterCategory::Keywords,
        FilterCategory::Website,
        FilterCategory::Pdf,
        FilterCategory::Youtube,
        FilterCategory::Docs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::ContentType => "contentType",
            FilterCategory::ResourceType => "resourceType",
            FilterCategory::Keywords => "keywords",
            FilterCategory::Website => "website",
            FilterCategory::Pdf => "pdf",
            FilterCategory::Youtube => "youtube",
            FilterCategory::Docs => "docs",
        }
    }

    /// Heading shown above the category's option list.
    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::ContentType => "Content Type",
            FilterCategory::ResourceType => "Resource Type",
            FilterCategory::Keywords => "Keywords",
            FilterCategory::Website => "Websites",
            FilterCategory::Pdf => "PDFs",
            FilterCategory::Youtube => "YouTube Links",
            FilterCategory::Docs => "Google Docs",
        }
    }

    /// The `resourceType` value that must be selected for this category to be
    /// shown, or `None` for top-level categories.
    pub fn parent_value(&self) -> Option<&'static str> {
        DEPENDENT_FILTERS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, value)| *value)
    }

    pub fn is_dependent(&self) -> bool {
        self.parent_value().is_some()
    }
}

impl FromStr for FilterCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FilterCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single selected domain. Text form `"all"` means no domain constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DomainSelection {
    #[default]
    All,
    Only(String),
}

impl DomainSelection {
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &str {
        match self {
            DomainSelection::All => Self::ALL,
            DomainSelection::Only(domain) => domain,
        }
    }

    /// Whether an article with the given domain passes this selection.
    /// Articles without a usable domain only pass `All`.
    pub fn matches(&self, domain: Option<&str>) -> bool {
        match self {
            DomainSelection::All => true,
            DomainSelection::Only(selected) => domain == Some(selected.as_str()),
        }
    }
}

impl From<&str> for DomainSelection {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            DomainSelection::All
        } else {
            DomainSelection::Only(value.to_string())
        }
    }
}

impl From<String> for DomainSelection {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            DomainSelection::All
        } else {
            DomainSelection::Only(value)
        }
    }
}

impl fmt::Display for DomainSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active filter selections of one dashboard page.
///
/// Every category holds a set of option strings; a value is selected at most
/// once. Categories with no selection are not stored, so a cleared state is
/// indistinguishable from [`FilterState::default`]. All mutation goes through
/// the methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selections: BTreeMap<FilterCategory, BTreeSet<String>>,
    domain: DomainSelection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `value` in `category`. Returns whether the value is
    /// selected afterwards.
    pub fn toggle(&mut self, category: FilterCategory, value: impl Into<String>) -> bool {
        let value = value.into();
        let selected = self.selections.entry(category).or_default();
        let now_selected = if selected.remove(&value) {
            false
        } else {
            selected.insert(value);
            true
        };
        if selected.is_empty() {
            self.selections.remove(&category);
        }
        tracing::debug!("Toggled {} filter, selected now: {}", category, now_selected);
        now_selected
    }

    /// Toggle by category name. An unknown name is rejected and leaves the
    /// state untouched.
    pub fn toggle_named(&mut self, category: &str, value: impl Into<String>) -> Result<bool> {
        let category = category.parse::<FilterCategory>()?;
        Ok(self.toggle(category, value))
    }

    /// Removes `value` from `category` if present. Returns whether anything changed.
    pub fn remove(&mut self, category: FilterCategory, value: &str) -> bool {
        let Some(selected) = self.selections.get_mut(&category) else {
            return false;
        };
        let removed = selected.remove(value);
        if selected.is_empty() {
            self.selections.remove(&category);
        }
        removed
    }

    /// Empties every category and resets the domain to `all`.
    pub fn clear_all(&mut self) {
        self.selections.clear();
        self.domain = DomainSelection::All;
    }

    pub fn set_domain(&mut self, domain: impl Into<DomainSelection>) {
        self.domain = domain.into();
    }

    pub fn domain(&self) -> &DomainSelection {
        &self.domain
    }

    pub fn selected(&self, category: FilterCategory) -> impl Iterator<Item = &str> + '_ {
        self.selections
            .get(&category)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    pub fn is_selected(&self, category: FilterCategory, value: &str) -> bool {
        self.selections
            .get(&category)
            .is_some_and(|values| values.contains(value))
    }

    /// True when nothing is selected and the domain is `all`.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty() && self.domain == DomainSelection::All
    }

    /// Whether a category's option list should be shown. Dependent categories
    /// require their parent value in the `resourceType` selection; top-level
    /// categories are always visible.
    pub fn is_dependent_visible(&self, category: FilterCategory) -> bool {
        match category.parent_value() {
            Some(parent) => self.is_selected(FilterCategory::ResourceType, parent),
            None => true,
        }
    }

    pub fn visible_categories(&self) -> Vec<FilterCategory> {
        FilterCategory::ALL
            .into_iter()
            .filter(|category| self.is_dependent_visible(*category))
            .collect()
    }

    /// Whether an article passes the domain and keyword selections.
    pub fn matches(&self, article: &Article) -> bool {
        if !self.domain.matches(article_domain(article).as_deref()) {
            return false;
        }

        let mut keywords = self.selected(FilterCategory::Keywords).peekable();
        if keywords.peek().is_none() {
            return true;
        }
        keywords.any(|keyword| {
            article
                .key_words
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(keyword))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = FilterState::new();
        assert!(state.toggle(FilterCategory::ContentType, "News"));
        assert!(state.is_selected(FilterCategory::ContentType, "News"));

        assert!(!state.toggle(FilterCategory::ContentType, "News"));
        assert!(!state.is_selected(FilterCategory::ContentType, "News"));
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_toggle_named_rejects_unknown_category() {
        let mut state = FilterState::new();
        assert!(state.toggle_named("keywords", "AI").unwrap());

        let before = state.clone();
        let err = state.toggle_named("colour", "red").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(name) if name == "colour"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Keywords, "AI");
        state.toggle(FilterCategory::Keywords, "Data Science");

        assert!(state.remove(FilterCategory::Keywords, "AI"));
        let once = state.clone();
        assert!(!state.remove(FilterCategory::Keywords, "AI"));
        assert_eq!(state, once);
        assert!(!state.remove(FilterCategory::Docs, "Doc 1"));
    }

    #[test]
    fn test_clear_all_resets_domain() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::ResourceType, "PDF");
        state.toggle(FilterCategory::Pdf, "PDF 2");
        state.set_domain("a.com");
        assert!(!state.is_empty());

        state.clear_all();
        assert_eq!(state, FilterState::default());
        assert_eq!(state.domain(), &DomainSelection::All);
        assert!(state.is_empty());
    }

    #[test]
    fn test_dependent_visibility_follows_resource_type() {
        let mut state = FilterState::new();
        for category in [
            FilterCategory::Website,
            FilterCategory::Pdf,
            FilterCategory::Youtube,
            FilterCategory::Docs,
        ] {
            assert!(!state.is_dependent_visible(category));
        }
        assert!(state.is_dependent_visible(FilterCategory::Keywords));

        state.toggle(FilterCategory::ResourceType, "YouTube");
        assert!(state.is_dependent_visible(FilterCategory::Youtube));
        assert!(!state.is_dependent_visible(FilterCategory::Website));
        assert_eq!(
            state.visible_categories(),
            vec![
                FilterCategory::ContentType,
                FilterCategory::ResourceType,
                FilterCategory::Keywords,
                FilterCategory::Youtube,
            ]
        );

        // Values are matched exactly.
        state.toggle(FilterCategory::ResourceType, "pdf");
        assert!(!state.is_dependent_visible(FilterCategory::Pdf));
    }

    #[test]
    fn test_hidden_dependent_keeps_selection() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::ResourceType, "Website");
        state.toggle(FilterCategory::Website, "Website 1");
        state.toggle(FilterCategory::ResourceType, "Website");

        assert!(!state.is_dependent_visible(FilterCategory::Website));
        assert_eq!(state.selected(FilterCategory::Website).collect::<Vec<_>>(), vec!["Website 1"]);
    }

    #[test]
    fn test_domain_selection_text_form() {
        assert_eq!(DomainSelection::from("all"), DomainSelection::All);
        assert_eq!(
            DomainSelection::from("a.com".to_string()),
            DomainSelection::Only("a.com".to_string())
        );
        assert_eq!(DomainSelection::default().to_string(), "all");
        assert!(DomainSelection::All.matches(None));
        assert!(!DomainSelection::from("a.com").matches(None));
    }

    #[test]
    fn test_category_names() {
        for category in FilterCategory::ALL {
            assert_eq!(category.as_str().parse::<FilterCategory>().unwrap(), category);
        }
        assert_eq!(FilterCategory::Pdf.parent_value(), Some("PDF"));
        assert_eq!(FilterCategory::ResourceType.parent_value(), None);
        assert_eq!(
            serde_json::to_string(&FilterCategory::ContentType).unwrap(),
            "\"contentType\""
        );
    }
}
