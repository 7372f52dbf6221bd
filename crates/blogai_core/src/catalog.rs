use std::collections::BTreeMap;

use crate::filter::{FilterCategory, FilterState};

/// Option lists offered for each filter category.
///
/// Options only drive what is offered; [`FilterState`] accepts any value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCatalog {
    options: BTreeMap<FilterCategory, Vec<String>>,
}

impl FilterCatalog {
    pub fn empty() -> Self {
        Self {
            options: BTreeMap::new(),
        }
    }

    pub fn with_options<I, S>(mut self, category: FilterCategory, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .insert(category, options.into_iter().map(Into::into).collect());
        self
    }

    pub fn options(&self, category: FilterCategory) -> &[String] {
        self.options
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories to show for the current state, each with its options.
    pub fn visible_groups<'a>(
        &'a self,
        state: &FilterState,
    ) -> Vec<(FilterCategory, &'a [String])> {
        state
            .visible_categories()
            .into_iter()
            .map(|category| (category, self.options(category)))
            .collect()
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::empty()
            .with_options(
                FilterCategory::ContentType,
                ["Blog Post", "Article", "News", "Tutorial"],
            )
            .with_options(FilterCategory::ResourceType, ["Website", "PDF", "YouTube", "Docs"])
            .with_options(
                FilterCategory::Keywords,
                ["AI", "Machine Learning", "Web Development", "Data Science"],
            )
            .with_options(FilterCategory::Website, ["Website 1", "Website 2", "Website 3"])
            .with_options(FilterCategory::Pdf, ["PDF 1", "PDF 2", "PDF 3"])
            .with_options(FilterCategory::Youtube, ["YouTube 1", "YouTube 2", "YouTube 3"])
            .with_options(FilterCategory::Docs, ["Doc 1", "Doc 2", "Doc 3"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_types_reveal_every_dependent() {
        let catalog = FilterCatalog::default();
        let mut state = FilterState::new();
        for value in catalog.options(FilterCategory::ResourceType).to_vec() {
            state.toggle(FilterCategory::ResourceType, value);
        }
        assert_eq!(catalog.visible_groups(&state).len(), FilterCategory::ALL.len());
    }

    #[test]
    fn test_visible_groups_hide_dependents() {
        let catalog = FilterCatalog::default();
        let state = FilterState::new();
        let groups = catalog.visible_groups(&state);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].0, FilterCategory::Keywords);
        assert_eq!(groups[2].1[0], "AI");
    }

    #[test]
    fn test_missing_category_has_no_options() {
        let catalog = FilterCatalog::empty().with_options(FilterCategory::Keywords, ["Rust"]);
        assert!(catalog.options(FilterCategory::Docs).is_empty());
        assert_eq!(catalog.options(FilterCategory::Keywords), ["Rust".to_string()]);
    }
}
