//! Property-based tests for filter state operations.
//!
//! Toggling is an involution, removal is idempotent and clearing always
//! returns to the initial state, whatever selections came before.

use blogai_core::{FilterCategory, FilterState};
use proptest::prelude::*;

fn arb_category() -> impl Strategy<Value = FilterCategory> {
    prop::sample::select(FilterCategory::ALL.to_vec())
}

/// Option values, including ones outside any catalog.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Website".to_string()),
        Just("PDF".to_string()),
        Just("YouTube".to_string()),
        Just("Docs".to_string()),
        "[A-Za-z][A-Za-z0-9 ]{0,12}",
    ]
}

fn arb_state() -> impl Strategy<Value = FilterState> {
    (
        prop::collection::vec((arb_category(), arb_value()), 0..12),
        proptest::option::of("[a-z]{1,8}\\.(com|org)"),
    )
        .prop_map(|(toggles, domain)| {
            let mut state = FilterState::new();
            for (category, value) in toggles {
                state.toggle(category, value);
            }
            if let Some(domain) = domain {
                state.set_domain(domain);
            }
            state
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn toggle_twice_is_identity(
        state in arb_state(),
        category in arb_category(),
        value in arb_value(),
    ) {
        let mut toggled = state.clone();
        toggled.toggle(category, value.clone());
        toggled.toggle(category, value);
        prop_assert_eq!(toggled, state);
    }

    #[test]
    fn remove_is_idempotent(
        state in arb_state(),
        category in arb_category(),
        value in arb_value(),
    ) {
        let mut once = state.clone();
        once.remove(category, &value);
        let mut twice = once.clone();
        twice.remove(category, &value);
        prop_assert_eq!(twice, once.clone());
        prop_assert!(!once.is_selected(category, &value));
    }

    #[test]
    fn clear_all_matches_fresh_state(state in arb_state()) {
        let mut cleared = state;
        cleared.clear_all();
        prop_assert_eq!(cleared, FilterState::new());
    }

    #[test]
    fn dependent_visibility_tracks_parent_value(state in arb_state()) {
        for (dependent, parent) in [
            (FilterCategory::Website, "Website"),
            (FilterCategory::Pdf, "PDF"),
            (FilterCategory::Youtube, "YouTube"),
            (FilterCategory::Docs, "Docs"),
        ] {
            prop_assert_eq!(
                state.is_dependent_visible(dependent),
                state.is_selected(FilterCategory::ResourceType, parent)
            );
        }
    }
}
