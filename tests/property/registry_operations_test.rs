//! Property-based tests for registry removal and filtering.
//!
//! These tests verify that removal is idempotent and conserves the count,
//! and that filtering keeps host order and never grows the registry.

use std::borrow::Cow;

use proptest::prelude::*;

use tabfinder::managers::tab_registry::{RegistryState, TabRegistry, TabRegistryTrait};
use tabfinder::services::filter_engine::filter;
use tabfinder::types::tab::{DisplayMode, Tab, TabId, TabSnapshot, Window};

/// Strategy for a few windows with unique tab ids and short titles.
fn arb_windows() -> impl Strategy<Value = Vec<Window>> {
    prop::collection::vec(
        (
            any::<bool>(),
            prop::collection::vec(("[a-cA-C]{0,4}", "[a-c./]{0,6}"), 0..6),
        ),
        1..4,
    )
    .prop_map(|raw| {
        let mut next_id: TabId = 1;
        raw.into_iter()
            .enumerate()
            .map(|(w, (focused, tabs))| {
                let window_id = (w + 1) as i64;
                Window {
                    id: window_id,
                    focused,
                    tabs: tabs
                        .into_iter()
                        .map(|(title, url)| {
                            let tab = Tab::new(next_id, window_id, &title, &url);
                            next_id += 1;
                            tab
                        })
                        .collect(),
                }
            })
            .collect()
    })
}

fn arb_mode() -> impl Strategy<Value = DisplayMode> {
    prop_oneof![Just(DisplayMode::CurrentWindow), Just(DisplayMode::AllWindows)]
}

fn ids(state: &RegistryState) -> Vec<TabId> {
    state.iter_tabs().map(|t| t.id).collect()
}

// Removing any id, present or not, drops the count by at most one, and
// removing the same id twice is the same as removing it once.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn removal_is_idempotent(
        windows in arb_windows(),
        mode in arb_mode(),
        target in 0i64..30,
    ) {
        let mut registry = TabRegistry::initialize(TabSnapshot::AllWindows(windows), mode, None);
        let before = registry.tab_count();
        let present = registry.get_tab(target).is_some();

        let first = registry.remove_tab(target);
        prop_assert_eq!(first.is_some(), present);
        prop_assert_eq!(registry.tab_count(), before - usize::from(present));
        prop_assert!(registry.get_tab(target).is_none());

        let after_once = registry.clone();
        prop_assert!(registry.remove_tab(target).is_none());
        prop_assert_eq!(registry, after_once);
    }

    #[test]
    fn removal_keeps_remaining_order(
        windows in arb_windows(),
        mode in arb_mode(),
        target in 0i64..30,
    ) {
        let mut registry = TabRegistry::initialize(TabSnapshot::AllWindows(windows), mode, None);
        let mut expected = ids(registry.state());
        expected.retain(|id| *id != target);

        registry.remove_tab(target);
        prop_assert_eq!(ids(registry.state()), expected);
    }

    #[test]
    fn grouped_removal_keeps_every_window(
        windows in arb_windows(),
        targets in prop::collection::vec(0i64..30, 0..20),
    ) {
        let window_count = windows.len();
        let mut registry =
            TabRegistry::initialize(TabSnapshot::AllWindows(windows), DisplayMode::AllWindows, None);
        for id in targets {
            registry.remove_tab(id);
        }
        match registry.state() {
            RegistryState::Grouped { windows } => prop_assert_eq!(windows.len(), window_count),
            other => prop_assert!(false, "expected grouped state, got {:?}", other),
        }
    }
}

// Filtering returns an order-preserving subsequence, each survivor matches
// the folded query, and the empty query hands back the input itself.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn filter_is_an_ordered_subsequence(
        windows in arb_windows(),
        mode in arb_mode(),
        query in "[a-cA-C./]{1,3}",
    ) {
        let registry = TabRegistry::initialize(TabSnapshot::AllWindows(windows), mode, None);
        let state = registry.state();
        let filtered = filter(state, &query);

        prop_assert!(filtered.count() <= state.count());
        prop_assert_eq!(filtered.mode(), state.mode());

        let needle = query.to_lowercase();
        let expected: Vec<TabId> = state
            .iter_tabs()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle) || t.url.to_lowercase().contains(&needle)
            })
            .map(|t| t.id)
            .collect();
        prop_assert_eq!(ids(&filtered), expected);
    }

    #[test]
    fn empty_query_is_identity(windows in arb_windows(), mode in arb_mode()) {
        let registry = TabRegistry::initialize(TabSnapshot::AllWindows(windows), mode, None);
        let state = registry.state();
        match filter(state, "") {
            Cow::Borrowed(inner) => prop_assert!(std::ptr::eq(inner, state)),
            Cow::Owned(_) => prop_assert!(false, "empty query copied the state"),
        }
    }

    #[test]
    fn filter_then_remove_matches_remove_then_filter(
        windows in arb_windows(),
        mode in arb_mode(),
        query in "[a-c]{1,2}",
        target in 0i64..30,
    ) {
        let mut registry = TabRegistry::initialize(TabSnapshot::AllWindows(windows), mode, None);

        let mut filtered_first = filter(registry.state(), &query).into_owned();
        filtered_first.remove_tab(target);

        registry.remove_tab(target);
        let removed_first = filter(registry.state(), &query).into_owned();

        prop_assert_eq!(ids(&filtered_first), ids(&removed_first));
    }
}
