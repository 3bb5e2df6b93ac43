// Tabfinder Filter Engine
// Pure projection of the registry for a query string. Runs on every
// keystroke, so one linear pass over the tabs and nothing else.

use std::borrow::Cow;

use crate::managers::tab_registry::RegistryState;
use crate::types::tab::{Tab, Window};

/// Case-folded query, prepared once per keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    folded: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            folded: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// True iff the query is a substring of the folded title or url.
    pub fn matches(&self, tab: &Tab) -> bool {
        tab.title.to_lowercase().contains(&self.folded)
            || tab.url.to_lowercase().contains(&self.folded)
    }
}

/// Filters `state` by `query`, keeping the variant and the tab order.
///
/// An empty query hands back the input itself (`Cow::Borrowed`). In grouped
/// mode a window left without matches stays in the output with no tabs.
pub fn filter<'a>(state: &'a RegistryState, query: &str) -> Cow<'a, RegistryState> {
    let query = Query::new(query);
    if query.is_empty() {
        return Cow::Borrowed(state);
    }
    Cow::Owned(filter_with(state, &query))
}

pub fn filter_with(state: &RegistryState, query: &Query) -> RegistryState {
    match state {
        RegistryState::Flat { tabs } => RegistryState::Flat {
            tabs: matching(tabs, query),
        },
        RegistryState::Grouped { windows } => RegistryState::Grouped {
            windows: windows
                .iter()
                .map(|w| Window {
                    id: w.id,
                    focused: w.focused,
                    tabs: matching(&w.tabs, query),
                })
                .collect(),
        },
    }
}

fn matching(tabs: &[Tab], query: &Query) -> Vec<Tab> {
    tabs.iter().filter(|t| query.matches(t)).cloned().collect()
}
