//! Tab Registry for Tabfinder.
//!
//! Authoritative in-memory snapshot of the open tabs for one popup session.
//! Built once from a host snapshot and mutated only by removing a tab whose
//! close the host has confirmed.

use log::debug;

use crate::types::tab::{DisplayMode, Tab, TabId, TabSnapshot, Window, WindowId};

/// Shape of the registry: a flat list, or tabs nested under their windows.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryState {
    Flat { tabs: Vec<Tab> },
    Grouped { windows: Vec<Window> },
}

impl RegistryState {
    /// Total tabs across all containers.
    pub fn count(&self) -> usize {
        match self {
            RegistryState::Flat { tabs } => tabs.len(),
            RegistryState::Grouped { windows } => windows.iter().map(|w| w.tabs.len()).sum(),
        }
    }

    /// Tabs in display order; grouped windows are walked one after another.
    pub fn iter_tabs(&self) -> Box<dyn Iterator<Item = &Tab> + '_> {
        match self {
            RegistryState::Flat { tabs } => Box::new(tabs.iter()),
            RegistryState::Grouped { windows } => {
                Box::new(windows.iter().flat_map(|w| w.tabs.iter()))
            }
        }
    }

    pub fn find(&self, tab_id: TabId) -> Option<&Tab> {
        self.iter_tabs().find(|t| t.id == tab_id)
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.find(tab_id).is_some()
    }

    pub fn mode(&self) -> DisplayMode {
        match self {
            RegistryState::Flat { .. } => DisplayMode::CurrentWindow,
            RegistryState::Grouped { .. } => DisplayMode::AllWindows,
        }
    }

    /// Removes the tab from whichever container holds it.
    ///
    /// Returns `None` and leaves the state untouched when no container holds
    /// the id; the host may already have dropped it through another path.
    pub fn remove_tab(&mut self, tab_id: TabId) -> Option<Tab> {
        let removed = match self {
            RegistryState::Flat { tabs } => take_by_id(tabs, tab_id),
            RegistryState::Grouped { windows } => windows
                .iter_mut()
                .find_map(|window| take_by_id(&mut window.tabs, tab_id)),
        };
        if removed.is_none() {
            debug!("remove_tab: tab {} not in registry, ignoring", tab_id);
        }
        removed
    }
}

fn take_by_id(tabs: &mut Vec<Tab>, tab_id: TabId) -> Option<Tab> {
    let index = tabs.iter().position(|t| t.id == tab_id)?;
    Some(tabs.remove(index))
}

/// Trait defining the registry interface used by the session.
pub trait TabRegistryTrait {
    fn state(&self) -> &RegistryState;
    fn remove_tab(&mut self, tab_id: TabId) -> Option<Tab>;
    fn get_tab(&self, tab_id: TabId) -> Option<&Tab>;
    fn tab_count(&self) -> usize;
    fn mode(&self) -> DisplayMode;
}

/// Owner of the session's `RegistryState`.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRegistry {
    state: RegistryState,
}

impl TabRegistry {
    /// Builds the registry from a host snapshot.
    ///
    /// `CurrentWindow` mode flattens whatever it is given. `AllWindows` mode
    /// nests tabs under their windows, moving `current_window_id` to the
    /// front and keeping host order otherwise. A flat snapshot is nested by
    /// `window_id` in order of first appearance.
    pub fn initialize(
        snapshot: TabSnapshot,
        mode: DisplayMode,
        current_window_id: Option<WindowId>,
    ) -> Self {
        let state = match (mode, snapshot) {
            (DisplayMode::CurrentWindow, TabSnapshot::CurrentWindow(tabs)) => {
                RegistryState::Flat { tabs }
            }
            (DisplayMode::CurrentWindow, TabSnapshot::AllWindows(windows)) => RegistryState::Flat {
                tabs: windows.into_iter().flat_map(|w| w.tabs).collect(),
            },
            (DisplayMode::AllWindows, TabSnapshot::AllWindows(windows)) => {
                RegistryState::Grouped {
                    windows: current_window_first(windows, current_window_id),
                }
            }
            (DisplayMode::AllWindows, TabSnapshot::CurrentWindow(tabs)) => {
                RegistryState::Grouped {
                    windows: current_window_first(nest_by_window(tabs), current_window_id),
                }
            }
        };
        debug!(
            "registry initialized: mode={:?}, tabs={}",
            state.mode(),
            state.count()
        );
        Self { state }
    }

}

fn current_window_first(mut windows: Vec<Window>, current_window_id: Option<WindowId>) -> Vec<Window> {
    // sort_by_key is stable, so the other windows keep host order.
    windows.sort_by_key(|w| Some(w.id) != current_window_id);
    windows
}

fn nest_by_window(tabs: Vec<Tab>) -> Vec<Window> {
    let mut windows: Vec<Window> = Vec::new();
    for tab in tabs {
        let window_id: WindowId = tab.window_id;
        match windows.iter_mut().find(|w| w.id == window_id) {
            Some(window) => window.tabs.push(tab),
            None => windows.push(Window {
                id: window_id,
                focused: false,
                tabs: vec![tab],
            }),
        }
    }
    windows
}

impl TabRegistryTrait for TabRegistry {
    fn state(&self) -> &RegistryState {
        &self.state
    }

    fn remove_tab(&mut self, tab_id: TabId) -> Option<Tab> {
        self.state.remove_tab(tab_id)
    }

    fn get_tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.state.find(tab_id)
    }

    fn tab_count(&self) -> usize {
        self.state.count()
    }

    fn mode(&self) -> DisplayMode {
        self.state.mode()
    }
}
