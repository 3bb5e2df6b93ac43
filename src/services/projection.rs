// Tabfinder view projection
// Turns a (possibly filtered) registry state into the rows the view draws,
// plus an id-indexed lookup so clicks resolve to a row without walking the
// rendered tree.

use std::collections::HashMap;

use serde::Serialize;

use crate::managers::group_index::{GroupIndex, GroupIndexTrait};
use crate::managers::tab_registry::RegistryState;
use crate::types::group::{Group, GroupColor, GroupMeta};
use crate::types::tab::{GroupId, Tab, TabId, WindowId};

/// Group marker drawn on a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBadge {
    pub title: String,
    pub color: GroupColor,
    pub hex: String,
    pub collapsed: bool,
}

impl From<&GroupMeta> for GroupBadge {
    fn from(meta: &GroupMeta) -> Self {
        Self {
            title: meta.title.clone(),
            color: meta.color,
            hex: meta.color.hex().to_string(),
            collapsed: meta.collapsed,
        }
    }
}

/// Entry in the group bar above the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChip {
    pub id: GroupId,
    pub title: String,
    pub hex: String,
    pub collapsed: bool,
}

impl From<&Group> for GroupChip {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            title: group.title.clone(),
            hex: group.color.hex().to_string(),
            collapsed: group.collapsed,
        }
    }
}

/// One tab row as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub title: String,
    pub url: String,
    /// Styled as the focused tab of the popup's window.
    pub active: bool,
    pub muted: bool,
    pub audible: bool,
    pub group: Option<GroupBadge>,
}

/// Contiguous run of rows belonging to one container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// `None` for the flat list.
    pub window_id: Option<WindowId>,
    pub start: usize,
    pub len: usize,
}

/// Everything the view needs for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub rows: Vec<DisplayRow>,
    pub sections: Vec<Section>,
    pub groups: Vec<GroupChip>,
    #[serde(skip)]
    index: HashMap<TabId, usize>,
}

impl Projection {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row position of a rendered tab id.
    pub fn position_of(&self, tab_id: TabId) -> Option<usize> {
        self.index.get(&tab_id).copied()
    }

    pub fn row_for(&self, tab_id: TabId) -> Option<&DisplayRow> {
        self.position_of(tab_id).map(|i| &self.rows[i])
    }
}

/// Builds the rows for `state` in cursor order.
pub fn project(
    state: &RegistryState,
    groups: &GroupIndex,
    current_window_id: Option<WindowId>,
) -> Projection {
    let mut projection = Projection {
        groups: groups.groups().iter().map(GroupChip::from).collect(),
        ..Projection::default()
    };

    match state {
        RegistryState::Flat { tabs } => {
            push_section(&mut projection, None, tabs, groups, current_window_id);
        }
        RegistryState::Grouped { windows } => {
            for window in windows {
                push_section(
                    &mut projection,
                    Some(window.id),
                    &window.tabs,
                    groups,
                    current_window_id,
                );
            }
        }
    }
    projection
}

fn push_section(
    projection: &mut Projection,
    window_id: Option<WindowId>,
    tabs: &[Tab],
    groups: &GroupIndex,
    current_window_id: Option<WindowId>,
) {
    let start = projection.rows.len();
    let only_tab = tabs.len() == 1;
    for tab in tabs {
        let position = projection.rows.len();
        projection.index.insert(tab.id, position);
        projection.rows.push(DisplayRow {
            tab_id: tab.id,
            window_id: tab.window_id,
            title: tab.title.clone(),
            url: tab.url.clone(),
            active: tab.active && Some(tab.window_id) == current_window_id && !only_tab,
            muted: tab.muted,
            audible: tab.audible,
            group: groups.lookup(tab.group_id).map(GroupBadge::from),
        });
    }
    projection.sections.push(Section {
        window_id,
        start,
        len: tabs.len(),
    });
}
