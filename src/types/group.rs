use serde::{Deserialize, Serialize};

use super::tab::GroupId;

/// Fixed palette the host offers for tab groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    pub const ALL: [GroupColor; 9] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
        GroupColor::Orange,
    ];

    /// Badge background for the group bar.
    pub fn hex(&self) -> &'static str {
        match self {
            GroupColor::Grey => "#5f6368",
            GroupColor::Blue => "#1a73e8",
            GroupColor::Red => "#d93025",
            GroupColor::Yellow => "#f9ab00",
            GroupColor::Green => "#188038",
            GroupColor::Pink => "#d01884",
            GroupColor::Purple => "#a142f4",
            GroupColor::Cyan => "#007b83",
            GroupColor::Orange => "#fa903e",
        }
    }
}

/// A tab group as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    #[serde(default)]
    pub title: String,
    pub color: GroupColor,
    #[serde(default)]
    pub collapsed: bool,
}

/// Display metadata kept per group in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMeta {
    pub collapsed: bool,
    pub color: GroupColor,
    pub title: String,
}

impl From<&Group> for GroupMeta {
    fn from(group: &Group) -> Self {
        Self {
            collapsed: group.collapsed,
            color: group.color,
            title: group.title.clone(),
        }
    }
}
