use serde::{Deserialize, Serialize};

use super::tab::{GroupId, TabId};

/// Keys the popup reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Shift,
    Control,
    Meta,
    /// Emitted by some touchpads alongside a middle click.
    F22,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Enter" => Key::Enter,
            "Shift" => Key::Shift,
            "Control" => Key::Control,
            "Meta" => Key::Meta,
            "F22" => Key::F22,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight | Key::Enter
        )
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Meta | Key::F22)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Part of a tab row that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowPart {
    Body,
    CloseButton,
    Speaker,
}

/// What the view reports when the pointer is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// A tab row, addressed by the id the row was rendered with.
    Row { tab_id: TabId, part: RowPart },
    /// A badge in the group bar.
    Group { group_id: GroupId },
    /// Empty space in the list.
    Background,
}
