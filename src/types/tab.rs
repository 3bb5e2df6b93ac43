use serde::{Deserialize, Deserializer, Serialize};

/// Host-assigned tab identifier, stable for the session.
pub type TabId = i64;
/// Host-assigned window identifier.
pub type WindowId = i64;
/// Host-assigned tab group identifier.
pub type GroupId = i64;

/// Value the host reports in `groupId` for a tab outside any group.
pub const GROUP_ID_NONE: GroupId = -1;

/// A single open tab as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub active: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_group_id",
        serialize_with = "serialize_group_id"
    )]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub audible: bool,
}

impl Tab {
    /// Creates an ungrouped, inactive tab.
    pub fn new(id: TabId, window_id: WindowId, title: &str, url: &str) -> Self {
        Self {
            id,
            window_id,
            title: title.to_string(),
            url: url.to_string(),
            active: false,
            group_id: None,
            muted: false,
            audible: false,
        }
    }
}

/// A host window and its tabs in host order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

/// Raw tab snapshot fetched from the host at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabSnapshot {
    /// Tabs of the window that opened the popup.
    CurrentWindow(Vec<Tab>),
    /// Every window with its tabs.
    AllWindows(Vec<Window>),
}

/// Which slice of the browser the popup lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    CurrentWindow,
    AllWindows,
}

impl DisplayMode {
    pub fn from_only_current_window(only_current_window: bool) -> Self {
        if only_current_window {
            DisplayMode::CurrentWindow
        } else {
            DisplayMode::AllWindows
        }
    }
}

fn deserialize_group_id<'de, D>(deserializer: D) -> Result<Option<GroupId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<GroupId>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != GROUP_ID_NONE))
}

fn serialize_group_id<S>(group_id: &Option<GroupId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(group_id.unwrap_or(GROUP_ID_NONE))
}
