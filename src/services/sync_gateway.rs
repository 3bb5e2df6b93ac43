//! Boundary to the host browser's tab, window and group primitives.
//!
//! Every call suspends until the host replies. Implementations never touch
//! session state; the session applies confirmed results itself.

use async_trait::async_trait;

use crate::types::errors::GatewayError;
use crate::types::group::Group;
use crate::types::tab::{GroupId, Tab, TabId, Window, WindowId};

#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Window that opened the popup.
    async fn current_window_id(&self) -> Result<WindowId, GatewayError>;

    async fn current_window_tabs(&self) -> Result<Vec<Tab>, GatewayError>;

    async fn all_windows(&self) -> Result<Vec<Window>, GatewayError>;

    /// All tab groups, or `CapabilityAbsent` when the host has none.
    async fn groups(&self) -> Result<Vec<Group>, GatewayError>;

    async fn close_tab(&self, tab_id: TabId) -> Result<(), GatewayError>;

    /// Activates the tab and focuses its window.
    async fn set_active_tab(&self, tab_id: TabId, window_id: WindowId) -> Result<(), GatewayError>;

    async fn get_tab(&self, tab_id: TabId) -> Result<Tab, GatewayError>;

    async fn set_muted(&self, tab_id: TabId, muted: bool) -> Result<(), GatewayError>;

    async fn get_group(&self, group_id: GroupId) -> Result<Group, GatewayError>;

    async fn set_group_collapsed(&self, group_id: GroupId, collapsed: bool)
        -> Result<(), GatewayError>;
}
