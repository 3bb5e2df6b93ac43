//! In-memory host for the demo, the NDJSON harness and tests.
//!
//! Holds a mutable copy of the host's windows and groups, records every call
//! it receives, and can be told to reject a kind of call or to reply late.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::services::sync_gateway::SyncGateway;
use crate::types::errors::GatewayError;
use crate::types::group::Group;
use crate::types::tab::{GroupId, Tab, TabId, Window, WindowId};

/// Host state as stored in a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSnapshot {
    pub current_window_id: WindowId,
    pub windows: Vec<Window>,
    /// `None` models a host without tab groups.
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
}

/// A recorded call to the in-memory host.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    CurrentWindowId,
    CurrentWindowTabs,
    AllWindows,
    Groups,
    CloseTab(TabId),
    SetActiveTab(TabId, WindowId),
    GetTab(TabId),
    SetMuted(TabId, bool),
    GetGroup(GroupId),
    SetGroupCollapsed(GroupId, bool),
}

impl GatewayCall {
    fn kind(&self) -> &'static str {
        match self {
            GatewayCall::CurrentWindowId => "current_window_id",
            GatewayCall::CurrentWindowTabs => "current_window_tabs",
            GatewayCall::AllWindows => "all_windows",
            GatewayCall::Groups => "groups",
            GatewayCall::CloseTab(_) => "close_tab",
            GatewayCall::SetActiveTab(..) => "set_active_tab",
            GatewayCall::GetTab(_) => "get_tab",
            GatewayCall::SetMuted(..) => "set_muted",
            GatewayCall::GetGroup(_) => "get_group",
            GatewayCall::SetGroupCollapsed(..) => "set_group_collapsed",
        }
    }
}

pub struct InMemoryGateway {
    host: Mutex<HostSnapshot>,
    calls: Mutex<Vec<GatewayCall>>,
    rejections: Mutex<Vec<(&'static str, GatewayError)>>,
    latency: Mutex<Option<Duration>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl InMemoryGateway {
    pub fn new(snapshot: HostSnapshot) -> Self {
        Self {
            host: Mutex::new(snapshot),
            calls: Mutex::new(Vec::new()),
            rejections: Mutex::new(Vec::new()),
            latency: Mutex::new(None),
        }
    }

    /// Host with one focused window holding `tabs`, without group support.
    pub fn single_window(window_id: WindowId, tabs: Vec<Tab>) -> Self {
        Self::new(HostSnapshot {
            current_window_id: window_id,
            windows: vec![Window {
                id: window_id,
                focused: true,
                tabs,
            }],
            groups: None,
        })
    }

    pub fn with_groups(self, groups: Vec<Group>) -> Self {
        lock(&self.host).groups = Some(groups);
        self
    }

    /// Makes every call of `kind` (e.g. `"close_tab"`) fail with `err`.
    pub fn with_rejection(self, kind: &'static str, err: GatewayError) -> Self {
        self.reject(kind, err);
        self
    }

    pub fn reject(&self, kind: &'static str, err: GatewayError) {
        lock(&self.rejections).push((kind, err));
    }

    pub fn clear_rejections(&self) {
        lock(&self.rejections).clear();
    }

    /// Delays every reply by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        *lock(&self.latency) = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.calls).clone()
    }

    /// Current host state, including changes made through the gateway.
    pub fn host(&self) -> HostSnapshot {
        lock(&self.host).clone()
    }

    async fn enter(&self, call: GatewayCall) -> Result<(), GatewayError> {
        let kind = call.kind();
        lock(&self.calls).push(call);
        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let rejected = lock(&self.rejections)
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, err)| err.clone());
        match rejected {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_tab<R>(
        &self,
        tab_id: TabId,
        f: impl FnOnce(&mut Window, usize) -> R,
    ) -> Result<R, GatewayError> {
        let mut host = lock(&self.host);
        for window in host.windows.iter_mut() {
            if let Some(index) = window.tabs.iter().position(|t| t.id == tab_id) {
                return Ok(f(window, index));
            }
        }
        Err(GatewayError::NotFound(format!("tab {}", tab_id)))
    }
}

#[async_trait]
impl SyncGateway for InMemoryGateway {
    async fn current_window_id(&self) -> Result<WindowId, GatewayError> {
        self.enter(GatewayCall::CurrentWindowId).await?;
        Ok(lock(&self.host).current_window_id)
    }

    async fn current_window_tabs(&self) -> Result<Vec<Tab>, GatewayError> {
        self.enter(GatewayCall::CurrentWindowTabs).await?;
        let host = lock(&self.host);
        host.windows
            .iter()
            .find(|w| w.id == host.current_window_id)
            .map(|w| w.tabs.clone())
            .ok_or_else(|| GatewayError::NotFound(format!("window {}", host.current_window_id)))
    }

    async fn all_windows(&self) -> Result<Vec<Window>, GatewayError> {
        self.enter(GatewayCall::AllWindows).await?;
        Ok(lock(&self.host).windows.clone())
    }

    async fn groups(&self) -> Result<Vec<Group>, GatewayError> {
        self.enter(GatewayCall::Groups).await?;
        lock(&self.host)
            .groups
            .clone()
            .ok_or(GatewayError::CapabilityAbsent)
    }

    async fn close_tab(&self, tab_id: TabId) -> Result<(), GatewayError> {
        self.enter(GatewayCall::CloseTab(tab_id)).await?;
        self.with_tab(tab_id, |window, index| {
            window.tabs.remove(index);
        })
    }

    async fn set_active_tab(&self, tab_id: TabId, window_id: WindowId) -> Result<(), GatewayError> {
        self.enter(GatewayCall::SetActiveTab(tab_id, window_id)).await?;
        self.with_tab(tab_id, |window, index| {
            for (i, tab) in window.tabs.iter_mut().enumerate() {
                tab.active = i == index;
            }
        })?;
        let mut host = lock(&self.host);
        for window in host.windows.iter_mut() {
            window.focused = window.id == window_id;
        }
        host.current_window_id = window_id;
        Ok(())
    }

    async fn get_tab(&self, tab_id: TabId) -> Result<Tab, GatewayError> {
        self.enter(GatewayCall::GetTab(tab_id)).await?;
        self.with_tab(tab_id, |window, index| window.tabs[index].clone())
    }

    async fn set_muted(&self, tab_id: TabId, muted: bool) -> Result<(), GatewayError> {
        self.enter(GatewayCall::SetMuted(tab_id, muted)).await?;
        self.with_tab(tab_id, |window, index| window.tabs[index].muted = muted)
    }

    async fn get_group(&self, group_id: GroupId) -> Result<Group, GatewayError> {
        self.enter(GatewayCall::GetGroup(group_id)).await?;
        let host = lock(&self.host);
        let groups = host.groups.as_ref().ok_or(GatewayError::CapabilityAbsent)?;
        groups
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("group {}", group_id)))
    }

    async fn set_group_collapsed(
        &self,
        group_id: GroupId,
        collapsed: bool,
    ) -> Result<(), GatewayError> {
        self.enter(GatewayCall::SetGroupCollapsed(group_id, collapsed))
            .await?;
        let mut host = lock(&self.host);
        let groups = host.groups.as_mut().ok_or(GatewayError::CapabilityAbsent)?;
        let group = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| GatewayError::NotFound(format!("group {}", group_id)))?;
        group.collapsed = collapsed;
        Ok(())
    }
}
