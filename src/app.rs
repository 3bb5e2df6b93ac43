//! Popup session for Tabfinder.
//!
//! `TabSession` is the single owner of the registry, the group index, the
//! selection cursor and the current query for the lifetime of one popup.
//! View intents come in through its methods; host mutations go out through
//! the `SyncGateway`, and local state changes only after the host confirms.

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;

use crate::managers::group_index::{GroupIndex, GroupIndexTrait};
use crate::managers::selection_cursor::{SelectionCursor, SelectionCursorTrait};
use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::services::filter_engine;
use crate::services::projection::{self, Projection};
use crate::services::sync_gateway::SyncGateway;
use crate::types::errors::{GatewayError, SelectionError, SessionError};
use crate::types::input::{ClickTarget, Key, PointerButton, RowPart};
use crate::types::settings::ExtensionSettings;
use crate::types::tab::{DisplayMode, GroupId, Tab, TabId, TabSnapshot, WindowId};

/// Identifies one query change; only the latest ticket may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// What a user intent did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Outcome {
    Ignored,
    Filtered { displayed: usize },
    Highlighted { index: i64 },
    Activated { tab_id: TabId, window_id: WindowId },
    Closed { tab_id: TabId },
    MuteToggled { tab_id: TabId, muted: bool },
    GroupToggled { group_id: GroupId, collapsed: bool },
}

/// Awaits a host call, giving up after `timeout_ms` (0 waits forever).
async fn with_deadline<T, F>(timeout_ms: u64, call: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    if timeout_ms == 0 {
        return call.await;
    }
    match tokio::time::timeout(Duration::from_millis(timeout_ms), call).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout(timeout_ms)),
    }
}

pub struct TabSession<G: SyncGateway> {
    gateway: G,
    settings: ExtensionSettings,
    started: bool,
    current_window_id: Option<WindowId>,
    registry: TabRegistry,
    groups: GroupIndex,
    cursor: SelectionCursor,
    query: String,
    latest_ticket: u64,
    projection: Projection,
}

impl<G: SyncGateway> TabSession<G> {
    pub fn new(gateway: G, settings: ExtensionSettings) -> Self {
        let empty = match settings.display_mode() {
            DisplayMode::CurrentWindow => TabSnapshot::CurrentWindow(Vec::new()),
            DisplayMode::AllWindows => TabSnapshot::AllWindows(Vec::new()),
        };
        let registry = TabRegistry::initialize(empty, settings.display_mode(), None);
        Self {
            gateway,
            settings,
            started: false,
            current_window_id: None,
            registry,
            groups: GroupIndex::empty(),
            cursor: SelectionCursor::new(),
            query: String::new(),
            latest_ticket: 0,
            projection: Projection::default(),
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.settings.gateway_timeout_ms
    }

    /// Startup sequence; each step waits for the previous one.
    ///
    /// 1. groups (a host without group support yields an empty index)
    /// 2. current window id
    /// 3. tabs for the configured mode
    /// 4. build index and registry, render unfiltered
    ///
    /// On failure nothing is replaced.
    pub async fn start(&mut self) -> Result<&Projection, SessionError> {
        let timeout_ms = self.timeout_ms();
        let mode = self.settings.display_mode();

        let groups = match with_deadline(timeout_ms, self.gateway.groups()).await {
            Ok(groups) => GroupIndex::build(groups),
            Err(GatewayError::CapabilityAbsent) => {
                debug!("host has no tab groups");
                GroupIndex::empty()
            }
            Err(err) => return Err(self.report(err)),
        };

        let current_window_id = with_deadline(timeout_ms, self.gateway.current_window_id())
            .await
            .map_err(|e| self.report(e))?;

        let snapshot = match mode {
            DisplayMode::CurrentWindow => {
                with_deadline(timeout_ms, self.gateway.current_window_tabs())
                    .await
                    .map(TabSnapshot::CurrentWindow)
            }
            DisplayMode::AllWindows => with_deadline(timeout_ms, self.gateway.all_windows())
                .await
                .map(TabSnapshot::AllWindows),
        }
        .map_err(|e| self.report(e))?;

        self.groups = groups;
        self.current_window_id = Some(current_window_id);
        self.registry = TabRegistry::initialize(snapshot, mode, Some(current_window_id));
        self.cursor.clear();
        self.query.clear();
        self.started = true;
        self.render();
        info!(
            "session started: {} tabs, {} groups, window {}",
            self.registry.tab_count(),
            self.groups.groups().len(),
            current_window_id
        );
        Ok(&self.projection)
    }

    /// Full rebuild from the host, keeping the current query.
    pub async fn refresh(&mut self) -> Result<&Projection, SessionError> {
        let query = self.query.clone();
        self.start().await?;
        self.set_query(&query);
        Ok(&self.projection)
    }

    fn report(&self, err: GatewayError) -> SessionError {
        warn!("host call failed: {}", err);
        SessionError::Gateway(err)
    }

    fn ensure_started(&self) -> Result<(), SessionError> {
        if self.started {
            Ok(())
        } else {
            Err(SessionError::NotStarted)
        }
    }

    fn render(&mut self) {
        let visible = filter_engine::filter(self.registry.state(), &self.query);
        self.projection = projection::project(&visible, &self.groups, self.current_window_id);
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn settings(&self) -> &ExtensionSettings {
        &self.settings
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn current_window_id(&self) -> Option<WindowId> {
        self.current_window_id
    }

    pub fn total_count(&self) -> usize {
        self.registry.tab_count()
    }

    pub fn displayed_count(&self) -> usize {
        self.projection.row_count()
    }

    // --- filtering ---

    /// Registers a query change without applying it yet.
    ///
    /// A caller that waits before applying does so outside the session;
    /// any query change issued meanwhile makes this ticket stale.
    pub fn begin_query(&mut self) -> QueryTicket {
        self.latest_ticket += 1;
        QueryTicket(self.latest_ticket)
    }

    /// Applies `query` if `ticket` is still the latest one issued.
    pub fn apply_query(&mut self, ticket: QueryTicket, query: &str) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!("dropping stale query {:?}", query);
            return false;
        }
        self.query = query.to_string();
        self.cursor.clear();
        self.render();
        true
    }

    /// Replaces the query and re-renders immediately.
    pub fn set_query(&mut self, query: &str) -> Outcome {
        let ticket = self.begin_query();
        self.apply_query(ticket, query);
        Outcome::Filtered {
            displayed: self.displayed_count(),
        }
    }

    pub fn clear_filter(&mut self) -> Outcome {
        self.set_query("")
    }

    /// Key released in the filter box; `value` is the box's text.
    pub fn on_filter_input(&mut self, key: &Key, value: &str) -> Outcome {
        if key.is_navigation() || key.is_modifier() {
            return Outcome::Ignored;
        }
        self.set_query(value)
    }

    // --- cursor ---

    /// Key released anywhere in the popup.
    pub async fn on_key(&mut self, key: &Key) -> Result<Outcome, SessionError> {
        let rows = self.projection.row_count();
        match key {
            Key::ArrowDown => {
                self.cursor.next(rows);
                Ok(self.highlight_outcome())
            }
            Key::ArrowUp => {
                self.cursor.previous(rows);
                Ok(self.highlight_outcome())
            }
            Key::Enter => match self.activate_highlighted().await {
                Ok((tab_id, window_id)) => Ok(Outcome::Activated { tab_id, window_id }),
                Err(SessionError::Selection(SelectionError::NoSelection)) => Ok(Outcome::Ignored),
                Err(err) => Err(err),
            },
            _ => Ok(Outcome::Ignored),
        }
    }

    fn highlight_outcome(&self) -> Outcome {
        Outcome::Highlighted {
            index: self.cursor.highlighted_index(),
        }
    }

    /// Any pointer movement hands the highlight back to hover styling.
    pub fn on_pointer_moved(&mut self) {
        self.cursor.clear();
    }

    /// Activates the highlighted row; `NoSelection` when nothing is highlighted.
    pub async fn activate_highlighted(&mut self) -> Result<(TabId, WindowId), SessionError> {
        self.ensure_started()?;
        let (tab_id, window_id) = self.cursor.activate(&self.projection.rows)?;
        self.activate_tab(tab_id, window_id).await?;
        Ok((tab_id, window_id))
    }

    // --- pointer ---

    /// Click routed from the view. Row identity is resolved through the
    /// current projection; a click on a row no longer displayed is ignored.
    pub async fn on_click(
        &mut self,
        target: ClickTarget,
        button: PointerButton,
    ) -> Result<Outcome, SessionError> {
        match target {
            ClickTarget::Row { tab_id, part } => {
                let Some(row) = self.projection.row_for(tab_id) else {
                    debug!("click on tab {} which is not displayed", tab_id);
                    return Ok(Outcome::Ignored);
                };
                let window_id = row.window_id;
                match (button, part) {
                    (PointerButton::Middle, _) | (PointerButton::Primary, RowPart::CloseButton) => {
                        self.close_tab(tab_id).await?;
                        Ok(Outcome::Closed { tab_id })
                    }
                    (PointerButton::Primary, RowPart::Speaker) => {
                        let muted = self.toggle_mute(tab_id).await?;
                        Ok(Outcome::MuteToggled { tab_id, muted })
                    }
                    (PointerButton::Primary, RowPart::Body) => {
                        self.activate_tab(tab_id, window_id).await?;
                        Ok(Outcome::Activated { tab_id, window_id })
                    }
                    (PointerButton::Secondary, _) => Ok(Outcome::Ignored),
                }
            }
            ClickTarget::Group { group_id } => {
                let collapsed = self.toggle_group_collapsed(group_id).await?;
                Ok(Outcome::GroupToggled {
                    group_id,
                    collapsed,
                })
            }
            ClickTarget::Background => Ok(Outcome::Ignored),
        }
    }

    // --- host actions ---

    /// Closes the tab on the host, then drops it from the registry by id.
    ///
    /// Nothing changes locally until the host confirms. Removal goes by id
    /// against the registry as it stands then, never by row position. Each
    /// action borrows the session exclusively, so actions run one at a time.
    pub async fn close_tab(&mut self, tab_id: TabId) -> Result<Option<Tab>, SessionError> {
        self.ensure_started()?;
        with_deadline(self.timeout_ms(), self.gateway.close_tab(tab_id))
            .await
            .map_err(|e| self.report(e))?;

        let removed = self.registry.remove_tab(tab_id);
        self.render();
        self.cursor.clamp(self.projection.row_count());
        debug!("closed tab {}, {} left", tab_id, self.registry.tab_count());
        Ok(removed)
    }

    /// Focuses the window and activates the tab. No local mirror is kept.
    pub async fn activate_tab(
        &mut self,
        tab_id: TabId,
        window_id: WindowId,
    ) -> Result<(), SessionError> {
        self.ensure_started()?;
        with_deadline(self.timeout_ms(), self.gateway.set_active_tab(tab_id, window_id))
            .await
            .map_err(|e| self.report(e))
    }

    pub async fn set_muted(&mut self, tab_id: TabId, muted: bool) -> Result<(), SessionError> {
        self.ensure_started()?;
        with_deadline(self.timeout_ms(), self.gateway.set_muted(tab_id, muted))
            .await
            .map_err(|e| self.report(e))
    }

    /// Flips the tab's muted flag as the host currently reports it.
    pub async fn toggle_mute(&mut self, tab_id: TabId) -> Result<bool, SessionError> {
        self.ensure_started()?;
        let gateway = &self.gateway;
        let muted = with_deadline(self.timeout_ms(), async move {
            let tab = gateway.get_tab(tab_id).await?;
            gateway.set_muted(tab_id, !tab.muted).await?;
            Ok::<bool, GatewayError>(!tab.muted)
        })
        .await
        .map_err(|e| self.report(e))?;
        Ok(muted)
    }

    /// Delegates the collapse flip to the host; the index stays as built.
    pub async fn toggle_group_collapsed(&mut self, group_id: GroupId) -> Result<bool, SessionError> {
        self.ensure_started()?;
        let call = self.groups.request_toggle_collapsed(&self.gateway, group_id);
        with_deadline(self.timeout_ms(), call)
            .await
            .map_err(|e| self.report(e))
    }
}
