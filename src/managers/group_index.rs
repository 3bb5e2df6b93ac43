//! Group Index for Tabfinder.
//!
//! Read-only view of the host's tab groups, rebuilt wholesale from a
//! snapshot. Toggling a group is delegated to the host; the index is not
//! patched and shows the change only after the next rebuild.

use std::collections::HashMap;

use log::debug;

use crate::services::sync_gateway::SyncGateway;
use crate::types::errors::GatewayError;
use crate::types::group::{Group, GroupMeta};
use crate::types::tab::GroupId;

/// Trait defining the group lookup interface.
pub trait GroupIndexTrait {
    fn lookup(&self, group_id: Option<GroupId>) -> Option<&GroupMeta>;
    fn groups(&self) -> &[Group];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Group metadata keyed by group id, plus the groups in snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupIndex {
    ordered: Vec<Group>,
    by_id: HashMap<GroupId, GroupMeta>,
}

impl GroupIndex {
    pub fn build(raw_groups: Vec<Group>) -> Self {
        let by_id = raw_groups
            .iter()
            .map(|g| (g.id, GroupMeta::from(g)))
            .collect();
        Self {
            ordered: raw_groups,
            by_id,
        }
    }

    /// Index for a host without tab groups.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Asks the host to flip the group's collapsed flag.
    ///
    /// Reads the group fresh from the host rather than from this index, which
    /// may be stale after earlier toggles. Returns the collapsed value sent.
    pub async fn request_toggle_collapsed<G>(
        &self,
        gateway: &G,
        group_id: GroupId,
    ) -> Result<bool, GatewayError>
    where
        G: SyncGateway + ?Sized,
    {
        let group = gateway.get_group(group_id).await?;
        let collapsed = !group.collapsed;
        gateway.set_group_collapsed(group_id, collapsed).await?;
        debug!("group {} collapsed -> {}", group_id, collapsed);
        Ok(collapsed)
    }
}

impl GroupIndexTrait for GroupIndex {
    /// `None` for an ungrouped tab or a group missing from the snapshot.
    fn lookup(&self, group_id: Option<GroupId>) -> Option<&GroupMeta> {
        group_id.and_then(|id| self.by_id.get(&id))
    }

    fn groups(&self) -> &[Group] {
        &self.ordered
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }

    fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
