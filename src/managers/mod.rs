// Tabfinder state managers
// Managers own session state: the tab registry, the group index and the selection cursor.

pub mod group_index;
pub mod selection_cursor;
pub mod tab_registry;
