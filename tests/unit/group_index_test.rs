use tabfinder::managers::group_index::{GroupIndex, GroupIndexTrait};
use tabfinder::services::memory_gateway::{GatewayCall, InMemoryGateway};
use tabfinder::types::errors::GatewayError;
use tabfinder::types::group::{Group, GroupColor};
use tabfinder::types::tab::Tab;

fn work_and_fun() -> Vec<Group> {
    vec![
        Group {
            id: 5,
            title: "Work".to_string(),
            color: GroupColor::Blue,
            collapsed: false,
        },
        Group {
            id: 9,
            title: "Fun".to_string(),
            color: GroupColor::Pink,
            collapsed: true,
        },
    ]
}

#[test]
fn test_build_and_lookup() {
    let index = GroupIndex::build(work_and_fun());
    assert_eq!(index.len(), 2);

    let work = index.lookup(Some(5)).unwrap();
    assert_eq!(work.title, "Work");
    assert_eq!(work.color, GroupColor::Blue);
    assert!(!work.collapsed);

    let fun = index.lookup(Some(9)).unwrap();
    assert!(fun.collapsed);
}

#[test]
fn test_lookup_ungrouped_and_unknown() {
    let index = GroupIndex::build(work_and_fun());
    assert!(index.lookup(None).is_none());
    assert!(index.lookup(Some(77)).is_none());
}

#[test]
fn test_groups_keep_snapshot_order() {
    let index = GroupIndex::build(work_and_fun());
    let ids: Vec<i64> = index.groups().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![5, 9]);
}

#[test]
fn test_empty_index() {
    let index = GroupIndex::empty();
    assert!(index.is_empty());
    assert!(index.lookup(Some(5)).is_none());
}

#[test]
fn test_palette_hex_values_are_distinct() {
    let mut hexes: Vec<&str> = GroupColor::ALL.iter().map(|c| c.hex()).collect();
    hexes.sort();
    hexes.dedup();
    assert_eq!(hexes.len(), GroupColor::ALL.len());
    assert!(hexes.iter().all(|h| h.starts_with('#') && h.len() == 7));
}

#[test]
fn test_group_color_deserializes_lowercase() {
    let group: Group =
        serde_json::from_str(r#"{"id":3,"title":"x","color":"cyan","collapsed":false}"#).unwrap();
    assert_eq!(group.color, GroupColor::Cyan);
}

#[tokio::test]
async fn test_toggle_reads_fresh_and_leaves_index_stale() {
    let gateway = InMemoryGateway::single_window(1, vec![Tab::new(1, 1, "a", "a")])
        .with_groups(work_and_fun());
    let index = GroupIndex::build(work_and_fun());

    let collapsed = index.request_toggle_collapsed(&gateway, 5).await.unwrap();
    assert!(collapsed);
    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::GetGroup(5), GatewayCall::SetGroupCollapsed(5, true)]
    );

    // The index is never patched in place.
    assert!(!index.lookup(Some(5)).unwrap().collapsed);

    // A second toggle reads the host's new value, not the stale index.
    let collapsed = index.request_toggle_collapsed(&gateway, 5).await.unwrap();
    assert!(!collapsed);
}

#[tokio::test]
async fn test_toggle_unknown_group_fails() {
    let gateway = InMemoryGateway::single_window(1, vec![]).with_groups(work_and_fun());
    let index = GroupIndex::build(work_and_fun());
    let result = index.request_toggle_collapsed(&gateway, 404).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}
