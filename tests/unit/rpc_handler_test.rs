//! Unit tests for the view message handler: every method dispatched by
//! `handle_method`, against an in-memory host.

use serde_json::{json, Value};

use tabfinder::app::TabSession;
use tabfinder::rpc_handler::{defer_filter, flush_filter, handle_method};
use tabfinder::services::memory_gateway::{GatewayCall, HostSnapshot, InMemoryGateway};
use tabfinder::types::errors::GatewayError;
use tabfinder::types::settings::ExtensionSettings;
use tabfinder::types::tab::Tab;

fn snapshot_json() -> Value {
    json!({
        "currentWindowId": 1,
        "windows": [{
            "id": 1,
            "focused": true,
            "tabs": [
                {"id": 11, "windowId": 1, "title": "GitHub", "url": "https://github.com", "active": true, "groupId": 3},
                {"id": 12, "windowId": 1, "title": "Docs", "url": "https://docs.io", "groupId": -1},
                {"id": 13, "windowId": 1, "title": "Radio", "url": "https://radio.example", "audible": true}
            ]
        }],
        "groups": [{"id": 3, "title": "Code", "color": "purple", "collapsed": false}]
    })
}

async fn setup() -> TabSession<InMemoryGateway> {
    let snapshot: HostSnapshot = serde_json::from_value(snapshot_json()).unwrap();
    let mut session = TabSession::new(InMemoryGateway::new(snapshot), ExtensionSettings::default());
    handle_method(&mut session, "popup.start", &json!({})).await.unwrap();
    session
}

fn row_ids(view: &Value) -> Vec<i64> {
    view["projection"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["tabId"].as_i64().unwrap())
        .collect()
}

// ─── Ping / unknown ───

#[tokio::test]
async fn test_ping() {
    let mut session = setup().await;
    let res = handle_method(&mut session, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let mut session = setup().await;
    let res = handle_method(&mut session, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Render ───

#[tokio::test]
async fn test_render_payload() {
    let mut session = setup().await;
    let view = handle_method(&mut session, "popup.render", &json!({})).await.unwrap();
    assert_eq!(row_ids(&view), vec![11, 12, 13]);
    assert_eq!(view["highlighted"], json!(-1));
    assert_eq!(view["total"], json!(3));
    assert_eq!(view["theme"], json!("dark"));
    assert_eq!(view["projection"]["rows"][0]["group"]["title"], json!("Code"));
    assert_eq!(view["projection"]["rows"][1]["group"], Value::Null);
    assert_eq!(view["projection"]["groups"][0]["hex"], json!("#a142f4"));
}

#[tokio::test]
async fn test_group_sentinel_round_trips() {
    let tab: Tab = serde_json::from_value(json!({"id": 1, "windowId": 2, "groupId": -1})).unwrap();
    assert_eq!(tab.group_id, None);
    let back = serde_json::to_value(&tab).unwrap();
    assert_eq!(back["groupId"], json!(-1));
}

// ─── Filter ───

#[tokio::test]
async fn test_filter_and_clear() {
    let mut session = setup().await;
    let res = handle_method(&mut session, "popup.filter", &json!({"value": "git", "key": "t"}))
        .await
        .unwrap();
    assert_eq!(res["outcome"], json!({"kind": "filtered", "displayed": 1}));
    assert_eq!(row_ids(&res["view"]), vec![11]);

    let res = handle_method(&mut session, "popup.clearFilter", &json!({})).await.unwrap();
    assert_eq!(row_ids(&res["view"]), vec![11, 12, 13]);
}

#[tokio::test]
async fn test_filter_ignores_arrow_keys() {
    let mut session = setup().await;
    let res = handle_method(
        &mut session,
        "popup.filter",
        &json!({"value": "git", "key": "ArrowDown"}),
    )
    .await
    .unwrap();
    assert_eq!(res["outcome"], json!({"kind": "ignored"}));
    assert_eq!(res["view"]["displayed"], json!(3));
}

#[tokio::test]
async fn test_filter_requires_value() {
    let mut session = setup().await;
    assert!(handle_method(&mut session, "popup.filter", &json!({})).await.is_err());
}

#[tokio::test]
async fn test_superseded_debounced_filter_is_dropped() {
    let mut session = setup().await;
    let first = defer_filter(&mut session, json!(1), &json!({"value": "g", "debounceMs": 20}))
        .unwrap()
        .unwrap();
    let second = defer_filter(&mut session, json!(2), &json!({"value": "gi", "debounceMs": 20}))
        .unwrap()
        .unwrap();

    tokio::time::sleep_until(second.due).await;
    assert!(first.due <= second.due);

    let res = flush_filter(&mut session, first).unwrap();
    assert_eq!(res["outcome"], json!({"kind": "ignored"}));
    assert_eq!(res["view"]["query"], json!(""));
    assert_eq!(res["view"]["displayed"], json!(3));

    let res = flush_filter(&mut session, second).unwrap();
    assert_eq!(res["outcome"], json!({"kind": "filtered", "displayed": 1}));
    assert_eq!(res["view"]["query"], json!("gi"));
}

#[tokio::test]
async fn test_immediate_filter_supersedes_deferred_one() {
    let mut session = setup().await;
    let waiting = defer_filter(&mut session, json!(1), &json!({"value": "radio", "debounceMs": 10}))
        .unwrap()
        .unwrap();
    handle_method(&mut session, "popup.filter", &json!({"value": "docs"}))
        .await
        .unwrap();

    tokio::time::sleep_until(waiting.due).await;
    let res = flush_filter(&mut session, waiting).unwrap();
    assert_eq!(res["outcome"], json!({"kind": "ignored"}));
    assert_eq!(row_ids(&res["view"]), vec![12]);
}

#[tokio::test]
async fn test_defer_filter_passes_through_without_delay() {
    let mut session = setup().await;
    assert!(defer_filter(&mut session, json!(1), &json!({"value": "git"}))
        .unwrap()
        .is_none());
    assert!(defer_filter(&mut session, json!(1), &json!({"value": "git", "debounceMs": 0}))
        .unwrap()
        .is_none());
    assert!(defer_filter(
        &mut session,
        json!(1),
        &json!({"value": "git", "key": "ArrowUp", "debounceMs": 20})
    )
    .unwrap()
    .is_none());
    assert!(defer_filter(&mut session, json!(1), &json!({"debounceMs": 20})).is_err());
}

// ─── Keyboard / pointer ───

#[tokio::test]
async fn test_key_navigation_and_enter() {
    let mut session = setup().await;
    handle_method(&mut session, "popup.key", &json!({"key": "ArrowDown"})).await.unwrap();
    let res = handle_method(&mut session, "popup.key", &json!({"key": "ArrowDown"}))
        .await
        .unwrap();
    assert_eq!(res["outcome"], json!({"kind": "highlighted", "index": 1}));

    let res = handle_method(&mut session, "popup.key", &json!({"key": "Enter"}))
        .await
        .unwrap();
    assert_eq!(
        res["outcome"],
        json!({"kind": "activated", "tabId": 12, "windowId": 1})
    );

    let res = handle_method(&mut session, "popup.pointerMove", &json!({})).await.unwrap();
    assert_eq!(res["view"]["highlighted"], json!(-1));
}

#[tokio::test]
async fn test_click_close_button() {
    let mut session = setup().await;
    let res = handle_method(
        &mut session,
        "popup.click",
        &json!({"tabId": 13, "part": "close"}),
    )
    .await
    .unwrap();
    assert_eq!(res["outcome"], json!({"kind": "closed", "tabId": 13}));
    assert_eq!(res["view"]["total"], json!(2));
}

#[tokio::test]
async fn test_click_rejected_by_host_surfaces_error() {
    let snapshot: HostSnapshot = serde_json::from_value(snapshot_json()).unwrap();
    let gateway = InMemoryGateway::new(snapshot)
        .with_rejection("close_tab", GatewayError::Rejected("busy".to_string()));
    let mut session = TabSession::new(gateway, ExtensionSettings::default());
    handle_method(&mut session, "popup.start", &json!({})).await.unwrap();

    let res = handle_method(
        &mut session,
        "popup.click",
        &json!({"tabId": 13, "button": "middle"}),
    )
    .await;
    assert!(res.unwrap_err().contains("busy"));

    let count = handle_method(&mut session, "popup.count", &json!({})).await.unwrap();
    assert_eq!(count, json!({"total": 3, "displayed": 3}));
}

#[tokio::test]
async fn test_click_invalid_part() {
    let mut session = setup().await;
    let res = handle_method(
        &mut session,
        "popup.click",
        &json!({"tabId": 13, "part": "favicon"}),
    )
    .await;
    assert!(res.is_err());
}

#[tokio::test]
async fn test_group_click() {
    let mut session = setup().await;
    let res = handle_method(&mut session, "popup.groupClick", &json!({"groupId": 3}))
        .await
        .unwrap();
    assert_eq!(
        res["outcome"],
        json!({"kind": "groupToggled", "groupId": 3, "collapsed": true})
    );
    assert!(session
        .gateway()
        .calls()
        .contains(&GatewayCall::SetGroupCollapsed(3, true)));
}

// ─── Settings ───

#[tokio::test]
async fn test_settings_get() {
    let mut session = setup().await;
    let res = handle_method(&mut session, "settings.get", &json!({})).await.unwrap();
    assert_eq!(res["onlyCurrentWindow"], json!(true));
    assert_eq!(res["theme"]["name"], json!("dark"));
}

#[tokio::test]
async fn test_start_without_group_support() {
    let mut snapshot: HostSnapshot = serde_json::from_value(snapshot_json()).unwrap();
    snapshot.groups = None;
    let mut session = TabSession::new(InMemoryGateway::new(snapshot), ExtensionSettings::default());
    let view = handle_method(&mut session, "popup.start", &json!({})).await.unwrap();
    assert_eq!(view["projection"]["groups"], json!([]));
    assert_eq!(view["projection"]["rows"][0]["group"], Value::Null);
}
