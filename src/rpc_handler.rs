//! JSON method handler between the popup view and a `TabSession`.
//!
//! The view reports user intents as `{method, params}` and redraws from the
//! `view` object returned alongside each outcome.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::Instant;

use crate::app::{Outcome, QueryTicket, TabSession};
use crate::services::sync_gateway::SyncGateway;
use crate::types::input::{ClickTarget, Key, PointerButton, RowPart};

/// Everything the view needs to redraw.
pub fn view_json<G: SyncGateway>(session: &TabSession<G>) -> Result<Value, String> {
    let projection = serde_json::to_value(session.projection()).map_err(|e| e.to_string())?;
    Ok(json!({
        "projection": projection,
        "highlighted": session.cursor().highlighted_index(),
        "query": session.query(),
        "total": session.total_count(),
        "displayed": session.displayed_count(),
        "theme": session.settings().theme.name,
    }))
}

fn respond<G: SyncGateway>(session: &TabSession<G>, outcome: Outcome) -> Result<Value, String> {
    let outcome = serde_json::to_value(outcome).map_err(|e| e.to_string())?;
    Ok(json!({"outcome": outcome, "view": view_json(session)?}))
}

fn parse_button(params: &Value) -> Result<PointerButton, String> {
    match params.get("button").and_then(|v| v.as_str()).unwrap_or("primary") {
        "primary" => Ok(PointerButton::Primary),
        "middle" => Ok(PointerButton::Middle),
        "secondary" => Ok(PointerButton::Secondary),
        other => Err(format!("invalid button: {}", other)),
    }
}

fn parse_part(params: &Value) -> Result<RowPart, String> {
    match params.get("part").and_then(|v| v.as_str()).unwrap_or("body") {
        "body" => Ok(RowPart::Body),
        "close" => Ok(RowPart::CloseButton),
        "speaker" => Ok(RowPart::Speaker),
        other => Err(format!("invalid part: {}", other)),
    }
}

/// A `popup.filter` held back until the filter box has been quiet.
#[derive(Debug)]
pub struct PendingFilter {
    /// Request id to answer once the filter is flushed.
    pub id: Value,
    pub due: Instant,
    ticket: QueryTicket,
    value: String,
}

/// Takes a query ticket for a `popup.filter` that carries `debounceMs`.
///
/// Returns `None` when the request should go through `handle_method` right
/// away: no delay was given, or the key is one the filter box ignores.
pub fn defer_filter<G: SyncGateway>(
    session: &mut TabSession<G>,
    id: Value,
    params: &Value,
) -> Result<Option<PendingFilter>, String> {
    let delay = match params.get("debounceMs").and_then(|v| v.as_u64()) {
        Some(ms) if ms > 0 => Duration::from_millis(ms),
        _ => return Ok(None),
    };
    let value = params.get("value").and_then(|v| v.as_str()).ok_or("missing value")?;
    if let Some(key) = params.get("key").and_then(|v| v.as_str()) {
        let key = Key::from_dom_key(key);
        if key.is_navigation() || key.is_modifier() {
            return Ok(None);
        }
    }
    Ok(Some(PendingFilter {
        id,
        due: Instant::now() + delay,
        ticket: session.begin_query(),
        value: value.to_string(),
    }))
}

/// Applies a deferred filter. One superseded by a later query change answers
/// `ignored` and leaves the view untouched.
pub fn flush_filter<G: SyncGateway>(
    session: &mut TabSession<G>,
    pending: PendingFilter,
) -> Result<Value, String> {
    let outcome = if session.apply_query(pending.ticket, &pending.value) {
        Outcome::Filtered {
            displayed: session.displayed_count(),
        }
    } else {
        Outcome::Ignored
    };
    respond(session, outcome)
}

/// Dispatch one view message to the session.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method<G: SyncGateway>(
    session: &mut TabSession<G>,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Lifecycle ───
        "popup.start" => {
            session.start().await.map_err(|e| e.to_string())?;
            view_json(session)
        }
        "popup.refresh" => {
            session.refresh().await.map_err(|e| e.to_string())?;
            view_json(session)
        }
        "popup.render" => view_json(session),
        "popup.count" => Ok(json!({
            "total": session.total_count(),
            "displayed": session.displayed_count(),
        })),

        // ─── Filter box ───
        "popup.filter" => {
            let value = params.get("value").and_then(|v| v.as_str()).ok_or("missing value")?;
            let outcome = match params.get("key").and_then(|v| v.as_str()) {
                Some(key) => session.on_filter_input(&Key::from_dom_key(key), value),
                None => session.set_query(value),
            };
            respond(session, outcome)
        }
        "popup.clearFilter" => {
            let outcome = session.clear_filter();
            respond(session, outcome)
        }

        // ─── Keyboard and pointer ───
        "popup.key" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let outcome = session
                .on_key(&Key::from_dom_key(key))
                .await
                .map_err(|e| e.to_string())?;
            respond(session, outcome)
        }
        "popup.pointerMove" => {
            session.on_pointer_moved();
            respond(session, Outcome::Ignored)
        }
        "popup.click" => {
            let button = parse_button(params)?;
            let target = match params.get("tabId").and_then(|v| v.as_i64()) {
                Some(tab_id) => ClickTarget::Row {
                    tab_id,
                    part: parse_part(params)?,
                },
                None => ClickTarget::Background,
            };
            let outcome = session
                .on_click(target, button)
                .await
                .map_err(|e| e.to_string())?;
            respond(session, outcome)
        }
        "popup.groupClick" => {
            let group_id = params.get("groupId").and_then(|v| v.as_i64()).ok_or("missing groupId")?;
            let outcome = session
                .on_click(ClickTarget::Group { group_id }, PointerButton::Primary)
                .await
                .map_err(|e| e.to_string())?;
            respond(session, outcome)
        }

        // ─── Settings ───
        "settings.get" => serde_json::to_value(session.settings()).map_err(|e| e.to_string()),

        _ => Err(format!("unknown method: {}", method)),
    }
}
