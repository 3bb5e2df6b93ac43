//! Tabfinder RPC harness. Drives a popup session over stdin/stdout.
//!
//! Usage: `tabfinder-rpc <host-snapshot.json> [settings.json]`
//!
//! The host is simulated in memory from the snapshot file, so the view layer
//! can be developed and scripted without a browser.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"popup.filter", "params":{"value":"git"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! A `popup.filter` with `"debounceMs": n` is answered once the filter box has
//! been quiet for n ms. A filter superseded before then answers `ignored`.

use std::io::{self, Write};

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use tabfinder::app::TabSession;
use tabfinder::rpc_handler::{defer_filter, flush_filter, handle_method, PendingFilter};
use tabfinder::services::memory_gateway::{HostSnapshot, InMemoryGateway};
use tabfinder::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

fn emit(value: &Value) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.flush();
}

fn load_snapshot(path: &str) -> Result<HostSnapshot, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    serde_json::from_str(&content).map_err(|e| format!("cannot parse {}: {}", path, e))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = tabfinder::logging::init("warn") {
        eprintln!("logging disabled: {}", e);
    }

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        eprintln!("usage: tabfinder-rpc <host-snapshot.json> [settings.json]");
        std::process::exit(2);
    };

    let snapshot = match load_snapshot(&snapshot_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut engine = SettingsEngine::new(args.next());
    let settings = match engine.load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            Default::default()
        }
    };

    let mut session = TabSession::new(InMemoryGateway::new(snapshot), settings);

    emit(&json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<PendingFilter> = None;

    loop {
        let due = pending.as_ref().map(|p| p.due);
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    _ => break,
                };
                serve_line(&mut session, &line, &mut pending).await;
            }
            _ = quiet_until(due) => {
                if let Some(filter) = pending.take() {
                    flush(&mut session, filter);
                }
            }
        }
    }

    if let Some(filter) = pending.take() {
        flush(&mut session, filter);
    }
}

/// Resolves at `due`, or never when no filter is waiting.
async fn quiet_until(due: Option<Instant>) {
    match due {
        Some(due) => tokio::time::sleep_until(due).await,
        None => std::future::pending::<()>().await,
    }
}

fn reply(id: Value, result: Result<Value, String>) -> Value {
    match result {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

fn flush(session: &mut TabSession<InMemoryGateway>, filter: PendingFilter) {
    let id = filter.id.clone();
    emit(&reply(id, flush_filter(session, filter)));
}

async fn serve_line(
    session: &mut TabSession<InMemoryGateway>,
    line: &str,
    pending: &mut Option<PendingFilter>,
) {
    if line.trim().is_empty() {
        return;
    }

    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            emit(&json!({"id":null,"error":format!("parse error: {}",e)}));
            return;
        }
    };

    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
    let params = req.get("params").cloned().unwrap_or(json!({}));

    if method == "popup.filter" {
        match defer_filter(session, id.clone(), &params) {
            Ok(Some(next)) => {
                // The newer ticket has already made the waiting one stale.
                if let Some(previous) = pending.replace(next) {
                    flush(session, previous);
                }
                return;
            }
            Ok(None) => {}
            Err(err) => {
                emit(&reply(id, Err(err)));
                return;
            }
        }
    }

    let result = handle_method(session, method, &params).await;
    emit(&reply(id, result));
}
