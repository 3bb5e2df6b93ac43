//! Tabfinder: a filterable, keyboard-driven switcher over the browser's open tabs.
//!
//! Entry point: runs a console walk-through of a popup session against an
//! in-memory host, exercising filtering, keyboard selection, grouping and
//! the confirmed-close flow.

use std::error::Error;

use tabfinder::app::TabSession;
use tabfinder::managers::group_index::GroupIndexTrait;
use tabfinder::managers::selection_cursor::SelectionCursorTrait;
use tabfinder::services::memory_gateway::{HostSnapshot, InMemoryGateway};
use tabfinder::services::projection::Projection;
use tabfinder::types::errors::GatewayError;
use tabfinder::types::group::{Group, GroupColor};
use tabfinder::types::input::{ClickTarget, Key, PointerButton, RowPart};
use tabfinder::types::settings::ExtensionSettings;
use tabfinder::types::tab::{Tab, Window};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    if let Err(e) = tabfinder::logging::init("info") {
        eprintln!("logging disabled: {}", e);
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Tabfinder v{} - Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_current_window().await?;
    demo_all_windows().await?;
    demo_failed_close().await?;

    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All demos completed");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_rows(projection: &Projection, highlighted: Option<usize>) {
    for section in &projection.sections {
        if let Some(window_id) = section.window_id {
            println!("  [window {}]", window_id);
        }
        for index in section.start..section.start + section.len {
            let row = &projection.rows[index];
            let marker = if Some(index) == highlighted { '>' } else { ' ' };
            let active = if row.active { '*' } else { ' ' };
            let group = row
                .group
                .as_ref()
                .map(|g| format!(" ({} {})", g.title, g.hex))
                .unwrap_or_default();
            println!("  {}{} #{} {}{}", marker, active, row.tab_id, row.title, group);
        }
    }
}

fn demo_host() -> HostSnapshot {
    let mut github = Tab::new(1, 10, "GitHub", "https://github.com");
    github.active = true;
    github.group_id = Some(100);
    let mut docs = Tab::new(2, 10, "Docs", "https://docs.rs");
    docs.group_id = Some(100);
    let mut music = Tab::new(3, 10, "Radio", "https://radio.example");
    music.audible = true;
    let mut other_docs = Tab::new(4, 20, "Rust Docs", "https://doc.rust-lang.org");
    other_docs.active = true;

    HostSnapshot {
        current_window_id: 10,
        windows: vec![
            Window {
                id: 20,
                focused: false,
                tabs: vec![other_docs],
            },
            Window {
                id: 10,
                focused: true,
                tabs: vec![github, docs, music],
            },
        ],
        groups: Some(vec![Group {
            id: 100,
            title: "Work".to_string(),
            color: GroupColor::Blue,
            collapsed: false,
        }]),
    }
}

async fn demo_current_window() -> Result<(), Box<dyn Error>> {
    section("Current window");

    let mut session = TabSession::new(
        InMemoryGateway::new(demo_host()),
        ExtensionSettings::default(),
    );
    session.start().await?;
    println!("  {} tabs, {} groups", session.total_count(), session.groups().len());
    print_rows(session.projection(), session.cursor().highlighted());

    session.on_filter_input(&Key::Other("g".to_string()), "git");
    println!("  filter \"git\" -> {} rows", session.displayed_count());
    session.on_key(&Key::ArrowDown).await?;
    print_rows(session.projection(), session.cursor().highlighted());
    let outcome = session.on_key(&Key::Enter).await?;
    println!("  Enter -> {:?}", outcome);

    session.clear_filter();
    let outcome = session
        .on_click(
            ClickTarget::Row {
                tab_id: 3,
                part: RowPart::Speaker,
            },
            PointerButton::Primary,
        )
        .await?;
    println!("  speaker click -> {:?}", outcome);

    let outcome = session
        .on_click(ClickTarget::Group { group_id: 100 }, PointerButton::Primary)
        .await?;
    println!("  group click -> {:?}", outcome);

    session.close_tab(2).await?;
    println!("  closed #2, {} tabs left", session.total_count());
    println!("  ✓ Current window OK");
    println!();
    Ok(())
}

async fn demo_all_windows() -> Result<(), Box<dyn Error>> {
    section("All windows");

    let settings = ExtensionSettings {
        only_current_window: false,
        ..ExtensionSettings::default()
    };
    let mut session = TabSession::new(InMemoryGateway::new(demo_host()), settings);
    session.start().await?;
    print_rows(session.projection(), None);

    session.set_query("docs");
    println!("  filter \"docs\":");
    print_rows(session.projection(), None);
    println!("  ✓ All windows OK");
    println!();
    Ok(())
}

async fn demo_failed_close() -> Result<(), Box<dyn Error>> {
    section("Rejected close");

    let gateway = InMemoryGateway::new(demo_host())
        .with_rejection("close_tab", GatewayError::Rejected("tab is pinned".to_string()));
    let mut session = TabSession::new(gateway, ExtensionSettings::default());
    session.start().await?;

    let before = session.total_count();
    if let Err(err) = session.close_tab(1).await {
        println!("  close failed: {}", err);
    }
    println!("  tabs before: {}, after: {}", before, session.total_count());
    println!("  ✓ Rejected close OK");
    println!();
    Ok(())
}
