mod app;
mod error;
mod event;
mod history;
mod http;
mod sidebar;
mod state;
mod storage;
mod terminal;
mod ui;

use std::time::Duration;

use tokio::sync::mpsc;

use crate::app::App;
use crate::event::Event;
use crate::history::store::SqliteHistoryStore;
use crate::ui::layout::sidebar_view_height;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let workspace = storage::workspace::load_workspace("default");
    storage::workspace::save_workspace(&workspace)?;

    let mut collections = storage::collection::load_all_collections(&workspace.name);
    if collections.is_empty() {
        collections = storage::collection::seed_collections();
        storage::collection::save_all_collections(&workspace.name, &collections);
    }

    let data_dir = storage::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let history = SqliteHistoryStore::open(&data_dir.join("history.db"))?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    // Background thread: read crossterm events and feed into channel
    let event_tx = tx.clone();
    std::thread::spawn(move || loop {
        if crossterm::event::poll(Duration::from_millis(16)).unwrap_or(false) {
            match crossterm::event::read() {
                Ok(crossterm::event::Event::Key(key)) => {
                    let _ = event_tx.send(Event::Key(key));
                }
                Ok(crossterm::event::Event::Resize(w, h)) => {
                    let _ = event_tx.send(Event::Resize(w, h));
                }
                _ => {}
            }
        } else {
            let _ = event_tx.send(Event::Tick);
        }
    });

    let mut terminal = terminal::init()?;
    let mut app = App::new(tx, workspace.name.clone(), collections, history);
    let size = terminal.size()?;
    app.state.sidebar.set_view_height(sidebar_view_height(size.height));

    let result = run_loop(&mut terminal, &mut app, &mut rx).await;

    terminal::restore()?;
    result
}

async fn run_loop(
    terminal: &mut terminal::Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> anyhow::Result<()> {
    loop {
        if app.state.dirty {
            terminal.draw(|frame| ui::layout::render(frame, &app.state))?;
            app.state.dirty = false;
        }

        match rx.recv().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.state.should_quit {
            break;
        }
    }
    Ok(())
}

/// Logging goes to a file only when QUIVER_LOG names one, so the terminal
/// UI is never corrupted by log output.
fn init_logging() {
    if let Ok(log_file) = std::env::var("QUIVER_LOG") {
        if let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&log_file) {
            env_logger::Builder::new()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .filter_level(log::LevelFilter::Debug)
                .init();
            log::info!("quiver starting up");
        }
    }
}
