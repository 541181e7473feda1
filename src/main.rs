//! ANSHTS - Terminal Answer-Sheet Tracker
//!
//! A terminal-based answer-sheet tracker, built in Rust. Profiles hold a
//! user answer list and a standard answer key; a tabbed interface flips
//! between the two lists and a diff view. Everything is persisted
//! automatically to a local data directory.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, ProfileStore};
use infrastructure::{logging, LocalStorage};
use presentation::{render_ui, InputHandler};

/// Resolves the data directory: `$ANSHTS_DATA_DIR`, else
/// `$HOME/.local/share/anshts`, else `./anshts-data`.
fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("ANSHTS_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".local/share/anshts");
    }
    PathBuf::from("anshts-data")
}

/// Entry point for the ANSHTS terminal application.
///
/// Opens the persisted profile store, sets up the terminal interface, and
/// runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the data directory is unusable or if terminal setup
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let storage = LocalStorage::new(data_dir())?;
    let log_path = logging::init_logging(storage.dir())?;
    tracing::info!(
        data_dir = %storage.dir().display(),
        log = %log_path.display(),
        "starting anshts"
    );

    let mut app = App::new(ProfileStore::open(storage));
    app.store
        .subscribe(|book| tracing::debug!(profiles = book.len(), "profile state saved"));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing.
/// Continues running until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        // Header, tab bar, table chrome, and status bar take 10 rows
        app.update_viewport_size((size.height as usize).saturating_sub(10));

        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, application::AppMode::Normal) => {
                        return Ok(())
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
