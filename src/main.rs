//! gamekult-news: the latest Gamekult articles in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  FetchMsg  ┌──────────┐  view models  ┌──────────┐
//! │ fetch.rs │ ─────────► │  app.rs  │ ────────────► │  ui.rs   │
//! │  (task)  │  (channel) │ (state)  │   (view.rs)   │ (render) │
//! └──────────┘            └──────────┘               └──────────┘
//!      │                       ▲
//!      ▼                       │ handle_key_event()
//! ┌──────────┐            ┌──────────┐   open / copy / toast   ┌─────────┐
//! │ source/  │            │ input.rs │ ──────────────────────► │ host.rs │
//! └──────────┘            └──────────┘                         └─────────┘
//! ```
//!
//! * **`source/`**: the `DataSource` trait, `FeedItem`, and the RSS source.
//! * **`bucket`**: today / yesterday / earlier classification.
//! * **`fetch`**: the single background fetch.
//! * **`view`**: list and detail view models, independent of ratatui.
//! * **`host`**: browser, clipboard and toast capabilities.
//! * **`app`**, **`ui`**, **`input`**: state, rendering, key handling.

mod app;
mod bucket;
mod config;
mod error;
mod fetch;
mod host;
mod input;
mod source;
mod ui;
mod view;

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use config::Config;
use host::TerminalHost;
use source::RssSource;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Enters raw mode and the alternate screen; [`Drop`] restores both, also
/// during unwinding.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send logs to `path`. The terminal belongs to the UI, so without a log
/// file nothing is recorded.
fn init_tracing(path: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gamekult_news=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref())?;
    install_panic_hook();

    info!(feed = %config.feed_url(), "starting");

    // -- one fetch per run ---------------------------------------------------
    let source = RssSource::new(config.feed_url(), config.site_url());
    let mut rx = fetch::spawn(Box::new(source));

    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();
    let mut host = TerminalHost::new();

    // ~10 fps: apply the fetch outcome if it arrived, draw, then wait for a
    // key for at most one tick.
    let tick_rate = Duration::from_millis(100);

    loop {
        if let Ok(msg) = rx.try_recv() {
            app.apply_fetch(msg, &mut host);
        }

        guard
            .terminal
            .draw(|f| ui::draw(&mut app, host.toast(), f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key, &mut host);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("exiting");
    Ok(())
}
