//! Ghostwriter - terminal writing assistant
//!
//! Entry point for the application.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use ghostwriter::app::App;
use ghostwriter::cli::Args;
use ghostwriter::fs::GhostwriterPaths;
use ghostwriter::logging;
use ghostwriter::tui::TerminalEventGuard;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging is best effort; the UI works without it
    let paths = GhostwriterPaths::from_cwd()?;
    if let Err(e) = logging::init(&paths) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    // Build the app before touching the terminal so startup errors print normally
    let mut app = App::new(&args)?;

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!("Exited with error: {e:#}");
    } else {
        tracing::info!("ghostwriter exiting");
    }
    result
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    // Must be created after ratatui::init, which resets terminal flags.
    let _event_guard = TerminalEventGuard::new();

    loop {
        // Layout must be computed inside draw to match the rendered area
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Paste(text) => {
                    tracing::debug!(len = text.len(), lines = text.lines().count(), "paste");
                    app.handle_paste(&text);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                _ => {}
            }
        }

        // Apply finished requests
        app.process_events();

        // Expire toasts
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
