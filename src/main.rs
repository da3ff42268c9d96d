//! LOBSTERBLE - drag letter tiles between your rack and a 15x15 board
//!
//! Mouse to move tiles, keys for turn actions.

mod app;
mod config;
mod logging;
mod tui;

use app::App;
use clap::Parser;
use config::{Cli, ConfigError};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Position as Point;
use std::io;
use std::time::Duration;
use tracing::info;
use tui::{SlotGrid, Tui};

/// Errors that end the program
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let log_path = cli.resolve_log_file()?;
    logging::init(&log_path, &cli.log_level)?;
    info!(game_id = %cli.game_id, seed = ?cli.seed, log = %log_path.display(), "starting");

    // Initialize terminal
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let mut app = App::new(cli.game_id, cli.seed);
    let poll_timeout = Duration::from_millis(250);

    loop {
        // Geometry follows the terminal size so hit-testing matches what is drawn
        app.set_layout(SlotGrid::new(terminal.area()?));
        terminal.draw(|frame| tui::render(frame, &app))?;

        if event::poll(poll_timeout)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc => app.on_escape(),
                    KeyCode::Enter => app.on_enter(),
                    KeyCode::Char(c) => app.on_char(c),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let point = Point::new(mouse.column, mouse.row);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => app.on_press(point),
                        MouseEventKind::Drag(MouseButton::Left) => app.on_drag(point),
                        MouseEventKind::Up(MouseButton::Left) => app.on_release(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("quitting");
    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}
