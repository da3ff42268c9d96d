//! Terminal UI components using ratatui

mod layout;
mod terminal;
mod ui;

pub use layout::SlotGrid;
pub use terminal::Tui;
pub use ui::render;
