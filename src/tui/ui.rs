//! UI rendering using ratatui
//!
//! Everything is drawn into the rects of the app's `SlotGrid`, so what the
//! player sees is exactly what the mouse hits.

use crate::app::App;
use crate::tui::layout::{centered_popup, SlotGrid};
use lobsterble::game::{
    premium_at, FrontTaker, Letter, Premium, NUM_BOARD_COLUMNS, NUM_BOARD_ROWS, NUM_RACK_TILES,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Render the whole game view
pub fn render(frame: &mut Frame, app: &App) {
    let grid = app.layout();

    render_header(frame, grid.header, app);
    render_board(frame, grid, app);
    render_rack(frame, grid, app);
    render_actions(frame, grid.actions, app);
    render_footer(frame, grid.footer, app);
    render_dragged_tile(frame, app);

    let resolver = app.resolver();
    if resolver.blank_picker_open() {
        render_blank_picker(frame, grid.area);
    } else if resolver.exchange_picker_open() {
        render_exchange_picker(frame, grid.area, app);
    }
}

/// Render the header: title and scores
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(inner);

    let title = Paragraph::new(format!("LOBSTERBLE  {}", app.game_id))
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let scores = Paragraph::new(format_scores(app))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Right);
    frame.render_widget(scores, header_layout[1]);
}

/// Border colour for a surface; the one a drag started from is drawn on top.
fn surface_style(front: FrontTaker, surface: FrontTaker) -> Style {
    if front == surface {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_board(frame: &mut Frame, grid: &SlotGrid, app: &App) {
    let resolver = app.resolver();
    let board = resolver.board();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(surface_style(resolver.front_taker(), FrontTaker::Board))
        .title("Board");
    frame.render_widget(block, grid.board);

    let hover = app.drag().and_then(|d| d.hover.board_cell());
    let origin = app.drag().and_then(|d| d.origin.board_cell());

    for row in 0..NUM_BOARD_ROWS {
        for column in 0..NUM_BOARD_COLUMNS {
            let area = grid.board_cell(row, column);
            if area.is_empty() {
                continue;
            }
            let letter = board.get(row, column).copied().unwrap_or(Letter::EMPTY);
            let lifted = origin == Some((row, column));

            let (text, mut style) = if letter.is_empty() || lifted {
                (" · ".to_string(), premium_style(premium_at(row, column)))
            } else if board.is_locked(row, column) {
                (
                    format!(" {} ", letter.character()),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                )
            } else {
                (
                    format!(" {} ", letter.character()),
                    Style::default().fg(Color::Black).bg(Color::LightCyan).bold(),
                )
            };
            if hover == Some((row, column)) {
                style = style.bg(Color::Green);
            }
            frame.render_widget(Paragraph::new(text).style(style), area);
        }
    }
}

fn premium_style(premium: Premium) -> Style {
    match premium {
        Premium::TripleWord => Style::default().fg(Color::White).bg(Color::Red),
        Premium::Centre => Style::default().fg(Color::White).bg(ORANGE),
        Premium::None => Style::default().fg(Color::DarkGray),
    }
}

fn render_rack(frame: &mut Frame, grid: &SlotGrid, app: &App) {
    let resolver = app.resolver();
    let rack = resolver.rack();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(surface_style(resolver.front_taker(), FrontTaker::Rack))
        .title("Rack");
    frame.render_widget(block, grid.rack);

    let origin = app.drag().and_then(|d| d.origin.rack_index());
    let hover = app.drag().and_then(|d| d.hover.rack_index());

    for index in 0..NUM_RACK_TILES {
        let area = grid.rack_slot(index);
        if area.is_empty() {
            continue;
        }
        // The dragged tile is in the air; its slot shows what was shifted in.
        let letter = if origin == Some(index) {
            rack.shuffle_buffer()[index]
        } else {
            rack.letters()[index]
        };
        let mut style = if letter.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Black).bg(Color::LightCyan).bold()
        };
        if hover == Some(index) {
            style = style.bg(Color::Green);
        }
        frame.render_widget(Paragraph::new(format_slot(&letter)).style(style), area);
    }
}

/// The tile under the mouse while dragging.
fn render_dragged_tile(frame: &mut Frame, app: &App) {
    let Some((letter, pointer)) = app.drag().and_then(|d| Some((d.letter, d.pointer?))) else {
        return;
    };
    let area = Rect::new(pointer.x, pointer.y, 3, 1).intersection(frame.area());
    let tile = Paragraph::new(format!(" {} ", letter.character()))
        .style(Style::default().fg(Color::Black).bg(Color::LightMagenta).bold());
    frame.render_widget(tile, area);
}

fn render_actions(frame: &mut Frame, area: Rect, app: &App) {
    let resolver = app.resolver();
    let idle = !resolver.picker_open() && app.drag().is_none();
    let in_play = idle && resolver.has_tiles_in_play();

    let action = |key: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        vec![
            Span::styled(format!("[{key}]"), style.bold()),
            Span::styled(format!(" {label}   "), style),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(action("S", "Shuffle", idle));
    spans.extend(action("R", "Recall", in_play));
    spans.extend(action("P", "Play", in_play));
    spans.extend(action(".", "Pass", idle));
    spans.extend(action("X", "Exchange", idle));

    let feedback = Line::from(Span::styled(
        app.feedback.clone(),
        Style::default().fg(Color::Magenta),
    ));
    let text = Text::from(vec![Line::from(spans), feedback]);

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Actions"),
        );
    frame.render_widget(panel, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let table = app.resolver().hooks();
    let help = Paragraph::new(format!(
        "Drag tiles with the mouse | Esc quit | plays {} passes {} exchanges {}",
        table.plays, table.passes, table.exchanges
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn render_blank_picker(frame: &mut Frame, area: Rect) {
    let popup = centered_popup(area, 36, 5);
    frame.render_widget(Clear, popup);
    let text = Paragraph::new("Type the letter this blank plays as")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Blank tile"),
        );
    frame.render_widget(text, popup);
}

fn render_exchange_picker(frame: &mut Frame, area: Rect, app: &App) {
    let resolver = app.resolver();
    let chosen = resolver.exchange_chosen();

    let tiles: Vec<Span> = resolver
        .rack()
        .letters()
        .iter()
        .enumerate()
        .map(|(index, letter)| {
            let style = if chosen[index] {
                Style::default().fg(Color::Black).bg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(format!(" {}:{} ", index + 1, format_face(letter)), style)
        })
        .collect();

    let text = Text::from(vec![
        Line::from(tiles),
        Line::default(),
        Line::from(Span::styled(
            "1-7 toggle | Enter exchange | Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let popup = centered_popup(area, 44, 6);
    frame.render_widget(Clear, popup);
    let picker = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title("Exchange"),
    );
    frame.render_widget(picker, popup);
}

/// Format the scoreboard for the header
fn format_scores(app: &App) -> String {
    app.scoreboard
        .iter()
        .map(|p| format!("{} {}", p.name, p.score))
        .collect::<Vec<_>>()
        .join("   ")
}

fn format_face(letter: &Letter) -> char {
    if letter.is_empty() {
        ' '
    } else {
        letter.character()
    }
}

/// A rack slot is five columns wide: `[ A ]`
fn format_slot(letter: &Letter) -> String {
    format!("[ {} ]", format_face(letter))
}
