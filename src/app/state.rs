//! Application state: one local game view driven by keys and the mouse

use crate::tui::SlotGrid;
use lobsterble::game::{
    BoardState, Letter, MoveResolver, PlacedTile, PlayError, Position, RackState, TurnHooks,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Position as Point;
use tracing::{debug, error, info};

/// Player score shown in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScore {
    pub name: String,
    pub score: u32,
}

/// Scores shown before any server has reported real ones.
pub fn starting_scores() -> Vec<(String, u32)> {
    vec![("Player 1".to_string(), 100), ("Player 2".to_string(), 101)]
}

/// Turn hooks for a table with no server behind it.
///
/// Every play is accepted. Passes and exchanges are only counted.
#[derive(Debug, Default)]
pub struct LocalTable {
    pub plays: u32,
    pub passes: u32,
    pub exchanges: u32,
}

impl TurnHooks for LocalTable {
    fn play(&mut self, placed: &[PlacedTile]) -> bool {
        let word: String = placed.iter().map(|t| t.letter.character()).collect();
        info!(%word, tiles = placed.len(), "local play");
        self.plays += 1;
        true
    }

    fn pass(&mut self) {
        info!("local pass");
        self.passes += 1;
    }

    fn exchange(&mut self, _rack: &RackState, chosen: &[usize]) {
        info!(?chosen, "local exchange");
        self.exchanges += 1;
    }
}

/// A tile held under the mouse.
#[derive(Debug, Clone, Copy)]
pub struct Drag {
    /// Where the tile was picked up.
    pub origin: Position,
    pub letter: Letter,
    /// Slot or cell the tile would drop onto right now.
    pub hover: Position,
    /// Terminal cell under the mouse, once it has moved.
    pub pointer: Option<Point>,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Game identifier shown in the title
    pub game_id: String,
    /// Feedback message from the last action
    pub feedback: String,
    /// Scoreboard (highest first)
    pub scoreboard: Vec<PlayerScore>,
    resolver: MoveResolver<LocalTable>,
    drag: Option<Drag>,
    layout: SlotGrid,
    rng: StdRng,
}

impl App {
    /// Create a game view; `seed` makes shuffles reproducible.
    pub fn new(game_id: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut app = Self {
            should_quit: false,
            game_id: game_id.into(),
            feedback: String::new(),
            scoreboard: Vec::new(),
            resolver: MoveResolver::new(
                RackState::default(),
                BoardState::new(),
                LocalTable::default(),
            ),
            drag: None,
            layout: SlotGrid::default(),
            rng,
        };
        app.update_scoreboard(starting_scores());
        app
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn resolver(&self) -> &MoveResolver<LocalTable> {
        &self.resolver
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn layout(&self) -> &SlotGrid {
        &self.layout
    }

    /// Replace the geometry used for hit-testing (after a resize).
    pub fn set_layout(&mut self, layout: SlotGrid) {
        self.layout = layout;
    }

    /// Update scoreboard from a score report
    pub fn update_scoreboard(&mut self, scores: Vec<(String, u32)>) {
        for (name, score) in scores {
            if let Some(player) = self.scoreboard.iter_mut().find(|p| p.name == name) {
                player.score = score;
            } else {
                self.scoreboard.push(PlayerScore { name, score });
            }
        }
        // Sort by score descending
        self.scoreboard.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Mouse button pressed: pick up the tile under the pointer, if any.
    ///
    /// A drag still in progress (its button came up outside the terminal) is
    /// settled first, so its parked tiles go back to the rack.
    pub fn on_press(&mut self, point: Point) {
        if self.drag.is_some() {
            debug!("settling unfinished drag");
            self.on_release();
        }
        let origin = self.layout.position_at(point);
        let Some(letter) = self.resolver.draggable_at(origin) else {
            return;
        };
        debug!(?origin, %letter, "drag started");
        self.drag = Some(Drag {
            origin,
            letter,
            // Until the mouse moves, a release puts the tile back.
            hover: Position::Unplaced,
            pointer: None,
        });
    }

    /// Mouse moved with the button held.
    pub fn on_drag(&mut self, point: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.pointer = Some(point);
        drag.hover = self
            .resolver
            .on_drag_move(&self.layout, &point, &drag.letter, drag.origin);
    }

    /// Mouse button released: settle the drag.
    pub fn on_release(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let outcome = self.resolver.on_drag_end(drag.letter, drag.origin, drag.hover);
        self.feedback = if outcome.blank_prompt.is_some() {
            "Type a letter for the blank".to_string()
        } else {
            String::new()
        };
    }

    /// Handle a typed character.
    ///
    /// Letters answer the blank picker and digits pick exchange tiles while
    /// those are open. Otherwise characters are action shortcuts.
    pub fn on_char(&mut self, c: char) {
        if self.resolver.blank_picker_open() {
            self.choose_blank(c);
            return;
        }
        if self.resolver.exchange_picker_open() {
            if let Some(digit) = c.to_digit(10).filter(|d| *d >= 1) {
                if let Err(err) = self.resolver.choose_tile_for_exchange(digit as usize - 1) {
                    self.feedback = err.to_string();
                }
            }
            return;
        }
        if self.drag.is_some() {
            return;
        }

        match c.to_ascii_lowercase() {
            's' => {
                self.resolver.shuffle_tiles(&mut self.rng);
                self.feedback = "Shuffled".to_string();
            }
            'r' => {
                let recalled = self.resolver.recall_tiles();
                self.feedback = format!("Recalled {recalled} tiles");
            }
            'p' => {
                let tiles = self.resolver.board().unlocked_tiles().count();
                self.feedback = if self.resolver.confirm_play() {
                    format!("Played {tiles} tiles")
                } else {
                    "Nothing to play".to_string()
                };
            }
            '.' => {
                self.resolver.confirm_pass();
                self.feedback = "Passed".to_string();
            }
            'x' => {
                self.resolver.select_exchange();
                self.feedback = "Choose tiles to exchange".to_string();
            }
            _ => {}
        }
    }

    /// Enter confirms an open exchange.
    pub fn on_enter(&mut self) {
        if !self.resolver.exchange_picker_open() {
            return;
        }
        self.feedback = match self.resolver.confirm_exchange() {
            Ok(chosen) => format!("Exchanging {} tiles", chosen.len()),
            Err(err) => err.to_string(),
        };
    }

    /// Esc cancels an exchange, otherwise quits. The blank picker cannot be dismissed.
    pub fn on_escape(&mut self) {
        if self.resolver.exchange_picker_open() {
            self.resolver.cancel_exchange();
            self.feedback = "Exchange cancelled".to_string();
        } else if !self.resolver.blank_picker_open() {
            self.quit();
        }
    }

    fn choose_blank(&mut self, c: char) {
        match self.resolver.set_blank(c) {
            Ok(()) => self.feedback.clear(),
            Err(PlayError::InvalidBlankLetter(c)) => {
                self.feedback = format!("'{c}' is not a letter");
            }
            Err(PlayError::NoPendingBlank) => {}
            Err(err) => {
                // The picker and the board disagree about the blank.
                error!(%err, "blank picker out of sync with board");
                panic!("blank picker out of sync with board: {err}");
            }
        }
    }
}
