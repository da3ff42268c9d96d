//! LOBSTERBLE - tile placement core for a 15x15 word game
//!
//! Tracks tiles across the rack and board and resolves drag-and-drop into
//! consistent moves. Rendering, geometry and turn rules plug in from outside.

pub mod game;
