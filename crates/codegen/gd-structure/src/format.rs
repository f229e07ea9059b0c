//! Interface between the structural model and a target backend

use crate::piece::PieceDef;
use crate::player::PlayerDef;
use crate::section::{SetupStruct, WinCondition};

/// Target-specific rendering of the program sections
///
/// A backend implements this once; the structural model decides when each piece is
/// rendered and in which order.
pub trait TargetFormat {
    /// Setup section: statements, piece definitions and initial placement
    fn format_setup(&self, setup: &SetupStruct) -> String;

    /// Both players' piece definitions
    fn format_player_def(&self, player_def: &PlayerDef) -> String;

    /// One piece definition under its emitted identifier
    fn format_piece_def(&self, qualified_name: &str, piece: &PieceDef) -> String;

    /// Game section wrapping the lowered round body
    fn format_game(&self, body: &str, win_condition: &WinCondition) -> String;
}
