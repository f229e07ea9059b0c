//! Target-independent structure of a generated Griddy program
//!
//! A generated program has two sections. The setup section declares the board and the
//! pieces and performs the initial placement; the game section runs the rounds. This
//! crate owns the state behind both sections (board geometry, the per-player piece
//! catalogs, the accumulated section bodies) and renders it through a [`TargetFormat`],
//! which is the only part a target backend has to supply.

pub mod board;
pub mod collect;
pub mod config;
pub mod error;
pub mod format;
pub mod piece;
pub mod player;
pub mod section;

pub use board::{Board, CellRef};
pub use collect::collect;
pub use config::{CodegenConfig, GameConfig, PieceDefaults};
pub use error::StructureError;
pub use format::TargetFormat;
pub use piece::{Offset, Owner, PieceDef, PieceProps, Position};
pub use player::PlayerDef;
pub use section::{GameStruct, SetupStruct, WinCondition};

/// Setup and game sections of one compilation
#[derive(Debug, Clone)]
pub struct GriddyStructure {
    /// Board, pieces and setup statements
    pub setup: SetupStruct,
    /// Per-round statements and the loop condition
    pub game: GameStruct,
}

impl GriddyStructure {
    /// Empty sections configured by `config`
    pub fn new(config: &CodegenConfig) -> Self {
        Self {
            setup: SetupStruct::new(config.piece_defaults),
            game: GameStruct::new(WinCondition::Placeholder {
                rounds: config.game.placeholder_rounds,
            }),
        }
    }

    /// Render both sections
    ///
    /// The first render performs the initial piece placement; later renders reuse it,
    /// so rendering the same structure twice yields identical text.
    ///
    /// # Errors
    ///
    /// Fails if initial placement fails.
    pub fn render(&mut self, format: &dyn TargetFormat) -> Result<String, StructureError> {
        self.setup.place_all_pieces()?;
        let mut out = format.format_setup(&self.setup);
        out.push_str(&format.format_game(&self.game.body, &self.game.win_condition));
        Ok(out)
    }
}
