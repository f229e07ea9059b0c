//! Setup and game sections

use crate::board::{Board, CellRef};
use crate::config::PieceDefaults;
use crate::error::StructureError;
use crate::piece::{Owner, PieceDef, Position};
use crate::player::PlayerDef;
use log::{debug, warn};

/// Board, pieces and statements of the setup section
#[derive(Debug, Clone)]
pub struct SetupStruct {
    /// Templates and per-player copies
    pub player_def: PlayerDef,
    /// Lowered setup statements
    pub body: String,
    board: Option<Board>,
    defaults: PieceDefaults,
    placed: bool,
}

impl SetupStruct {
    /// Empty setup whose pieces start from `defaults`
    pub fn new(defaults: PieceDefaults) -> Self {
        Self {
            player_def: PlayerDef::new(),
            body: String::new(),
            board: None,
            defaults,
            placed: false,
        }
    }

    /// Defaults new piece templates start from
    pub fn defaults(&self) -> PieceDefaults {
        self.defaults
    }

    /// Declare the game board
    ///
    /// Only the first board becomes the game board; later boards are validated and
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns `StructureError::InvalidDimensions` if either dimension is zero.
    pub fn init_board(&mut self, name: &str, width: u32, height: u32) -> Result<(), StructureError> {
        Board::check_dimensions(name, width, height)?;
        if let Some(board) = &self.board {
            warn!(
                "board `{name}` ignored for placement, `{}` is already the game board",
                board.name()
            );
            return Ok(());
        }
        self.board = Some(Board::new(name, width, height)?);
        debug!("game board `{name}` is {width}x{height}");
        Ok(())
    }

    /// The placement board, if one was declared
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Placement board width, 0 without a board
    pub fn board_width(&self) -> u32 {
        self.board.as_ref().map_or(0, Board::width)
    }

    /// Placement board height, 0 without a board
    pub fn board_height(&self) -> u32 {
        self.board.as_ref().map_or(0, Board::height)
    }

    /// Register a piece template for both players
    ///
    /// # Errors
    ///
    /// See [`PlayerDef::register`].
    pub fn register_piece_template(&mut self, template: PieceDef) -> Result<(), StructureError> {
        self.player_def.register(template)
    }

    /// Whether initial placement has run
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Put `owner`'s copy of `piece` on 0-indexed `(x, y)` and count the placement
    ///
    /// # Errors
    ///
    /// Fails if there is no board or the cell is outside it.
    pub fn place_piece(&mut self, owner: Owner, piece: &str, x: u32, y: u32) -> Result<(), StructureError> {
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| StructureError::BoardNotInitialized {
                piece: piece.to_string(),
            })?;
        let cell = CellRef {
            owner,
            piece: piece.to_string(),
        };
        if !board.set(x, y, cell) {
            return Err(StructureError::PlacementOutOfBounds {
                piece: piece.to_string(),
                owner,
                position: Position::new(x + 1, y + 1),
                width: board.width(),
                height: board.height(),
            });
        }
        if let Some(def) = self.player_def.pieces_mut(owner).get_mut(piece) {
            def.props.count += 1;
        }
        debug!("placed {owner} `{piece}` at ({x}, {y})");
        Ok(())
    }

    /// Place every piece at its start positions
    ///
    /// Player 1 positions map to `(x - 1, y - 1)`. Player 2 sits on the opposite side,
    /// so its rows are mirrored to `(x - 1, height - y)`. Runs once; later calls do nothing.
    ///
    /// # Errors
    ///
    /// Fails if a start position is outside the board or no board exists.
    pub fn place_all_pieces(&mut self) -> Result<(), StructureError> {
        if self.placed {
            return Ok(());
        }
        for owner in [Owner::PlayerOne, Owner::PlayerTwo] {
            let starts: Vec<(String, Vec<Position>)> = self
                .player_def
                .pieces(owner)
                .values()
                .filter(|def| !def.props.start_positions.is_empty())
                .map(|def| (def.props.name.clone(), def.props.start_positions.clone()))
                .collect();

            for (piece, positions) in starts {
                for position in positions {
                    let (x, y) = self.board_cell(owner, &piece, position)?;
                    self.place_piece(owner, &piece, x, y)?;
                }
            }
        }
        self.placed = true;
        Ok(())
    }

    /// 0-indexed cell for a 1-indexed start position
    fn board_cell(&self, owner: Owner, piece: &str, position: Position) -> Result<(u32, u32), StructureError> {
        let board = self
            .board
            .as_ref()
            .ok_or_else(|| StructureError::BoardNotInitialized {
                piece: piece.to_string(),
            })?;
        let in_bounds = (1..=board.width()).contains(&position.x) && (1..=board.height()).contains(&position.y);
        if !in_bounds {
            return Err(StructureError::PlacementOutOfBounds {
                piece: piece.to_string(),
                owner,
                position,
                width: board.width(),
                height: board.height(),
            });
        }
        let row = match owner {
            Owner::PlayerTwo => board.height() - position.y,
            Owner::PlayerOne | Owner::Template => position.y - 1,
        };
        Ok((position.x - 1, row))
    }
}

/// How the game loop decides to stop
///
/// Win conditions are not part of the language yet. Until they are, the game body runs
/// a fixed number of rounds; embedders can supply their own target-language condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinCondition {
    /// Run the body `rounds + 1` times
    Placeholder {
        /// Extra iterations after the first
        rounds: u32,
    },
    /// Keep looping while this target-language condition holds
    Condition(String),
}

/// Statements of the game section
#[derive(Debug, Clone)]
pub struct GameStruct {
    /// Lowered game statements
    pub body: String,
    /// When the game loop stops
    pub win_condition: WinCondition,
}

impl GameStruct {
    /// Empty game section ending on `win_condition`
    pub fn new(win_condition: WinCondition) -> Self {
        Self {
            body: String::new(),
            win_condition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_with_starts(name: &str, starts: &[(u32, u32)]) -> PieceDef {
        let mut piece = PieceDef::template(name, PieceDefaults::default());
        for &(x, y) in starts {
            piece.add_start_position(x, y);
        }
        piece
    }

    fn count(setup: &SetupStruct, owner: Owner, name: &str) -> u32 {
        setup
            .player_def
            .piece(owner, name)
            .map_or(0, |def| def.props.count)
    }

    #[test]
    fn test_player_two_is_mirrored() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup.init_board("board", 4, 5).expect("board");
        setup
            .register_piece_template(piece_with_starts("pawn", &[(1, 1), (3, 2)]))
            .expect("registers");
        setup.place_all_pieces().expect("placement");

        let board = setup.board().expect("board");
        let at = |x, y| board.cell(x, y).map(|cell| cell.owner);
        assert_eq!(at(0, 0), Some(Owner::PlayerOne));
        assert_eq!(at(2, 1), Some(Owner::PlayerOne));
        assert_eq!(at(0, 4), Some(Owner::PlayerTwo));
        assert_eq!(at(2, 3), Some(Owner::PlayerTwo));
        assert_eq!(board.occupied_cells().count(), 4);
    }

    #[test]
    fn test_counter_matches_start_positions() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup.init_board("board", 8, 8).expect("board");
        setup
            .register_piece_template(piece_with_starts("pawn", &[(1, 2), (2, 2), (3, 2)]))
            .expect("registers");
        setup
            .register_piece_template(piece_with_starts("king", &[(5, 1)]))
            .expect("registers");
        setup
            .register_piece_template(piece_with_starts("spare", &[]))
            .expect("registers");

        setup.place_all_pieces().expect("placement");
        setup.place_all_pieces().expect("second call is a no-op");

        for owner in [Owner::PlayerOne, Owner::PlayerTwo] {
            assert_eq!(count(&setup, owner, "pawn"), 3);
            assert_eq!(count(&setup, owner, "king"), 1);
            assert_eq!(count(&setup, owner, "spare"), 0);
        }
        assert_eq!(count(&setup, Owner::Template, "pawn"), 0);
        assert!(setup.is_placed());
    }

    #[test]
    fn test_symmetric_board_center() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup.init_board("board", 3, 3).expect("board");
        setup
            .register_piece_template(piece_with_starts("stone", &[(2, 2)]))
            .expect("registers");
        setup.place_all_pieces().expect("placement");

        let board = setup.board().expect("board");
        let center = board.cell(1, 1).expect("center occupied");
        assert_eq!(center.piece, "stone");
        // Both players map onto (1, 1); the player 2 placement lands last.
        assert_eq!(center.owner, Owner::PlayerTwo);
        assert_eq!(count(&setup, Owner::PlayerOne, "stone"), 1);
        assert_eq!(count(&setup, Owner::PlayerTwo, "stone"), 1);
    }

    #[test]
    fn test_out_of_bounds_start() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup.init_board("board", 2, 2).expect("board");
        setup
            .register_piece_template(piece_with_starts("rook", &[(3, 1)]))
            .expect("registers");

        assert_eq!(
            setup.place_all_pieces(),
            Err(StructureError::PlacementOutOfBounds {
                piece: "rook".to_string(),
                owner: Owner::PlayerOne,
                position: Position::new(3, 1),
                width: 2,
                height: 2,
            })
        );
    }

    #[test]
    fn test_start_positions_need_a_board() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup
            .register_piece_template(piece_with_starts("rook", &[(1, 1)]))
            .expect("registers");
        assert_eq!(
            setup.place_all_pieces(),
            Err(StructureError::BoardNotInitialized {
                piece: "rook".to_string()
            })
        );
    }

    #[test]
    fn test_first_board_wins() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup.init_board("main", 3, 4).expect("board");
        setup.init_board("scratch", 9, 9).expect("ignored");
        assert_eq!(setup.board().map(Board::name), Some("main"));
        assert_eq!(setup.board_width(), 3);
        assert_eq!(setup.board_height(), 4);
    }

    #[test]
    fn test_later_board_dimensions_are_checked() {
        let mut setup = SetupStruct::new(PieceDefaults::default());
        setup.init_board("main", 3, 4).expect("board");
        assert_eq!(
            setup.init_board("flat", 0, 3),
            Err(StructureError::InvalidDimensions {
                name: "flat".to_string(),
                width: 0,
                height: 3,
            })
        );
        assert_eq!(setup.board().map(Board::name), Some("main"));
    }
}
