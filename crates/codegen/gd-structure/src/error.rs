//! Structural builder errors

use crate::piece::{Owner, Position};
use gd_span::Span;

/// Errors raised while building or placing the board and pieces
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// A per-player copy shares mutable storage with the piece it was copied from
    #[error("{owner} copy of piece `{piece}` shares state with its template")]
    CloneIntegrity {
        /// Piece name
        piece: String,
        /// Owner of the offending copy
        owner: Owner,
    },

    /// A piece has start positions but the setup section declares no board
    #[error("piece `{piece}` has start positions but the setup section declares no board")]
    BoardNotInitialized {
        /// Piece name
        piece: String,
    },

    /// A start position lies outside the board
    #[error("{owner} piece `{piece}` starts at {position}, outside the {width}x{height} board")]
    PlacementOutOfBounds {
        /// Piece name
        piece: String,
        /// Owner of the piece being placed
        owner: Owner,
        /// 1-indexed position as written
        position: Position,
        /// Board width
        width: u32,
        /// Board height
        height: u32,
    },

    /// A board with a zero dimension
    #[error("board `{name}` has invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Board identifier
        name: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Two templates registered under one name
    #[error("piece `{piece}` is defined more than once")]
    DuplicatePiece {
        /// Piece name
        piece: String,
    },

    /// A piece literal property that cannot be interpreted
    #[error("property `{property}` of piece `{piece}` at {span}: {reason}")]
    InvalidPieceProperty {
        /// Piece name
        piece: String,
        /// Property name
        property: String,
        /// What is wrong with it
        reason: String,
        /// Location of the property value
        span: Span,
    },
}
