//! Piece templates and their per-player copies

use crate::config::PieceDefaults;
use crate::error::StructureError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Properties a piece literal may set
pub const PIECE_PROPERTIES: [&str; 7] = [
    "name",
    "limit",
    "capture",
    "placeable",
    "can_jump",
    "start",
    "moves",
];

/// Who a piece definition belongs to
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Owner {
    /// The definition written in source, before duplication
    Template,
    /// Copy owned by the first player
    PlayerOne,
    /// Copy owned by the second player, placed on mirrored rows
    PlayerTwo,
}

impl Owner {
    /// Suffix that keeps emitted identifiers distinct per player
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Template => "",
            Self::PlayerOne => "_p1",
            Self::PlayerTwo => "_p2",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => formatter.write_str("template"),
            Self::PlayerOne => formatter.write_str("player 1"),
            Self::PlayerTwo => formatter.write_str("player 2"),
        }
    }
}

/// 1-indexed board coordinate as written in source
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Column, starting at 1
    pub x: u32,
    /// Row, starting at 1
    pub y: u32,
}

impl Position {
    /// Position at column `x`, row `y`
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// Relative step in a piece's move set
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Column delta
    pub dx: i64,
    /// Row delta
    pub dy: i64,
}

/// Properties of a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceProps {
    /// Identifier the piece was bound to; unique per player
    pub name: String,
    /// Display text from the literal's `name` property
    pub label: Option<String>,
    /// Maximum number of placements
    pub limit: u32,
    /// Whether the piece may capture
    pub capture: bool,
    /// Whether the piece may be placed during the game
    pub placeable: bool,
    /// Whether the piece may jump over others
    pub can_jump: bool,
    /// 1-indexed cells the piece occupies after initial placement
    pub start_positions: Vec<Position>,
    /// Number of placements so far
    pub count: u32,
    /// Not interpreted by code generation yet
    pub move_set: Option<Vec<Offset>>,
}

impl PieceProps {
    /// Properties of `name` taken from `defaults`
    pub fn new(name: impl Into<String>, defaults: PieceDefaults) -> Self {
        Self {
            name: name.into(),
            label: None,
            limit: defaults.limit,
            capture: defaults.capture,
            placeable: defaults.placeable,
            can_jump: defaults.can_jump,
            start_positions: Vec::new(),
            count: 0,
            move_set: None,
        }
    }

    /// Text shown for the piece, the label if one was given
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A piece definition with its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDef {
    /// Property values
    pub props: PieceProps,
    /// Template or the player holding this copy
    pub owner: Owner,
}

impl PieceDef {
    /// A template built on top of `defaults`
    pub fn template(name: impl Into<String>, defaults: PieceDefaults) -> Self {
        Self {
            props: PieceProps::new(name, defaults),
            owner: Owner::Template,
        }
    }

    /// Append a 1-indexed start position
    pub fn add_start_position(&mut self, x: u32, y: u32) {
        self.props.start_positions.push(Position::new(x, y));
    }

    /// Identifier used for this definition in emitted code
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.props.name, self.owner.prefix())
    }

    /// Independent copy of this definition owned by `owner`
    ///
    /// # Errors
    ///
    /// Returns `StructureError::CloneIntegrity` if the copy shares any buffer with `self`.
    pub fn duplicate_for(&self, owner: Owner) -> Result<Self, StructureError> {
        let copy = Self {
            props: self.props.clone(),
            owner,
        };
        if copy.shares_storage_with(self) {
            return Err(StructureError::CloneIntegrity {
                piece: self.props.name.clone(),
                owner,
            });
        }
        Ok(copy)
    }

    /// Whether any non-empty collection of `self` lives in the same allocation as `other`'s
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        let same_positions = !self.props.start_positions.is_empty()
            && std::ptr::eq(
                self.props.start_positions.as_ptr(),
                other.props.start_positions.as_ptr(),
            );
        let same_moves = match (&self.props.move_set, &other.props.move_set) {
            (Some(mine), Some(theirs)) => !mine.is_empty() && std::ptr::eq(mine.as_ptr(), theirs.as_ptr()),
            _ => false,
        };
        same_positions || same_moves
    }
}
