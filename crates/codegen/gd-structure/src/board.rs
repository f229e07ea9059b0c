//! Board grid

use crate::error::StructureError;
use crate::piece::Owner;

/// Reference from a board cell to a placed piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Player the placed copy belongs to
    pub owner: Owner,
    /// Name of the placed piece
    pub piece: String,
}

/// `height` rows of `width` cells; row 0 is the bottom rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    name: String,
    width: u32,
    height: u32,
    rows: Vec<Vec<Option<CellRef>>>,
}

impl Board {
    /// An empty board bound to identifier `name`
    ///
    /// # Errors
    ///
    /// Returns `StructureError::InvalidDimensions` if either dimension is zero.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Result<Self, StructureError> {
        let name = name.into();
        Self::check_dimensions(&name, width, height)?;
        Ok(Self {
            name,
            width,
            height,
            rows: vec![vec![None; width as usize]; height as usize],
        })
    }

    /// Reject boards with a zero dimension
    ///
    /// # Errors
    ///
    /// Returns `StructureError::InvalidDimensions` if either dimension is zero.
    pub fn check_dimensions(name: &str, width: u32, height: u32) -> Result<(), StructureError> {
        if width == 0 || height == 0 {
            return Err(StructureError::InvalidDimensions {
                name: name.to_string(),
                width,
                height,
            });
        }
        Ok(())
    }

    /// Identifier the board is bound to in source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at 0-indexed `(x, y)`; `None` when empty or outside the board
    pub fn cell(&self, x: u32, y: u32) -> Option<&CellRef> {
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .and_then(Option::as_ref)
    }

    /// Whether 0-indexed `(x, y)` lies on the board
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Occupy 0-indexed `(x, y)`; returns `false` if the cell is outside the board
    pub(crate) fn set(&mut self, x: u32, y: u32, cell: CellRef) -> bool {
        match self.rows.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            Some(slot) => {
                *slot = Some(cell);
                true
            }
            None => false,
        }
    }

    /// Occupied cells as `(x, y, piece)`, bottom row first, left to right
    pub fn occupied_cells(&self) -> impl Iterator<Item = (u32, u32, &CellRef)> + '_ {
        self.rows.iter().zip(0_u32..).flat_map(|(row, y)| {
            row.iter()
                .zip(0_u32..)
                .filter_map(move |(cell, x)| cell.as_ref().map(|cell| (x, y, cell)))
        })
    }
}
