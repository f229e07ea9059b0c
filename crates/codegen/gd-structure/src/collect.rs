//! Populate the structural model from a tree
//!
//! Runs before lowering. Board declarations size the game board and piece literals
//! become templates, so initial placement is known before any code is emitted.

use crate::GriddyStructure;
use crate::board::Board;
use crate::error::StructureError;
use crate::piece::{Offset, PIECE_PROPERTIES, PieceDef, Position};
use gd_ast::{Ast, NodeId, NodeKind, NodeValue};
use log::debug;

/// Register every board and piece literal assigned anywhere in `ast`
///
/// # Errors
///
/// Fails on malformed piece properties, duplicate piece names or invalid boards.
pub fn collect(ast: &Ast, structure: &mut GriddyStructure) -> Result<(), StructureError> {
    let mut pending = vec![ast.root()];
    while let Some(node) = pending.pop() {
        pending.extend(ast.children(node).iter().rev().copied());
        if ast.kind(node) != NodeKind::Assign {
            continue;
        }
        let (Some(target), Some(value)) = (ast.child(node, 0), ast.child(node, 1)) else {
            continue;
        };
        let Some(name) = ast.ident_name(target) else {
            continue;
        };
        match (ast.kind(value), ast.value(value)) {
            // Placement runs in setup, so only setup boards can hold the initial pieces
            (NodeKind::Board, &NodeValue::Dimensions { width, height })
                if ast.parent(node) == Some(ast.root()) =>
            {
                structure.setup.init_board(name, width, height)?;
            }
            (NodeKind::Board, &NodeValue::Dimensions { width, height }) => {
                Board::check_dimensions(name, width, height)?;
                debug!("board `{name}` is declared in the game section and is not used for placement");
            }
            (NodeKind::Piece, NodeValue::Properties(table)) => {
                let template = piece_template(ast, structure, name, table)?;
                structure.setup.register_piece_template(template)?;
            }
            (NodeKind::Piece, _) => {
                let template = PieceDef::template(name, structure.setup.defaults());
                structure.setup.register_piece_template(template)?;
            }
            _ => {}
        }
    }
    debug!(
        "collected {} piece templates, board: {}",
        structure.setup.player_def.len(),
        structure.setup.board().map_or("none", |board| board.name())
    );
    Ok(())
}

fn piece_template(
    ast: &Ast,
    structure: &GriddyStructure,
    name: &str,
    table: &[(NodeId, NodeId)],
) -> Result<PieceDef, StructureError> {
    let mut template = PieceDef::template(name, structure.setup.defaults());
    for &(key, value) in table {
        let property = ast.ident_name(key).unwrap_or_default();
        let reader = PropertyReader {
            ast,
            piece: name,
            property,
            value,
        };
        match property {
            "name" => template.props.label = Some(reader.text()?.to_string()),
            "limit" => template.props.limit = reader.count()?,
            "capture" => template.props.capture = reader.flag()?,
            "placeable" => template.props.placeable = reader.flag()?,
            "can_jump" => template.props.can_jump = reader.flag()?,
            "start" => template.props.start_positions = reader.positions()?,
            "moves" => template.props.move_set = Some(reader.offsets()?),
            _ => {
                return Err(reader.invalid(format!(
                    "unknown property, expected one of {}",
                    PIECE_PROPERTIES.join(", ")
                )));
            }
        }
    }
    Ok(template)
}

/// Typed access to one property value of a piece literal
struct PropertyReader<'ast> {
    ast: &'ast Ast,
    piece: &'ast str,
    property: &'ast str,
    value: NodeId,
}

impl<'ast> PropertyReader<'ast> {
    fn invalid(&self, reason: impl Into<String>) -> StructureError {
        self.invalid_at(self.value, reason)
    }

    fn invalid_at(&self, node: NodeId, reason: impl Into<String>) -> StructureError {
        StructureError::InvalidPieceProperty {
            piece: self.piece.to_string(),
            property: self.property.to_string(),
            reason: reason.into(),
            span: self.ast.span(node),
        }
    }

    fn text(&self) -> Result<&'ast str, StructureError> {
        match self.ast.kind(self.value) {
            NodeKind::String => self
                .ast
                .text(self.value)
                .ok_or_else(|| self.invalid("string literal without text")),
            kind => Err(self.invalid(format!("expected a string literal, found {kind}"))),
        }
    }

    fn count(&self) -> Result<u32, StructureError> {
        match self.ast.value(self.value) {
            &NodeValue::Integer(value) => {
                u32::try_from(value).map_err(|_| self.invalid(format!("{value} is not a valid count")))
            }
            _ => Err(self.invalid(format!(
                "expected an integer literal, found {}",
                self.ast.kind(self.value)
            ))),
        }
    }

    fn flag(&self) -> Result<bool, StructureError> {
        match self.ast.value(self.value) {
            &NodeValue::Boolean(value) => Ok(value),
            _ => Err(self.invalid(format!(
                "expected a boolean literal, found {}",
                self.ast.kind(self.value)
            ))),
        }
    }

    /// Pairs of a list, or a single pair
    fn pairs(&self) -> Result<Vec<(NodeId, i64, i64)>, StructureError> {
        let items: Vec<NodeId> = match self.ast.kind(self.value) {
            NodeKind::List => self.ast.children(self.value).to_vec(),
            NodeKind::Pair => vec![self.value],
            kind => return Err(self.invalid(format!("expected a list of pairs, found {kind}"))),
        };
        items
            .into_iter()
            .map(|item| {
                let coordinate = |index| match self.ast.child(item, index).map(|part| self.ast.value(part)) {
                    Some(&NodeValue::Integer(value)) => Ok(value),
                    _ => Err(self.invalid_at(item, "expected a pair of integers")),
                };
                if self.ast.kind(item) != NodeKind::Pair {
                    return Err(self.invalid_at(item, format!("expected a pair, found {}", self.ast.kind(item))));
                }
                Ok((item, coordinate(0)?, coordinate(1)?))
            })
            .collect()
    }

    fn positions(&self) -> Result<Vec<Position>, StructureError> {
        self.pairs()?
            .into_iter()
            .map(|(item, x, y)| match (u32::try_from(x), u32::try_from(y)) {
                (Ok(x), Ok(y)) if x > 0 && y > 0 => Ok(Position::new(x, y)),
                _ => Err(self.invalid_at(item, format!("({x}, {y}) is not a 1-indexed position"))),
            })
            .collect()
    }

    fn offsets(&self) -> Result<Vec<Offset>, StructureError> {
        Ok(self
            .pairs()?
            .into_iter()
            .map(|(_, dx, dy)| Offset { dx, dy })
            .collect())
    }
}
