//! Serialized form of a parsed tree
//!
//! The parser lives outside this workspace and hands trees over as `SourceNode`
//! documents (JSON in practice). The helper constructors double as a compact way to
//! write trees by hand.

use crate::{AstBuilder, AstError, NodeId, NodeKind, NodeValue};
use gd_span::Span;
use serde::{Deserialize, Serialize};

/// Payload of a serialized node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceValue {
    /// No payload
    #[default]
    None,
    /// Integer literal
    Integer(i64),
    /// Boolean literal
    Boolean(bool),
    /// Identifier, string, operator symbol or declared type name
    Text(String),
    /// Board size
    Dimensions {
        /// Number of columns
        width: u32,
        /// Number of rows
        height: u32,
    },
}

/// A parsed node with its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNode {
    /// Node kind
    pub kind: NodeKind,
    /// Payload, `None` when absent
    #[serde(default)]
    pub value: SourceValue,
    /// Source location
    #[serde(default)]
    pub span: Span,
    /// Subtrees in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
    /// Piece literal properties, `(identifier, value)` in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<(SourceNode, SourceNode)>,
}

impl SourceNode {
    /// Node with an explicit payload and children
    pub fn new(kind: NodeKind, value: SourceValue, children: Vec<Self>) -> Self {
        Self {
            kind,
            value,
            span: Span::detached(),
            children,
            properties: Vec::new(),
        }
    }

    /// Attach a source span
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Program root
    pub fn start(children: Vec<Self>) -> Self {
        Self::new(NodeKind::Start, SourceValue::None, children)
    }

    /// Game section
    pub fn game(children: Vec<Self>) -> Self {
        Self::new(NodeKind::Game, SourceValue::None, children)
    }

    /// `output arg`
    pub fn output(arg: Self) -> Self {
        Self::new(NodeKind::Output, SourceValue::None, vec![arg])
    }

    /// `name = value`
    pub fn assign(name: &str, value: Self) -> Self {
        Self::new(NodeKind::Assign, SourceValue::None, vec![Self::ident(name), value])
    }

    /// Identifier reference
    pub fn ident(name: &str) -> Self {
        Self::new(NodeKind::Ident, SourceValue::Text(name.to_string()), Vec::new())
    }

    /// Integer literal
    pub fn integer(value: i64) -> Self {
        Self::new(NodeKind::Integer, SourceValue::Integer(value), Vec::new())
    }

    /// Boolean literal
    pub fn boolean(value: bool) -> Self {
        Self::new(NodeKind::Boolean, SourceValue::Boolean(value), Vec::new())
    }

    /// String literal
    pub fn string(value: &str) -> Self {
        Self::new(NodeKind::String, SourceValue::Text(value.to_string()), Vec::new())
    }

    /// Operator inside an expression
    pub fn operator(symbol: &str) -> Self {
        Self::new(NodeKind::Operator, SourceValue::Text(symbol.to_string()), Vec::new())
    }

    /// Parenthesized expression
    pub fn expr(parts: Vec<Self>) -> Self {
        Self::new(NodeKind::Expr, SourceValue::None, parts)
    }

    /// Declaration without a value, `type_name` is one of `number`, `boolean`, `string`
    pub fn empty(type_name: &str) -> Self {
        Self::new(NodeKind::Empty, SourceValue::Text(type_name.to_string()), Vec::new())
    }

    /// Board literal
    pub fn board(width: u32, height: u32) -> Self {
        Self::new(
            NodeKind::Board,
            SourceValue::Dimensions { width, height },
            Vec::new(),
        )
    }

    /// Two-element coordinate
    pub fn pair(first: Self, second: Self) -> Self {
        Self::new(NodeKind::Pair, SourceValue::None, vec![first, second])
    }

    /// Integer coordinate pair
    pub fn position(x: i64, y: i64) -> Self {
        Self::pair(Self::integer(x), Self::integer(y))
    }

    /// Ordered list
    pub fn list(items: Vec<Self>) -> Self {
        Self::new(NodeKind::List, SourceValue::None, items)
    }

    /// Board cell lookup `board[x, y]`
    pub fn access(x: Self, y: Self, board: &str) -> Self {
        Self::new(
            NodeKind::Access,
            SourceValue::None,
            vec![Self::pair(x, y), Self::ident(board)],
        )
    }

    /// `place piece on board at (x, y)`
    pub fn place(piece: &str, board: &str, x: Self, y: Self) -> Self {
        Self::new(
            NodeKind::Place,
            SourceValue::None,
            vec![Self::ident(piece), Self::ident(board), Self::pair(x, y)],
        )
    }

    /// Piece literal from `(property, value)` pairs
    pub fn piece(properties: Vec<(&str, Self)>) -> Self {
        let mut node = Self::new(NodeKind::Piece, SourceValue::None, Vec::new());
        node.properties = properties
            .into_iter()
            .map(|(name, value)| (Self::ident(name), value))
            .collect();
        node
    }

    pub(crate) fn build(&self, builder: &mut AstBuilder) -> Result<NodeId, AstError> {
        let node = builder.open(self.kind, self.value.clone().into(), self.span);
        if !self.properties.is_empty() {
            let mut table = Vec::with_capacity(self.properties.len());
            for (name, value) in &self.properties {
                let name = name.build(builder)?;
                let value = value.build(builder)?;
                table.push((name, value));
            }
            builder.set_value(node, NodeValue::Properties(table))?;
        }
        for child in &self.children {
            child.build(builder)?;
        }
        builder.close()
    }
}

impl From<SourceValue> for NodeValue {
    fn from(value: SourceValue) -> Self {
        match value {
            SourceValue::None => Self::None,
            SourceValue::Integer(value) => Self::Integer(value),
            SourceValue::Boolean(value) => Self::Boolean(value),
            SourceValue::Text(text) => Self::Text(text),
            SourceValue::Dimensions { width, height } => Self::Dimensions { width, height },
        }
    }
}
