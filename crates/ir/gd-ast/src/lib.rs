//! Griddy abstract syntax tree
//!
//! The tree produced by the Griddy parser, stored in an arena. Children are owned by the
//! arena and referenced by index; parent links are plain indices and never own anything.
//!
//! Nodes are created through [`AstBuilder`], which follows the parser's node-scope
//! protocol: a node is opened, receives its children, and is closed. Once closed a node
//! is immutable, and [`AstBuilder::finish`] hands back a read-only [`Ast`].

pub mod builder;
pub mod source;
pub mod visitor;

pub use builder::{AstBuilder, AstError};
pub use source::{SourceNode, SourceValue};
pub use visitor::Visitor;

use gd_span::Span;
use la_arena::{Arena, Idx};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// AST node IDs
pub type NodeId = Idx<Node>;

/// Closed set of node kinds
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Program root; setup statements followed by an optional `Game` node
    Start,
    /// `output <arg>` print statement
    Output,
    /// Game section holding the per-round body
    Game,
    /// Board literal carrying its dimensions
    Board,
    /// `ident = value`; child 0 is the target, child 1 the value
    Assign,
    /// Parenthesized expression made of operands and operators
    Expr,
    /// Declaration without a value; carries the declared type name
    Empty,
    /// Operator symbol inside an `Expr`
    Operator,
    /// String literal
    String,
    /// Identifier reference
    Ident,
    /// Integer literal
    Integer,
    /// Boolean literal
    Boolean,
    /// Board cell lookup; child 0 is the `Pair` index, child 1 the board identifier
    Access,
    /// Piece placement; children are piece, board and `Pair` position
    Place,
    /// Piece literal; its value maps property identifiers to value nodes
    Piece,
    /// Two-element `(x, y)` coordinate
    Pair,
    /// Ordered sequence of nodes
    List,
    /// Base node that the parser never refined to a concrete kind
    Unrefined,
}

impl NodeKind {
    /// Kinds whose value lowers to a target integer
    pub fn is_integer_like(self) -> bool {
        matches!(self, Self::Integer | Self::Boolean | Self::Expr)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "Start",
            Self::Output => "Output",
            Self::Game => "Game",
            Self::Board => "Board",
            Self::Assign => "Assign",
            Self::Expr => "Expr",
            Self::Empty => "Empty",
            Self::Operator => "Operator",
            Self::String => "String",
            Self::Ident => "Ident",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::Access => "Access",
            Self::Place => "Place",
            Self::Piece => "Piece",
            Self::Pair => "Pair",
            Self::List => "List",
            Self::Unrefined => "Unrefined",
        };
        formatter.write_str(name)
    }
}

/// Kind-dependent payload of a node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeValue {
    /// No payload
    #[default]
    None,
    /// Integer literal
    Integer(i64),
    /// Boolean literal
    Boolean(bool),
    /// Identifier name, string literal, operator symbol or declared type name
    Text(String),
    /// Board dimensions
    Dimensions {
        /// Number of columns
        width: u32,
        /// Number of rows
        height: u32,
    },
    /// Piece literal properties as (property identifier, value) pairs in source order
    Properties(Vec<(NodeId, NodeId)>),
}

/// A single AST node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Kind tag
    pub kind: NodeKind,
    /// Payload
    pub value: NodeValue,
    /// Source location
    pub span: Span,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    closed: bool,
}

impl Node {
    fn new(kind: NodeKind, value: NodeValue, span: Span) -> Self {
        Self {
            kind,
            value,
            span,
            children: Vec::new(),
            parent: None,
            closed: false,
        }
    }

    /// Ordered children
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Enclosing node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A finished, immutable syntax tree
#[derive(Debug)]
pub struct Ast {
    nodes: Arena<Node>,
    root: NodeId,
    preorder: Vec<u32>,
}

impl Ast {
    fn new(nodes: Arena<Node>, root: NodeId) -> Self {
        let mut preorder = vec![0; nodes.len()];
        let mut counter = 0_u32;
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            preorder[slot(node)] = counter;
            counter += 1;
            pending.extend(nodes[node].children.iter().rev().copied());
        }
        Self {
            nodes,
            root,
            preorder,
        }
    }

    /// Build a tree from its serialized form
    ///
    /// # Errors
    ///
    /// Returns `AstError` if the source tree is not rooted at a single `Start` node.
    pub fn from_source(source: &SourceNode) -> Result<Self, AstError> {
        let mut builder = AstBuilder::new();
        source.build(&mut builder)?;
        builder.finish()
    }

    /// The `Start` node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Full node data
    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }

    /// Kind of `node`
    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node].kind
    }

    /// Payload of `node`
    pub fn value(&self, node: NodeId) -> &NodeValue {
        &self.nodes[node].value
    }

    /// Source location of `node`
    pub fn span(&self, node: NodeId) -> Span {
        self.nodes[node].span
    }

    /// Children of `node` in source order
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node].children
    }

    /// Child at `index`, if present
    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[node].children.get(index).copied()
    }

    /// Enclosing node; `None` for the root
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    /// Position of the node in a pre-order, left-to-right walk from the root
    pub fn preorder_index(&self, node: NodeId) -> u32 {
        self.preorder[slot(node)]
    }

    /// Enclosing nodes, innermost first
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), |current| self.parent(*current))
    }

    /// Textual payload of identifiers, strings, operators and empty declarations
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node].value {
            NodeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Name carried by an `Ident` node
    pub fn ident_name(&self, node: NodeId) -> Option<&str> {
        if self.kind(node) == NodeKind::Ident {
            self.text(node)
        } else {
            None
        }
    }

    /// Human readable location of a node for diagnostics
    pub fn describe(&self, node: NodeId) -> String {
        let data = &self.nodes[node];
        match self.text(node) {
            Some(text) => format!("{} `{}` at {}", data.kind, text, data.span),
            None => format!("{} at {}", data.kind, data.span),
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dispatch `visitor` on `node`, appending emitted text to `out`
    ///
    /// # Errors
    ///
    /// Propagates the visitor's error.
    pub fn accept<V: Visitor + ?Sized>(
        &self,
        node: NodeId,
        visitor: &mut V,
        out: &mut String,
    ) -> Result<(), V::Error> {
        visitor.visit_node(self, node, out)
    }
}

fn slot(node: NodeId) -> usize {
    u32::from(node.into_raw()) as usize
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }
}
