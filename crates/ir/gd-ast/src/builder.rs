//! Node-scope tree construction
//!
//! The parser opens a node when it starts recognizing a construct, lets nested
//! constructs attach to it as children, and closes it once the construct is complete.
//! Closing attaches the node to whatever node is open beneath it.

use crate::{Ast, Node, NodeId, NodeKind, NodeValue};
use gd_span::Span;
use la_arena::Arena;

/// Errors raised while assembling a tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// A child was attached to, or a value set on, a node that is already closed
    #[error("{kind} node at {span} is closed and can no longer change")]
    NodeClosed {
        /// Kind of the closed node
        kind: NodeKind,
        /// Location of the closed node
        span: Span,
    },

    /// A node was given a second parent
    #[error("{kind} node at {span} already has a parent")]
    AlreadyParented {
        /// Kind of the node being re-parented
        kind: NodeKind,
        /// Location of the node
        span: Span,
    },

    /// `close` was called with no open node
    #[error("close called without a matching open")]
    UnbalancedClose,

    /// The tree was finished while a node was still open
    #[error("{kind} node at {span} was never closed")]
    Unclosed {
        /// Kind of the open node
        kind: NodeKind,
        /// Location of the open node
        span: Span,
    },

    /// No nodes were built
    #[error("tree is empty")]
    EmptyTree,

    /// More than one top-level node was built
    #[error("tree has {count} top-level nodes, expected a single Start node")]
    MultipleRoots {
        /// Number of top-level nodes
        count: usize,
    },

    /// The single top-level node is not a `Start` node
    #[error("tree is rooted at a {kind} node, expected Start")]
    RootNotStart {
        /// Kind of the top-level node
        kind: NodeKind,
    },
}

/// Incremental builder driven by the parser's open/close events
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Arena<Node>,
    open: Vec<NodeId>,
    roots: Vec<NodeId>,
}

impl AstBuilder {
    /// A builder with no nodes
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node; nodes closed while it is open become its children
    pub fn open(&mut self, kind: NodeKind, value: NodeValue, span: Span) -> NodeId {
        let node = self.nodes.alloc(Node::new(kind, value, span));
        self.open.push(node);
        node
    }

    /// Close the innermost open node and attach it to its enclosing node
    ///
    /// # Errors
    ///
    /// Returns `AstError::UnbalancedClose` when no node is open.
    pub fn close(&mut self) -> Result<NodeId, AstError> {
        let node = self.open.pop().ok_or(AstError::UnbalancedClose)?;
        self.nodes[node].closed = true;
        match self.open.last().copied() {
            Some(parent) => self.attach(parent, node)?,
            None => self.roots.push(node),
        }
        Ok(node)
    }

    /// Open and immediately close a childless node
    ///
    /// # Errors
    ///
    /// See [`AstBuilder::close`].
    pub fn leaf(&mut self, kind: NodeKind, value: NodeValue, span: Span) -> Result<NodeId, AstError> {
        self.open(kind, value, span);
        self.close()
    }

    /// Replace the payload of a node that is still open
    ///
    /// Piece literals only know their property table once the property nodes exist.
    ///
    /// # Errors
    ///
    /// Returns `AstError::NodeClosed` if the node has been closed.
    pub fn set_value(&mut self, node: NodeId, value: NodeValue) -> Result<(), AstError> {
        let data = &mut self.nodes[node];
        if data.closed {
            return Err(AstError::NodeClosed {
                kind: data.kind,
                span: data.span,
            });
        }
        data.value = value;
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        let parent_data = &self.nodes[parent];
        if parent_data.closed {
            return Err(AstError::NodeClosed {
                kind: parent_data.kind,
                span: parent_data.span,
            });
        }
        let child_data = &mut self.nodes[child];
        if child_data.parent.is_some() {
            return Err(AstError::AlreadyParented {
                kind: child_data.kind,
                span: child_data.span,
            });
        }
        child_data.parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Finish construction
    ///
    /// # Errors
    ///
    /// Fails if a node is still open or the tree is not rooted at exactly one `Start` node.
    pub fn finish(self) -> Result<Ast, AstError> {
        if let Some(&node) = self.open.last() {
            let data = &self.nodes[node];
            return Err(AstError::Unclosed {
                kind: data.kind,
                span: data.span,
            });
        }
        let root = match self.roots.as_slice() {
            [] => return Err(AstError::EmptyTree),
            [root] => *root,
            roots => return Err(AstError::MultipleRoots { count: roots.len() }),
        };
        let kind = self.nodes[root].kind;
        if kind != NodeKind::Start {
            return Err(AstError::RootNotStart { kind });
        }
        Ok(Ast::new(self.nodes, root))
    }
}
