//! Code generation errors

use gd_ast::{Ast, NodeId, NodeKind};
use gd_resolve::ResolutionError;
use gd_span::Span;
use gd_structure::StructureError;

/// Errors that abort code generation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    /// An identifier without a visible assignment
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A value kind with no lowering rule in this construct
    #[error("{context}: cannot lower a {found} value at {span}")]
    UnsupportedValueType {
        /// The construct being lowered, including the identifier where there is one
        context: String,
        /// Kind of the offending node
        found: NodeKind,
        /// Location of the offending node
        span: Span,
    },

    /// A node the parser never refined reached the backend
    #[error("internal error: unrefined {kind} node at {span} reached code generation")]
    InternalStructure {
        /// Kind of the node
        kind: NodeKind,
        /// Location of the node
        span: Span,
    },

    /// A node without the children its kind requires
    #[error("malformed {kind} node at {span}: {reason}")]
    MalformedNode {
        /// Kind of the node
        kind: NodeKind,
        /// Location of the node
        span: Span,
        /// What is missing
        reason: String,
    },

    /// Board or piece setup failed
    #[error(transparent)]
    Structure(#[from] StructureError),
}

impl CodegenError {
    pub(crate) fn unsupported(ast: &Ast, node: NodeId, context: impl Into<String>) -> Self {
        Self::UnsupportedValueType {
            context: context.into(),
            found: ast.kind(node),
            span: ast.span(node),
        }
    }

    pub(crate) fn internal(ast: &Ast, node: NodeId) -> Self {
        Self::InternalStructure {
            kind: ast.kind(node),
            span: ast.span(node),
        }
    }

    pub(crate) fn malformed(ast: &Ast, node: NodeId, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            kind: ast.kind(node),
            span: ast.span(node),
            reason: reason.into(),
        }
    }
}
