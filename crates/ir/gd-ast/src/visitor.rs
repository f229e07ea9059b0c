//! Visitor dispatch over the closed set of node kinds

use crate::{Ast, NodeId, NodeKind};

/// Tree visitor that appends emitted text to an output buffer
///
/// [`Visitor::visit_node`] dispatches on the node kind. Every per-kind method defaults
/// to visiting the node's children in order, so a backend only overrides the kinds it
/// lowers. A backend that wants to skip a subtree simply does not recurse.
pub trait Visitor {
    /// Error produced when a node cannot be lowered
    type Error;

    /// Visit a node by ID
    fn visit_node(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        match ast.kind(node) {
            NodeKind::Start => self.visit_start(ast, node, out),
            NodeKind::Output => self.visit_output(ast, node, out),
            NodeKind::Game => self.visit_game(ast, node, out),
            NodeKind::Board => self.visit_board(ast, node, out),
            NodeKind::Assign => self.visit_assign(ast, node, out),
            NodeKind::Expr => self.visit_expr(ast, node, out),
            NodeKind::Empty => self.visit_empty(ast, node, out),
            NodeKind::Operator => self.visit_operator(ast, node, out),
            NodeKind::String => self.visit_string(ast, node, out),
            NodeKind::Ident => self.visit_ident(ast, node, out),
            NodeKind::Integer => self.visit_integer(ast, node, out),
            NodeKind::Boolean => self.visit_boolean(ast, node, out),
            NodeKind::Access => self.visit_access(ast, node, out),
            NodeKind::Place => self.visit_place(ast, node, out),
            NodeKind::Piece => self.visit_piece(ast, node, out),
            NodeKind::Pair => self.visit_pair(ast, node, out),
            NodeKind::List => self.visit_list(ast, node, out),
            NodeKind::Unrefined => self.visit_unrefined(ast, node, out),
        }
    }

    /// Visit every child of `node`, left to right
    fn visit_children(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        for &child in ast.children(node) {
            self.visit_node(ast, child, out)?;
        }
        Ok(())
    }

    /// Program root
    fn visit_start(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// `Output` statement
    fn visit_output(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// `Game` section
    fn visit_game(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Board literal
    fn visit_board(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Assignment
    fn visit_assign(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Parenthesized expression
    fn visit_expr(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Declaration without a value
    fn visit_empty(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Operator symbol
    fn visit_operator(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// String literal
    fn visit_string(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Identifier reference
    fn visit_ident(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Integer literal
    fn visit_integer(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Boolean literal
    fn visit_boolean(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Board cell lookup
    fn visit_access(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Piece placement
    fn visit_place(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Piece literal
    fn visit_piece(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// Coordinate pair
    fn visit_pair(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// List
    fn visit_list(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error> {
        self.visit_children(ast, node, out)
    }

    /// A node the parser never refined; there is no sensible default
    fn visit_unrefined(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeValue, SourceNode};

    /// Records kinds in visit order and writes integer literals
    struct Trace {
        kinds: Vec<NodeKind>,
    }

    impl Visitor for Trace {
        type Error = String;

        fn visit_node(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), String> {
            self.kinds.push(ast.kind(node));
            match ast.kind(node) {
                NodeKind::Integer => self.visit_integer(ast, node, out),
                NodeKind::Unrefined => self.visit_unrefined(ast, node, out),
                _ => self.visit_children(ast, node, out),
            }
        }

        /// Integer literal
        fn visit_integer(&mut self, ast: &Ast, node: NodeId, out: &mut String) -> Result<(), String> {
            if let NodeValue::Integer(value) = ast.value(node) {
                out.push_str(&value.to_string());
            }
            Ok(())
        }

        fn visit_unrefined(&mut self, ast: &Ast, node: NodeId, _out: &mut String) -> Result<(), String> {
            Err(ast.describe(node))
        }
    }

    #[test]
    fn test_preorder_dispatch_order() {
        let source = SourceNode::start(vec![
            SourceNode::assign("a", SourceNode::integer(1)),
            SourceNode::output(SourceNode::integer(2)),
        ]);
        let ast = crate::Ast::from_source(&source).expect("builds");
        let mut trace = Trace { kinds: Vec::new() };
        let mut out = String::new();
        ast.accept(ast.root(), &mut trace, &mut out).expect("visits");

        assert_eq!(out, "12");
        assert_eq!(
            trace.kinds,
            vec![
                NodeKind::Start,
                NodeKind::Assign,
                NodeKind::Ident,
                NodeKind::Integer,
                NodeKind::Output,
                NodeKind::Integer,
            ]
        );
    }

    #[test]
    fn test_unrefined_is_surfaced() {
        let source = SourceNode::start(vec![SourceNode::new(
            NodeKind::Unrefined,
            crate::SourceValue::None,
            Vec::new(),
        )]);
        let ast = crate::Ast::from_source(&source).expect("builds");
        let mut trace = Trace { kinds: Vec::new() };
        let mut out = String::new();
        let error = ast
            .accept(ast.root(), &mut trace, &mut out)
            .expect_err("unrefined node must fail");
        assert_eq!(error, "Unrefined at 0..0");
    }
}
