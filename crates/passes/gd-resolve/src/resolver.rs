//! Backward search from a use site to the assignment that binds it

use crate::error::ResolutionError;
use gd_ast::{Ast, NodeId, NodeKind};
use log::trace;

/// Outcome of looking up an identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The `Assign` node that most recently bound the identifier
    Assigned(NodeId),
    /// No visible assignment exists
    Unresolved,
}

impl Resolution {
    /// The binding `Assign` node, if resolved
    pub fn assignment(self) -> Option<NodeId> {
        match self {
            Self::Assigned(assign) => Some(assign),
            Self::Unresolved => None,
        }
    }
}

/// Scope resolver over a finished tree
#[derive(Clone, Copy)]
pub struct ScopeResolver<'ast> {
    ast: &'ast Ast,
}

impl<'ast> ScopeResolver<'ast> {
    /// Resolver over `ast`
    pub fn new(ast: &'ast Ast) -> Self {
        Self { ast }
    }

    /// Find the latest assignment to `name` visible from `node`
    ///
    /// Enclosing scopes are searched from the innermost outwards. Within one scope
    /// the candidate with the highest pre-order index below the use site wins.
    pub fn most_recent_assignment(&self, node: NodeId, name: &str) -> Resolution {
        for (scope, branch) in self.scopes(node) {
            let siblings = self.ast.children(scope);
            let Some(branch_pos) = siblings.iter().position(|&child| child == branch) else {
                continue;
            };
            let found = siblings[..branch_pos]
                .iter()
                .rev()
                .copied()
                .find(|&candidate| self.assigned_name(candidate) == Some(name));
            if let Some(assign) = found {
                trace!(
                    "`{name}` used at {} bound by {}",
                    self.ast.span(node),
                    self.ast.describe(assign)
                );
                return Resolution::Assigned(assign);
            }
        }
        Resolution::Unresolved
    }

    /// Whether `name` already has an assignment visible from `node`
    ///
    /// Target code declares a variable on first assignment and plainly assigns it
    /// afterwards; this decides between the two.
    pub fn is_declared_in_scope(&self, node: NodeId, name: &str) -> bool {
        matches!(
            self.most_recent_assignment(node, name),
            Resolution::Assigned(_)
        )
    }

    /// Like [`ScopeResolver::most_recent_assignment`] but an unresolved name is an error
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::Unbound` with spelling suggestions.
    pub fn require(&self, node: NodeId, name: &str) -> Result<NodeId, ResolutionError> {
        match self.most_recent_assignment(node, name) {
            Resolution::Assigned(assign) => Ok(assign),
            Resolution::Unresolved => Err(ResolutionError::Unbound {
                name: name.to_string(),
                span: self.ast.span(node),
                suggestions: ResolutionError::compute_suggestions(name, &self.visible_names(node)),
            }),
        }
    }

    /// Value node bound to `name` at `node`
    ///
    /// # Errors
    ///
    /// Fails if the name is unbound or the binding assignment has no value.
    pub fn value_of(&self, node: NodeId, name: &str) -> Result<NodeId, ResolutionError> {
        let assign = self.require(node, name)?;
        self.ast
            .child(assign, 1)
            .ok_or_else(|| ResolutionError::MalformedAssignment {
                name: name.to_string(),
                span: self.ast.span(assign),
            })
    }

    /// Value node bound to `name`, following identifier aliases such as `b = a`
    ///
    /// Each hop resolves from an earlier position in the tree, so the chase ends.
    ///
    /// # Errors
    ///
    /// Fails if any name along the alias chain is unbound.
    pub fn effective_value(&self, node: NodeId, name: &str) -> Result<NodeId, ResolutionError> {
        let mut value = self.value_of(node, name)?;
        while let Some(alias) = self.ast.ident_name(value) {
            value = self.value_of(value, alias)?;
        }
        Ok(value)
    }

    /// Kind of the value bound to `name`, following aliases
    ///
    /// # Errors
    ///
    /// See [`ScopeResolver::effective_value`].
    pub fn effective_kind(&self, node: NodeId, name: &str) -> Result<NodeKind, ResolutionError> {
        self.effective_value(node, name)
            .map(|value| self.ast.kind(value))
    }

    /// Every name assigned before `node` in a visible scope
    pub fn visible_names(&self, node: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        for (scope, branch) in self.scopes(node) {
            for &child in self.ast.children(scope) {
                if child == branch {
                    break;
                }
                if let Some(name) = self.assigned_name(child) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    /// `(scope, branch)` pairs from the innermost scope out, where `branch` is the
    /// child of `scope` that contains `node`
    fn scopes(&self, node: NodeId) -> impl Iterator<Item = (NodeId, NodeId)> + 'ast {
        let ast = self.ast;
        std::iter::successors(ast.parent(node).map(|scope| (scope, node)), move |&(scope, _)| {
            ast.parent(scope).map(|outer| (outer, scope))
        })
    }

    /// Target name if `node` is an assignment
    fn assigned_name(&self, node: NodeId) -> Option<&'ast str> {
        let ast = self.ast;
        if ast.kind(node) != NodeKind::Assign {
            return None;
        }
        ast.child(node, 0).and_then(|target| ast.ident_name(target))
    }
}
