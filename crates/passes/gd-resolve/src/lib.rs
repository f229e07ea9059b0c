//! Scope resolution for Griddy
//!
//! Griddy has no type annotations. The only way to know what an identifier holds at a
//! given point is to find the assignment that bound it. This crate walks the tree
//! backwards from a use site to that assignment.
//!
//! # Scopes
//!
//! Every ancestor of a use site is a scope. Inside a scope, only the `Assign` children
//! that come before the branch leading to the use site are visible, and the latest of
//! those wins. Scopes are searched innermost first.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gd_resolve::{Resolution, ScopeResolver};
//!
//! let resolver = ScopeResolver::new(&ast);
//! match resolver.most_recent_assignment(use_site, "score") {
//!     Resolution::Assigned(assign) => { /* child 1 of `assign` is the bound value */ }
//!     Resolution::Unresolved => { /* report an unbound identifier */ }
//! }
//! ```

pub mod error;
pub mod resolver;

pub use error::ResolutionError;
pub use resolver::{Resolution, ScopeResolver};
