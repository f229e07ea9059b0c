//! C backend for Griddy
//!
//! Lowers a Griddy tree to a standalone C program. Statements are emitted by a
//! [`Visitor`](gd_ast::Visitor) over the tree; board geometry, the per-player piece
//! copies and the initial placement come from the structural model and are rendered
//! through [`CFormat`].
//!
//! The generated program has this shape:
//!
//! ```text
//! prologue          includes, `struct Piece`, the `empty_piece` sentinel
//! setup section     lowered setup statements, player piece copies, initial placement
//! game section      lowered game statements inside the game loop
//! epilogue          `return 0;`
//! ```

mod board;
mod error;
mod format;
mod lower;

pub use board::render_board;
pub use error::CodegenError;
pub use format::CFormat;

use gd_ast::{Ast, Visitor};
use gd_resolve::ScopeResolver;
use gd_structure::{CodegenConfig, GriddyStructure};
use log::debug;

/// Start of every generated program, up to the setup section
pub const PROLOGUE: &str = "\
/* === Code generated by Griddy compiler === */
#include <limits.h>
#include <stdio.h>
#include <stdlib.h>
#include <string.h>

int main(int argc, char *argv[]){
struct Piece { char* name; unsigned int limit; unsigned int count; int capture; int placeable; int can_jump; };
struct Piece empty_piece;
empty_piece.name = calloc(2, sizeof(char));
strcpy(empty_piece.name, \" \");
empty_piece.limit = 0;
empty_piece.count = 0;
empty_piece.capture = 0;
empty_piece.placeable = 0;
empty_piece.can_jump = 0;

";

/// End of every generated program
pub const EPILOGUE: &str = "\nreturn 0;\n}\n";

/// Lowering state for one compilation
pub struct CBackend<'ast> {
    ast: &'ast Ast,
    resolver: ScopeResolver<'ast>,
    structure: GriddyStructure,
    format: CFormat,
}

impl<'ast> CBackend<'ast> {
    /// Backend for `ast` using an already collected structure
    pub fn new(ast: &'ast Ast, structure: GriddyStructure) -> Self {
        Self {
            ast,
            resolver: ScopeResolver::new(ast),
            structure,
            format: CFormat,
        }
    }

    /// Structural model behind the generated program
    pub fn structure(&self) -> &GriddyStructure {
        &self.structure
    }

    /// Lower the whole tree to program text
    ///
    /// # Errors
    ///
    /// Returns the first error hit; no partial program is produced.
    pub fn lower(mut self) -> Result<String, CodegenError> {
        let ast = self.ast;
        let mut out = String::new();
        self.visit_node(ast, ast.root(), &mut out)?;
        debug!("generated {} bytes of C", out.len());
        Ok(out)
    }
}

/// Collect the structure of `ast` and lower it to a C program
///
/// # Errors
///
/// Fails on the first structural, resolution or lowering error.
pub fn generate(ast: &Ast, config: &CodegenConfig) -> Result<String, CodegenError> {
    let mut structure = GriddyStructure::new(config);
    gd_structure::collect(ast, &mut structure)?;
    CBackend::new(ast, structure).lower()
}
