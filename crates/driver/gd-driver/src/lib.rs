//! Compilation driver
//!
//! Runs the Griddy backend pipeline on a parsed tree: structure collection, scope
//! resolution and C lowering. Also loads trees and settings from disk for the CLI.

use anyhow::{Context, Result};
use gd_ast::{Ast, SourceNode};
use gd_c_backend::{CBackend, CodegenError};
use gd_structure::{CodegenConfig, GriddyStructure, collect};
use log::{debug, info};
use std::path::Path;

/// Name of the settings file picked up next to an input tree
pub const CONFIG_FILE_NAME: &str = "griddy.toml";

/// Output of one compilation
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Generated C program
    pub program: String,
    /// Name and size of the board the pieces are placed on
    pub board: Option<BoardSummary>,
    /// Number of distinct piece definitions, per player
    pub pieces: usize,
}

/// Board the initial placement used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    /// Identifier of the board
    pub name: String,
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

/// Failure to turn a serialized tree into an [`Ast`]
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The document is not a valid JSON tree
    #[error("invalid tree document: {0}")]
    Json(#[from] serde_json::Error),
    /// The tree violates a construction rule
    #[error("invalid tree: {0}")]
    Tree(#[from] gd_ast::AstError),
}

/// Compile a finished tree
///
/// # Errors
///
/// Returns the first structural, resolution or lowering error.
pub fn compile(ast: &Ast, config: &CodegenConfig) -> Result<Compilation, CodegenError> {
    let mut structure = GriddyStructure::new(config);
    collect(ast, &mut structure)?;

    let board = structure.setup.board().map(|board| BoardSummary {
        name: board.name().to_string(),
        width: board.width(),
        height: board.height(),
    });
    let pieces = structure.setup.player_def.len();
    debug!("collected {pieces} piece definitions, board {board:?}");

    let program = CBackend::new(ast, structure).lower()?;
    Ok(Compilation {
        program,
        board,
        pieces,
    })
}

/// Build an [`Ast`] from a JSON tree document
///
/// # Errors
///
/// Fails on malformed JSON or a tree the builder rejects.
pub fn parse_source_tree(json: &str) -> Result<Ast, InputError> {
    let source: SourceNode = serde_json::from_str(json)?;
    Ok(Ast::from_source(&source)?)
}

/// Compile a JSON tree document to C
///
/// # Errors
///
/// Fails if the document is invalid or compilation fails.
pub fn compile_source_tree(json: &str, config: &CodegenConfig) -> Result<Compilation> {
    let ast = parse_source_tree(json)?;
    Ok(compile(&ast, config)?)
}

/// Compile the JSON tree stored at `path`
///
/// # Errors
///
/// Fails if the file cannot be read or does not compile.
pub fn compile_file(path: impl AsRef<Path>, config: &CodegenConfig) -> Result<Compilation> {
    let path = path.as_ref();
    info!("compiling {}", path.display());
    let json = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    compile_source_tree(&json, config).with_context(|| format!("failed to compile {}", path.display()))
}

/// Settings for compiling `input`
///
/// An explicit `config` path must exist. Without one, `griddy.toml` next to the input
/// is used when present, and the defaults otherwise.
///
/// # Errors
///
/// Fails if a settings file cannot be read or parsed.
pub fn load_config(input: &Path, config: Option<&Path>) -> Result<CodegenConfig> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                debug!("no {CONFIG_FILE_NAME} next to {}, using defaults", input.display());
                return Ok(CodegenConfig::default());
            }
            candidate
        }
    };

    let text = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let config =
        CodegenConfig::from_toml_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    debug!("loaded settings from {}", path.display());
    Ok(config)
}
