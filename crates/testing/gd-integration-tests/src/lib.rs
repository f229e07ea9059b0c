//! Integration test utilities for the Griddy backend

use anyhow::{Context, Result};
use gd_ast::{Ast, SourceNode};
use gd_structure::CodegenConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Compile a hand-written tree with default settings
///
/// # Errors
///
/// Returns the tree or compilation error.
pub fn compile_tree(source: &SourceNode) -> Result<String> {
    compile_tree_with(source, &CodegenConfig::default())
}

/// Compile a hand-written tree
///
/// # Errors
///
/// Returns the tree or compilation error.
pub fn compile_tree_with(source: &SourceNode, config: &CodegenConfig) -> Result<String> {
    let ast = Ast::from_source(source)?;
    Ok(gd_driver::compile(&ast, config)?.program)
}

/// Text between a section marker and the next one, or the epilogue
#[must_use]
pub fn section<'a>(program: &'a str, marker: &str) -> Option<&'a str> {
    let start = program.find(marker)? + marker.len();
    let rest = program[start..].trim_start_matches('\n');
    let end = rest
        .find("/*    GAME    */")
        .or_else(|| rest.rfind(gd_c_backend::EPILOGUE))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Lowered setup statements
#[must_use]
pub fn setup_section(program: &str) -> Option<&str> {
    section(program, "/*    SETUP    */")
}

/// Game section including the loop
#[must_use]
pub fn game_section(program: &str) -> Option<&str> {
    section(program, "/*    GAME    */")
}

/// What a test project expects from compilation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Expectations {
    /// Fragments the program must contain, in this order
    pub contains: Vec<String>,
    /// Fragments the program must not contain
    pub excludes: Vec<String>,
    /// Substring of the error message when compilation must fail
    pub error: Option<String>,
}

/// A directory under `test-projects`
#[derive(Debug)]
pub struct TestProject {
    /// Directory name
    pub name: String,
    /// Directory holding `game.json`
    pub dir: PathBuf,
    /// Contents of `project.toml`
    pub expectations: Expectations,
}

impl TestProject {
    /// Load `project.toml` from `dir`
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or malformed.
    pub fn load(dir: &Path) -> Result<Self> {
        let manifest = dir.join("project.toml");
        let text = fs::read_to_string(&manifest).with_context(|| format!("failed to read {}", manifest.display()))?;
        let expectations = toml::from_str(&text).with_context(|| format!("failed to parse {}", manifest.display()))?;
        Ok(Self {
            name: dir
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("unknown")
                .to_string(),
            dir: dir.to_path_buf(),
            expectations,
        })
    }

    /// Every project under `root`, sorted by name
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed or a project cannot be loaded.
    pub fn discover(root: &Path) -> Result<Vec<Self>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if path.is_dir() && path.join("project.toml").exists() {
                dirs.push(path);
            }
        }
        dirs.sort();
        dirs.iter().map(|dir| Self::load(dir)).collect()
    }

    /// Compile the project's `game.json` with its settings
    ///
    /// # Errors
    ///
    /// Returns the compilation error.
    pub fn compile(&self) -> Result<String> {
        let input = self.dir.join("game.json");
        let config = gd_driver::load_config(&input, None)?;
        Ok(gd_driver::compile_file(&input, &config)?.program)
    }

    /// Check the compilation result against the expectations
    ///
    /// Returns a description of the first mismatch.
    pub fn verify(&self) -> Result<(), String> {
        let expectations = &self.expectations;
        match (self.compile(), &expectations.error) {
            (Err(error), Some(expected)) => {
                let message = format!("{error:#}");
                if message.contains(expected.as_str()) {
                    Ok(())
                } else {
                    Err(format!("expected error containing `{expected}`, got `{message}`"))
                }
            }
            (Err(error), None) => Err(format!("unexpected error: {error:#}")),
            (Ok(_), Some(expected)) => Err(format!("expected error containing `{expected}`, but compiled")),
            (Ok(program), None) => {
                let mut cursor = 0;
                for fragment in &expectations.contains {
                    match program[cursor..].find(fragment.as_str()) {
                        Some(offset) => cursor += offset + fragment.len(),
                        None => return Err(format!("missing (or out of order): {fragment:?}")),
                    }
                }
                for fragment in &expectations.excludes {
                    if program.contains(fragment.as_str()) {
                        return Err(format!("unexpected fragment: {fragment:?}"));
                    }
                }
                Ok(())
            }
        }
    }
}
