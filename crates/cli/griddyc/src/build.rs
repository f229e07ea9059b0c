//! Build command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Compile `input` and write the C program, returning the output path
pub fn build(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<PathBuf> {
    let start = Instant::now();

    println!("{} {}", "Compiling".green().bold(), input.display());

    let settings = gd_driver::load_config(input, config)?;
    let compilation = gd_driver::compile_file(input, &settings)?;

    if let Some(board) = &compilation.board {
        println!("  {} `{}` {}x{}", "Board:".bold(), board.name, board.width, board.height);
    }
    println!("  {} {} per player", "Pieces:".bold(), compilation.pieces);

    let output = output.map_or_else(|| input.with_extension("c"), Path::to_path_buf);
    log::debug!("writing {} bytes to {}", compilation.program.len(), output.display());
    std::fs::write(&output, &compilation.program)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "  {} {} in {:.2}s",
        "Finished".green().bold(),
        output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gd_ast::SourceNode;
    use tempfile::TempDir;

    fn write_tree(dir: &TempDir, source: &SourceNode) -> PathBuf {
        let path = dir.path().join("game.json");
        std::fs::write(&path, serde_json::to_string(source).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_build_writes_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = write_tree(
            &dir,
            &SourceNode::start(vec![
                SourceNode::assign("score", SourceNode::integer(3)),
                SourceNode::output(SourceNode::ident("score")),
            ]),
        );

        let output = build(&input, None, None).unwrap();
        assert_eq!(output, dir.path().join("game.c"));
        let program = std::fs::read_to_string(output).unwrap();
        assert!(program.contains("int score = 3;\nprintf(\"%d\\n\", score);\n"));
    }

    #[test]
    fn test_build_with_explicit_output_and_config() {
        let dir = TempDir::new().unwrap();
        let input = write_tree(&dir, &SourceNode::start(vec![]));
        let config = dir.path().join("settings.toml");
        std::fs::write(&config, "[game]\nplaceholder_rounds = 9\n").unwrap();
        let target = dir.path().join("out.c");

        build(&input, Some(&target), Some(&config)).unwrap();
        let program = std::fs::read_to_string(target).unwrap();
        assert!(program.contains("int griddy_round = 9;\n"));
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_tree(
            &dir,
            &SourceNode::start(vec![SourceNode::output(SourceNode::ident("missing"))]),
        );

        assert!(build(&input, None, None).is_err());
        assert!(!dir.path().join("game.c").exists());
    }
}
