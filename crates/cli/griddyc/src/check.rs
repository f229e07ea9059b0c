//! Check command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Compile `input` without writing anything
pub fn check(input: &Path, config: Option<&Path>) -> Result<()> {
    println!("{} {}", "Checking".green().bold(), input.display());

    let settings = gd_driver::load_config(input, config)?;
    match gd_driver::compile_file(input, &settings) {
        Ok(compilation) => {
            println!("    {} Structure collected", "✓".green());
            println!("    {} Names resolved", "✓".green());
            println!("    {} {} bytes of C generated", "✓".green(), compilation.program.len());
            println!("{} No errors found", "Success:".green().bold());
            Ok(())
        }
        Err(error) => {
            eprintln!("    {} {:#}", "✗".red(), error);
            anyhow::bail!("Check failed for {}", input.display());
        }
    }
}
