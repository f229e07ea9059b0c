//! Compiles every project under `test-projects` and checks it against its
//! `project.toml`

use gd_integration_tests::TestProject;
use std::path::PathBuf;

#[test]
fn test_all_projects() {
    let _ = env_logger::builder().is_test(true).try_init();
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-projects");
    let projects = TestProject::discover(&root).expect("Failed to load test projects");

    assert!(!projects.is_empty(), "No test projects found in {}", root.display());

    let failures: Vec<String> = projects
        .iter()
        .filter_map(|project| {
            project
                .verify()
                .err()
                .map(|reason| format!("{}: {reason}", project.name))
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} projects failed:\n{}",
        failures.len(),
        projects.len(),
        failures.join("\n")
    );
}

#[test]
fn test_projects_compile_from_a_copy() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-projects");
    let source = root.join("03-mirrored-pieces");
    let dir = tempfile::TempDir::new().unwrap();
    for file in ["game.json", "project.toml"] {
        std::fs::copy(source.join(file), dir.path().join(file)).unwrap();
    }

    // Without griddy.toml the configured capture default is gone
    let project = TestProject::load(dir.path()).unwrap();
    let program = project.compile().unwrap();
    assert!(program.contains("pawn.capture = 0;\n"));
    assert!(project.verify().is_err());
}
