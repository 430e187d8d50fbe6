//! Common test utilities for buildhub tests

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary repository with the given projects and a `.git/hooks` dir
pub fn create_repository(projects: &[&str]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().to_path_buf();

    std::fs::create_dir_all(root.join(".git").join("hooks")).expect("Failed to create hooks dir");
    std::fs::create_dir_all(root.join("projects")).expect("Failed to create projects dir");
    std::fs::write(root.join("projects").join("CMakeLists.txt"), SAMPLE_CMAKELISTS)
        .expect("Failed to write CMakeLists.txt");

    for name in projects {
        let project = root.join("projects").join(name);
        std::fs::create_dir_all(project.join("src")).expect("Failed to create project");
        std::fs::write(project.join("Doxyfile"), SAMPLE_DOXYFILE).expect("Failed to write Doxyfile");
    }

    (dir, root)
}

/// Creates a temporary directory that is not a repository
pub fn create_empty_dir() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Top-level CMakeLists.txt for the sample projects
pub const SAMPLE_CMAKELISTS: &str = r#"
cmake_minimum_required(VERSION 3.16)
project(samples CXX)

add_subdirectory(calculator)
add_subdirectory(words)
"#;

/// Minimal Doxyfile for a sample project
pub const SAMPLE_DOXYFILE: &str = r#"
PROJECT_NAME     = "sample"
INPUT            = src include
RECURSIVE        = YES
GENERATE_LATEX   = NO
"#;
