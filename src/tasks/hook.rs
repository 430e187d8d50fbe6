//! Pre-commit hook installer

use std::path::Path;

use crate::executor::{Plan, Step};

/// Hook body: format C++ sources with clang-format, then stage everything
pub const PRE_COMMIT_HOOK: &str = r#"#!/bin/sh
find . -name "*.cpp" -o -name "*.h" | xargs clang-format -i
git add .
"#;

/// Owner read/write/execute
pub const HOOK_MODE: u32 = 0o700;

/// Plan writing the hook to `path`
pub fn plan(path: &Path) -> Plan {
    let mut plan = Plan::new();
    plan.push(Step::WriteFile {
        path: path.to_path_buf(),
        contents: PRE_COMMIT_HOOK.to_string(),
        mode: HOOK_MODE,
    });
    plan.push(Step::note(format!(
        "Pre-commit hook set up at {}",
        path.display()
    )));
    plan
}
