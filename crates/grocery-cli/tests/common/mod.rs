// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

use std::{path::PathBuf, process::Command};

use tempfile::TempDir;

/// A `grocery` command isolated from the user's real state and environment.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    /// Creates a sandbox whose user directory holds Jane (`user3@mail.com` / `user3`).
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("users.json"),
            r#"[{ "name": "Jane", "email": "user3@mail.com", "password": "user3" }]"#,
        )
        .expect("Failed to write users file");

        Self { dir }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    pub fn grocery(&self) -> Command {
        let mut command = grocery();
        command
            .env_remove("GROCERY_PASSWORD")
            .env("GROCERY_STATE_DIR", self.state_dir())
            .env("GROCERY_USERS", self.dir.path().join("users.json"))
            .arg("--no-delay");
        command
    }
}

/// Create a new grocery CLI command
pub fn grocery() -> Command {
    Command::new(env!("CARGO_BIN_EXE_grocery"))
}
