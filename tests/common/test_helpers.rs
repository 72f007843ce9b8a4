//! Test helper functions and utilities
//!
//! Every repository lives in its own temporary directory and git runs with
//! an environment that ignores the user's and the system's configuration, so
//! `insteadOf` rewrites or templates on the host cannot change what the tests
//! observe.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

use git_remotes::infrastructure::process::{RunnerConfig, SystemCommandRunner};
use git_remotes::RepositoryManager;

/// Return early from a test when git is not installed.
#[macro_export]
macro_rules! require_git {
    () => {
        if !$crate::common::test_helpers::git_available() {
            eprintln!("Couldn't find \"git\", skipping");
            return;
        }
    };
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Environment that keeps git away from anything outside `root`.
pub fn isolated_env(root: &Path) -> Vec<(String, String)> {
    let root = root.display().to_string();
    vec![
        ("HOME".to_string(), root.clone()),
        ("XDG_CONFIG_HOME".to_string(), root.clone()),
        ("GIT_CONFIG_NOSYSTEM".to_string(), "1".to_string()),
        ("GIT_CEILING_DIRECTORIES".to_string(), root),
    ]
}

/// A scratch directory holding one repository location.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// A location that does not exist yet.
    pub fn missing() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("repo");
        Self { temp_dir, path }
    }

    /// An existing directory that is not a repository.
    pub fn plain() -> Self {
        let repo = Self::missing();
        std::fs::create_dir_all(&repo.path).expect("Failed to create repo dir");
        repo
    }

    /// An initialized repository without remotes.
    pub fn initialized() -> Self {
        let repo = Self::plain();
        repo.git(&["init", "--quiet"]);
        repo
    }

    pub fn manager(&self) -> RepositoryManager {
        let mut config = RunnerConfig::default();
        for (key, value) in isolated_env(self.temp_dir.path()) {
            config = config.with_environment_variable(key, value);
        }
        RepositoryManager::new(&self.path).with_runner(SystemCommandRunner::with_config(config))
    }

    /// Run git directly, bypassing the crate, and return its stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .envs(isolated_env(self.temp_dir.path()))
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// The URL git has stored for `name`, read from the repository config.
    pub fn configured_url(&self, name: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--get", &format!("remote.{}.url", name)])
            .current_dir(&self.path)
            .envs(isolated_env(self.temp_dir.path()))
            .output()
            .expect("Failed to run git");
        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            None
        }
    }

    /// Names of the configured remotes as git reports them.
    pub fn remote_names(&self) -> Vec<String> {
        self.git(&["remote"])
            .lines()
            .map(|line| line.to_string())
            .collect()
    }
}
