use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::common::result::{RemotesResult, ResultExt};
use crate::domain::entities::remote_set::RemoteSet;
use crate::domain::value_objects::remote_address::{RemoteAddress, DEFAULT_REMOTE_NAME};
use crate::infrastructure::filesystem::{Filesystem, LocalFilesystem};
use crate::infrastructure::git::remote_update::{RemoteStep, RemoteUpdate, StepResult};
use crate::infrastructure::process::{CommandOutput, CommandRunner, SystemCommandRunner};

pub const GIT_EXECUTABLE: &str = "git";
pub const GIT_DIRECTORY: &str = ".git";
pub const GIT_CONFIG: &str = "config";

/// Parse the output of `git remote -v`.
///
/// Each line is `<name> <url> (fetch|push)`; only the first two fields are
/// used. A name seen again replaces the earlier address, so when fetch and
/// push URLs differ the last line listed wins.
pub fn parse_remote_listing(stdout: &str) -> RemoteSet {
    let mut remotes = RemoteSet::new();

    for line in stdout.lines() {
        let mut tokens = line.split_whitespace();
        let (name, url) = match (tokens.next(), tokens.next()) {
            (Some(name), Some(url)) => (name, url),
            _ => continue,
        };

        let remote = match RemoteAddress::from_url(url, name) {
            Ok(remote) => remote,
            Err(e) => {
                warn!("Skipping remote '{}': {}", name, e);
                continue;
            }
        };

        if let Some(existing) = remotes.get(name) {
            if !existing.same_endpoint(&remote) {
                warn!(
                    "Remote '{}' lists different fetch and push URLs, keeping {}",
                    name,
                    remote.redacted_url().unwrap_or_default()
                );
            }
        }
        remotes.insert(remote);
    }

    remotes
}

/// Manages the remotes of one repository through the git executable.
///
/// Nothing is cached: every query runs git again.
pub struct RepositoryManager {
    location: PathBuf,
    git_executable: String,
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
}

impl fmt::Debug for RepositoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryManager")
            .field("location", &self.location)
            .field("git_executable", &self.git_executable)
            .finish_non_exhaustive()
    }
}

impl RepositoryManager {
    /// Create a manager for the repository at `location`.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            git_executable: GIT_EXECUTABLE.to_string(),
            runner: Box::new(SystemCommandRunner::new()),
            filesystem: Box::new(LocalFilesystem),
        }
    }

    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_filesystem(mut self, filesystem: impl Filesystem + 'static) -> Self {
        self.filesystem = Box::new(filesystem);
        self
    }

    /// Use another git binary than the one found on `PATH`.
    pub fn with_git_executable(mut self, executable: impl Into<String>) -> Self {
        self.git_executable = executable.into();
        self
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn git_dir(&self) -> PathBuf {
        self.location.join(GIT_DIRECTORY)
    }

    pub fn config_file(&self) -> PathBuf {
        self.git_dir().join(GIT_CONFIG)
    }

    fn git(&self, args: &[&str]) -> RemotesResult<CommandOutput> {
        debug!(
            "Running git {} in {}",
            args.iter().take(2).copied().collect::<Vec<_>>().join(" "),
            self.location.display()
        );
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Ok(self
            .runner
            .run(&self.git_executable, &args, &self.location)?)
    }

    /// Whether `location` exists and git recognizes it as a repository.
    pub fn is_repository(&self) -> RemotesResult<bool> {
        if !self.filesystem.exists(&self.location) {
            return Ok(false);
        }

        Ok(self.git(&["rev-parse", "--git-dir"])?.success)
    }

    /// Create `location` if needed and run `git init` in it.
    ///
    /// Running it on an existing repository leaves its remotes alone.
    pub fn init(&self) -> RemotesResult<bool> {
        if !self.filesystem.exists(&self.location) {
            self.filesystem
                .create_directory(&self.location)
                .with_filesystem_error(
                    "Failed to create repository directory",
                    Some(self.location.clone()),
                )?;
        }

        let output = self.git(&["init"])?;
        if output.success {
            info!("Initialized repository at {}", self.location.display());
        } else {
            warn!("git init failed: {}", output.stderr.trim());
        }
        Ok(output.success)
    }

    /// All configured remotes, empty when git cannot list them.
    pub fn list_remotes(&self) -> RemotesResult<RemoteSet> {
        let output = self.git(&["remote", "-v"])?;
        if !output.success {
            debug!("git remote -v failed: {}", output.stderr.trim());
        }
        Ok(parse_remote_listing(&output.stdout))
    }

    pub fn has_remote(&self, name: &str) -> RemotesResult<bool> {
        Ok(self.list_remotes()?.contains(name))
    }

    pub fn get_remote(&self, name: &str) -> RemotesResult<Option<RemoteAddress>> {
        Ok(self.list_remotes()?.take(name))
    }

    /// Register `remote` under its own name.
    pub fn add_remote(&self, remote: &RemoteAddress) -> RemotesResult<bool> {
        remote.validate_name()?;
        let url = remote.to_url()?;

        let output = self.git(&["remote", "add", remote.name(), &url])?;
        if output.success {
            info!("Added remote {}", remote);
        } else {
            warn!("Adding remote {} failed: {}", remote.name(), output.stderr.trim());
        }
        Ok(output.success)
    }

    /// Apply `updated` to the remote called `name` and report each git step.
    ///
    /// A missing remote is added. An existing one is merged with `updated`
    /// (see [`RemoteAddress::merge`]), renamed when the merged name differs,
    /// and always given the merged URL.
    pub fn update_remote(&self, updated: RemoteAddress, name: &str) -> RemotesResult<RemoteUpdate> {
        let current = match self.get_remote(name)? {
            Some(current) => current,
            None => {
                let added = self.add_remote(&updated)?;
                let step = RemoteStep::Add {
                    name: updated.name().to_string(),
                };
                let mut update = RemoteUpdate::new(updated);
                update.record(StepResult::new(step, added, ""));
                return Ok(update);
            }
        };

        let merged = Self::merge_remotes(current, &updated);
        merged.validate_name()?;
        // Render before touching git so an unusable address changes nothing.
        let url = merged.to_url()?;
        let mut update = RemoteUpdate::new(merged.clone());

        if merged.name() != name {
            let output = self.git(&["remote", "rename", name, merged.name()])?;
            if !output.success {
                warn!("Renaming remote {} failed: {}", name, output.stderr.trim());
            }
            update.record(StepResult::new(
                RemoteStep::Rename {
                    from: name.to_string(),
                    to: merged.name().to_string(),
                },
                output.success,
                output.stderr.trim(),
            ));
        }

        let output = self.git(&["remote", "set-url", merged.name(), &url])?;
        if !output.success {
            warn!(
                "Setting URL of remote {} failed: {}",
                merged.name(),
                output.stderr.trim()
            );
        }
        update.record(StepResult::new(
            RemoteStep::SetUrl {
                name: merged.name().to_string(),
            },
            output.success,
            output.stderr.trim(),
        ));

        if update.succeeded() {
            info!("Updated remote {}", merged);
        }
        Ok(update)
    }

    /// [`RepositoryManager::update_remote`], reduced to overall success.
    pub fn set_remote(&self, updated: RemoteAddress, name: &str) -> RemotesResult<bool> {
        Ok(self.update_remote(updated, name)?.succeeded())
    }

    /// Field-by-field override of `original` by the fields `update` carries.
    pub fn merge_remotes(original: RemoteAddress, update: &RemoteAddress) -> RemoteAddress {
        original.merge(update)
    }

    pub fn set_remote_url(&self, url: &str, name: &str) -> RemotesResult<bool> {
        self.set_remote(RemoteAddress::from_url(url, name)?, name)
    }

    /// Point the remote currently at `original_url` to `updated_url`.
    ///
    /// Returns false without running any mutation when no remote matches.
    pub fn change_remote_url(&self, original_url: &str, updated_url: &str) -> RemotesResult<bool> {
        let found = match self.find_remote_by_url(original_url)? {
            Some(found) => found,
            None => {
                debug!("No remote points at {}", original_url);
                return Ok(false);
            }
        };

        let name = found.name().to_string();
        self.set_remote(RemoteAddress::from_url(updated_url, name.as_str())?, &name)
    }

    /// First remote with the same scheme, host and path as `url`.
    pub fn find_remote_by_url(&self, url: &str) -> RemotesResult<Option<RemoteAddress>> {
        let reference = RemoteAddress::from_url(url, DEFAULT_REMOTE_NAME)?;
        Ok(self
            .list_remotes()?
            .into_iter()
            .find(|remote| remote.same_endpoint(&reference)))
    }

    /// Returns false without running any mutation when `current_name` does
    /// not exist.
    pub fn rename_remote(&self, current_name: &str, new_name: &str) -> RemotesResult<bool> {
        if !self.has_remote(current_name)? {
            debug!("Cannot rename unknown remote {}", current_name);
            return Ok(false);
        }
        self.set_remote(RemoteAddress::from_name(new_name), current_name)
    }

    /// Embed `user` and `password` in the URL of the remote called `name`.
    ///
    /// Returns false without running any mutation when the remote does not
    /// exist.
    pub fn set_remote_credentials(
        &self,
        user: &str,
        password: &str,
        name: &str,
    ) -> RemotesResult<bool> {
        let mut remote = match self.get_remote(name)? {
            Some(remote) => remote,
            None => {
                debug!("Cannot set credentials of unknown remote {}", name);
                return Ok(false);
            }
        };

        remote.set_user(user);
        remote.set_password(password);
        self.set_remote(remote, name)
    }
}
