use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::json;
use std::env;
use std::path::PathBuf;
use std::process::exit;

use crate::common::error::RemotesError;
use crate::common::result::OptionExt;
use crate::domain::value_objects::remote_address::{RemoteAddress, DEFAULT_REMOTE_NAME};
use crate::infrastructure::git::repository_manager::{RepositoryManager, GIT_EXECUTABLE};

/// Exit code for a command that ran but reported failure or a negative answer
pub const EXIT_FALSE: i32 = 1;

/// Exit code for errors
pub const EXIT_ERROR: i32 = 2;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
}

/// git-remotes - Manage the remotes of a git repository
#[derive(Parser)]
#[command(name = "git-remotes")]
#[command(about = "Manage the remotes of a git repository")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Repository directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, env = "GIT_REMOTES_DIR")]
    pub directory: Option<PathBuf>,

    /// Git executable to run
    #[arg(long, global = true, env = "GIT_REMOTES_GIT", default_value = GIT_EXECUTABLE)]
    pub git: String,

    /// Output format (text, json)
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the directory if needed and initialize a repository in it
    Init,

    /// Exit successfully when the directory is a git repository
    IsRepo,

    /// List configured remotes
    List,

    /// Show one remote
    Get {
        /// Remote name
        #[arg(default_value = DEFAULT_REMOTE_NAME)]
        name: String,
    },

    /// Add a remote
    Add {
        /// Remote URL
        url: String,

        /// Remote name
        #[arg(default_value = DEFAULT_REMOTE_NAME)]
        name: String,
    },

    /// Set the URL of a remote, adding it when missing
    SetUrl {
        /// New URL
        url: String,

        /// Remote name
        #[arg(default_value = DEFAULT_REMOTE_NAME)]
        name: String,
    },

    /// Point the remote that uses one URL to another URL
    ChangeUrl {
        /// URL the remote currently uses
        original: String,

        /// URL to switch to
        updated: String,
    },

    /// Print the name of the remote pointing at a URL
    Find {
        /// URL to look for (credentials and port are ignored)
        url: String,
    },

    /// Rename a remote
    Rename {
        /// Current name
        current: String,

        /// New name
        new: String,
    },

    /// Embed credentials in the URL of a remote
    Credentials {
        /// User name
        user: String,

        /// Password or token
        #[arg(long, env = "GIT_REMOTES_PASSWORD", hide_env_values = true)]
        password: String,

        /// Remote name
        #[arg(default_value = DEFAULT_REMOTE_NAME)]
        name: String,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Run the selected command and exit with a non-zero code when it fails.
    pub fn run(self) -> Result<()> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.handle_command() {
            Ok(true) => Ok(()),
            Ok(false) => exit(EXIT_FALSE),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(EXIT_ERROR);
            }
        }
    }

    fn manager(&self) -> Result<RepositoryManager> {
        if self.cli.git.trim().is_empty() {
            return Err(RemotesError::config_error("git executable cannot be empty").into());
        }

        let location = match &self.cli.directory {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        Ok(RepositoryManager::new(location).with_git_executable(self.cli.git.as_str()))
    }

    /// Returns the command's own answer; `false` becomes a non-zero exit.
    pub fn handle_command(&self) -> Result<bool> {
        let manager = self.manager()?;

        match &self.cli.command {
            Commands::Init => {
                let initialized = manager.init()?;
                self.report("init", initialized, || {
                    format!("Initialized repository at {}", manager.location().display())
                })
            }
            Commands::IsRepo => {
                let is_repository = manager.is_repository()?;
                if self.cli.output == OutputFormat::Json {
                    self.print_json(&json!({ "repository": is_repository }))?;
                }
                Ok(is_repository)
            }
            Commands::List => self.handle_list_command(&manager),
            Commands::Get { name } => {
                let remote = manager.get_remote(name)?.ok_or_not_found(name.as_str())?;
                self.print_remote(&remote)?;
                Ok(true)
            }
            Commands::Add { url, name } => {
                let remote = RemoteAddress::from_url(url, name.as_str())?;
                let added = manager.add_remote(&remote)?;
                self.report("add", added, || format!("Added remote {}", remote))
            }
            Commands::SetUrl { url, name } => {
                let updated = manager.set_remote_url(url, name)?;
                self.report("set-url", updated, || format!("Updated remote {}", name))
            }
            Commands::ChangeUrl { original, updated } => {
                let changed = manager.change_remote_url(original, updated)?;
                self.report("change-url", changed, || {
                    "Changed remote URL".to_string()
                })
            }
            Commands::Find { url } => self.handle_find_command(&manager, url),
            Commands::Rename { current, new } => {
                let renamed = manager.rename_remote(current, new)?;
                self.report("rename", renamed, || {
                    format!("Renamed remote {} to {}", current, new)
                })
            }
            Commands::Credentials {
                user,
                password,
                name,
            } => {
                let updated = manager.set_remote_credentials(user, password, name)?;
                self.report("credentials", updated, || {
                    format!("Stored credentials for remote {}", name)
                })
            }
        }
    }

    fn handle_list_command(&self, manager: &RepositoryManager) -> Result<bool> {
        let remotes = manager.list_remotes()?;

        match self.cli.output {
            OutputFormat::Json => self.print_json(&remotes)?,
            OutputFormat::Text => {
                for remote in &remotes {
                    println!(
                        "{}\t{}",
                        remote.name().bold(),
                        remote.redacted_url().unwrap_or_default()
                    );
                }
            }
        }
        Ok(true)
    }

    fn handle_find_command(&self, manager: &RepositoryManager, url: &str) -> Result<bool> {
        let found = manager.find_remote_by_url(url)?;

        match (self.cli.output, &found) {
            (OutputFormat::Json, Some(remote)) => self.print_json(remote)?,
            (OutputFormat::Json, None) => self.print_json(&serde_json::Value::Null)?,
            (OutputFormat::Text, Some(remote)) => println!("{}", remote.name()),
            (OutputFormat::Text, None) => {
                eprintln!("{} No remote points at {}", "⚠".yellow().bold(), url)
            }
        }
        Ok(found.is_some())
    }

    fn print_remote(&self, remote: &RemoteAddress) -> Result<()> {
        match self.cli.output {
            OutputFormat::Json => self.print_json(remote),
            OutputFormat::Text => {
                println!("{}: {}", "name".bold(), remote.name());
                println!(
                    "{}: {}",
                    "url".bold(),
                    remote.redacted_url().unwrap_or_default()
                );
                if let Some(scheme) = remote.scheme() {
                    println!("{}: {}", "scheme".bold(), scheme);
                }
                if let Some(user) = remote.user() {
                    println!("{}: {}", "user".bold(), user);
                }
                if let Some(host) = remote.host() {
                    println!("{}: {}", "host".bold(), host);
                    println!("{}: {}", "port".bold(), remote.port());
                }
                if let Some(path) = remote.path() {
                    println!("{}: {}", "path".bold(), path);
                }
                Ok(())
            }
        }
    }

    /// Print the outcome of a mutating command.
    fn report(&self, command: &str, success: bool, message: impl FnOnce() -> String) -> Result<bool> {
        match self.cli.output {
            OutputFormat::Json => {
                self.print_json(&json!({ "command": command, "success": success }))?;
            }
            OutputFormat::Text if success => {
                println!("{} {}", "✓".green().bold(), message());
            }
            OutputFormat::Text => {
                eprintln!("{} {} failed", "✗".red().bold(), command);
            }
        }
        Ok(success)
    }

    fn print_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        println!("{}", json);
        Ok(())
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_origin() {
        let cli = Cli::try_parse_from(["git-remotes", "set-url", "https://github.com/a/b.git"])
            .unwrap();
        match cli.command {
            Commands::SetUrl { url, name } => {
                assert_eq!(url, "https://github.com/a/b.git");
                assert_eq!(name, "origin");
            }
            _ => panic!("expected set-url"),
        }
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "git-remotes",
            "list",
            "-C",
            "/work/repo",
            "--output",
            "json",
            "--git",
            "/opt/git/bin/git",
        ])
        .unwrap();
        assert_eq!(cli.directory, Some(PathBuf::from("/work/repo")));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.git, "/opt/git/bin/git");
    }

    #[test]
    fn test_credentials_password_flag() {
        let cli = Cli::try_parse_from([
            "git-remotes",
            "credentials",
            "alice",
            "--password",
            "s3cret",
            "upstream",
        ])
        .unwrap();
        match cli.command {
            Commands::Credentials {
                user,
                password,
                name,
            } => {
                assert_eq!(user, "alice");
                assert_eq!(password, "s3cret");
                assert_eq!(name, "upstream");
            }
            _ => panic!("expected credentials"),
        }
    }
}
