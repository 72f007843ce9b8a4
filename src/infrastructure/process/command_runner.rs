use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Command runner errors
#[derive(Debug, Error)]
pub enum CommandRunnerError {
    #[error("Failed to launch '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with exit code {}: {stderr}", display_code(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

fn display_code(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// Configuration shared by every command a runner launches
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Environment variables set for each process
    pub environment_variables: BTreeMap<String, String>,

    /// Whether to inherit the parent process environment
    pub inherit_environment: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let mut environment_variables = BTreeMap::new();
        // Output is parsed, so it must not be localized.
        environment_variables.insert("LC_ALL".to_string(), "C".to_string());
        environment_variables.insert("GIT_TERMINAL_PROMPT".to_string(), "0".to_string());

        Self {
            environment_variables,
            inherit_environment: true,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add environment variable
    pub fn with_environment_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(key.into(), value.into());
        self
    }

    /// Set whether to inherit parent environment
    pub fn with_inherit_environment(mut self, inherit: bool) -> Self {
        self.inherit_environment = inherit;
        self
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,

    pub stdout: String,

    pub stderr: String,

    /// Whether the command exited with code 0
    pub success: bool,
}

impl CommandOutput {
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: exit_code == Some(0),
        }
    }

    /// A zero exit with the given standard output
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self::new(Some(0), stdout, "")
    }

    /// A non-zero exit with the given standard error
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(Some(exit_code), "", stderr)
    }
}

/// Runs external programs to completion.
///
/// Implementations block until the process exits. A process that cannot be
/// launched is an error; a process that exits non-zero is not, unless
/// [`CommandRunner::run_checked`] is used.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` with `args` inside `working_dir`.
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandRunnerError>;

    /// Like [`CommandRunner::run`], but a non-zero exit is an error.
    fn run_checked(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandRunnerError> {
        let output = self.run(program, args, working_dir)?;
        if output.success {
            Ok(output)
        } else {
            Err(CommandRunnerError::CommandFailed {
                command: format!("{} {}", program, args.join(" ")),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    config: RunnerConfig,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandRunnerError> {
        let start_time = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(working_dir);

        if !self.config.inherit_environment {
            cmd.env_clear();
        }
        for (key, value) in &self.config.environment_variables {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().map_err(|source| CommandRunnerError::SpawnFailed {
            program: program.to_string(),
            source,
        })?;

        let result = CommandOutput::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        // Arguments are left out: they can carry credentials.
        debug!(
            "{} ({} args) in {} exited with {:?} after {}ms",
            program,
            args.len(),
            working_dir.display(),
            result.exit_code,
            start_time.elapsed().as_millis()
        );

        Ok(result)
    }
}
