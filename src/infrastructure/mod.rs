/// Infrastructure layer modules
///
/// Concrete implementations for everything outside the process:
/// - Git remote management through the git executable
/// - Process execution
/// - File system access
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use filesystem::{Filesystem, LocalFilesystem};
pub use git::{RemoteUpdate, RepositoryManager};
pub use process::{CommandRunner, RunnerConfig, SystemCommandRunner};
