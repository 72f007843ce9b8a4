//! # git-remotes - Git Remote Manager
//!
//! `git-remotes` inspects and edits the remotes of a local git repository by
//! driving the `git` executable. Remote addresses are handled as structured
//! values so single components (host, credentials, name) can be changed
//! without rewriting the whole URL by hand.
//!
//! ## Features
//!
//! - **Remote addresses**: Parse, render, merge and compare remote URLs,
//!   including scp-like `user@host:path` addresses and local paths
//! - **Repository management**: Initialize repositories, list, add, rename and
//!   re-point remotes, embed credentials
//! - **Command line**: The `git-remotes` binary exposes every operation with
//!   text or JSON output
//!
//! ## Architecture
//!
//! - [`domain`]: Remote addresses and the set of remotes of a repository
//! - [`infrastructure`]: The git driver, process execution and filesystem access
//! - [`presentation`]: CLI interface
//! - [`common`]: Shared error handling
//!
//! ## Error Handling
//!
//! - [`common::error::RemotesError`]: Main error type
//! - [`common::result::RemotesResult`]: Type alias for `Result<T, RemotesError>`
//!
//! Operations return `Ok(false)` when git ran but refused a change, and an
//! error when git could not be launched or an address could not be used.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use git_remotes::{RemoteAddress, RepositoryManager};
//!
//! # fn example() -> git_remotes::Result<()> {
//! let manager = RepositoryManager::new("/work/project");
//! if !manager.is_repository()? {
//!     manager.init()?;
//! }
//!
//! let origin = RemoteAddress::from_url("https://github.com/symfony/symfony.git", "origin")?;
//! manager.add_remote(&origin)?;
//! manager.set_remote_credentials("ci-bot", "token", "origin")?;
//!
//! for remote in &manager.list_remotes()? {
//!     println!("{}", remote);
//! }
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::RemotesError;
pub use crate::common::result::RemotesResult as Result;
pub use crate::domain::entities::remote_set::RemoteSet;
pub use crate::domain::value_objects::remote_address::{RemoteAddress, DEFAULT_REMOTE_NAME};
pub use crate::infrastructure::git::repository_manager::RepositoryManager;
