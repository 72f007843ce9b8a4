/// Presentation layer modules
///
/// The `git-remotes` command-line interface.
pub mod cli;
