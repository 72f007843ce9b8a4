use crate::common::error::RemotesError;

/// Result type used throughout the crate
///
/// # Examples
///
/// ```
/// use git_remotes::common::result::RemotesResult;
/// use git_remotes::common::error::RemotesError;
///
/// fn example_function() -> RemotesResult<String> {
///     Ok("origin".to_string())
/// }
///
/// fn example_with_error() -> RemotesResult<()> {
///     Err(RemotesError::remote_not_found("upstream"))
/// }
/// ```
pub type RemotesResult<T> = Result<T, RemotesError>;

/// Conversions from lookup misses to errors
pub trait OptionExt<T> {
    /// Turn `None` into [`RemotesError::RemoteNotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use git_remotes::common::result::{OptionExt, RemotesResult};
    ///
    /// let missing: Option<String> = None;
    /// let result: RemotesResult<String> = missing.ok_or_not_found("upstream");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_not_found(self, name: impl Into<String>) -> RemotesResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, name: impl Into<String>) -> RemotesResult<T> {
        self.ok_or_else(|| RemotesError::remote_not_found(name))
    }
}

/// Conversions from foreign errors
pub trait ResultExt<T, E> {
    /// Wrap an I/O failure with a message and the path involved.
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> RemotesResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> RemotesResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| RemotesError::filesystem_error_with_source(message, path, e.into()))
    }
}
