use std::io;
use std::path::Path;

/// The filesystem queries the repository manager needs
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create_directory(&self, path: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
