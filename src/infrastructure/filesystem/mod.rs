pub mod local;

pub use local::{Filesystem, LocalFilesystem};
