pub mod remote_set;

pub use remote_set::RemoteSet;
