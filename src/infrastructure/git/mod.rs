pub mod remote_update;
pub mod repository_manager;

pub use remote_update::{RemoteStep, RemoteUpdate, StepResult};
pub use repository_manager::{parse_remote_listing, RepositoryManager};
