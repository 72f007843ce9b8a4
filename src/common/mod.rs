pub mod error;
pub mod result;

pub use error::RemotesError;
pub use result::{OptionExt, RemotesResult, ResultExt};
