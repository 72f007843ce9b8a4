pub mod remote_address;

pub use remote_address::{
    RemoteAddress, RemoteAddressError, RemoteParts, DEFAULT_PORT, DEFAULT_REMOTE_NAME,
};
