pub mod channel;
pub mod connection;
pub mod response;

pub use channel::*;
pub use connection::*;
pub use response::*;
