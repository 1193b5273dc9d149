pub mod channel_store;
pub mod cleanup;
pub mod connections;
pub mod m3u_parser;
pub mod xtream;
