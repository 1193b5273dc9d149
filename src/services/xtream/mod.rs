//! Xtream Codes Integration
//!
//! - **Credentials**: normalize the provider base URL and build Player API
//!   and playback URLs
//! - **Catalog**: categories, streams and EPG behind the [`XtreamCatalog`]
//!   trait, with a fixed [`MockCatalog`] in place of the live provider
//!
//! ```text
//! http://server:port/player_api.php?username=X&password=Y&action=get_live_categories
//! http://server:port/live/X/Y/1001.m3u8
//! ```

pub mod catalog;
pub mod credentials;
pub mod types;

pub use catalog::{MockCatalog, XtreamCatalog};
pub use credentials::{StreamKind, XtreamCredentials};
pub use types::StreamUrl;
