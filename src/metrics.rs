//! Prometheus metrics exposed on /metrics

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_gauge, IntCounter, IntGauge};

lazy_static! {
    pub static ref PLAYLIST_IMPORTS: IntCounter = register_int_counter!(
        "iptv_playlist_imports_total",
        "Number of M3U playlists imported"
    )
    .unwrap();
    pub static ref CHANNELS_IMPORTED: IntCounter = register_int_counter!(
        "iptv_channels_imported_total",
        "Number of channels added from imported playlists"
    )
    .unwrap();
    pub static ref ACTIVE_CONNECTIONS: IntGauge = register_int_gauge!(
        "iptv_active_connections",
        "Provider connections currently held in memory"
    )
    .unwrap();
}
