use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub node_env: String,

    // Channels
    pub max_m3u_size_mb: usize,
    pub max_items_page: usize,
    pub seed_demo_channels: bool,

    // Auth
    pub token_ttl_seconds: u64,
    pub cleanup_interval_secs: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env_or("PORT", 5000),
            node_env: env::var("NODE_ENV").unwrap_or_else(|_| "development".to_string()),

            // Channels
            max_m3u_size_mb: env_or("MAX_M3U_SIZE_MB", 50),
            max_items_page: env_or("MAX_ITEMS_PAGE", 100),
            seed_demo_channels: env::var("SEED_DEMO_CHANNELS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),

            // Auth
            token_ttl_seconds: env_or("TOKEN_TTL_SECONDS", 30 * 24 * 3600), // 30 days
            cleanup_interval_secs: env_or("CLEANUP_INTERVAL_SECS", 3600),
        }
    }

    /// Largest accepted playlist, in bytes
    pub fn max_m3u_bytes(&self) -> usize {
        self.max_m3u_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            node_env: "development".to_string(),
            max_m3u_size_mb: 50,
            max_items_page: 100,
            seed_demo_channels: true,
            token_ttl_seconds: 30 * 24 * 3600,
            cleanup_interval_secs: 3600,
        }
    }
}
