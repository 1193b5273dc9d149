use serde::{Deserialize, Serialize};

/// Name used when an `#EXTINF` line carries no display name
pub const UNKNOWN_CHANNEL_NAME: &str = "Unknown Channel";
/// Category used when no `group-title` attribute is present
pub const DEFAULT_CATEGORY: &str = "General";
/// Country used when no `tvg-country` attribute is present
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Placeholder logo for channels created by hand
pub const PLACEHOLDER_LOGO: &str = "https://via.placeholder.com/150";
/// Country assigned to channels created by hand without one
pub const DEFAULT_CREATED_COUNTRY: &str = "IL";

/// Single channel (decoded from a playlist or created through the API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub category: String,
    pub logo: String,
    pub country: String,
}

/// Request body for POST /api/channels
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChannel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Request body for POST /api/channels/import-m3u
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub m3u_content: Option<String>,
}

/// Sort order accepted by the channel listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSort {
    NameAsc,
    NameDesc,
    Id,
}

impl ChannelSort {
    /// Parse the `sort` query value; unknown keys mean "keep insertion order"
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::NameAsc),
            "-name" => Some(Self::NameDesc),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

/// Query parameters for GET /api/channels
///
/// `page` and `limit` are kept as raw strings so that garbage values fall
/// back to their defaults instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChannelQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

impl ChannelQuery {
    /// Requested page, 1-based
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or_else(default_page)
    }

    /// Requested page size, capped at `max`
    pub fn limit(&self, max: usize) -> usize {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<usize>().ok())
            .filter(|l| *l > 0)
            .unwrap_or_else(default_limit)
            .min(max.max(1))
    }

    pub fn sort(&self) -> Option<ChannelSort> {
        self.sort.as_deref().and_then(ChannelSort::parse)
    }
}

/// One page of the channel listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPage {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub data: Vec<ChannelRecord>,
}

/// Response for POST /api/channels/import-m3u
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<ChannelRecord>,
}
