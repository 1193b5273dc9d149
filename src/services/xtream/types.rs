//! Xtream Codes API Types
//!
//! Shapes of the Player API v2 responses served by the catalog.

use serde::{Deserialize, Serialize};

// ============================================================================
// Category Types
// ============================================================================

/// Category for live, VOD, or series
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct XtreamCategory {
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub parent_id: i32,
}

impl XtreamCategory {
    pub fn new(category_id: &str, category_name: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            category_name: category_name.to_string(),
            parent_id: 0,
        }
    }
}

// ============================================================================
// Stream Types
// ============================================================================

/// Live stream (channel) information
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct XtreamLiveStream {
    pub num: i32,
    pub name: String,
    pub stream_type: String,
    pub stream_id: i64,
    #[serde(default)]
    pub stream_icon: Option<String>,
    #[serde(default)]
    pub epg_channel_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub is_adult: Option<String>,
}

/// VOD (movie) stream information
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct XtreamVodStream {
    pub num: i32,
    pub name: String,
    pub stream_type: String,
    pub stream_id: i64,
    #[serde(default)]
    pub stream_icon: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub container_extension: Option<String>,
}

// ============================================================================
// EPG Types
// ============================================================================

/// Short EPG entry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct XtreamEpgEntry {
    pub id: String,
    pub epg_id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub description: Option<String>,
    pub channel_id: String,
}

/// Playback URL handed to the client
#[derive(Debug, Serialize, Clone)]
pub struct StreamUrl {
    pub stream_id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}
