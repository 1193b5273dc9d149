//! Extended-M3U playlist decoder
//!
//! Turns raw playlist text into [`ChannelRecord`]s. Decoding is lenient: a
//! malformed entry is skipped, never reported, so a single bad line cannot
//! reject a whole playlist.
//!
//! ```text
//! #EXTM3U
//! #EXTINF:-1 tvg-logo="http://x/l.png" group-title="News",BBC World
//! http://example.com/bbc.m3u8
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{ChannelRecord, DEFAULT_CATEGORY, UNKNOWN_CHANNEL_NAME, UNKNOWN_COUNTRY};

const EXTINF_PREFIX: &str = "#EXTINF:";

lazy_static! {
    /// duration, attribute run up to the last comma, display name
    static ref EXTINF_REGEX: Regex = Regex::new(r"^#EXTINF:(-?[0-9]+)\s*(.*),\s*(.*)$").unwrap();

    static ref LOGO_REGEX: Regex = Regex::new(r#"tvg-logo="([^"]*)""#).unwrap();
    static ref GROUP_REGEX: Regex = Regex::new(r#"group-title="([^"]*)""#).unwrap();
    static ref COUNTRY_REGEX: Regex = Regex::new(r#"tvg-country="([^"]*)""#).unwrap();
}

/// Metadata collected from an `#EXTINF` line, waiting for its URL
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingChannel {
    name: String,
    logo: String,
    category: String,
    country: String,
}

impl PendingChannel {
    fn finish(self, id: u64, url: &str) -> ChannelRecord {
        ChannelRecord {
            id,
            name: self.name,
            url: url.to_string(),
            category: self.category,
            logo: self.logo,
            country: self.country,
        }
    }
}

/// Classification of one trimmed playlist line
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Metadata(PendingChannel),
    /// Blank, comment, or an `#EXTINF` line that does not parse
    Ignored,
    Url(&'a str),
}

/// Trim whitespace and byte-order marks from both ends
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Ignored;
    }

    if line.starts_with(EXTINF_PREFIX) {
        return match parse_extinf(line) {
            Some(pending) => LineKind::Metadata(pending),
            None => LineKind::Ignored,
        };
    }

    if line.starts_with('#') {
        return LineKind::Ignored;
    }

    LineKind::Url(line)
}

fn capture_attr(regex: &Regex, attributes: &str) -> Option<String> {
    regex
        .captures(attributes)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse an EXTINF line
/// Format: #EXTINF:duration tvg-logo="..." group-title="..." tvg-country="...",Title
fn parse_extinf(line: &str) -> Option<PendingChannel> {
    let caps = EXTINF_REGEX.captures(line)?;

    let attributes = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    let name = caps
        .get(3)
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_CHANNEL_NAME);

    Some(PendingChannel {
        name: name.to_string(),
        logo: capture_attr(&LOGO_REGEX, attributes).unwrap_or_default(),
        category: capture_attr(&GROUP_REGEX, attributes)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        country: capture_attr(&COUNTRY_REGEX, attributes)
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
    })
}

/// Decode playlist text into channels, in the order their URLs appear.
///
/// Ids count up from 1 and are only unique within this call.
pub fn decode(text: &str) -> Vec<ChannelRecord> {
    let mut channels = Vec::new();
    let mut pending: Option<PendingChannel> = None;
    let mut next_id = 1u64;

    for line in text.split('\n') {
        match classify(trim_line(line)) {
            LineKind::Metadata(meta) => pending = Some(meta),
            LineKind::Ignored => {}
            LineKind::Url(url) => {
                // A URL without metadata in front of it is dropped
                if let Some(meta) = pending.take().filter(|m| !m.name.is_empty()) {
                    channels.push(meta.finish(next_id, url));
                    next_id += 1;
                }
            }
        }
    }

    if let Some(meta) = pending {
        tracing::debug!(name = %meta.name, "playlist ended before stream URL");
    }

    channels
}
