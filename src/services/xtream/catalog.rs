//! Provider catalog
//!
//! [`XtreamCatalog`] is the seam between the routes and whatever answers the
//! Player API actions. [`MockCatalog`] serves a fixed data set and makes no
//! network calls.

use super::types::*;

/// Source of categories, streams and EPG for a connected provider
pub trait XtreamCatalog: Send + Sync {
    /// action=get_live_categories
    fn live_categories(&self) -> Vec<XtreamCategory>;

    /// action=get_live_streams (optionally &category_id=)
    fn live_streams(&self, category_id: Option<&str>) -> Vec<XtreamLiveStream>;

    /// action=get_vod_categories
    fn vod_categories(&self) -> Vec<XtreamCategory>;

    /// action=get_vod_streams (optionally &category_id=)
    fn vod_streams(&self, category_id: Option<&str>) -> Vec<XtreamVodStream>;

    /// action=get_series_categories
    fn series_categories(&self) -> Vec<XtreamCategory>;

    /// action=get_short_epg&stream_id=
    fn short_epg(&self, stream_id: &str) -> Vec<XtreamEpgEntry>;
}

/// Fixed catalog
#[derive(Debug, Default, Clone)]
pub struct MockCatalog;

fn matches_category(category: &Option<String>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(id) => category.as_deref() == Some(id),
        None => true,
    }
}

fn live_stream(num: i32, name: &str, stream_id: i64, icon: &str, epg: &str) -> XtreamLiveStream {
    XtreamLiveStream {
        num,
        name: name.to_string(),
        stream_type: "live".to_string(),
        stream_id,
        stream_icon: Some(icon.to_string()),
        epg_channel_id: Some(epg.to_string()),
        category_id: Some("2".to_string()),
        is_adult: Some("0".to_string()),
    }
}

fn epg_entry(id: &str, epg_id: &str, title: &str, start: &str, end: &str, description: &str, channel_id: &str) -> XtreamEpgEntry {
    XtreamEpgEntry {
        id: id.to_string(),
        epg_id: epg_id.to_string(),
        title: title.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        description: Some(description.to_string()),
        channel_id: channel_id.to_string(),
    }
}

impl XtreamCatalog for MockCatalog {
    fn live_categories(&self) -> Vec<XtreamCategory> {
        vec![
            XtreamCategory::new("1", "Sports"),
            XtreamCategory::new("2", "News"),
            XtreamCategory::new("3", "Movies"),
            XtreamCategory::new("4", "Kids"),
        ]
    }

    fn live_streams(&self, category_id: Option<&str>) -> Vec<XtreamLiveStream> {
        vec![
            live_stream(1, "CNN International", 1001, "http://example.com/logo.png", "cnn.int"),
            live_stream(2, "BBC News", 1002, "http://example.com/bbc.png", "bbc.news"),
        ]
        .into_iter()
        .filter(|s| matches_category(&s.category_id, category_id))
        .collect()
    }

    fn vod_categories(&self) -> Vec<XtreamCategory> {
        vec![
            XtreamCategory::new("10", "Action"),
            XtreamCategory::new("11", "Comedy"),
            XtreamCategory::new("12", "Drama"),
            XtreamCategory::new("13", "Horror"),
        ]
    }

    fn vod_streams(&self, category_id: Option<&str>) -> Vec<XtreamVodStream> {
        vec![XtreamVodStream {
            num: 1,
            name: "Sample Movie 2024".to_string(),
            stream_type: "movie".to_string(),
            stream_id: 5001,
            stream_icon: Some("http://example.com/movie1.jpg".to_string()),
            rating: Some("8.5".to_string()),
            category_id: Some("10".to_string()),
            container_extension: Some("mp4".to_string()),
        }]
        .into_iter()
        .filter(|s| matches_category(&s.category_id, category_id))
        .collect()
    }

    fn series_categories(&self) -> Vec<XtreamCategory> {
        vec![
            XtreamCategory::new("20", "Netflix"),
            XtreamCategory::new("21", "HBO"),
            XtreamCategory::new("22", "Disney+"),
        ]
    }

    fn short_epg(&self, stream_id: &str) -> Vec<XtreamEpgEntry> {
        vec![
            epg_entry(
                "1",
                "1001",
                "Morning News",
                "2024-11-09 06:00:00",
                "2024-11-09 08:00:00",
                "Daily morning news program",
                stream_id,
            ),
            epg_entry(
                "2",
                "1002",
                "Documentary Hour",
                "2024-11-09 08:00:00",
                "2024-11-09 09:00:00",
                "Nature documentary",
                stream_id,
            ),
        ]
    }
}
