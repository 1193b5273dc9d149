//! In-memory channel collection
//!
//! Decoded playlists are appended here; ids handed out by the store never
//! repeat within the process, deletes included.

use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{
    ChannelPage, ChannelQuery, ChannelRecord, ChannelSort, NewChannel, DEFAULT_CATEGORY,
    DEFAULT_CREATED_COUNTRY, PLACEHOLDER_LOGO,
};

#[derive(Debug)]
struct StoreInner {
    channels: Vec<ChannelRecord>,
    next_id: u64,
}

impl StoreInner {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Shared handle to the channel list
#[derive(Debug, Clone)]
pub struct ChannelStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_channel(id: u64, name: &str, category: &str, country: &str) -> ChannelRecord {
    ChannelRecord {
        id,
        name: name.to_string(),
        url: format!("http://example.com/stream{}", id),
        category: category.to_string(),
        logo: PLACEHOLDER_LOGO.to_string(),
        country: country.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn compare_names(a: &ChannelRecord, b: &ChannelRecord) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

impl ChannelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_channels(Vec::new())
    }

    /// Create a store holding the three demo channels (ids 1 to 3)
    pub fn with_demo_channels() -> Self {
        Self::from_channels(vec![
            demo_channel(1, "Channel 12", "Israeli", "IL"),
            demo_channel(2, "CNN", "News", "US"),
            demo_channel(3, "National Geographic", "Documentary", "US"),
        ])
    }

    fn from_channels(channels: Vec<ChannelRecord>) -> Self {
        let next_id = channels.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(RwLock::new(StoreInner { channels, next_id })),
        }
    }

    /// Number of stored channels
    pub async fn len(&self) -> usize {
        self.inner.read().await.channels.len()
    }

    /// Filter, sort and paginate
    pub async fn list(&self, query: &ChannelQuery, max_limit: usize) -> ChannelPage {
        let inner = self.inner.read().await;

        let search = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let category = query.category.as_deref().filter(|c| !c.is_empty());
        let country = query.country.as_deref().filter(|c| !c.is_empty());

        let mut filtered: Vec<&ChannelRecord> = inner
            .channels
            .iter()
            .filter(|ch| match &search {
                Some(term) => ch.name.to_lowercase().contains(term.as_str()),
                None => true,
            })
            .filter(|ch| category.map_or(true, |c| ch.category == c))
            .filter(|ch| country.map_or(true, |c| ch.country == c))
            .collect();

        match query.sort() {
            Some(ChannelSort::NameAsc) => filtered.sort_by(|a, b| compare_names(a, b)),
            Some(ChannelSort::NameDesc) => filtered.sort_by(|a, b| compare_names(b, a)),
            Some(ChannelSort::Id) => filtered.sort_by_key(|ch| ch.id),
            None => {}
        }

        let page = query.page();
        let limit = query.limit(max_limit);
        let total = filtered.len();
        let start = (page - 1).saturating_mul(limit);

        let data: Vec<ChannelRecord> = filtered
            .into_iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        ChannelPage {
            success: true,
            count: data.len(),
            total,
            page,
            pages: total.div_ceil(limit),
            data,
        }
    }

    /// Find a channel by id
    pub async fn get(&self, id: u64) -> Option<ChannelRecord> {
        let inner = self.inner.read().await;
        inner.channels.iter().find(|ch| ch.id == id).cloned()
    }

    /// Add a channel built from a request body.
    /// Returns `None` when name or url is missing.
    pub async fn create(&self, new: NewChannel) -> Option<ChannelRecord> {
        let name = non_empty(new.name)?;
        let url = non_empty(new.url)?;

        let mut inner = self.inner.write().await;
        let channel = ChannelRecord {
            id: inner.allocate_id(),
            name,
            url,
            category: non_empty(new.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            logo: non_empty(new.logo).unwrap_or_else(|| PLACEHOLDER_LOGO.to_string()),
            country: non_empty(new.country)
                .unwrap_or_else(|| DEFAULT_CREATED_COUNTRY.to_string()),
        };
        inner.channels.push(channel.clone());

        Some(channel)
    }

    /// Remove a channel; false when it did not exist
    pub async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.channels.iter().position(|ch| ch.id == id) {
            Some(index) => {
                inner.channels.remove(index);
                true
            }
            None => false,
        }
    }

    /// Append decoded channels, replacing their per-decode ids with store ids.
    /// Returns the channels as stored.
    pub async fn append(&self, decoded: Vec<ChannelRecord>) -> Vec<ChannelRecord> {
        let mut inner = self.inner.write().await;
        let mut stored = Vec::with_capacity(decoded.len());

        for mut channel in decoded {
            channel.id = inner.allocate_id();
            stored.push(channel);
        }
        inner.channels.extend(stored.iter().cloned());

        stored
    }

    /// Distinct categories in first-seen order
    pub async fn categories(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        distinct(inner.channels.iter().map(|ch| ch.category.as_str()))
    }

    /// Distinct countries in first-seen order
    pub async fn countries(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        distinct(inner.channels.iter().map(|ch| ch.country.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
