//! The recently viewed strip and its on-disk cache.
//!
//! Holds at most five distinct entries, most recent first. The cache is
//! best effort: read and write failures are logged and never surface.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use gimco_core::CatalogEntry;
use tracing::warn;

/// Maximum number of entries kept.
pub const RECENTLY_VIEWED_LIMIT: usize = 5;

/// Most recently viewed catalog entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentlyViewed {
    entries: VecDeque<CatalogEntry>,
}

impl RecentlyViewed {
    /// Build from a cached list, keeping the first occurrence of each id.
    #[must_use]
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut recent = Self::default();
        for entry in entries.into_iter().rev() {
            recent.record(entry);
        }
        recent
    }

    /// Move `entry` to the front, dropping any older copy and the overflow.
    pub fn record(&mut self, entry: CatalogEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push_front(entry);
        self.entries.truncate(RECENTLY_VIEWED_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_vec(&self) -> Vec<&CatalogEntry> {
        self.entries.iter().collect()
    }
}

/// JSON file backing the recently viewed strip.
#[derive(Debug, Clone)]
pub struct RecentlyViewedStore {
    path: PathBuf,
}

impl RecentlyViewedStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache. A missing or unreadable file yields an empty list.
    #[must_use]
    pub fn load(&self) -> RecentlyViewed {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return RecentlyViewed::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read recently viewed cache");
                return RecentlyViewed::default();
            }
        };

        match serde_json::from_str::<Vec<CatalogEntry>>(&raw) {
            Ok(entries) => RecentlyViewed::from_entries(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt recently viewed cache");
                RecentlyViewed::default()
            }
        }
    }

    /// Write the cache, logging any failure.
    pub fn save(&self, recent: &RecentlyViewed) {
        if let Err(e) = self.try_save(recent) {
            warn!(path = %self.path.display(), error = %e, "Failed to write recently viewed cache");
        }
    }

    fn try_save(&self, recent: &RecentlyViewed) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&recent.to_vec())?;
        std::fs::write(&self.path, json)
    }
}
