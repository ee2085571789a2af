//! Mock visitor analytics kept in a browser-scoped key/value store
//!
//! Three keys are used: `visitorCount` and `downloadCount` hold decimal
//! integers, `sectionViews` holds a JSON object of section id to count.

use std::collections::{BTreeMap, HashMap};

use crate::error::{FolioError, Result};

pub const VISITOR_KEY: &str = "visitorCount";
pub const DOWNLOAD_KEY: &str = "downloadCount";
pub const SECTION_VIEWS_KEY: &str = "sectionViews";
/// Session-scoped flag marking a visit as already counted
pub const SESSION_VISITED_KEY: &str = "visited";

/// Sections shown on the dashboard, in display order
pub const TRACKED_SECTIONS: &[&str] =
    &["home", "about", "skills", "projects", "achievements", "contact"];

/// Fraction of a section that must be on screen to count as a view
pub const SECTION_VIEW_THRESHOLD: f64 = 0.5;

/// String key/value persistence, e.g. `localStorage`
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and non-browser hosts
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One row of the section-views chart
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBar {
    pub id: String,
    pub label: String,
    pub count: u64,
    /// Share of the busiest section, 0 to 100
    pub percent: f64,
}

/// Everything the dashboard overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub visitors: u64,
    pub downloads: u64,
    pub bars: Vec<SectionBar>,
}

pub struct Analytics<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Analytics<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Seed any missing key with its zero value
    pub fn ensure_initialized(&mut self) -> Result<()> {
        for (key, zero) in [(VISITOR_KEY, "0"), (DOWNLOAD_KEY, "0"), (SECTION_VIEWS_KEY, "{}")] {
            if self.store.get(key)?.is_none() {
                self.store.set(key, zero)?;
            }
        }
        Ok(())
    }

    /// Count a visit; only the first page load of a session counts
    pub fn record_visit(&mut self, first_in_session: bool) -> Result<u64> {
        if first_in_session {
            self.increment(VISITOR_KEY)
        } else {
            self.counter(VISITOR_KEY)
        }
    }

    pub fn record_download(&mut self) -> Result<u64> {
        self.increment(DOWNLOAD_KEY)
    }

    /// Bump the view count for a section. Sections without an id are ignored.
    pub fn record_section_view(&mut self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Ok(());
        }
        let mut views = self.section_views()?;
        *views.entry(id.to_string()).or_insert(0) += 1;

        let json = serde_json::to_string(&views).map_err(|source| FolioError::CorruptRecord {
            key: SECTION_VIEWS_KEY.to_string(),
            source,
        })?;
        self.store.set(SECTION_VIEWS_KEY, &json)
    }

    pub fn section_views(&self) -> Result<BTreeMap<String, u64>> {
        match self.store.get(SECTION_VIEWS_KEY)? {
            None => Ok(BTreeMap::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| FolioError::CorruptRecord {
                key: SECTION_VIEWS_KEY.to_string(),
                source,
            }),
        }
    }

    pub fn dashboard(&self) -> Result<DashboardSnapshot> {
        let views = self.section_views()?;
        let max = views.values().copied().max().unwrap_or(0);

        let bars = TRACKED_SECTIONS
            .iter()
            .filter_map(|&id| {
                let count = *views.get(id)?;
                let percent = if max > 0 {
                    count as f64 / max as f64 * 100.0
                } else {
                    0.0
                };
                Some(SectionBar {
                    id: id.to_string(),
                    label: capitalize(id),
                    count,
                    percent,
                })
            })
            .collect();

        Ok(DashboardSnapshot {
            visitors: self.counter(VISITOR_KEY)?,
            downloads: self.counter(DOWNLOAD_KEY)?,
            bars,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn counter(&self, key: &str) -> Result<u64> {
        let raw = self.store.get(key)?;
        Ok(match raw.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(text) => text.parse::<u64>().unwrap_or_else(|_| {
                log::warn!("{} holds non-numeric value {:?}, treating as 0", key, text);
                0
            }),
        })
    }

    fn increment(&mut self, key: &str) -> Result<u64> {
        let next = self.counter(key)? + 1;
        self.store.set(key, &next.to_string())?;
        Ok(next)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analytics() -> Analytics<MemoryStore> {
        let mut analytics = Analytics::new(MemoryStore::new());
        analytics.ensure_initialized().unwrap();
        analytics
    }

    #[test]
    fn test_initialization_seeds_zero_values() {
        let analytics = analytics();
        let store = analytics.store();
        assert_eq!(store.get(VISITOR_KEY).unwrap().as_deref(), Some("0"));
        assert_eq!(store.get(DOWNLOAD_KEY).unwrap().as_deref(), Some("0"));
        assert_eq!(store.get(SECTION_VIEWS_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_initialization_keeps_existing_values() {
        let mut store = MemoryStore::new();
        store.set(VISITOR_KEY, "12").unwrap();
        let mut analytics = Analytics::new(store);
        analytics.ensure_initialized().unwrap();
        assert_eq!(analytics.dashboard().unwrap().visitors, 12);
    }

    #[test]
    fn test_visits_count_once_per_session() {
        let mut analytics = analytics();
        assert_eq!(analytics.record_visit(true).unwrap(), 1);
        assert_eq!(analytics.record_visit(false).unwrap(), 1);
        assert_eq!(analytics.record_visit(true).unwrap(), 2);
    }

    #[test]
    fn test_downloads_increment() {
        let mut analytics = analytics();
        analytics.record_download().unwrap();
        analytics.record_download().unwrap();
        assert_eq!(analytics.dashboard().unwrap().downloads, 2);
        assert_eq!(analytics.store().get(DOWNLOAD_KEY).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_section_views_persist_as_json() {
        let mut analytics = analytics();
        analytics.record_section_view("about").unwrap();
        analytics.record_section_view("about").unwrap();
        analytics.record_section_view("home").unwrap();
        analytics.record_section_view("").unwrap();

        let raw = analytics.store().get(SECTION_VIEWS_KEY).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["about"], 2);
        assert_eq!(parsed["home"], 1);
        assert!(parsed.get("").is_none());
    }

    #[test]
    fn test_dashboard_bars() {
        let mut analytics = analytics();
        for _ in 0..4 {
            analytics.record_section_view("projects").unwrap();
        }
        analytics.record_section_view("home").unwrap();
        analytics.record_section_view("footer").unwrap();

        let snapshot = analytics.dashboard().unwrap();
        let ids: Vec<_> = snapshot.bars.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "projects"]);

        let projects = &snapshot.bars[1];
        assert_eq!(projects.label, "Projects");
        assert_eq!(projects.count, 4);
        assert_eq!(projects.percent, 100.0);
        assert_eq!(snapshot.bars[0].percent, 25.0);
    }

    #[test]
    fn test_garbage_counter_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.set(VISITOR_KEY, "lots").unwrap();
        let mut analytics = Analytics::new(store);
        assert_eq!(analytics.record_visit(true).unwrap(), 1);
    }

    #[test]
    fn test_corrupt_section_views_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(SECTION_VIEWS_KEY, "[not an object").unwrap();
        let mut analytics = Analytics::new(store);
        assert!(matches!(
            analytics.record_section_view("home"),
            Err(FolioError::CorruptRecord { .. })
        ));
    }
}
