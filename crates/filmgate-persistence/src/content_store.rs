//! Content registry storage.

use std::collections::HashMap;
use std::path::PathBuf;

use filmgate_models::ContentItem;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::Result;

/// File name of the registry snapshot under the state directory.
const CONTENT_FILE: &str = "content.json";

/// Durable mapping from content code to content item.
///
/// The whole registry lives in one JSON snapshot keyed by normalized code.
/// Each write replaces the snapshot atomically; the feed ingestor is the
/// only writer, and readers may run concurrently with it. Pure storage:
/// membership policy never reaches this type.
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    /// Creates a store rooted at the given state directory.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: state_dir.into().join(CONTENT_FILE),
        }
    }

    fn load_map(&self) -> Result<HashMap<String, ContentItem>> {
        Ok(read_json_optional(&self.path)?.unwrap_or_default())
    }

    /// Registers an item, fully replacing any record under the same code.
    ///
    /// Last write wins; there is no merge with the previous record.
    pub fn upsert(&self, item: ContentItem) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(item.code.clone(), item);
        atomic_write_json(&self.path, &map)
    }

    /// Looks up an item by code. The code is normalized before lookup.
    pub fn get(&self, code: &str) -> Result<Option<ContentItem>> {
        let map = self.load_map()?;
        Ok(map.get(&code.to_lowercase()).cloned())
    }

    /// Returns the most recently registered items, newest first, bounded
    /// to `limit` entries. Used only for the browsing view.
    pub fn list(&self, limit: usize) -> Result<Vec<ContentItem>> {
        let mut items: Vec<ContentItem> = self.load_map()?.into_values().collect();
        items.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        items.truncate(limit);
        Ok(items)
    }

    /// Number of registered items.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load_map()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use filmgate_models::ContentKind;
    use tempfile::tempdir;

    fn item(code: &str) -> ContentItem {
        ContentItem::new(code, format!("BAAD-{code}"), ContentKind::Video, code, code)
    }

    #[test]
    fn test_upsert_then_get() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        store.upsert(item("film042")).unwrap();

        let loaded = store.get("film042").unwrap().unwrap();
        assert_eq!(loaded.code, "film042");
        assert_eq!(loaded.handle, "BAAD-film042");
    }

    #[test]
    fn test_get_normalizes_case() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        store.upsert(item("film7")).unwrap();
        assert!(store.get("FILM7").unwrap().is_some());
    }

    #[test]
    fn test_get_missing_code() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        assert!(store.get("film999").unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces_whole_record() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        store
            .upsert(ContentItem::new(
                "film1",
                "old-handle",
                ContentKind::Video,
                "Old title",
                "Old caption",
            ))
            .unwrap();
        store
            .upsert(ContentItem::new(
                "film1",
                "new-handle",
                ContentKind::Document,
                "New title",
                "New caption",
            ))
            .unwrap();

        let loaded = store.get("film1").unwrap().unwrap();
        assert_eq!(loaded.handle, "new-handle");
        assert_eq!(loaded.kind, ContentKind::Document);
        assert_eq!(loaded.title, "New title");
        assert_eq!(loaded.caption, "New caption");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_list_newest_first_bounded() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        for i in 0..15i64 {
            let mut it = item(&format!("film{i}"));
            // Spread registration times so the ordering is unambiguous.
            it.registered_at = it.registered_at + Duration::seconds(i);
            store.upsert(it).unwrap();
        }

        let listed = store.list(10).unwrap();
        assert_eq!(listed.len(), 10);
        assert_eq!(listed[0].code, "film14");
        assert_eq!(listed[9].code, "film5");
        for pair in listed.windows(2) {
            assert!(pair[0].registered_at >= pair[1].registered_at);
        }
    }

    #[test]
    fn test_list_on_empty_store() {
        let dir = tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        assert!(store.list(10).unwrap().is_empty());
    }
}
