use super::store::{HistoryEntry, HistoryStore, QueryOptions};

/// Bridge between the sidebar and the history store.
///
/// Owns the last good result set. Store calls are bounded by the
/// connection's busy timeout, so the worst-case stall of the update loop is
/// fixed. A failed call keeps the previous entries and flips `stale`
/// instead of surfacing an error row; the failure itself goes to the log.
#[derive(Debug, Default)]
pub struct HistoryQuery {
    entries: Vec<HistoryEntry>,
    stale: bool,
}

impl HistoryQuery {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries reflect an older query than the filters now say they should.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Issue one synchronous query. A non-empty `text` goes through the
    /// store's search operation, otherwise the plain listing is used.
    pub fn refresh(&mut self, store: &dyn HistoryStore, text: &str, opts: &QueryOptions) {
        let result = if text.is_empty() {
            store.list(opts)
        } else {
            store.search(text, opts)
        };
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.stale = false;
            }
            Err(err) => {
                log::warn!(
                    "history query failed, keeping {} previous entries: {err}",
                    self.entries.len()
                );
                self.stale = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::history::store::SqliteHistoryStore;
    use chrono::Utc;

    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn list(&self, _opts: &QueryOptions) -> Result<Vec<HistoryEntry>, AppError> {
            Err(AppError::Other("store unavailable".into()))
        }

        fn search(&self, _text: &str, _opts: &QueryOptions) -> Result<Vec<HistoryEntry>, AppError> {
            Err(AppError::Other("store unavailable".into()))
        }
    }

    fn seeded_store() -> SqliteHistoryStore {
        let store = SqliteHistoryStore::open_in_memory().unwrap();
        store.record("GET", "https://example.com/a", 200, Utc::now()).unwrap();
        store.record("GET", "https://example.com/b", 500, Utc::now()).unwrap();
        store
    }

    #[test]
    fn test_refresh_replaces_entries() {
        let store = seeded_store();
        let mut query = HistoryQuery::default();
        query.refresh(&store, "", &QueryOptions::default());
        assert_eq!(query.len(), 2);
        assert!(!query.is_stale());
    }

    #[test]
    fn test_search_text_selects_search_operation() {
        let store = seeded_store();
        let mut query = HistoryQuery::default();
        query.refresh(&store, "/a", &QueryOptions::default());
        assert_eq!(query.len(), 1);
        assert_eq!(query.entries()[0].url, "https://example.com/a");
    }

    #[test]
    fn test_failure_keeps_previous_entries() {
        let store = seeded_store();
        let mut query = HistoryQuery::default();
        query.refresh(&store, "", &QueryOptions::default());
        assert_eq!(query.len(), 2);

        query.refresh(&FailingStore, "", &QueryOptions::default());
        assert_eq!(query.len(), 2);
        assert!(query.is_stale());

        // A later successful query clears the stale flag again.
        query.refresh(&store, "", &QueryOptions::default());
        assert!(!query.is_stale());
    }

    #[test]
    fn test_failure_with_no_previous_entries() {
        let mut query = HistoryQuery::default();
        query.refresh(&FailingStore, "", &QueryOptions::default());
        assert!(query.is_empty());
        assert!(query.is_stale());
    }
}
