use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::error::AppError;

/// Upper bound on how long a single store call may stall the update loop.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// One recorded request. Read-only; only the store produces these.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: i64,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Method,
    Url,
    Status,
}

impl SortField {
    fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Method => "method",
            SortField::Url => "url",
            SortField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    fn keyword(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Response status classes the history view can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRange {
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl StatusRange {
    pub fn bounds(self) -> (u16, u16) {
        match self {
            StatusRange::Success => (200, 299),
            StatusRange::Redirect => (300, 399),
            StatusRange::ClientError => (400, 499),
            StatusRange::ServerError => (500, 599),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusRange::Success => "2xx",
            StatusRange::Redirect => "3xx",
            StatusRange::ClientError => "4xx",
            StatusRange::ServerError => "5xx",
        }
    }

    /// Cycle order used by the status filter key: off → 2xx → 3xx → 4xx →
    /// 5xx → off.
    pub fn next(current: Option<StatusRange>) -> Option<StatusRange> {
        match current {
            None => Some(StatusRange::Success),
            Some(StatusRange::Success) => Some(StatusRange::Redirect),
            Some(StatusRange::Redirect) => Some(StatusRange::ClientError),
            Some(StatusRange::ClientError) => Some(StatusRange::ServerError),
            Some(StatusRange::ServerError) => None,
        }
    }
}

/// Query parameters every store operation understands. The free-text term
/// is not part of this struct — it selects between `list` and `search`.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub limit: usize,
    pub sort: SortField,
    pub dir: SortDir,
    pub method: Option<String>,
    pub status_range: Option<StatusRange>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: 200,
            sort: SortField::default(),
            dir: SortDir::default(),
            method: None,
            status_range: None,
        }
    }
}

/// Read interface the sidebar depends on. Listing and free-text search are
/// the only operations it ever issues; recording happens on the app side.
pub trait HistoryStore {
    fn list(&self, opts: &QueryOptions) -> Result<Vec<HistoryEntry>, AppError>;
    fn search(&self, text: &str, opts: &QueryOptions) -> Result<Vec<HistoryEntry>, AppError>;
}

/// SQLite-backed history store.
pub struct SqliteHistoryStore {
    conn: Connection,
}

impl SqliteHistoryStore {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        // WAL keeps readers unblocked while a write is in flight.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::configure(conn)
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self, AppError> {
        // Bounds the worst-case stall of any query against a busy database.
        conn.busy_timeout(QUERY_TIMEOUT)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS request_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                method TEXT NOT NULL,
                url TEXT NOT NULL,
                status INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_request_history_created_at
                ON request_history(created_at);",
        )?;
        Ok(Self { conn })
    }

    /// Append one completed request. Returns the new entry's ID.
    pub fn record(
        &self,
        method: &str,
        url: &str,
        status: u16,
        at: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        self.conn.execute(
            "INSERT INTO request_history (method, url, status, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![method, url, status, at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn query(
        &self,
        text: Option<&str>,
        opts: &QueryOptions,
    ) -> Result<Vec<HistoryEntry>, AppError> {
        let mut sql = String::from(
            "SELECT id, method, url, status, created_at FROM request_history WHERE 1=1",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(method) = &opts.method {
            sql.push_str(" AND method = ?");
            params.push(Box::new(method.clone()));
        }
        if let Some(range) = opts.status_range {
            let (lo, hi) = range.bounds();
            sql.push_str(" AND status BETWEEN ? AND ?");
            params.push(Box::new(lo));
            params.push(Box::new(hi));
        }
        if let Some(text) = text {
            sql.push_str(" AND (url LIKE ? OR method LIKE ?)");
            let pattern = format!("%{text}%");
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(opts.sort.column());
        sql.push(' ');
        sql.push_str(opts.dir.keyword());
        sql.push_str(" LIMIT ?");
        params.push(Box::new(opts.limit as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            |row| {
                let created: String = row.get(4)?;
                Ok(HistoryEntry {
                    id: row.get(0)?,
                    method: row.get(1)?,
                    url: row.get(2)?,
                    status: row.get::<_, i64>(3)? as u16,
                    created_at: created
                        .parse::<DateTime<Utc>>()
                        .unwrap_or_else(|_| DateTime::<Utc>::MIN_UTC),
                })
            },
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(AppError::from)
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn list(&self, opts: &QueryOptions) -> Result<Vec<HistoryEntry>, AppError> {
        self.query(None, opts)
    }

    fn search(&self, text: &str, opts: &QueryOptions) -> Result<Vec<HistoryEntry>, AppError> {
        self.query(Some(text), opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store_with_entries() -> SqliteHistoryStore {
        let store = SqliteHistoryStore::open_in_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        store.record("GET", "https://api.example.com/users", 200, base).unwrap();
        store
            .record("POST", "https://api.example.com/users", 201, base + chrono::Duration::seconds(1))
            .unwrap();
        store
            .record("GET", "https://api.example.com/orders", 404, base + chrono::Duration::seconds(2))
            .unwrap();
        store
    }

    #[test]
    fn test_list_newest_first() {
        let store = store_with_entries();
        let entries = store.list(&QueryOptions::default()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].url, "https://api.example.com/orders");
        assert_eq!(entries[2].method, "GET");
    }

    #[test]
    fn test_list_respects_limit_and_direction() {
        let store = store_with_entries();
        let opts = QueryOptions { limit: 1, dir: SortDir::Asc, ..QueryOptions::default() };
        let entries = store.list(&opts).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://api.example.com/users");
        assert_eq!(entries[0].status, 200);
    }

    #[test]
    fn test_method_filter() {
        let store = store_with_entries();
        let opts = QueryOptions { method: Some("POST".into()), ..QueryOptions::default() };
        let entries = store.list(&opts).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, 201);
    }

    #[test]
    fn test_status_range_filter() {
        let store = store_with_entries();
        let opts = QueryOptions {
            status_range: Some(StatusRange::ClientError),
            ..QueryOptions::default()
        };
        let entries = store.list(&opts).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://api.example.com/orders");
    }

    #[test]
    fn test_search_matches_url_substring() {
        let store = store_with_entries();
        let entries = store.search("orders", &QueryOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, 404);
    }

    #[test]
    fn test_search_combines_with_filters() {
        let store = store_with_entries();
        let opts = QueryOptions { method: Some("GET".into()), ..QueryOptions::default() };
        let entries = store.search("users", &opts).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, 200);
    }

    #[test]
    fn test_sort_by_other_fields() {
        let store = store_with_entries();
        let by_status = QueryOptions { sort: SortField::Status, dir: SortDir::Asc, ..QueryOptions::default() };
        let entries = store.list(&by_status).unwrap();
        let statuses: Vec<u16> = entries.iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![200, 201, 404]);

        let by_url = QueryOptions { sort: SortField::Url, dir: SortDir::Asc, ..QueryOptions::default() };
        let entries = store.list(&by_url).unwrap();
        assert_eq!(entries[0].url, "https://api.example.com/orders");

        let by_method = QueryOptions { sort: SortField::Method, dir: SortDir::Desc, ..QueryOptions::default() };
        let entries = store.list(&by_method).unwrap();
        assert_eq!(entries[0].method, "POST");
    }

    #[test]
    fn test_status_cycle_wraps() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = StatusRange::next(current);
            if let Some(range) = current {
                seen.push(range.label());
            }
        }
        assert_eq!(seen, vec!["2xx", "3xx", "4xx", "5xx"]);
        assert_eq!(current, None);
    }
}
