//! Rate snapshot cache
//!
//! SQLite-based cache for rate and currency-index snapshots with TTL.

use super::{IndexTable, RateTable};
use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default TTL for cached snapshots (24 hours)
const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Snapshot cache for rate tables and the currency index
pub struct RateCache {
    conn: Connection,
    ttl: Duration,
}

impl RateCache {
    /// Create a new cache with the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Create an in-memory cache (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS rates (
                source TEXT NOT NULL,
                target TEXT NOT NULL,
                rate REAL NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (source, target)
            )",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS currency_index (
                code TEXT PRIMARY KEY,
                idx INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        })
    }

    /// Set custom TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn min_time(&self) -> i64 {
        Self::now() - self.ttl.as_secs() as i64
    }

    /// Get the cached rate table for a source currency.
    ///
    /// Returns `None` when no fresh snapshot exists; stale rows never leak
    /// into a returned table.
    pub fn get_rates(&self, source_currency: &str) -> Result<Option<RateTable>> {
        let mut stmt = self
            .conn
            .prepare("SELECT target, rate FROM rates WHERE source = ? AND created_at > ?")?;
        let rows = stmt.query_map(params![source_currency, self.min_time()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut table = RateTable::new();
        for row in rows {
            let (target, rate) = row?;
            table.insert(target, rate);
        }

        if table.is_empty() {
            Ok(None)
        } else {
            Ok(Some(table))
        }
    }

    /// Store a rate table snapshot, replacing any previous one for the source
    pub fn put_rates(&self, source_currency: &str, rates: &RateTable) -> Result<()> {
        let now = Self::now();

        self.conn
            .execute("DELETE FROM rates WHERE source = ?", params![source_currency])?;
        for (target, rate) in rates {
            self.conn.execute(
                "INSERT OR REPLACE INTO rates (source, target, rate, created_at)
                 VALUES (?, ?, ?, ?)",
                params![source_currency, target, rate, now],
            )?;
        }

        Ok(())
    }

    /// Get the cached currency index, `None` when missing or stale
    pub fn get_index(&self) -> Result<Option<IndexTable>> {
        let mut stmt = self
            .conn
            .prepare("SELECT code, idx FROM currency_index WHERE created_at > ?")?;
        let rows = stmt.query_map(params![self.min_time()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut table = IndexTable::new();
        for row in rows {
            let (code, idx) = row?;
            table.insert(code, idx);
        }

        if table.is_empty() {
            Ok(None)
        } else {
            Ok(Some(table))
        }
    }

    /// Store a currency index snapshot, replacing the previous one
    pub fn put_index(&self, index: &IndexTable) -> Result<()> {
        let now = Self::now();

        self.conn.execute("DELETE FROM currency_index", [])?;
        for (code, idx) in index {
            self.conn.execute(
                "INSERT OR REPLACE INTO currency_index (code, idx, created_at)
                 VALUES (?, ?, ?)",
                params![code, idx, now],
            )?;
        }

        Ok(())
    }

    /// Remove expired rows from both tables
    pub fn cleanup(&self) -> Result<usize> {
        let min_time = self.min_time();

        let rates = self
            .conn
            .execute("DELETE FROM rates WHERE created_at <= ?", params![min_time])?;
        let index = self.conn.execute(
            "DELETE FROM currency_index WHERE created_at <= ?",
            params![min_time],
        )?;

        Ok(rates + index)
    }

    /// Number of cached rate rows
    pub fn size(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM rates", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
