mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::Transaction;

pub(crate) use schema::{KEY_MONTHLY_BUDGET, KEY_TRANSACTIONS};

/// Persisted ledger contents plus any problems found while reading them.
#[derive(Debug, Default)]
pub(crate) struct Loaded {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) monthly_budget: Decimal,
    pub(crate) warnings: Vec<String>,
}

/// Key-value store backed by a single SQLite table. Values are JSON text.
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Store migration failed")?;
        log::debug!("store opened at {}", path.display());
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Runs raw SQL against the store, for tests that need to break it.
    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw keys ──────────────────────────────────────────────

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    pub(crate) fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Ledger state ──────────────────────────────────────────

    /// Reads both ledger keys. Missing keys fall back to defaults; unreadable
    /// ones fall back too and are reported in `warnings`.
    pub(crate) fn load(&self) -> Result<Loaded> {
        let mut loaded = Loaded::default();

        if let Some(raw) = self.get(KEY_TRANSACTIONS)? {
            match serde_json::from_str::<Vec<Transaction>>(&raw) {
                Ok(txns) => loaded.transactions = txns,
                Err(e) => {
                    log::warn!("discarding unreadable '{KEY_TRANSACTIONS}' value: {e}");
                    loaded
                        .warnings
                        .push(format!("Stored transactions were unreadable and have been reset ({e})"));
                }
            }
        }

        if let Some(raw) = self.get(KEY_MONTHLY_BUDGET)? {
            match parse_budget(&raw) {
                Some(budget) => loaded.monthly_budget = budget,
                None => {
                    log::warn!("discarding unreadable '{KEY_MONTHLY_BUDGET}' value: {raw:?}");
                    loaded
                        .warnings
                        .push(format!("Stored budget '{raw}' was unreadable and has been reset"));
                }
            }
        }

        log::info!(
            "loaded {} transactions, budget {}",
            loaded.transactions.len(),
            loaded.monthly_budget
        );
        Ok(loaded)
    }

    pub(crate) fn save_transactions(&self, txns: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(txns).context("Failed to encode transactions")?;
        self.set(KEY_TRANSACTIONS, &json)
            .context("Failed to save transactions")
    }

    pub(crate) fn save_monthly_budget(&self, budget: Decimal) -> Result<()> {
        self.set(KEY_MONTHLY_BUDGET, &budget.normalize().to_string())
            .context("Failed to save monthly budget")
    }
}

/// Accepts a bare decimal (`5000`, `5000.5`) or a JSON string holding one (`"5000"`).
fn parse_budget(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    Decimal::from_str(unquoted)
        .or_else(|_| Decimal::from_scientific(unquoted))
        .ok()
        .filter(|b| *b >= Decimal::ZERO)
}
