//! # Relational Store adapter
//!
//! All persistence goes through [`Store`], a thin handle on the SQLite database
//! file. Every operation opens its own connection, so concurrent requests are
//! isolated by SQLite itself; there is no in-process cache or lock.
//!
//! Rows are parsed strictly on the way out (see `testimonials::from_row`): an
//! unknown enum string or an out-of-range score fails the read instead of
//! reaching the trust score or the verification rules.
//!
//! Status changes are single conditional `UPDATE` statements matching both the
//! record and its expected current status. The affected-row count tells the
//! caller whether the pre-state still held.

mod invites;
mod settings;
mod testimonials;

pub use testimonials::StatusExtras;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row};
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS testimonials (
    id                  TEXT PRIMARY KEY,
    owner_id            TEXT NOT NULL,
    client_name         TEXT NOT NULL,
    client_company      TEXT NOT NULL DEFAULT '',
    client_email        TEXT,
    text                TEXT NOT NULL DEFAULT '',
    video_ref           TEXT,
    avatar_ref          TEXT,
    verification_method TEXT NOT NULL CHECK (verification_method IN ('manual', 'email', 'linkedin')),
    status              TEXT NOT NULL CHECK (status IN ('pending', 'pending_verification', 'verified', 'rejected')),
    score               INTEGER CHECK (score BETWEEN 0 AND 100),
    sentiment           TEXT,
    keywords            TEXT NOT NULL DEFAULT '[]',
    analysis_reasoning  TEXT,
    score_estimated     INTEGER NOT NULL DEFAULT 0,
    card_style          TEXT NOT NULL DEFAULT 'white',
    origin              TEXT NOT NULL,
    created_at          TEXT NOT NULL,
    verified_at         TEXT,
    verification_token  TEXT UNIQUE,
    token_expires_at    TEXT
);
CREATE INDEX IF NOT EXISTS testimonials_owner ON testimonials (owner_id, created_at);

CREATE TABLE IF NOT EXISTS profiles (
    owner_id     TEXT PRIMARY KEY,
    handle       TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS views (
    owner_id  TEXT NOT NULL,
    viewed_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS views_owner ON views (owner_id);

CREATE TABLE IF NOT EXISTS widget_configs (
    owner_id TEXT PRIMARY KEY,
    config   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS form_configs (
    owner_id TEXT PRIMARY KEY,
    config   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS team_invites (
    id         TEXT PRIMARY KEY,
    owner_id   TEXT NOT NULL,
    email      TEXT NOT NULL,
    role       TEXT NOT NULL,
    token      TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);
";

/// Handle on the TrustGrid SQLite database.
#[derive(Clone, Debug)]
pub struct Store {
    path: Arc<PathBuf>,
}

impl Store {
    /// Opens (creating if needed) the database at `path` and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        let store = Self {
            path: Arc::new(path.as_ref().to_path_buf()),
        };
        let conn = store.connect()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(self.path.as_path())?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

/// True when `err` is a UNIQUE or CHECK constraint failure.
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(
    idx: usize,
    err: impl StdError + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Reads a text column and parses it with `FromStr`.
fn parse_column<T>(row: &Row, idx: usize) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| conversion_error(idx, e))
}

fn parse_optional_column<T>(row: &Row, idx: usize) -> Result<Option<T>, rusqlite::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|v| v.parse::<T>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn parse_timestamp(row: &Row, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn parse_optional_timestamp(
    row: &Row,
    idx: usize,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|v| {
        DateTime::parse_from_rfc3339(&v)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| conversion_error(idx, e))
    })
    .transpose()
}
