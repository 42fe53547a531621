//! SQLite Store
//!
//! Embedded database holding accounts, sessions and the `user_responses`
//! collection. Response answers are kept as JSON documents so a record reads
//! back exactly as it was written.
//!
//! Thread-safe via a `std::sync::Mutex` around the connection (rusqlite
//! connections are `Send` but not `Sync`).

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::assessment::CategoryScores;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{ResponseRecord, Session, StoreStats, User, UserCredentials};

/// Configuration for the store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for all data
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub database_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("mindu_data"),
            database_file: "mindu.db".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Get path to the database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        username TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at INTEGER NOT NULL,
        expires_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_expiry ON sessions(expires_at);

    CREATE TABLE IF NOT EXISTS user_responses (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        answers TEXT NOT NULL,
        timestamp INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_responses_user ON user_responses(user_id, timestamp);
";

/// The Mindu store
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Create or open the on-disk store
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let path = config.database_path();

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        let store = Self::init(conn, Some(path))?;
        tracing::info!("Opened store at {:?}", store.path);
        Ok(store)
    }

    /// Create a throwaway in-memory store
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the database file (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    /// Cheap round-trip used by the readiness probe
    pub fn ping(&self) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn stats(&self) -> StorageResult<StoreStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> StorageResult<u64> {
            let n: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n as u64)
        };

        Ok(StoreStats {
            users: count("users")?,
            sessions: count("sessions")?,
            responses: count("user_responses")?,
        })
    }

    // ============================================
    // Users
    // ============================================

    /// Insert a new account. Emails are stored lower-cased and must be unique.
    pub fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> StorageResult<User> {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: normalize_email(email),
            username: username.trim().to_string(),
            created_at: Utc::now().timestamp_millis(),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (id, email, username, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![user.id, user.email, user.username, password_hash, user.created_at],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                StorageError::Duplicate(user.email.clone())
            }
            other => StorageError::Database(other),
        })?;

        tracing::info!(user_id = %user.id, "new user created");
        Ok(user)
    }

    /// Look up an account and its password hash by email
    pub fn find_credentials(&self, email: &str) -> StorageResult<Option<UserCredentials>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, email, username, created_at, password_hash
                 FROM users WHERE email = ?",
                params![normalize_email(email)],
                |row| {
                    Ok(UserCredentials {
                        user: User {
                            id: row.get(0)?,
                            email: row.get(1)?,
                            username: row.get(2)?,
                            created_at: row.get(3)?,
                        },
                        password_hash: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(row)
    }

    pub fn find_user_by_id(&self, id: &str) -> StorageResult<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, username, created_at FROM users WHERE id = ?",
                params![id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        username: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    // ============================================
    // Sessions
    // ============================================

    /// Issue a new session token for a user
    pub fn create_session(
        &self,
        user_id: &str,
        ttl: chrono::Duration,
        now_ms: i64,
    ) -> StorageResult<Session> {
        let session = Session {
            token: format!(
                "{}{}",
                uuid::Uuid::new_v4().simple(),
                uuid::Uuid::new_v4().simple()
            ),
            user_id: user_id.to_string(),
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl.num_milliseconds()),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
            params![
                session.token,
                session.user_id,
                session.created_at,
                session.expires_at
            ],
        )?;

        Ok(session)
    }

    /// Resolve a token to its user. Expired or unknown tokens yield `None`.
    pub fn find_session_user(&self, token: &str, now_ms: i64) -> StorageResult<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT u.id, u.email, u.username, u.created_at
                 FROM sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token = ? AND s.expires_at > ?",
                params![token, now_ms],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        username: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete_session(&self, token: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM sessions WHERE token = ?", params![token])?;
        Ok(removed > 0)
    }

    /// Drop every session that expired at or before `now_ms`
    pub fn purge_expired_sessions(&self, now_ms: i64) -> StorageResult<usize> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?",
            params![now_ms],
        )?;
        if removed > 0 {
            tracing::debug!(removed, "purged expired sessions");
        }
        Ok(removed)
    }

    // ============================================
    // Responses
    // ============================================

    /// Store a completed assessment stamped with the current time
    pub fn save_response(
        &self,
        user_id: &str,
        answers: CategoryScores,
    ) -> StorageResult<ResponseRecord> {
        self.save_response_at(user_id, answers, Utc::now().timestamp_millis())
    }

    /// Store a completed assessment with an explicit timestamp (ms)
    pub fn save_response_at(
        &self,
        user_id: &str,
        answers: CategoryScores,
        timestamp: i64,
    ) -> StorageResult<ResponseRecord> {
        let record = ResponseRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            answers,
            timestamp,
        };
        let document = serde_json::to_string(&record.answers)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user_responses (id, user_id, answers, timestamp) VALUES (?, ?, ?, ?)",
            params![record.id, record.user_id, document, record.timestamp],
        )?;

        tracing::info!(user_id = %user_id, response_id = %record.id, "responses stored");
        Ok(record)
    }

    /// All assessments of one user, oldest first
    pub fn user_responses(&self, user_id: &str) -> StorageResult<Vec<ResponseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, user_id, answers, timestamp FROM user_responses
             WHERE user_id = ?
             ORDER BY timestamp ASC, rowid ASC",
        )?;

        let rows = stmt.query_map(params![user_id], read_response_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(decode_response(row?)?);
        }
        Ok(records)
    }

    /// One assessment, only if it belongs to `user_id`
    pub fn get_response(&self, user_id: &str, id: &str) -> StorageResult<Option<ResponseRecord>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, user_id, answers, timestamp FROM user_responses
                 WHERE id = ? AND user_id = ?",
                params![id, user_id],
                read_response_row,
            )
            .optional()?;

        row.map(decode_response).transpose()
    }
}

type RawResponseRow = (String, String, String, i64);

fn read_response_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawResponseRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode_response((id, user_id, answers, timestamp): RawResponseRow) -> StorageResult<ResponseRecord> {
    Ok(ResponseRecord {
        id,
        user_id,
        answers: serde_json::from_str(&answers)?,
        timestamp,
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
