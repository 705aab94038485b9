//! Blob repository contract and SQLite implementation.
//!
//! # Invariants
//! - Storage keys are validated before any backend access.
//! - One key maps to exactly one row/file; writes are whole-blob replaces.

use crate::db::DbError;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for blob persistence operations.
#[derive(Debug)]
pub enum RepoError {
    InvalidKey(String),
    /// Stored bytes exist but are not a UTF-8 text blob.
    MalformedBlob { key: String, detail: String },
    Db(DbError),
    Io(std::io::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(
                f,
                "invalid storage key `{key}`; expected [A-Za-z0-9_-]+"
            ),
            Self::MalformedBlob { key, detail } => {
                write!(f, "stored blob `{key}` is not text: {detail}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "blob io error: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey(_) | Self::MalformedBlob { .. } => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Load/save capability for one serialized blob per key.
///
/// `load` reports unreadable stored bytes as [`RepoError::MalformedBlob`]
/// and keeps other errors for genuine backend failures.
pub trait BlobRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>>;
    fn save(&mut self, key: &str, blob: &str) -> RepoResult<()>;
}

impl<R: BlobRepository + ?Sized> BlobRepository for &mut R {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, blob: &str) -> RepoResult<()> {
        (**self).save(key, blob)
    }
}

/// Validates a storage key; keys double as file names in the file backend.
pub fn validate_storage_key(key: &str) -> RepoResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepoError::InvalidKey(key.to_string()))
    }
}

/// Converts raw stored bytes into a text blob.
pub(crate) fn blob_from_bytes(key: &str, bytes: Vec<u8>) -> RepoResult<String> {
    String::from_utf8(bytes).map_err(|err| RepoError::MalformedBlob {
        key: key.to_string(),
        detail: err.to_string(),
    })
}

/// SQLite-backed blob repository over the `kv_blobs` table.
pub struct SqliteBlobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BlobRepository for SqliteBlobRepository<'_> {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        validate_storage_key(key)?;
        // Read raw bytes: the column may hold a BLOB or invalid UTF-8.
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv_blobs WHERE storage_key = ?1;",
                [key],
                |row| {
                    Ok(match row.get_ref(0)? {
                        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(bytes.to_vec()),
                        ValueRef::Null | ValueRef::Integer(_) | ValueRef::Real(_) => None,
                    })
                },
            )
            .optional()?;
        match payload {
            None => Ok(None),
            Some(Some(bytes)) => blob_from_bytes(key, bytes).map(Some),
            Some(None) => Err(RepoError::MalformedBlob {
                key: key.to_string(),
                detail: "payload is not a text or blob value".to_string(),
            }),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> RepoResult<()> {
        validate_storage_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_blobs (storage_key, payload)
             VALUES (?1, ?2)
             ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, blob],
        )?;
        Ok(())
    }
}
