//! Database Connection Management
//!
//! Opens the vendor's keychain database strictly read-only.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use super::{fetch_accounts, AccountRecord, DbError, DbResult};

/// Where to find the vendor store and which keychain access group to read.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Path to the keychain-style SQLite database.
    pub db_path: PathBuf,
    /// Keychain access group the authenticator writes under.
    pub access_group: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            access_group: "group.com.duosecurity.duomobile".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into(),
            ..Default::default()
        }
    }
}

/// PlayCover's PlayChain store for Duo Mobile.
fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Library/Containers/io.playcover.PlayCover/PlayChain")
        .join("com.duosecurity.DuoMobile.db")
}

/// Read-only handle on the vendor's keychain database.
///
/// The store belongs to another application, so it is never created or
/// written; a missing file is reported as [`DbError::NotFound`].
pub struct KeychainDb {
    conn: Connection,
}

impl KeychainDb {
    pub fn open(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::NotFound(path.to_path_buf()));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Self { conn })
    }

    /// Extract all account records under an access group.
    pub fn accounts(&self, access_group: &str) -> DbResult<Vec<AccountRecord>> {
        fetch_accounts(&self.conn, access_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_database_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.db");
        match KeychainDb::open(&path) {
            Err(DbError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_open_existing_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE genp (agrp TEXT, v_Data BLOB);")
                .unwrap();
        }
        let config = ExtractorConfig::with_path(&path);
        let db = KeychainDb::open(&config.db_path).unwrap();
        assert!(db.accounts(&config.access_group).unwrap().is_empty());
    }

    #[test]
    fn test_default_config_points_at_playchain() {
        let config = ExtractorConfig::default();
        assert!(config
            .db_path
            .to_string_lossy()
            .contains("PlayChain"));
        assert_eq!(config.access_group, "group.com.duosecurity.duomobile");
    }
}
