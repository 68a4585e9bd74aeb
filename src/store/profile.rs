use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use crate::error::{Result, SlotError};

/// A row of the profiles table
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Path of the persisted profile picture (None if never set or deleted)
    pub avatar_path: Option<String>,
    /// Unix timestamp of the last change
    pub updated_at: i64,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The ProfileStore manages the SQLite profile catalog.
/// It stores profile names and references to uploaded pictures.
pub struct ProfileStore {
    conn: Connection,
    db_path: PathBuf,
}

impl ProfileStore {
    /// Open (or create) the catalog in the user's data directory:
    /// - Linux: ~/.local/share/media-slot/profiles.db
    /// - macOS: ~/Library/Application Support/media-slot/profiles.db
    /// - Windows: %APPDATA%\media-slot\profiles.db
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_dir()?.join("profiles.db"))
    }

    /// Directory holding the catalog and the uploaded media
    pub fn default_dir() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SlotError::Store("could not determine user data directory".into()))?;
        path.push("media-slot");
        Ok(path)
    }

    /// Open (or create) a catalog at an explicit path
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SlotError::Store(format!("{}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(&db_path)?;
        log::debug!("📁 Profile catalog at {}", db_path.display());

        let store = ProfileStore { conn, db_path };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the profiles table if it doesn't exist
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name      TEXT NOT NULL,
                last_name       TEXT NOT NULL,
                avatar_path     TEXT,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Return the first profile, creating it with the given name if the
    /// catalog is empty
    pub fn ensure_profile(&self, first_name: &str, last_name: &str) -> Result<i64> {
        let existing: Option<i64> = self
            .conn
            .query_row("SELECT id FROM profiles ORDER BY id LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        self.conn.execute(
            "INSERT INTO profiles (first_name, last_name, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![first_name, last_name, chrono::Utc::now().timestamp()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn profile(&self, id: i64) -> Result<Option<Profile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT id, first_name, last_name, avatar_path, updated_at
                 FROM profiles WHERE id = ?1",
                [id],
                |row| {
                    Ok(Profile {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        avatar_path: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    pub fn update_name(&self, id: i64, first_name: &str, last_name: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE profiles SET first_name = ?1, last_name = ?2, updated_at = ?3 WHERE id = ?4",
            rusqlite::params![first_name, last_name, chrono::Utc::now().timestamp(), id],
        )?;
        if changed == 0 {
            return Err(SlotError::Store(format!("no profile with id {}", id)));
        }
        Ok(())
    }

    /// Point the profile at a new picture (or none), returning the previous one
    pub fn set_avatar(&self, id: i64, avatar_path: Option<&str>) -> Result<Option<String>> {
        let previous: Option<Option<String>> = self
            .conn
            .query_row("SELECT avatar_path FROM profiles WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(previous) = previous else {
            return Err(SlotError::Store(format!("no profile with id {}", id)));
        };

        self.conn.execute(
            "UPDATE profiles SET avatar_path = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![avatar_path, chrono::Utc::now().timestamp(), id],
        )?;
        Ok(previous)
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
