use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use super::data::Proposal;
use super::store::PersistenceStore;
use crate::error::StoreError;

/// The Library manages the SQLite proposal catalog.
/// Each row holds one proposal as JSON plus its position in the dashboard.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the catalog inside `data_dir`.
    ///
    /// With the default data directory the file lives in:
    /// - Linux: ~/.local/share/docuarq-studio/studio.db
    /// - macOS: ~/Library/Application Support/docuarq-studio/studio.db
    /// - Windows: %APPDATA%\docuarq-studio\studio.db
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        Self::open(data_dir.join("studio.db"))
    }

    /// Open (or create) the catalog at an explicit path
    pub fn open(db_path: PathBuf) -> Result<Self, StoreError> {
        let conn = Connection::open(&db_path)?;

        tracing::info!("📁 Catalog opened at {}", db_path.display());

        let library = Library { conn, db_path };
        library.init_schema()?;

        Ok(library)
    }

    /// Create all tables and indexes if they don't exist
    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS proposals (
                id              TEXT PRIMARY KEY,
                position        INTEGER NOT NULL,
                record_json     TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_proposals_position
             ON proposals(position)",
            [],
        )?;

        Ok(())
    }
}

impl PersistenceStore for Library {
    fn load(&self) -> Result<Vec<Proposal>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT record_json FROM proposals ORDER BY position ASC")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut proposals = Vec::new();
        for row in rows {
            proposals.push(serde_json::from_str(&row?)?);
        }

        Ok(proposals)
    }

    fn save(&mut self, proposals: &[Proposal]) -> Result<(), StoreError> {
        // The whole sequence is rewritten so order and deletions round-trip
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM proposals", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO proposals (id, position, record_json, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, proposal) in proposals.iter().enumerate() {
                insert.execute(params![
                    proposal.id,
                    position as i64,
                    serde_json::to_string(proposal)?,
                    proposal.updated_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("💾 Saved {} proposals", proposals.len());
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{GalleryImage, ProposalDraft};
    use chrono::{TimeZone, Utc};

    fn proposal(id: &str, title: &str) -> Proposal {
        ProposalDraft {
            id: Some(id.into()),
            client_name: "Residencia Valdés".into(),
            project_title: title.into(),
            description: "Hormigón visto y madera de teca.".into(),
            before_image: "/media/before.jpg".into(),
            after_image: "/media/after.jpg".into(),
            gallery_images: vec![GalleryImage::new("/media/g1.jpg")],
            ..ProposalDraft::new()
        }
        .finalize(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        .unwrap()
    }

    #[test]
    fn test_empty_catalog_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::new(dir.path()).unwrap();

        assert!(library.load().unwrap().is_empty());
        assert!(dir.path().join("studio.db").exists());
    }

    #[test]
    fn test_save_and_reopen_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let saved = vec![proposal("2", "Ático"), proposal("1", "Loft")];

        {
            let mut library = Library::new(dir.path()).unwrap();
            library.save(&saved).unwrap();
        }

        let library = Library::new(dir.path()).unwrap();
        assert_eq!(library.load().unwrap(), saved);
    }

    #[test]
    fn test_save_replaces_previous_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::new(dir.path()).unwrap();

        library
            .save(&[proposal("1", "Loft"), proposal("2", "Ático")])
            .unwrap();
        library.save(&[proposal("2", "Ático renovado")]).unwrap();

        let loaded = library.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].project_title, "Ático renovado");
    }
}
