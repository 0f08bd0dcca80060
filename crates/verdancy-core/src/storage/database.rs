//! SQLite-backed plant storage.
//!
//! One row per plant; the tracked dimensions travel as a JSON column
//! since the engine always reads and writes them as a unit. The
//! `revision` column carries the optimistic-concurrency check: `save`
//! updates `WHERE id = ? AND revision = ?`, so a writer holding a stale
//! revision touches zero rows and gets a conflict instead of silently
//! double-applying decay.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{data_dir, PlantStore};
use crate::error::StoreError;
use crate::plant::Plant;

/// SQLite database for plant records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/verdancy/verdancy.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?
            .join("verdancy.db");
        Self::open_at(path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let conn = Connection::open(&path).map_err(|source| StoreError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS plants (
                id          TEXT PRIMARY KEY,
                revision    INTEGER NOT NULL,
                owner       TEXT NOT NULL,
                nickname    TEXT NOT NULL,
                species_id  TEXT NOT NULL,
                location    TEXT NOT NULL,
                container   TEXT NOT NULL,
                condition   TEXT NOT NULL,
                dimensions  TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_plants_owner ON plants(owner);
            CREATE INDEX IF NOT EXISTS idx_plants_condition ON plants(condition);",
        )?;
        Ok(())
    }

    fn row_to_plant(row: &rusqlite::Row<'_>) -> Result<Plant, StoreError> {
        let id: String = row.get(0).map_err(StoreError::from)?;
        let revision: u64 = row.get(1).map_err(StoreError::from)?;
        let owner: String = row.get(2).map_err(StoreError::from)?;
        let nickname: String = row.get(3).map_err(StoreError::from)?;
        let species_id: String = row.get(4).map_err(StoreError::from)?;
        let location: String = row.get(5).map_err(StoreError::from)?;
        let container: String = row.get(6).map_err(StoreError::from)?;
        let condition: String = row.get(7).map_err(StoreError::from)?;
        let dimensions: String = row.get(8).map_err(StoreError::from)?;
        let created_at: String = row.get(9).map_err(StoreError::from)?;

        Ok(Plant {
            id: Uuid::parse_str(&id).map_err(|e| StoreError::QueryFailed(e.to_string()))?,
            owner,
            nickname,
            species_id,
            location: location.parse().map_err(StoreError::QueryFailed)?,
            container: container.parse().map_err(StoreError::QueryFailed)?,
            condition: condition.parse().map_err(StoreError::QueryFailed)?,
            dimensions: serde_json::from_str(&dimensions)
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?,
            revision,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?
                .with_timezone(&Utc),
        })
    }

    fn exists(&self, plant_id: Uuid) -> Result<bool, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM plants WHERE id = ?1")
            .map_err(StoreError::from)?;
        stmt.exists(params![plant_id.to_string()])
            .map_err(StoreError::from)
    }
}

impl PlantStore for Database {
    fn load(&self, plant_id: Uuid) -> Result<Plant, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, revision, owner, nickname, species_id, location, container,
                        condition, dimensions, created_at
                 FROM plants WHERE id = ?1",
            )
            .map_err(StoreError::from)?;
        let mut rows = stmt
            .query(params![plant_id.to_string()])
            .map_err(StoreError::from)?;
        match rows.next().map_err(StoreError::from)? {
            Some(row) => Self::row_to_plant(row),
            None => Err(StoreError::NotFound { plant_id }),
        }
    }

    fn insert(&self, plant: &Plant) -> Result<(), StoreError> {
        let dimensions = serde_json::to_string(&plant.dimensions)
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO plants (id, revision, owner, nickname, species_id, location,
                                     container, condition, dimensions, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    plant.id.to_string(),
                    plant.revision,
                    plant.owner,
                    plant.nickname,
                    plant.species_id,
                    plant.location.as_str(),
                    plant.container.as_str(),
                    plant.condition.as_str(),
                    dimensions,
                    plant.created_at.to_rfc3339(),
                ],
            )
            .map_err(StoreError::from)?;
        Ok(())
    }

    fn save(&self, plant: &Plant) -> Result<Plant, StoreError> {
        let dimensions = serde_json::to_string(&plant.dimensions)
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        let changed = self
            .conn
            .execute(
                "UPDATE plants
                 SET revision = ?1, owner = ?2, nickname = ?3, species_id = ?4,
                     location = ?5, container = ?6, condition = ?7, dimensions = ?8
                 WHERE id = ?9 AND revision = ?10",
                params![
                    plant.revision + 1,
                    plant.owner,
                    plant.nickname,
                    plant.species_id,
                    plant.location.as_str(),
                    plant.container.as_str(),
                    plant.condition.as_str(),
                    dimensions,
                    plant.id.to_string(),
                    plant.revision,
                ],
            )
            .map_err(StoreError::from)?;

        if changed == 0 {
            return if self.exists(plant.id)? {
                Err(StoreError::Conflict {
                    plant_id: plant.id,
                    revision: plant.revision,
                })
            } else {
                Err(StoreError::NotFound { plant_id: plant.id })
            };
        }

        let mut committed = plant.clone();
        committed.revision = plant.revision + 1;
        Ok(committed)
    }

    fn list_ids(&self) -> Result<Vec<Uuid>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM plants ORDER BY created_at, id")
            .map_err(StoreError::from)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(StoreError::from)?;

        let mut ids = Vec::new();
        for row in rows {
            let id = row.map_err(StoreError::from)?;
            ids.push(Uuid::parse_str(&id).map_err(|e| StoreError::QueryFailed(e.to_string()))?);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::{catalog, ClassificationPolicy, ContainerSize, Location, ResourceKind};
    use chrono::TimeZone;

    fn sample_plant() -> Plant {
        Plant::adopt(
            "user-1",
            "Franklin",
            catalog::find("fern").unwrap(),
            Location::Balcony,
            ContainerSize::Large,
            &ClassificationPolicy::default(),
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn insert_and_load_roundtrip() {
        let db = Database::open_memory().unwrap();
        let plant = sample_plant();
        db.insert(&plant).unwrap();

        let loaded = db.load(plant.id).unwrap();
        assert_eq!(loaded, plant);
    }

    #[test]
    fn load_missing_plant_is_not_found() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.load(Uuid::new_v4()),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn save_bumps_revision() {
        let db = Database::open_memory().unwrap();
        let mut plant = sample_plant();
        db.insert(&plant).unwrap();

        plant
            .dimensions
            .iter_mut()
            .find(|d| d.kind == ResourceKind::Water)
            .unwrap()
            .level_pct = 72;
        let committed = db.save(&plant).unwrap();
        assert_eq!(committed.revision, 1);

        let loaded = db.load(plant.id).unwrap();
        assert_eq!(loaded.revision, 1);
        assert_eq!(loaded.dimension(ResourceKind::Water).unwrap().level_pct, 72);
    }

    #[test]
    fn stale_save_conflicts() {
        let db = Database::open_memory().unwrap();
        let plant = sample_plant();
        db.insert(&plant).unwrap();

        // Two readers take the same snapshot.
        let first = db.load(plant.id).unwrap();
        let second = db.load(plant.id).unwrap();

        db.save(&first).unwrap();
        // The second writer still holds revision 0 and must be rejected.
        let err = db.save(&second).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { revision: 0, .. }));

        // Exactly one committed write.
        assert_eq!(db.load(plant.id).unwrap().revision, 1);
    }

    #[test]
    fn save_missing_plant_is_not_found() {
        let db = Database::open_memory().unwrap();
        let plant = sample_plant();
        assert!(matches!(
            db.save(&plant),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn list_ids_oldest_first() {
        let db = Database::open_memory().unwrap();
        let older = sample_plant();
        let mut newer = sample_plant();
        newer.created_at = older.created_at + chrono::Duration::days(1);
        db.insert(&newer).unwrap();
        db.insert(&older).unwrap();

        let ids = db.list_ids().unwrap();
        assert_eq!(ids, vec![older.id, newer.id]);
    }

    #[test]
    fn reopen_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verdancy.db");
        let plant = sample_plant();
        {
            let db = Database::open_at(&path).unwrap();
            db.insert(&plant).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load(plant.id).unwrap(), plant);
    }
}
