//! SQLite-backed implementation of the field-duty draft store.
//!
//! Uniqueness of `(tujuan, keterangan_tugas, alamat)` is enforced by the
//! table constraint; a violating insert or update surfaces as
//! `PresensiError::Conflict` and leaves the stored row untouched.

use std::sync::Arc;

use async_trait::async_trait;
use presensi_core::FieldDutyDraftRepository;
use presensi_domain::{
    DraftId, FieldDutyDraft, PresensiError, Result as DomainResult, StagedFieldDuty,
};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_sql_error, DbManager, SqliteConnection};

/// SQLite-backed draft repository.
pub struct SqliteFieldDutyDraftRepository {
    db: Arc<DbManager>,
}

impl SqliteFieldDutyDraftRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    fn insert(conn: &SqliteConnection, draft: &FieldDutyDraft) -> DomainResult<DraftId> {
        conn.execute(
            DRAFT_INSERT_SQL,
            params![
                draft.destination,
                draft.description,
                draft.address,
                draft.latitude,
                draft.longitude,
                draft.image_path,
            ],
        )
        .map_err(map_sql_error)?;
        Ok(DraftId(conn.last_insert_rowid()))
    }

    fn fetch_one(conn: &SqliteConnection, id: DraftId) -> DomainResult<Option<StagedFieldDuty>> {
        conn.query_row(DRAFT_SELECT_ONE_SQL, params![id.0], map_draft_row)
            .optional()
            .map_err(map_sql_error)
    }

    fn fetch_all(conn: &SqliteConnection) -> DomainResult<Vec<StagedFieldDuty>> {
        let mut stmt = conn.prepare(DRAFT_SELECT_ALL_SQL).map_err(map_sql_error)?;
        let rows = stmt.query_map([], map_draft_row).map_err(map_sql_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
    }

    fn replace(conn: &SqliteConnection, id: DraftId, draft: &FieldDutyDraft) -> DomainResult<()> {
        let changed = conn
            .execute(
                DRAFT_UPDATE_SQL,
                params![
                    draft.destination,
                    draft.description,
                    draft.address,
                    draft.latitude,
                    draft.longitude,
                    draft.image_path,
                    id.0,
                ],
            )
            .map_err(map_sql_error)?;

        if changed == 0 {
            return Err(PresensiError::NotFound(format!("field-duty draft {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl FieldDutyDraftRepository for SqliteFieldDutyDraftRepository {
    async fn create(&self, draft: &FieldDutyDraft) -> DomainResult<DraftId> {
        let db = Arc::clone(&self.db);
        let draft = draft.clone();

        let id = task::spawn_blocking(move || -> DomainResult<DraftId> {
            let conn = db.get_connection()?;
            Self::insert(&conn, &draft)
        })
        .await
        .map_err(map_join_error)??;

        debug!(draft_id = %id, "field-duty draft staged");
        Ok(id)
    }

    async fn get(&self, id: DraftId) -> DomainResult<Option<StagedFieldDuty>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<StagedFieldDuty>> {
            let conn = db.get_connection()?;
            Self::fetch_one(&conn, id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self) -> DomainResult<Vec<StagedFieldDuty>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<StagedFieldDuty>> {
            let conn = db.get_connection()?;
            Self::fetch_all(&conn)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, id: DraftId, draft: &FieldDutyDraft) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let draft = draft.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            Self::replace(&conn, id, &draft)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: DraftId) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let removed = conn.execute(DRAFT_DELETE_SQL, params![id.0]).map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn count(&self) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM field_duty_drafts", [], |row| row.get(0))
                .map_err(map_sql_error)?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
        .await
        .map_err(map_join_error)?
    }
}

const DRAFT_INSERT_SQL: &str = "INSERT INTO field_duty_drafts (
        tujuan, keterangan_tugas, alamat, latitude, longitude, imagePath
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const DRAFT_SELECT_ONE_SQL: &str = "SELECT
        idLocal, tujuan, keterangan_tugas, alamat, latitude, longitude, imagePath
    FROM field_duty_drafts
    WHERE idLocal = ?1";

const DRAFT_SELECT_ALL_SQL: &str = "SELECT
        idLocal, tujuan, keterangan_tugas, alamat, latitude, longitude, imagePath
    FROM field_duty_drafts
    ORDER BY idLocal ASC";

const DRAFT_UPDATE_SQL: &str = "UPDATE field_duty_drafts
    SET tujuan = ?1, keterangan_tugas = ?2, alamat = ?3,
        latitude = ?4, longitude = ?5, imagePath = ?6
    WHERE idLocal = ?7";

const DRAFT_DELETE_SQL: &str = "DELETE FROM field_duty_drafts WHERE idLocal = ?1";

fn map_draft_row(row: &Row<'_>) -> rusqlite::Result<StagedFieldDuty> {
    Ok(StagedFieldDuty {
        id: DraftId(row.get(0)?),
        draft: FieldDutyDraft {
            destination: row.get(1)?,
            description: row.get(2)?,
            address: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            image_path: row.get(6)?,
        },
    })
}

fn map_join_error(err: task::JoinError) -> PresensiError {
    PresensiError::Internal(format!("draft store task failed: {err}"))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (TempDir, SqliteFieldDutyDraftRepository) {
        let dir = TempDir::new().unwrap();
        let db = DbManager::new(dir.path().join("drafts.db"), 2).unwrap();
        db.run_migrations().unwrap();
        (dir, SqliteFieldDutyDraftRepository::new(Arc::new(db)))
    }

    fn draft(destination: &str, image: &str) -> FieldDutyDraft {
        FieldDutyDraft {
            destination: destination.into(),
            description: "Survey".into(),
            address: "Jl. Merdeka 1".into(),
            latitude: "-1.1".into(),
            longitude: "140.2".into(),
            image_path: image.into(),
        }
    }

    #[tokio::test]
    async fn get_returns_stored_fields() {
        let (_dir, repo) = setup();
        let id = repo.create(&draft("Kantor A", "img1")).await.unwrap();

        let staged = repo.get(id).await.unwrap().unwrap();
        assert_eq!(staged.id, id);
        assert_eq!(staged.draft, draft("Kantor A", "img1"));
        assert!(repo.get(DraftId(id.0 + 100)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (_dir, repo) = setup();

        let err = repo.update(DraftId(42), &draft("Kantor A", "img1")).await.unwrap_err();
        assert!(matches!(err, PresensiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_into_existing_triple_conflicts() {
        let (_dir, repo) = setup();
        repo.create(&draft("Kantor A", "img1")).await.unwrap();
        let other = repo.create(&draft("Kantor B", "img2")).await.unwrap();

        let err = repo.update(other, &draft("Kantor A", "img3")).await.unwrap_err();
        assert!(matches!(err, PresensiError::Conflict(_)));

        let kept = repo.get(other).await.unwrap().unwrap();
        assert_eq!(kept.draft.destination, "Kantor B");
    }

    #[tokio::test]
    async fn update_may_change_image_only() {
        let (_dir, repo) = setup();
        let id = repo.create(&draft("Kantor A", "img1")).await.unwrap();

        repo.update(id, &draft("Kantor A", "img9")).await.unwrap();

        assert_eq!(repo.get(id).await.unwrap().unwrap().draft.image_path, "img9");
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
