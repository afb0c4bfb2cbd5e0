use crate::domain::diary_entries::{DiaryEntry, DiaryEntryRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::diary_entries::DiaryEntryDbModel;
use anyhow::Result;
use async_trait::async_trait;

pub struct PostgresDiaryEntryRepository {
    pool: DbPool,
}

impl PostgresDiaryEntryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiaryEntryRepository for PostgresDiaryEntryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<DiaryEntry>> {
        let entry = sqlx::query_as::<_, DiaryEntryDbModel>(
            r#"
            SELECT d.id, d.title, d.content,
                   r.id AS registration_id, r.registration_date, r.user_id
            FROM diary_entries d
            JOIN activity_registrations r ON r.id = d.registration_id
            WHERE d.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry.map(DiaryEntry::from))
    }
}
