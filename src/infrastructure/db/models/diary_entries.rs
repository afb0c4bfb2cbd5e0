use crate::domain::diary_entries::{ActivityRegistration, DiaryEntry};
use sqlx::FromRow;

/// Diary entry joined with its activity registration
#[derive(Debug, Clone, FromRow)]
pub struct DiaryEntryDbModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub registration_id: i64,
    pub registration_date: i64,
    pub user_id: i64,
}

impl From<DiaryEntryDbModel> for DiaryEntry {
    fn from(model: DiaryEntryDbModel) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            registration: ActivityRegistration {
                id: model.registration_id,
                registration_date: model.registration_date,
                user_id: model.user_id,
            },
        }
    }
}
