use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRegistration {
    pub id: i64,
    pub registration_date: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub registration: ActivityRegistration,
}

impl DiaryEntry {
    /// Id of the user owning the entry, through its activity registration.
    pub fn owner_id(&self) -> i64 {
        self.registration.user_id
    }
}

/// Read side of the diary entry store, used to resolve ownership.
#[async_trait]
pub trait DiaryEntryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<DiaryEntry>>;
}
