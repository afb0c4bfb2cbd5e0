use crate::domain::diary_entries::{DiaryEntry, DiaryEntryRepository};
use crate::domain::external_logins::{ExternalLogin, ExternalLoginRepository, NewExternalLogin};
use crate::domain::tokens::{NewToken, Token, TokenKind, TokenRepository};
use crate::domain::users::{NewUser, User, UserRepository};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

/// Rows plus the last id handed out, mimicking a BIGSERIAL column.
struct Table<T> {
    rows: Vec<T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> Result<MutexGuard<'_, Table<T>>> {
    table
        .lock()
        .map_err(|_| anyhow!("in-memory table lock poisoned"))
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Table<User>>>,
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let mut table = lock(&self.users)?;
        if table.rows.iter().any(|u| u.email == new_user.email) {
            bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }

        let user = User {
            id: table.next_id(),
            email: new_user.email,
            user_name: new_user.user_name,
            role: new_user.role,
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        let table = lock(&self.users)?;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let table = lock(&self.users)?;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error> {
        let mut table = lock(&self.users)?;
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        Ok(table.rows.len() != before)
    }
}

/// Token store that enforces the same uniqueness rules as the `tokens` table.
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tokens: Arc<Mutex<Table<Token>>>,
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: NewToken) -> Result<Token> {
        let mut table = lock(&self.tokens)?;
        if table
            .rows
            .iter()
            .any(|t| t.user_id == token.user_id && t.kind == token.kind)
        {
            bail!("user {} already has a {:?} token", token.user_id, token.kind);
        }
        if table.rows.iter().any(|t| t.value == token.value) {
            bail!("token value already stored");
        }

        let token = Token {
            id: table.next_id(),
            value: token.value,
            kind: token.kind,
            user_id: token.user_id,
        };
        table.rows.push(token.clone());
        Ok(token)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Token>> {
        let table = lock(&self.tokens)?;
        Ok(table.rows.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<Token>> {
        let table = lock(&self.tokens)?;
        Ok(table.rows.iter().find(|t| t.value == value).cloned())
    }

    async fn find_by_user_and_kind(&self, user_id: i64, kind: TokenKind) -> Result<Option<Token>> {
        let table = lock(&self.tokens)?;
        Ok(table
            .rows
            .iter()
            .find(|t| t.user_id == user_id && t.kind == kind)
            .cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Token>> {
        let table = lock(&self.tokens)?;
        let mut tokens: Vec<Token> = table
            .rows
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tokens.sort_by_key(|t| t.kind.as_i16());
        Ok(tokens)
    }

    async fn update_value(&self, id: i64, value: &str) -> Result<Option<Token>> {
        let mut table = lock(&self.tokens)?;
        if table.rows.iter().any(|t| t.id != id && t.value == value) {
            bail!("token value already stored");
        }

        Ok(table.rows.iter_mut().find(|t| t.id == id).map(|t| {
            t.value = value.to_string();
            t.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = lock(&self.tokens)?;
        let before = table.rows.len();
        table.rows.retain(|t| t.id != id);
        Ok(table.rows.len() != before)
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64> {
        let mut table = lock(&self.tokens)?;
        let before = table.rows.len();
        table.rows.retain(|t| t.user_id != user_id);
        Ok((before - table.rows.len()) as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockExternalLoginRepository {
    logins: Arc<Mutex<Table<ExternalLogin>>>,
}

#[async_trait]
impl ExternalLoginRepository for MockExternalLoginRepository {
    async fn create(&self, login: NewExternalLogin) -> Result<ExternalLogin> {
        let mut table = lock(&self.logins)?;
        if table
            .rows
            .iter()
            .any(|l| l.provider_client_id == login.provider_client_id)
        {
            bail!("provider client id already linked");
        }

        let login = ExternalLogin {
            id: table.next_id(),
            provider: login.provider,
            provider_client_id: login.provider_client_id,
            provider_client_token: login.provider_client_token,
            user_id: login.user_id,
        };
        table.rows.push(login.clone());
        Ok(login)
    }

    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<ExternalLogin>> {
        let table = lock(&self.logins)?;
        Ok(table
            .rows
            .iter()
            .find(|l| l.provider_client_id == client_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<ExternalLogin>> {
        let table = lock(&self.logins)?;
        Ok(table.rows.iter().find(|l| l.user_id == user_id).cloned())
    }

    async fn update_token_for_user(
        &self,
        user_id: i64,
        provider_client_token: &str,
    ) -> Result<Option<ExternalLogin>> {
        let mut table = lock(&self.logins)?;
        Ok(table.rows.iter_mut().find(|l| l.user_id == user_id).map(|l| {
            l.provider_client_token = provider_client_token.to_string();
            l.clone()
        }))
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64> {
        let mut table = lock(&self.logins)?;
        let before = table.rows.len();
        table.rows.retain(|l| l.user_id != user_id);
        Ok((before - table.rows.len()) as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockDiaryEntryRepository {
    entries: Arc<Mutex<Table<DiaryEntry>>>,
}

impl MockDiaryEntryRepository {
    /// Seed an entry; its id is kept as given.
    pub fn insert(&self, entry: DiaryEntry) -> Result<()> {
        let mut table = lock(&self.entries)?;
        table.last_id = table.last_id.max(entry.id);
        table.rows.retain(|e| e.id != entry.id);
        table.rows.push(entry);
        Ok(())
    }
}

#[async_trait]
impl DiaryEntryRepository for MockDiaryEntryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<DiaryEntry>> {
        let table = lock(&self.entries)?;
        Ok(table.rows.iter().find(|e| e.id == id).cloned())
    }
}
