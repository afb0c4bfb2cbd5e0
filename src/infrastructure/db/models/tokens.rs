use crate::domain::tokens::{Token, TokenKind};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TokenDbModel {
    pub id: i64,
    pub value: String,
    pub kind: i16,
    pub user_id: i64,
}

impl TryFrom<TokenDbModel> for Token {
    type Error = anyhow::Error;

    fn try_from(model: TokenDbModel) -> Result<Self, Self::Error> {
        let kind = TokenKind::from_i16(model.kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown kind {} for token {}", model.kind, model.id))?;

        Ok(Self {
            id: model.id,
            value: model.value,
            kind,
            user_id: model.user_id,
        })
    }
}
