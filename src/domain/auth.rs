use crate::domain::tokens::TokenKind;
use crate::domain::users::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the user the token was issued to
    pub email: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
    /// Unique token id, makes every issued value distinct
    pub jti: String,
}

impl Claims {
    pub fn new(email: &str, kind: TokenKind) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            email: email.to_string(),
            exp: now + kind.ttl_seconds(),
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Failures of the token codec and its key provider.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing method not valid")]
    SigningMethodMismatch,
    #[error("token expired")]
    Expired,
    #[error("token malformed: {0}")]
    Malformed(String),
    #[error("failed to parse token claims: {0}")]
    ParseFailure(String),
    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Authentication and authorization failures surfaced to clients.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization token must be provided, starting with Bearer")]
    MissingCredential,
    #[error("token expired. Please, get a new one at /api/v1/auth/refreshToken or authenticate again")]
    CredentialExpired,
    #[error("token not valid")]
    CredentialInvalid,
    #[error("token revoked")]
    CredentialRevoked,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("you have no permissions over the resource you are trying to access to")]
    Unauthorized,
    #[error("identity verification failed: {0}")]
    IdentityVerificationFailed(String),
    #[error("failed to update token pair, one or both tokens not found in existing pair")]
    TokenPairInconsistency,
    #[error("no access token provisioned for user")]
    AccessTokenRowMissing,
}

/// Source of the symmetric secret used to sign tokens.
///
/// Implementations must return the same bytes for their whole lifetime.
pub trait SigningKeyProvider: Send + Sync {
    fn secret_key(&self) -> Result<&[u8], TokenError>;
}

/// Encodes, validates and decodes signed tokens.
pub trait TokenCodec: Send + Sync {
    /// Sign a fresh token of the given kind for a user
    fn generate_token(&self, user: &User, kind: TokenKind) -> Result<String, TokenError>;

    /// Check algorithm, signature and expiry
    fn validate_token(&self, token: &str) -> Result<(), TokenError>;

    /// Decode claims after checking the signature. Expiry is not enforced,
    /// callers that need it must call `validate_token` first.
    fn get_claims(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Verifies a credential issued by an external identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, provider_token: &str) -> Result<(), AuthError>;
}
