use crate::domain::auth::{Claims, SigningKeyProvider, TokenCodec, TokenError};
use crate::domain::tokens::TokenKind;
use crate::domain::users::User;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use std::sync::Arc;

/// HMAC algorithms accepted when verifying tokens. New tokens use HS256.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT token codec using HMAC-SHA256 with a secret from the key provider
pub struct JwtTokenCodec {
    key_provider: Arc<dyn SigningKeyProvider>,
}

impl JwtTokenCodec {
    pub fn new(key_provider: Arc<dyn SigningKeyProvider>) -> Self {
        Self { key_provider }
    }

    /// Sign an arbitrary claim set with the provider's secret
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let secret = self.key_provider.secret_key()?;

        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validation(validate_exp: bool) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = validate_exp;
        if !validate_exp {
            validation.required_spec_claims.clear();
        }
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn generate_token(&self, user: &User, kind: TokenKind) -> Result<String, TokenError> {
        self.encode_claims(&Claims::new(&user.email, kind))
    }

    fn validate_token(&self, token: &str) -> Result<(), TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::SigningMethodMismatch);
        }

        let secret = self.key_provider.secret_key()?;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Self::validation(true),
        )
        .map(|_| ())
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm => TokenError::SigningMethodMismatch,
            _ => TokenError::Malformed(e.to_string()),
        })
    }

    fn get_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let secret = self.key_provider.secret_key()?;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Self::validation(false),
        )
        .map_err(|e| TokenError::ParseFailure(e.to_string()))?
        .claims;

        if claims.email.trim().is_empty() {
            return Err(TokenError::ParseFailure("email claim is empty".to_string()));
        }

        Ok(claims)
    }
}
