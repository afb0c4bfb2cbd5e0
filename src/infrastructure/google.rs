use crate::domain::auth::{AuthError, IdentityVerifier};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const GOOGLE_TOKEN_INFO_URL: &str = "https://www.googleapis.com/oauth2/v3/tokeninfo";

/// Verifies Google ID tokens with the tokeninfo endpoint.
/// Any answer other than `200 OK` counts as a rejection.
#[derive(Debug, Clone)]
pub struct GoogleIdentityVerifier {
    client: Client,
    token_info_url: String,
}

impl GoogleIdentityVerifier {
    pub fn new(token_info_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            token_info_url: token_info_url.into(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, provider_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .get(&self.token_info_url)
            .query(&[("id_token", provider_token)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Google token validation request failed: {}", e);
                AuthError::IdentityVerificationFailed(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Google token validation failed with status: {}", status);
            return Err(AuthError::IdentityVerificationFailed(format!(
                "google token not valid ({})",
                status
            )));
        }

        Ok(())
    }
}
