//! Google identity verification for third-party login.
//!
//! Exchanges the credential presented by the client for a verified identity
//! assertion via Google's tokeninfo endpoint. The endpoint URL is injectable
//! so tests can point the verifier at a local stub.

use crate::errors::{ServiceError, ServiceResult};
use serde::Deserialize;

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verified identity assertion returned by the provider.
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Raw tokeninfo payload; only the fields we care about.
#[derive(Debug, Deserialize)]
struct TokenInfoPayload {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Clone)]
pub struct GoogleVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
}

impl GoogleVerifier {
    pub fn new() -> Self {
        Self::with_tokeninfo_url(GOOGLE_TOKENINFO_URL)
    }

    pub fn with_tokeninfo_url(tokeninfo_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokeninfo_url: tokeninfo_url.into(),
        }
    }

    /// Verifies a credential with the provider and extracts the identity.
    ///
    /// Fails with `InvalidToken` if the provider rejects the credential or
    /// returns no verifiable email.
    pub async fn verify(&self, credential: &str) -> ServiceResult<GoogleIdentity> {
        let url = format!("{}?id_token={}", self.tokeninfo_url, credential);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ServiceError::external_service(format!("Identity provider unreachable: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(ServiceError::InvalidToken);
        }

        let payload: TokenInfoPayload = response
            .json()
            .await
            .map_err(|_| ServiceError::InvalidToken)?;

        identity_from_payload(payload)
    }
}

impl Default for GoogleVerifier {
    fn default() -> Self {
        Self::new()
    }
}

fn identity_from_payload(payload: TokenInfoPayload) -> ServiceResult<GoogleIdentity> {
    match payload.email {
        Some(email) if !email.is_empty() => Ok(GoogleIdentity {
            email,
            name: payload.name,
            picture: payload.picture,
        }),
        _ => Err(ServiceError::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_without_email_is_rejected() {
        let payload = TokenInfoPayload {
            email: None,
            name: Some("A User".to_string()),
            picture: None,
        };
        assert!(identity_from_payload(payload).is_err());

        let payload = TokenInfoPayload {
            email: Some(String::new()),
            name: None,
            picture: None,
        };
        assert!(identity_from_payload(payload).is_err());
    }

    #[test]
    fn payload_with_email_maps_fields() {
        let payload = TokenInfoPayload {
            email: Some("a@example.com".to_string()),
            name: Some("A User".to_string()),
            picture: Some("https://example.com/p.png".to_string()),
        };
        let identity = identity_from_payload(payload).unwrap();
        assert_eq!(identity.email, "a@example.com");
        assert_eq!(identity.name.as_deref(), Some("A User"));
    }
}
