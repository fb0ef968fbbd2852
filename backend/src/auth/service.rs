//! Core business logic for the authentication system.
//!
//! The session manager: registration, login, logout, refresh rotation and
//! third-party login. All session state is the per-user refresh-token set in
//! the database; this service holds no mutable state of its own.

use crate::auth::models::*;
use crate::config::Config;
use crate::database::models::{CreateUser, User, UserRole};
use crate::errors::{ServiceError, ServiceResult, is_unique_violation};
use crate::repositories::user_repository::UserRepository;
use crate::services::google::{GoogleIdentity, GoogleVerifier};
use crate::utils::generate_random_string::generate_random_string;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

/// Authentication service for handling registration, login, token rotation
/// and session revocation.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: JwtUtils,
    google: GoogleVerifier,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            pool,
            jwt_utils: JwtUtils::new(config),
            google: GoogleVerifier::new(),
        }
    }

    /// Replaces the identity-provider collaborator (used by the google-login
    /// handler and by tests).
    pub fn with_google_verifier(mut self, google: GoogleVerifier) -> Self {
        self.google = google;
        self
    }

    /// Issues a fresh token pair for the user and records the refresh token
    /// in their set of valid tokens. Existing tokens stay untouched, so
    /// sessions on other devices remain valid.
    async fn issue_session(&self, user_id: &str) -> ServiceResult<TokenPairResponse> {
        let token = self.jwt_utils.issue_access_token(user_id)?;
        let refresh_token = self.jwt_utils.issue_refresh_token(user_id)?;

        UserRepository::new(self.pool)
            .store_refresh_token(user_id, &refresh_token)
            .await?;

        Ok(TokenPairResponse {
            token,
            refresh_token,
        })
    }

    /// Registers a new user and logs them in.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<TokenPairResponse> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::from_validation(validation_errors));
        }

        let repo = UserRepository::new(self.pool);
        if repo.identity_exists(&request.username, &request.email).await? {
            return Err(ServiceError::already_exists("User", &request.email));
        }

        let password_hash = hash_password(&request.password)?;
        let address = match &request.address {
            Some(address) => Some(
                serde_json::to_string(address)
                    .map_err(|e| ServiceError::internal(format!("Address encoding failed: {}", e)))?,
            ),
            None => None,
        };

        let email = request.email.clone();
        let created = repo
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                username: request.username,
                email: request.email,
                password_hash,
                role: UserRole::User,
                phone_number: request.phone_number,
                address,
                profile_image: None,
            })
            .await;

        let user = match created {
            Ok(user) => user,
            // Lost a race with a concurrent registration of the same identity.
            Err(error) if is_unique_violation(&error) => {
                return Err(ServiceError::already_exists("User", &email));
            }
            Err(error) => return Err(error.into()),
        };

        self.issue_session(&user.id).await
    }

    /// Authenticates by email and password.
    ///
    /// Unknown email and wrong password produce the same error, so callers
    /// cannot tell which case occurred.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenPairResponse> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_email(&request.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        self.issue_session(&user.id).await
    }

    /// Verifies a refresh token and consumes it.
    ///
    /// A token that verifies but is absent from the owner's stored set has
    /// already been used (rotated away, or stolen and replayed). That is
    /// treated as theft: every outstanding token for the user is revoked
    /// before the generic error goes back to the caller.
    async fn consume_refresh_token(&self, refresh_token: &str) -> ServiceResult<User> {
        let claims = self.jwt_utils.validate_refresh_token(refresh_token)?;

        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(&claims.sub)
            .await?
            .ok_or(ServiceError::InvalidToken)?;

        if !repo.remove_refresh_token(&user.id, refresh_token).await? {
            repo.clear_refresh_tokens(&user.id).await?;
            tracing::warn!(
                user_id = %user.id,
                "possible refresh token theft detected, all sessions revoked"
            );
            return Err(ServiceError::InvalidToken);
        }

        Ok(user)
    }

    /// Invalidates one session by consuming its refresh token.
    pub async fn logout(&self, request: RefreshTokenRequest) -> ServiceResult<LogoutResponse> {
        self.consume_refresh_token(&request.refresh_token).await?;

        Ok(LogoutResponse {
            message: "Logged out successfully".to_string(),
            success: true,
        })
    }

    /// Rotates a refresh token: the presented token is consumed and a fresh
    /// pair is issued, so only the most recently issued token per chain is
    /// ever valid.
    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<TokenPairResponse> {
        let user = self.consume_refresh_token(&request.refresh_token).await?;
        self.issue_session(&user.id).await
    }

    /// Logs in via a Google credential, creating a local user on first sight.
    ///
    /// Provider-created accounts get a random unusable password placeholder,
    /// so password login stays impossible for them. An existing account with
    /// the same email is reused as-is.
    pub async fn google_login(
        &self,
        request: GoogleLoginRequest,
    ) -> ServiceResult<TokenPairResponse> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::from_validation(validation_errors));
        }

        let identity = self.google.verify(&request.credential).await?;

        let repo = UserRepository::new(self.pool);
        let user = match repo.get_user_by_email(&identity.email).await? {
            Some(user) => user,
            None => {
                let username = self.provider_username(&repo, &identity).await?;
                let placeholder = format!("google-auth-{}", generate_random_string(24));

                repo.create_user(CreateUser {
                    id: Uuid::now_v7().to_string(),
                    username,
                    email: identity.email.clone(),
                    password_hash: hash_password(&placeholder)?,
                    role: UserRole::User,
                    phone_number: None,
                    address: None,
                    profile_image: identity.picture.clone(),
                })
                .await?
            }
        };

        self.issue_session(&user.id).await
    }

    /// Picks a username for a provider-created account: the display name, or
    /// the email's local part, suffixed if already taken.
    async fn provider_username(
        &self,
        repo: &UserRepository<'_>,
        identity: &GoogleIdentity,
    ) -> ServiceResult<String> {
        let base = identity
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                identity
                    .email
                    .split('@')
                    .next()
                    .unwrap_or(identity.email.as_str())
                    .to_string()
            });

        if repo.username_exists(&base).await? {
            Ok(format!("{}-{}", base, generate_random_string(6)))
        } else {
            Ok(base)
        }
    }
}
