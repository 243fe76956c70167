//! Identity service: registration, login, token resolution, profile edits
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::domain::user::{CreateUserDto, UpdateUserDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Same message for unknown username and wrong password
const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new, non-admin user.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        let users = self.repos.users();

        if users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Validation("Username already registered".into()));
        }
        if users.find_by_email(email).await?.is_some() {
            return Err(DomainError::Validation("Email already registered".into()));
        }

        let user = users
            .create(CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash(password).await?,
                is_admin: false,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and issue a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self.repos.users().find_by_username(username).await?;
        // Unknown usernames still pay for one bcrypt check
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let matches = check_password(password, stored_hash).await?;

        let user = match user {
            Some(user) if matches => user,
            _ => return Err(DomainError::Unauthorized(BAD_CREDENTIALS.into())),
        };

        let token = create_token(&user.username, user.is_admin, &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
        })
    }

    /// Resolve a bearer token to the user it was issued for.
    pub async fn resolve_token(&self, token: &str) -> DomainResult<User> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Could not validate credentials".into()))?;

        if claims.sub.is_empty() {
            return Err(DomainError::Unauthorized(
                "Could not validate credentials".into(),
            ));
        }

        self.repos
            .users()
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("User not found".into()))
    }

    // ── Profile ─────────────────────────────────────────────────

    /// Change the caller's email and/or password.
    pub async fn update_profile(
        &self,
        user: &User,
        email: Option<String>,
        password: Option<String>,
    ) -> DomainResult<User> {
        let users = self.repos.users();

        if let Some(ref email) = email {
            if let Some(existing) = users.find_by_email(email).await? {
                if existing.id != user.id {
                    return Err(DomainError::Validation("Email already in use".into()));
                }
            }
        }

        let password_hash = match password {
            Some(ref password) => Some(hash(password).await?),
            None => None,
        };

        users
            .update(
                user.id,
                UpdateUserDto {
                    email,
                    password_hash,
                },
            )
            .await
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create an admin when the users table is empty. Returns the new admin.
    pub async fn ensure_bootstrap_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let users = self.repos.users();
        if users.count().await? > 0 {
            return Ok(None);
        }

        let admin = users
            .create(CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash(password).await?,
                is_admin: true,
            })
            .await?;

        info!(username = %admin.username, "Default admin created");
        warn!("Please change the default admin password immediately");
        Ok(Some(admin))
    }
}

/// Hash compared against when the username does not exist
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("measures-no-such-user").unwrap_or_default())
}

/// Runs bcrypt on the blocking pool.
async fn hash(password: &str) -> DomainResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| DomainError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

/// `None` checks against [`dummy_hash`] and always reports a mismatch.
async fn check_password(password: &str, stored_hash: Option<String>) -> DomainResult<bool> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash).unwrap_or(false),
        None => {
            let _ = verify_password(&password, dummy_hash());
            false
        }
    })
    .await
    .map_err(|e| DomainError::Internal(format!("Password check task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::init_test_database;
    use crate::SeaOrmRepositoryProvider;

    async fn service() -> IdentityService {
        let db = init_test_database().await;
        IdentityService::new(
            Arc::new(SeaOrmRepositoryProvider::new(db)),
            JwtConfig::default(),
        )
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_rejected() {
        let svc = service().await;
        svc.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let same_name = svc
            .register("alice", "other@example.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(
            same_name,
            DomainError::Validation("Username already registered".into())
        );

        let same_email = svc
            .register("bob", "alice@example.com", "password123")
            .await
            .unwrap_err();
        assert_eq!(
            same_email,
            DomainError::Validation("Email already registered".into())
        );
    }

    #[tokio::test]
    async fn registered_users_are_not_admins() {
        let svc = service().await;
        let user = svc
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();
        assert!(!user.is_admin);
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = service().await;
        svc.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let wrong_password = svc.login("alice", "wrong-password").await.unwrap_err();
        let unknown_user = svc.login("nobody", "password123").await.unwrap_err();
        assert_eq!(wrong_password, unknown_user);
        assert!(matches!(wrong_password, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_checked_against_a_real_hash() {
        assert!(dummy_hash().starts_with("$2"));
        assert!(!verify_password("measures-other", dummy_hash()).unwrap());
        assert!(!check_password("anything", None).await.unwrap());
    }

    #[tokio::test]
    async fn blank_credentials_fail_like_any_other() {
        let svc = service().await;
        let blank = svc.login("", "").await.unwrap_err();
        let unknown = svc.login("nobody", "password123").await.unwrap_err();
        assert_eq!(blank, unknown);
    }

    #[tokio::test]
    async fn login_token_resolves_back_to_user() {
        let svc = service().await;
        svc.register("alice", "alice@example.com", "password123")
            .await
            .unwrap();

        let auth = svc.login("alice", "password123").await.unwrap();
        assert_eq!(auth.token_type, "bearer");

        let user = svc.resolve_token(&auth.token).await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(matches!(
            svc.resolve_token("garbage").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_unauthorized() {
        let svc = service().await;
        let token = create_token("ghost", true, &JwtConfig::default()).unwrap();
        assert_eq!(
            svc.resolve_token(&token).await.unwrap_err(),
            DomainError::Unauthorized("User not found".into())
        );
    }

    #[tokio::test]
    async fn profile_email_must_stay_unique() {
        let svc = service().await;
        let alice = svc
            .register("alice", "alice@example.com", "password123")
            .await
            .unwrap();
        svc.register("bob", "bob@example.com", "password123")
            .await
            .unwrap();

        let err = svc
            .update_profile(&alice, Some("bob@example.com".into()), None)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Validation("Email already in use".into()));

        // Re-submitting one's own email is fine
        let same = svc
            .update_profile(&alice, Some("alice@example.com".into()), None)
            .await
            .unwrap();
        assert_eq!(same.email, "alice@example.com");

        let updated = svc
            .update_profile(&alice, None, Some("new-password".into()))
            .await
            .unwrap();
        assert_eq!(updated.email, "alice@example.com");
        assert!(svc.login("alice", "new-password").await.is_ok());
        assert!(svc.login("alice", "password123").await.is_err());
    }

    #[tokio::test]
    async fn bootstrap_admin_only_on_empty_table() {
        let svc = service().await;
        let admin = svc
            .ensure_bootstrap_admin("admin", "admin@example.com", "admin12345")
            .await
            .unwrap()
            .expect("first call creates the admin");
        assert!(admin.is_admin);

        let again = svc
            .ensure_bootstrap_admin("admin2", "admin2@example.com", "admin12345")
            .await
            .unwrap();
        assert!(again.is_none());
    }
}
