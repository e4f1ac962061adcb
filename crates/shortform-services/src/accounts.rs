//! Account service implementation
//!
//! Registration, login, and business info management. Login failures are
//! reported uniformly as invalid credentials so the API never reveals
//! whether an email exists.

use shortform_auth::{JwtService, PasswordService};
use shortform_core::{
    models::{BusinessInfo, Profile, ProfileRole},
    traits::{BusinessInfoRepository, ProfileRepository},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A successful registration or login
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated profile
    pub profile: Profile,

    /// Signed JWT for subsequent requests
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Account service
pub struct AccountService<P: ProfileRepository, B: BusinessInfoRepository> {
    profile_repo: Arc<P>,
    business_repo: Arc<B>,
    password_service: PasswordService,
    jwt_service: Arc<JwtService>,
}

impl<P: ProfileRepository, B: BusinessInfoRepository> AccountService<P, B> {
    /// Create a new account service
    pub fn new(
        profile_repo: Arc<P>,
        business_repo: Arc<B>,
        password_service: PasswordService,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            profile_repo,
            business_repo,
            password_service,
            jwt_service,
        }
    }

    /// Register a new customer profile
    ///
    /// Starts with the customer role and a zero balance. The email must
    /// not be taken.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> AppResult<AuthOutcome> {
        let email = email.trim().to_lowercase();

        if self.profile_repo.find_by_email(&email).await?.is_some() {
            warn!("Registration attempt for taken email");
            return Err(AppError::AlreadyExists(format!(
                "Email {} is already registered",
                email
            )));
        }

        let password_hash = self.password_service.hash_password(password)?;

        let profile = Profile {
            id: Uuid::new_v4(),
            email,
            full_name,
            password_hash,
            role: ProfileRole::Customer,
            credit_balance: 0,
            created_at: chrono::Utc::now(),
        };

        let created = self.profile_repo.create(&profile).await?;
        let token = self.jwt_service.create_token_for_profile(&created)?;

        info!(user_id = %created.id, "Profile registered");

        Ok(AuthOutcome {
            profile: created,
            token,
            expires_in: self.jwt_service.expiration_secs(),
        })
    }

    /// Authenticate credentials and issue a token
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let profile = self
            .profile_repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let valid = self
            .password_service
            .verify_password(password, &profile.password_hash)?;

        if !valid {
            warn!(user_id = %profile.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.create_token_for_profile(&profile)?;

        info!(user_id = %profile.id, "Login successful");

        Ok(AuthOutcome {
            profile,
            token,
            expires_in: self.jwt_service.expiration_secs(),
        })
    }

    /// Fetch a profile by id
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profile_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::ProfileNotFound(user_id.to_string()))
    }

    /// Fetch the caller's business info, if any was saved
    #[instrument(skip(self))]
    pub async fn business_info(&self, user_id: Uuid) -> AppResult<Option<BusinessInfo>> {
        self.business_repo.find_by_user(user_id).await
    }

    /// Save the caller's business info, creating or replacing the record
    ///
    /// Company and representative names are required, the rest is
    /// optional.
    #[instrument(skip(self, info))]
    pub async fn save_business_info(
        &self,
        user_id: Uuid,
        mut info: BusinessInfo,
    ) -> AppResult<BusinessInfo> {
        if info.company_name.trim().is_empty() {
            return Err(AppError::MissingField("company_name".to_string()));
        }
        if info.representative_name.trim().is_empty() {
            return Err(AppError::MissingField("representative_name".to_string()));
        }

        info.user_id = user_id;
        let saved = self.business_repo.upsert(&info).await?;

        debug!(user_id = %user_id, "Business info saved");

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shortform_core::traits::Repository;
    use std::sync::Mutex;

    struct MockProfileRepository {
        profiles: Mutex<Vec<Profile>>,
    }

    impl MockProfileRepository {
        fn new() -> Self {
            Self {
                profiles: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl Repository<Profile, Uuid> for MockProfileRepository {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn find_all(&self, _limit: i64, _offset: i64) -> AppResult<Vec<Profile>> {
            Ok(self.profiles.lock().unwrap().clone())
        }

        async fn count(&self) -> AppResult<i64> {
            Ok(self.profiles.lock().unwrap().len() as i64)
        }

        async fn create(&self, entity: &Profile) -> AppResult<Profile> {
            self.profiles.lock().unwrap().push(entity.clone());
            Ok(entity.clone())
        }

        async fn update(&self, entity: &Profile) -> AppResult<Profile> {
            Ok(entity.clone())
        }

        async fn delete(&self, _id: Uuid) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.email == email)
                .cloned())
        }

        async fn increment_balance(&self, id: Uuid, amount: i64) -> AppResult<i64> {
            let mut profiles = self.profiles.lock().unwrap();
            let profile = profiles
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| AppError::ProfileNotFound(id.to_string()))?;
            profile.credit_balance += amount;
            Ok(profile.credit_balance)
        }
    }

    struct MockBusinessInfoRepository {
        records: Mutex<Vec<BusinessInfo>>,
    }

    impl MockBusinessInfoRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl BusinessInfoRepository for MockBusinessInfoRepository {
        async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<BusinessInfo>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.user_id == user_id)
                .cloned())
        }

        async fn upsert(&self, info: &BusinessInfo) -> AppResult<BusinessInfo> {
            let mut records = self.records.lock().unwrap();
            if let Some(existing) = records.iter_mut().find(|b| b.user_id == info.user_id) {
                let id = existing.id;
                *existing = info.clone();
                existing.id = id;
                Ok(existing.clone())
            } else {
                let mut created = info.clone();
                created.id = records.len() as i64 + 1;
                records.push(created.clone());
                Ok(created)
            }
        }

        async fn list_all(
            &self,
            _limit: i64,
            _offset: i64,
        ) -> AppResult<(Vec<BusinessInfo>, i64)> {
            let records = self.records.lock().unwrap().clone();
            let total = records.len() as i64;
            Ok((records, total))
        }

        async fn count(&self) -> AppResult<i64> {
            Ok(self.records.lock().unwrap().len() as i64)
        }
    }

    fn service() -> AccountService<MockProfileRepository, MockBusinessInfoRepository> {
        AccountService::new(
            Arc::new(MockProfileRepository::new()),
            Arc::new(MockBusinessInfoRepository::new()),
            PasswordService::new(),
            Arc::new(JwtService::new("test-secret-key-12345", 3600)),
        )
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let svc = service();

        let registered = svc
            .register("User@Example.com", "secret-password", Some("Kim".to_string()))
            .await
            .unwrap();

        // Email is normalized at registration
        assert_eq!(registered.profile.email, "user@example.com");
        assert_eq!(registered.profile.role, ProfileRole::Customer);
        assert_eq!(registered.profile.credit_balance, 0);
        assert!(!registered.token.is_empty());

        let logged_in = svc
            .login("user@example.com", "secret-password")
            .await
            .unwrap();
        assert_eq!(logged_in.profile.id, registered.profile.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let svc = service();

        svc.register("user@example.com", "pw-one", None)
            .await
            .unwrap();

        let result = svc.register("user@example.com", "pw-two", None).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let svc = service();

        svc.register("user@example.com", "right-password", None)
            .await
            .unwrap();

        let result = svc.login("user@example.com", "wrong-password").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let svc = service();

        let result = svc.login("nobody@example.com", "whatever").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_business_info_upsert() {
        let svc = service();
        let user_id = Uuid::new_v4();

        assert!(svc.business_info(user_id).await.unwrap().is_none());

        let first = svc
            .save_business_info(
                user_id,
                BusinessInfo {
                    company_name: "숏폼컴퍼니".to_string(),
                    representative_name: "박대표".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(first.user_id, user_id);

        // Second save replaces the record instead of creating another one
        let second = svc
            .save_business_info(
                user_id,
                BusinessInfo {
                    company_name: "숏폼컴퍼니".to_string(),
                    representative_name: "박대표".to_string(),
                    tax_email: Some("tax@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.tax_email.as_deref(), Some("tax@example.com"));
    }

    #[tokio::test]
    async fn test_business_info_requires_names() {
        let svc = service();

        let result = svc
            .save_business_info(
                Uuid::new_v4(),
                BusinessInfo {
                    company_name: "  ".to_string(),
                    representative_name: "박대표".to_string(),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::MissingField(_))));
    }
}
