// ============================================================================
// SiteDesk Core - Authentication Service
// File: crates/sitedesk-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service: login and company self-registration.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use sitedesk_shared::utils::mask_email;

use crate::domain::{SubscriptionPlan, Tenant, User, UserRole};
use crate::error::DomainError;
use crate::repositories::{TenantRepository, UserRepository};

pub struct AuthService<U: UserRepository, T: TenantRepository> {
    user_repo: Arc<U>,
    tenant_repo: Arc<T>,
    jwt_secret: String,
    token_expiry: i64,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub tenant_id: Uuid,
    pub tenant_name: String,
}

impl<U: UserRepository, T: TenantRepository> AuthService<U, T> {
    pub fn new(user_repo: Arc<U>, tenant_repo: Arc<T>, jwt_secret: String, token_expiry: i64) -> Self {
        Self {
            user_repo,
            tenant_repo,
            jwt_secret,
            token_expiry,
        }
    }

    /// Login with username and password.
    ///
    /// Unknown user and wrong password both come back as
    /// `InvalidCredentials`; the caller learns nothing about which it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for username: {}", username);

        // 1. Find user
        let user = self.user_repo.find_by_username(username).await?.ok_or_else(|| {
            warn!("Login failed: unknown username: {}", username);
            DomainError::InvalidCredentials
        })?;

        // 2. User must be active
        if !user.can_login() {
            warn!("Login failed: user not active: {}", mask_email(&user.email));
            return Err(DomainError::UserNotActive);
        }

        // 3. Tenant must exist and be active
        let tenant = self
            .tenant_repo
            .find_by_id(&user.tenant_id)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;
        if !tenant.is_active {
            warn!("Login failed: tenant not active: {}", tenant.id);
            return Err(DomainError::TenantNotActive);
        }

        // 4. Verify password
        let password_valid =
            sitedesk_security::password::PasswordService::verify(password, &user.password_hash)
                .map_err(|_e| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&user.email));
            return Err(DomainError::InvalidCredentials);
        }

        // 5. Update last login (best effort)
        if let Err(e) = self.user_repo.record_login(&user.id, Utc::now()).await {
            error!("Failed to update last login: {}", e);
        }

        // 6. Issue token
        let token = self.issue_token(&user, &tenant)?;

        info!("Login successful for: {}", mask_email(&user.email));

        Ok(LoginResult {
            token,
            user_id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
            tenant_id: tenant.id,
            tenant_name: tenant.name,
        })
    }

    /// Self-service signup: create a new tenant on the Free plan together
    /// with its Admin user, then issue a token for that user.
    ///
    /// Email uniqueness here is global across tenants, even though every
    /// later query is tenant-scoped.
    pub async fn register(
        &self,
        company_name: &str,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        info!("Registration attempt for email: {}", mask_email(email));

        if self.user_repo.email_exists(email).await? {
            warn!("Registration failed: email already exists: {}", mask_email(email));
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = sitedesk_security::password::PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let tenant = Tenant::new(company_name.to_string(), SubscriptionPlan::Free)?;
        let admin = User::new(
            tenant.id,
            email.to_string(),
            email.to_string(),
            full_name.to_string(),
            password_hash,
            UserRole::Admin,
        )?;

        let (tenant, admin) = self.tenant_repo.create_with_admin(&tenant, &admin).await?;

        let token = self.issue_token(&admin, &tenant)?;

        info!("Registration successful for: {}", mask_email(email));

        Ok(LoginResult {
            token,
            user_id: admin.id,
            username: admin.username,
            full_name: admin.full_name,
            role: admin.role,
            tenant_id: tenant.id,
            tenant_name: tenant.name,
        })
    }

    fn issue_token(&self, user: &User, tenant: &Tenant) -> Result<String, DomainError> {
        let jwt = sitedesk_security::jwt::JwtService::new(self.jwt_secret.clone(), self.token_expiry);
        jwt.generate_token(
            &user.id,
            &user.full_name,
            &user.email,
            user.role.as_str(),
            &tenant.id,
            &tenant.name,
        )
        .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::tenant_repository::MockTenantRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use sitedesk_security::jwt::JwtService;
    use sitedesk_security::password::PasswordService;

    const SECRET: &str = "test-secret";
    const EXPIRY: i64 = 28_800;

    fn tenant() -> Tenant {
        Tenant::new("Acme Builders".to_string(), SubscriptionPlan::Free).unwrap()
    }

    fn user_in(tenant: &Tenant, password: &str) -> User {
        User::new(
            tenant.id,
            "admin".to_string(),
            "admin@acme.test".to_string(),
            "Site Admin".to_string(),
            PasswordService::hash(password).unwrap(),
            UserRole::Admin,
        )
        .unwrap()
    }

    fn service(
        users: MockUserRepository,
        tenants: MockTenantRepository,
    ) -> AuthService<MockUserRepository, MockTenantRepository> {
        AuthService::new(Arc::new(users), Arc::new(tenants), SECRET.to_string(), EXPIRY)
    }

    #[tokio::test]
    async fn login_issues_token_with_tenant_claim() {
        let tenant = tenant();
        let user = user_in(&tenant, "admin");
        let tenant_id = tenant.id;

        let mut users = MockUserRepository::new();
        let u = user.clone();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(u.clone())));
        users.expect_record_login().returning(|_, _| Ok(()));

        let mut tenants = MockTenantRepository::new();
        let t = tenant.clone();
        tenants.expect_find_by_id().returning(move |_| Ok(Some(t.clone())));

        let result = service(users, tenants).login("admin", "admin").await.unwrap();

        let claims = JwtService::new(SECRET.to_string(), EXPIRY)
            .validate_token(&result.token)
            .unwrap();
        assert_eq!(claims.tenant_id, tenant_id);
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.sub, user.id.to_string());
    }

    #[tokio::test]
    async fn login_rejects_unknown_user_and_wrong_password_identically() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        let tenants = MockTenantRepository::new();
        let err = service(users, tenants).login("ghost", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));

        let tenant = tenant();
        let user = user_in(&tenant, "right-password");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tenant.clone())));
        let err = service(users, tenants)
            .login("admin", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_inactive_user() {
        let tenant = tenant();
        let mut user = user_in(&tenant, "admin");
        user.is_active = false;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let tenants = MockTenantRepository::new();

        let err = service(users, tenants).login("admin", "admin").await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotActive));
    }

    #[tokio::test]
    async fn login_rejects_inactive_tenant() {
        let mut tenant = tenant();
        let user = user_in(&tenant, "admin");
        tenant.soft_delete();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tenant.clone())));

        let err = service(users, tenants).login("admin", "admin").await.unwrap_err();
        assert!(matches!(err, DomainError::TenantNotActive));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(true));
        let tenants = MockTenantRepository::new();

        let err = service(users, tenants)
            .register("Acme Builders", "Site Admin", "admin@acme.test", "password1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn register_creates_free_tenant_with_admin_user() {
        let mut users = MockUserRepository::new();
        users.expect_email_exists().returning(|_| Ok(false));
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_create_with_admin()
            .returning(|t, u| Ok((t.clone(), u.clone())));

        let result = service(users, tenants)
            .register("Acme Builders", "Site Admin", "admin@acme.test", "password1")
            .await
            .unwrap();

        assert_eq!(result.role, UserRole::Admin);
        assert_eq!(result.tenant_name, "Acme Builders");
        let claims = JwtService::new(SECRET.to_string(), EXPIRY)
            .validate_token(&result.token)
            .unwrap();
        assert_eq!(claims.tenant_id, result.tenant_id);
    }
}
