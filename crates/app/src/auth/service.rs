//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, NewAccount,
        codes::{generate_validation_code, normalize_validation_code},
        format_session_token, generate_session_secret,
        models::NewSession,
        parse_session_token,
        password::{hash_password, verify_password},
        repository::PgAuthRepository,
        session_verifier, verifiers_match,
    },
    database::Db,
    domain::{
        plans::{
            PgPlansRepository,
            models::{PlanStatus, PlanType},
        },
        users::{PgUsersRepository, data::NewUser, models::User},
    },
    mail::Mailer,
};

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users: PgUsersRepository,
    plans: PgPlansRepository,
    mailer: Arc<dyn Mailer>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
            plans: PgPlansRepository::new(),
            mailer,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn sign_up(&self, account: NewAccount) -> Result<User, AuthServiceError> {
        let email = account.email.trim().to_lowercase();

        if account.name.trim().is_empty() || email.is_empty() || account.password.is_empty() {
            return Err(AuthServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        if self.users.find_by_email(&mut tx, &email).await?.is_some() {
            return Err(AuthServiceError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(&account.password)?;

        let user = self
            .users
            .create_user(
                &mut tx,
                NewUser {
                    name: account.name.trim().to_string(),
                    email,
                    password_hash,
                    can_create_business: account.can_create_business.unwrap_or(true),
                },
            )
            .await?;

        self.plans
            .create_entry(&mut tx, user.uuid, PlanType::Free, PlanStatus::Current, None)
            .await?;

        let code = generate_validation_code();

        self.repository
            .create_validation_code(&mut tx, user.uuid, &code)
            .await?;

        // Delivery failure rolls the registration back.
        self.mailer.send_validation_code(&user.email, &code).await?;

        tx.commit().await?;

        tracing::info!(user = %user.uuid, "user registered");

        Ok(user)
    }

    async fn validate(&self, email: &str, code: &str) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_by_email(&mut tx, email.trim())
            .await?
            .ok_or(AuthServiceError::UnknownUser)?;

        let consumed = self
            .repository
            .consume_validation_code(&mut tx, user.uuid, &normalize_validation_code(code))
            .await?;

        if consumed == 0 {
            return Err(AuthServiceError::UnknownValidationCode);
        }

        self.users.set_validated(&mut tx, user.uuid).await?;

        let user = self.users.get_user(&mut tx, user.uuid).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_by_email(&mut tx, email.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let password_hash = self.repository.password_hash(&mut tx, user.uuid).await?;

        if !verify_password(password, &password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !user.validated {
            return Err(AuthServiceError::NotValidated);
        }

        let session_uuid = Uuid::now_v7();
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, &secret);

        self.repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: user.uuid,
                    token_hash: session_verifier(&session_uuid, &user.uuid, &secret),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(IssuedSession { token, user })
    }

    async fn sign_out(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_session(&mut tx, parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier = session_verifier(&parsed.session_uuid, &session.user_uuid, &parsed.secret);

        if !verifiers_match(&session.token_hash, &verifier) {
            return Err(AuthServiceError::NotFound);
        }

        self.repository
            .delete_session(&mut tx, parsed.session_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_session(&mut tx, parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier = session_verifier(&parsed.session_uuid, &session.user_uuid, &parsed.secret);

        if !verifiers_match(&session.token_hash, &verifier) {
            return Err(AuthServiceError::NotFound);
        }

        self.repository
            .touch_session(&mut tx, parsed.session_uuid)
            .await?;

        let user = self.users.get_user(&mut tx, session.user_uuid).await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers an account and mails it a validation code.
    async fn sign_up(&self, account: NewAccount) -> Result<User, AuthServiceError>;

    /// Marks the account as validated by consuming one of its codes.
    async fn validate(&self, email: &str, code: &str) -> Result<User, AuthServiceError>;

    /// Opens a session for a validated account.
    async fn sign_in(&self, email: &str, password: &str)
    -> Result<IssuedSession, AuthServiceError>;

    /// Closes the session the token belongs to.
    async fn sign_out(&self, bearer_token: &str) -> Result<(), AuthServiceError>;

    /// Resolves a session token to its user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{plans::models::PlanType, users::UsersService},
        mail::{MailError, MockMailer},
        test::TestContext,
    };

    use super::*;

    fn account(email: &str) -> NewAccount {
        NewAccount {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
            can_create_business: None,
        }
    }

    #[tokio::test]
    async fn sign_up_registers_unvalidated_user_on_free_plan() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.auth.sign_up(account("Ana@Example.com")).await?;

        assert_eq!(user.email, "ana@example.com");
        assert!(!user.validated);
        assert!(user.can_create_business);

        let history = ctx.users.plan_history(user.uuid).await?;

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].plan_type, PlanType::Free);
        assert_eq!(history[0].status, PlanStatus::Current);

        Ok(())
    }

    #[tokio::test]
    async fn sign_up_duplicate_email_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.sign_up(account("ana@example.com")).await?;

        let result = ctx.auth.sign_up(account("ANA@example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::EmailAlreadyRegistered)),
            "expected EmailAlreadyRegistered, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn sign_up_mails_the_stored_code() -> TestResult {
        let test_ctx = TestContext::new().await;

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_validation_code()
            .once()
            .withf(|email, code| email == "ana@example.com" && code.len() == 4)
            .return_once(|_, _| Ok(()));

        let auth = PgAuthService::new(test_ctx.db(), Arc::new(mailer));

        auth.sign_up(account("ana@example.com")).await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_delivery_rolls_back_the_registration() -> TestResult {
        let test_ctx = TestContext::new().await;

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_validation_code()
            .once()
            .return_once(|_, _| Err(MailError::Delivery("smtp down".to_string())));

        let auth = PgAuthService::new(test_ctx.db(), Arc::new(mailer));

        let result = auth.sign_up(account("ana@example.com")).await;

        assert!(matches!(result, Err(AuthServiceError::Mail(_))));

        let retry = test_ctx.auth.sign_up(account("ana@example.com")).await;

        assert!(retry.is_ok(), "registration should not have persisted");

        Ok(())
    }

    #[tokio::test]
    async fn validate_with_the_mailed_code_validates_the_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.auth.sign_up(account("ana@example.com")).await?;
        let code = ctx.validation_code(user.uuid).await;

        let validated = ctx
            .auth
            .validate("ana@example.com", &code.to_lowercase())
            .await?;

        assert!(validated.validated);

        let reused = ctx.auth.validate("ana@example.com", &code).await;

        assert!(
            matches!(reused, Err(AuthServiceError::UnknownValidationCode)),
            "a code is consumed on use, got {reused:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_unknown_email_returns_unknown_user() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.validate("nobody@example.com", "ABCD").await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }

    #[tokio::test]
    async fn sign_in_requires_validation() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.sign_up(account("ana@example.com")).await?;

        let result = ctx.auth.sign_in("ana@example.com", "s3cret-pass").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotValidated)),
            "expected NotValidated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn sign_in_wrong_password_is_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.signed_up_and_validated("ana@example.com", "s3cret-pass")
            .await?;

        let result = ctx.auth.sign_in("ana@example.com", "wrong").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issued_token_authenticates_until_signed_out() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .signed_up_and_validated("ana@example.com", "s3cret-pass")
            .await?;

        let session = ctx.auth.sign_in("ana@example.com", "s3cret-pass").await?;

        assert_eq!(session.user.uuid, user.uuid);

        let authenticated = ctx.auth.authenticate_bearer(&session.token).await?;

        assert_eq!(authenticated.uuid, user.uuid);

        ctx.auth.sign_out(&session.token).await?;

        let after = ctx.auth.authenticate_bearer(&session.token).await;

        assert!(matches!(after, Err(AuthServiceError::NotFound)));

        let twice = ctx.auth.sign_out(&session.token).await;

        assert!(matches!(twice, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_does_not_authenticate() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.signed_up_and_validated("ana@example.com", "s3cret-pass")
            .await?;

        let session = ctx.auth.sign_in("ana@example.com", "s3cret-pass").await?;

        let (id, secret) = session.token.split_once('.').ok_or("token without secret")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{id}.{flipped}{}", &secret[1..]);

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_does_not_authenticate() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }
}
