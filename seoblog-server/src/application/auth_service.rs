use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::info;

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User, ValidRegistration};
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct LoginResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    /// Creates an account. No token is issued; clients log in separately.
    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_username(&req.username).await?.is_some() {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;
        let user = self.repo.create_user(into_new_user(req, password_hash)).await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<LoginResult, DomainError> {
        let req = req.validate()?;

        let Some(creds) = self.repo.find_by_username(&req.username).await? else {
            // burn the same argon2 work for unknown users
            match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                Ok(()) | Err(DomainError::InvalidCredentials) => {}
                Err(err) => return Err(err),
            }
            return Err(DomainError::InvalidCredentials);
        };

        self.verify_password(&req.password, &creds.password_hash)?;

        let access_token = self
            .jwt
            .generate_token(creds.user.id, &creds.user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(LoginResult {
            user: creds.user,
            access_token,
        })
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })
    }
}

fn into_new_user(req: ValidRegistration, password_hash: String) -> NewUser {
    NewUser {
        username: req.username,
        email: req.email,
        password_hash,
    }
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params = Params::new(19 * 1024, 2, 1, None)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        existing: Arc<Mutex<Option<UserCredentials>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                existing: Arc::new(Mutex::new(None)),
                create_user_out,
            }
        }

        fn set_existing(&self, creds: Option<UserCredentials>) {
            *self.existing.lock().expect("existing mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self.existing.lock().expect("existing mutex poisoned").clone())
        }
    }

    fn register_request(username: &str, email: Option<&str>, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_string()),
            email: email.map(str::to_string),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_creates_user() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let user = service
            .register(register_request(
                "  valid_user  ",
                Some("  VALID@EXAMPLE.COM  "),
                "very-secure-password",
            ))
            .await
            .expect("register must succeed");

        assert_eq!(user.username, "valid_user");

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.username, "valid_user");
        assert_eq!(created.email.as_deref(), Some("valid@example.com"));
        assert!(created.password_hash.starts_with("$argon2id$"));
        assert_ne!(created.password_hash, "very-secure-password");
    }

    #[tokio::test]
    async fn register_rejects_taken_username_without_touching_it() {
        let repo = FakeUserRepo::new(sample_user(2, "taken"));
        repo.set_existing(Some(UserCredentials {
            user: sample_user(1, "taken"),
            password_hash: "stored-hash".to_string(),
        }));
        let service = AuthService::new(repo.clone(), test_jwt());

        let err = service
            .register(register_request("taken", None, "another-password"))
            .await
            .expect_err("duplicate must fail");

        assert!(matches!(err, DomainError::AlreadyExists(ref what) if what == "username"));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn register_requires_password() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let req = RegisterRequest {
            username: Some("valid_user".to_string()),
            email: None,
            password: None,
        };
        let err = service.register(req).await.expect_err("must fail");

        assert!(matches!(err, DomainError::Validation { field: "password", .. }));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo, test_jwt());

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "some-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_existing(Some(UserCredentials {
            user: sample_user(1, "valid_user"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_verifiable_token_for_valid_credentials() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let jwt = test_jwt();
        let service = AuthService::new(repo.clone(), jwt.clone());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_existing(Some(UserCredentials {
            user: sample_user(1, "valid_user"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "correct-password".to_string(),
        };

        let result = service.login(req).await.expect("login must succeed");
        assert_eq!(result.user.id, 1);

        let claims = jwt
            .verify_token(&result.access_token)
            .expect("issued token must verify");
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.username, "valid_user");
    }

    fn sample_user(id: i64, username: &str) -> User {
        User::new(id, username, None, Utc::now()).expect("sample user must be valid")
    }

    fn test_jwt() -> JwtService {
        JwtService::new("0123456789abcdef0123456789abcdef", 3600)
    }
}
