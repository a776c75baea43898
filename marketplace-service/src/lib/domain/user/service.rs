use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RolePolicy;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Argon2 work runs on the blocking pool so request handling threads are
/// not held for the duration of a hash.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    role_policy: RolePolicy,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    /// * `role_policy` - Role assignment for new accounts
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        role_policy: RolePolicy,
    ) -> Self {
        Self {
            repository,
            authenticator,
            role_policy,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        let hashed = tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?;

        Ok(hashed?)
    }

    fn issue_token(&self, user: &User) -> Result<String, UserError> {
        let claims = self.authenticator.claims_for(
            user.id.0,
            user.email.as_str(),
            user.role.as_str(),
        );

        Ok(self.authenticator.generate_token(&claims)?)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError> {
        let password_hash = self.hash_password(command.password).await?;
        let role = self.role_policy.role_for(&command.email);

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
                tax_id: command.tax_id,
                address: command.address,
                role,
            })
            .await?;

        let token = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(AuthSession { user, token })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let LoginCommand { email, password } = command;

        let Some(user) = self.repository.find_by_email(email.as_str()).await? else {
            tracing::warn!(email = %email, "Login rejected: unknown email");
            let authenticator = Arc::clone(&self.authenticator);
            tokio::task::spawn_blocking(move || authenticator.reject_unknown_account(&password))
                .await
                .map_err(|e| {
                    UserError::Unknown(format!("Password verification task failed: {}", e))
                })?;
            return Err(UserError::InvalidCredentials);
        };

        let claims = self.authenticator.claims_for(
            user.id.0,
            user.email.as_str(),
            user.role.as_str(),
        );
        let authenticator = Arc::clone(&self.authenticator);
        let password_hash = user.password_hash.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, &claims)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match outcome {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(AuthSession {
                    user,
                    token: result.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<UserProfile, UserError> {
        if command.is_empty() {
            return self.get_profile(id).await;
        }

        let role_change = command.role;
        let profile = self.repository.update(id, command).await?;

        tracing::info!(
            user_id = %profile.id,
            role_changed = role_change.is_some(),
            "User updated"
        );

        Ok(profile)
    }
}
