use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::Address;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::Role;
use crate::domain::user::models::TaxId;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    cpf: Option<String>,
    address: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            name: PersonName::new(r.name)?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            tax_id: r.cpf.as_deref().map(TaxId::new).transpose()?,
            address: r.address.map(Address::new).transpose()?,
            role: r.role.parse()?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    email: String,
    cpf: Option<String>,
    address: Option<String>,
    role: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = UserError;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            id: UserId(r.id),
            name: PersonName::new(r.name)?,
            email: EmailAddress::new(r.email)?,
            tax_id: r.cpf.as_deref().map(TaxId::new).transpose()?,
            address: r.address.map(Address::new).transpose()?,
            role: r.role.parse::<Role>()?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, cpf, address, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, email, cpf, address, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, cpf, address, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, cpf, address, role, created_at, updated_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.tax_id.as_ref().map(|t| t.as_str()))
        .bind(user.address.as_ref().map(|a| a.as_str()))
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        User::try_from(row)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: UpdateUserCommand,
    ) -> Result<UserProfile, UserError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                cpf = COALESCE($3, cpf),
                address = COALESCE($4, address),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, cpf, address, role
            "#,
        )
        .bind(id.0)
        .bind(changes.name.as_ref().map(|n| n.as_str()))
        .bind(changes.tax_id.as_ref().map(|t| t.as_str()))
        .bind(changes.address.as_ref().map(|a| a.as_str()))
        .bind(changes.role.map(|r| r.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => UserProfile::try_from(r),
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}
