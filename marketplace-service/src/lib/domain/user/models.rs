use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::AddressError;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::RoleError;
use crate::user::errors::TaxIdError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Carries the password hash, so it is only used inside the service and
/// the persistence adapter. It deliberately has no `Serialize` impl.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub tax_id: Option<TaxId>,
    pub address: Option<Address>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Restricted projection of a user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub tax_id: Option<TaxId>,
    pub address: Option<Address>,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            tax_id: user.tax_id.clone(),
            address: user.address.clone(),
            role: user.role,
        }
    }
}

/// User unique identifier type, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a person.
///
/// Between 2 and 100 characters, counted as Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser and stores the
/// lowercase form, which is the key for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322 or is too long
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        if email.len() > Self::MAX_LENGTH {
            return Err(EmailError::InvalidFormat(format!(
                "longer than {} characters",
                Self::MAX_LENGTH
            )));
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Brazilian individual tax id (CPF).
///
/// Accepts formatted (`529.982.247-25`) or bare input and keeps the
/// 11 digits. Both check digits are verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxId(String);

impl TaxId {
    const DIGITS: usize = 11;

    pub fn new(raw: &str) -> Result<Self, TaxIdError> {
        if raw
            .chars()
            .any(|c| !(c.is_ascii_digit() || c == '.' || c == '-' || c == ' '))
        {
            return Err(TaxIdError::InvalidCharacters);
        }

        let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != Self::DIGITS {
            return Err(TaxIdError::WrongLength {
                expected: Self::DIGITS,
                actual: digits.len(),
            });
        }

        // Repeated digits pass the checksum but are never issued.
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(TaxIdError::Checksum);
        }

        if Self::check_digit(&digits[..9]) != digits[9]
            || Self::check_digit(&digits[..10]) != digits[10]
        {
            return Err(TaxIdError::Checksum);
        }

        Ok(Self(digits.iter().map(|d| d.to_string()).collect()))
    }

    fn check_digit(digits: &[u32]) -> u32 {
        let weight_start = digits.len() as u32 + 1;
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| d * (weight_start - i as u32))
            .sum();

        match (sum * 10) % 11 {
            10 => 0,
            rest => rest,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text postal address, at most 500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub const MAX_LENGTH: usize = 500;

    pub fn new(address: String) -> Result<Self, AddressError> {
        let length = address.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(AddressError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authorization role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the role of a newly registered account.
///
/// The configured bootstrap email is the only way an account is created
/// as `admin`; every other registration gets `user`.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    bootstrap_admin: Option<EmailAddress>,
}

impl RolePolicy {
    pub fn new(bootstrap_admin: Option<EmailAddress>) -> Self {
        Self { bootstrap_admin }
    }

    pub fn role_for(&self, email: &EmailAddress) -> Role {
        match &self.bootstrap_admin {
            Some(admin) if admin == email => Role::Admin,
            _ => Role::User,
        }
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: PersonName,
    pub email: EmailAddress,
    /// Plain text password (hashed by the service, never stored)
    pub password: String,
    pub tax_id: Option<TaxId>,
    pub address: Option<Address>,
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Fields for inserting a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub tax_id: Option<TaxId>,
    pub address: Option<Address>,
    pub role: Role,
}

/// Administrative partial update.
///
/// Only provided fields are changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub name: Option<PersonName>,
    pub tax_id: Option<TaxId>,
    pub address: Option<Address>,
    pub role: Option<Role>,
}

impl UpdateUserCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tax_id.is_none()
            && self.address.is_none()
            && self.role.is_none()
    }
}

/// Successful registration or login: the account and its bearer token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_string() {
        assert_eq!(UserId::from_string("42"), Ok(UserId(42)));
        assert!(UserId::from_string("0").is_err());
        assert!(UserId::from_string("-3").is_err());
        assert!(UserId::from_string("abc").is_err());
    }

    #[test]
    fn test_person_name_bounds() {
        assert!(PersonName::new("Ana Silva".to_string()).is_ok());
        assert!(PersonName::new("Jo".to_string()).is_ok());
        assert_eq!(
            PersonName::new("A".to_string()),
            Err(NameError::TooShort { min: 2, actual: 1 })
        );
        assert!(PersonName::new("x".repeat(101)).is_err());
        // Counted in characters, not bytes.
        assert!(PersonName::new("é".repeat(100)).is_ok());
    }

    #[test]
    fn test_email_is_normalized_to_lowercase() {
        let email = EmailAddress::new("  Ana@X.com ".to_string()).unwrap();
        assert_eq!(email.as_str(), "ana@x.com");
    }

    #[test]
    fn test_email_rejects_invalid_format() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_tax_id_accepts_valid_cpf() {
        assert_eq!(TaxId::new("529.982.247-25").unwrap().as_str(), "52998224725");
        assert_eq!(TaxId::new("11144477735").unwrap().as_str(), "11144477735");
    }

    #[test]
    fn test_tax_id_rejects_bad_checksum() {
        assert_eq!(TaxId::new("529.982.247-26"), Err(TaxIdError::Checksum));
        assert_eq!(TaxId::new("111.111.111-11"), Err(TaxIdError::Checksum));
    }

    #[test]
    fn test_tax_id_rejects_wrong_shape() {
        assert_eq!(
            TaxId::new("1234"),
            Err(TaxIdError::WrongLength {
                expected: 11,
                actual: 4
            })
        );
        assert_eq!(TaxId::new("529a982b247"), Err(TaxIdError::InvalidCharacters));
    }

    #[test]
    fn test_address_max_length() {
        assert!(Address::new("x".repeat(500)).is_ok());
        assert!(Address::new("x".repeat(501)).is_err());
    }

    #[test]
    fn test_role_round_trip_names() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_policy_promotes_only_bootstrap_email() {
        let admin = EmailAddress::new("admin@b2bmarketplace.com".to_string()).unwrap();
        let policy = RolePolicy::new(Some(admin.clone()));

        assert_eq!(policy.role_for(&admin), Role::Admin);
        assert_eq!(
            policy.role_for(&EmailAddress::new("ana@x.com".to_string()).unwrap()),
            Role::User
        );
        assert_eq!(RolePolicy::default().role_for(&admin), Role::User);
    }
}
