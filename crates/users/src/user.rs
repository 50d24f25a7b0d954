use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use usermgmt_core::{Audit, DomainError, DomainResult, Entity, EntityId, ValueObject};

use crate::dto::{NewUser, UserUpdate};

const FIRST_NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;

/// User identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub EntityId);

impl UserId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Email address, normalized to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and normalize.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("email must not be blank"));
        }
        if normalized.len() > EMAIL_MAX {
            return Err(DomainError::validation("email must not exceed 254 characters"));
        }
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(DomainError::validation("email must be valid"));
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(DomainError::validation("email must be valid"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phone number: an optional leading `+` followed by 10-15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        let valid = (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
        if !valid {
            return Err(DomainError::validation("phone number must be valid"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PhoneNumber {}

/// A registered user.
///
/// # Invariants
/// - `id` is assigned by the identifier issuer at registration and never
///   mutated afterwards.
/// - `email` is unique across active users (enforced by the service against
///   the store before every write that changes it).
/// - Deactivated users are invisible to lookups; their identifiers are
///   retired, never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: Email,
    phone_number: Option<PhoneNumber>,
    audit: Audit,
}

impl User {
    /// Validate a registration payload and construct the user.
    pub fn register(id: UserId, new_user: &NewUser, now: DateTime<Utc>) -> DomainResult<Self> {
        let first_name = validate_first_name(&new_user.first_name)?;
        let last_name = validate_last_name(&new_user.last_name)?;
        let email = Email::parse(&new_user.email)?;
        let phone_number = new_user
            .phone_number
            .as_deref()
            .map(PhoneNumber::parse)
            .transpose()?;

        Ok(Self {
            id,
            first_name,
            last_name,
            email,
            phone_number,
            audit: Audit::new(now),
        })
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.audit.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.audit.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.audit.active
    }

    /// Apply a partial update: only supplied fields overwrite.
    ///
    /// Every supplied field is validated before any is assigned, so a
    /// rejected update leaves the user unchanged.
    pub fn apply_update(&mut self, changes: &UserUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        let first_name = changes
            .first_name
            .as_deref()
            .map(validate_first_name)
            .transpose()?;
        let last_name = changes
            .last_name
            .as_deref()
            .map(validate_last_name)
            .transpose()?;
        let email = changes.email.as_deref().map(Email::parse).transpose()?;
        let phone_number = changes
            .phone_number
            .as_deref()
            .map(PhoneNumber::parse)
            .transpose()?;

        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = Some(phone_number);
        }
        self.audit.touch(now);
        Ok(())
    }

    /// Soft delete. The identifier stays retired.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.audit.deactivate(now);
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_first_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("first name must not be blank"));
    }
    if name.chars().count() > FIRST_NAME_MAX {
        return Err(DomainError::validation(
            "first name must not exceed 100 characters",
        ));
    }
    Ok(name.to_string())
}

fn validate_last_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("last name must not be blank"));
    }
    Ok(name.to_string())
}
