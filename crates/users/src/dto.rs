//! Request/response shapes and explicit mapping.
//!
//! The identifier never appears in request payloads: it is server-assigned
//! by the issuer. Mapping is a plain function, not reflection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::{User, UserId};

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

/// Partial-update payload; `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Response shape for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id_typed(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().as_str().to_string(),
            phone_number: user.phone_number().map(|p| p.as_str().to_string()),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usermgmt_core::IdIssuer;

    fn sample_user(phone: Option<&str>) -> User {
        let payload = NewUser {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: phone.map(str::to_string),
        };
        let id = UserId::new(IdIssuer::new().generate().unwrap());
        User::register(id, &payload, Utc::now()).unwrap()
    }

    #[test]
    fn from_user_maps_every_field() {
        let user = sample_user(Some("+12025550143"));
        let dto = UserDto::from_user(&user);

        assert_eq!(dto.id, user.id_typed());
        assert_eq!(dto.first_name, "Alice");
        assert_eq!(dto.last_name, "Smith");
        assert_eq!(dto.email, "alice@example.com");
        assert_eq!(dto.phone_number.as_deref(), Some("+12025550143"));
        assert_eq!(dto.created_at, user.created_at());
    }

    #[test]
    fn dto_serializes_id_in_canonical_form() {
        let user = sample_user(None);
        let json = serde_json::to_value(UserDto::from_user(&user)).unwrap();

        assert_eq!(
            json["id"].as_str().unwrap(),
            user.id_typed().to_string()
        );
        // Absent phone numbers are omitted, not null.
        assert!(json.get("phone_number").is_none());
    }
}
