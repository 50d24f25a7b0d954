//! User service: registration, lookup, listing, partial update, soft delete.

use chrono::Utc;
use tracing::{info, warn};

use usermgmt_core::{DomainError, DomainResult, IdIssuer};

use crate::dto::{NewUser, UserDto, UserUpdate};
use crate::store::{Page, Pagination, UserStore};
use crate::user::{Email, User, UserId};

/// Application service for user management.
///
/// Both dependencies are passed in explicitly. The issuer assigns every new
/// user identifier immediately before the first write; callers never supply
/// one. Raw identifier strings from the request layer enter through
/// [`UserService::resolve_id`] only.
#[derive(Debug, Clone)]
pub struct UserService<S> {
    store: S,
    ids: IdIssuer,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S, ids: IdIssuer) -> Self {
        Self { store, ids }
    }

    /// Register a new user.
    pub fn create_user(&self, new_user: &NewUser) -> DomainResult<UserDto> {
        info!("create a new user");

        let email = Email::parse(&new_user.email)?;
        if self.store.email_in_use(&email) {
            warn!(%email, "registration rejected: email in use");
            return Err(DomainError::duplicate(format!(
                "user already exists with email: {email}"
            )));
        }

        let id = UserId::new(self.ids.generate()?);
        let user = User::register(id, new_user, Utc::now())?;
        self.store.insert(user.clone())?;

        info!(user_id = %id, "user created");
        Ok(UserDto::from_user(&user))
    }

    /// Fetch a user by id.
    pub fn get_user(&self, user_id: UserId) -> DomainResult<UserDto> {
        info!(%user_id, "get a user by id");
        Ok(UserDto::from_user(&self.find_user(user_id)?))
    }

    /// List active users, ordered by creation time.
    pub fn list_users(&self, page: Pagination) -> Page<UserDto> {
        info!(limit = page.limit, offset = page.offset, "get all users");
        self.store.list(page).map(|user| UserDto::from_user(&user))
    }

    /// Apply a partial update.
    pub fn update_user(&self, user_id: UserId, changes: &UserUpdate) -> DomainResult<UserDto> {
        info!(%user_id, "update a user");
        let mut user = self.find_user(user_id)?;

        if let Some(raw) = changes.email.as_deref() {
            let email = Email::parse(raw)?;
            if email != *user.email() && self.store.email_in_use(&email) {
                warn!(%user_id, %email, "update rejected: email in use");
                return Err(DomainError::duplicate(format!(
                    "user already exists with email: {email}"
                )));
            }
        }

        user.apply_update(changes, Utc::now())?;
        self.store.save(user.clone())?;
        Ok(UserDto::from_user(&user))
    }

    /// Soft-delete a user. The identifier is retired, never reassigned.
    pub fn delete_user(&self, user_id: UserId) -> DomainResult<()> {
        info!(%user_id, "delete user by id");
        let mut user = self.find_user(user_id)?;
        user.deactivate(Utc::now());
        self.store.save(user)
    }

    /// Validate a raw, externally supplied identifier string.
    ///
    /// The sole gate between path/query input and lookup keys.
    pub fn resolve_id(&self, raw: &str) -> DomainResult<UserId> {
        Ok(UserId::new(self.ids.parse(raw)?))
    }

    fn find_user(&self, user_id: UserId) -> DomainResult<User> {
        self.store.find(user_id).ok_or_else(DomainError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;
    use std::sync::Arc;

    fn service() -> UserService<Arc<InMemoryUserStore>> {
        UserService::new(Arc::new(InMemoryUserStore::new()), IdIssuer::new())
    }

    fn alice() -> NewUser {
        NewUser {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: Some("+12025550143".to_string()),
        }
    }

    fn bob() -> NewUser {
        NewUser {
            first_name: "Bob".to_string(),
            last_name: "Jones".to_string(),
            email: "bob@example.com".to_string(),
            phone_number: None,
        }
    }

    #[test]
    fn create_user_assigns_server_side_id() {
        let service = service();
        let created = service.create_user(&alice()).unwrap();

        let fetched = service.get_user(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn create_user_rejects_duplicate_email() {
        let service = service();
        service.create_user(&alice()).unwrap();

        let mut same_email = bob();
        same_email.email = "Alice@Example.com".to_string();

        let err = service.create_user(&same_email).unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn get_user_rejects_unknown_id() {
        let service = service();
        let unknown = service
            .resolve_id("550e8400-e29b-41d4-a716-446655440000")
            .unwrap();

        let err = service.get_user(unknown).unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn update_user_applies_partial_changes() {
        let service = service();
        let created = service.create_user(&alice()).unwrap();

        let changes = UserUpdate {
            last_name: Some("Carter".to_string()),
            ..UserUpdate::default()
        };
        let updated = service.update_user(created.id, &changes).unwrap();

        assert_eq!(updated.last_name, "Carter");
        assert_eq!(updated.first_name, "Alice");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_user_rejects_email_already_in_use() {
        let service = service();
        service.create_user(&alice()).unwrap();
        let other = service.create_user(&bob()).unwrap();

        let changes = UserUpdate {
            email: Some("alice@example.com".to_string()),
            ..UserUpdate::default()
        };
        let err = service.update_user(other.id, &changes).unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn update_user_allows_keeping_own_email() {
        let service = service();
        let created = service.create_user(&alice()).unwrap();

        let changes = UserUpdate {
            email: Some("ALICE@example.com".to_string()),
            first_name: Some("Alicia".to_string()),
            ..UserUpdate::default()
        };
        let updated = service.update_user(created.id, &changes).unwrap();
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.first_name, "Alicia");
    }

    #[test]
    fn delete_user_is_soft_and_retires_the_id() {
        let service = service();
        let created = service.create_user(&alice()).unwrap();

        service.delete_user(created.id).unwrap();

        assert!(matches!(
            service.get_user(created.id),
            Err(DomainError::NotFound)
        ));
        assert!(matches!(
            service.delete_user(created.id),
            Err(DomainError::NotFound)
        ));

        // The email frees up, but the old id stays dead.
        let recreated = service.create_user(&alice()).unwrap();
        assert_ne!(recreated.id, created.id);
    }

    #[test]
    fn list_users_pages_in_creation_order() {
        let service = service();
        let first = service.create_user(&alice()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = service.create_user(&bob()).unwrap();

        let page = service.list_users(Pagination::default());
        assert_eq!(page.total, 2);
        assert_eq!(
            page.items.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        let window = service.list_users(Pagination {
            limit: 1,
            offset: 1,
        });
        assert_eq!(window.items.len(), 1);
        assert_eq!(window.items[0].id, second.id);
        assert!(!window.has_more);
    }

    #[test]
    fn resolve_id_rejects_malformed_input() {
        let service = service();
        for raw in ["", "not-a-uuid", "550e8400e29b41d4a716446655440000"] {
            let err = service.resolve_id(raw).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidId(_)),
                "expected InvalidId for {raw:?}"
            );
        }
    }

    #[test]
    fn resolve_id_normalizes_case() {
        let service = service();
        let id = service
            .resolve_id("550E8400-E29B-41D4-A716-446655440000")
            .unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }
}
