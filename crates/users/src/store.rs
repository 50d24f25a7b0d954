//! The user persistence boundary and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use usermgmt_core::{DomainError, DomainResult};

use crate::user::{Email, User, UserId};

/// Pagination parameters for listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Offset for pagination (0-based).
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50, // Safe default
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(50).min(1000), // Cap at 1000 for safety
            offset: offset.unwrap_or(0),
        }
    }
}

/// Paginated listing result.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The records in this page.
    pub items: Vec<T>,
    /// Total number of matching records (across all pages).
    pub total: u64,
    /// Whether more records are available.
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            has_more: self.has_more,
        }
    }
}

/// Persistence boundary for users.
///
/// Reads see active users only. Deactivated records are retained by
/// implementations so their identifiers stay retired.
pub trait UserStore: Send + Sync {
    /// Persist a newly registered user.
    fn insert(&self, user: User) -> DomainResult<()>;

    /// Persist an updated user (including deactivation).
    fn save(&self, user: User) -> DomainResult<()>;

    /// Look up an active user.
    fn find(&self, id: UserId) -> Option<User>;

    /// Whether any active user holds this email.
    fn email_in_use(&self, email: &Email) -> bool;

    /// Active users, ordered by creation time.
    fn list(&self, page: Pagination) -> Page<User>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn insert(&self, user: User) -> DomainResult<()> {
        (**self).insert(user)
    }

    fn save(&self, user: User) -> DomainResult<()> {
        (**self).save(user)
    }

    fn find(&self, id: UserId) -> Option<User> {
        (**self).find(id)
    }

    fn email_in_use(&self, email: &Email) -> bool {
        (**self).email_in_use(email)
    }

    fn list(&self, page: Pagination) -> Page<User> {
        (**self).list(page)
    }
}

/// In-memory user store for tests/dev.
///
/// Keyed by id; time-ordered identifiers make the key order the creation
/// order, so listings come straight out of the map.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> DomainResult<()> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = user.id_typed();
        if map.contains_key(&id) {
            return Err(DomainError::duplicate(format!(
                "user already exists with id: {id}"
            )));
        }
        map.insert(id, user);
        Ok(())
    }

    fn save(&self, user: User) -> DomainResult<()> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = user.id_typed();
        if !map.contains_key(&id) {
            return Err(DomainError::not_found());
        }
        map.insert(id, user);
        Ok(())
    }

    fn find(&self, id: UserId) -> Option<User> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&id).filter(|u| u.is_active()).cloned()
    }

    fn email_in_use(&self, email: &Email) -> bool {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.values().any(|u| u.is_active() && u.email() == email)
    }

    fn list(&self, page: Pagination) -> Page<User> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let active: Vec<&User> = map.values().filter(|u| u.is_active()).collect();
        let total = active.len() as u64;

        let items: Vec<User> = active
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();

        Page {
            items,
            total,
            has_more: u64::from(page.offset) + u64::from(page.limit) < total,
        }
    }
}
