//! Entity trait: identity + continuity across state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Creation/modification metadata carried by every persisted entity.
///
/// `created_at` never changes after construction. `active` is the soft-delete
/// flag: deactivated entities are retained by stores (their identifiers stay
/// retired) but excluded from every read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

impl Audit {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            active: true,
        }
    }

    /// Record a modification.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Soft delete.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_audit_is_active() {
        let audit = Audit::new(Utc::now());
        assert!(audit.active);
        assert_eq!(audit.created_at, audit.updated_at);
    }

    #[test]
    fn touch_keeps_created_at() {
        let created = Utc::now();
        let mut audit = Audit::new(created);
        let later = created + chrono::Duration::seconds(5);

        audit.touch(later);

        assert_eq!(audit.created_at, created);
        assert_eq!(audit.updated_at, later);
        assert!(audit.active);
    }

    #[test]
    fn deactivate_clears_active_and_touches() {
        let created = Utc::now();
        let mut audit = Audit::new(created);
        let later = created + chrono::Duration::seconds(5);

        audit.deactivate(later);

        assert!(!audit.active);
        assert_eq!(audit.updated_at, later);
    }
}
