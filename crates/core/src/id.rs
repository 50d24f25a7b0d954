//! Entity identifiers and the component that issues them.
//!
//! Identifiers are assigned at creation time by an [`IdIssuer`], never by the
//! caller, and never change afterwards. Externally supplied identifier strings
//! (path/query parameters and the like) must go through [`IdIssuer::parse`]
//! before being used as lookup keys.

use core::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::{Builder, Uuid};

/// Identifier errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Input is not the canonical 36-character hyphenated hex form.
    #[error("invalid identifier format: {0}")]
    InvalidFormat(String),

    /// The OS random source could not produce bytes.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Identifier of a persisted entity.
///
/// 128-bit, time-ordered (UUIDv7), so identifiers sort by creation time. The
/// canonical textual form is the lowercase hyphenated 36-character string
/// (8-4-4-4-12 hex groups); `Display` and [`EntityId::parse`] round-trip it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Validate and normalize an identifier string.
    ///
    /// Accepts exactly the canonical hyphenated form, case-insensitively.
    /// The shorthand forms permissive UUID parsers allow (un-hyphenated,
    /// braced, URN) are rejected.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if !is_canonical(raw) {
            return Err(IdError::InvalidFormat(raw.to_string()));
        }
        let uuid = Uuid::parse_str(raw).map_err(|e| IdError::InvalidFormat(e.to_string()))?;
        Ok(Self(uuid))
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // `Uuid` displays as the lowercase hyphenated form.
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<EntityId> for Uuid {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Hyphen positions within the canonical 8-4-4-4-12 form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

fn is_canonical(raw: &str) -> bool {
    if raw.len() != 36 {
        return false;
    }
    raw.bytes().enumerate().all(|(i, b)| {
        if HYPHENS.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}

/// Issues new entity identifiers and validates externally supplied ones.
///
/// Construct one at startup and pass it to every component that creates
/// entities. Generated identifiers are UUIDv7: a 48-bit unix-millisecond
/// timestamp followed by 74 random bits drawn from the OS entropy source.
///
/// Stateless apart from entropy consumption; a copy can be handed to any
/// number of threads without coordination.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdIssuer;

impl IdIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh identifier.
    ///
    /// Fails only with [`IdError::EntropyUnavailable`] when the OS random
    /// source is inaccessible; there is no retry semantic (a retry would
    /// simply produce a different, equally valid identifier).
    pub fn generate(&self) -> Result<EntityId, IdError> {
        let mut random = [0u8; 10];
        OsRng
            .try_fill_bytes(&mut random)
            .map_err(|e| IdError::EntropyUnavailable(e.to_string()))?;

        // Pre-epoch clocks degrade to timestamp 0; the random bits still
        // make the identifier unique.
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Ok(EntityId(
            Builder::from_unix_timestamp_millis(millis, &random).into_uuid(),
        ))
    }

    /// Validate and normalize an externally supplied identifier.
    ///
    /// This is the sole gate between raw identifier input and lookup keys.
    pub fn parse(&self, raw: &str) -> Result<EntityId, IdError> {
        EntityId::parse(raw)
    }
}
