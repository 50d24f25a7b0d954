//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two value
/// objects with the same attribute values are equal, unlike entities, which
/// are the same only when their identifiers match. To "modify" a value
/// object, construct a new one; validation happens in the constructor so an
/// instance is valid by construction.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
