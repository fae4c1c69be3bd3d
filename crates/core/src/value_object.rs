//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two value
/// objects with the same attribute values are equal. To "modify" one, create
/// a new one. Contrast with entities, which are identified by an ID.
///
/// Example: a normalized product name is a value object; a list item (which
/// has an `ItemId`) is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
