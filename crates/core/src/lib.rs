//! `listwise-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the shopping-list
//! crates (no infrastructure concerns, no IO).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod item;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, ListId, UserId};
pub use item::ListItem;
pub use value_object::ValueObject;
