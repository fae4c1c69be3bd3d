//! Shopping-list domain module (event-sourced).
//!
//! This crate contains the business rules for shopping lists, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). It is
//! the immediate consumer of the duplicate-detection engine: `AddItem`
//! carries the engine's suggested action and the aggregate enforces it.

pub mod list;

pub use list::{
    AddItem, CheckOffItem, CreateList, ItemAdded, ItemCheckedOff, ItemRemoved, ListCreated,
    ListCommand, ListEvent, RemoveItem, ShoppingList,
};
