//! Entity-component world
//!
//! Entities are identities with a closed set of optional typed component
//! slots, owned exclusively by the [`store::EntityStore`].

pub mod components;
pub mod store;

pub use components::{Ai, AiKind, Attack, AttackKind, Fighter, Position, Renderable};
pub use store::{Entity, EntityStore};
