//! Vellum Domain - character document types, the favorites collection,
//! and read-only reference tables.
//!
//! This crate is deliberately free of I/O, async, and logging: it holds
//! the persisted shapes, their invariants, and pure operations over
//! them. The sheet crate layers resolution, projection, and update
//! dispatch on top.

pub mod entities;
pub mod error;
pub mod favorites;
pub mod ids;
pub mod reference;
pub mod value_objects;

pub use entities::{AbilityScore, CharacterRecord, Effect, Item, ResourceSlot, SkillEntry, SlotState};
pub use error::DomainError;
pub use favorites::{FavoriteData, FavoriteDescriptor, FavoriteKind, Favorites};
pub use ids::{CharacterId, EffectId, ItemId};
pub use reference::{ProficiencyRank, SlotPool};
pub use value_objects::{
    midpoint_insert, RawModifier, RelativeRef, Sign, SignedModifier, SortUpdate, Uses, SORT_GAP,
};
