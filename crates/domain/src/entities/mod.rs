//! Entities owned by the character document.

mod character;
mod effect;
mod item;

pub use character::{AbilityScore, CharacterRecord, ResourceSlot, SkillEntry, SlotState};
pub use effect::Effect;
pub use item::Item;
