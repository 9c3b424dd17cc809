//! Typed update requests issued to the character store.
//!
//! Each variant names a target path/key on the persisted record plus
//! the new value; the store interprets and applies them. This crate
//! never mutates a record directly.

use serde::{Deserialize, Serialize};
use vellum_domain::{EffectId, FavoriteDescriptor, ItemId};

/// A single update request against a character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "op")]
pub enum SheetUpdate {
    /// Replace the persisted favorites array.
    Favorites { entries: Vec<FavoriteDescriptor> },
    /// Set a named field on an owned item (inline edits from the
    /// favorites panel, e.g. remaining uses).
    ItemField {
        item_id: ItemId,
        field: String,
        value: serde_json::Value,
    },
    /// Activate an owned item (consume a use, roll, etc. - interpreted
    /// by the rules layer behind the store).
    UseItem { item_id: ItemId },
    /// Toggle an owned effect on or off.
    EffectDisabled { effect_id: EffectId, disabled: bool },
    /// Set the remaining value of a spell-slot pool.
    SpellSlotValue { pool_id: String, value: u32 },
    /// Set the remaining value of a legacy resource slot.
    ResourceValue { key: String, value: f64 },
    /// Set the exhaustion level.
    Exhaustion { level: u8 },
    /// Toggle inspiration.
    Inspiration { value: bool },
    /// Change the primary spellcasting ability.
    SpellcastingAbility { ability: String },
}

impl SheetUpdate {
    /// Short label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Favorites { .. } => "favorites",
            Self::ItemField { .. } => "itemField",
            Self::UseItem { .. } => "useItem",
            Self::EffectDisabled { .. } => "effectDisabled",
            Self::SpellSlotValue { .. } => "spellSlotValue",
            Self::ResourceValue { .. } => "resourceValue",
            Self::Exhaustion { .. } => "exhaustion",
            Self::Inspiration { .. } => "inspiration",
            Self::SpellcastingAbility { .. } => "spellcastingAbility",
        }
    }
}
