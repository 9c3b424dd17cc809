//! Active effect entity - a temporary condition or buff on the character.

use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteData;
use crate::ids::{EffectId, ItemId};

/// An active effect owned by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    id: EffectId,
    name: String,
    img: String,
    /// Whether the user has toggled the effect off
    disabled: bool,
    /// Whether the effect's activation requirements are currently unmet
    /// (e.g. the granting item is unequipped or unattuned)
    suppressed: bool,
    /// Remaining-duration label parts (e.g. ["2 rounds"])
    #[serde(default)]
    duration: Vec<String>,
    /// The item this effect originates from, if any
    origin_item: Option<ItemId>,
}

impl Effect {
    /// Create a new enabled effect.
    pub fn new(name: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            id: EffectId::new(),
            name: name.into(),
            img: img.into(),
            disabled: false,
            suppressed: false,
            duration: Vec::new(),
            origin_item: None,
        }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn img(&self) -> &str {
        &self.img
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn duration(&self) -> &[String] {
        &self.duration
    }

    pub fn origin_item(&self) -> Option<ItemId> {
        self.origin_item
    }

    // Builder-style methods

    /// Mark the effect as toggled off.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark the effect's requirements as unmet.
    pub fn with_suppressed(mut self, suppressed: bool) -> Self {
        self.suppressed = suppressed;
        self
    }

    /// Set the remaining-duration label parts.
    pub fn with_duration(mut self, parts: Vec<String>) -> Self {
        self.duration = parts;
        self
    }

    /// Link the effect to the item that granted it.
    pub fn with_origin_item(mut self, item_id: ItemId) -> Self {
        self.origin_item = Some(item_id);
        self
    }

    /// Flip the disabled toggle.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The uniform display bundle for the favorites panel.
    ///
    /// The toggle is the inverse of `disabled`; suppression is flagged
    /// so the projector can substitute the subtitle.
    pub fn favorite_data(&self) -> Option<FavoriteData> {
        Some(FavoriteData {
            title: self.name.clone(),
            subtitle: self.duration.clone(),
            img: self.img.clone(),
            toggle: Some(!self.disabled),
            suppressed: self.suppressed,
            ..FavoriteData::default()
        })
    }
}
