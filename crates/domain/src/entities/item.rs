//! Item entity - an owned, favoritable document on the character.
//!
//! Items here are already-derived display state: uses, activation cost,
//! save DC and attack modifier arrive computed by the rules layer. The
//! sheet only reads them through the uniform favorite-data accessor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteData;
use crate::ids::ItemId;
use crate::value_objects::{RawModifier, Uses};

/// An item owned by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    name: String,
    img: String,
    /// Type label (e.g. "Weapon", "Consumable", "Feature")
    item_type: Option<String>,
    quantity: u32,
    /// Remaining/maximum uses, when the item tracks charges
    uses: Option<Uses>,
    /// Activation cost label (e.g. "1A", "1BA")
    activation: Option<String>,
    /// Save difficulty class, when the item forces a save
    save_dc: Option<i32>,
    /// Range label (e.g. "60 ft")
    range: Option<String>,
    /// Attack modifier; may arrive pre-formatted from the rules layer
    to_hit: Option<RawModifier>,
    /// Equip toggle state; `None` means the item has no toggle
    equipped: Option<bool>,
    acquired_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item with a name and icon.
    pub fn new(name: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            img: img.into(),
            item_type: None,
            quantity: 1,
            uses: None,
            activation: None,
            save_dc: None,
            range: None,
            to_hit: None,
            equipped: None,
            acquired_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn img(&self) -> &str {
        &self.img
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn uses(&self) -> Option<Uses> {
        self.uses
    }

    pub fn equipped(&self) -> Option<bool> {
        self.equipped
    }

    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    // Builder-style methods

    /// Set the type label.
    pub fn with_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Set the stack count.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the uses pool.
    pub fn with_uses(mut self, value: f64, max: f64) -> Self {
        self.uses = Some(Uses::new(value, max));
        self
    }

    /// Set the activation cost label.
    pub fn with_activation(mut self, activation: impl Into<String>) -> Self {
        self.activation = Some(activation.into());
        self
    }

    /// Set the save DC.
    pub fn with_save_dc(mut self, dc: i32) -> Self {
        self.save_dc = Some(dc);
        self
    }

    /// Set the range label.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Set the attack modifier.
    pub fn with_to_hit(mut self, to_hit: impl Into<RawModifier>) -> Self {
        self.to_hit = Some(to_hit.into());
        self
    }

    /// Give the item an equip toggle.
    pub fn with_equipped(mut self, equipped: bool) -> Self {
        self.equipped = Some(equipped);
        self
    }

    /// Flip the equip toggle, if the item has one.
    pub fn set_equipped(&mut self, equipped: bool) {
        if self.equipped.is_some() {
            self.equipped = Some(equipped);
        }
    }

    /// The uniform display bundle for the favorites panel.
    ///
    /// A toggled-off item with nothing else to show (no uses, save, or
    /// attack modifier) declines to produce data; the favorites panel
    /// drops the entry for this render.
    pub fn favorite_data(&self) -> Option<FavoriteData> {
        let bare = self.uses.is_none() && self.save_dc.is_none() && self.to_hit.is_none();
        if self.equipped == Some(false) && bare {
            return None;
        }
        let subtitle: Vec<String> = [self.item_type.clone(), self.activation.clone()]
            .into_iter()
            .flatten()
            .collect();
        Some(FavoriteData {
            title: self.name.clone(),
            subtitle,
            img: self.img.clone(),
            uses: self.uses,
            quantity: Some(self.quantity),
            modifier: self.to_hit.clone(),
            save_dc: self.save_dc,
            range: self.range.clone(),
            toggle: self.equipped,
            ..FavoriteData::default()
        })
    }
}
