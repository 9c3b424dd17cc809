//! Character record - the persisted document the sheet renders from.
//!
//! Everything numeric here is already derived by the rules layer
//! (ability modifiers, skill totals, passive scores); the sheet reads
//! current values and issues update requests, it never recomputes.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Effect, Item};
use crate::favorites::Favorites;
use crate::ids::{CharacterId, EffectId, ItemId};
use crate::reference::ProficiencyRank;

/// Derived state of one ability score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScore {
    /// Raw score
    pub value: i32,
    /// Check modifier
    pub modifier: i32,
    /// Saving-throw bonus
    pub save: i32,
    /// Saving-throw proficiency rank
    #[serde(default)]
    pub save_rank: ProficiencyRank,
}

/// Derived totals for a skill or tool proficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    /// Total check modifier
    pub total: i32,
    /// Passive score (10 + total)
    pub passive: i32,
    /// Governing ability key
    pub ability: String,
    /// Proficiency rank
    #[serde(default)]
    pub rank: ProficiencyRank,
}

/// A legacy labeled counter predating the favorites system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSlot {
    /// Slot key (e.g. "primary")
    pub key: String,
    /// User-entered label; empty means the slot is unconfigured
    #[serde(default)]
    pub label: String,
    pub value: f64,
    pub max: f64,
    #[serde(default)]
    pub short_rest_recovers: bool,
    #[serde(default)]
    pub long_rest_recovers: bool,
}

impl ResourceSlot {
    /// A slot is shown only when it has both a label and a maximum.
    pub fn is_configured(&self) -> bool {
        !self.label.is_empty() && self.max > 0.0
    }
}

/// Live state of one spell-slot pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotState {
    pub value: u32,
    pub max: u32,
    /// Slot level; for the pact pool this is the pact slot level
    pub level: u8,
}

/// The persisted player-character document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    id: CharacterId,
    name: String,
    /// The favorites collection; exclusively owned by this record
    #[serde(default)]
    favorites: Favorites,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    effects: Vec<Effect>,
    /// Ability key -> derived score state
    #[serde(default)]
    abilities: HashMap<String, AbilityScore>,
    /// Skill key -> derived totals
    #[serde(default)]
    skills: HashMap<String, SkillEntry>,
    /// Tool key -> derived totals
    #[serde(default)]
    tools: HashMap<String, SkillEntry>,
    /// Legacy resources, in fixed display order
    #[serde(default)]
    resources: Vec<ResourceSlot>,
    /// Pool id ("spell1".."spell9", "pact") -> live slot state
    #[serde(default)]
    spell_slots: HashMap<String, SlotState>,
    #[serde(default)]
    exhaustion: u8,
    #[serde(default)]
    inspiration: bool,
    /// Primary spellcasting ability key
    spellcasting_ability: Option<String>,
    /// Items the character is currently concentrating on
    #[serde(default)]
    concentrating_on: HashSet<ItemId>,
    updated_at: DateTime<Utc>,
}

impl CharacterRecord {
    /// Create a new character record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            favorites: Favorites::new(),
            items: Vec::new(),
            effects: Vec::new(),
            abilities: HashMap::new(),
            skills: HashMap::new(),
            tools: HashMap::new(),
            resources: Vec::new(),
            spell_slots: HashMap::new(),
            exhaustion: 0,
            inspiration: false,
            spellcasting_ability: None,
            concentrating_on: HashSet::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn resources(&self) -> &[ResourceSlot] {
        &self.resources
    }

    pub fn exhaustion(&self) -> u8 {
        self.exhaustion
    }

    pub fn inspiration(&self) -> bool {
        self.inspiration
    }

    pub fn spellcasting_ability(&self) -> Option<&str> {
        self.spellcasting_ability.as_deref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Lookups

    /// Find an owned item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Find an owned effect by id.
    pub fn effect(&self, id: EffectId) -> Option<&Effect> {
        self.effects.iter().find(|e| e.id() == id)
    }

    /// Derived ability state by key.
    pub fn ability(&self, key: &str) -> Option<&AbilityScore> {
        self.abilities.get(key)
    }

    /// Derived skill totals by key.
    pub fn skill(&self, key: &str) -> Option<&SkillEntry> {
        self.skills.get(key)
    }

    /// Derived tool totals by key.
    pub fn tool(&self, key: &str) -> Option<&SkillEntry> {
        self.tools.get(key)
    }

    /// All tool keys the character is proficient with, sorted.
    pub fn tool_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Live state of a spell-slot pool by pool id.
    pub fn slot_pool(&self, pool_id: &str) -> Option<&SlotState> {
        self.spell_slots.get(pool_id)
    }

    /// Whether the character is concentrating on the given item.
    pub fn is_concentrating_on(&self, id: ItemId) -> bool {
        self.concentrating_on.contains(&id)
    }

    /// Snapshot of all concentration items.
    pub fn concentration(&self) -> &HashSet<ItemId> {
        &self.concentrating_on
    }

    // Mutation - applied by the store when an update request lands

    /// Replace the favorites array.
    pub fn set_favorites(&mut self, entries: Vec<crate::favorites::FavoriteDescriptor>) {
        self.favorites = Favorites::from_entries(entries);
        self.touch();
    }

    /// Add an owned item.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
        self.touch();
    }

    /// Remove an owned item. The favorites descriptor pointing at it is
    /// deliberately left in place; it simply stops resolving.
    pub fn remove_item(&mut self, id: ItemId) {
        self.items.retain(|i| i.id() != id);
        self.concentrating_on.remove(&id);
        self.touch();
    }

    /// Add an owned effect.
    pub fn add_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
        self.touch();
    }

    /// Remove an owned effect.
    pub fn remove_effect(&mut self, id: EffectId) {
        self.effects.retain(|e| e.id() != id);
        self.touch();
    }

    /// Find an owned item mutably.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    /// Find an owned effect mutably.
    pub fn effect_mut(&mut self, id: EffectId) -> Option<&mut Effect> {
        self.effects.iter_mut().find(|e| e.id() == id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // Builder-style methods

    /// Set a derived ability score.
    pub fn with_ability(mut self, key: impl Into<String>, score: AbilityScore) -> Self {
        self.abilities.insert(key.into(), score);
        self
    }

    /// Set derived skill totals.
    pub fn with_skill(mut self, key: impl Into<String>, entry: SkillEntry) -> Self {
        self.skills.insert(key.into(), entry);
        self
    }

    /// Set derived tool totals.
    pub fn with_tool(mut self, key: impl Into<String>, entry: SkillEntry) -> Self {
        self.tools.insert(key.into(), entry);
        self
    }

    /// Append a legacy resource slot.
    pub fn with_resource(mut self, resource: ResourceSlot) -> Self {
        self.resources.push(resource);
        self
    }

    /// Set a spell-slot pool.
    pub fn with_slot_pool(mut self, pool_id: impl Into<String>, state: SlotState) -> Self {
        self.spell_slots.insert(pool_id.into(), state);
        self
    }

    /// Set the exhaustion level.
    pub fn with_exhaustion(mut self, level: u8) -> Self {
        self.exhaustion = level;
        self
    }

    /// Set the inspiration flag.
    pub fn with_inspiration(mut self, inspiration: bool) -> Self {
        self.inspiration = inspiration;
        self
    }

    /// Set the primary spellcasting ability.
    pub fn with_spellcasting_ability(mut self, key: impl Into<String>) -> Self {
        self.spellcasting_ability = Some(key.into());
        self
    }

    /// Set the favorites collection.
    pub fn with_favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    /// Add an item the character is concentrating on.
    pub fn with_concentration(mut self, item_id: ItemId) -> Self {
        self.concentrating_on.insert(item_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_lookup_and_removal() {
        let mut record = CharacterRecord::new("Aveline");
        let item = Item::new("Longsword", "icons/sword.webp");
        let item_id = item.id();
        record.add_item(item);

        assert!(record.item(item_id).is_some());
        record.remove_item(item_id);
        assert!(record.item(item_id).is_none());
    }

    #[test]
    fn removing_an_item_keeps_its_favorite_descriptor() {
        let mut record = CharacterRecord::new("Aveline");
        let item = Item::new("Longsword", "icons/sword.webp");
        let item_id = item.id();
        record.add_item(item);

        let reference = crate::value_objects::RelativeRef::item(item_id).to_string();
        let next = record
            .favorites()
            .add_favorite(crate::favorites::FavoriteKind::Item, reference.clone())
            .expect("new favorite");
        record.set_favorites(next);
        record.remove_item(item_id);

        assert!(record.favorites().has_favorite(&reference));
        assert!(record.item(item_id).is_none());
    }

    #[test]
    fn resource_configuration_requires_label_and_max() {
        let configured = ResourceSlot {
            key: "primary".into(),
            label: "Rage".into(),
            value: 2.0,
            max: 3.0,
            short_rest_recovers: false,
            long_rest_recovers: true,
        };
        let unlabeled = ResourceSlot {
            key: "secondary".into(),
            label: String::new(),
            value: 1.0,
            max: 3.0,
            short_rest_recovers: false,
            long_rest_recovers: false,
        };
        let no_max = ResourceSlot {
            key: "tertiary".into(),
            label: "Luck".into(),
            value: 0.0,
            max: 0.0,
            short_rest_recovers: false,
            long_rest_recovers: false,
        };
        assert!(configured.is_configured());
        assert!(!unlabeled.is_configured());
        assert!(!no_max.is_configured());
    }

    #[test]
    fn tool_keys_are_sorted() {
        let record = CharacterRecord::new("Aveline")
            .with_tool(
                "thief",
                SkillEntry { total: 7, passive: 17, ability: "dex".into(), rank: ProficiencyRank::Proficient },
            )
            .with_tool(
                "herb",
                SkillEntry { total: 2, passive: 12, ability: "wis".into(), rank: ProficiencyRank::Half },
            );
        assert_eq!(record.tool_keys(), vec!["herb", "thief"]);
    }
}
