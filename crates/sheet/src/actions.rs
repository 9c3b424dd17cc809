//! User-initiated sheet actions.
//!
//! Each handler runs to completion within one user action and issues at
//! most one update request through the store port. Nothing is applied
//! locally; the next render re-derives the display model from whatever
//! state the store accepted. Invalid inputs degrade to logged no-ops.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};
use vellum_domain::reference::{self, SlotPool, EXHAUSTION_LEVELS};
use vellum_domain::{CharacterId, CharacterRecord, FavoriteKind, ItemId, RelativeRef};

use crate::ports::{CharacterStore, StoreError};
use crate::update::SheetUpdate;

/// Sheet action errors.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The transfer payload carried by a favorites-area drop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub action: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub id: String,
}

/// Service handling every user action the sheet can emit.
pub struct SheetActions {
    store: Arc<dyn CharacterStore>,
}

impl SheetActions {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    async fn load(&self, character_id: CharacterId) -> Result<CharacterRecord, SheetError> {
        self.store
            .get(character_id)
            .await?
            .ok_or(SheetError::CharacterNotFound(character_id))
    }

    async fn persist_favorites(
        &self,
        character_id: CharacterId,
        entries: Vec<vellum_domain::FavoriteDescriptor>,
    ) -> Result<(), SheetError> {
        self.store
            .apply(character_id, SheetUpdate::Favorites { entries })
            .await?;
        Ok(())
    }

    /// Handle a drop on the favorites area.
    ///
    /// `raw_payload` is the serialized transfer data; `target_id` names
    /// the favorite the drop landed on, when it landed on one. A drop
    /// of an existing favorite routes to reordering, anything else adds.
    /// Malformed payloads are logged and abandoned without mutating
    /// state.
    pub async fn handle_favorite_drop(
        &self,
        character_id: CharacterId,
        raw_payload: &str,
        target_id: Option<&str>,
    ) -> Result<(), SheetError> {
        let payload: DragPayload = match serde_json::from_str(raw_payload) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "malformed drag payload; drop abandoned");
                return Ok(());
            }
        };
        if payload.action != "favorite" {
            debug!(action = %payload.action, "drop is not a favorite action; ignored");
            return Ok(());
        }

        let character = self.load(character_id).await?;
        if character.favorites().has_favorite(&payload.id) {
            match target_id {
                Some(target) => {
                    return self
                        .sort_favorites(character_id, &payload.id, target)
                        .await;
                }
                None => {
                    debug!(id = %payload.id, "existing favorite dropped outside any target; ignored");
                    return Ok(());
                }
            }
        }
        self.add_favorite(character_id, payload.kind, &payload.id)
            .await
    }

    /// Append a favorite at the end of the list. Idempotent: a second
    /// call with the same id issues no update.
    pub async fn add_favorite(
        &self,
        character_id: CharacterId,
        kind: FavoriteKind,
        id: &str,
    ) -> Result<(), SheetError> {
        let character = self.load(character_id).await?;
        let Some(entries) = character.favorites().add_favorite(kind, id) else {
            debug!(%id, "already a favorite; no update issued");
            return Ok(());
        };
        info!(character_id = %character_id, %kind, %id, "favorite added");
        self.persist_favorites(character_id, entries).await
    }

    /// Remove a favorite. Absent ids are a no-op.
    pub async fn remove_favorite(
        &self,
        character_id: CharacterId,
        id: &str,
    ) -> Result<(), SheetError> {
        let character = self.load(character_id).await?;
        let Some(entries) = character.favorites().remove_favorite(id) else {
            debug!(%id, "not a favorite; no update issued");
            return Ok(());
        };
        info!(character_id = %character_id, %id, "favorite removed");
        self.persist_favorites(character_id, entries).await
    }

    /// Move `source_id` adjacent to `target_id`. Self-targets and
    /// unknown ids are no-ops with no update issued.
    pub async fn sort_favorites(
        &self,
        character_id: CharacterId,
        source_id: &str,
        target_id: &str,
    ) -> Result<(), SheetError> {
        let character = self.load(character_id).await?;
        let Some(entries) = character.favorites().reorder(source_id, target_id) else {
            debug!(%source_id, %target_id, "reorder is a no-op");
            return Ok(());
        };
        info!(character_id = %character_id, %source_id, %target_id, "favorites reordered");
        self.persist_favorites(character_id, entries).await
    }

    /// Activate a favorite from the panel: items get a use request,
    /// effects get their disabled flag flipped. Structural favorites
    /// (skills, tools, slots) and dangling references do nothing here.
    pub async fn use_favorite(
        &self,
        character_id: CharacterId,
        favorite_id: &str,
    ) -> Result<(), SheetError> {
        let character = self.load(character_id).await?;
        let Some(descriptor) = character.favorites().get(favorite_id) else {
            debug!(id = %favorite_id, "not a favorite; use ignored");
            return Ok(());
        };
        if descriptor.kind().is_structural() {
            return Ok(());
        }
        let Ok(reference) = favorite_id.parse::<RelativeRef>() else {
            debug!(id = %favorite_id, "unparseable reference; use ignored");
            return Ok(());
        };
        let update = match reference {
            RelativeRef::Item(item_id) => {
                if character.item(item_id).is_none() {
                    debug!(id = %favorite_id, "dangling item favorite; use ignored");
                    return Ok(());
                }
                SheetUpdate::UseItem { item_id }
            }
            RelativeRef::Effect(effect_id) => match character.effect(effect_id) {
                Some(effect) => SheetUpdate::EffectDisabled {
                    effect_id,
                    disabled: !effect.disabled(),
                },
                None => {
                    debug!(id = %favorite_id, "dangling effect favorite; use ignored");
                    return Ok(());
                }
            },
        };
        info!(character_id = %character_id, id = %favorite_id, op = update.kind(), "favorite used");
        self.store.apply(character_id, update).await?;
        Ok(())
    }

    /// Set a named field on an owned item (inline edits, e.g. uses).
    pub async fn update_item_field(
        &self,
        character_id: CharacterId,
        item_id: ItemId,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), SheetError> {
        info!(character_id = %character_id, %item_id, %field, "item field update");
        self.store
            .apply(
                character_id,
                SheetUpdate::ItemField {
                    item_id,
                    field: field.to_string(),
                    value,
                },
            )
            .await?;
        Ok(())
    }

    /// Flip the inspiration flag.
    pub async fn toggle_inspiration(&self, character_id: CharacterId) -> Result<(), SheetError> {
        let character = self.load(character_id).await?;
        let value = !character.inspiration();
        info!(character_id = %character_id, %value, "inspiration toggled");
        self.store
            .apply(character_id, SheetUpdate::Inspiration { value })
            .await?;
        Ok(())
    }

    /// Change the primary spellcasting ability. Unknown keys are
    /// rejected without an update.
    pub async fn set_spellcasting_ability(
        &self,
        character_id: CharacterId,
        ability: &str,
    ) -> Result<(), SheetError> {
        if reference::ability(ability).is_none() {
            warn!(%ability, "unknown ability key; spellcasting change ignored");
            return Ok(());
        }
        info!(character_id = %character_id, %ability, "spellcasting ability changed");
        self.store
            .apply(
                character_id,
                SheetUpdate::SpellcastingAbility {
                    ability: ability.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Set the exhaustion level, clamped to the valid range.
    pub async fn set_exhaustion(
        &self,
        character_id: CharacterId,
        level: u8,
    ) -> Result<(), SheetError> {
        let level = level.min(EXHAUSTION_LEVELS);
        info!(character_id = %character_id, %level, "exhaustion set");
        self.store
            .apply(character_id, SheetUpdate::Exhaustion { level })
            .await?;
        Ok(())
    }

    /// Set the remaining value of a spell-slot pool. Unknown pool ids
    /// are rejected without an update; values clamp to the pool max.
    pub async fn set_spell_slot_value(
        &self,
        character_id: CharacterId,
        pool_id: &str,
        value: u32,
    ) -> Result<(), SheetError> {
        if SlotPool::parse(pool_id).is_none() {
            warn!(%pool_id, "unknown slot pool; value change ignored");
            return Ok(());
        }
        let character = self.load(character_id).await?;
        let value = match character.slot_pool(pool_id) {
            Some(state) => value.min(state.max),
            None => value,
        };
        info!(character_id = %character_id, %pool_id, %value, "spell slot value set");
        self.store
            .apply(
                character_id,
                SheetUpdate::SpellSlotValue {
                    pool_id: pool_id.to_string(),
                    value,
                },
            )
            .await?;
        Ok(())
    }

    /// Set the remaining value of a legacy resource slot.
    pub async fn set_resource_value(
        &self,
        character_id: CharacterId,
        key: &str,
        value: f64,
    ) -> Result<(), SheetError> {
        info!(character_id = %character_id, %key, %value, "resource value set");
        self.store
            .apply(
                character_id,
                SheetUpdate::ResourceValue {
                    key: key.to_string(),
                    value,
                },
            )
            .await?;
        Ok(())
    }
}
