//! Reference resolution: turning a favorite's `(type, id)` pair into a
//! live entity or value bundle.
//!
//! Resolution is read-only and tolerant: a reference whose target no
//! longer exists reports `Missing` and the caller drops the entry from
//! the current projection. The persisted descriptor is left untouched
//! so a transient failure (e.g. mid-update ordering) self-heals on the
//! next render.

use vellum_domain::reference::{self, SkillDef, SlotPool};
use vellum_domain::{
    CharacterRecord, Effect, FavoriteKind, Item, RelativeRef, SkillEntry, SlotState,
};

use crate::ports::{BaseItemCatalogue, BaseItemEntry};

/// A resolved skill favorite: live totals plus the rules definition.
#[derive(Debug, Clone)]
pub struct SkillBundle {
    pub key: String,
    pub entry: SkillEntry,
    pub def: &'static SkillDef,
}

/// A resolved tool favorite: live totals plus the catalogue entry, when
/// the catalogue knows the tool.
#[derive(Debug, Clone)]
pub struct ToolBundle {
    pub key: String,
    pub entry: SkillEntry,
    pub base_item: Option<BaseItemEntry>,
}

/// A resolved spell-slot favorite.
#[derive(Debug, Clone, Copy)]
pub struct SlotsBundle {
    pub pool: SlotPool,
    pub state: SlotState,
}

/// Outcome of resolving one favorite reference.
#[derive(Debug)]
pub enum Resolved<'a> {
    Item(&'a Item),
    Effect(&'a Effect),
    Skill(SkillBundle),
    Tool(ToolBundle),
    Slots(SlotsBundle),
    /// The referent no longer exists (or the id is malformed). Not an
    /// error: the entry is simply omitted from this render.
    Missing,
}

impl Resolved<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Resolves favorite references against one character record.
pub struct ReferenceResolver<'a> {
    character: &'a CharacterRecord,
    catalogue: &'a dyn BaseItemCatalogue,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(character: &'a CharacterRecord, catalogue: &'a dyn BaseItemCatalogue) -> Self {
        Self {
            character,
            catalogue,
        }
    }

    /// Resolve a favorite's `(kind, id)` pair.
    pub fn resolve(&self, kind: FavoriteKind, id: &str) -> Resolved<'a> {
        match kind {
            FavoriteKind::Item => self.resolve_item(id),
            FavoriteKind::Effect => self.resolve_effect(id),
            FavoriteKind::Skill => self.resolve_skill(id),
            FavoriteKind::Tool => self.resolve_tool(id),
            FavoriteKind::Slots => self.resolve_slots(id),
        }
    }

    fn resolve_item(&self, id: &str) -> Resolved<'a> {
        match id.parse::<RelativeRef>() {
            Ok(RelativeRef::Item(item_id)) => self
                .character
                .item(item_id)
                .map_or(Resolved::Missing, Resolved::Item),
            _ => Resolved::Missing,
        }
    }

    fn resolve_effect(&self, id: &str) -> Resolved<'a> {
        match id.parse::<RelativeRef>() {
            Ok(RelativeRef::Effect(effect_id)) => self
                .character
                .effect(effect_id)
                .map_or(Resolved::Missing, Resolved::Effect),
            _ => Resolved::Missing,
        }
    }

    fn resolve_skill(&self, key: &str) -> Resolved<'a> {
        let Some(def) = reference::skill(key) else {
            return Resolved::Missing;
        };
        match self.character.skill(key) {
            Some(entry) => Resolved::Skill(SkillBundle {
                key: key.to_string(),
                entry: entry.clone(),
                def,
            }),
            None => Resolved::Missing,
        }
    }

    fn resolve_tool(&self, key: &str) -> Resolved<'a> {
        let Some(entry) = self.character.tool(key) else {
            return Resolved::Missing;
        };
        let base_item = reference::tool_catalogue_key(key)
            .and_then(|catalogue_key| self.catalogue.lookup_base_item(catalogue_key));
        Resolved::Tool(ToolBundle {
            key: key.to_string(),
            entry: entry.clone(),
            base_item,
        })
    }

    fn resolve_slots(&self, id: &str) -> Resolved<'a> {
        let Some(pool) = SlotPool::parse(id) else {
            return Resolved::Missing;
        };
        // A pool the character has never gained renders as 0/0 rather
        // than vanishing, matching the slot counters elsewhere on the
        // sheet.
        let state = self.character.slot_pool(id).copied().unwrap_or(SlotState {
            value: 0,
            max: 0,
            level: match pool {
                SlotPool::Leveled(level) => level,
                SlotPool::Pact => 0,
            },
        });
        Resolved::Slots(SlotsBundle { pool, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_domain::reference::ProficiencyRank;
    use vellum_domain::Item;

    use crate::ports::EmptyCatalogue;

    fn character_with_item() -> (CharacterRecord, String) {
        let mut record = CharacterRecord::new("Test");
        let item = Item::new("Shortbow", "icons/bow.webp");
        let reference = RelativeRef::item(item.id()).to_string();
        record.add_item(item);
        (record, reference)
    }

    #[test]
    fn resolves_owned_items() {
        let (record, reference) = character_with_item();
        let resolver = ReferenceResolver::new(&record, &EmptyCatalogue);
        assert!(matches!(
            resolver.resolve(FavoriteKind::Item, &reference),
            Resolved::Item(_)
        ));
    }

    #[test]
    fn deleted_item_reports_missing() {
        let (mut record, reference) = character_with_item();
        let id = record.items()[0].id();
        record.remove_item(id);
        let resolver = ReferenceResolver::new(&record, &EmptyCatalogue);
        assert!(resolver.resolve(FavoriteKind::Item, &reference).is_missing());
    }

    #[test]
    fn malformed_reference_reports_missing() {
        let record = CharacterRecord::new("Test");
        let resolver = ReferenceResolver::new(&record, &EmptyCatalogue);
        assert!(resolver
            .resolve(FavoriteKind::Item, "not-a-reference")
            .is_missing());
    }

    #[test]
    fn effect_reference_of_item_kind_reports_missing() {
        let record = CharacterRecord::new("Test");
        let reference = RelativeRef::effect(vellum_domain::EffectId::new()).to_string();
        let resolver = ReferenceResolver::new(&record, &EmptyCatalogue);
        assert!(resolver.resolve(FavoriteKind::Item, &reference).is_missing());
    }

    #[test]
    fn skill_resolves_live_totals() {
        let record = CharacterRecord::new("Test").with_skill(
            "acr",
            SkillEntry {
                total: 5,
                passive: 15,
                ability: "dex".into(),
                rank: ProficiencyRank::Proficient,
            },
        );
        let resolver = ReferenceResolver::new(&record, &EmptyCatalogue);
        match resolver.resolve(FavoriteKind::Skill, "acr") {
            Resolved::Skill(bundle) => {
                assert_eq!(bundle.entry.total, 5);
                assert_eq!(bundle.def.label, "Acrobatics");
            }
            other => panic!("expected skill bundle, got {other:?}"),
        }
    }

    #[test]
    fn unknown_slot_pool_renders_empty_not_missing() {
        let record = CharacterRecord::new("Test");
        let resolver = ReferenceResolver::new(&record, &EmptyCatalogue);
        match resolver.resolve(FavoriteKind::Slots, "spell4") {
            Resolved::Slots(bundle) => {
                assert_eq!(bundle.state.max, 0);
                assert_eq!(bundle.state.level, 4);
            }
            other => panic!("expected slots bundle, got {other:?}"),
        }
    }
}
