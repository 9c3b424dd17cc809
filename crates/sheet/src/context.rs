//! Sheet context builder: one full rebuild of the display model per
//! render.
//!
//! The context is purely derived. Nothing in it is written back; the
//! caller renders it and throws it away. Entries that fail to resolve
//! or decline to project are dropped from the output, never surfaced
//! as errors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vellum_domain::reference::{self, SlotPool, EXHAUSTION_LEVELS};
use vellum_domain::{CharacterRecord, SignedModifier};

use crate::ports::BaseItemCatalogue;
use crate::projection::{
    AbilityRow, AbilityRows, ExhaustionPips, FavoriteProjection, Pip, SaveRow, SkillRow,
    SlotSection,
};
use crate::projector::{project_resource, FavoriteProjector, RenderState};
use crate::resolver::ReferenceResolver;

/// The complete render-ready display model for one character sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetContext {
    pub name: String,
    /// Legacy resources (fixed leading block) followed by favorites in
    /// ascending sort order.
    pub favorites: Vec<FavoriteProjection>,
    pub abilities: AbilityRows,
    pub saves: Vec<SaveRow>,
    /// Present while the character concentrates on something; rides the
    /// Constitution save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration_save: Option<SaveRow>,
    pub skills: Vec<SkillRow>,
    pub tools: Vec<SkillRow>,
    pub exhaustion: ExhaustionPips,
    pub spell_slots: Vec<SlotSection>,
    pub inspiration: bool,
    pub editable: bool,
    pub generated_at: DateTime<Utc>,
}

/// Builds a [`SheetContext`] from a character record and the reference
/// catalogue.
pub struct SheetContextBuilder<'a> {
    character: &'a CharacterRecord,
    catalogue: &'a dyn BaseItemCatalogue,
    editable: bool,
}

impl<'a> SheetContextBuilder<'a> {
    pub fn new(character: &'a CharacterRecord, catalogue: &'a dyn BaseItemCatalogue) -> Self {
        Self {
            character,
            catalogue,
            editable: true,
        }
    }

    /// Mark the sheet read-only; rollable affordances are withheld.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Rebuild the full display model.
    pub fn build(&self) -> SheetContext {
        let state = RenderState::for_character(self.character, self.editable);
        let favorites = self.build_favorites(&state);
        tracing::debug!(
            character_id = %self.character.id(),
            rows = favorites.len(),
            "sheet context rebuilt"
        );
        SheetContext {
            name: self.character.name().to_string(),
            favorites,
            abilities: self.build_abilities(),
            saves: self.build_saves(),
            concentration_save: self.build_concentration_save(),
            skills: self.build_skills(),
            tools: self.build_tools(),
            exhaustion: build_exhaustion_pips(self.character.exhaustion()),
            spell_slots: self.build_slot_sections(),
            inspiration: self.character.inspiration(),
            editable: self.editable,
            generated_at: Utc::now(),
        }
    }

    /// Resource rows first as a fixed block, then favorites sorted by
    /// their descriptor keys.
    fn build_favorites(&self, state: &RenderState) -> Vec<FavoriteProjection> {
        let mut rows: Vec<FavoriteProjection> = self
            .character
            .resources()
            .iter()
            .filter(|r| r.is_configured())
            .map(|r| project_resource(r, state))
            .collect();

        let resolver = ReferenceResolver::new(self.character, self.catalogue);
        let projector = FavoriteProjector::new();
        let mut favorites: Vec<FavoriteProjection> = self
            .character
            .favorites()
            .iter()
            .filter_map(|descriptor| {
                let resolved = resolver.resolve(descriptor.kind(), descriptor.id());
                let projection = projector.project(
                    descriptor.kind(),
                    descriptor.id(),
                    descriptor.sort(),
                    &resolved,
                    state,
                );
                if projection.is_none() {
                    tracing::debug!(
                        id = %descriptor.id(),
                        kind = %descriptor.kind(),
                        "favorite dropped from render"
                    );
                }
                projection
            })
            .collect();
        favorites.sort_by(|a, b| {
            a.sort
                .unwrap_or_default()
                .total_cmp(&b.sort.unwrap_or_default())
        });

        rows.extend(favorites);
        rows
    }

    fn build_abilities(&self) -> AbilityRows {
        let rows: Vec<AbilityRow> = reference::ABILITIES
            .iter()
            .filter_map(|def| {
                let score = self.character.ability(def.key)?;
                Some(AbilityRow {
                    key: def.key.to_string(),
                    label: def.label.to_string(),
                    abbreviation: def.abbreviation.to_string(),
                    value: score.value,
                    modifier: SignedModifier::from_value(score.modifier),
                    spellcasting: self.character.spellcasting_ability() == Some(def.key),
                })
            })
            .collect();
        let split = rows.len().div_ceil(2);
        let (top, bottom) = rows.split_at(split.min(rows.len()));
        AbilityRows {
            top: top.to_vec(),
            bottom: bottom.to_vec(),
        }
    }

    fn build_saves(&self) -> Vec<SaveRow> {
        reference::ABILITIES
            .iter()
            .filter_map(|def| {
                let score = self.character.ability(def.key)?;
                let (rank_class, rank_label) = SkillRow::rank(score.save_rank);
                Some(SaveRow {
                    key: def.key.to_string(),
                    abbreviation: def.abbreviation.to_string(),
                    modifier: SignedModifier::from_value(score.save),
                    rank_class,
                    rank_label,
                })
            })
            .collect()
    }

    fn build_concentration_save(&self) -> Option<SaveRow> {
        if self.character.concentration().is_empty() {
            return None;
        }
        let con = self.character.ability("con")?;
        let (rank_class, rank_label) = SkillRow::rank(con.save_rank);
        Some(SaveRow {
            key: "concentration".to_string(),
            abbreviation: "CONC".to_string(),
            modifier: SignedModifier::from_value(con.save),
            rank_class,
            rank_label,
        })
    }

    fn build_skills(&self) -> Vec<SkillRow> {
        reference::SKILLS
            .iter()
            .filter_map(|def| {
                let entry = self.character.skill(def.key)?;
                let (rank_class, rank_label) = SkillRow::rank(entry.rank);
                let ability = reference::ability(&entry.ability)
                    .map(|a| a.abbreviation.to_string())
                    .unwrap_or_else(|| entry.ability.to_uppercase());
                Some(SkillRow {
                    key: def.key.to_string(),
                    label: def.label.to_string(),
                    icon: def.icon.to_string(),
                    modifier: SignedModifier::from_value(entry.total),
                    passive: entry.passive,
                    ability,
                    rank_class,
                    rank_label,
                    reference: Some(def.reference.to_string()),
                })
            })
            .collect()
    }

    fn build_tools(&self) -> Vec<SkillRow> {
        self.character
            .tool_keys()
            .into_iter()
            .filter_map(|key| {
                let entry = self.character.tool(key)?;
                let base_item = reference::tool_catalogue_key(key)
                    .and_then(|catalogue_key| self.catalogue.lookup_base_item(catalogue_key));
                let (title, icon, tool_reference) = match base_item {
                    Some(base) => (base.name, base.icon, Some(base.reference_id)),
                    None => (key.to_string(), reference::FALLBACK_ICON.to_string(), None),
                };
                let (rank_class, rank_label) = SkillRow::rank(entry.rank);
                let ability = reference::ability(&entry.ability)
                    .map(|a| a.abbreviation.to_string())
                    .unwrap_or_else(|| entry.ability.to_uppercase());
                Some(SkillRow {
                    key: key.to_string(),
                    label: title,
                    icon,
                    modifier: SignedModifier::from_value(entry.total),
                    passive: entry.passive,
                    ability,
                    rank_class,
                    rank_label,
                    reference: tool_reference,
                })
            })
            .collect()
    }

    /// Leveled pools in ascending level order, then pact magic. Pools
    /// the character never gained (max 0) are omitted.
    fn build_slot_sections(&self) -> Vec<SlotSection> {
        let mut pools: Vec<SlotPool> = (1..=9).map(SlotPool::Leveled).collect();
        pools.push(SlotPool::Pact);
        pools
            .into_iter()
            .filter_map(|pool| {
                let state = self.character.slot_pool(&pool.id())?;
                if state.max == 0 {
                    return None;
                }
                let pips = (1..=state.max)
                    .map(|n| {
                        let filled = n <= state.value;
                        Pip {
                            n: u8::try_from(n).unwrap_or(u8::MAX),
                            filled,
                            css: if filled { "pip filled".into() } else { "pip".into() },
                            label: format!("{} / {}", state.value, state.max),
                        }
                    })
                    .collect();
                Some(SlotSection {
                    pool_id: pool.id(),
                    title: pool.title(),
                    icon: pool.icon(),
                    value: state.value,
                    max: state.max,
                    pips,
                })
            })
            .collect()
    }
}

/// Exhaustion pips, split around the portrait; the last pip is death.
fn build_exhaustion_pips(level: u8) -> ExhaustionPips {
    let pips: Vec<Pip> = (1..=EXHAUSTION_LEVELS)
        .map(|n| {
            let filled = n <= level;
            let mut css = vec!["pip"];
            if filled {
                css.push("filled");
            }
            if n == EXHAUSTION_LEVELS {
                css.push("death");
            }
            Pip {
                n,
                filled,
                css: css.join(" "),
                label: if n == EXHAUSTION_LEVELS {
                    "Exhaustion: Death".to_string()
                } else {
                    format!("Exhaustion Level {n}")
                },
            }
        })
        .collect();
    let half = pips.len() / 2;
    let (left, right) = pips.split_at(half);
    ExhaustionPips {
        left: left.to_vec(),
        right: right.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_domain::reference::ProficiencyRank;
    use vellum_domain::{
        AbilityScore, FavoriteDescriptor, FavoriteKind, Item, RelativeRef, ResourceSlot,
        SkillEntry, SlotState,
    };

    use crate::ports::EmptyCatalogue;
    use crate::projection::ProjectionKind;

    fn ability(value: i32, modifier: i32, save: i32) -> AbilityScore {
        AbilityScore {
            value,
            modifier,
            save,
            save_rank: ProficiencyRank::None,
        }
    }

    fn scenario_character() -> CharacterRecord {
        // One skill favorite (sort 1) and one item favorite (sort 2).
        let item = Item::new("Wand of Magic Missiles", "icons/wand.webp").with_uses(2.0, 5.0);
        let item_ref = RelativeRef::item(item.id()).to_string();
        let mut record = CharacterRecord::new("Aveline").with_skill(
            "acr",
            SkillEntry {
                total: 3,
                passive: 13,
                ability: "dex".into(),
                rank: ProficiencyRank::Proficient,
            },
        );
        record.add_item(item);
        record.set_favorites(vec![
            FavoriteDescriptor::new(FavoriteKind::Skill, "acr", 1.0),
            FavoriteDescriptor::new(FavoriteKind::Item, item_ref, 2.0),
        ]);
        record
    }

    #[test]
    fn favorites_project_in_sort_order_with_affordances() {
        let record = scenario_character();
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();

        assert_eq!(context.favorites.len(), 2);
        let skill = &context.favorites[0];
        assert_eq!(skill.id, "acr");
        assert_eq!(skill.css, "modifier");
        let modifier = skill.modifier.expect("modifier");
        assert_eq!(modifier.abs(), 3);
        assert_eq!(modifier.sign().glyph(), "+");

        let item = &context.favorites[1];
        assert_eq!(item.css, "uses");
        let uses = item.uses.expect("uses");
        assert_eq!(uses.value(), 2.0);
        assert_eq!(uses.max(), 5.0);
    }

    #[test]
    fn dangling_item_is_dropped_from_view_but_kept_in_storage() {
        let mut record = scenario_character();
        let item_id = record.items()[0].id();
        record.remove_item(item_id);

        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();
        assert_eq!(context.favorites.len(), 1);
        assert_eq!(context.favorites[0].id, "acr");
        // The descriptor survives in persisted state.
        assert_eq!(record.favorites().len(), 2);
    }

    #[test]
    fn resources_always_precede_favorites() {
        let record = scenario_character().with_resource(ResourceSlot {
            key: "primary".into(),
            label: "Rage".into(),
            value: 2.0,
            max: 3.0,
            short_rest_recovers: false,
            long_rest_recovers: true,
        });
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();

        assert_eq!(context.favorites[0].kind, ProjectionKind::Resource);
        assert_eq!(context.favorites[0].id, "resource.primary");
        // Favorites follow, still in sort order, even though their sort
        // keys are smaller than any synthetic resource ordering.
        assert_eq!(context.favorites[1].id, "acr");
    }

    #[test]
    fn unconfigured_resources_are_omitted() {
        let record = CharacterRecord::new("Test")
            .with_resource(ResourceSlot {
                key: "primary".into(),
                label: String::new(),
                value: 1.0,
                max: 3.0,
                short_rest_recovers: false,
                long_rest_recovers: false,
            })
            .with_resource(ResourceSlot {
                key: "secondary".into(),
                label: "Luck".into(),
                value: 0.0,
                max: 0.0,
                short_rest_recovers: false,
                long_rest_recovers: false,
            });
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();
        assert!(context.favorites.is_empty());
    }

    #[test]
    fn projection_is_deterministic_for_unchanged_state() {
        let record = scenario_character();
        let builder = SheetContextBuilder::new(&record, &EmptyCatalogue);
        assert_eq!(builder.build().favorites, builder.build().favorites);
    }

    #[test]
    fn ability_rows_split_and_flag_spellcasting() {
        let record = CharacterRecord::new("Test")
            .with_ability("str", ability(10, 0, 0))
            .with_ability("dex", ability(14, 2, 2))
            .with_ability("con", ability(12, 1, 1))
            .with_ability("int", ability(18, 4, 7))
            .with_ability("wis", ability(10, 0, 0))
            .with_ability("cha", ability(8, -1, -1))
            .with_spellcasting_ability("int");
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();
        assert_eq!(context.abilities.top.len(), 3);
        assert_eq!(context.abilities.bottom.len(), 3);
        let int_row = context
            .abilities
            .bottom
            .iter()
            .find(|r| r.key == "int")
            .expect("int row");
        assert!(int_row.spellcasting);
        assert_eq!(int_row.modifier.to_string(), "+4");
    }

    #[test]
    fn concentration_save_appears_only_while_concentrating() {
        let item = Item::new("Bless", "icons/bless.webp");
        let item_id = item.id();
        let base = CharacterRecord::new("Test").with_ability("con", ability(14, 2, 5));
        let context = SheetContextBuilder::new(&base, &EmptyCatalogue).build();
        assert!(context.concentration_save.is_none());

        let mut concentrating = base.with_concentration(item_id);
        concentrating.add_item(item);
        let context = SheetContextBuilder::new(&concentrating, &EmptyCatalogue).build();
        let row = context.concentration_save.expect("concentration row");
        assert_eq!(row.modifier.to_string(), "+5");
    }

    #[test]
    fn exhaustion_pips_fill_to_level_and_mark_death() {
        let record = CharacterRecord::new("Test").with_exhaustion(4);
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();
        let pips = &context.exhaustion;
        assert_eq!(pips.left.len(), 3);
        assert_eq!(pips.right.len(), 3);
        let filled: usize = pips
            .left
            .iter()
            .chain(pips.right.iter())
            .filter(|p| p.filled)
            .count();
        assert_eq!(filled, 4);
        let death = pips.right.last().expect("death pip");
        assert!(death.css.contains("death"));
        assert!(!death.filled);
    }

    #[test]
    fn slot_sections_order_leveled_before_pact() {
        let record = CharacterRecord::new("Test")
            .with_slot_pool("pact", SlotState { value: 1, max: 2, level: 3 })
            .with_slot_pool("spell2", SlotState { value: 0, max: 3, level: 2 })
            .with_slot_pool("spell1", SlotState { value: 4, max: 4, level: 1 })
            .with_slot_pool("spell9", SlotState { value: 0, max: 0, level: 9 });
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();
        let ids: Vec<&str> = context.spell_slots.iter().map(|s| s.pool_id.as_str()).collect();
        assert_eq!(ids, vec!["spell1", "spell2", "pact"]);

        let second = &context.spell_slots[1];
        assert_eq!(second.pips.len(), 3);
        assert!(second.pips.iter().all(|p| !p.filled));
    }

    #[test]
    fn read_only_context_withholds_rollables() {
        let record = scenario_character();
        let context = SheetContextBuilder::new(&record, &EmptyCatalogue)
            .editable(false)
            .build();
        assert!(context.favorites.iter().all(|f| f.rollable_class.is_empty()));
        assert!(!context.editable);
    }
}
