//! Per-kind favorite adapters and the uniform post-processing pass.
//!
//! Each favorite kind registers one adapter that extracts the uniform
//! display bundle from whatever the resolver returned. Everything after
//! extraction (affordance classification, modifier parsing, suppression
//! labelling, rollable gating) is shared and applied once, so adapters
//! stay small and a new kind is added by registering a new adapter.

use std::collections::{HashMap, HashSet};

use vellum_domain::reference::{self, SlotPool, FALLBACK_ICON, SUPPRESSED_LABEL};
use vellum_domain::{CharacterRecord, EffectId, FavoriteData, FavoriteKind, ItemId, Uses};

use crate::projection::{CssAffordance, FavoriteProjection, ProjectionKind};
use crate::resolver::{Resolved, SkillBundle, SlotsBundle, ToolBundle};

/// Separator between joined subtitle fragments.
const SUBTITLE_SEPARATOR: &str = " \u{2022} ";

/// Short-lived per-render state, built once by the context builder and
/// discarded with the projections it produced.
#[derive(Debug, Clone)]
pub struct RenderState {
    editable: bool,
    concentration: HashSet<ItemId>,
}

impl RenderState {
    /// Snapshot render state from the character record.
    pub fn for_character(character: &CharacterRecord, editable: bool) -> Self {
        Self {
            editable,
            concentration: character.concentration().clone(),
        }
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn is_concentrating_on(&self, id: ItemId) -> bool {
        self.concentration.contains(&id)
    }
}

/// What an adapter extracts: the uniform bundle plus the backing
/// document ids, when the referent is an owned document.
#[derive(Debug, Clone, Default)]
struct Extracted {
    data: FavoriteData,
    item_id: Option<ItemId>,
    effect_id: Option<EffectId>,
}

/// One per-kind extraction strategy.
trait FavoriteAdapter: Send + Sync {
    /// Extract display data, or `None` to drop the entry from this
    /// render (the referent declined to produce favorite data).
    fn extract(&self, resolved: &Resolved<'_>) -> Option<Extracted>;
}

struct ItemAdapter;

impl FavoriteAdapter for ItemAdapter {
    fn extract(&self, resolved: &Resolved<'_>) -> Option<Extracted> {
        let Resolved::Item(item) = resolved else {
            return None;
        };
        Some(Extracted {
            data: item.favorite_data()?,
            item_id: Some(item.id()),
            effect_id: None,
        })
    }
}

struct EffectAdapter;

impl FavoriteAdapter for EffectAdapter {
    fn extract(&self, resolved: &Resolved<'_>) -> Option<Extracted> {
        let Resolved::Effect(effect) = resolved else {
            return None;
        };
        Some(Extracted {
            data: effect.favorite_data()?,
            item_id: None,
            effect_id: Some(effect.id()),
        })
    }
}

struct SkillAdapter;

impl FavoriteAdapter for SkillAdapter {
    fn extract(&self, resolved: &Resolved<'_>) -> Option<Extracted> {
        let Resolved::Skill(SkillBundle { entry, def, .. }) = resolved else {
            return None;
        };
        let subtitle = reference::ability(&entry.ability)
            .map(|a| vec![a.label.to_string()])
            .unwrap_or_default();
        Some(Extracted {
            data: FavoriteData {
                title: def.label.to_string(),
                subtitle,
                img: def.icon.to_string(),
                modifier: Some(entry.total.into()),
                passive: Some(entry.passive),
                reference: Some(def.reference.to_string()),
                ..FavoriteData::default()
            },
            ..Extracted::default()
        })
    }
}

struct ToolAdapter;

impl FavoriteAdapter for ToolAdapter {
    fn extract(&self, resolved: &Resolved<'_>) -> Option<Extracted> {
        let Resolved::Tool(ToolBundle {
            key,
            entry,
            base_item,
        }) = resolved
        else {
            return None;
        };
        let (title, img, tool_reference) = match base_item {
            Some(base) => (
                base.name.clone(),
                base.icon.clone(),
                Some(base.reference_id.clone()),
            ),
            None => (key.clone(), FALLBACK_ICON.to_string(), None),
        };
        let subtitle = reference::ability(&entry.ability)
            .map(|a| vec![a.label.to_string()])
            .unwrap_or_default();
        Some(Extracted {
            data: FavoriteData {
                title,
                subtitle,
                img,
                modifier: Some(entry.total.into()),
                passive: Some(entry.passive),
                reference: tool_reference,
                ..FavoriteData::default()
            },
            ..Extracted::default()
        })
    }
}

struct SlotsAdapter;

impl FavoriteAdapter for SlotsAdapter {
    fn extract(&self, resolved: &Resolved<'_>) -> Option<Extracted> {
        let Resolved::Slots(SlotsBundle { pool, state }) = resolved else {
            return None;
        };
        // Named pools carry their slot level in the subtitle; leveled
        // pools already name it in the title.
        let mut subtitle = Vec::new();
        if matches!(pool, SlotPool::Pact) && state.level > 0 {
            subtitle.push(format!("Level {}", state.level));
        }
        subtitle.push(pool.recovery_abbr().to_string());
        let preparation_mode = match pool {
            SlotPool::Leveled(_) => "prepared".to_string(),
            SlotPool::Pact => pool.id(),
        };
        Some(Extracted {
            data: FavoriteData {
                title: pool.title(),
                subtitle,
                img: pool.icon(),
                uses: Some(Uses::new(f64::from(state.value), f64::from(state.max))),
                level: Some(state.level),
                preparation_mode: Some(preparation_mode),
                ..FavoriteData::default()
            },
            ..Extracted::default()
        })
    }
}

/// The adapter table, dispatching extraction by favorite kind and
/// applying the shared post-processing pass.
pub struct FavoriteProjector {
    adapters: HashMap<FavoriteKind, Box<dyn FavoriteAdapter>>,
}

impl Default for FavoriteProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoriteProjector {
    pub fn new() -> Self {
        let mut adapters: HashMap<FavoriteKind, Box<dyn FavoriteAdapter>> = HashMap::new();
        adapters.insert(FavoriteKind::Item, Box::new(ItemAdapter));
        adapters.insert(FavoriteKind::Effect, Box::new(EffectAdapter));
        adapters.insert(FavoriteKind::Skill, Box::new(SkillAdapter));
        adapters.insert(FavoriteKind::Tool, Box::new(ToolAdapter));
        adapters.insert(FavoriteKind::Slots, Box::new(SlotsAdapter));
        Self { adapters }
    }

    /// Project one favorite into its final display row.
    ///
    /// Returns `None` when the referent is missing or declines to
    /// produce display data; the caller drops the entry.
    pub fn project(
        &self,
        kind: FavoriteKind,
        id: &str,
        sort: f64,
        resolved: &Resolved<'_>,
        state: &RenderState,
    ) -> Option<FavoriteProjection> {
        if resolved.is_missing() {
            return None;
        }
        let extracted = self.adapters.get(&kind)?.extract(resolved)?;
        Some(finalize(kind.into(), id, Some(sort), extracted, state))
    }
}

/// The shared post-processing pass every projected row goes through.
fn finalize(
    kind: ProjectionKind,
    id: &str,
    sort: Option<f64>,
    extracted: Extracted,
    state: &RenderState,
) -> FavoriteProjection {
    let Extracted {
        data,
        item_id,
        effect_id,
    } = extracted;

    let uses = data.uses.map(|u| u.rounded());
    let modifier = data.modifier.as_ref().and_then(|m| m.display());

    // Affordance classification keys on the raw modifier, not on parse
    // success: a pre-formatted string that fails to parse still claims
    // the modifier cell rather than falling through to save or value.
    let affordance = if uses.is_some() {
        Some(CssAffordance::Uses)
    } else if data.modifier.is_some() {
        Some(CssAffordance::Modifier)
    } else if data.save_dc.is_some() {
        Some(CssAffordance::Save)
    } else if data.value.is_some() {
        Some(CssAffordance::Value)
    } else {
        None
    };

    let mut css: Vec<&str> = Vec::new();
    if let Some(affordance) = affordance {
        css.push(affordance.class());
    }
    if data.toggle == Some(false) {
        css.push("disabled");
    }
    if uses.is_some_and(|u| u.needs_small_numerals()) {
        css.push("uses-sm");
    }

    let mut rollable: Vec<&str> = Vec::new();
    let never_rollable = matches!(kind, ProjectionKind::Slots | ProjectionKind::Resource);
    if state.editable() && !never_rollable {
        rollable.push("rollable");
        match kind {
            ProjectionKind::Skill => rollable.push("skill-name"),
            ProjectionKind::Tool => rollable.push("tool-name"),
            _ => {}
        }
    }

    let subtitle = if data.suppressed {
        Some(SUPPRESSED_LABEL.to_string())
    } else if data.subtitle.is_empty() {
        None
    } else {
        Some(data.subtitle.join(SUBTITLE_SEPARATOR))
    };

    let img = if data.img.is_empty() {
        FALLBACK_ICON.to_string()
    } else {
        data.img
    };

    let concentration = item_id.is_some_and(|id| state.is_concentrating_on(id));

    FavoriteProjection {
        id: id.to_string(),
        kind,
        title: data.title,
        subtitle,
        img,
        sort,
        uses,
        modifier,
        save_dc: data.save_dc,
        value: data.value,
        passive: data.passive,
        range: data.range,
        reference: data.reference,
        quantity: data.quantity.filter(|&q| q > 1),
        toggle: data.toggle,
        suppressed: data.suppressed,
        level: data.level,
        preparation_mode: data.preparation_mode,
        key: matches!(kind, ProjectionKind::Skill | ProjectionKind::Tool)
            .then(|| id.to_string()),
        bare_name: matches!(kind, ProjectionKind::Slots),
        item_id,
        effect_id,
        concentration,
        css: css.join(" "),
        rollable_class: rollable.join(" "),
    }
}

/// Build the projection for one legacy resource slot. Resources bypass
/// the adapter table (they are not favorites) but share the same final
/// row shape and post-processing.
pub fn project_resource(
    resource: &vellum_domain::ResourceSlot,
    state: &RenderState,
) -> FavoriteProjection {
    let mut subtitle = Vec::new();
    if resource.short_rest_recovers {
        subtitle.push(reference::SHORT_REST_ABBR.to_string());
    }
    if resource.long_rest_recovers {
        subtitle.push(reference::LONG_REST_ABBR.to_string());
    }
    let extracted = Extracted {
        data: FavoriteData {
            title: resource.label.clone(),
            subtitle,
            img: reference::RESOURCE_ICON.to_string(),
            uses: Some(Uses::new(resource.value, resource.max)),
            ..FavoriteData::default()
        },
        ..Extracted::default()
    };
    finalize(
        ProjectionKind::Resource,
        &format!("resource.{}", resource.key),
        None,
        extracted,
        state,
    )
}
