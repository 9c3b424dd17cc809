//! Render-ready output shapes.
//!
//! Everything here is ephemeral: rebuilt from persisted state on every
//! render and discarded after the render that consumes it. No struct in
//! this module is written back to the store.

use serde::Serialize;
use vellum_domain::reference::ProficiencyRank;
use vellum_domain::{EffectId, FavoriteKind, ItemId, SignedModifier, Uses};

/// Kind tag on a projected row. Mirrors [`FavoriteKind`] plus the
/// legacy resource rows the context builder prepends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionKind {
    Item,
    Effect,
    Skill,
    Tool,
    Slots,
    Resource,
}

impl From<FavoriteKind> for ProjectionKind {
    fn from(kind: FavoriteKind) -> Self {
        match kind {
            FavoriteKind::Item => Self::Item,
            FavoriteKind::Effect => Self::Effect,
            FavoriteKind::Skill => Self::Skill,
            FavoriteKind::Tool => Self::Tool,
            FavoriteKind::Slots => Self::Slots,
        }
    }
}

/// The single right-hand affordance a favorite row displays.
///
/// Classification is first-match in declaration order: a row with both
/// uses and a modifier shows uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssAffordance {
    Uses,
    Modifier,
    Save,
    Value,
}

impl CssAffordance {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Uses => "uses",
            Self::Modifier => "modifier",
            Self::Save => "save",
            Self::Value => "value",
        }
    }
}

/// One row of the favorites panel, fully resolved and styled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProjection {
    /// The descriptor id (reference path, structural key, or the
    /// synthetic `resource.<key>` id).
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ProjectionKind,
    pub title: String,
    /// Joined subtitle fragments, absent when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub img: String,
    /// Ordering key copied from the descriptor. Legacy resources carry
    /// none; the context builder keeps them as a fixed leading block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<Uses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<SignedModifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passive: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Rules-reference identifier for tooltips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Stack count, present only when greater than one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Enable/disable capability state, when the referent supports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle: Option<bool>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub suppressed: bool,
    /// Spell level, for slot pools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Preparation mode key, for slot pools ("prepared" for leveled
    /// pools, the pool id for named ones).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_mode: Option<String>,
    /// Structural key, for skill and tool rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Whether the title renders without its icon frame (slot pools).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bare_name: bool,
    /// Set when the row is backed by an owned item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    /// Set when the row is backed by an owned effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_id: Option<EffectId>,
    /// Whether the character is concentrating on the backing item.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub concentration: bool,
    /// Space-joined class list for the right-hand affordance cell.
    pub css: String,
    /// Class list for the row title; empty when the sheet is read-only
    /// or the row is not rollable.
    pub rollable_class: String,
}

/// One pip in a pip strip (exhaustion, spell slots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pip {
    /// 1-based position within the strip.
    pub n: u8,
    pub filled: bool,
    pub css: String,
    pub label: String,
}

/// Exhaustion pips split around the central portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhaustionPips {
    pub left: Vec<Pip>,
    pub right: Vec<Pip>,
}

/// One ability-score card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRow {
    pub key: String,
    pub label: String,
    pub abbreviation: String,
    pub value: i32,
    pub modifier: SignedModifier,
    /// Whether this is the primary spellcasting ability.
    pub spellcasting: bool,
}

/// Ability cards split into the two strips flanking the portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRows {
    pub top: Vec<AbilityRow>,
    pub bottom: Vec<AbilityRow>,
}

/// One saving-throw row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRow {
    pub key: String,
    pub abbreviation: String,
    pub modifier: SignedModifier,
    pub rank_class: String,
    pub rank_label: String,
}

/// One skill or tool row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRow {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub modifier: SignedModifier,
    pub passive: i32,
    /// Governing ability abbreviation.
    pub ability: String,
    pub rank_class: String,
    pub rank_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl SkillRow {
    pub fn rank(rank: ProficiencyRank) -> (String, String) {
        (rank.css_class().to_string(), rank.label().to_string())
    }
}

/// One spell-slot pool rendered as a pip strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSection {
    pub pool_id: String,
    pub title: String,
    pub icon: String,
    pub value: u32,
    pub max: u32,
    pub pips: Vec<Pip>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordance_classes() {
        assert_eq!(CssAffordance::Uses.class(), "uses");
        assert_eq!(CssAffordance::Modifier.class(), "modifier");
        assert_eq!(CssAffordance::Save.class(), "save");
        assert_eq!(CssAffordance::Value.class(), "value");
    }

    #[test]
    fn projection_kind_mirrors_favorite_kind() {
        assert_eq!(ProjectionKind::from(FavoriteKind::Slots), ProjectionKind::Slots);
        assert_eq!(ProjectionKind::from(FavoriteKind::Item), ProjectionKind::Item);
    }
}
