//! The favorites collection: a heterogeneous, ordered, reference-based
//! list of shortcuts persisted on the character.
//!
//! Each entry is a lightweight pointer `{id, type, sort}` into another
//! subsystem (items, effects, skills, tools, spell-slot pools). The
//! collection never stores duplicated display data; every render
//! re-resolves entries against live state. Mutating operations return
//! the new descriptor array to persist - nothing is applied
//! synchronously, the external store confirms or rejects the write.

use serde::{Deserialize, Serialize};

use crate::value_objects::{midpoint_insert, RawModifier, Uses, SORT_GAP};

/// The closed set of favorite kinds.
///
/// Dispatch over this enum replaces branch chains keyed by raw type
/// strings; new kinds are added here and given a projector adapter,
/// never by widening string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FavoriteKind {
    /// An owned item, referenced by relative path (`.Item.<id>`).
    Item,
    /// An owned active effect, referenced by relative path.
    Effect,
    /// A skill, referenced by its structural key (e.g. `acr`).
    Skill,
    /// A tool proficiency, referenced by its structural key.
    Tool,
    /// A spell-slot pool (`spell1`..`spell9` or `pact`).
    Slots,
}

impl FavoriteKind {
    /// Whether ids of this kind are structural keys that always resolve.
    ///
    /// Item and effect ids can dangle when the referent is deleted;
    /// skill, tool, and slot ids name fixed character state.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Skill | Self::Tool | Self::Slots)
    }
}

impl std::fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Effect => write!(f, "effect"),
            Self::Skill => write!(f, "skill"),
            Self::Tool => write!(f, "tool"),
            Self::Slots => write!(f, "slots"),
        }
    }
}

impl std::str::FromStr for FavoriteKind {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(Self::Item),
            "effect" => Ok(Self::Effect),
            "skill" => Ok(Self::Skill),
            "tool" => Ok(Self::Tool),
            "slots" => Ok(Self::Slots),
            other => Err(crate::error::DomainError::parse(format!(
                "Unknown favorite kind: {other}"
            ))),
        }
    }
}

/// A persisted favorite entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDescriptor {
    id: String,
    #[serde(rename = "type")]
    kind: FavoriteKind,
    sort: f64,
}

impl FavoriteDescriptor {
    /// Create a new descriptor.
    pub fn new(kind: FavoriteKind, id: impl Into<String>, sort: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            sort,
        }
    }

    /// The reference id (relative path or structural key).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The favorite kind.
    pub fn kind(&self) -> FavoriteKind {
        self.kind
    }

    /// The ordering key. Gaps and fractional values are expected.
    pub fn sort(&self) -> f64 {
        self.sort
    }
}

/// The ordered favorites collection owned by the character record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    #[serde(default)]
    entries: Vec<FavoriteDescriptor>,
}

impl Favorites {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing descriptors, keeping only the first entry
    /// per id (the no-duplicate invariant).
    pub fn from_entries(entries: Vec<FavoriteDescriptor>) -> Self {
        let mut deduped: Vec<FavoriteDescriptor> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !deduped.iter().any(|e| e.id() == entry.id()) {
                deduped.push(entry);
            }
        }
        Self { entries: deduped }
    }

    /// The descriptors in persisted order.
    pub fn entries(&self) -> &[FavoriteDescriptor] {
        &self.entries
    }

    /// Iterate descriptors in persisted order.
    pub fn iter(&self) -> impl Iterator<Item = &FavoriteDescriptor> {
        self.entries.iter()
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a descriptor by exact id.
    pub fn get(&self, id: &str) -> Option<&FavoriteDescriptor> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Exact-id membership test.
    pub fn has_favorite(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append a new favorite at the end of the list.
    ///
    /// Returns the new array to persist, or `None` when the id is
    /// already present (idempotent - the second call issues no update).
    pub fn add_favorite(
        &self,
        kind: FavoriteKind,
        id: impl Into<String>,
    ) -> Option<Vec<FavoriteDescriptor>> {
        let id = id.into();
        if self.has_favorite(&id) {
            return None;
        }
        let max_sort = self
            .entries
            .iter()
            .map(FavoriteDescriptor::sort)
            .max_by(f64::total_cmp)
            .unwrap_or(0.0);
        let mut next = self.entries.clone();
        next.push(FavoriteDescriptor::new(kind, id, max_sort + SORT_GAP));
        Some(next)
    }

    /// Remove the favorite with the given id.
    ///
    /// Returns the new array to persist, or `None` when absent.
    pub fn remove_favorite(&self, id: &str) -> Option<Vec<FavoriteDescriptor>> {
        if !self.has_favorite(id) {
            return None;
        }
        Some(
            self.entries
                .iter()
                .filter(|e| e.id() != id)
                .cloned()
                .collect(),
        )
    }

    /// Move `source_id` adjacent to `target_id`.
    ///
    /// The new sort key is computed by midpoint insertion against a
    /// snapshot of the other descriptors' keys, so only the moved entry
    /// changes. Returns `None` (no update) when source equals target or
    /// either id is not a favorite.
    pub fn reorder(&self, source_id: &str, target_id: &str) -> Option<Vec<FavoriteDescriptor>> {
        if source_id == target_id {
            return None;
        }
        let source = self.get(source_id)?;
        let target = self.get(target_id)?;
        let sibling_sorts: Vec<f64> = self
            .entries
            .iter()
            .filter(|e| e.id() != source_id && e.id() != target_id)
            .map(FavoriteDescriptor::sort)
            .collect();
        let updates = midpoint_insert(source_id, source.sort(), target.sort(), &sibling_sorts);
        let mut next = self.entries.clone();
        for update in updates {
            if let Some(entry) = next.iter_mut().find(|e| e.id() == update.id) {
                entry.sort = update.sort;
            }
        }
        Some(next)
    }
}

/// Uniform display bundle produced by a favoritable referent.
///
/// This is the shape every per-kind accessor returns: the projector
/// consumes it without knowing what kind of entity produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteData {
    /// Display title.
    pub title: String,
    /// Subtitle fragments, joined by the renderer.
    pub subtitle: Vec<String>,
    /// Icon path.
    pub img: String,
    /// Plain numeric display value.
    pub value: Option<f64>,
    /// Remaining/maximum uses.
    pub uses: Option<Uses>,
    /// Stack count, shown only when greater than one.
    pub quantity: Option<u32>,
    /// Check modifier, possibly still a pre-formatted string.
    pub modifier: Option<RawModifier>,
    /// Passive score for skills and tools.
    pub passive: Option<i32>,
    /// Save difficulty class.
    pub save_dc: Option<i32>,
    /// Range label.
    pub range: Option<String>,
    /// Rules-reference identifier for tooltips.
    pub reference: Option<String>,
    /// Enable/disable capability, when the referent supports one.
    pub toggle: Option<bool>,
    /// Whether the referent's activation requirements are unmet.
    pub suppressed: bool,
    /// Spell level, for slot pools.
    pub level: Option<u8>,
    /// Preparation mode key, for slot pools.
    pub preparation_mode: Option<String>,
}
