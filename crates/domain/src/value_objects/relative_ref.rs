//! Relative reference paths for documents embedded in a character.
//!
//! Item and effect favorites store a non-owning path like
//! `.Item.<uuid>` or `.ActiveEffect.<uuid>`, resolvable only against
//! the owning character. A path that no longer resolves is a normal
//! event (the referent was deleted), not an invariant violation.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::DomainError;
use crate::ids::{EffectId, ItemId};

/// A parsed relative reference to an embedded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeRef {
    Item(ItemId),
    Effect(EffectId),
}

impl RelativeRef {
    /// Build the reference path for an owned item.
    pub fn item(id: ItemId) -> Self {
        Self::Item(id)
    }

    /// Build the reference path for an owned effect.
    pub fn effect(id: EffectId) -> Self {
        Self::Effect(id)
    }
}

impl fmt::Display for RelativeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, ".Item.{id}"),
            Self::Effect(id) => write!(f, ".ActiveEffect.{id}"),
        }
    }
}

impl FromStr for RelativeRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('.')
            .ok_or_else(|| DomainError::parse(format!("Not a relative reference: {s}")))?;
        let (doc_type, raw_id) = rest
            .split_once('.')
            .ok_or_else(|| DomainError::parse(format!("Malformed relative reference: {s}")))?;
        let uuid = Uuid::parse_str(raw_id)
            .map_err(|_| DomainError::invalid_id(format!("Bad document id in reference: {s}")))?;
        match doc_type {
            "Item" => Ok(Self::Item(ItemId::from_uuid(uuid))),
            "ActiveEffect" => Ok(Self::Effect(EffectId::from_uuid(uuid))),
            other => Err(DomainError::parse(format!(
                "Unknown embedded document type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_item_references() {
        let id = ItemId::new();
        let reference = RelativeRef::item(id);
        let parsed: RelativeRef = reference.to_string().parse().expect("parseable");
        assert_eq!(parsed, reference);
    }

    #[test]
    fn round_trips_effect_references() {
        let id = EffectId::new();
        let reference = RelativeRef::effect(id);
        let parsed: RelativeRef = reference.to_string().parse().expect("parseable");
        assert_eq!(parsed, reference);
    }

    #[test]
    fn rejects_unknown_document_types() {
        let err = "  .Token.abc".trim().parse::<RelativeRef>();
        assert!(err.is_err());
    }

    #[test]
    fn rejects_structural_keys() {
        assert!("acr".parse::<RelativeRef>().is_err());
        assert!("spell3".parse::<RelativeRef>().is_err());
    }
}
