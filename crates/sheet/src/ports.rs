//! Port traits for the collaborators this crate reads from and writes
//! through: the character document store and the base-item catalogue.

use async_trait::async_trait;
use vellum_domain::{CharacterId, CharacterRecord};

use crate::update::SheetUpdate;

/// Store operation errors with context for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Entity not found - includes entity type and ID for actionable messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage operation failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Storage error with operation context.
    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// The external character document store.
///
/// Update requests are fire-and-wait: each user action issues at most
/// one `apply`, and the store serializes concurrent writes to the same
/// record - this crate does no locking, queuing, or retry. The next
/// render re-derives everything from whatever state the store accepted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Fetch the current character record.
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, StoreError>;

    /// Apply a single update request to the character record.
    async fn apply(&self, id: CharacterId, update: SheetUpdate) -> Result<(), StoreError>;
}

/// A catalogue entry for a canonical base item (used to title and
/// decorate tool favorites).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseItemEntry {
    pub name: String,
    pub icon: String,
    /// Rules-reference identifier for tooltips.
    pub reference_id: String,
}

/// Read-only lookup of canonical base items by catalogue key.
#[cfg_attr(test, mockall::automock)]
pub trait BaseItemCatalogue: Send + Sync {
    fn lookup_base_item(&self, catalogue_key: &str) -> Option<BaseItemEntry>;
}

/// A catalogue that knows nothing; tool favorites fall back to their
/// key and a generic icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalogue;

impl BaseItemCatalogue for EmptyCatalogue {
    fn lookup_base_item(&self, _catalogue_key: &str) -> Option<BaseItemEntry> {
        None
    }
}
