//! Vellum Sheet - turns a persisted character record into a
//! render-ready display model and handles the user actions the sheet
//! emits.
//!
//! The favorites panel is the core: favorites are lightweight pointers
//! into other subsystems, re-resolved on every render. This crate never
//! owns persisted state; it reads through [`ports::CharacterStore`] and
//! issues typed [`update::SheetUpdate`] requests.

pub mod actions;
pub mod context;
pub mod ports;
pub mod projection;
pub mod projector;
pub mod resolver;
pub mod update;

pub use actions::{DragPayload, SheetActions, SheetError};
pub use context::{SheetContext, SheetContextBuilder};
pub use ports::{BaseItemCatalogue, BaseItemEntry, CharacterStore, EmptyCatalogue, StoreError};
pub use projection::{FavoriteProjection, ProjectionKind};
pub use projector::{FavoriteProjector, RenderState};
pub use resolver::{ReferenceResolver, Resolved};
pub use update::SheetUpdate;
