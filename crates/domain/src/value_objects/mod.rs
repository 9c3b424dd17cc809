//! Value objects shared across the character document.

mod modifier;
mod relative_ref;
mod sort_key;
mod uses;

pub use modifier::{RawModifier, Sign, SignedModifier};
pub use relative_ref::RelativeRef;
pub use sort_key::{midpoint_insert, SortUpdate, SORT_GAP};
pub use uses::Uses;
