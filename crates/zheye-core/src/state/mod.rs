// ── Client-side state ──
//
// Normalized collections, the snapshot type with its derivations, and the
// store that owns and mutates it.

mod collection;
mod data_store;
mod snapshot;

pub use collection::EntityCollection;
pub use data_store::DataStore;
pub use snapshot::{ColumnsState, ErrorState, StoreState};
