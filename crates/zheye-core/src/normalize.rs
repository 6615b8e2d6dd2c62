// ── Normalization helpers ──
//
// Convert between list and keyed-map representations of entity
// collections. Both directions are pure and total.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Column, EntityId, Post};

/// An entity keyed by its server-assigned id.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

impl Identified for Column {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Post {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl<T: Identified> Identified for Arc<T> {
    fn id(&self) -> &EntityId {
        (**self).id()
    }
}

/// Build a fresh id -> entity map. Later entries with a duplicate id
/// overwrite earlier ones.
pub fn to_map<T: Identified>(items: impl IntoIterator<Item = T>) -> HashMap<EntityId, T> {
    items
        .into_iter()
        .map(|item| (item.id().clone(), item))
        .collect()
}

/// Every value of the map exactly once. Order is unspecified.
pub fn to_list<T: Clone>(map: &HashMap<EntityId, T>) -> Vec<T> {
    map.values().cloned().collect()
}
