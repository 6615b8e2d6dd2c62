// ── Normalized entity collection ──
//
// Id-keyed map of shared entities. Lives inside the copy-on-write state
// snapshot, so cloning a collection only bumps `Arc` counts.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::EntityId;
use crate::normalize::{Identified, to_list, to_map};

/// A normalized collection for a single entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCollection<T> {
    by_id: HashMap<EntityId, Arc<T>>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
        }
    }
}

impl<T: Identified> EntityCollection<T> {
    /// Build a collection from a list, last duplicate winning.
    pub fn from_list(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            by_id: to_map(items.into_iter().map(Arc::new)),
        }
    }

    /// Insert or replace an entity. Returns `true` if the id was new.
    pub(crate) fn upsert(&mut self, entity: T) -> bool {
        self.by_id
            .insert(entity.id().clone(), Arc::new(entity))
            .is_none()
    }

    /// Upsert every entity in `items`; existing ids not in `items` stay.
    pub(crate) fn merge(&mut self, items: impl IntoIterator<Item = T>) {
        self.by_id.extend(to_map(items.into_iter().map(Arc::new)));
    }

    /// Replace the whole collection with `items`.
    pub(crate) fn replace(&mut self, items: impl IntoIterator<Item = T>) {
        *self = Self::from_list(items);
    }
}

impl<T> EntityCollection<T> {
    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Arc<T>> {
        self.by_id.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.by_id.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Every entity exactly once, in unspecified order.
    pub fn to_list(&self) -> Vec<Arc<T>> {
        to_list(&self.by_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.by_id.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.by_id.keys()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
