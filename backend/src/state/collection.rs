//! Generic in-memory collection
//!
//! Every resource kind held by the store (agents, conversations, tools) lives in a
//! [`Collection`]. Items are kept in a `Vec` so listing order is insertion order.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Behaviour shared by every entity held in a [`Collection`]
pub trait Resource: Clone {
    /// Caller-supplied fields used to build a new entity
    type Draft;
    /// Partial fields merged onto an existing entity
    type Patch;

    /// Prefix prepended to generated identifiers (may be empty)
    const ID_PREFIX: &'static str;

    /// Identifier of this entity
    fn id(&self) -> &str;

    /// Build the entity from a draft, an assigned id and the creation time
    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Merge a patch onto the entity. Fields absent from the patch are kept.
    fn apply(&mut self, patch: Self::Patch);

    /// Refresh the modification timestamp, if the resource has one
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

/// Generate a fresh identifier with the given prefix
///
/// Uses UUID v4, so identifiers never collide even when many entities are
/// created within the same clock tick.
pub fn generate_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4())
}

/// Compute a refreshed `updated_at` that never moves backwards
pub fn refreshed_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}

/// Insertion-ordered store for one resource kind
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Resource> Collection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection pre-filled with entities (duplicate ids are skipped)
    pub fn from_items(items: Vec<T>) -> Self {
        let mut collection = Self::new();
        for item in items {
            collection.insert(item);
        }
        collection
    }

    /// Snapshot of every entity, in insertion order
    pub fn get_all(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Iterate over the entities without cloning
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Look up an entity by id
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Assign a new id and timestamps, append the entity and return it
    pub fn create(&mut self, draft: T::Draft) -> T {
        let entity = T::from_draft(generate_id(T::ID_PREFIX), draft, Utc::now());
        tracing::debug!(id = %entity.id(), "Resource created");
        self.items.push(entity.clone());
        entity
    }

    /// Append an already-built entity
    /// Returns false if an entity with the same id already exists
    pub fn insert(&mut self, entity: T) -> bool {
        if self.get_by_id(entity.id()).is_some() {
            return false;
        }
        self.items.push(entity);
        true
    }

    /// Merge `patch` onto the entity with `id` and refresh its timestamp
    /// Returns the updated entity, or None if the id is unknown
    pub fn update(&mut self, id: &str, patch: T::Patch) -> Option<T> {
        let item = self.get_mut(id)?;
        item.apply(patch);
        item.touch(Utc::now());
        Some(item.clone())
    }

    /// Remove the entity with `id`
    /// Returns true if something was removed
    pub fn delete(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.items.remove(index);
                tracing::debug!(id = %id, "Resource deleted");
                true
            }
            None => false,
        }
    }

    /// Number of entities in the collection
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no entities
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
