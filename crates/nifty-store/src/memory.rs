use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use nifty_types::EntityId;

use crate::entity::{Entity, EntityKind, Listing};
use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

/// In-memory entity store.
///
/// Intended for tests, replays, and embedding. Rows live behind a `RwLock`,
/// grouped by kind and ordered by id within each table. Rows are cloned on
/// read and moved in on write.
pub struct InMemoryEntityStore {
    tables: RwLock<HashMap<EntityKind, BTreeMap<EntityId, Entity>>>,
}

impl InMemoryEntityStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Number of rows in one table.
    pub fn count(&self, kind: EntityKind) -> usize {
        let tables = self.tables.read().expect("lock poisoned");
        tables.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Total rows across all tables.
    pub fn len(&self) -> usize {
        let tables = self.tables.read().expect("lock poisoned");
        tables.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no table holds any row.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all rows from all tables.
    pub fn clear(&self) {
        self.tables.write().expect("lock poisoned").clear();
    }

    /// All rows of one kind, ordered by id.
    pub fn all(&self, kind: EntityKind) -> Vec<Entity> {
        let tables = self.tables.read().expect("lock poisoned");
        tables
            .get(&kind)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default()
    }

    /// All listing rows, ordered by id.
    pub fn listings(&self) -> Vec<Listing> {
        self.all(EntityKind::Listing)
            .into_iter()
            .filter_map(Entity::into_listing)
            .collect()
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn load(&self, kind: EntityKind, id: &EntityId) -> StoreResult<Option<Entity>> {
        let tables = self.tables.read().expect("lock poisoned");
        Ok(tables.get(&kind).and_then(|table| table.get(id)).cloned())
    }

    fn save(&self, entity: Entity) -> StoreResult<()> {
        let id = entity.id();
        if id.is_empty() {
            return Err(StoreError::EmptyId {
                kind: entity.kind(),
            });
        }
        let mut tables = self.tables.write().expect("lock poisoned");
        // Upsert: the latest row for (kind, id) wins.
        tables.entry(entity.kind()).or_default().insert(id, entity);
        Ok(())
    }

    fn remove(&self, kind: EntityKind, id: &EntityId) -> StoreResult<bool> {
        let mut tables = self.tables.write().expect("lock poisoned");
        let removed = match tables.get_mut(&kind) {
            Some(table) => table.remove(id).is_some(),
            None => false,
        };
        Ok(removed)
    }
}

impl std::fmt::Debug for InMemoryEntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryEntityStore")
            .field("row_count", &count)
            .finish()
    }
}
