//! Entity store - registry of all entities and their component slots
//!
//! The store exclusively owns every entity. Iteration runs in spawn order so
//! rendering and tie-breaking stay deterministic. Destruction removes an
//! entity from the registry and the order index in one call; no query can
//! observe a half-destroyed entity.

use ahash::AHashMap;

use crate::core::types::EntityId;
use crate::ecs::components::{Ai, Fighter, Position, Renderable};

/// An entity's component slots
///
/// Doubles as the spawn prototype: build one with the components present and
/// hand it to [`EntityStore::spawn`].
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub position: Option<Position>,
    pub renderable: Option<Renderable>,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
}

/// The registry of live entities
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: AHashMap<EntityId, Entity>,
    /// Spawn order, for deterministic iteration
    order: Vec<EntityId>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new entity from its component set.
    pub fn spawn(&mut self, prototype: Entity) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(id, prototype);
        self.order.push(id);
        id
    }

    /// Remove an entity and every component it carried.
    ///
    /// Returns the removed component set, or None if the id was not live.
    /// The caller unregisters the entity from the scheduler in the same
    /// step when an Ai component was present.
    pub fn destroy(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(removed)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All live entities in spawn order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Every entity occupying the given cell, in spawn order.
    pub fn at(&self, x: i32, y: i32) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied().filter(move |id| {
            self.entities
                .get(id)
                .and_then(|e| e.position)
                .is_some_and(|p| p.x == x && p.y == y)
        })
    }

    /// Does any entity with a blocking renderable occupy the cell?
    pub fn blocks_at(&self, x: i32, y: i32) -> bool {
        self.at(x, y).any(|id| {
            self.entities
                .get(&id)
                .and_then(|e| e.renderable.as_ref())
                .is_some_and(|r| r.blocks)
        })
    }

    /// All position components in spawn order.
    pub fn positions(&self) -> impl Iterator<Item = (EntityId, Position)> + '_ {
        self.order.iter().filter_map(move |id| {
            self.entities
                .get(id)
                .and_then(|e| e.position)
                .map(|p| (*id, p))
        })
    }

    /// All placed renderables in spawn order.
    pub fn renderables(&self) -> impl Iterator<Item = (EntityId, Position, &Renderable)> + '_ {
        self.order.iter().filter_map(move |id| {
            let entity = self.entities.get(id)?;
            let position = entity.position?;
            let renderable = entity.renderable.as_ref()?;
            Some((*id, position, renderable))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color;

    fn item(name: &str, x: i32, y: i32, blocks: bool) -> Entity {
        Entity {
            position: Some(Position::new(x, y)),
            renderable: Some(Renderable {
                symbol: 'x',
                fg: color::WHITE,
                bg: color::BLACK,
                name: name.to_string(),
                blocks,
                proper_name: false,
                plural: false,
            }),
            ..Entity::default()
        }
    }

    #[test]
    fn test_spawn_then_get() {
        let mut store = EntityStore::new();
        let id = store.spawn(item("banana", 3, 4, false));
        assert!(store.contains(id));
        assert_eq!(store.get(id).unwrap().position, Some(Position::new(3, 4)));
    }

    #[test]
    fn test_destroy_removes_from_all_indexes() {
        let mut store = EntityStore::new();
        let a = store.spawn(item("banana", 1, 1, false));
        let b = store.spawn(item("lute", 1, 1, false));

        assert!(store.destroy(a).is_some());
        assert!(!store.contains(a));
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![b]);
        assert_eq!(store.at(1, 1).collect::<Vec<_>>(), vec![b]);
        // Double destroy is a no-op
        assert!(store.destroy(a).is_none());
    }

    #[test]
    fn test_at_yields_spawn_order() {
        let mut store = EntityStore::new();
        let a = store.spawn(item("banana", 2, 2, false));
        let _elsewhere = store.spawn(item("lute", 9, 9, false));
        let b = store.spawn(item("figurine", 2, 2, false));

        assert_eq!(store.at(2, 2).collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_blocks_at_requires_blocking_renderable() {
        let mut store = EntityStore::new();
        store.spawn(item("banana", 5, 5, false));
        assert!(!store.blocks_at(5, 5));

        store.spawn(item("ninja", 5, 5, true));
        assert!(store.blocks_at(5, 5));
        assert!(!store.blocks_at(5, 6));
    }

    #[test]
    fn test_entity_without_position_is_invisible_to_cell_queries() {
        let mut store = EntityStore::new();
        let mut ghost = item("ghost", 0, 0, true);
        ghost.position = None;
        store.spawn(ghost);

        assert_eq!(store.at(0, 0).count(), 0);
        assert_eq!(store.positions().count(), 0);
    }
}
