use std::collections::BTreeMap;
use std::rc::Rc;

use veer_core::{Aabb, DiagnosticsSink, EntityId, NoopSink, Vec3};
use veer_nav::Graph;

use crate::entity::{Entity, Steerable};
use crate::index::{NearbyRecord, SpatialIndex};
use crate::observer::WorldObserver;

/// The bounded simulation volume and its spatial index.
///
/// Owns every inserted entity, keyed by id in a deterministic ordered map.
/// All mutation happens through world methods so the index, the change
/// snapshots and the observer callbacks stay consistent. Single-threaded by
/// contract: the caller drives one `step` per steerable per fixed tick.
pub struct World {
    width: f32,
    height: f32,
    depth: f32,
    pub(crate) gravity: f32,
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    index: SpatialIndex,
    observer: Option<Box<dyn WorldObserver>>,
    diagnostics: Rc<dyn DiagnosticsSink>,
    vertex_seq: u64,
}

impl World {
    pub fn new(width: f32, height: f32, depth: f32, bin_size: f32) -> Self {
        Self {
            width,
            height,
            depth,
            gravity: 0.0,
            entities: BTreeMap::new(),
            index: SpatialIndex::new(bin_size),
            observer: None,
            diagnostics: Rc::new(NoopSink),
            vertex_seq: 0,
        }
    }

    pub fn with_diagnostics(mut self, sink: Rc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn set_diagnostics(&mut self, sink: Rc<dyn DiagnosticsSink>) {
        self.diagnostics = sink;
    }

    pub fn set_observer(&mut self, observer: Box<dyn WorldObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn bin_size(&self) -> f32 {
        self.index.bin_size()
    }

    /// Vertical acceleration applied to airborne entities, in units/s².
    /// Downward gravity is negative. Defaults to zero.
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Register an entity under its id and index it at its current position.
    ///
    /// Duplicate ids resolve last-write-wins: the previous entity and its
    /// index record are dropped.
    pub fn insert_entity(&mut self, mut entity: Entity) {
        let id = entity.id.clone();
        if self.entities.remove(&id).is_some() {
            self.index.remove(&id);
        }

        entity.hidden = false;
        entity.last_world_position = Some(entity.position);
        entity.last_world_size = Some(entity.size);
        self.index.insert(id.clone(), entity.position, entity.aabb);
        self.entities.insert(id.clone(), entity);

        self.notify(|obs, world| obs.entity_inserted(world, &id));
    }

    /// Push a position/size change into the index.
    ///
    /// No-op when the entity is hidden or when both values match the last
    /// recorded snapshot (the update observer fires at most once per actual
    /// change).
    pub fn update_entity(&mut self, id: &EntityId, new_position: Vec3, new_size: Vec3) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if entity.hidden {
            return;
        }
        if entity.last_world_position == Some(new_position)
            && entity.last_world_size == Some(new_size)
        {
            return;
        }

        entity.last_world_position = Some(new_position);
        entity.last_world_size = Some(new_size);
        let aabb = Aabb::from_center_size(new_position, new_size);
        self.index.relocate(id, new_position, aabb);

        self.notify(|obs, world| obs.entity_updated(world, id));
    }

    /// Remove the entity's index record, keeping it registered.
    ///
    /// Returns `false` when the entity is not inserted or already hidden.
    pub fn hide_entity(&mut self, id: &EntityId) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if entity.hidden {
            return false;
        }

        entity.hidden = true;
        self.index.remove(id);

        self.notify(|obs, world| obs.entity_hidden(world, id));
        true
    }

    /// Reindex a hidden entity at its current position.
    ///
    /// Returns `false` when the entity is not inserted or not hidden.
    pub fn show_entity(&mut self, id: &EntityId) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if !entity.hidden {
            return false;
        }

        entity.hidden = false;
        let (position, aabb) = (entity.position, entity.aabb);
        self.index.insert(id.clone(), position, aabb);

        self.notify(|obs, world| obs.entity_shown(world, id));
        true
    }

    /// Drop the entity from the registry and the index.
    ///
    /// The returned entity has its world snapshots cleared and can be
    /// re-inserted later.
    pub fn remove_entity(&mut self, id: &EntityId) -> Option<Entity> {
        let mut entity = self.entities.remove(id)?;
        self.index.remove(id);
        entity.last_world_position = None;
        entity.last_world_size = None;

        self.notify(|obs, world| obs.entity_removed(world, id));
        Some(entity)
    }

    pub fn get_entity_by_id(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn steerable(&self, id: &EntityId) -> Option<&Steerable> {
        self.entities.get(id).and_then(Entity::steer)
    }

    pub fn steerable_mut(&mut self, id: &EntityId) -> Option<&mut Steerable> {
        self.entities.get_mut(id).and_then(Entity::steer_mut)
    }

    /// Visit every registered entity exactly once, hidden or not, in id order.
    pub fn for_each_entity(&self, mut f: impl FnMut(&Entity)) {
        for entity in self.entities.values() {
            f(entity);
        }
    }

    /// Nearby-records in the bin covering `position` plus its 26 neighbors.
    ///
    /// Enumeration order is ascending bin coordinate (then id within a bin),
    /// never distance to the query point. The fixed one-bin neighborhood is
    /// sufficient because records are indexed under every bin their bounding
    /// box overlaps.
    pub fn get_nearby_objects(&self, position: Vec3) -> Vec<NearbyRecord> {
        self.index.query(position)
    }

    /// The entity's own index record, when inserted and not hidden.
    pub fn nearby_record(&self, id: &EntityId) -> Option<&NearbyRecord> {
        self.index.record(id)
    }

    /// Visit entities indexed near `id`'s position, excluding itself.
    /// The closure returns `true` to stop early.
    pub fn for_each_nearby_entity(&self, id: &EntityId, mut f: impl FnMut(&Entity) -> bool) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        for record in self.index.query(entity.position) {
            if record.id == *id {
                continue;
            }
            if let Some(other) = self.entities.get(&record.id) {
                if f(other) {
                    return;
                }
            }
        }
    }

    /// Whether `other` shows up in `id`'s neighborhood query.
    pub fn is_near_to(&self, id: &EntityId, other: &EntityId) -> bool {
        let mut near = false;
        self.for_each_nearby_entity(id, |candidate| {
            if candidate.id() == other {
                near = true;
            }
            near
        });
        near
    }

    /// Move an entity, keeping its bounding box and the index in sync.
    /// Returns `false` when hidden or not inserted.
    pub fn set_position(&mut self, id: &EntityId, position: Vec3) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if entity.hidden {
            return false;
        }

        entity.position = position;
        entity.aabb = Aabb::from_center_size(position, entity.size);
        let size = entity.size;
        self.update_entity(id, position, size);
        true
    }

    /// Resize an entity. Returns `false` when hidden or not inserted.
    pub fn set_size(&mut self, id: &EntityId, size: Vec3) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if entity.hidden {
            return false;
        }

        entity.size = size;
        entity.aabb = Aabb::from_center_size(entity.position, size);
        let position = entity.position;
        self.update_entity(id, position, size);
        true
    }

    /// Move and resize in one index update. Returns `false` when hidden or
    /// not inserted.
    pub fn set_position_and_size(&mut self, id: &EntityId, position: Vec3, size: Vec3) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            return false;
        };
        if entity.hidden {
            return false;
        }

        entity.position = position;
        entity.size = size;
        entity.aabb = Aabb::from_center_size(position, size);
        self.update_entity(id, position, size);
        true
    }

    /// Point a steerable's look direction, normalized, and notify the
    /// observer.
    pub fn set_look_direction(&mut self, id: &EntityId, direction: Vec3) {
        let normalized = direction.normalized();
        if normalized == Vec3::ZERO {
            return;
        }
        let Some(steer) = self.steerable_mut(id) else {
            return;
        };
        steer.look_direction = normalized;

        self.notify(|obs, world| obs.look_direction_updated(world, id));
    }

    /// Index every graph vertex as a zero-size entity with a generated
    /// `vertex#N` id. Idempotent: a graph that is already indexed is left
    /// untouched.
    pub fn insert_graph(&mut self, graph: &mut Graph) {
        if graph.is_indexed() {
            return;
        }

        let mut positions = Vec::with_capacity(graph.vertex_count());
        graph.for_each_vertex(|_, position| positions.push(position));

        let mut ids = Vec::with_capacity(positions.len());
        for position in positions {
            let id = EntityId::from(format!("vertex#{}", self.vertex_seq));
            self.vertex_seq += 1;
            self.insert_entity(Entity::new(id.clone(), position, Vec3::ZERO));
            ids.push(id);
        }
        graph.mark_indexed(ids);
    }

    /// Remove the entities created for this graph's vertices.
    pub fn remove_graph(&mut self, graph: &mut Graph) {
        for id in graph.take_indexed_ids() {
            self.remove_entity(&id);
        }
    }

    /// Number of non-empty index bins; mostly useful to tests and tools.
    pub fn occupied_bin_count(&self) -> usize {
        self.index.bin_count()
    }

    pub(crate) fn notify(&mut self, f: impl FnOnce(&mut dyn WorldObserver, &World)) {
        let Some(mut observer) = self.observer.take() else {
            return;
        };
        f(observer.as_mut(), self);
        if self.observer.is_none() {
            self.observer = Some(observer);
        }
    }

    pub(crate) fn report(&self, message: &str, id: &EntityId) {
        self.diagnostics.report("Steerable", message, id);
    }
}
