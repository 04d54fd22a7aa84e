use veer_core::EntityId;

use crate::World;

/// Host-facing lifecycle callbacks.
///
/// Every method has an empty default body; implement the ones you care about
/// and install the observer with [`World::set_observer`]. Callbacks receive a
/// read-only view of the world and the affected entity's id.
pub trait WorldObserver {
    fn entity_inserted(&mut self, _world: &World, _id: &EntityId) {}
    fn entity_updated(&mut self, _world: &World, _id: &EntityId) {}
    fn entity_removed(&mut self, _world: &World, _id: &EntityId) {}
    fn entity_hidden(&mut self, _world: &World, _id: &EntityId) {}
    fn entity_shown(&mut self, _world: &World, _id: &EntityId) {}
    fn look_direction_updated(&mut self, _world: &World, _id: &EntityId) {}
}
