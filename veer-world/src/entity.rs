use std::rc::Rc;

use veer_core::{Aabb, EntityId, Vec3};
use veer_nav::JumpDescriptor;

use crate::steering::SteeringBehavior;

/// Which behavior slot currently drives the entity.
///
/// The ready transition switches an entity from its run-up policy to the jump
/// policy without moving either box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BehaviorSlot {
    Main,
    Jump,
}

/// A positioned, sized object registered with a [`World`](crate::World).
///
/// Position and size are only mutable through the world so the spatial index
/// stays in sync. Entities built with [`Entity::steerable`] additionally carry
/// a [`Steerable`] extension with kinematic and jump state.
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) position: Vec3,
    pub(crate) size: Vec3,
    pub(crate) aabb: Aabb,
    pub(crate) hidden: bool,
    pub(crate) last_world_position: Option<Vec3>,
    pub(crate) last_world_size: Option<Vec3>,
    pub(crate) steer: Option<Steerable>,
}

impl Entity {
    /// A plain indexable record (an obstacle, a waypoint marker).
    pub fn new(id: impl Into<EntityId>, center: Vec3, size: Vec3) -> Self {
        Self {
            id: id.into(),
            position: center,
            size,
            aabb: Aabb::from_center_size(center, size),
            hidden: false,
            last_world_position: None,
            last_world_size: None,
            steer: None,
        }
    }

    /// An entity with the kinematic + jump extension.
    pub fn steerable(id: impl Into<EntityId>, center: Vec3, size: Vec3) -> Self {
        let mut entity = Self::new(id, center, size);
        entity.steer = Some(Steerable::new());
        entity
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Position last pushed to the spatial index, if inserted.
    pub fn last_world_position(&self) -> Option<Vec3> {
        self.last_world_position
    }

    pub fn last_world_size(&self) -> Option<Vec3> {
        self.last_world_size
    }

    pub fn is_steerable(&self) -> bool {
        self.steer.is_some()
    }

    pub fn steer(&self) -> Option<&Steerable> {
        self.steer.as_ref()
    }

    pub fn steer_mut(&mut self) -> Option<&mut Steerable> {
        self.steer.as_mut()
    }
}

/// Kinematic + jump extension of an [`Entity`].
///
/// Plain kinematic knobs are public fields. Targets and behavior slots go
/// through methods because mutating them is rejected while a jump is
/// initiated.
pub struct Steerable {
    pub velocity: Vec3,
    pub linear_acceleration: Vec3,
    pub max_speed: f32,
    pub max_acceleration: f32,
    pub limit_velocity: bool,
    /// Fraction of the remaining rotation applied toward the look target per
    /// tick.
    pub look_speed: f32,
    /// Vertical launch speed used at takeoff.
    pub jump_speed: f32,

    pub(crate) look_direction: Vec3,
    pub(crate) look_target: Option<Vec3>,
    pub(crate) target_position: Option<Vec3>,
    pub(crate) target_entity: Option<EntityId>,
    pub(crate) hide_target_entity: Option<EntityId>,
    pub(crate) behavior: Option<Box<dyn SteeringBehavior>>,
    pub(crate) jump_behavior: Option<Box<dyn SteeringBehavior>>,
    pub(crate) active_slot: BehaviorSlot,
    pub(crate) jump_initiated: bool,
    pub(crate) jump_ready: bool,
    pub(crate) jump_taken_off: bool,
    pub(crate) jump_time: f32,
    pub(crate) jump_descriptor: Option<Rc<JumpDescriptor>>,
    pub(crate) jump_ready_listener: Option<Box<dyn FnMut(&EntityId)>>,
    pub(crate) jump_completion_listener: Option<Box<dyn FnMut(&EntityId)>>,
}

impl Default for Steerable {
    fn default() -> Self {
        Self::new()
    }
}

impl Steerable {
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            linear_acceleration: Vec3::ZERO,
            max_speed: f32::INFINITY,
            max_acceleration: f32::INFINITY,
            limit_velocity: true,
            look_speed: 0.1,
            jump_speed: f32::INFINITY,
            look_direction: Vec3::new(0.0, 0.0, -1.0),
            look_target: None,
            target_position: None,
            target_entity: None,
            hide_target_entity: None,
            behavior: None,
            jump_behavior: None,
            active_slot: BehaviorSlot::Main,
            jump_initiated: false,
            jump_ready: false,
            jump_taken_off: false,
            jump_time: 0.0,
            jump_descriptor: None,
            jump_ready_listener: None,
            jump_completion_listener: None,
        }
    }

    pub fn look_direction(&self) -> Vec3 {
        self.look_direction
    }

    pub fn look_target(&self) -> Option<Vec3> {
        self.look_target
    }

    pub fn set_look_target(&mut self, target: Vec3) {
        self.look_target = Some(target);
    }

    pub fn unset_look_target(&mut self) {
        self.look_target = None;
    }

    pub fn target_position(&self) -> Option<Vec3> {
        self.target_position
    }

    pub fn target_entity(&self) -> Option<&EntityId> {
        self.target_entity.as_ref()
    }

    pub fn hide_target_entity(&self) -> Option<&EntityId> {
        self.hide_target_entity.as_ref()
    }

    /// Assign the active acceleration policy. No-op while a jump is initiated.
    pub fn set_behavior(&mut self, behavior: Box<dyn SteeringBehavior>) {
        if self.jump_initiated {
            return;
        }
        self.behavior = Some(behavior);
        self.active_slot = BehaviorSlot::Main;
    }

    /// Assign the policy used once a jump's run-up completes. No-op while a
    /// jump is initiated.
    pub fn set_jump_behavior(&mut self, behavior: Box<dyn SteeringBehavior>) {
        if self.jump_initiated {
            return;
        }
        self.jump_behavior = Some(behavior);
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    pub fn has_jump_behavior(&self) -> bool {
        self.jump_behavior.is_some()
    }

    pub fn set_target_position(&mut self, position: Vec3) {
        if self.jump_initiated {
            return;
        }
        self.target_position = Some(position);
    }

    pub fn unset_target_position(&mut self) {
        if self.jump_initiated {
            return;
        }
        self.target_position = None;
    }

    pub fn set_target_entity(&mut self, target: EntityId) {
        if self.jump_initiated {
            return;
        }
        self.target_entity = Some(target);
    }

    pub fn unset_target_entity(&mut self) {
        if self.jump_initiated {
            return;
        }
        self.target_entity = None;
    }

    pub fn set_hide_target_entity(&mut self, target: EntityId) {
        if self.jump_initiated {
            return;
        }
        self.hide_target_entity = Some(target);
    }

    pub fn unset_hide_target_entity(&mut self) {
        if self.jump_initiated {
            return;
        }
        self.hide_target_entity = None;
    }

    pub fn is_jump_initiated(&self) -> bool {
        self.jump_initiated
    }

    pub fn is_jump_ready(&self) -> bool {
        self.jump_ready
    }

    pub fn is_jump_taken_off(&self) -> bool {
        self.jump_taken_off
    }

    /// Elapsed flight time of the current jump, in seconds.
    pub fn jump_time(&self) -> f32 {
        self.jump_time
    }

    pub fn jump_descriptor(&self) -> Option<&Rc<JumpDescriptor>> {
        self.jump_descriptor.as_ref()
    }

    /// Notified when the run-up reaches the takeoff radius.
    pub fn set_jump_ready_listener(&mut self, listener: Box<dyn FnMut(&EntityId)>) {
        self.jump_ready_listener = Some(listener);
    }

    pub fn remove_jump_ready_listener(&mut self) {
        self.jump_ready_listener = None;
    }

    /// Notified when a jump lands (not on cancellation).
    pub fn set_jump_completion_listener(&mut self, listener: Box<dyn FnMut(&EntityId)>) {
        self.jump_completion_listener = Some(listener);
    }

    pub fn remove_jump_completion_listener(&mut self) {
        self.jump_completion_listener = None;
    }

    pub(crate) fn slot_mut(&mut self, slot: BehaviorSlot) -> &mut Option<Box<dyn SteeringBehavior>> {
        match slot {
            BehaviorSlot::Main => &mut self.behavior,
            BehaviorSlot::Jump => &mut self.jump_behavior,
        }
    }
}
