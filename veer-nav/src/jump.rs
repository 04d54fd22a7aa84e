use std::cell::RefCell;
use std::collections::BTreeMap;

use veer_core::{EntityId, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Solved launch parameters for one entity: horizontal launch velocity and
/// total flight time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JumpSolution {
    pub vx: f32,
    pub vz: f32,
    pub time: f32,
}

/// Immutable takeoff/landing specification for a ballistic jump, plus a
/// per-entity cache of solved launch parameters.
///
/// Descriptors are shared (`Rc<JumpDescriptor>`) between the path that carries
/// them and every entity currently jumping through them, so one descriptor's
/// cache serves many entities. The cache is interior-mutable; the simulation
/// is single-threaded by contract.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JumpDescriptor {
    takeoff_position: Vec3,
    landing_position: Vec3,
    takeoff_position_satisfaction_radius: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    solutions: RefCell<BTreeMap<EntityId, JumpSolution>>,
}

impl JumpDescriptor {
    pub fn new(
        takeoff_position: Vec3,
        landing_position: Vec3,
        takeoff_position_satisfaction_radius: f32,
    ) -> Self {
        Self {
            takeoff_position,
            landing_position,
            takeoff_position_satisfaction_radius,
            solutions: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn takeoff_position(&self) -> Vec3 {
        self.takeoff_position
    }

    pub fn landing_position(&self) -> Vec3 {
        self.landing_position
    }

    pub fn takeoff_position_satisfaction_radius(&self) -> f32 {
        self.takeoff_position_satisfaction_radius
    }

    pub fn cache_solution(&self, entity: EntityId, solution: JumpSolution) {
        self.solutions.borrow_mut().insert(entity, solution);
    }

    pub fn solution_for(&self, entity: &EntityId) -> Option<JumpSolution> {
        self.solutions.borrow().get(entity).copied()
    }

    pub fn clear_solution(&self, entity: &EntityId) {
        self.solutions.borrow_mut().remove(entity);
    }
}
