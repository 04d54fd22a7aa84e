use veer_core::{EntityId, Vec3};
use veer_world::World;

/// Snapshot of the agent state most behaviors need.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AgentState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub max_speed: f32,
    pub max_acceleration: f32,
}

pub(crate) fn agent_state(world: &World, agent: &EntityId) -> Option<AgentState> {
    let entity = world.get_entity_by_id(agent)?;
    let steer = entity.steer()?;
    Some(AgentState {
        position: entity.position(),
        velocity: steer.velocity,
        max_speed: steer.max_speed,
        max_acceleration: steer.max_acceleration,
    })
}

/// Full-throttle pull toward `to`, or zero when already there.
pub(crate) fn seek_accel(from: Vec3, to: Vec3, max_acceleration: f32) -> Vec3 {
    let direction = (to - from).normalized();
    direction * max_acceleration
}

/// Arrival steering: match a speed that shrinks inside `slow_down_radius`.
///
/// Returns `None` inside the satisfaction radius (the caller decides whether
/// to also kill the remaining velocity).
pub(crate) fn arrive_accel(
    state: AgentState,
    target: Vec3,
    satisfaction_radius: f32,
    slow_down_radius: f32,
) -> Option<Vec3> {
    const TIME_TO_TARGET: f32 = 0.1;

    let to_target = target - state.position;
    let distance = to_target.length();
    if distance <= satisfaction_radius {
        return None;
    }

    let target_speed = if distance > slow_down_radius {
        state.max_speed
    } else {
        state.max_speed * distance / slow_down_radius
    };
    let target_velocity = to_target.normalized() * target_speed;
    Some((target_velocity - state.velocity) / TIME_TO_TARGET)
}
