use std::cell::Cell;
use std::rc::Rc;

use veer_core::{EntityId, MemorySink, Vec3};
use veer_nav::{JumpDescriptor, JumpSolution};
use veer_world::{Entity, IdleBehavior, JumpError, Steering, SteeringBehavior, World};

/// Minimal jump-slot policy: launches as soon as the entity is ready.
struct LaunchBehavior;

impl SteeringBehavior for LaunchBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let ready = world
            .steerable(agent)
            .map(|s| s.is_jump_ready() && !s.is_jump_taken_off())
            .unwrap_or(false);
        if ready {
            world.take_off(agent);
        }
        Steering::NONE
    }
}

/// Flags when it gets computed; used to prove slot swaps are rejected.
struct FlagBehavior(Rc<Cell<bool>>);

impl SteeringBehavior for FlagBehavior {
    fn compute(&mut self, _agent: &EntityId, _world: &mut World) -> Steering {
        self.0.set(true);
        Steering::NONE
    }
}

fn jump_world(gravity: f32) -> (World, Rc<MemorySink>, EntityId) {
    let sink = Rc::new(MemorySink::new());
    let mut world = World::new(1000.0, 1000.0, 1000.0, 10.0).with_diagnostics(sink.clone());
    world.set_gravity(gravity);
    world.insert_entity(Entity::steerable("jumper", Vec3::ZERO, Vec3::splat(1.0)));
    (world, sink, EntityId::from("jumper"))
}

fn descriptor(takeoff: Vec3, landing: Vec3, radius: f32) -> Rc<JumpDescriptor> {
    Rc::new(JumpDescriptor::new(takeoff, landing, radius))
}

#[test]
fn infeasible_jump_fails_and_leaves_state_untouched() {
    let (mut world, sink, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 1.0;
    }
    let desc = descriptor(Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0), 5.0);

    let result = world.jump(&id, Box::new(IdleBehavior), Rc::clone(&desc));

    assert_eq!(result, Err(JumpError::Unsolvable));
    let steer = world.steerable(&id).expect("steerable");
    assert!(!steer.is_jump_initiated());
    assert_eq!(steer.target_position(), None);
    assert!(desc.solution_for(&id).is_none());
    assert_eq!(
        sink.lines(),
        vec!["[Steerable]: Equation cannot be solved. (jumper)".to_string()]
    );
}

#[test]
fn negative_discriminant_is_unsolvable() {
    // Landing far above the takeoff with a weak launch.
    let (mut world, _, id) = jump_world(-1000.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 1.0;
        steer.max_speed = 1.0;
    }
    let desc = descriptor(Vec3::new(100.0, 200.0, 300.0), Vec3::new(400.0, 500.0, 600.0), 35.0);

    assert_eq!(
        world.jump(&id, Box::new(IdleBehavior), desc),
        Err(JumpError::Unsolvable)
    );
}

#[test]
fn zero_gravity_is_unsolvable() {
    let (mut world, _, id) = jump_world(0.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 10.0;
    }
    let desc = descriptor(Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0), 1.0);

    assert_eq!(
        world.jump(&id, Box::new(IdleBehavior), desc),
        Err(JumpError::Unsolvable)
    );
}

#[test]
fn feasible_jump_initiates_and_caches_the_solution() {
    let (mut world, sink, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
        steer.set_target_entity(EntityId::from("someone"));
    }
    let takeoff = Vec3::new(1.0, 0.0, 0.0);
    let desc = descriptor(takeoff, Vec3::new(51.0, 0.0, 0.0), 5.0);

    let result = world.jump(&id, Box::new(IdleBehavior), Rc::clone(&desc));
    assert_eq!(result, Ok(()));

    let steer = world.steerable(&id).expect("steerable");
    assert!(steer.is_jump_initiated());
    assert!(!steer.is_jump_ready());
    assert!(!steer.is_jump_taken_off());
    assert_eq!(steer.jump_time(), 0.0);
    assert_eq!(steer.target_position(), Some(takeoff));
    assert_eq!(steer.target_entity(), None);

    let solution = desc.solution_for(&id).expect("cached");
    assert!((solution.time - 2.0).abs() < 1e-4);
    assert!((solution.vx - 25.0).abs() < 1e-3);
    assert!(solution.vz.abs() < 1e-6);

    assert_eq!(
        sink.lines(),
        vec!["[Steerable]: Jump initiated. (jumper)".to_string()]
    );
}

#[test]
fn target_and_behavior_mutation_is_rejected_during_a_jump() {
    let (mut world, _, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
    }
    let takeoff = Vec3::new(400.0, 0.0, 400.0);
    let desc = descriptor(takeoff, Vec3::new(410.0, 0.0, 400.0), 1.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    let computed = Rc::new(Cell::new(false));
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.set_target_position(Vec3::new(9.0, 9.0, 9.0));
        steer.unset_target_position();
        steer.set_target_entity(EntityId::from("other"));
        steer.set_hide_target_entity(EntityId::from("other"));
        steer.set_behavior(Box::new(FlagBehavior(Rc::clone(&computed))));
        steer.set_jump_behavior(Box::new(FlagBehavior(Rc::clone(&computed))));
    }

    let steer = world.steerable(&id).expect("steerable");
    assert_eq!(steer.target_position(), Some(takeoff));
    assert_eq!(steer.target_entity(), None);
    assert_eq!(steer.hide_target_entity(), None);
    assert!(!steer.has_jump_behavior());

    // The run-up policy is still the one `jump` installed.
    world.step(&id);
    assert!(!computed.get());
}

#[test]
fn run_up_reaching_the_takeoff_radius_marks_ready() {
    let (mut world, sink, id) = jump_world(-10.0);
    let ready_calls = Rc::new(Cell::new(0u32));
    let observed = Rc::clone(&ready_calls);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
        steer.set_jump_behavior(Box::new(LaunchBehavior));
        steer.set_jump_ready_listener(Box::new(move |_| observed.set(observed.get() + 1)));
    }
    let desc = descriptor(Vec3::new(1.0, 0.0, 0.0), Vec3::new(51.0, 0.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    world.step(&id);

    assert!(world.steerable(&id).expect("steerable").is_jump_ready());
    assert_eq!(ready_calls.get(), 1);
    assert_eq!(
        sink.lines(),
        vec![
            "[Steerable]: Jump initiated. (jumper)".to_string(),
            "[Steerable]: Jump ready. (jumper)".to_string(),
        ]
    );
}

#[test]
fn ready_is_not_triggered_outside_the_radius() {
    let (mut world, _, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
        steer.set_jump_behavior(Box::new(LaunchBehavior));
    }
    let desc = descriptor(Vec3::new(500.0, 0.0, 500.0), Vec3::new(510.0, 0.0, 500.0), 35.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    world.step(&id);

    assert!(!world.steerable(&id).expect("steerable").is_jump_ready());
}

#[test]
fn ready_without_a_jump_behavior_is_reported_only() {
    let (mut world, sink, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
    }
    let desc = descriptor(Vec3::new(1.0, 0.0, 0.0), Vec3::new(51.0, 0.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    world.step(&id);

    assert!(!world.steerable(&id).expect("steerable").is_jump_ready());
    assert!(sink
        .lines()
        .contains(&"[Steerable]: No jump behavior set. (jumper)".to_string()));
}

#[test]
fn ready_fires_once_even_when_lingering_in_the_radius() {
    let (mut world, sink, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
        steer.set_jump_behavior(Box::new(IdleBehavior));
    }
    let desc = descriptor(Vec3::new(1.0, 0.0, 0.0), Vec3::new(51.0, 0.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    world.step(&id);
    world.step(&id);
    world.step(&id);

    let ready_lines = sink
        .lines()
        .iter()
        .filter(|l| l.contains("Jump ready."))
        .count();
    assert_eq!(ready_lines, 1);
}

#[test]
fn takeoff_loads_the_cached_launch_velocity() {
    let (mut world, _, id) = jump_world(-10.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
        steer.velocity = Vec3::new(999.0, 999.0, 999.0);
    }
    let desc = descriptor(Vec3::new(1.0, 0.0, 0.0), Vec3::new(51.0, 0.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    assert!(world.take_off(&id));

    let steer = world.steerable(&id).expect("steerable");
    assert!((steer.velocity.x - 25.0).abs() < 1e-3);
    assert_eq!(steer.velocity.y, 10.0);
    assert!(steer.velocity.z.abs() < 1e-6);
    assert!(steer.is_jump_taken_off());
    assert!(!steer.limit_velocity);
}

#[test]
fn takeoff_without_a_solved_descriptor_is_refused() {
    let (mut world, _, id) = jump_world(-10.0);
    assert!(!world.take_off(&id));
    assert!(!world.steerable(&id).expect("steerable").is_jump_taken_off());
}

#[test]
fn gravity_pulls_airborne_entities_down() {
    let (mut world, _, id) = jump_world(-24.0);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 1.0;
        steer.max_speed = 10.0;
        steer.set_behavior(Box::new(IdleBehavior));
        steer.set_jump_behavior(Box::new(IdleBehavior));
    }
    let desc = descriptor(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), Rc::clone(&desc))
        .expect("feasible");

    // Stretch the flight so it does not complete during this test.
    desc.cache_solution(
        id.clone(),
        JumpSolution {
            vx: 6.0,
            vz: 0.0,
            time: 999.0,
        },
    );
    assert!(world.take_off(&id));

    world.step(&id);
    let steer = world.steerable(&id).expect("steerable");
    assert!(steer.velocity.y < 1.0);
    assert!(steer.jump_time() > 0.0);

    let y1 = world.get_entity_by_id(&id).expect("entity").position().y;
    for _ in 0..20 {
        world.step(&id);
    }
    let y2 = world.get_entity_by_id(&id).expect("entity").position().y;
    assert!(y2 < y1);
}

#[test]
fn flight_completes_at_the_solved_flight_time() {
    let (mut world, sink, id) = jump_world(-24.0);
    let completions = Rc::new(Cell::new(0u32));
    let observed = Rc::clone(&completions);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 1.0;
        steer.max_speed = 10.0;
        steer.set_jump_behavior(Box::new(LaunchBehavior));
        steer.set_jump_completion_listener(Box::new(move |_| observed.set(observed.get() + 1)));
    }
    let desc = descriptor(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");

    let mut steps = 0;
    loop {
        world.step(&id);
        steps += 1;
        assert!(steps < 60, "jump never completed");
        let steer = world.steerable(&id).expect("steerable");
        if steps > 2 && !steer.is_jump_taken_off() {
            break;
        }
    }

    let steer = world.steerable(&id).expect("steerable");
    assert!(!steer.is_jump_initiated());
    assert!(!steer.is_jump_ready());
    assert!(!steer.is_jump_taken_off());
    assert_eq!(steer.velocity, Vec3::ZERO);
    assert_eq!(steer.linear_acceleration, Vec3::ZERO);
    assert_eq!(steer.jump_time(), 0.0);
    assert!(steer.limit_velocity);

    // Landed on the descriptor's landing height.
    assert_eq!(world.get_entity_by_id(&id).expect("entity").position().y, 0.0);
    assert_eq!(completions.get(), 1);
    assert_eq!(
        sink.lines()
            .iter()
            .filter(|l| l.contains("Jump completed."))
            .count(),
        1
    );
}

#[test]
fn completion_listener_can_be_removed() {
    let (mut world, _, id) = jump_world(-10.0);
    let calls = Rc::new(Cell::new(0u32));
    let observed = Rc::clone(&calls);
    world
        .steerable_mut(&id)
        .expect("steerable")
        .set_jump_completion_listener(Box::new(move |_| observed.set(observed.get() + 1)));

    world.complete_jump(&id, false);
    assert_eq!(calls.get(), 1);

    world
        .steerable_mut(&id)
        .expect("steerable")
        .remove_jump_completion_listener();
    world.complete_jump(&id, false);
    assert_eq!(calls.get(), 1);
}

#[test]
fn cancel_jump_resets_silently_without_snapping() {
    let (mut world, sink, id) = jump_world(-10.0);
    let calls = Rc::new(Cell::new(0u32));
    let observed = Rc::clone(&calls);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.jump_speed = 10.0;
        steer.max_speed = 30.0;
        steer.set_jump_completion_listener(Box::new(move |_| observed.set(observed.get() + 1)));
    }

    // Nothing to cancel yet.
    assert!(!world.cancel_jump(&id));

    let desc = descriptor(Vec3::new(1.0, 5.0, 0.0), Vec3::new(51.0, 5.0, 0.0), 5.0);
    world
        .jump(&id, Box::new(IdleBehavior), desc)
        .expect("feasible");
    world.set_position(&id, Vec3::new(0.0, 3.0, 0.0));
    sink.clear();

    assert!(world.cancel_jump(&id));

    let steer = world.steerable(&id).expect("steerable");
    assert!(!steer.is_jump_initiated());
    assert!(!steer.is_jump_ready());
    assert!(!steer.is_jump_taken_off());
    assert_eq!(steer.velocity, Vec3::ZERO);
    assert_eq!(steer.linear_acceleration, Vec3::ZERO);
    assert_eq!(steer.jump_time(), 0.0);
    assert!(steer.limit_velocity);

    // Position untouched, listener not called, nothing reported.
    assert_eq!(
        world.get_entity_by_id(&id).expect("entity").position(),
        Vec3::new(0.0, 3.0, 0.0)
    );
    assert_eq!(calls.get(), 0);
    assert!(sink.lines().is_empty());

    // Already idle.
    assert!(!world.cancel_jump(&id));
}
