//! End-to-end jump: run-up, ready, takeoff, ballistic flight, landing.

use std::cell::Cell;
use std::rc::Rc;

use veer_behaviors::{JumpBehavior, SeekBehavior};
use veer_core::{EntityId, MemorySink, Vec3};
use veer_nav::JumpDescriptor;
use veer_world::{Entity, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JumpFlags {
    initiated: bool,
    ready: bool,
    airborne: bool,
}

fn flags(world: &World, id: &EntityId) -> JumpFlags {
    let steer = world.steerable(id).expect("steerable");
    JumpFlags {
        initiated: steer.is_jump_initiated(),
        ready: steer.is_jump_ready(),
        airborne: steer.is_jump_taken_off(),
    }
}

#[test]
fn jump_lifecycle_runs_in_strict_order() {
    let sink = Rc::new(MemorySink::new());
    let mut world = World::new(1000.0, 1000.0, 1000.0, 10.0).with_diagnostics(sink.clone());
    world.set_gravity(-24.0);

    world.insert_entity(Entity::steerable("runner", Vec3::ZERO, Vec3::splat(1.0)));
    let id = EntityId::from("runner");

    let completions = Rc::new(Cell::new(0u32));
    let observed = Rc::clone(&completions);
    {
        let steer = world.steerable_mut(&id).expect("steerable");
        steer.max_speed = 10.0;
        steer.max_acceleration = 50.0;
        steer.jump_speed = 1.0;
        steer.set_jump_behavior(Box::new(JumpBehavior));
        steer.set_jump_completion_listener(Box::new(move |_| observed.set(observed.get() + 1)));
    }

    let descriptor = Rc::new(JumpDescriptor::new(
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        0.6,
    ));

    world
        .jump(&id, Box::new(SeekBehavior), Rc::clone(&descriptor))
        .expect("feasible jump");
    assert_eq!(
        flags(&world, &id),
        JumpFlags {
            initiated: true,
            ready: false,
            airborne: false
        }
    );
    // The run-up targets the takeoff position.
    assert_eq!(
        world.steerable(&id).expect("steerable").target_position(),
        Some(Vec3::new(0.5, 0.0, 0.0))
    );

    let mut observed_states = vec![flags(&world, &id)];
    let mut steps = 0;
    loop {
        world.step(&id);
        steps += 1;
        assert!(steps < 120, "jump never completed");

        let state = flags(&world, &id);
        if observed_states.last() != Some(&state) {
            observed_states.push(state);
        }
        if state
            == (JumpFlags {
                initiated: false,
                ready: false,
                airborne: false,
            })
        {
            break;
        }
    }

    // initiated -> ready -> airborne -> idle, no state skipped.
    assert_eq!(
        observed_states,
        vec![
            JumpFlags {
                initiated: true,
                ready: false,
                airborne: false
            },
            JumpFlags {
                initiated: true,
                ready: true,
                airborne: false
            },
            JumpFlags {
                initiated: true,
                ready: true,
                airborne: true
            },
            JumpFlags {
                initiated: false,
                ready: false,
                airborne: false
            },
        ]
    );

    // Landed at the descriptor's landing height, fully reset.
    let entity = world.get_entity_by_id(&id).expect("entity");
    assert_eq!(entity.position().y, 0.0);
    let steer = world.steerable(&id).expect("steerable");
    assert_eq!(steer.velocity, Vec3::ZERO);
    assert_eq!(steer.linear_acceleration, Vec3::ZERO);
    assert_eq!(steer.jump_time(), 0.0);
    assert!(steer.limit_velocity);
    assert_eq!(completions.get(), 1);

    let lines = sink.lines();
    assert!(lines.contains(&"[Steerable]: Jump initiated. (runner)".to_string()));
    assert!(lines.contains(&"[Steerable]: Jump ready. (runner)".to_string()));
    assert!(lines.contains(&"[Steerable]: Jump completed. (runner)".to_string()));
}
