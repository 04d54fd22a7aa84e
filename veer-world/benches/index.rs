use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use veer_core::{EntityId, Vec3};
use veer_world::{Entity, Steering, SteeringBehavior, World};

struct DriftBehavior;

impl SteeringBehavior for DriftBehavior {
    fn compute(&mut self, _agent: &EntityId, _world: &mut World) -> Steering {
        Steering::linear(Vec3::new(1.0, 0.0, 0.0))
    }
}

fn populated_world(count: usize, spacing: f32) -> World {
    let side = (count as f32).cbrt().ceil() as usize;
    let mut world = World::new(10_000.0, 10_000.0, 10_000.0, 50.0);
    for i in 0..count {
        let x = (i % side) as f32 * spacing;
        let y = ((i / side) % side) as f32 * spacing;
        let z = (i / (side * side)) as f32 * spacing;
        let id = format!("agent{i}");
        world.insert_entity(Entity::steerable(id.as_str(), Vec3::new(x, y, z), Vec3::splat(1.0)));
        let entity_id = EntityId::from(id);
        let steer = world.steerable_mut(&entity_id).expect("steerable");
        steer.max_acceleration = 10.0;
        steer.max_speed = 4.0;
        steer.set_behavior(Box::new(DriftBehavior));
    }
    world
}

fn bench_nearby_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("veer-world/get_nearby_objects");

    for &n in &[1_000usize, 10_000usize] {
        let world = populated_world(n, 10.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                let records = world.get_nearby_objects(Vec3::new(25.0, 25.0, 25.0));
                black_box(records.len());
            })
        });
    }

    group.finish();
}

fn bench_step_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("veer-world/step_all");

    for &n in &[1_000usize, 10_000usize] {
        let mut world = populated_world(n, 10.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                world.step_all();
                black_box(world.entity_count());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nearby_query, bench_step_all);
criterion_main!(benches);
