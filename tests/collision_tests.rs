use approx::assert_relative_eq;
use kinetic2d::*;

fn ball(x: f32, vx: f32, mass: f32, elasticity: f32) -> Body {
    Body::builder()
        .circle(5.0)
        .position(x, 0.0)
        .velocity(vx, 0.0)
        .mass(mass)
        .elasticity(elasticity)
        .friction(0.0)
        .vacuum()
        .build()
        .unwrap()
}

fn weightless_world() -> World {
    let mut world = World::new();
    world.set_gravity(0.0);
    world
}

#[test]
fn equal_elastic_bodies_exchange_velocities() {
    let mut world = weightless_world();
    let a = world.add_body(ball(0.0, 10.0, 1.0, 1.0));
    let b = world.add_body(ball(9.0, -10.0, 1.0, 1.0));

    let stats = world.step(0.001).expect("step");

    assert_eq!(stats.contacts, 1);
    assert_relative_eq!(world.body(a).unwrap().vx(), -10.0, epsilon = 1e-4);
    assert_relative_eq!(world.body(b).unwrap().vx(), 10.0, epsilon = 1e-4);
}

#[test]
fn inelastic_collision_scales_energy_by_restitution_squared() {
    let e = 0.6;
    let mut a = ball(0.0, 10.0, 1.0, e);
    let mut b = ball(9.0, -10.0, 1.0, e);
    let before = a.kinetic_energy() + b.kinetic_energy();

    a.resolve_collision(&mut b).expect("approaching pair");

    let after = a.kinetic_energy() + b.kinetic_energy();
    assert_relative_eq!(after, e * e * before, epsilon = 1e-3);
}

#[test]
fn dynamic_pair_conserves_momentum() {
    let mut a = Body::builder()
        .circle(5.0)
        .velocity(4.0, 1.0)
        .mass(1.0)
        .elasticity(0.7)
        .build()
        .unwrap();
    let mut b = Body::builder()
        .circle(5.0)
        .position(6.0, 5.0)
        .velocity(-2.0, 0.5)
        .mass(3.0)
        .elasticity(0.3)
        .build()
        .unwrap();
    let momentum = |a: &Body, b: &Body| a.velocity() * a.mass() + b.velocity() * b.mass();
    let before = momentum(&a, &b);

    assert!(a.resolve_collision(&mut b).is_some());

    let after = momentum(&a, &b);
    assert_relative_eq!(before.x, after.x, epsilon = 1e-4);
    assert_relative_eq!(before.y, after.y, epsilon = 1e-4);
}

#[test]
fn perfectly_elastic_floor_bounce_preserves_speed() {
    let mut world = weightless_world();
    world.add_body(
        Body::builder()
            .rectangle(200.0, 20.0)
            .position(-100.0, 10.0)
            .elasticity(1.0)
            .fixed()
            .build()
            .unwrap(),
    );
    let id = world.add_body(
        Body::builder()
            .circle(5.0)
            .position(0.0, 0.0)
            .velocity(0.0, 40.0)
            .material(Material::ideal())
            .vacuum()
            .build()
            .unwrap(),
    );

    let speed_before = world.body(id).unwrap().speed();
    world.step(0.01).expect("step");

    let body = world.body(id).unwrap();
    assert_relative_eq!(body.speed(), speed_before, epsilon = 1e-3);
    assert!(body.vy() < 0.0);
    assert!(!body.is_resting());
}

#[test]
fn heavy_static_body_is_not_moved() {
    let mut anvil = Body::builder()
        .rectangle(20.0, 20.0)
        .position(10.0, 0.0)
        .mass(5.0e6)
        .build()
        .unwrap();
    let mut pebble = ball(0.0, 30.0, 1.0, 0.5);
    assert!(anvil.is_static());

    pebble.resolve_collision(&mut anvil);

    assert_eq!(anvil.velocity(), Vec2::ZERO);
    assert_relative_eq!(pebble.vx(), -15.0, epsilon = 1e-4);
}

#[test]
fn stacked_boxes_rest_on_terrain() {
    let mut world = World::new();
    world.add_body(
        Body::builder()
            .rectangle(200.0, 20.0)
            .position(0.0, 100.0)
            .fixed()
            .build()
            .unwrap(),
    );
    let crate_box = world.add_body(
        Body::builder()
            .rectangle(20.0, 20.0)
            .position(90.0, 79.9)
            .elasticity(0.2)
            .friction(0.0)
            .vacuum()
            .build()
            .unwrap(),
    );

    for _ in 0..120 {
        world.step(1.0 / 60.0).unwrap();
    }

    let body = world.body(crate_box).unwrap();
    assert!(body.is_resting());
    assert!((body.y() - 80.0).abs() < 0.2, "y = {}", body.y());
}

#[test]
fn observer_reports_contacts_in_world_steps() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let mut world = weightless_world();
    let counter = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&counter);
    world.set_collision_observer(move |_| {
        sink.fetch_add(1, Ordering::Relaxed);
    });

    world.add_body(ball(0.0, 10.0, 1.0, 1.0));
    world.add_body(ball(9.0, -10.0, 1.0, 1.0));
    world.step(0.001).unwrap();

    assert_eq!(counter.load(Ordering::Relaxed), 1);
}

#[test]
fn noop_backend_degrades_to_bounding_boxes() {
    let mut world = weightless_world();
    world.set_shape_backend(NoopBackend);
    world.detector_mut().set_auto_resolve(false);
    // Diagonal neighbours: boxes overlap, circles do not.
    world.add_body(ball(0.0, 0.0, 1.0, 1.0));
    let mut other = ball(8.0, 0.0, 1.0, 1.0);
    other.set_position(Vec2::new(8.0, 8.0));
    world.add_body(other);

    assert_eq!(world.detector().backend_name(), "noop");
    assert_eq!(world.step(0.0).unwrap().contacts, 1);
}

#[test]
fn spatial_queries_through_world() {
    let mut world = weightless_world();
    let a = world.add_body(ball(0.0, 0.0, 1.0, 1.0));
    let b = world.add_body(ball(30.0, 0.0, 1.0, 1.0));

    assert!(world.point_in_body(a, Vec2::new(5.0, 5.0)));
    assert!(!world.point_in_body(b, Vec2::new(5.0, 5.0)));
    assert_eq!(world.bodies_at_point(Vec2::new(35.0, 5.0)), vec![b]);
    assert_eq!(
        world.bodies_in_rectangle(Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(50.0, 3.0))),
        vec![a, b]
    );
    assert_eq!(world.bodies_near_point(Vec2::new(28.0, 5.0), 3.0), vec![b]);
}

/// Three touching elastic balls in a row, the left one moving right. The
/// sweep resolves pairs in insertion order and later pairs see earlier
/// results, so the final velocities depend on that order.
fn cradle_velocities(reversed: bool) -> [f32; 3] {
    let mut world = weightless_world();
    let mut balls = vec![(0.0, 10.0), (9.0, 0.0), (18.0, 0.0)];
    if reversed {
        balls.reverse();
    }
    let mut ids: Vec<(f32, EntityId)> = balls
        .into_iter()
        .map(|(x, vx)| (x, world.add_body(ball(x, vx, 1.0, 1.0))))
        .collect();

    world.step(0.0).expect("step");

    ids.sort_by(|a, b| a.0.total_cmp(&b.0));
    let vx = |i: usize| world.body(ids[i].1).unwrap().vx();
    [vx(0), vx(1), vx(2)]
}

#[test]
fn sweep_order_follows_insertion_order() {
    let forward = cradle_velocities(false);
    assert_relative_eq!(forward[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(forward[1], 0.0, epsilon = 1e-4);
    assert_relative_eq!(forward[2], 10.0, epsilon = 1e-4);

    let reversed = cradle_velocities(true);
    assert_relative_eq!(reversed[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(reversed[1], 10.0, epsilon = 1e-4);
    assert_relative_eq!(reversed[2], 0.0, epsilon = 1e-4);
}
