use approx::assert_relative_eq;
use kinetic2d::*;

fn terrain(y: f32) -> Body {
    Body::builder()
        .rectangle(500.0, 20.0)
        .position(0.0, y)
        .fixed()
        .build()
        .unwrap()
}

#[test]
fn potential_energy_is_measured_from_terrain() {
    let mut world = World::new();
    world.add_body(terrain(100.0));
    world.add_body(
        Body::builder()
            .rectangle(10.0, 10.0)
            .position(0.0, 40.0)
            .mass(2.0)
            .build()
            .unwrap(),
    );

    assert_eq!(world.ground_level(), 100.0);
    assert_relative_eq!(world.potential_energy(), 2.0 * 9.81 * 50.0, epsilon = 1e-3);
    assert_eq!(world.kinetic_energy(), 0.0);
}

#[test]
fn free_fall_trades_potential_for_kinetic() {
    let mut world = World::new();
    world.add_body(terrain(1000.0));
    world.add_body(
        Body::builder()
            .circle(1.0)
            .friction(0.0)
            .vacuum()
            .build()
            .unwrap(),
    );

    let start = world.total_energy();
    for _ in 0..60 {
        world.step(1.0 / 60.0).unwrap();
    }
    let end = world.total_energy();

    assert!(world.kinetic_energy() > 0.0);
    // Semi-implicit Euler gains a little energy per step.
    assert!((end - start).abs() / start < 0.02, "start {start}, end {end}");
}

#[test]
fn inelastic_head_on_loses_energy() {
    let mut world = World::new();
    world.set_gravity(0.0);
    for (x, vx) in [(0.0, 10.0), (9.0, -10.0)] {
        world.add_body(
            Body::builder()
                .circle(5.0)
                .position(x, 0.0)
                .velocity(vx, 0.0)
                .elasticity(0.5)
                .friction(0.0)
                .vacuum()
                .build()
                .unwrap(),
        );
    }

    let before = world.kinetic_energy();
    world.step(0.001).unwrap();
    assert_relative_eq!(world.kinetic_energy(), 0.25 * before, epsilon = 1e-2);
}

#[test]
fn inactive_bodies_hold_no_energy() {
    let mut world = World::new();
    world.add_body(
        Body::builder()
            .velocity(10.0, 0.0)
            .active(false)
            .build()
            .unwrap(),
    );
    assert_eq!(world.kinetic_energy(), 0.0);
    assert_eq!(world.total_energy(), 0.0);
}
