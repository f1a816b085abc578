use kinetic2d::*;

fn main() -> Result<()> {
    let mut world = World::with_settings(WorldSettings {
        gravity: 98.1,
        bounds: Bounds::rect(0.0, 0.0, 400.0, 300.0),
        ..WorldSettings::default()
    })?;
    world.set_boundary_callback(|id, edge| println!("body {id} hit the {} wall", edge.name()));

    world.add_body(
        Body::builder()
            .rectangle(400.0, 20.0)
            .position(0.0, 280.0)
            .material(Material::wood())
            .fixed()
            .build()?,
    );

    let materials = [Material::rubber(), Material::steel(), Material::ice()];
    let mut balls = Vec::new();
    for (i, material) in materials.into_iter().enumerate() {
        let id = world.add_body(
            Body::builder()
                .circle(10.0)
                .position(60.0 + i as f32 * 120.0, 20.0)
                .velocity(15.0, 0.0)
                .material(material)
                .build()?,
        );
        balls.push(id);
    }

    for frame in 0..600 {
        let stats = world.step(1.0 / 60.0)?;
        if frame % 60 == 0 {
            println!(
                "t = {:>4.1}s  contacts = {}  energy = {:.1}",
                frame as f32 / 60.0,
                stats.contacts,
                world.total_energy()
            );
        }
    }

    for id in balls {
        if let Some(body) = world.body(id) {
            println!(
                "body {id}: position {:?}, resting = {}",
                body.position(),
                body.is_resting()
            );
        }
    }
    Ok(())
}
