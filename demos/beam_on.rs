// Configure a gun from JSON, steer it with commands and fire a short run
//
// Run with RUST_LOG=debug to see every generated event.

use particle_gun::messenger::COMMANDS;
use particle_gun::{best_unit_vector, Dimension, GunConfig, GunMessenger, RunManager};
use tracing_subscriber::EnvFilter;

fn main() -> particle_gun::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GunConfig::from_json_str(
        r#"{
            "lab_half_extents": [1000.0, 1000.0, 1000.0],
            "particle": "e-",
            "energy": 6.0,
            "seed": 2024
        }"#,
    )?;
    let mut gun = config.build()?;

    println!("Available commands:");
    for (name, synopsis) in COMMANDS {
        println!("  {} {}", name, synopsis);
    }

    let messenger = GunMessenger::new();
    let summary = messenger.apply_macro(
        &mut gun,
        "\
/gun/particle proton
/gun/energy 150 MeV
/gun/position 0 0 -90 cm
/gun/aimAt 10 10 0 cm
/beam/distribution gaussian 0.01
/beam/dispersionOn true
/gun/position 0 0 -200 cm
",
    );
    println!(
        "macro: {} commands applied, {} rejected",
        summary.applied,
        summary.failures.len()
    );

    let mut run = RunManager::new(gun);
    let events = run.beam_on(5);
    for event in &events {
        for particle in event.primaries() {
            println!(
                "event {:>3}: {} from {} along [{:.4}, {:.4}, {:.4}]",
                event.event_id,
                particle.name(),
                best_unit_vector(particle.position, Dimension::Length),
                particle.direction[0],
                particle.direction[1],
                particle.direction[2]
            );
        }
    }

    if let Some(report) = run.generator().last_fired() {
        println!(
            "last fired: {} at {}",
            report.particle_name, report.energy_display
        );
    }
    Ok(())
}
