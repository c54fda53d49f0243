use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use third_person_core::{
    CapsuleCollider, FixedTimestep, FollowCamera, InputLatch, InputSample, OrbitCamera, Pose,
    RapierQueryWorld, RigidBody, ThirdPersonController, TriggerTag, Vec3,
};

mod config;
mod integrator;
mod scene;

use config::SandboxConfig;
use integrator::KinematicIntegrator;
use scene::PortalPair;

#[derive(Parser, Debug)]
#[command(name = "sandbox")]
#[command(about = "Headless run of the third-person controller and camera rig")]
struct Cli {
    /// JSON file overriding any subset of the tuning values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of fixed ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Simulated render frame rate
    #[arg(long, default_value_t = 60.0)]
    frame_hz: f32,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();
    let config = SandboxConfig::load(cli.config.as_deref())?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    run(&cli, &config)
}

/// Scripted input for a given fixed tick: settle, walk, run through the portal, jump, strafe.
fn scripted_input(tick: u32) -> InputSample {
    match tick {
        0..50 => InputSample::default(),
        50..100 => InputSample::from_raw(0.0, 0.0, 1.0, false),
        100..250 => InputSample::from_raw(0.0, 0.0, 1.0, true),
        250 => InputSample::from_raw(0.0, 1.0, 0.0, false),
        _ => InputSample::from_raw(1.0, 0.0, 0.4, false),
    }
}

fn run(cli: &Cli, config: &SandboxConfig) -> Result<()> {
    if !(cli.frame_hz.is_finite() && cli.frame_hz > 0.0) {
        bail!("--frame-hz must be a positive number, got {}", cli.frame_hz);
    }

    let world = RapierQueryWorld::build(scene::world_defs());
    let tower = world
        .collider_bounds(scene::TOWER_ID)
        .context("tower collider missing from level")?;
    let portals = PortalPair::level();

    let [x, y, z] = config.character.spawn;
    let spawn = Pose::from_translation(Vec3::new(x, y, z));

    let mut controller = ThirdPersonController::builder(config.controller)
        .rigid_body(RigidBody::at(spawn))
        .collider(CapsuleCollider::new(
            Vec3::zeros(),
            config.character.radius,
            config.character.height,
        ))
        .build()?;
    info!("Cursor mode: {:?}", controller.cursor_mode());

    let camera_start = Pose::from_translation(spawn.transform_point(config.follow_camera.offset));
    let mut follow = FollowCamera::new(config.follow_camera, camera_start)?;
    let mut orbit = OrbitCamera::new(config.orbit_camera, camera_start)?;

    let mut clock = FixedTimestep::new(config.fixed_step, config.max_steps_per_frame)?;
    let mut latch = InputLatch::default();
    let integrator = KinematicIntegrator::default();
    let frame_dt = 1.0 / cli.frame_hz;
    let dt = clock.step();

    let mut tick = 0;
    let mut frames = 0u32;
    while tick < cli.ticks {
        frames += 1;
        // One poll per frame; every tick due this frame consumes the same sample.
        latch.store(scripted_input(tick));

        for _ in 0..clock.advance(frame_dt) {
            if tick >= cli.ticks {
                break;
            }

            let report = controller.fixed_tick(&latch.latest(), &world);
            integrator.step(&world, &mut controller, dt);

            let pose = controller.pose();
            if portals.is_touching_entry(pose.translation) {
                controller.triggers_mut().on_trigger_enter(TriggerTag::Portal);
            }
            if controller.triggers().entered {
                let landing = portals.carry(pose);
                controller.teleport(
                    &portals.entry,
                    &portals.exit,
                    landing.translation,
                    landing.rotation,
                );
                controller.triggers_mut().on_trigger_exit(TriggerTag::Portal);
                info!("tick {tick}: portal traversal to {:?}", landing.translation);
                controller.triggers_mut().clear();
            }

            let subject = controller.pose();
            let cam = follow.fixed_tick(&subject, &world, dt);
            let orbit_cam = orbit.fixed_tick(subject.translation, &tower, dt);

            debug!(
                "tick {tick}: phase={:?} pos={:?} vel={:?} cam={:?} occluded={} orbit={:?}",
                report.phase,
                subject.translation,
                report.velocity,
                cam.translation,
                follow.occlusion().colliding,
                orbit_cam.translation,
            );

            if tick % 50 == 0 {
                info!(
                    "tick {tick}: grounded={} pos={:.2?} camera={:.2?} occluded={}",
                    report.grounded,
                    subject.translation,
                    cam.translation,
                    follow.occlusion().colliding,
                );
            }

            tick += 1;
        }
    }

    info!(
        "Finished {tick} ticks over {frames} frames; final position {:.2?}",
        controller.pose().translation
    );
    Ok(())
}
