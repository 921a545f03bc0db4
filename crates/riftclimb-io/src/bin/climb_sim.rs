use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use riftclimb_core::{types::Isometry, vec3, math::yaw_deg};
use riftclimb_io::{default_scene, default_script, hash_hex, load_profile, load_scene, load_script, save_profile, save_scene};
use riftclimb_world::{AnimRecorder, ClimbProfile, ClimbWorld};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name="climb_sim", version, about="Run a scripted climber through a scene and print its state per tick")]
struct Opts {
    /// Climb profile JSON (default: built-in tuning)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Scene JSON (default: one ledge and one free-climbable wall)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Input script JSON, a list of {ticks, input, mode}
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,

    /// Agent start position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, 0.1, 0.0])]
    start: Vec<f32>,

    /// Write the effective profile and scene next to each other and exit
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Only print ticks where the climb state changed
    #[arg(long, action=ArgAction::SetTrue)]
    changes: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let opts = Opts::parse();

    let profile = match &opts.profile {
        Some(p) => load_profile(p)?,
        None => ClimbProfile::default(),
    };
    let scene = match &opts.scene {
        Some(p) => load_scene(p)?,
        None => default_scene(),
    };
    let script = match &opts.script {
        Some(p) => load_script(p)?,
        None => default_script(),
    };

    if let Some(dir) = &opts.dump {
        std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        save_profile(&profile, &dir.join("profile.json"), true)?;
        save_scene(&scene, &dir.join("scene.json"), true)?;
        println!("Wrote profile.json and scene.json to {}", dir.display());
        return Ok(());
    }

    let mut world = ClimbWorld::new(scene, profile).context("profile rejected")?;
    let start = vec3(opts.start[0], opts.start[1], opts.start[2]);
    let agent = world.spawn_agent(Isometry { pos: start, ..Default::default() });
    let mut sink = AnimRecorder::default();
    let mut last = None;
    let mut hash = [0u8; 32];

    println!("{:>5} {:<13} {:>5} {:>6} {:>24} {:>7}", "tick", "state", "busy", "hang", "root", "yaw");
    for step in &script {
        world.set_input(agent, step.input, step.mode);
        for _ in 0..step.ticks {
            let report = world.step(opts.dt, &mut sink);
            hash = report.hash;
            let Some(a) = world.agent(agent) else { break };
            let kind = a.machine.kind();
            if opts.changes && last == Some(kind) { continue; }
            last = Some(kind);
            let p = a.root.pos;
            println!(
                "{:>5} {:<13} {:>5} {:>6.3} {:>24} {:>7.1}",
                report.tick,
                format!("{kind:?}"),
                a.machine.busy(),
                a.machine.hanging_blend(),
                format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
                yaw_deg(a.root.rot),
            );
        }
    }

    println!("Ticks:  {}", world.tick());
    println!("Frames: {}", sink.frames.len());
    println!("Hash:   {}", hash_hex(hash));
    Ok(())
}
