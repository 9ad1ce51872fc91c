use anyhow::Context;
use arm_ik::controller::{ArmController, UnreachablePolicy};
use arm_ik::ik::{ArmChain, ElbowBranch};
use clap::{Parser, ValueEnum};
use glam::DVec3;
use std::time::Duration;

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    Reset,
    Hold,
}

#[derive(Clone, Copy, ValueEnum)]
enum Elbow {
    Up,
    Down,
}

#[derive(Parser)]
#[command(version, about = "Headless two-link arm IK demo", long_about = None)]
struct Args {
    /// Length of the first link.
    #[arg(long, default_value_t = 1.0)]
    upper: f64,
    /// Length of the second link.
    #[arg(long, default_value_t = 1.0)]
    lower: f64,
    /// Target position as x,y,z in arm-local coordinates.
    #[arg(long, value_parser = parse_target, default_value = "1,0,0")]
    target: DVec3,
    /// Seconds before the solve runs.
    #[arg(long, default_value_t = 5.0)]
    delay: f64,
    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Seconds of simulated time to run.
    #[arg(long, default_value_t = 6.0)]
    duration: f64,
    /// What to do with the pose when the target is out of reach.
    #[arg(long, value_enum, default_value_t = Policy::Reset)]
    policy: Policy,
    /// Elbow branch to solve for.
    #[arg(long, value_enum, default_value_t = Elbow::Up)]
    elbow: Elbow,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_target(s: &str) -> Result<DVec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts[..] {
        [x, y, z] => Ok(DVec3::new(x, y, z)),
        _ => Err(format!("expected 3 comma separated values, got {}", parts.len())),
    }
}

fn seconds(name: &str, value: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| format!("invalid {name} of {value} seconds"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    anyhow::ensure!(args.fps > 0, "fps must be positive");
    let delay = seconds("delay", args.delay)?;
    let end = seconds("duration", args.duration)?;

    let chain = ArmChain::builder()
        .links(args.upper, args.lower)
        .elbow_branch(match args.elbow {
            Elbow::Up => ElbowBranch::Up,
            Elbow::Down => ElbowBranch::Down,
        })
        .build()?;

    let policy = match args.policy {
        Policy::Reset => UnreachablePolicy::Reset,
        Policy::Hold => UnreachablePolicy::HoldLastPose,
    };

    let mut controller = ArmController::new(chain)
        .with_policy(policy)
        .with_target(args.target);

    log::info!(
        "Arm links {} + {}, reach [{}, {}]",
        args.upper,
        args.lower,
        chain.min_reach(),
        chain.max_reach()
    );

    controller.schedule_solve(delay);

    let frame = Duration::from_secs(1) / args.fps;

    while controller.elapsed() < end {
        if let Some(result) = controller.update(frame) {
            if result.reachable {
                log::info!(
                    "t={:.3}s solved {} -> {}",
                    controller.elapsed().as_secs_f64(),
                    controller.target(),
                    result.angles
                );
            } else {
                log::warn!(
                    "t={:.3}s target {} unreachable at distance {:.4}",
                    controller.elapsed().as_secs_f64(),
                    controller.target(),
                    result.distance
                );
            }
        }
    }

    let pose = controller.frames();
    println!("pose: {}", controller.pose());
    for (name, point) in ["shoulder", "elbow", "tip"].iter().zip(pose.positions()) {
        println!("{name:>8}: ({:.4}, {:.4}, {:.4})", point.x, point.y, point.z);
    }

    if controller.pending_solves() > 0 {
        log::warn!("Exited before the scheduled solve ran");
    }

    Ok(())
}
