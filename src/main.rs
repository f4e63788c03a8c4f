//! Platformer Headless Runner
//!
//! Plays a scripted run of a level without a window, logs what happens,
//! then replays the recorded inputs and checks that the final state hash
//! matches.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use platformer::{
    game::{
        events::GameEventData,
        render::DrawList,
    },
    replay_session, tick, GameConfig, HeldKeys, InputLatch, InputRecording, Session, TICK_RATE,
    VERSION,
};

/// Headless runner for the platformer simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON level/physics config (defaults to the built-in level)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the final session as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    info!("Platformer v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = match &args.config {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let level = config.validate().context("invalid level config")?;

    let (session, recording) = demo_run(Session::new(level.clone()), args.ticks);

    info!("=== Verifying Determinism ===");
    let hash = session.compute_hash();
    let (replayed, _) = replay_session(&level, &recording, args.ticks);
    let replay_hash = replayed.compute_hash();

    info!("Final State Hash:  {}", hex::encode(hash));
    info!("Replay State Hash: {}", hex::encode(replay_hash));
    info!(
        "Input recording: {} deltas, hash {}",
        recording.delta_count(),
        hex::encode(recording.compute_hash())
    );

    if hash != replay_hash {
        bail!("determinism failure: replay hash differs from live run");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");

    if args.json {
        let json = serde_json::to_string_pretty(&session).context("failed to encode session")?;
        println!("{json}");
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

/// Keys a scripted player holds at tick `t`.
///
/// Runs right with periodic hops, backs off to the left for a while, and
/// presses restart whenever the session is over.
fn scripted_keys(t: u32, game_over: bool) -> HeldKeys {
    let phase = t % 240;
    HeldKeys {
        left: (180..220).contains(&phase),
        right: phase < 150,
        jump: t % 50 < 3,
        restart: game_over,
    }
}

/// Play the scripted run, returning the final session and its inputs.
fn demo_run(mut session: Session, ticks: u32) -> (Session, InputRecording) {
    info!("=== Starting Demo Run ===");

    let mut latch = InputLatch::new();
    let mut recording = InputRecording::new();
    let mut surface = DrawList::new();
    let mut total_events = 0;

    info!("Running {} ticks...", ticks);

    for t in 0..ticks {
        let frame = latch.sample(scripted_keys(t, session.is_game_over()));
        recording.record(session.tick, frame);

        let result = tick(&mut session, frame);
        total_events += result.events.len();

        surface.clear_commands();
        session.draw(&mut surface);

        for event in &result.events {
            match &event.data {
                GameEventData::CoinCollected { coin, new_score, .. } => {
                    info!("Tick {}: coin {} collected (score {})", event.tick, coin, new_score);
                }
                GameEventData::EnemyStomped { enemy, new_score, .. } => {
                    info!("Tick {}: enemy {} stomped (score {})", event.tick, enemy, new_score);
                }
                GameEventData::PlayerKilled { cause } => {
                    info!("Tick {}: player killed ({:?})", event.tick, cause);
                }
                GameEventData::SessionReset { resets } => {
                    info!("Tick {}: restart #{}", event.tick, resets);
                }
                GameEventData::PlayerJumped => {
                    debug!("Tick {}: jump", event.tick);
                }
            }
        }

        // Report every 5 seconds
        if t > 0 && t % (TICK_RATE * 5) == 0 {
            let (x, y, _, _) = session.player.rect.to_floats();
            info!(
                "Tick {}: player at ({:.1}, {:.1}), score {}, {} coins left, {} enemies alive, {} draw calls",
                t,
                x,
                y,
                session.score(),
                session.coins_remaining(),
                session.enemies_alive(),
                surface.len()
            );
        }
    }

    info!("=== Run Results ===");
    info!("Score: {}", session.score());
    info!("Game over: {}", session.is_game_over());
    info!("Restarts: {}", session.resets);
    info!("Total events: {}", total_events);

    (session, recording)
}
