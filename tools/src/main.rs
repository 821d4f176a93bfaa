//! trap-runner: terminal front-end for TrapTrack.
//!
//! Usage:
//!   trap-runner --seed 12345 --games 10
//!   trap-runner --interactive --speed fast
//!   trap-runner --ipc-mode --config demos/quick_game.json

mod ipc;
mod render;

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use traptrack_core::{
    clock::GameSpeed,
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    event::GameEvent,
    state::TurnPhase,
};

const MAX_TURNS_PER_GAME: usize = 5_000;
const FRAME: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", clock_seed());
    let games = parse_arg(&args, "--games", 1usize);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let interactive = args.iter().any(|a| a == "--interactive");
    let speed = match args.windows(2).find(|w| w[0] == "--speed").map(|w| w[1].as_str()) {
        Some("fast") => GameSpeed::Fast,
        Some("turbo") => GameSpeed::Turbo,
        _ => GameSpeed::Normal,
    };
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => GameConfig::load(&w[1])?,
        None => GameConfig::default(),
    };

    let mut engine = GameEngine::new(seed, config)?;
    engine.submit(PlayerCommand::SetSpeed { speed })?;

    if ipc_mode {
        ipc::run_ipc_loop(&mut engine)?;
    } else if interactive {
        run_interactive(&mut engine)?;
    } else {
        println!("TrapTrack trap-runner");
        println!("  seed:     {}", engine.seed());
        println!("  players:  {}", engine.config().players.len());
        println!("  tiles:    {}", engine.config().board.tile_count);
        println!("  games:    {games}");
        println!();
        run_autoplay(&mut engine, games)?;
    }

    Ok(())
}

// ── Autoplay ───────────────────────────────────────────────────────

fn run_autoplay(engine: &mut GameEngine, games: usize) -> Result<()> {
    for game in 0..games {
        if game > 0 {
            start_next_game(engine)?;
        }
        let mut turns = 0;
        while engine.state().phase != TurnPhase::Won && turns < MAX_TURNS_PER_GAME {
            engine.play_turn()?;
            turns += 1;
        }
        print_summary(engine, turns);
    }
    Ok(())
}

/// A game cut off by the turn limit is still in progress, so the reset
/// needs confirming.
fn start_next_game(engine: &mut GameEngine) -> Result<()> {
    engine.submit(PlayerCommand::NewGame)?;
    if engine.state().confirm_pending {
        engine.submit(PlayerCommand::ConfirmNewGame)?;
    }
    Ok(())
}

fn print_summary(engine: &GameEngine, turns: usize) {
    let view = engine.view();
    println!("=== GAME {} ===", view.stats.game_number);
    match render::winner(&view) {
        Some(line) => println!("  {line}"),
        None => println!("  (no winner after {turns} turns)"),
    }
    println!("  turns:            {turns}");
    println!("  rolls:            {}", view.stats.total_rolls);
    println!("  traps triggered:  {}", view.stats.traps_triggered);
    println!("  traps untouched:  {}", view.stats.hidden_traps);
    println!("  game time:        {:.1}s", engine.clock.now as f64 / 1000.0);
    for p in &view.players {
        println!(
            "  {:<10} tile {:>2}  traps {:>2}  lucky {:>2}",
            p.name,
            p.position + 1,
            p.traps_hit,
            p.lucky_escapes
        );
    }
    println!();
}

// ── Interactive ────────────────────────────────────────────────────

fn run_interactive(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut line = String::new();
    draw(engine)?;

    loop {
        line.clear();
        if handle.read_line(&mut line)? == 0 {
            break;
        }
        let command = match line.trim() {
            "r" | "" => PlayerCommand::Roll,
            "n" => PlayerCommand::NewGame,
            "y" => PlayerCommand::ConfirmNewGame,
            "c" => PlayerCommand::CancelNewGame,
            "q" => break,
            other => {
                println!("Unknown key '{other}'. r roll, n new game, y/c confirm/cancel, q quit");
                continue;
            }
        };
        let events = engine.submit(command)?;
        if events.is_empty() {
            println!("(not now: {})", render::controls(&engine.view()));
            continue;
        }
        draw(engine)?;
        animate(engine)?;
    }
    Ok(())
}

/// Let the turn play out in real time until the next roll is possible.
fn animate(engine: &mut GameEngine) -> Result<()> {
    let mut last = Instant::now();
    while engine.pending_timers() > 0 {
        std::thread::sleep(FRAME);
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis() as u64;
        last = now;

        let events = engine.advance_real(elapsed)?;
        if events.iter().any(redraws) {
            draw(engine)?;
        }
    }
    Ok(())
}

fn redraws(event: &GameEvent) -> bool {
    !matches!(event, GameEvent::RollStarted { .. })
}

fn draw(engine: &GameEngine) -> Result<()> {
    let mut stdout = io::stdout();
    // Clear screen, cursor home.
    write!(stdout, "\x1b[2J\x1b[H{}\n> ", render::screen(&engine.view()))?;
    stdout.flush()?;
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
