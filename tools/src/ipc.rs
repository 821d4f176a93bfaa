//! JSON-lines IPC loop for external front-ends.
//!
//! One command per stdin line, one JSON response per stdout line.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use traptrack_core::{
    clock::GameSpeed,
    command::PlayerCommand,
    engine::GameEngine,
    event::GameEvent,
    types::Millis,
    view::GameView,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Roll,
    NewGame,
    ConfirmNewGame,
    CancelNewGame,
    Advance { ms: Millis },
    RunUntilIdle,
    SetSpeed { speed: GameSpeed },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    time:    Millis,
    events:  Vec<GameEvent>,
    view:    GameView,
}

pub fn run_ipc_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {}", buffer.trim());
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => vec![],
            IpcCommand::Roll => engine.submit(PlayerCommand::Roll)?,
            IpcCommand::NewGame => engine.submit(PlayerCommand::NewGame)?,
            IpcCommand::ConfirmNewGame => engine.submit(PlayerCommand::ConfirmNewGame)?,
            IpcCommand::CancelNewGame => engine.submit(PlayerCommand::CancelNewGame)?,
            IpcCommand::SetSpeed { speed } => engine.submit(PlayerCommand::SetSpeed { speed })?,
            IpcCommand::Advance { ms } => engine.advance(ms)?,
            IpcCommand::RunUntilIdle => engine.run_until_idle()?,
        };

        let state = UiState {
            time: engine.clock.now,
            events,
            view: engine.view(),
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}
