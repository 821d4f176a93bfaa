//! The game engine: the single controller for a TrapTrack session.
//!
//! RULES:
//!   - The engine owns the only GameState. Front-ends read it through
//!     `view()` and change it only by submitting commands.
//!   - Time moves only through `advance`; timers fire in due order.
//!   - All randomness flows through the RngBank.
//!   - Every emitted event is recorded in the event log.

use crate::{
    board::Board,
    clock::GameClock,
    command::PlayerCommand,
    config::GameConfig,
    error::GameResult,
    event::{EventLogEntry, GameEvent},
    flavor::Flavor,
    player::Player,
    rng::{RngBank, StreamSlot},
    scheduler::Scheduler,
    sequencer::{Step, TimerAction, TurnSequencer, TurnStreams},
    state::GameState,
    types::Millis,
    view::GameView,
};

pub struct GameEngine {
    pub clock:  GameClock,
    rng_bank:   RngBank,
    config:     GameConfig,
    sequencer:  TurnSequencer,
    streams:    TurnStreams,
    scheduler:  Scheduler<TimerAction>,
    state:      GameState,
    log:        Vec<EventLogEntry>,
}

impl GameEngine {
    /// Build an engine and set up game 1.
    pub fn new(seed: u64, config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(seed);
        let board = Self::fresh_board(&rng_bank, &config, 1);
        let players = Player::roster(&config.players);

        let mut engine = Self {
            clock:     GameClock::new(),
            streams:   TurnStreams::for_game(&rng_bank, 1),
            sequencer: TurnSequencer::new(config.timing.clone()),
            scheduler: Scheduler::new(),
            state:     GameState::new(players, board),
            log:       Vec::new(),
            rng_bank,
            config,
        };
        engine.state.message = Flavor::opening(engine.state.current_player());
        log::info!("Setting up game 1 (seed {seed})");

        let opening = vec![
            GameEvent::GameStarted { game: 1, trap_count: engine.state.board.trap_count() },
            GameEvent::MessageChanged { text: engine.state.message.clone() },
        ];
        engine.record(&opening)?;
        Ok(engine)
    }

    pub fn with_defaults(seed: u64) -> GameResult<Self> {
        Self::new(seed, GameConfig::default())
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scenario setup in tests and tooling only.
    /// Gameplay code never uses this.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn view(&self) -> GameView {
        GameView::capture(&self.state)
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.log
    }

    /// Timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Queue final die values for upcoming rolls in this game.
    pub fn force_next_rolls(&mut self, values: &[u64]) {
        self.streams.force_rolls(values);
    }

    /// Apply one user command. Ignored commands return no events.
    pub fn submit(&mut self, command: PlayerCommand) -> GameResult<Vec<GameEvent>> {
        log::debug!("command: {}", command.name());
        let events = match command {
            PlayerCommand::SetSpeed { speed } => {
                self.clock.set_speed(speed);
                vec![]
            }
            PlayerCommand::Roll => {
                let step = self.sequencer.request_roll(&mut self.state);
                self.apply_step(step)
            }
            PlayerCommand::NewGame => self.request_new_game(),
            PlayerCommand::ConfirmNewGame => self.confirm_new_game(),
            PlayerCommand::CancelNewGame => self.cancel_new_game(),
        };
        self.record(&events)?;
        Ok(events)
    }

    /// Move game time forward by `ms`, firing every timer that falls due.
    pub fn advance(&mut self, ms: Millis) -> GameResult<Vec<GameEvent>> {
        let target = self.clock.now.saturating_add(ms);
        let mut events = Vec::new();

        while let Some(timer) = self.scheduler.pop_due(target) {
            self.clock.advance_to(timer.due);
            let step = self.sequencer.on_timer(&mut self.state, timer.action, &mut self.streams);
            let fired = self.apply_step(step);
            self.record(&fired)?;
            events.extend(fired);
        }

        self.clock.advance_to(target);
        Ok(events)
    }

    /// Advance by real elapsed milliseconds, scaled by the clock speed.
    pub fn advance_real(&mut self, real_ms: Millis) -> GameResult<Vec<GameEvent>> {
        let ms = self.clock.scale_real(real_ms);
        if ms == 0 {
            return Ok(vec![]);
        }
        self.advance(ms)
    }

    /// Fast-forward until nothing is pending: the turn has passed and the
    /// cooldown has ended, or the game is won.
    pub fn run_until_idle(&mut self) -> GameResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        while let Some(due) = self.scheduler.next_due() {
            let wait = due.saturating_sub(self.clock.now);
            events.extend(self.advance(wait)?);
        }
        Ok(events)
    }

    /// Roll for whoever is up and play the turn out.
    /// Returns no events if a roll is not accepted right now.
    pub fn play_turn(&mut self) -> GameResult<Vec<GameEvent>> {
        let mut events = self.submit(PlayerCommand::Roll)?;
        if events.is_empty() {
            return Ok(events);
        }
        events.extend(self.run_until_idle()?);
        Ok(events)
    }

    fn apply_step(&mut self, step: Step) -> Vec<GameEvent> {
        if step.clear_timers {
            self.scheduler.clear();
        }
        for (delay, action) in step.timers {
            self.scheduler.schedule(self.clock.now.saturating_add(delay), action);
        }
        step.events
    }

    // ── New game flow ──────────────────────────────────────────────

    fn request_new_game(&mut self) -> Vec<GameEvent> {
        if self.state.turn_in_flight() {
            log::debug!("new game ignored: turn in flight ({:?})", self.state.phase);
            return vec![];
        }
        if self.state.in_progress() && self.state.winner.is_none() {
            if self.state.confirm_pending {
                return vec![];
            }
            self.state.confirm_pending = true;
            return vec![GameEvent::NewGameConfirmationRequested];
        }
        self.reset()
    }

    fn confirm_new_game(&mut self) -> Vec<GameEvent> {
        // "Play again" after a win needs no prior request.
        if !self.state.confirm_pending && self.state.winner.is_none() {
            log::debug!("confirm ignored: nothing to confirm");
            return vec![];
        }
        self.reset()
    }

    fn cancel_new_game(&mut self) -> Vec<GameEvent> {
        if !self.state.confirm_pending {
            return vec![];
        }
        self.state.confirm_pending = false;
        vec![GameEvent::NewGameCancelled]
    }

    fn reset(&mut self) -> Vec<GameEvent> {
        let game = self.state.stats.game_number + 1;
        let board = Self::fresh_board(&self.rng_bank, &self.config, game);
        self.scheduler.clear();
        self.streams = TurnStreams::for_game(&self.rng_bank, game);
        self.state.reset(board);
        self.state.message = Flavor::fresh_start(self.state.current_player());
        log::info!("Setting up game {game}: {} traps", self.state.board.trap_count());

        vec![
            GameEvent::GameReset { game },
            GameEvent::GameStarted { game, trap_count: self.state.board.trap_count() },
            GameEvent::MessageChanged { text: self.state.message.clone() },
        ]
    }

    fn fresh_board(bank: &RngBank, config: &GameConfig, game: u64) -> Board {
        let mut rng = bank.for_stream(StreamSlot::Board, game);
        Board::generate(&config.board, &mut rng)
    }

    fn record(&mut self, events: &[GameEvent]) -> GameResult<()> {
        for event in events {
            let entry = EventLogEntry {
                seq:        self.log.len() as u64,
                at:         self.clock.now,
                game:       self.state.stats.game_number,
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            };
            self.log.push(entry);
        }
        Ok(())
    }
}
