//! The turn sequencer: the heart of TrapTrack.
//!
//! TURN ORDER (fixed):
//!   1. Roll accepted       Idle      -> Rolling
//!   2. Die spins           Rolling   (DiceSpin x spin_count, then DiceSettled)
//!   3. Skip owed?          Rolling   -> Switching   (no movement, no landing)
//!   4. Walk                Moving    (one MoveStep per tile)
//!   5. Final tile reached  Moving    -> Won         (nothing else runs)
//!   6. Land                Resolving -> Switching   (trap or safe landing)
//!   7. End turn            Switching -> Idle        (next player, cooldown)
//!
//! RULES:
//!   - The sequencer never reads a clock. It asks for timers by returning
//!     them in a `Step`; the engine decides when they fire.
//!   - All randomness comes from `TurnStreams`.
//!   - Out-of-state requests are ignored and produce an empty `Step`.

use crate::{
    config::TimingConfig,
    event::GameEvent,
    flavor::Flavor,
    rng::{RngBank, StreamRng, StreamSlot},
    state::{GameState, MoveProgress, TurnPhase},
    types::{Millis, PlayerId, DIE_FACES},
};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    DiceSpin,
    DiceSettled { value: u64 },
    MoveStep,
    Land,
    LuckyNotice { player_id: PlayerId },
    EndTurn,
    CooldownOver,
}

/// What one transition produced.
#[derive(Debug, Default)]
pub struct Step {
    pub events:       Vec<GameEvent>,
    /// (delay from now, action)
    pub timers:       Vec<(Millis, TimerAction)>,
    /// Drop every pending timer before scheduling `timers`.
    pub clear_timers: bool,
}

impl Step {
    fn ignored() -> Self {
        Self::default()
    }

    fn after(mut self, delay: Millis, action: TimerAction) -> Self {
        self.timers.push((delay, action));
        self
    }

    fn say(&mut self, state: &mut GameState, text: String) {
        state.message = text.clone();
        self.events.push(GameEvent::MessageChanged { text });
    }
}

/// Dice and flavor streams for one game.
pub struct TurnStreams {
    dice:   StreamRng,
    flavor: StreamRng,
    forced: VecDeque<u64>,
}

impl TurnStreams {
    pub fn for_game(bank: &RngBank, game: u64) -> Self {
        Self {
            dice:   bank.for_stream(StreamSlot::Dice, game),
            flavor: bank.for_stream(StreamSlot::Flavor, game),
            forced: VecDeque::new(),
        }
    }

    /// Queue final die values to use before the dice stream.
    /// Values are clamped onto the die.
    pub fn force_rolls(&mut self, values: &[u64]) {
        self.forced
            .extend(values.iter().map(|v| (*v).clamp(1, DIE_FACES)));
    }

    fn spin_face(&mut self) -> u64 {
        self.dice.next_u64_below(DIE_FACES) + 1
    }

    fn final_face(&mut self) -> u64 {
        match self.forced.pop_front() {
            Some(value) => value,
            None => self.dice.next_u64_below(DIE_FACES) + 1,
        }
    }
}

pub struct TurnSequencer {
    timing: TimingConfig,
}

impl TurnSequencer {
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    /// Step 1. Both the phase and the cooldown gate must be open.
    pub fn request_roll(&self, state: &mut GameState) -> Step {
        if !state.can_roll() {
            log::debug!(
                "roll ignored: phase={:?} cooldown={} confirm_pending={}",
                state.phase, state.cooldown, state.confirm_pending
            );
            return Step::ignored();
        }
        state.phase = TurnPhase::Rolling;
        state.spins_done = 0;
        state.stats.total_rolls += 1;

        let player_id = state.current_player().id;
        log::debug!("player {player_id} rolls (roll #{})", state.stats.total_rolls);
        Step {
            events: vec![GameEvent::RollStarted { player_id }],
            ..Step::default()
        }
        .after(self.timing.dice_spin_interval, TimerAction::DiceSpin)
    }

    pub fn on_timer(
        &self,
        state: &mut GameState,
        action: TimerAction,
        streams: &mut TurnStreams,
    ) -> Step {
        match action {
            TimerAction::DiceSpin               => self.spin(state, streams),
            TimerAction::DiceSettled { value }  => self.settle(state, value),
            TimerAction::MoveStep               => self.move_step(state, streams),
            TimerAction::Land                   => self.land(state, streams),
            TimerAction::LuckyNotice { player_id } => self.lucky_notice(state, player_id),
            TimerAction::EndTurn                => self.end_turn(state),
            TimerAction::CooldownOver           => self.cooldown_over(state),
        }
    }

    /// Step 2.
    fn spin(&self, state: &mut GameState, streams: &mut TurnStreams) -> Step {
        if state.phase != TurnPhase::Rolling {
            return Step::ignored();
        }
        state.die_face = streams.spin_face();
        state.spins_done += 1;
        if state.spins_done < self.timing.dice_spin_count {
            return Step::default().after(self.timing.dice_spin_interval, TimerAction::DiceSpin);
        }

        let value = streams.final_face();
        state.die_face = value;
        let player_id = state.current_player().id;
        Step {
            events: vec![GameEvent::DiceRolled { player_id, value }],
            ..Step::default()
        }
        .after(self.timing.dice_settle, TimerAction::DiceSettled { value })
    }

    /// Steps 3 and 4.
    fn settle(&self, state: &mut GameState, value: u64) -> Step {
        if state.phase != TurnPhase::Rolling {
            return Step::ignored();
        }
        let mut step = Step::default();
        let player = state.current_player_mut();

        if player.skip_turns > 0 {
            player.skip_turns -= 1;
            let remaining = player.skip_turns;
            let text = Flavor::still_stuck(player, remaining);
            step.events.push(GameEvent::TurnSkipped { player_id: player.id, remaining });
            state.phase = TurnPhase::Switching;
            step.say(state, text);
            log::debug!("turn skipped, {remaining} skip(s) left");
            return step.after(self.timing.skip_message, TimerAction::EndTurn);
        }

        let player_id = player.id;
        let text = Flavor::moving(player, value);
        state.moving = Some(MoveProgress { player_id, steps: value, taken: 0 });
        state.phase = TurnPhase::Moving;
        step.say(state, text);
        step.after(self.timing.move_step_interval, TimerAction::MoveStep)
    }

    /// Steps 4 and 5. Position clamps at the final tile.
    fn move_step(&self, state: &mut GameState, streams: &mut TurnStreams) -> Step {
        if state.phase != TurnPhase::Moving {
            return Step::ignored();
        }
        let Some(mut progress) = state.moving else {
            return Step::ignored();
        };
        let final_tile = state.final_tile();
        progress.taken += 1;

        let player = state.current_player_mut();
        player.position = (player.position + 1).min(final_tile);
        let position = player.position;
        let player_id = player.id;
        state.board.mark_stepped(position);

        let mut step = Step {
            events: vec![GameEvent::PlayerStepped { player_id, position }],
            ..Step::default()
        };

        if position >= final_tile {
            state.moving = None;
            state.phase = TurnPhase::Won;
            state.winner = Some(player_id);
            let text = Flavor::victory(state.current_player(), &mut streams.flavor);
            step.events.push(GameEvent::GameWon { player_id, game: state.stats.game_number });
            step.say(state, text);
            step.clear_timers = true;
            log::info!(
                "Game {} complete! Winner: {}",
                state.stats.game_number,
                state.current_player().name
            );
            return step;
        }

        if progress.taken >= progress.steps {
            state.moving = None;
            state.phase = TurnPhase::Resolving;
            return step.after(self.timing.landing_settle, TimerAction::Land);
        }

        state.moving = Some(progress);
        step.after(self.timing.move_step_interval, TimerAction::MoveStep)
    }

    /// Step 6. Reads the position the player actually reached.
    fn land(&self, state: &mut GameState, streams: &mut TurnStreams) -> Step {
        if state.phase != TurnPhase::Resolving {
            return Step::ignored();
        }
        let mut step = Step::default();
        let tile = state.current_player().position;
        state.phase = TurnPhase::Switching;

        if let Some(trap) = state.board.reveal(tile) {
            let def = trap.definition();
            let player = state.current_player_mut();
            let update = def.effect.apply(player);
            player.apply(&update);
            player.traps_hit += 1;
            let player_id = player.id;
            let text = Flavor::trap_hit(player, def, &mut streams.flavor);
            state.stats.total_traps_hit += 1;

            log::debug!("player {player_id} hit {:?} on tile {tile}: {update:?}", def.id);
            step.events.push(GameEvent::TrapTriggered { player_id, tile, trap, update });
            step.say(state, text);
            return step.after(self.timing.trap_message, TimerAction::EndTurn);
        }

        let near_miss = state.board.hidden_trap_adjacent(tile);
        let player = state.current_player_mut();
        let player_id = player.id;
        let text = Flavor::safe_landing(player, &mut streams.flavor);
        step.events.push(GameEvent::SafeLanding { player_id, tile });
        if near_miss {
            player.lucky_escapes += 1;
            step.events.push(GameEvent::LuckyEscape { player_id, tile });
            step.timers.push((self.timing.lucky_escape_notice, TimerAction::LuckyNotice { player_id }));
        }
        step.say(state, text);
        step.after(self.timing.safe_message, TimerAction::EndTurn)
    }

    /// Only shown while the lucky player's outcome is still on screen.
    fn lucky_notice(&self, state: &mut GameState, player_id: PlayerId) -> Step {
        if state.phase != TurnPhase::Switching || state.current_player().id != player_id {
            return Step::ignored();
        }
        let text = Flavor::lucky_escape(state.current_player());
        let mut step = Step::default();
        step.say(state, text);
        step
    }

    /// Step 7.
    fn end_turn(&self, state: &mut GameState) -> Step {
        if state.phase != TurnPhase::Switching {
            return Step::ignored();
        }
        let from = state.current_player().id;
        state.current = (state.current + 1) % state.players.len();
        state.phase = TurnPhase::Idle;
        state.cooldown = true;

        let to = state.current_player().id;
        let text = Flavor::next_turn(state.current_player());
        let mut step = Step {
            events: vec![GameEvent::TurnPassed { from, to }],
            ..Step::default()
        };
        step.say(state, text);
        step.after(self.timing.cooldown, TimerAction::CooldownOver)
    }

    fn cooldown_over(&self, state: &mut GameState) -> Step {
        if !state.cooldown {
            return Step::ignored();
        }
        state.cooldown = false;
        Step {
            events: vec![GameEvent::CooldownEnded],
            ..Step::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Board, config::GameConfig, player::Player, trap::TrapId};

    fn fixture() -> (TurnSequencer, GameState, TurnStreams) {
        let config = GameConfig::default();
        let state = GameState::new(Player::roster(&config.players), Board::empty(50));
        let streams = TurnStreams::for_game(&RngBank::new(11), 1);
        (TurnSequencer::new(config.timing), state, streams)
    }

    /// Fire timers in the order they come back, ignoring delays.
    fn drain(seq: &TurnSequencer, state: &mut GameState, streams: &mut TurnStreams, first: Step) -> Vec<GameEvent> {
        let mut events = first.events;
        let mut pending: VecDeque<TimerAction> = first.timers.into_iter().map(|(_, a)| a).collect();
        while let Some(action) = pending.pop_front() {
            let step = seq.on_timer(state, action, streams);
            if step.clear_timers {
                pending.clear();
            }
            events.extend(step.events);
            pending.extend(step.timers.into_iter().map(|(_, a)| a));
        }
        events
    }

    #[test]
    fn roll_ignored_while_rolling() {
        let (seq, mut state, _) = fixture();
        assert!(!seq.request_roll(&mut state).timers.is_empty());
        let before = state.clone();
        let step = seq.request_roll(&mut state);
        assert!(step.events.is_empty() && step.timers.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn roll_ignored_during_cooldown() {
        let (seq, mut state, _) = fixture();
        state.cooldown = true;
        let step = seq.request_roll(&mut state);
        assert!(step.events.is_empty());
        assert_eq!(state.stats.total_rolls, 0);
        assert_eq!(state.phase, TurnPhase::Idle);
    }

    #[test]
    fn spins_then_settles() {
        let (seq, mut state, mut streams) = fixture();
        streams.force_rolls(&[4]);
        seq.request_roll(&mut state);
        for _ in 0..9 {
            let step = seq.on_timer(&mut state, TimerAction::DiceSpin, &mut streams);
            assert_eq!(step.timers, vec![(80, TimerAction::DiceSpin)]);
        }
        let step = seq.on_timer(&mut state, TimerAction::DiceSpin, &mut streams);
        assert_eq!(step.timers, vec![(400, TimerAction::DiceSettled { value: 4 })]);
        assert_eq!(state.die_face, 4);
    }

    #[test]
    fn skip_consumes_turn_without_moving() {
        let (seq, mut state, mut streams) = fixture();
        state.players[0].position = 7;
        state.players[0].skip_turns = 2;
        let first = seq.request_roll(&mut state);
        let events = drain(&seq, &mut state, &mut streams, first);

        assert_eq!(state.players[0].skip_turns, 1);
        assert_eq!(state.players[0].position, 7);
        assert!(events.contains(&GameEvent::TurnSkipped { player_id: 1, remaining: 1 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PlayerStepped { .. })));
        assert_eq!(state.current, 1);
    }

    #[test]
    fn overshoot_clamps_and_wins() {
        let (seq, mut state, mut streams) = fixture();
        state.players[0].position = 46;
        state.board.set_trap(48, Some(TrapId::BlackHole));
        streams.force_rolls(&[5]);
        let first = seq.request_roll(&mut state);
        let events = drain(&seq, &mut state, &mut streams, first);

        assert_eq!(state.players[0].position, 49);
        assert_eq!(state.phase, TurnPhase::Won);
        assert_eq!(state.winner, Some(1));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TrapTriggered { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameWon { player_id: 1, .. })));
        // Turn never passes once the game is over.
        assert_eq!(state.current, 0);
    }

    #[test]
    fn trap_fires_once() {
        let (seq, mut state, mut streams) = fixture();
        state.board.set_trap(3, Some(TrapId::QuicksandDoom));
        streams.force_rolls(&[3]);
        let first = seq.request_roll(&mut state);
        drain(&seq, &mut state, &mut streams, first);

        assert_eq!(state.players[0].skip_turns, 1);
        assert_eq!(state.players[0].traps_hit, 1);
        assert_eq!(state.stats.total_traps_hit, 1);
        assert!(state.board.tile(3).unwrap().revealed);

        // Player 2 lands on the same tile: nothing happens.
        state.cooldown = false;
        streams.force_rolls(&[3]);
        let first = seq.request_roll(&mut state);
        let events = drain(&seq, &mut state, &mut streams, first);
        assert_eq!(state.players[1].position, 3);
        assert_eq!(state.players[1].traps_hit, 0);
        assert_eq!(state.stats.total_traps_hit, 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::SafeLanding { player_id: 2, tile: 3 })));
    }

    #[test]
    fn near_miss_counts_lucky_escape() {
        let (seq, mut state, mut streams) = fixture();
        state.board.set_trap(5, Some(TrapId::BananaPeel));
        streams.force_rolls(&[4]);
        let first = seq.request_roll(&mut state);
        let events = drain(&seq, &mut state, &mut streams, first);

        assert_eq!(state.players[0].lucky_escapes, 1);
        assert!(events.contains(&GameEvent::LuckyEscape { player_id: 1, tile: 4 }));
        assert!(events.contains(&GameEvent::MessageChanged {
            text: "Player 1 just barely avoided a trap! Lucky! 🍀".into()
        }));
    }

    #[test]
    fn late_lucky_notice_is_dropped() {
        let (_, mut state, mut streams) = fixture();
        let timing = TimingConfig { lucky_escape_notice: 3_000, safe_message: 2_000, ..TimingConfig::default() };
        let seq = TurnSequencer::new(timing);
        state.board.set_trap(5, Some(TrapId::BananaPeel));
        state.players[0].position = 4;
        state.phase = TurnPhase::Resolving;

        let landed = seq.on_timer(&mut state, TimerAction::Land, &mut streams);
        assert!(landed.timers.contains(&(3_000, TimerAction::LuckyNotice { player_id: 1 })));
        assert!(landed.timers.contains(&(2_000, TimerAction::EndTurn)));

        // The safe message runs out first and the turn passes.
        seq.on_timer(&mut state, TimerAction::EndTurn, &mut streams);
        let message = state.message.clone();
        let notice = seq.on_timer(&mut state, TimerAction::LuckyNotice { player_id: 1 }, &mut streams);
        assert!(notice.events.is_empty() && notice.timers.is_empty());
        assert_eq!(state.message, message);
        assert_eq!(state.players[0].lucky_escapes, 1);
    }

    #[test]
    fn end_turn_wraps_around() {
        let (seq, mut state, _) = fixture();
        state.current = 3;
        state.phase = TurnPhase::Switching;
        let step = seq.on_timer(&mut state, TimerAction::EndTurn, &mut TurnStreams::for_game(&RngBank::new(1), 1));
        assert_eq!(state.current, 0);
        assert!(state.cooldown);
        assert_eq!(step.events[0], GameEvent::TurnPassed { from: 4, to: 1 });
        assert_eq!(step.timers, vec![(5_000, TimerAction::CooldownOver)]);
    }

    #[test]
    fn stale_timers_are_ignored() {
        let (seq, mut state, mut streams) = fixture();
        for action in [TimerAction::DiceSpin, TimerAction::MoveStep, TimerAction::Land, TimerAction::EndTurn] {
            let step = seq.on_timer(&mut state, action, &mut streams);
            assert!(step.events.is_empty() && step.timers.is_empty(), "{action:?}");
        }
        assert_eq!(state.phase, TurnPhase::Idle);
    }
}
