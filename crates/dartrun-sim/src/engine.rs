//! Attacker engine: the frame loop's handle on the dart.
//!
//! `AttackerEngine` owns the manager state, the scheduler and its RNG, the
//! clock, and a command queue. Completely headless, enabling deterministic
//! testing with a seeded RNG and a manual clock.

use std::collections::VecDeque;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dartrun_core::commands::AttackerCommand;
use dartrun_core::config::AttackerConfig;
use dartrun_core::enums::{AttackPhase, CounterOutcome};
use dartrun_core::state::{AttackerSnapshot, TickContext};
use dartrun_core::types::{Bounds, Millis};

use dartrun_attacker::collision;
use dartrun_attacker::scheduler::SpawnScheduler;

use crate::clock::{Clock, MonotonicClock};
use crate::manager::{self, ManagerState};
use crate::snapshot;

/// The attacker engine. Exactly one `tick` per rendered frame.
pub struct AttackerEngine<C: Clock = MonotonicClock, R: Rng = ChaCha8Rng> {
    config: AttackerConfig,
    state: ManagerState,
    scheduler: SpawnScheduler<R>,
    clock: C,
    command_queue: VecDeque<AttackerCommand>,
}

impl AttackerEngine<MonotonicClock, ChaCha8Rng> {
    /// Engine on the wall clock, RNG seeded from `config.seed`.
    pub fn new(config: AttackerConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> AttackerEngine<C, ChaCha8Rng> {
    /// Engine on a caller-supplied clock, RNG seeded from `config.seed`.
    pub fn with_clock(config: AttackerConfig, clock: C) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_parts(config, clock, rng)
    }
}

impl<C: Clock, R: Rng> AttackerEngine<C, R> {
    /// Engine with every collaborator injected.
    pub fn with_parts(config: AttackerConfig, clock: C, rng: R) -> Self {
        let scheduler = SpawnScheduler::new(config.scheduler.clone(), rng);
        Self {
            config,
            state: ManagerState::new(Bounds::default()),
            scheduler,
            clock,
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: AttackerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = AttackerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the attacker by one frame and return the resulting snapshot.
    pub fn tick(&mut self, ctx: &TickContext) -> AttackerSnapshot {
        let now = self.clock.now_ms();
        let counter_outcomes = self.process_commands(now);

        let tick = manager::advance(&self.state, ctx, now, &mut self.scheduler, &self.config);
        self.state = tick.state;

        if let Some((from, to)) = tick.transition {
            tracing::debug!(?from, ?to, now, "attacker phase change");
            if from == AttackPhase::Idle {
                tracing::info!(
                    attack = self.state.schedule.total_attacks,
                    wave = self.state.schedule.wave_number,
                    distance = ctx.distance_traveled,
                    score = ctx.score,
                    "attack started"
                );
            }
        }

        snapshot::build_snapshot(&self.state, &self.config, tick.cues, counter_outcomes)
    }

    /// Current snapshot without advancing.
    pub fn snapshot(&self) -> AttackerSnapshot {
        snapshot::build_snapshot(&self.state, &self.config, Vec::new(), Vec::new())
    }

    /// Whether the dart hits a circular target this frame.
    pub fn check_hit(&self, target_center: DVec2, target_radius: f64) -> bool {
        collision::hit(&self.state.actor, target_center, target_radius)
    }

    /// Whether the target is within the configured danger radius.
    pub fn in_danger_range(&self, target_center: DVec2) -> bool {
        collision::in_range(
            &self.state.actor,
            target_center,
            self.config.collision.danger_radius,
        )
    }

    /// Read-only view of the manager state.
    pub fn state(&self) -> &ManagerState {
        &self.state
    }

    pub fn config(&self) -> &AttackerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Drain the command queue, returning counter outcomes in order.
    fn process_commands(&mut self, now: Millis) -> Vec<CounterOutcome> {
        let mut outcomes = Vec::new();
        while let Some(command) = self.command_queue.pop_front() {
            if let Some(outcome) = self.handle_command(command, now) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    fn handle_command(&mut self, command: AttackerCommand, now: Millis) -> Option<CounterOutcome> {
        match command {
            AttackerCommand::Start { bounds } => {
                tracing::info!(width = bounds.width, height = bounds.height, "attacker run started");
                self.state = manager::start(bounds);
                None
            }
            AttackerCommand::Stop => {
                tracing::info!(
                    total_attacks = self.state.schedule.total_attacks,
                    "attacker run stopped"
                );
                self.state = manager::stop(&self.state);
                None
            }
            AttackerCommand::Reset => {
                tracing::debug!(phase = ?self.state.actor.phase, "attacker reset");
                self.state = manager::reset(&self.state);
                None
            }
            AttackerCommand::Counter(event) => {
                let (state, outcome) = manager::counter(&self.state, &event, now, &self.config);
                match outcome {
                    CounterOutcome::Ignored | CounterOutcome::Immune => {
                        tracing::trace!(?outcome, phase = ?self.state.actor.phase, "counter had no effect");
                    }
                    _ => {
                        tracing::debug!(
                            ?outcome,
                            level = event.pokemon_level,
                            attack = event.pokemon_attack_stat,
                            legendary = event.is_legendary,
                            "counter landed"
                        );
                    }
                }
                self.state = state;
                Some(outcome)
            }
        }
    }
}
