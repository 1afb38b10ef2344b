//! Wave scheduler. Decides when an idle dart should attack.
//!
//! Time alternates between fixed-length active waves and rests. During an
//! active wave attacks follow a bell-shaped cooldown that shrinks with every
//! attack (tension ramp), with occasional quick follow-ups and extended pauses
//! to break the rhythm. During a rest attacks are suppressed except for a rare
//! surprise once the player has been left alone long enough.
//!
//! The random source is injected so pacing can be replayed from a seed.

use rand::Rng;

use dartrun_core::components::ScheduleState;
use dartrun_core::config::SchedulerTuning;
use dartrun_core::enums::WavePhase;
use dartrun_core::types::{sanitize_dt, Millis};

/// Output of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleTick {
    pub schedule: ScheduleState,
    pub should_spawn: bool,
}

/// Attack pacing with an injected random source.
pub struct SpawnScheduler<R: Rng> {
    tuning: SchedulerTuning,
    rng: R,
}

impl<R: Rng> SpawnScheduler<R> {
    pub fn new(tuning: SchedulerTuning, rng: R) -> Self {
        Self { tuning, rng }
    }

    pub fn tuning(&self) -> &SchedulerTuning {
        &self.tuning
    }

    /// Advance the schedule by `dt` and decide whether to attack at `now`.
    ///
    /// `now` must be sampled once per frame from a monotonic clock.
    pub fn update(&mut self, schedule: &ScheduleState, dt: Millis, now: Millis) -> ScheduleTick {
        let dt = sanitize_dt(dt);
        let mut s = *schedule;

        if s.pending_start {
            s.pending_start = false;
            s.wave_timer = self.tuning.wave_active_duration_ms;
            self.enter_active(&mut s, now);
        } else {
            self.advance_wave(&mut s, dt, now);
        }

        let should_spawn = match s.wave_phase {
            WavePhase::Active => {
                now >= s.next_spawn_time && s.attacks_this_wave < self.tuning.attacks_per_wave_max
            }
            WavePhase::Rest => self.roll_rest_alert(&s, dt, now),
        };

        if should_spawn {
            if s.wave_phase == WavePhase::Active {
                s.attacks_this_wave += 1;
                s.next_spawn_time = now + self.sample_cooldown(s.attacks_this_wave);
            } else {
                tracing::debug!(wave = s.wave_number, "surprise attack during rest");
            }
            s.total_attacks += 1;
            s.last_spawn_time = Some(now);
        }

        ScheduleTick {
            schedule: s,
            should_spawn,
        }
    }

    /// Draw the cooldown that follows an attack.
    ///
    /// 1. Average two uniform samples to bias toward the midpoint.
    /// 2. Shrink by `ramp_factor ^ attacks_this_wave`.
    /// 3. Clamp to `[cooldown_min_ms, cooldown_max_ms]`.
    /// 4. Occasionally replace with a quick follow-up or an extended pause.
    pub fn sample_cooldown(&mut self, attacks_this_wave: u32) -> Millis {
        let t = &self.tuning;
        let u1: f64 = self.rng.gen();
        let u2: f64 = self.rng.gen();
        let avg = (u1 + u2) / 2.0;

        let mut cooldown = t.cooldown_base_ms + (avg - 0.5) * 2.0 * t.cooldown_spread_ms;
        let exponent = i32::try_from(attacks_this_wave).unwrap_or(i32::MAX);
        cooldown *= t.ramp_factor.powi(exponent);
        cooldown = cooldown.clamp(t.cooldown_min_ms, t.cooldown_max_ms);

        let quick = (t.quick_followup_chance, t.quick_followup_min_ms, t.quick_followup_max_ms);
        let pause = (t.extended_pause_chance, t.extended_pause_min_ms, t.extended_pause_max_ms);

        let roll: f64 = self.rng.gen();
        if roll < quick.0 {
            cooldown = self.uniform(quick.1, quick.2);
        } else if roll < quick.0 + pause.0 {
            cooldown = self.uniform(pause.1, pause.2);
        }
        cooldown
    }

    /// Count the wave timer down, rolling any overshoot into the next phase.
    fn advance_wave(&mut self, s: &mut ScheduleState, dt: Millis, now: Millis) {
        s.wave_timer -= dt;
        while s.wave_timer <= 0.0 {
            match s.wave_phase {
                WavePhase::Active => {
                    tracing::debug!(
                        wave = s.wave_number,
                        attacks = s.attacks_this_wave,
                        "wave over, resting"
                    );
                    s.wave_phase = WavePhase::Rest;
                    s.attacks_this_wave = 0;
                    s.wave_timer += self.tuning.wave_rest_duration_ms.max(f64::EPSILON);
                }
                WavePhase::Rest => {
                    s.wave_timer += self.tuning.wave_active_duration_ms.max(f64::EPSILON);
                    self.enter_active(s, now);
                }
            }
        }
    }

    fn enter_active(&mut self, s: &mut ScheduleState, now: Millis) {
        s.wave_phase = WavePhase::Active;
        s.wave_number += 1;
        s.attacks_this_wave = 0;
        let (lo, hi) = (
            self.tuning.first_attack_delay_min_ms,
            self.tuning.first_attack_delay_max_ms,
        );
        let delay = self.uniform(lo, hi);
        s.next_spawn_time = now + delay;
        tracing::debug!(wave = s.wave_number, first_attack_in_ms = delay, "wave started");
    }

    fn roll_rest_alert(&mut self, s: &ScheduleState, dt: Millis, now: Millis) -> bool {
        let quiet_for = s.last_spawn_time.map_or(f64::INFINITY, |last| now - last);
        if quiet_for < self.tuning.rest_alert_min_gap_ms || dt <= 0.0 {
            return false;
        }
        let chance = self.tuning.rest_alert_chance_per_sec * dt / 1000.0;
        self.rng.gen::<f64>() < chance
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.rng.gen::<f64>()
    }
}
