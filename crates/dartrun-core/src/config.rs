//! Attacker tuning.
//!
//! Every field defaults to the matching constant in [`crate::constants`], so a
//! JSON file only needs to list the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// State machine timing and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    pub tracking_inset: f64,
    pub icon_size: f64,
    pub offscreen_margin: f64,
    pub tracking_duration_ms: f64,
    pub lock_duration_ms: f64,
    pub cooldown_phase_duration_ms: f64,
    pub tracking_smoothing: f64,
    pub beep_interval_start_ms: f64,
    pub beep_interval_end_ms: f64,
    pub dart_speed: f64,
    pub knocked_back_speed_multiplier: f64,
    pub frame_budget_ms: f64,
    pub warmup_distance: f64,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            tracking_inset: TRACKING_INSET,
            icon_size: ICON_SIZE,
            offscreen_margin: OFFSCREEN_MARGIN,
            tracking_duration_ms: TRACKING_DURATION_MS,
            lock_duration_ms: LOCK_DURATION_MS,
            cooldown_phase_duration_ms: COOLDOWN_PHASE_DURATION_MS,
            tracking_smoothing: TRACKING_SMOOTHING,
            beep_interval_start_ms: BEEP_INTERVAL_START_MS,
            beep_interval_end_ms: BEEP_INTERVAL_END_MS,
            dart_speed: DART_SPEED,
            knocked_back_speed_multiplier: KNOCKED_BACK_SPEED_MULTIPLIER,
            frame_budget_ms: FRAME_BUDGET_MS,
            warmup_distance: WARMUP_DISTANCE,
        }
    }
}

/// Wave pacing and the cooldown distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerTuning {
    pub wave_active_duration_ms: f64,
    pub wave_rest_duration_ms: f64,
    pub attacks_per_wave_max: u32,
    pub first_attack_delay_min_ms: f64,
    pub first_attack_delay_max_ms: f64,
    pub cooldown_base_ms: f64,
    pub cooldown_spread_ms: f64,
    pub cooldown_min_ms: f64,
    pub cooldown_max_ms: f64,
    pub ramp_factor: f64,
    pub quick_followup_chance: f64,
    pub quick_followup_min_ms: f64,
    pub quick_followup_max_ms: f64,
    pub extended_pause_chance: f64,
    pub extended_pause_min_ms: f64,
    pub extended_pause_max_ms: f64,
    pub rest_alert_min_gap_ms: f64,
    pub rest_alert_chance_per_sec: f64,
}

impl Default for SchedulerTuning {
    fn default() -> Self {
        Self {
            wave_active_duration_ms: WAVE_ACTIVE_DURATION_MS,
            wave_rest_duration_ms: WAVE_REST_DURATION_MS,
            attacks_per_wave_max: ATTACKS_PER_WAVE_MAX,
            first_attack_delay_min_ms: FIRST_ATTACK_DELAY_MIN_MS,
            first_attack_delay_max_ms: FIRST_ATTACK_DELAY_MAX_MS,
            cooldown_base_ms: COOLDOWN_BASE_MS,
            cooldown_spread_ms: COOLDOWN_SPREAD_MS,
            cooldown_min_ms: COOLDOWN_MIN_MS,
            cooldown_max_ms: COOLDOWN_MAX_MS,
            ramp_factor: COOLDOWN_RAMP_FACTOR,
            quick_followup_chance: QUICK_FOLLOWUP_CHANCE,
            quick_followup_min_ms: QUICK_FOLLOWUP_MIN_MS,
            quick_followup_max_ms: QUICK_FOLLOWUP_MAX_MS,
            extended_pause_chance: EXTENDED_PAUSE_CHANCE,
            extended_pause_min_ms: EXTENDED_PAUSE_MIN_MS,
            extended_pause_max_ms: EXTENDED_PAUSE_MAX_MS,
            rest_alert_min_gap_ms: REST_ALERT_MIN_GAP_MS,
            rest_alert_chance_per_sec: REST_ALERT_CHANCE_PER_SEC,
        }
    }
}

/// Counter-attack push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackTuning {
    pub base_distance: f64,
    pub per_level: f64,
    pub attack_pivot: i32,
    pub attack_step: f64,
    pub max_distance: f64,
    pub duration_ms: f64,
    pub counter_debounce_ms: f64,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            base_distance: KNOCKBACK_BASE_DISTANCE,
            per_level: KNOCKBACK_PER_LEVEL,
            attack_pivot: KNOCKBACK_ATTACK_PIVOT,
            attack_step: KNOCKBACK_ATTACK_STEP,
            max_distance: KNOCKBACK_MAX_DISTANCE,
            duration_ms: KNOCKBACK_DURATION_MS,
            counter_debounce_ms: COUNTER_DEBOUNCE_MS,
        }
    }
}

/// Collision queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub danger_radius: f64,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            danger_radius: DANGER_RADIUS,
        }
    }
}

/// Complete attacker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackerConfig {
    /// RNG seed for the scheduler. Same seed = same attack pacing.
    pub seed: u64,
    pub actor: ActorTuning,
    pub scheduler: SchedulerTuning,
    pub knockback: KnockbackTuning,
    pub collision: CollisionTuning,
}

impl Default for AttackerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            actor: ActorTuning::default(),
            scheduler: SchedulerTuning::default(),
            knockback: KnockbackTuning::default(),
            collision: CollisionTuning::default(),
        }
    }
}

impl AttackerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AttackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject tunings the attacker cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.actor;
        positive("actor.tracking_duration_ms", a.tracking_duration_ms)?;
        positive("actor.lock_duration_ms", a.lock_duration_ms)?;
        positive("actor.cooldown_phase_duration_ms", a.cooldown_phase_duration_ms)?;
        positive("actor.frame_budget_ms", a.frame_budget_ms)?;
        positive("actor.dart_speed", a.dart_speed)?;
        positive("actor.beep_interval_end_ms", a.beep_interval_end_ms)?;
        non_negative("actor.tracking_inset", a.tracking_inset)?;
        non_negative("actor.icon_size", a.icon_size)?;
        non_negative("actor.offscreen_margin", a.offscreen_margin)?;
        non_negative("actor.warmup_distance", a.warmup_distance)?;
        unit_interval("actor.tracking_smoothing", a.tracking_smoothing)?;
        unit_interval(
            "actor.knocked_back_speed_multiplier",
            a.knocked_back_speed_multiplier,
        )?;
        ordered(
            "actor.beep_interval_start_ms",
            a.beep_interval_end_ms,
            a.beep_interval_start_ms,
        )?;

        let s = &self.scheduler;
        positive("scheduler.wave_active_duration_ms", s.wave_active_duration_ms)?;
        positive("scheduler.wave_rest_duration_ms", s.wave_rest_duration_ms)?;
        if s.attacks_per_wave_max == 0 {
            return Err(ConfigError::invalid(
                "scheduler.attacks_per_wave_max",
                "must allow at least one attack per wave",
            ));
        }
        non_negative("scheduler.first_attack_delay_min_ms", s.first_attack_delay_min_ms)?;
        ordered(
            "scheduler.first_attack_delay_max_ms",
            s.first_attack_delay_min_ms,
            s.first_attack_delay_max_ms,
        )?;
        positive("scheduler.cooldown_min_ms", s.cooldown_min_ms)?;
        ordered("scheduler.cooldown_max_ms", s.cooldown_min_ms, s.cooldown_max_ms)?;
        non_negative("scheduler.cooldown_spread_ms", s.cooldown_spread_ms)?;
        positive("scheduler.cooldown_base_ms", s.cooldown_base_ms)?;
        if !(s.ramp_factor > 0.0 && s.ramp_factor <= 1.0) {
            return Err(ConfigError::invalid(
                "scheduler.ramp_factor",
                format!("must be in (0, 1], got {}", s.ramp_factor),
            ));
        }
        unit_interval("scheduler.quick_followup_chance", s.quick_followup_chance)?;
        unit_interval("scheduler.extended_pause_chance", s.extended_pause_chance)?;
        unit_interval("scheduler.rest_alert_chance_per_sec", s.rest_alert_chance_per_sec)?;
        non_negative("scheduler.rest_alert_min_gap_ms", s.rest_alert_min_gap_ms)?;
        within_clamp(
            "scheduler.quick_followup",
            s.quick_followup_min_ms,
            s.quick_followup_max_ms,
            s,
        )?;
        within_clamp(
            "scheduler.extended_pause",
            s.extended_pause_min_ms,
            s.extended_pause_max_ms,
            s,
        )?;

        let k = &self.knockback;
        non_negative("knockback.base_distance", k.base_distance)?;
        non_negative("knockback.per_level", k.per_level)?;
        non_negative("knockback.attack_step", k.attack_step)?;
        non_negative("knockback.max_distance", k.max_distance)?;
        positive("knockback.duration_ms", k.duration_ms)?;
        non_negative("knockback.counter_debounce_ms", k.counter_debounce_ms)?;

        positive("collision.danger_radius", self.collision.danger_radius)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be in [0, 1], got {value}"),
        ))
    }
}

fn ordered(field: &'static str, lo: f64, hi: f64) -> Result<(), ConfigError> {
    if hi.is_finite() && hi >= lo {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be >= {lo}, got {hi}"),
        ))
    }
}

fn within_clamp(
    field: &'static str,
    lo: f64,
    hi: f64,
    s: &SchedulerTuning,
) -> Result<(), ConfigError> {
    if lo <= hi && lo >= s.cooldown_min_ms && hi <= s.cooldown_max_ms {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!(
                "range [{lo}, {hi}] must lie inside [{}, {}]",
                s.cooldown_min_ms, s.cooldown_max_ms
            ),
        ))
    }
}
