//! Attacker constants and tuning defaults.
//!
//! Times are milliseconds, distances are screen pixels.

/// Nominal frame rate the dart speed is tuned against (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per frame at the nominal frame rate.
pub const FRAME_BUDGET_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Actor geometry ---

/// Distance from the right edge at which the dart tracks the player.
pub const TRACKING_INSET: f64 = 40.0;

/// Half-extent of the vertical travel margin (icon size).
pub const ICON_SIZE: f64 = 24.0;

/// Rendered dart width.
pub const DART_WIDTH: f64 = 22.0;

/// Rendered dart height.
pub const DART_HEIGHT: f64 = 12.0;

/// Margin past the left edge at which a firing dart is considered gone.
pub const OFFSCREEN_MARGIN: f64 = 50.0;

// --- Phase timing ---

/// Time spent following the player before locking on.
pub const TRACKING_DURATION_MS: f64 = 2000.0;

/// Frozen telegraph window before launch.
pub const LOCK_DURATION_MS: f64 = 500.0;

/// Delay between the dart leaving the screen and returning to idle.
pub const COOLDOWN_PHASE_DURATION_MS: f64 = 800.0;

/// Per-tick lerp coefficient while tracking.
pub const TRACKING_SMOOTHING: f64 = 0.08;

/// Tracking beep interval at the start of tracking.
pub const BEEP_INTERVAL_START_MS: f64 = 400.0;

/// Tracking beep interval right before lock-on.
pub const BEEP_INTERVAL_END_MS: f64 = 100.0;

// --- Firing ---

/// Dart speed in pixels per nominal frame.
pub const DART_SPEED: f64 = 9.0;

/// Firing speed multiplier once the dart has been knocked back this cycle.
pub const KNOCKED_BACK_SPEED_MULTIPLIER: f64 = 0.6;

// --- Wave scheduling ---

/// Duration of an active wave.
pub const WAVE_ACTIVE_DURATION_MS: f64 = 30_000.0;

/// Duration of a rest period between waves.
pub const WAVE_REST_DURATION_MS: f64 = 12_000.0;

/// Maximum attacks launched during one active wave.
pub const ATTACKS_PER_WAVE_MAX: u32 = 4;

/// Shortest delay before the first attack of a wave.
pub const FIRST_ATTACK_DELAY_MIN_MS: f64 = 800.0;

/// Longest delay before the first attack of a wave.
pub const FIRST_ATTACK_DELAY_MAX_MS: f64 = 2000.0;

/// Midpoint of the bell-shaped cooldown distribution.
pub const COOLDOWN_BASE_MS: f64 = 4000.0;

/// Half-width of the bell-shaped cooldown distribution.
pub const COOLDOWN_SPREAD_MS: f64 = 2000.0;

/// Lower clamp for attack cooldowns.
pub const COOLDOWN_MIN_MS: f64 = 1500.0;

/// Upper clamp for attack cooldowns.
pub const COOLDOWN_MAX_MS: f64 = 8000.0;

/// Per-attack cooldown multiplier within a wave (tension ramp).
pub const COOLDOWN_RAMP_FACTOR: f64 = 0.85;

/// Chance of replacing a cooldown with a quick follow-up.
pub const QUICK_FOLLOWUP_CHANCE: f64 = 0.10;

/// Quick follow-up cooldown range.
pub const QUICK_FOLLOWUP_MIN_MS: f64 = 1500.0;
pub const QUICK_FOLLOWUP_MAX_MS: f64 = 2000.0;

/// Chance of replacing a cooldown with an extended pause.
pub const EXTENDED_PAUSE_CHANCE: f64 = 0.05;

/// Extended pause cooldown range.
pub const EXTENDED_PAUSE_MIN_MS: f64 = 7000.0;
pub const EXTENDED_PAUSE_MAX_MS: f64 = 8000.0;

/// Minimum quiet time during a rest before a surprise attack may happen.
pub const REST_ALERT_MIN_GAP_MS: f64 = 15_000.0;

/// Probability per second of a surprise attack during a rest.
pub const REST_ALERT_CHANCE_PER_SEC: f64 = 0.05;

/// Distance the player must cover before the first attack can be scheduled.
pub const WARMUP_DISTANCE: f64 = 200.0;

// --- Knockback ---

/// Base push distance of a counter-attack.
pub const KNOCKBACK_BASE_DISTANCE: f64 = 150.0;

/// Extra push distance per counter level.
pub const KNOCKBACK_PER_LEVEL: f64 = 20.0;

/// Attack stat at which the attack bonus is zero.
pub const KNOCKBACK_ATTACK_PIVOT: i32 = 50;

/// Push bonus granted per full attack step above the pivot.
pub const KNOCKBACK_ATTACK_STEP: f64 = 10.0;

/// Maximum push distance.
pub const KNOCKBACK_MAX_DISTANCE: f64 = 500.0;

/// Duration of the eased knockback animation.
pub const KNOCKBACK_DURATION_MS: f64 = 600.0;

/// Counter events closer together than this are ignored.
pub const COUNTER_DEBOUNCE_MS: f64 = 250.0;

// --- Collision ---

/// Distance at which the player is offered a counter-attack.
pub const DANGER_RADIUS: f64 = 120.0;
