//! Hit and counter-range tests.
//!
//! The dart only collides while firing. Hits are box-vs-box against the
//! target's bounding square, matching the visible silhouette rather than the
//! exact circle.

use glam::DVec2;

use dartrun_core::components::AttackActor;
use dartrun_core::enums::AttackPhase;

/// Whether the firing dart overlaps a circular target of `target_radius`.
pub fn hit(actor: &AttackActor, target_center: DVec2, target_radius: f64) -> bool {
    if actor.phase != AttackPhase::Firing {
        return false;
    }
    let half = actor.dimensions.half_extents();
    let dart_min = actor.position - half;
    let dart_max = actor.position + half;
    let reach = DVec2::splat(target_radius.max(0.0));
    let target_min = target_center - reach;
    let target_max = target_center + reach;

    dart_min.x < target_max.x
        && dart_max.x > target_min.x
        && dart_min.y < target_max.y
        && dart_max.y > target_min.y
}

/// Whether the firing dart is within `radius` of the target centre.
///
/// Gates the counter-attack prompt.
pub fn in_range(actor: &AttackActor, target_center: DVec2, radius: f64) -> bool {
    actor.phase == AttackPhase::Firing && actor.position.distance(target_center) <= radius
}
