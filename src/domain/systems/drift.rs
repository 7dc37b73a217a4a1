use crate::domain::Unit;
use crate::domain::tuning::drift::DriftTuning;
use rand::Rng;

/// Applies one tick of movement and resource drift to a single unit.
///
/// Position jitters for every unit. Resources and `last_update` only change
/// while the unit is reachable; OFFLINE units keep their last known state.
pub fn tick_unit<R: Rng>(unit: &mut Unit, rng: &mut R, now_millis: u64, cfg: DriftTuning) {
    unit.position.lat += jitter(rng, cfg.position_jitter);
    unit.position.lng += jitter(rng, cfg.position_jitter);

    if !unit.connection_status.is_active() {
        return;
    }

    let status = &mut unit.status;
    status.personnel += gated_delta(rng, cfg.personnel_chance, cfg.personnel_delta);
    status.ammo += gated_delta(rng, cfg.ammo_chance, cfg.ammo_delta);
    status.fuel += gated_delta(rng, cfg.fuel_chance, cfg.fuel_delta);
    *status = status.clamped(cfg.status_floor, cfg.status_ceiling);

    unit.last_update = now_millis;
}

fn jitter<R: Rng>(rng: &mut R, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-max..=max)
}

fn gated_delta<R: Rng>(rng: &mut R, chance: f64, max: f64) -> f64 {
    if chance <= 0.0 || !rng.gen_bool(chance.min(1.0)) {
        return 0.0;
    }
    jitter(rng, max)
}
