/// Per-tick movement and resource drift applied to every unit.
#[derive(Debug, Clone, Copy)]
pub struct DriftTuning {
    /// Max absolute lat/lng offset per tick, in decimal degrees.
    pub position_jitter: f64,

    pub personnel_chance: f64,
    pub personnel_delta: f64,
    pub ammo_chance: f64,
    pub ammo_delta: f64,
    pub fuel_chance: f64,
    pub fuel_delta: f64,

    /// Drifted resources never drop below this (units never show empty).
    pub status_floor: f64,
    pub status_ceiling: f64,
}

impl Default for DriftTuning {
    fn default() -> Self {
        Self {
            position_jitter: 0.001,
            personnel_chance: 0.3,
            personnel_delta: 2.5,
            ammo_chance: 0.3,
            ammo_delta: 1.5,
            fuel_chance: 0.2,
            fuel_delta: 2.0,
            status_floor: 1.0,
            status_ceiling: 100.0,
        }
    }
}
