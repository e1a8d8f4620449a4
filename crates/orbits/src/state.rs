//! Canonical orbit record as held by the backend.

use mission_core::vector::{self, Vector3};

use crate::{GROUP_LEN, OrbitField, RepresentationMode};

/// Orbit state of one mission context (departure, arrival, propagation start).
///
/// The four angles are stored once, so the Keplerian and modified Keplerian groups
/// always report the same inclination, RAAN, periapsis anomaly and true anomaly.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    pub body: usize,
    pub representation_mode: RepresentationMode,
    /// Position vector (km).
    pub position: Vector3,
    /// Velocity vector (km/s).
    pub velocity: Vector3,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub periapsis_anomaly: f64,
    pub true_anomaly: f64,
    pub periapsis_radius: f64,
    pub apoapsis_radius: f64,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            body: 0,
            representation_mode: RepresentationMode::Cartesian,
            position: vector::ZERO,
            velocity: vector::ZERO,
            semi_major_axis: 0.0,
            eccentricity: 0.0,
            inclination: 0.0,
            raan: 0.0,
            periapsis_anomaly: 0.0,
            true_anomaly: 0.0,
            periapsis_radius: 0.0,
            apoapsis_radius: 0.0,
        }
    }
}

impl OrbitState {
    /// Read one field.
    pub fn get(&self, field: OrbitField) -> f64 {
        match field {
            OrbitField::Rx => self.position[0],
            OrbitField::Ry => self.position[1],
            OrbitField::Rz => self.position[2],
            OrbitField::Vx => self.velocity[0],
            OrbitField::Vy => self.velocity[1],
            OrbitField::Vz => self.velocity[2],
            OrbitField::SemiMajorAxis => self.semi_major_axis,
            OrbitField::Eccentricity => self.eccentricity,
            OrbitField::Inclination => self.inclination,
            OrbitField::Raan => self.raan,
            OrbitField::PeriapsisAnomaly => self.periapsis_anomaly,
            OrbitField::TrueAnomaly => self.true_anomaly,
            OrbitField::PeriapsisRadius => self.periapsis_radius,
            OrbitField::ApoapsisRadius => self.apoapsis_radius,
        }
    }

    /// Write one field.
    pub fn set(&mut self, field: OrbitField, value: f64) {
        let slot = match field {
            OrbitField::Rx => &mut self.position[0],
            OrbitField::Ry => &mut self.position[1],
            OrbitField::Rz => &mut self.position[2],
            OrbitField::Vx => &mut self.velocity[0],
            OrbitField::Vy => &mut self.velocity[1],
            OrbitField::Vz => &mut self.velocity[2],
            OrbitField::SemiMajorAxis => &mut self.semi_major_axis,
            OrbitField::Eccentricity => &mut self.eccentricity,
            OrbitField::Inclination => &mut self.inclination,
            OrbitField::Raan => &mut self.raan,
            OrbitField::PeriapsisAnomaly => &mut self.periapsis_anomaly,
            OrbitField::TrueAnomaly => &mut self.true_anomaly,
            OrbitField::PeriapsisRadius => &mut self.periapsis_radius,
            OrbitField::ApoapsisRadius => &mut self.apoapsis_radius,
        };
        *slot = value;
    }

    /// Values of one representation group, in descriptor order.
    pub fn group(&self, mode: RepresentationMode) -> FieldGroup {
        let mut values = [0.0; GROUP_LEN];
        for (value, field) in values.iter_mut().zip(mode.fields()) {
            *value = self.get(*field);
        }
        FieldGroup { mode, values }
    }
}

/// The six values of one representation group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGroup {
    pub mode: RepresentationMode,
    pub values: [f64; GROUP_LEN],
}

impl FieldGroup {
    /// Value of `field` if it belongs to this group.
    pub fn get(&self, field: OrbitField) -> Option<f64> {
        self.mode
            .fields()
            .iter()
            .position(|f| *f == field)
            .map(|idx| self.values[idx])
    }

    /// `(field, value)` pairs in descriptor order.
    pub fn iter(&self) -> impl Iterator<Item = (OrbitField, f64)> + '_ {
        self.mode.fields().iter().copied().zip(self.values.iter().copied())
    }
}
