//! Orbit state records and the field-group descriptor table shared by every orbit dialog.
//!
//! One physical orbit is described by three parameterizations. Only the group selected by
//! [`RepresentationMode`] is authoritative; the others are whatever the backend last stored.

pub mod layout;
pub mod state;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use layout::FieldLayout;
pub use state::{FieldGroup, OrbitState};

/// Number of fields carried by each representation group.
pub const GROUP_LEN: usize = 6;

/// Orbit parameterization selected by the mode switch.
///
/// Discriminants follow the selector order used by the dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepresentationMode {
    #[default]
    Cartesian = 0,
    Keplerian = 1,
    ModifiedKeplerian = 2,
}

impl RepresentationMode {
    /// All modes in selector order.
    pub const ALL: [RepresentationMode; 3] = [
        RepresentationMode::Cartesian,
        RepresentationMode::Keplerian,
        RepresentationMode::ModifiedKeplerian,
    ];

    /// Selector index of the mode.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mode for a selector index.
    pub fn from_index(index: usize) -> Result<Self, ParseModeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| ParseModeError(index.to_string()))
    }

    /// Ordered fields written and displayed for this mode.
    pub fn fields(self) -> &'static [OrbitField; GROUP_LEN] {
        use OrbitField::*;
        const CARTESIAN: [OrbitField; GROUP_LEN] = [Rx, Ry, Rz, Vx, Vy, Vz];
        const KEPLERIAN: [OrbitField; GROUP_LEN] = [
            SemiMajorAxis,
            Eccentricity,
            Inclination,
            Raan,
            PeriapsisAnomaly,
            TrueAnomaly,
        ];
        const MODIFIED: [OrbitField; GROUP_LEN] = [
            PeriapsisRadius,
            ApoapsisRadius,
            Inclination,
            Raan,
            PeriapsisAnomaly,
            TrueAnomaly,
        ];
        match self {
            RepresentationMode::Cartesian => &CARTESIAN,
            RepresentationMode::Keplerian => &KEPLERIAN,
            RepresentationMode::ModifiedKeplerian => &MODIFIED,
        }
    }

    /// Kebab-case label accepted by [`FromStr`].
    pub fn label(self) -> &'static str {
        match self {
            RepresentationMode::Cartesian => "cartesian",
            RepresentationMode::Keplerian => "keplerian",
            RepresentationMode::ModifiedKeplerian => "modified-keplerian",
        }
    }
}

impl fmt::Display for RepresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for RepresentationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "cartesian" | "0" => Ok(RepresentationMode::Cartesian),
            "keplerian" | "1" => Ok(RepresentationMode::Keplerian),
            "modified-keplerian" | "modified" | "2" => Ok(RepresentationMode::ModifiedKeplerian),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Unknown representation mode label or index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown orbit representation mode '{0}'")]
pub struct ParseModeError(pub String);

/// A single scalar of the orbit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrbitField {
    Rx,
    Ry,
    Rz,
    Vx,
    Vy,
    Vz,
    SemiMajorAxis,
    Eccentricity,
    Inclination,
    Raan,
    PeriapsisAnomaly,
    TrueAnomaly,
    PeriapsisRadius,
    ApoapsisRadius,
}

impl OrbitField {
    /// Every field, Cartesian first.
    pub const ALL: [OrbitField; 14] = [
        OrbitField::Rx,
        OrbitField::Ry,
        OrbitField::Rz,
        OrbitField::Vx,
        OrbitField::Vy,
        OrbitField::Vz,
        OrbitField::SemiMajorAxis,
        OrbitField::Eccentricity,
        OrbitField::Inclination,
        OrbitField::Raan,
        OrbitField::PeriapsisAnomaly,
        OrbitField::TrueAnomaly,
        OrbitField::PeriapsisRadius,
        OrbitField::ApoapsisRadius,
    ];

    /// Backend property name of the field.
    pub fn name(self) -> &'static str {
        match self {
            OrbitField::Rx => "r_x",
            OrbitField::Ry => "r_y",
            OrbitField::Rz => "r_z",
            OrbitField::Vx => "v_x",
            OrbitField::Vy => "v_y",
            OrbitField::Vz => "v_z",
            OrbitField::SemiMajorAxis => "semi_major_axis",
            OrbitField::Eccentricity => "eccentricity",
            OrbitField::Inclination => "inclination",
            OrbitField::Raan => "right_ascension_ascending_node",
            OrbitField::PeriapsisAnomaly => "periapsis_anomaly",
            OrbitField::TrueAnomaly => "true_anomaly",
            OrbitField::PeriapsisRadius => "periapsis_radius",
            OrbitField::ApoapsisRadius => "apoapsis_radius",
        }
    }

    /// Angular quartet aliased by the Keplerian and modified Keplerian groups.
    pub fn is_shared_angle(self) -> bool {
        matches!(
            self,
            OrbitField::Inclination
                | OrbitField::Raan
                | OrbitField::PeriapsisAnomaly
                | OrbitField::TrueAnomaly
        )
    }
}

impl fmt::Display for OrbitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
