//! Maneuver kinds and records exchanged with the mission backend.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of orbital maneuver. Discriminants match the backend's integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ManeuverType {
    /// Two-impulse transfer between periapsis and apoapsis.
    #[default]
    Hohmann = 0,
    /// Three-impulse transfer through an intermediate apoapsis given as the option value.
    BiEllipticHohmann = 1,
    /// Inclination change.
    PlaneChange = 2,
    /// Rotation of the apse line.
    ApseLineRotation = 3,
}

impl ManeuverType {
    pub const ALL: [ManeuverType; 4] = [
        ManeuverType::Hohmann,
        ManeuverType::BiEllipticHohmann,
        ManeuverType::PlaneChange,
        ManeuverType::ApseLineRotation,
    ];

    /// Backend integer code.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            ManeuverType::Hohmann => "hohmann",
            ManeuverType::BiEllipticHohmann => "bi-elliptic-hohmann",
            ManeuverType::PlaneChange => "plane-change",
            ManeuverType::ApseLineRotation => "apse-line-rotation",
        }
    }
}

impl TryFrom<u32> for ManeuverType {
    type Error = UnknownManeuverType;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| UnknownManeuverType(code.to_string()))
    }
}

impl FromStr for ManeuverType {
    type Err = UnknownManeuverType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        if let Ok(code) = normalized.parse::<u32>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == normalized)
            .ok_or_else(|| UnknownManeuverType(s.to_string()))
    }
}

impl fmt::Display for ManeuverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Unknown maneuver type code or label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown maneuver type '{0}'")]
pub struct UnknownManeuverType(pub String);

/// Direction option of the Hohmann-family maneuvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HohmannDirection {
    PeriapsisToApoapsis = 0,
    ApoapsisToPeriapsis = 1,
}

impl HohmannDirection {
    pub const ALL: [HohmannDirection; 2] = [
        HohmannDirection::PeriapsisToApoapsis,
        HohmannDirection::ApoapsisToPeriapsis,
    ];

    /// `option` value sent with the maneuver.
    pub fn option(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            HohmannDirection::PeriapsisToApoapsis => "periapsis-to-apoapsis",
            HohmannDirection::ApoapsisToPeriapsis => "apoapsis-to-periapsis",
        }
    }
}

impl FromStr for HohmannDirection {
    type Err = UnknownHohmannDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|direction| direction.label() == normalized)
            .ok_or_else(|| UnknownHohmannDirection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown Hohmann direction '{0}'")]
pub struct UnknownHohmannDirection(pub String);

/// The user-editable part of a maneuver: what the list sends back on commit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManeuverDraft {
    pub maneuver_type: ManeuverType,
    /// Selects which auxiliary parameter `option_value` carries.
    pub option: u32,
    pub option_value: f64,
}

impl ManeuverDraft {
    pub fn new(maneuver_type: ManeuverType, option: u32, option_value: f64) -> Self {
        Self {
            maneuver_type,
            option,
            option_value,
        }
    }
}

/// Effects computed by the backend after simulating a maneuver. Never sent back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManeuverEffects {
    /// Delta-v (km/s).
    pub delta_velocity: f64,
    /// Duration (h).
    pub delta_time: f64,
    /// Propellant consumed (kg).
    pub delta_mass: f64,
}

/// A maneuver as held by the backend at some index of its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManeuverRecord {
    pub draft: ManeuverDraft,
    pub effects: ManeuverEffects,
}

impl ManeuverRecord {
    /// Record freshly added by the user: effects unknown until the backend simulates it.
    pub fn from_draft(draft: ManeuverDraft) -> Self {
        Self {
            draft,
            effects: ManeuverEffects::default(),
        }
    }
}

impl From<ManeuverDraft> for ManeuverRecord {
    fn from(draft: ManeuverDraft) -> Self {
        Self::from_draft(draft)
    }
}
