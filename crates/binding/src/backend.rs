//! Contract between the binding layer and the mission backend.
//!
//! The backend owns the orbit state and the maneuver sequence; everything here is a
//! synchronous call from the UI thread. Both traits are implemented for `&mut B` so a
//! component can borrow a backend that outlives it.

use mission_maneuvers::{ManeuverRecord, ManeuverType};
use mission_orbits::{OrbitField, OrbitState, RepresentationMode};

/// How the backend should treat freshly written orbit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Recompute derived quantities and keep the dialog open.
    Update,
    /// Recompute and finalise the orbit.
    Save,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("backend rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
    #[error("maneuver index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Orbit object of one mission context.
pub trait OrbitBackend {
    /// Current canonical state, read in one call.
    fn snapshot(&self) -> OrbitState;
    fn set_body(&mut self, body: usize) -> Result<(), BackendError>;
    fn set_representation_mode(&mut self, mode: RepresentationMode) -> Result<(), BackendError>;
    fn set_field(&mut self, field: OrbitField, value: f64) -> Result<(), BackendError>;
    fn apply(&mut self, mode: ApplyMode) -> Result<(), BackendError>;
}

/// Dense, index-addressed maneuver sequence of a mission.
pub trait ManeuverBackend {
    fn maneuver_count(&self) -> usize;
    fn maneuver_at(&self, index: usize) -> Result<ManeuverRecord, BackendError>;
    fn clear_maneuvers(&mut self) -> Result<(), BackendError>;
    fn add_maneuver(
        &mut self,
        maneuver_type: ManeuverType,
        option: u32,
        option_value: f64,
    ) -> Result<(), BackendError>;
}

impl<B: OrbitBackend + ?Sized> OrbitBackend for &mut B {
    fn snapshot(&self) -> OrbitState {
        (**self).snapshot()
    }

    fn set_body(&mut self, body: usize) -> Result<(), BackendError> {
        (**self).set_body(body)
    }

    fn set_representation_mode(&mut self, mode: RepresentationMode) -> Result<(), BackendError> {
        (**self).set_representation_mode(mode)
    }

    fn set_field(&mut self, field: OrbitField, value: f64) -> Result<(), BackendError> {
        (**self).set_field(field, value)
    }

    fn apply(&mut self, mode: ApplyMode) -> Result<(), BackendError> {
        (**self).apply(mode)
    }
}

impl<B: ManeuverBackend + ?Sized> ManeuverBackend for &mut B {
    fn maneuver_count(&self) -> usize {
        (**self).maneuver_count()
    }

    fn maneuver_at(&self, index: usize) -> Result<ManeuverRecord, BackendError> {
        (**self).maneuver_at(index)
    }

    fn clear_maneuvers(&mut self) -> Result<(), BackendError> {
        (**self).clear_maneuvers()
    }

    fn add_maneuver(
        &mut self,
        maneuver_type: ManeuverType,
        option: u32,
        option_value: f64,
    ) -> Result<(), BackendError> {
        (**self).add_maneuver(maneuver_type, option, option_value)
    }
}
