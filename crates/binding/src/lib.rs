//! Binding layer between mission dialogs and the mission backend.
//!
//! Two independent components share the backend contract in [`backend`]:
//! [`StateRepresentationMapper`] for orbit dialogs and [`ManeuverSequenceController`] for
//! the maneuver list.

pub mod backend;
pub mod mapper;
pub mod memory;
pub mod progress;
pub mod sequence;
pub mod views;

pub use facade::*;
pub use mission_maneuvers as maneuvers;
pub use mission_orbits as orbits;

mod facade;

pub use backend::BackendError;
pub use mapper::ValidationReason;

/// Errors surfaced by the binding components to the dialog that called them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("invalid value for '{field}': {reason}")]
    Validation {
        field: String,
        reason: ValidationReason,
    },
    #[error("celestial body index {index} outside catalog of {count}")]
    UnknownBody { index: usize, count: usize },
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),
}
