//! Binding layer of the mission designer.
//!
//! Orbit dialogs go through [`binding::StateRepresentationMapper`], the maneuver list through
//! [`binding::ManeuverSequenceController`]. Both talk to the mission backend only through the
//! traits in [`binding::backend`], so the same code drives a live backend or the in-memory
//! one used by the session CLI and the tests.

pub use mission_binding as binding;
pub use mission_config as config;
pub use mission_core as common;
pub use mission_export as export;
pub use mission_maneuvers as maneuvers;
pub use mission_orbits as orbits;
