//! Re-exported APIs for consumers of the binding crate.

pub use crate::backend::{ApplyMode, BackendError, ManeuverBackend, OrbitBackend};
pub use crate::mapper::{FieldInputs, RestoredOrbit, StateRepresentationMapper, ValidationReason};
pub use crate::memory::{InMemoryMission, InMemoryOrbit, ManeuverCall, OrbitCall, OrbitSlot};
pub use crate::progress::{ProgressDisplay, ProgressRelay};
pub use crate::sequence::{
    ManeuverSeed, ManeuverSequenceController, ManeuverViewHost, RowHandle, ViewError,
};
pub use crate::views::{DetachedViews, ManeuverRow};

pub mod scenario {
    use mission_config::{OrbitConfig, ScenarioConfig};
    use mission_maneuvers::{
        ManeuverDraft, ManeuverEffects, ManeuverRecord, ManeuverType, UnknownManeuverType,
    };
    use mission_orbits::{OrbitState, ParseModeError, RepresentationMode};
    use thiserror::Error;

    use crate::memory::{InMemoryMission, InMemoryOrbit, OrbitSlot};

    /// Errors surfaced when turning a scenario file into a mission backend.
    #[derive(Debug, Error)]
    pub enum ScenarioError {
        #[error("{slot} orbit: {source}")]
        Representation {
            slot: &'static str,
            #[source]
            source: ParseModeError,
        },
        #[error("maneuver {index}: {source}")]
        ManeuverType {
            index: usize,
            #[source]
            source: UnknownManeuverType,
        },
        #[error("{slot} orbit: body index {index} outside catalog of {count}")]
        UnknownBody {
            slot: &'static str,
            index: usize,
            count: usize,
        },
    }

    /// Build an in-memory mission from a scenario. `body_count` bounds the body indices.
    pub fn mission_from_config(
        config: &ScenarioConfig,
        body_count: Option<usize>,
    ) -> Result<InMemoryMission, ScenarioError> {
        let mut mission = InMemoryMission::new();
        mission.departure = orbit_from_config(OrbitSlot::Departure, &config.departure, body_count)?;
        if let Some(arrival) = &config.arrival {
            mission.arrival = orbit_from_config(OrbitSlot::Arrival, arrival, body_count)?;
        }
        if let Some(propagation) = &config.propagation {
            mission.propagation =
                orbit_from_config(OrbitSlot::Propagation, propagation, body_count)?;
        }

        let records = config
            .maneuvers
            .iter()
            .enumerate()
            .map(|(index, maneuver)| {
                let maneuver_type: ManeuverType = maneuver
                    .kind
                    .parse()
                    .map_err(|source| ScenarioError::ManeuverType { index, source })?;
                Ok(ManeuverRecord {
                    draft: ManeuverDraft::new(
                        maneuver_type,
                        maneuver.option,
                        maneuver.option_value,
                    ),
                    effects: ManeuverEffects {
                        delta_velocity: maneuver.delta_velocity_km_s,
                        delta_time: maneuver.delta_time_h,
                        delta_mass: maneuver.delta_mass_kg,
                    },
                })
            })
            .collect::<Result<Vec<_>, ScenarioError>>()?;

        Ok(mission.with_maneuvers(records))
    }

    fn orbit_from_config(
        slot: OrbitSlot,
        config: &OrbitConfig,
        body_count: Option<usize>,
    ) -> Result<InMemoryOrbit, ScenarioError> {
        if let Some(count) = body_count {
            if config.body >= count {
                return Err(ScenarioError::UnknownBody {
                    slot: slot.label(),
                    index: config.body,
                    count,
                });
            }
        }

        let representation_mode: RepresentationMode =
            config
                .representation
                .parse()
                .map_err(|source| ScenarioError::Representation {
                    slot: slot.label(),
                    source,
                })?;

        let mut state = OrbitState {
            body: config.body,
            representation_mode,
            ..OrbitState::default()
        };
        if let Some(cartesian) = &config.cartesian {
            state.position = cartesian.position_km;
            state.velocity = cartesian.velocity_km_s;
        }
        if let Some(keplerian) = &config.keplerian {
            state.semi_major_axis = keplerian.semi_major_axis_km;
            state.eccentricity = keplerian.eccentricity;
            state.inclination = keplerian.inclination_deg;
            state.raan = keplerian.raan_deg;
            state.periapsis_anomaly = keplerian.periapsis_anomaly_deg;
            state.true_anomaly = keplerian.true_anomaly_deg;
        }
        if let Some(modified) = &config.modified_keplerian {
            state.periapsis_radius = modified.periapsis_radius_km;
            state.apoapsis_radius = modified.apoapsis_radius_km;
        }

        Ok(InMemoryOrbit::with_state(slot, state))
    }
}
