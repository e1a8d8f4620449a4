//! In-memory mission backend that records every mutating call.
//!
//! Stands in for the numerical backend in tests and in the session CLI. It stores
//! exactly what it is told and performs no orbit conversion.

use std::cell::Cell;

use mission_maneuvers::{ManeuverDraft, ManeuverRecord, ManeuverType};
use mission_orbits::{OrbitField, OrbitState, RepresentationMode};
use tracing::debug;

use crate::backend::{ApplyMode, BackendError, ManeuverBackend, OrbitBackend};

/// Mission context an orbit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitSlot {
    Departure,
    Arrival,
    Propagation,
}

impl OrbitSlot {
    pub fn label(self) -> &'static str {
        match self {
            OrbitSlot::Departure => "departure",
            OrbitSlot::Arrival => "arrival",
            OrbitSlot::Propagation => "propagation",
        }
    }
}

/// A mutating call received by [`InMemoryOrbit`].
#[derive(Debug, Clone, PartialEq)]
pub enum OrbitCall {
    SetBody(usize),
    SetMode(RepresentationMode),
    SetField(OrbitField, f64),
    Apply(ApplyMode),
}

#[derive(Debug, Clone)]
pub struct InMemoryOrbit {
    slot: OrbitSlot,
    state: OrbitState,
    calls: Vec<OrbitCall>,
    snapshots: Cell<usize>,
    finalized: bool,
}

impl InMemoryOrbit {
    pub fn new(slot: OrbitSlot) -> Self {
        Self::with_state(slot, OrbitState::default())
    }

    pub fn with_state(slot: OrbitSlot, state: OrbitState) -> Self {
        Self {
            slot,
            state,
            calls: Vec::new(),
            snapshots: Cell::new(0),
            finalized: false,
        }
    }

    pub fn slot(&self) -> OrbitSlot {
        self.slot
    }

    /// Stored state without counting as a snapshot read.
    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn calls(&self) -> &[OrbitCall] {
        &self.calls
    }

    /// Number of `snapshot()` reads served so far.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.get()
    }

    /// True once an `ApplyMode::Save` has been received.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl OrbitBackend for InMemoryOrbit {
    fn snapshot(&self) -> OrbitState {
        self.snapshots.set(self.snapshots.get() + 1);
        self.state.clone()
    }

    fn set_body(&mut self, body: usize) -> Result<(), BackendError> {
        self.calls.push(OrbitCall::SetBody(body));
        self.state.body = body;
        Ok(())
    }

    fn set_representation_mode(&mut self, mode: RepresentationMode) -> Result<(), BackendError> {
        self.calls.push(OrbitCall::SetMode(mode));
        self.state.representation_mode = mode;
        Ok(())
    }

    fn set_field(&mut self, field: OrbitField, value: f64) -> Result<(), BackendError> {
        self.calls.push(OrbitCall::SetField(field, value));
        self.state.set(field, value);
        Ok(())
    }

    fn apply(&mut self, mode: ApplyMode) -> Result<(), BackendError> {
        self.calls.push(OrbitCall::Apply(mode));
        if mode == ApplyMode::Save {
            self.finalized = true;
        }
        debug!(slot = self.slot.label(), ?mode, "orbit applied");
        Ok(())
    }
}

/// A mutating call received by [`InMemoryMission`]'s maneuver sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ManeuverCall {
    Clear,
    Add(ManeuverDraft),
}

/// Mission with departure, arrival and propagation-start orbits and a maneuver sequence.
#[derive(Debug, Clone)]
pub struct InMemoryMission {
    pub departure: InMemoryOrbit,
    pub arrival: InMemoryOrbit,
    pub propagation: InMemoryOrbit,
    maneuvers: Vec<ManeuverRecord>,
    calls: Vec<ManeuverCall>,
    accept_limit: Option<usize>,
}

impl Default for InMemoryMission {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMission {
    pub fn new() -> Self {
        Self {
            departure: InMemoryOrbit::new(OrbitSlot::Departure),
            arrival: InMemoryOrbit::new(OrbitSlot::Arrival),
            propagation: InMemoryOrbit::new(OrbitSlot::Propagation),
            maneuvers: Vec::new(),
            calls: Vec::new(),
            accept_limit: None,
        }
    }

    /// Seed the sequence with existing records, effects included, without logging calls.
    pub fn with_maneuvers<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = ManeuverRecord>,
    {
        self.maneuvers.extend(records);
        self
    }

    /// Reject `add_maneuver` once the sequence holds `limit` records.
    pub fn with_accept_limit(mut self, limit: usize) -> Self {
        self.accept_limit = Some(limit);
        self
    }

    pub fn orbit(&self, slot: OrbitSlot) -> &InMemoryOrbit {
        match slot {
            OrbitSlot::Departure => &self.departure,
            OrbitSlot::Arrival => &self.arrival,
            OrbitSlot::Propagation => &self.propagation,
        }
    }

    pub fn orbit_mut(&mut self, slot: OrbitSlot) -> &mut InMemoryOrbit {
        match slot {
            OrbitSlot::Departure => &mut self.departure,
            OrbitSlot::Arrival => &mut self.arrival,
            OrbitSlot::Propagation => &mut self.propagation,
        }
    }

    pub fn maneuvers(&self) -> &[ManeuverRecord] {
        &self.maneuvers
    }

    pub fn maneuver_calls(&self) -> &[ManeuverCall] {
        &self.calls
    }

    /// Number of `add_maneuver` calls received so far.
    pub fn add_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ManeuverCall::Add(_)))
            .count()
    }
}

impl ManeuverBackend for InMemoryMission {
    fn maneuver_count(&self) -> usize {
        self.maneuvers.len()
    }

    fn maneuver_at(&self, index: usize) -> Result<ManeuverRecord, BackendError> {
        self.maneuvers
            .get(index)
            .copied()
            .ok_or(BackendError::IndexOutOfRange {
                index,
                count: self.maneuvers.len(),
            })
    }

    fn clear_maneuvers(&mut self) -> Result<(), BackendError> {
        self.calls.push(ManeuverCall::Clear);
        self.maneuvers.clear();
        Ok(())
    }

    fn add_maneuver(
        &mut self,
        maneuver_type: ManeuverType,
        option: u32,
        option_value: f64,
    ) -> Result<(), BackendError> {
        let draft = ManeuverDraft::new(maneuver_type, option, option_value);
        self.calls.push(ManeuverCall::Add(draft));
        if let Some(limit) = self.accept_limit {
            if self.maneuvers.len() >= limit {
                return Err(BackendError::Rejected {
                    operation: "add_maneuver",
                    reason: format!("sequence limited to {limit} maneuvers"),
                });
            }
        }
        self.maneuvers.push(ManeuverRecord::from_draft(draft));
        Ok(())
    }
}
