//! Headless view host: each row is a plain value, useful off-screen and in tests.

use std::collections::BTreeSet;

use mission_maneuvers::{ManeuverDraft, ManeuverEffects};

use crate::sequence::{ManeuverSeed, ManeuverViewHost, ViewError};

/// A maneuver row as a list widget would hold it.
#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverRow {
    pub id: u32,
    pub draft: ManeuverDraft,
    /// Backend effects, present only for rows loaded from the backend.
    pub effects: Option<ManeuverEffects>,
}

/// Host whose views are [`ManeuverRow`]s. Counts creations and destructions.
#[derive(Debug, Default)]
pub struct DetachedViews {
    attempts: usize,
    created: usize,
    destroyed: Vec<u32>,
    failing_attempts: BTreeSet<usize>,
}

impl DetachedViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given creation attempts (1-based, counted across the host's life) fail.
    pub fn failing_on_attempts<I: IntoIterator<Item = usize>>(attempts: I) -> Self {
        Self {
            failing_attempts: attempts.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.len()
    }

    /// Ids of destroyed rows, in destruction order.
    pub fn destroyed_ids(&self) -> &[u32] {
        &self.destroyed
    }

    /// Views currently alive.
    pub fn live(&self) -> usize {
        self.created - self.destroyed.len()
    }
}

impl ManeuverViewHost for DetachedViews {
    type View = ManeuverRow;

    fn create(&mut self, seed: &ManeuverSeed) -> Result<Self::View, ViewError> {
        self.attempts += 1;
        if self.failing_attempts.contains(&self.attempts) {
            return Err(ViewError {
                id: seed.id,
                reason: format!("creation attempt {} refused", self.attempts),
            });
        }
        self.created += 1;
        Ok(ManeuverRow {
            id: seed.id,
            draft: seed.draft(),
            effects: seed.record.map(|record| record.effects),
        })
    }

    fn draft(&self, view: &Self::View) -> ManeuverDraft {
        view.draft
    }

    fn destroy(&mut self, view: Self::View) {
        self.destroyed.push(view.id);
    }
}
