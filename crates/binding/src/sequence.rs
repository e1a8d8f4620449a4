//! Maneuver list: a local, editable mirror of the backend's maneuver sequence.
//!
//! Rows live in an ordered map keyed by [`RowHandle`]s drawn from a counter that never goes
//! back. Removal is therefore index-free, and a handle kept across `clear`/`reload` simply
//! stops resolving instead of pointing at a different row.
//!
//! The `id` shown on each row is a separate, 1-based label assigned as `len + 1` when the row
//! is created. It is what the delete buttons address; it is not a backend key and can repeat
//! after a remove followed by an add.

use std::collections::BTreeMap;

use mission_maneuvers::{ManeuverDraft, ManeuverRecord};
use tracing::{debug, warn};

use crate::BindingError;
use crate::backend::ManeuverBackend;

/// Stable address of one row for the lifetime of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowHandle(u64);

/// What a host needs to build one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverSeed {
    pub id: u32,
    /// Backend record for rows created by `reload`; `None` for rows added by the user.
    pub record: Option<ManeuverRecord>,
}

impl ManeuverSeed {
    /// Editable values the row starts with.
    pub fn draft(&self) -> ManeuverDraft {
        self.record.map(|record| record.draft).unwrap_or_default()
    }
}

/// A row view could not be instantiated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("failed to create maneuver view #{id}: {reason}")]
pub struct ViewError {
    pub id: u32,
    pub reason: String,
}

/// UI side of the list: builds, reads and tears down row views.
pub trait ManeuverViewHost {
    type View;

    fn create(&mut self, seed: &ManeuverSeed) -> Result<Self::View, ViewError>;

    /// Current editable values of a view.
    fn draft(&self, view: &Self::View) -> ManeuverDraft;

    /// Release everything the view holds (layout slot, bindings).
    fn destroy(&mut self, view: Self::View);
}

#[derive(Debug)]
struct Row<V> {
    id: u32,
    view: V,
}

/// Keeps a list of maneuver views in step with the backend sequence.
pub struct ManeuverSequenceController<B, H: ManeuverViewHost> {
    backend: B,
    host: H,
    rows: BTreeMap<RowHandle, Row<H::View>>,
    next_handle: u64,
}

impl<B, H> ManeuverSequenceController<B, H>
where
    B: ManeuverBackend,
    H: ManeuverViewHost,
{
    pub fn new(backend: B, host: H) -> Self {
        Self {
            backend,
            host,
            rows: BTreeMap::new(),
            next_handle: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in list order.
    pub fn ids(&self) -> Vec<u32> {
        self.rows.values().map(|row| row.id).collect()
    }

    /// `(handle, id, view)` in list order.
    pub fn rows(&self) -> impl Iterator<Item = (RowHandle, u32, &H::View)> + '_ {
        self.rows
            .iter()
            .map(|(handle, row)| (*handle, row.id, &row.view))
    }

    pub fn get(&self, handle: RowHandle) -> Option<&H::View> {
        self.rows.get(&handle).map(|row| &row.view)
    }

    pub fn get_mut(&mut self, handle: RowHandle) -> Option<&mut H::View> {
        self.rows.get_mut(&handle).map(|row| &mut row.view)
    }

    /// Handle of the first row labelled `id`.
    pub fn handle_of(&self, id: u32) -> Option<RowHandle> {
        self.rows
            .iter()
            .find(|(_, row)| row.id == id)
            .map(|(handle, _)| *handle)
    }

    pub fn id_of(&self, handle: RowHandle) -> Option<u32> {
        self.rows.get(&handle).map(|row| row.id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Destroy every row, last first. Returns the number of views destroyed.
    pub fn clear(&mut self) -> usize {
        let mut destroyed = 0;
        while let Some((_, row)) = self.rows.pop_last() {
            self.host.destroy(row.view);
            destroyed += 1;
        }
        destroyed
    }

    /// Rebuild the list from the backend sequence.
    ///
    /// Rows whose view cannot be created are logged and skipped, so the list may end up
    /// shorter than the backend sequence. A failing backend read aborts the reload.
    pub fn reload(&mut self) -> Result<usize, BindingError> {
        self.clear();

        let count = self.backend.maneuver_count();
        for index in 0..count {
            let record = self.backend.maneuver_at(index)?;
            let seed = ManeuverSeed {
                id: self.next_id(),
                record: Some(record),
            };
            self.spawn(&seed);
        }

        debug!(backend = count, loaded = self.rows.len(), "maneuver list reloaded");
        Ok(self.rows.len())
    }

    /// Append a default row. The backend is untouched until [`commit`](Self::commit).
    pub fn add(&mut self) -> Option<RowHandle> {
        let seed = ManeuverSeed {
            id: self.next_id(),
            record: None,
        };
        self.spawn(&seed)
    }

    /// Destroy the first row labelled `id`. Returns `false` when there is none.
    pub fn remove_by_id(&mut self, id: u32) -> bool {
        let Some(handle) = self.handle_of(id) else {
            return false;
        };
        match self.rows.remove(&handle) {
            Some(row) => {
                self.host.destroy(row.view);
                true
            }
            None => false,
        }
    }

    /// Replace the backend sequence with the list, in list order.
    ///
    /// Only the editable triple of each row is sent. The first backend failure aborts the
    /// whole replacement; nothing is rolled back.
    pub fn commit(&mut self) -> Result<usize, BindingError> {
        let drafts: Vec<ManeuverDraft> = self
            .rows
            .values()
            .map(|row| self.host.draft(&row.view))
            .collect();

        self.backend.clear_maneuvers()?;
        for (position, draft) in drafts.iter().enumerate() {
            self.backend
                .add_maneuver(draft.maneuver_type, draft.option, draft.option_value)
                .inspect_err(|err| warn!(position, %err, "maneuver commit rejected"))?;
        }

        debug!(committed = drafts.len(), "maneuver list committed");
        Ok(drafts.len())
    }

    /// Destroy every row and hand back the backend and host.
    pub fn into_parts(mut self) -> (B, H) {
        self.clear();
        (self.backend, self.host)
    }

    fn next_id(&self) -> u32 {
        u32::try_from(self.rows.len()).map_or(u32::MAX, |len| len.saturating_add(1))
    }

    fn spawn(&mut self, seed: &ManeuverSeed) -> Option<RowHandle> {
        match self.host.create(seed) {
            Ok(view) => {
                let handle = RowHandle(self.next_handle);
                self.next_handle += 1;
                self.rows.insert(handle, Row { id: seed.id, view });
                Some(handle)
            }
            Err(err) => {
                warn!(%err, "skipping maneuver row");
                None
            }
        }
    }
}
