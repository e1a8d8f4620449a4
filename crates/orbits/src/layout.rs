//! Per-dialog widget naming for the three field groups.
//!
//! The mapping logic is shared; dialogs differ only in what they call their inputs. The
//! modified Keplerian group repeats the angular quartet under `_2`-suffixed names.

use crate::{GROUP_LEN, OrbitField, RepresentationMode};

const STANDARD: [[&str; GROUP_LEN]; 3] = [
    ["x", "y", "z", "v_x", "v_y", "v_z"],
    [
        "semi_major_axis",
        "eccentricity",
        "inclination",
        "raan",
        "periapsis_anomaly",
        "true_anomaly",
    ],
    [
        "periapsis_radius",
        "apoapsis_radius",
        "inclination_2",
        "raan_2",
        "periapsis_anomaly_2",
        "true_anomaly_2",
    ],
];

const SYMBOLIC: [[&str; GROUP_LEN]; 3] = [
    ["x", "y", "z", "v_x", "v_y", "v_z"],
    ["a", "e", "i", "Omega", "omega", "theta"],
    ["r_p", "r_a", "i_2", "Omega_2", "omega_2", "theta_2"],
];

/// Widget names of every `(mode, field)` slot shown by one dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    names: [[String; GROUP_LEN]; 3],
}

impl FieldLayout {
    /// Names used by the orbit-transfer sections.
    pub fn standard() -> Self {
        Self::from_table(&STANDARD, "")
    }

    /// Standard names behind a prefix, e.g. `departure_x`, `arrival_raan_2`.
    pub fn prefixed(prefix: &str) -> Self {
        Self::from_table(&STANDARD, &format!("{prefix}_"))
    }

    /// Symbol names of the stand-alone orbit dialog (`a`, `e`, `Omega`, ...).
    pub fn symbolic() -> Self {
        Self::from_table(&SYMBOLIC, "")
    }

    fn from_table(table: &[[&str; GROUP_LEN]; 3], prefix: &str) -> Self {
        Self {
            names: table.map(|group| group.map(|name| format!("{prefix}{name}"))),
        }
    }

    /// Widget names of one group, in descriptor order.
    pub fn names(&self, mode: RepresentationMode) -> &[String; GROUP_LEN] {
        &self.names[mode.index()]
    }

    /// Widget name of `field` inside the `mode` group.
    pub fn name(&self, mode: RepresentationMode, field: OrbitField) -> Option<&str> {
        mode.fields()
            .iter()
            .position(|f| *f == field)
            .map(|idx| self.names[mode.index()][idx].as_str())
    }

    /// Widget names paired with their fields for one group.
    pub fn slots(
        &self,
        mode: RepresentationMode,
    ) -> impl Iterator<Item = (&str, OrbitField)> + '_ {
        self.names(mode)
            .iter()
            .map(String::as_str)
            .zip(mode.fields().iter().copied())
    }
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::standard()
    }
}
