//! Orbit dialogs: text inputs of one representation group in, all three groups out.
//!
//! A single mapper serves every orbit dialog. Dialogs differ only by their
//! [`FieldLayout`], so widget names never leak past this module.

use std::collections::BTreeMap;

use mission_orbits::{
    FieldGroup, FieldLayout, GROUP_LEN, OrbitField, OrbitState, RepresentationMode,
};
use tracing::debug;

use crate::BindingError;
use crate::backend::{ApplyMode, OrbitBackend};

/// Why a field input was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationReason {
    #[error("no input provided")]
    Missing,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("value is NaN")]
    NaN,
    #[error("value must not be negative")]
    Negative,
    #[error("periapsis radius exceeds apoapsis radius")]
    PeriapsisAboveApoapsis,
}

/// Raw widget texts keyed by widget name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInputs {
    values: BTreeMap<String, String>,
}

impl FieldInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, widget: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.values.insert(widget.into(), text.into());
        self
    }

    pub fn get(&self, widget: &str) -> Option<&str> {
        self.values.get(widget).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldInputs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All three groups as displayed after a restore.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredOrbit {
    pub body: usize,
    pub mode: RepresentationMode,
    pub cartesian: FieldGroup,
    pub keplerian: FieldGroup,
    pub modified_keplerian: FieldGroup,
}

impl RestoredOrbit {
    pub fn from_state(state: &OrbitState) -> Self {
        Self {
            body: state.body,
            mode: state.representation_mode,
            cartesian: state.group(RepresentationMode::Cartesian),
            keplerian: state.group(RepresentationMode::Keplerian),
            modified_keplerian: state.group(RepresentationMode::ModifiedKeplerian),
        }
    }

    pub fn group(&self, mode: RepresentationMode) -> &FieldGroup {
        match mode {
            RepresentationMode::Cartesian => &self.cartesian,
            RepresentationMode::Keplerian => &self.keplerian,
            RepresentationMode::ModifiedKeplerian => &self.modified_keplerian,
        }
    }

    /// Every displayed widget with its value, groups in selector order.
    pub fn display<'a>(&self, layout: &'a FieldLayout) -> Vec<(&'a str, f64)> {
        RepresentationMode::ALL
            .iter()
            .flat_map(|mode| {
                layout
                    .names(*mode)
                    .iter()
                    .map(String::as_str)
                    .zip(self.group(*mode).values)
            })
            .collect()
    }

    /// Widget texts of one group, as a dialog would show them.
    pub fn inputs(&self, mode: RepresentationMode, layout: &FieldLayout) -> FieldInputs {
        layout
            .names(mode)
            .iter()
            .zip(self.group(mode).values)
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }
}

/// Binds one orbit dialog to the backend orbit object.
#[derive(Debug)]
pub struct StateRepresentationMapper<B> {
    backend: B,
    layout: FieldLayout,
    selected_mode: RepresentationMode,
    body_count: Option<usize>,
}

impl<B: OrbitBackend> StateRepresentationMapper<B> {
    pub fn new(backend: B, layout: FieldLayout) -> Self {
        Self {
            backend,
            layout,
            selected_mode: RepresentationMode::default(),
            body_count: None,
        }
    }

    /// Bound `select_body` by the size of the body catalog.
    pub fn with_body_count(mut self, count: usize) -> Self {
        self.body_count = Some(count);
        self
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Group currently shown by the dialog.
    pub fn selected_mode(&self) -> RepresentationMode {
        self.selected_mode
    }

    /// Switch the displayed group. Navigation only: the backend is not touched.
    pub fn select_mode(&mut self, mode: RepresentationMode) {
        self.selected_mode = mode;
    }

    pub fn select_body(&mut self, body: usize) -> Result<(), BindingError> {
        if let Some(count) = self.body_count {
            if body >= count {
                return Err(BindingError::UnknownBody { index: body, count });
            }
        }
        self.backend.set_body(body)?;
        Ok(())
    }

    /// Write the `mode` group from its widget texts and make `mode` authoritative.
    ///
    /// Every field of the group is parsed before the first backend write; any failure leaves
    /// the backend untouched. Fields of the other groups are never written.
    pub fn save_from_mode(
        &mut self,
        mode: RepresentationMode,
        inputs: &FieldInputs,
    ) -> Result<(), BindingError> {
        let values = self.parse_group(mode, inputs)?;

        self.backend.set_representation_mode(mode)?;
        for (field, value) in mode.fields().iter().zip(values) {
            self.backend.set_field(*field, value)?;
        }
        self.selected_mode = mode;
        debug!(%mode, "orbit group saved");
        Ok(())
    }

    /// [`save_from_mode`](Self::save_from_mode), then ask the backend to apply it.
    pub fn save_and_apply(
        &mut self,
        mode: RepresentationMode,
        inputs: &FieldInputs,
        apply: ApplyMode,
    ) -> Result<(), BindingError> {
        self.save_from_mode(mode, inputs)?;
        self.backend.apply(apply)?;
        Ok(())
    }

    /// Read the backend once and repopulate every group.
    pub fn restore_all(&mut self) -> RestoredOrbit {
        let state = self.backend.snapshot();
        self.selected_mode = state.representation_mode;
        RestoredOrbit::from_state(&state)
    }

    fn parse_group(
        &self,
        mode: RepresentationMode,
        inputs: &FieldInputs,
    ) -> Result<[f64; GROUP_LEN], BindingError> {
        let mut values = [0.0; GROUP_LEN];
        for (slot, (widget, field)) in values.iter_mut().zip(self.layout.slots(mode)) {
            *slot = parse_field(widget, field, inputs.get(widget))?;
        }

        // Hyperbolic orbits carry a negative apoapsis radius, parabolic ones an infinite one.
        if mode == RepresentationMode::ModifiedKeplerian {
            let periapsis = values[0];
            let apoapsis = values[1];
            if apoapsis >= 0.0 && periapsis > apoapsis {
                return Err(invalid(
                    self.layout.names(mode)[0].as_str(),
                    ValidationReason::PeriapsisAboveApoapsis,
                ));
            }
        }
        Ok(values)
    }
}

fn parse_field(widget: &str, field: OrbitField, text: Option<&str>) -> Result<f64, BindingError> {
    let text = text.ok_or_else(|| invalid(widget, ValidationReason::Missing))?;
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| invalid(widget, ValidationReason::NotANumber(text.to_string())))?;
    if value.is_nan() {
        return Err(invalid(widget, ValidationReason::NaN));
    }

    let must_be_non_negative = matches!(
        field,
        OrbitField::Eccentricity | OrbitField::PeriapsisRadius
    );
    if must_be_non_negative && value < 0.0 {
        return Err(invalid(widget, ValidationReason::Negative));
    }
    Ok(value)
}

fn invalid(widget: &str, reason: ValidationReason) -> BindingError {
    BindingError::Validation {
        field: widget.to_string(),
        reason,
    }
}
