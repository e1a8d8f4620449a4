//! Forwarding of backend progress and completion callbacks to a display.

use tracing::warn;

/// Whatever shows progress to the user (progress bar, status line).
pub trait ProgressDisplay {
    /// Percentage in `0..=100`.
    fn set_progress(&mut self, percent: f64);
    fn completed(&mut self);
}

impl<D: ProgressDisplay + ?Sized> ProgressDisplay for &mut D {
    fn set_progress(&mut self, percent: f64) {
        (**self).set_progress(percent)
    }

    fn completed(&mut self) {
        (**self).completed()
    }
}

/// Receives backend callbacks and forwards them, clamped, to a display.
#[derive(Debug)]
pub struct ProgressRelay<D> {
    display: D,
    last: Option<f64>,
}

impl<D: ProgressDisplay> ProgressRelay<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            last: None,
        }
    }

    /// Progress callback. Non-finite values are dropped.
    pub fn on_progress(&mut self, value: f64) {
        if !value.is_finite() {
            warn!(value, "ignoring non-finite progress value");
            return;
        }
        let percent = value.clamp(0.0, 100.0);
        self.last = Some(percent);
        self.display.set_progress(percent);
    }

    /// Completion callback: the display ends at 100 %.
    pub fn on_completed(&mut self) {
        if self.last != Some(100.0) {
            self.on_progress(100.0);
        }
        self.display.completed();
    }

    /// Last forwarded percentage.
    pub fn last(&self) -> Option<f64> {
        self.last
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_inner(self) -> D {
        self.display
    }
}
