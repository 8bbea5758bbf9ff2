//! Slider widget — mounts a range control from a handle plan and applies the
//! feedback presentation.

use tracing::debug;

use crate::control::{
    Bounds, ChangeListener, ControlError, ControlOptions, DragOutcome, Handle, HandleStyle,
    RangeControl, RejectReason, DEFAULT_STEP,
};
use crate::mode::{HandlePlan, FEEDBACK_HANDLE};

/// Wraps a `RangeControl` for the lifetime of one mounted frame.
///
/// After `unmount` the control is kept in its destroyed state so callers can
/// still read the final handle positions; it rejects all input.
#[derive(Debug, Default)]
pub struct SliderWidget {
    control: Option<RangeControl>,
}

impl SliderWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the control: one handle per planned value, clamped to `bounds`,
    /// enabled only when the plan is interactive.
    ///
    /// A non-interactive control keeps the normal appearance, and the handle at
    /// `FEEDBACK_HANDLE` (when present) gets the highlight style.
    pub fn mount(&mut self, plan: &HandlePlan, bounds: Bounds) -> Result<(), ControlError> {
        self.unmount();

        let mut control = RangeControl::new(ControlOptions {
            bounds,
            step: DEFAULT_STEP,
            values: plan.values.clone(),
        })?;
        control.set_enabled(plan.interactive);

        if !plan.interactive {
            control.clear_disabled_appearance();
            if control.handles().len() > FEEDBACK_HANDLE {
                control.set_handle_style(FEEDBACK_HANDLE, HandleStyle::Highlight)?;
            }
        }

        self.control = Some(control);
        Ok(())
    }

    /// Attach a change listener. Returns false when nothing is mounted.
    pub fn on_change(&mut self, listener: ChangeListener) -> bool {
        match self.control.as_mut() {
            Some(control) if !control.is_destroyed() => {
                control.add_listener(listener);
                true
            }
            _ => false,
        }
    }

    /// Forward a user drag to the control.
    pub fn drag(&mut self, handle: usize, value: f64) -> DragOutcome {
        let outcome = match self.control.as_mut() {
            Some(control) => control.drag(handle, value),
            None => DragOutcome::Rejected(RejectReason::Destroyed),
        };
        debug!(handle, value, ?outcome, "slider drag");
        outcome
    }

    /// Destroy the control, releasing every listener. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(control) = self.control.as_mut() {
            control.destroy();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.control.as_ref().is_some_and(|c| !c.is_destroyed())
    }

    pub fn is_interactive(&self) -> bool {
        self.control.as_ref().is_some_and(|c| c.is_enabled())
    }

    pub fn handles(&self) -> &[Handle] {
        self.control
            .as_ref()
            .map(|c| c.handles())
            .unwrap_or_default()
    }

    pub fn bounds(&self) -> Bounds {
        self.control.as_ref().map_or(Bounds::PERCENT, |c| c.bounds())
    }

    pub fn step(&self) -> f64 {
        self.control.as_ref().map_or(DEFAULT_STEP, |c| c.step())
    }

    pub fn control(&self) -> Option<&RangeControl> {
        self.control.as_ref()
    }
}
