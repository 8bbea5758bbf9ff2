//! Range control primitive — a horizontal slider with one or two handles.
//!
//! The control owns:
//! - Bounds and step (values are clamped to the bounds; drags snap to the step)
//! - Handle values and per-handle styles
//! - Functional enabled state, separate from its disabled appearance
//! - Change listeners, notified synchronously on every user-driven move
//!
//! The control never reports an error for a drag. Input it cannot honor comes
//! back as `DragOutcome::Rejected` and out-of-bounds positions are clamped.

use std::fmt;

use thiserror::Error;

use crate::config::{RESPONSE_MAX, RESPONSE_MIN};

/// Maximum number of handles a control can carry.
pub const MAX_HANDLES: usize = 2;

/// Default drag granularity.
pub const DEFAULT_STEP: f64 = 1.0;

/// Errors from constructing or configuring a control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("invalid bounds [{min}, {max}]")]
    InvalidBounds { min: f64, max: f64 },

    #[error("step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("a slider needs one or two handles, got {0}")]
    HandleCount(usize),

    #[error("handle {index} does not exist (control has {count})")]
    NoSuchHandle { index: usize, count: usize },
}

/// Inclusive value range of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// The 0–100 range every slider frame uses.
    pub const PERCENT: Bounds = Bounds {
        min: RESPONSE_MIN,
        max: RESPONSE_MAX,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, ControlError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ControlError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Clamp into the range. NaN lands on `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Position of `value` along the range, in [0, 1].
    pub fn fraction(&self, value: f64) -> f64 {
        ((self.clamp(value) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Value at a fractional position along the range.
    pub fn at_fraction(&self, frac: f64) -> f64 {
        self.min + frac.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::PERCENT
    }
}

/// Visual style of one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleStyle {
    #[default]
    Standard,
    /// Contrasting fill marking the reference value.
    Highlight,
}

/// A single draggable marker bound to one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub value: f64,
    pub style: HandleStyle,
}

/// How the control looks, independent of whether it accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Normal,
    /// Greyed-out look applied when the control is disabled.
    Disabled,
}

/// Why a drag was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Disabled,
    Destroyed,
    NoSuchHandle,
    /// NaN is not a position on the track.
    NotANumber,
}

/// Result of a single user-driven drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The handle moved; listeners were notified with the new value.
    Moved(f64),
    /// The drag resolved to the handle's current value.
    Unchanged(f64),
    Rejected(RejectReason),
}

impl DragOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, DragOutcome::Rejected(_))
    }
}

/// A handle movement delivered to change listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleChange {
    pub handle: usize,
    pub value: f64,
}

/// Callback invoked on every handle movement.
pub type ChangeListener = Box<dyn FnMut(HandleChange)>;

/// Construction parameters for a `RangeControl`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlOptions {
    pub bounds: Bounds,
    pub step: f64,
    /// One entry per handle.
    pub values: Vec<f64>,
}

impl ControlOptions {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            bounds: Bounds::PERCENT,
            step: DEFAULT_STEP,
            values,
        }
    }
}

pub struct RangeControl {
    bounds: Bounds,
    step: f64,
    handles: Vec<Handle>,
    enabled: bool,
    appearance: Appearance,
    listeners: Vec<ChangeListener>,
    destroyed: bool,
}

impl RangeControl {
    /// Build a control. Initial values are clamped to the bounds but not snapped,
    /// so a configured value is shown exactly where it was configured.
    pub fn new(options: ControlOptions) -> Result<Self, ControlError> {
        let bounds = Bounds::new(options.bounds.min, options.bounds.max)?;
        if !(options.step.is_finite() && options.step > 0.0) {
            return Err(ControlError::InvalidStep(options.step));
        }
        let count = options.values.len();
        if count == 0 || count > MAX_HANDLES {
            return Err(ControlError::HandleCount(count));
        }

        let handles = options
            .values
            .iter()
            .map(|&v| Handle {
                value: bounds.clamp(v),
                style: HandleStyle::Standard,
            })
            .collect();

        Ok(Self {
            bounds,
            step: options.step,
            handles,
            enabled: true,
            appearance: Appearance::Normal,
            listeners: Vec::new(),
            destroyed: false,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn values(&self) -> Vec<f64> {
        self.handles.iter().map(|h| h.value).collect()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Enable or disable input. Disabling also applies the disabled appearance.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.appearance = if enabled {
            Appearance::Normal
        } else {
            Appearance::Disabled
        };
    }

    /// Drop the disabled look while leaving the control functionally disabled.
    pub fn clear_disabled_appearance(&mut self) {
        self.appearance = Appearance::Normal;
    }

    pub fn set_handle_style(
        &mut self,
        index: usize,
        style: HandleStyle,
    ) -> Result<(), ControlError> {
        let count = self.handles.len();
        let handle = self
            .handles
            .get_mut(index)
            .ok_or(ControlError::NoSuchHandle { index, count })?;
        handle.style = style;
        Ok(())
    }

    /// Register a change listener. Ignored once the control is destroyed.
    pub fn add_listener(&mut self, listener: ChangeListener) {
        if !self.destroyed {
            self.listeners.push(listener);
        }
    }

    /// Snap to the step grid anchored at `min`, then clamp.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.bounds.clamp(value);
        let steps = ((clamped - self.bounds.min) / self.step).round();
        self.bounds.clamp(self.bounds.min + steps * self.step)
    }

    /// Apply a user drag of `handle` to the raw position `value`.
    pub fn drag(&mut self, handle: usize, value: f64) -> DragOutcome {
        if self.destroyed {
            return DragOutcome::Rejected(RejectReason::Destroyed);
        }
        if !self.enabled {
            return DragOutcome::Rejected(RejectReason::Disabled);
        }
        if value.is_nan() {
            return DragOutcome::Rejected(RejectReason::NotANumber);
        }
        let snapped = self.snap(value);
        let Some(target) = self.handles.get_mut(handle) else {
            return DragOutcome::Rejected(RejectReason::NoSuchHandle);
        };
        if target.value == snapped {
            return DragOutcome::Unchanged(snapped);
        }
        target.value = snapped;

        let change = HandleChange {
            handle,
            value: snapped,
        };
        for listener in &mut self.listeners {
            listener(change);
        }
        DragOutcome::Moved(snapped)
    }

    /// Release all listeners and reject further input. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.enabled = false;
        self.destroyed = true;
    }
}

impl fmt::Debug for RangeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeControl")
            .field("bounds", &self.bounds)
            .field("step", &self.step)
            .field("handles", &self.handles)
            .field("enabled", &self.enabled)
            .field("appearance", &self.appearance)
            .field("listeners", &self.listeners.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn control(values: &[f64]) -> RangeControl {
        RangeControl::new(ControlOptions::new(values.to_vec())).unwrap()
    }

    #[test]
    fn handle_count_must_be_one_or_two() {
        assert_eq!(
            RangeControl::new(ControlOptions::new(vec![])).unwrap_err(),
            ControlError::HandleCount(0)
        );
        assert_eq!(
            RangeControl::new(ControlOptions::new(vec![1.0, 2.0, 3.0])).unwrap_err(),
            ControlError::HandleCount(3)
        );
        assert_eq!(control(&[10.0]).handles().len(), 1);
        assert_eq!(control(&[10.0, 90.0]).handles().len(), 2);
    }

    #[test]
    fn invalid_bounds_and_step_fail() {
        let mut opts = ControlOptions::new(vec![0.0]);
        opts.bounds = Bounds { min: 10.0, max: 10.0 };
        assert!(matches!(
            RangeControl::new(opts),
            Err(ControlError::InvalidBounds { .. })
        ));

        let mut opts = ControlOptions::new(vec![0.0]);
        opts.step = 0.0;
        assert_eq!(RangeControl::new(opts).unwrap_err(), ControlError::InvalidStep(0.0));
    }

    #[test]
    fn initial_values_are_clamped_not_snapped() {
        let c = control(&[-20.0, 50.5]);
        assert_eq!(c.values(), vec![0.0, 50.5]);
    }

    #[test]
    fn drag_clamps_and_snaps() {
        let mut c = control(&[50.0]);
        assert_eq!(c.drag(0, 72.6), DragOutcome::Moved(73.0));
        assert_eq!(c.drag(0, 250.0), DragOutcome::Moved(100.0));
        assert_eq!(c.drag(0, -3.0), DragOutcome::Moved(0.0));
        assert_eq!(c.drag(0, 0.2), DragOutcome::Unchanged(0.0));
    }

    #[test]
    fn listeners_see_every_move() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut c = control(&[50.0]);
        let sink = Rc::clone(&seen);
        c.add_listener(Box::new(move |change| sink.borrow_mut().push(change.value)));

        c.drag(0, 60.0);
        c.drag(0, 60.0);
        c.drag(0, 10.0);
        assert_eq!(*seen.borrow(), vec![60.0, 10.0]);
    }

    #[test]
    fn disabled_control_rejects_drags() {
        let mut c = control(&[40.0, 75.0]);
        c.set_enabled(false);
        assert_eq!(c.appearance(), Appearance::Disabled);
        assert_eq!(c.drag(0, 10.0), DragOutcome::Rejected(RejectReason::Disabled));
        assert_eq!(c.drag(1, 10.0), DragOutcome::Rejected(RejectReason::Disabled));
        assert_eq!(c.values(), vec![40.0, 75.0]);
    }

    #[test]
    fn appearance_is_independent_of_enabled_state() {
        let mut c = control(&[40.0, 75.0]);
        c.set_enabled(false);
        c.clear_disabled_appearance();
        assert_eq!(c.appearance(), Appearance::Normal);
        assert!(!c.is_enabled());
        assert!(c.drag(0, 10.0).is_rejected());
    }

    #[test]
    fn handle_style_by_index() {
        let mut c = control(&[40.0, 75.0]);
        c.set_handle_style(1, HandleStyle::Highlight).unwrap();
        assert_eq!(c.handles()[0].style, HandleStyle::Standard);
        assert_eq!(c.handles()[1].style, HandleStyle::Highlight);
        assert_eq!(
            c.set_handle_style(2, HandleStyle::Highlight),
            Err(ControlError::NoSuchHandle { index: 2, count: 2 })
        );
    }

    #[test]
    fn nan_drag_leaves_the_handle_alone() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut c = control(&[50.0]);
        let sink = Rc::clone(&seen);
        c.add_listener(Box::new(move |change| sink.borrow_mut().push(change.value)));

        assert_eq!(c.drag(0, f64::NAN), DragOutcome::Rejected(RejectReason::NotANumber));
        assert_eq!(c.values(), vec![50.0]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unknown_handle_is_rejected() {
        let mut c = control(&[50.0]);
        assert_eq!(c.drag(1, 10.0), DragOutcome::Rejected(RejectReason::NoSuchHandle));
    }

    #[test]
    fn destroy_is_idempotent_and_drops_listeners() {
        let mut c = control(&[50.0]);
        c.add_listener(Box::new(|_| {}));
        c.destroy();
        c.destroy();
        assert_eq!(c.listener_count(), 0);
        c.add_listener(Box::new(|_| {}));
        assert_eq!(c.listener_count(), 0);
        assert_eq!(c.drag(0, 10.0), DragOutcome::Rejected(RejectReason::Destroyed));
    }
}
