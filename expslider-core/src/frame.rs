//! Slider frame — the `FrameLifecycle` implementation for `exp-slider`.
//!
//! Mount resolves the mode, builds the widget, and seeds the response record
//! with the initial value. In collect mode the widget's change listener keeps
//! the record in step with the handle; in feedback mode no listener is attached
//! and the record never moves.

use std::any::Any;

use tracing::{info, warn};

use crate::config::{Mode, SliderConfiguration};
use crate::control::{Bounds, DragOutcome, Handle};
use crate::lifecycle::{FrameError, FrameLifecycle, LifecycleState, Properties};
use crate::mode;
use crate::response::{ResponseRecord, SliderData};
use crate::schema::{DataSchema, FrameSchema, SLIDER_DATA_SCHEMA, SLIDER_FRAME_SCHEMA};
use crate::widget::SliderWidget;

#[derive(Debug)]
pub struct SliderFrame {
    config: Option<SliderConfiguration>,
    widget: SliderWidget,
    response: ResponseRecord,
    state: LifecycleState,
}

impl Default for SliderFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderFrame {
    pub const KIND: &'static str = "exp-slider";

    pub fn new() -> Self {
        Self {
            config: None,
            widget: SliderWidget::new(),
            response: ResponseRecord::new(),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Constructor used by the frame registry.
    pub fn boxed() -> Box<dyn FrameLifecycle> {
        Box::new(Self::new())
    }

    /// Mount from a typed configuration.
    ///
    /// Fails without touching the widget when the configuration is out of range
    /// or the frame has already been mounted.
    pub fn mount_with(&mut self, config: SliderConfiguration) -> Result<(), FrameError> {
        if self.state != LifecycleState::Uninitialized {
            return Err(FrameError::AlreadyMounted(self.state));
        }
        if let Err(err) = config.validate() {
            warn!(error = %err, "slider frame configuration rejected at mount");
            return Err(err.into());
        }

        let plan = mode::resolve(&config);
        self.widget.mount(&plan, Bounds::PERCENT)?;

        self.response.set(config.initial_value);
        if plan.interactive {
            self.widget.on_change(self.response.listener());
        }

        info!(
            mode = plan.mode.label(),
            handles = plan.values.len(),
            initial = config.initial_value,
            "slider frame mounted"
        );
        self.config = Some(config);
        self.state = LifecycleState::Mounted;
        Ok(())
    }

    /// Apply a user drag. Only moves anything in collect mode while mounted.
    pub fn drag(&mut self, handle: usize, value: f64) -> DragOutcome {
        self.widget.drag(handle, value)
    }

    pub fn config(&self) -> Option<&SliderConfiguration> {
        self.config.as_ref()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.config.as_ref().map(SliderConfiguration::mode)
    }

    pub fn response(&self) -> Option<f64> {
        self.response.value()
    }

    pub fn slider_data(&self) -> SliderData {
        SliderData::from_record(&self.response)
    }

    pub fn handles(&self) -> &[Handle] {
        self.widget.handles()
    }

    pub fn is_interactive(&self) -> bool {
        self.widget.is_interactive()
    }

    pub fn widget(&self) -> &SliderWidget {
        &self.widget
    }

    pub fn title(&self) -> &str {
        self.config.as_ref().map_or("", |c| c.title.as_str())
    }

    pub fn label_left(&self) -> &str {
        self.config.as_ref().map_or("", |c| c.label_left.as_str())
    }

    pub fn label_right(&self) -> &str {
        self.config.as_ref().map_or("", |c| c.label_right.as_str())
    }
}

impl FrameLifecycle for SliderFrame {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn schema(&self) -> &'static FrameSchema {
        &SLIDER_FRAME_SCHEMA
    }

    fn data_schema(&self) -> &'static DataSchema {
        &SLIDER_DATA_SCHEMA
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn mount(&mut self, properties: &Properties) -> Result<(), FrameError> {
        if self.state != LifecycleState::Uninitialized {
            return Err(FrameError::AlreadyMounted(self.state));
        }
        let config = SliderConfiguration::from_properties(properties)?;
        self.mount_with(config)
    }

    fn unmount(&mut self) {
        if self.state == LifecycleState::Mounted {
            info!(response = ?self.response.value(), "slider frame unmounted");
        }
        self.widget.unmount();
        self.state = LifecycleState::Unmounted;
    }

    fn data(&self) -> Properties {
        self.slider_data().to_properties()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
