//! Built-in two-frame experiment: collect a response, then show it back next
//! to a reference value.

use std::collections::BTreeMap;

use expslider_core::session::FrameDefinition;
use expslider_core::{Experiment, SliderConfiguration, SliderFrame};

pub const NAME: &str = "demo";

pub fn experiment() -> Experiment {
    let collect = SliderConfiguration::collect(
        "How confident are you?",
        "Not at all",
        "Completely",
        50.0,
    );
    let mut feedback_props = SliderConfiguration::feedback(
        "Your answer compared with the average",
        "Not at all",
        "Completely",
        0.0,
        75.0,
    )
    .to_properties();
    feedback_props.remove("initialValue");

    let frames = BTreeMap::from([
        (
            "slider-frame".to_string(),
            FrameDefinition::new(SliderFrame::KIND, collect.to_properties()),
        ),
        (
            "slider-feedback".to_string(),
            FrameDefinition::new(SliderFrame::KIND, feedback_props).carrying_from("slider-frame"),
        ),
    ]);

    Experiment {
        frames,
        sequence: vec!["slider-frame".into(), "slider-feedback".into()],
    }
}
