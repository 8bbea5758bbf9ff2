//! Session host integration: sequencing, carried values, providers, persistence.

use serde_json::json;

use expslider_core::provider::carry_forward;
use expslider_core::session::{store, FrameRegistry};
use expslider_core::{
    Experiment, LifecycleState, Mode, Session, SessionError, SliderConfiguration,
};

const EXPERIMENT: &str = r#"{
    "frames": {
        "slider-frame": {
            "kind": "exp-slider",
            "title": "Slider title",
            "labelLeft": "Left",
            "labelRight": "Right",
            "initialValue": 50,
            "feedback": false
        },
        "slider-feedback": {
            "kind": "exp-slider",
            "title": "Slider title",
            "labelLeft": "Left",
            "labelRight": "Right",
            "feedback": true,
            "feedbackValue": 75,
            "initialValueFrom": "slider-frame"
        }
    },
    "sequence": ["slider-frame", "slider-feedback"]
}"#;

fn experiment() -> Experiment {
    Experiment::from_json(EXPERIMENT).unwrap()
}

#[test]
fn collect_then_feedback_carries_the_response() {
    let mut session = Session::new(experiment()).unwrap();

    let active = session.advance().unwrap().unwrap();
    assert_eq!(active.id, "slider-frame");
    let slider = active.slider_mut().unwrap();
    assert_eq!(slider.mode(), Some(Mode::Collect));
    slider.drag(0, 73.0);
    let data = session.complete_active().unwrap();
    assert_eq!(data["sliderResponse"], json!(73.0));

    let active = session.advance().unwrap().unwrap();
    assert_eq!(active.id, "slider-feedback");
    let slider = active.slider_mut().unwrap();
    assert_eq!(slider.mode(), Some(Mode::Feedback));
    let values: Vec<f64> = slider.handles().iter().map(|h| h.value).collect();
    assert_eq!(values, vec![73.0, 75.0]);
    assert!(slider.drag(0, 10.0).is_rejected());
    session.complete_active().unwrap();

    assert!(session.advance().unwrap().is_none());
    assert!(session.is_finished());
    assert_eq!(session.exp_data().slider_response("slider-frame"), Some(73.0));
    assert_eq!(session.exp_data().slider_response("slider-feedback"), Some(73.0));
}

#[test]
fn completed_frames_are_unmounted() {
    let mut session = Session::new(experiment()).unwrap();
    session.advance().unwrap();
    assert_eq!(
        session.active().unwrap().frame.state(),
        LifecycleState::Mounted
    );
    session.complete_active().unwrap();
    assert!(session.active().is_none());
    assert!(matches!(
        session.complete_active(),
        Err(SessionError::NoActiveFrame)
    ));
}

#[test]
fn advancing_over_an_active_frame_fails() {
    let mut session = Session::new(experiment()).unwrap();
    session.advance().unwrap();
    assert!(matches!(
        session.advance(),
        Err(SessionError::FrameStillActive(id)) if id == "slider-frame"
    ));
}

#[test]
fn invalid_frame_is_never_mounted() {
    let mut exp = experiment();
    exp.frames
        .get_mut("slider-frame")
        .unwrap()
        .properties
        .remove("initialValue");

    let mut session = Session::new(exp).unwrap();
    let err = session.advance().err().unwrap();
    match err {
        SessionError::InvalidConfig { frame, source } => {
            assert_eq!(frame, "slider-frame");
            assert!(source.is_missing("initialValue"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(session.active().is_none());
    assert_eq!(session.progress(), (0, 2));
}

#[test]
fn unknown_kind_is_rejected_up_front() {
    let mut exp = experiment();
    exp.frames.get_mut("slider-frame").unwrap().kind = "exp-video".into();
    assert!(matches!(
        Session::new(exp),
        Err(SessionError::UnknownKind { kind, .. }) if kind == "exp-video"
    ));

    let empty = FrameRegistry::empty();
    assert!(matches!(
        Session::with_registry(experiment(), empty),
        Err(SessionError::UnknownKind { .. })
    ));
}

#[test]
fn provider_overrides_static_definition() {
    let mut session = Session::new(experiment()).unwrap();
    let base = SliderConfiguration::feedback("Your answer", "Left", "Right", 0.0, 20.0);
    session.set_provider("slider-feedback", carry_forward("slider-frame", base));

    session.advance().unwrap().unwrap().slider_mut().unwrap().drag(0, 64.0);
    session.complete_active().unwrap();

    let active = session.advance().unwrap().unwrap();
    let slider = active.slider().unwrap();
    assert_eq!(slider.title(), "Your answer");
    let values: Vec<f64> = slider.handles().iter().map(|h| h.value).collect();
    assert_eq!(values, vec![64.0, 20.0]);
}

#[test]
fn record_round_trips_through_the_store() {
    let mut session = Session::new(experiment()).unwrap();
    while let Some(active) = session.advance().unwrap() {
        if let Some(slider) = active.slider_mut() {
            slider.drag(0, 12.0);
        }
        session.complete_active().unwrap();
    }

    let record = session.record();
    assert!(record.finished_at.is_some());
    assert_eq!(record.sequence, vec!["slider-frame", "slider-feedback"]);

    let dir = tempfile::tempdir().unwrap();
    let path = store::save(dir.path(), &record).unwrap();
    let loaded = store::load(&path).unwrap();
    assert_eq!(loaded, record);
    assert_eq!(loaded.exp_data.slider_response("slider-feedback"), Some(12.0));
}
