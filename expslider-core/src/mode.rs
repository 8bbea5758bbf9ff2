//! Mode controller — decides, once per frame instance, how many handles the
//! slider gets, where they start, and whether they accept input.

use crate::config::{Mode, SliderConfiguration};

/// Index of the reference handle in feedback mode.
pub const FEEDBACK_HANDLE: usize = 1;

/// Initial handle layout for one frame instance.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlePlan {
    pub mode: Mode,
    /// One value per handle, left to right in handle-index order.
    pub values: Vec<f64>,
    pub interactive: bool,
}

/// Resolve the handle plan for a configuration.
///
/// - Collect: `[initialValue]`, interactive
/// - Feedback: `[initialValue, feedbackValue]`, not interactive
pub fn resolve(config: &SliderConfiguration) -> HandlePlan {
    let mode = config.mode();
    let values = match mode {
        Mode::Collect => vec![config.initial_value],
        Mode::Feedback => vec![config.initial_value, config.feedback_value],
    };
    HandlePlan {
        mode,
        values,
        interactive: mode.is_interactive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_has_one_interactive_handle() {
        let plan = resolve(&SliderConfiguration::collect("T", "L", "R", 50.0));
        assert_eq!(plan.mode, Mode::Collect);
        assert_eq!(plan.values, vec![50.0]);
        assert!(plan.interactive);
    }

    #[test]
    fn feedback_has_two_fixed_handles() {
        let plan = resolve(&SliderConfiguration::feedback("T", "L", "R", 40.0, 75.0));
        assert_eq!(plan.mode, Mode::Feedback);
        assert_eq!(plan.values, vec![40.0, 75.0]);
        assert_eq!(plan.values[FEEDBACK_HANDLE], 75.0);
        assert!(!plan.interactive);
    }

    #[test]
    fn feedback_value_ignored_in_collect_mode() {
        let mut config = SliderConfiguration::collect("T", "L", "R", 20.0);
        config.feedback_value = 90.0;
        assert_eq!(resolve(&config).values, vec![20.0]);
    }
}
