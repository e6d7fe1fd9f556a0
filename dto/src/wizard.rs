use thiserror::Error;

/// Number of steps of the bursary application form.
pub const BURSARY_FORM_TOTAL_STEPS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("A wizard needs at least one step.")]
    NoStep,
    #[error("Step {step} is out of range [1, {total_steps}].")]
    StepOutOfRange { step: u32, total_steps: u32 },
}

/// How a step indicator should look, relatively to the current step.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IndicatorStatus {
    Completed,
    Active,
    Pending,
}

impl IndicatorStatus {
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            IndicatorStatus::Completed => Some("completed"),
            IndicatorStatus::Active => Some("active"),
            IndicatorStatus::Pending => None,
        }
    }
}

/// Cursor over the steps of a form. Steps are numbered from 1 to `total_steps`, both included.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WizardState {
    current_step: u32,
    total_steps: u32,
}

impl WizardState {
    pub fn new(total_steps: u32) -> Result<Self, WizardError> {
        if total_steps == 0 {
            return Err(WizardError::NoStep);
        }

        Ok(Self {
            current_step: 1,
            total_steps,
        })
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn go_to(&mut self, step: u32) -> Result<(), WizardError> {
        if !(1..=self.total_steps).contains(&step) {
            return Err(WizardError::StepOutOfRange {
                step,
                total_steps: self.total_steps,
            });
        }

        self.current_step = step;
        Ok(())
    }

    /// Move to the next step, if any. Return whether the current step has changed.
    pub fn next(&mut self) -> bool {
        self.current_step < self.total_steps && self.go_to(self.current_step + 1).is_ok()
    }

    /// Move to the previous step, if any. Return whether the current step has changed.
    pub fn previous(&mut self) -> bool {
        self.current_step > 1 && self.go_to(self.current_step - 1).is_ok()
    }

    /// `index` starts at 1, as steps do.
    pub fn indicator_status(&self, index: u32) -> IndicatorStatus {
        if index == self.current_step {
            IndicatorStatus::Active
        } else if index < self.current_step {
            IndicatorStatus::Completed
        } else {
            IndicatorStatus::Pending
        }
    }

    pub fn is_previous_button_visible(&self) -> bool {
        self.current_step > 1
    }

    pub fn is_next_button_visible(&self) -> bool {
        self.current_step < self.total_steps
    }

    pub fn is_submit_button_visible(&self) -> bool {
        self.current_step == self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    fn wizard_at(step: u32) -> WizardState {
        let mut wizard = WizardState::new(BURSARY_FORM_TOTAL_STEPS).unwrap();
        wizard.go_to(step).unwrap();
        wizard
    }

    #[test]
    fn should_start_at_first_step() {
        let wizard = WizardState::new(BURSARY_FORM_TOTAL_STEPS).unwrap();

        assert_eq!(1, wizard.current_step());
        assert_eq!(BURSARY_FORM_TOTAL_STEPS, wizard.total_steps());
    }

    #[test]
    fn should_fail_to_create_wizard_without_step() {
        assert_eq!(WizardError::NoStep, WizardState::new(0).unwrap_err());
    }

    #[parameterized(step = {0, 6, u32::MAX})]
    fn should_refuse_out_of_range_step(step: u32) {
        let mut wizard = wizard_at(3);

        let error = wizard.go_to(step).unwrap_err();

        assert_eq!(
            WizardError::StepOutOfRange {
                step,
                total_steps: BURSARY_FORM_TOTAL_STEPS
            },
            error
        );
        assert_eq!(3, wizard.current_step());
    }

    #[test]
    fn should_move_forward_until_last_step() {
        let mut wizard = wizard_at(1);

        for expected_step in 2..=BURSARY_FORM_TOTAL_STEPS {
            assert!(wizard.next());
            assert_eq!(expected_step, wizard.current_step());
        }

        assert!(!wizard.next());
        assert_eq!(BURSARY_FORM_TOTAL_STEPS, wizard.current_step());
    }

    #[test]
    fn should_move_backward_until_first_step() {
        let mut wizard = wizard_at(BURSARY_FORM_TOTAL_STEPS);

        for expected_step in (1..BURSARY_FORM_TOTAL_STEPS).rev() {
            assert!(wizard.previous());
            assert_eq!(expected_step, wizard.current_step());
        }

        assert!(!wizard.previous());
        assert_eq!(1, wizard.current_step());
    }

    #[test]
    fn should_stay_in_range_whatever_the_moves() {
        let mut wizard = wizard_at(1);
        let moves = [true, true, false, true, true, true, true, true, false, false, false, false, false, false];

        for forward in moves {
            if forward {
                wizard.next();
            } else {
                wizard.previous();
            }
            assert!((1..=BURSARY_FORM_TOTAL_STEPS).contains(&wizard.current_step()));
        }
    }

    #[test]
    fn should_compute_indicator_statuses() {
        for step in 1..=BURSARY_FORM_TOTAL_STEPS {
            let wizard = wizard_at(step);
            for index in 1..=BURSARY_FORM_TOTAL_STEPS {
                let expected = match index {
                    index if index < step => IndicatorStatus::Completed,
                    index if index == step => IndicatorStatus::Active,
                    _ => IndicatorStatus::Pending,
                };
                assert_eq!(expected, wizard.indicator_status(index));
            }
        }
    }

    #[parameterized(
        step = {1, 2, 4, 5},
        expected_visibilities = {(false, true, false), (true, true, false), (true, true, false), (true, false, true)}
    )]
    fn should_compute_button_visibilities(step: u32, expected_visibilities: (bool, bool, bool)) {
        let wizard = wizard_at(step);

        assert_eq!(
            expected_visibilities,
            (
                wizard.is_previous_button_visible(),
                wizard.is_next_button_visible(),
                wizard.is_submit_button_visible()
            )
        );
    }

    #[test]
    fn should_handle_single_step_wizard() {
        let mut wizard = WizardState::new(1).unwrap();

        assert!(!wizard.next());
        assert!(!wizard.previous());
        assert!(!wizard.is_previous_button_visible());
        assert!(!wizard.is_next_button_visible());
        assert!(wizard.is_submit_button_visible());
    }

    #[test]
    fn should_give_indicator_class_names() {
        assert_eq!(Some("completed"), IndicatorStatus::Completed.class_name());
        assert_eq!(Some("active"), IndicatorStatus::Active.class_name());
        assert_eq!(None, IndicatorStatus::Pending.class_name());
    }
}
