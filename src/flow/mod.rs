use crate::product::{Action, ConnectorType, Duty, Technology};
use crate::selection::{
    CircuitChoice, Dimension, Environment, FeatureChoice, Flow, Guard, MedicalPath, SelectionState,
};
use tracing::debug;

pub mod options;

pub use options::{
    Availability, CATEGORIES, Category, ChoiceOption, MEDICAL_APPLICATION, available_options,
    options_for,
};

/// A question (or the results screen) in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Application,
    MedicalFork,
    Technology,
    Action,
    Environment,
    Duty,
    Connection,
    CircuitCount,
    Guard,
    Features,
    Results,
}

const STANDARD_STEPS: [Step; 10] = [
    Step::Application,
    Step::Technology,
    Step::Action,
    Step::Environment,
    Step::Duty,
    Step::Connection,
    Step::CircuitCount,
    Step::Guard,
    Step::Features,
    Step::Results,
];

const MEDICAL_STEPS: [Step; 5] = [
    Step::Application,
    Step::MedicalFork,
    Step::Action,
    Step::Environment,
    Step::Results,
];

impl Step {
    /// Raw cursor index of the step. Medical and standard flows share indices
    /// 0, 2, 3 and 9; index 1 is the technology question in the standard flow
    /// and the fork in the medical flow.
    pub fn index(&self) -> usize {
        match self {
            Step::Application => 0,
            Step::Technology | Step::MedicalFork => 1,
            Step::Action => 2,
            Step::Environment => 3,
            Step::Duty => 4,
            Step::Connection => 5,
            Step::CircuitCount => 6,
            Step::Guard => 7,
            Step::Features => 8,
            Step::Results => 9,
        }
    }

    pub fn from_index(flow: Flow, index: usize) -> Option<Step> {
        let steps: &[Step] = match flow {
            Flow::Standard => &STANDARD_STEPS,
            Flow::Medical => &MEDICAL_STEPS,
        };
        steps.iter().copied().find(|s| s.index() == index)
    }

    /// The answer dimension this step writes, if any.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Step::Application => Some(Dimension::Application),
            Step::MedicalFork => Some(Dimension::MedicalPath),
            Step::Technology => Some(Dimension::Technology),
            Step::Action => Some(Dimension::Action),
            Step::Environment => Some(Dimension::Environment),
            Step::Duty => Some(Dimension::Duty),
            Step::Connection => Some(Dimension::Connection),
            Step::CircuitCount => Some(Dimension::CircuitCount),
            Step::Guard => Some(Dimension::Guard),
            Step::Features => Some(Dimension::Features),
            Step::Results => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Application => "application",
            Step::MedicalFork => "medical_fork",
            Step::Technology => "technology",
            Step::Action => "action",
            Step::Environment => "environment",
            Step::Duty => "duty",
            Step::Connection => "connection",
            Step::CircuitCount => "circuit_count",
            Step::Guard => "guard",
            Step::Features => "features",
            Step::Results => "results",
        }
    }
}

/// Fresh state for a step 0 category pick.
///
/// The medical category switches to the medical flow with the medical
/// application set and the cursor on the fork. Any other category stays on
/// step 0 for the sub-application phase.
pub fn enter_category(category_id: &str) -> SelectionState {
    let next = if category_id == MEDICAL_APPLICATION {
        SelectionState::for_flow(Flow::Medical)
            .with_category(Some(category_id.to_string()))
            .with_application(Some(MEDICAL_APPLICATION.to_string()))
            .at_step(Step::MedicalFork.index())
    } else {
        SelectionState::new().with_category(Some(category_id.to_string()))
    };
    debug!(category = category_id, flow = next.flow.as_str(), "category chosen");
    next
}

/// Writes the answer `option_id` for `step` through the matching reducer.
///
/// The cursor is not moved, except that category ids (step 0, phase 1) go
/// through [`enter_category`]. Application ids answer phase 2; the features
/// step toggles the given feature. Returns `None` when the id is not an
/// answer to `step`.
pub fn apply_answer(state: SelectionState, step: Step, option_id: &str) -> Option<SelectionState> {
    let next = match step {
        Step::Application => {
            if options::category(option_id).is_some() {
                enter_category(option_id)
            } else {
                state.with_application(Some(option_id.to_string()))
            }
        }
        Step::MedicalFork => state.with_medical_path(Some(MedicalPath::parse(option_id)?)),
        Step::Technology => state.with_technology(Some(Technology::parse(option_id)?)),
        Step::Action => state.with_action(Some(Action::parse(option_id)?)),
        Step::Environment => {
            let environment = Environment::parse(option_id)?;
            if state.flow == Flow::Medical {
                state.with_medical_environment(environment)
            } else {
                state.with_environment(Some(environment))
            }
        }
        Step::Duty => state.with_duty(Some(Duty::parse(option_id)?)),
        Step::Connection => state.with_connection(Some(ConnectorType::parse(option_id)?)),
        Step::CircuitCount => state.with_circuit_count(Some(CircuitChoice::parse(option_id)?)),
        Step::Guard => state.with_guard(Some(Guard::parse(option_id)?)),
        Step::Features => state.with_feature_toggled(FeatureChoice::parse(option_id)?),
        Step::Results => return None,
    };
    Some(next)
}

/// Derives every navigation answer from one ordered list of visible steps.
///
/// `next`, `previous`, the display index and the total are all positions in
/// [`StepFlowController::visible_steps`]; no other call site knows about
/// skipped steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepFlowController;

impl StepFlowController {
    pub fn new() -> Self {
        Self
    }

    /// Steps the user can see for the state's flow, technology and fork.
    pub fn visible_steps(&self, state: &SelectionState) -> Vec<Step> {
        match state.flow {
            Flow::Standard => {
                let skip_wiring = state.technology.is_some_and(|t| t.skips_wiring());
                STANDARD_STEPS
                    .iter()
                    .copied()
                    .filter(|step| {
                        !(skip_wiring && matches!(step, Step::Connection | Step::CircuitCount))
                    })
                    .collect()
            }
            Flow::Medical => {
                if state.medical_path == Some(MedicalPath::Custom) {
                    MEDICAL_STEPS[..2].to_vec()
                } else {
                    MEDICAL_STEPS.to_vec()
                }
            }
        }
    }

    pub fn current_step(&self, state: &SelectionState) -> Step {
        Step::from_index(state.flow, state.step).unwrap_or(Step::Application)
    }

    /// The next visible step after the cursor, `None` at a terminal screen.
    pub fn next_step(&self, state: &SelectionState) -> Option<Step> {
        let current = self.current_step(state).index();
        self.visible_steps(state)
            .into_iter()
            .find(|step| step.index() > current)
    }

    /// The visible step before the cursor, `None` at the first one.
    pub fn previous_step(&self, state: &SelectionState) -> Option<Step> {
        let current = self.current_step(state).index();
        self.visible_steps(state)
            .into_iter()
            .rev()
            .find(|step| step.index() < current)
    }

    /// 1-based position of the cursor among the visible steps.
    pub fn display_index(&self, state: &SelectionState) -> usize {
        let current = self.current_step(state).index();
        self.visible_steps(state)
            .iter()
            .filter(|step| step.index() < current)
            .count()
            + 1
    }

    pub fn total_steps(&self, state: &SelectionState) -> usize {
        self.visible_steps(state).len()
    }

    /// Step 0 shows sub-applications once a non-medical category is chosen.
    pub fn in_sub_application_phase(&self, state: &SelectionState) -> bool {
        state.flow == Flow::Standard && state.step == 0 && state.category.is_some()
    }

    /// The custom medical fork ends the questionnaire with a contact screen.
    pub fn is_contact_screen(&self, state: &SelectionState) -> bool {
        state.flow == Flow::Medical
            && self.current_step(state) == Step::MedicalFork
            && state.medical_path == Some(MedicalPath::Custom)
    }

    /// Moves the cursor forward. Terminal screens leave the state unchanged.
    pub fn advance(&self, state: SelectionState) -> SelectionState {
        match self.next_step(&state) {
            Some(step) => {
                debug!(from = state.step, to = step.index(), "advance step");
                state.at_step(step.index())
            }
            None => state,
        }
    }

    /// Moves the cursor backward, applying the flow-specific exits.
    pub fn back(&self, state: SelectionState) -> SelectionState {
        let current = self.current_step(&state);

        if self.in_sub_application_phase(&state) {
            return state.with_category(None).at_step(0);
        }

        if current == Step::Results && state.application.as_deref() == Some(MEDICAL_APPLICATION) {
            let mut state = state;
            state.flow = Flow::Medical;
            debug!("back from results into medical environment step");
            return state.at_step(Step::Environment.index());
        }

        if state.flow == Flow::Medical && current == Step::MedicalFork {
            debug!("leaving medical flow");
            return SelectionState::for_flow(Flow::Standard);
        }

        match self.previous_step(&state) {
            Some(step) => {
                debug!(from = state.step, to = step.index(), "back step");
                state.at_step(step.index())
            }
            None => state,
        }
    }
}
