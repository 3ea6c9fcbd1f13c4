//! A wizard session: one catalog, one evolving [`SelectionState`].
//!
//! Every answer goes through the state reducers and then the
//! [`StepFlowController`], so the cursor, the visible step count and the
//! candidate counts never disagree with each other.

use crate::catalog::LoadedCatalog;
use crate::error::{ShareCodecError, WizardError};
use crate::filter::{FilterEngine, SearchOutcome};
use crate::flow::{self, ChoiceOption, Step, StepFlowController};
use crate::product::{Action, ConnectorType, Duty, Product, Technology};
use crate::projector::ResultProjector;
use crate::selection::{
    CircuitChoice, Environment, FeatureChoice, Flow, Guard, MedicalPath, SelectionState,
};
use crate::share;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Wizard {
    products: Vec<Product>,
    state: SelectionState,
    controller: StepFlowController,
    warning: Option<String>,
}

impl Wizard {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            state: SelectionState::new(),
            controller: StepFlowController::new(),
            warning: None,
        }
    }

    /// Starts a session over a loaded catalog, keeping its fallback warning.
    pub fn from_catalog(catalog: LoadedCatalog) -> Self {
        let warning = catalog.warning();
        Self {
            warning,
            ..Self::new(catalog.products)
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Soft warning to show when the session runs on the fallback catalog.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn engine(&self) -> FilterEngine<'_> {
        FilterEngine::new(&self.products)
    }

    pub fn current_step(&self) -> Step {
        self.controller.current_step(&self.state)
    }

    /// 1-based position among the steps the user can see.
    pub fn current_display_step(&self) -> usize {
        self.controller.display_index(&self.state)
    }

    pub fn total_visible_steps(&self) -> usize {
        self.controller.total_steps(&self.state)
    }

    pub fn is_contact_screen(&self) -> bool {
        self.controller.is_contact_screen(&self.state)
    }

    pub fn in_sub_application_phase(&self) -> bool {
        self.controller.in_sub_application_phase(&self.state)
    }

    /// Selectable options for the current screen.
    pub fn options(&self) -> Vec<&'static ChoiceOption> {
        flow::available_options(self.current_step(), &self.state)
    }

    /// Products left if `option_id` were chosen at `step`.
    pub fn candidate_count(&self, step: Step, option_id: &str) -> Option<usize> {
        self.engine().candidate_count(&self.state, step, option_id)
    }

    /// `(option id, candidate count)` for every option on the current screen.
    pub fn candidate_counts(&self) -> Vec<(&'static str, usize)> {
        self.engine().candidate_counts(&self.state, self.current_step())
    }

    /// Answers the current screen with one of its option ids.
    ///
    /// Mirrors the typed `choose_*` methods: the features step toggles and
    /// waits for [`Wizard::proceed`], every other step advances.
    pub fn answer(&mut self, option_id: &str) -> Result<(), WizardError> {
        let step = self.current_step();
        if step == Step::Results {
            return Err(WizardError::NoQuestion(step.as_str()));
        }
        let option = flow::options_for(step, &self.state)
            .iter()
            .find(|option| option.id == option_id)
            .ok_or_else(|| WizardError::UnknownOption {
                step: step.as_str(),
                option: option_id.to_string(),
            })?;
        if !option.is_available(&self.state) {
            return Err(WizardError::UnavailableOption {
                option: option_id.to_string(),
            });
        }

        if step == Step::Application && flow::options::category(option_id).is_some() {
            self.choose_category(option_id);
            return Ok(());
        }

        let next = flow::apply_answer(self.state.clone(), step, option_id).ok_or_else(|| {
            WizardError::UnknownOption {
                step: step.as_str(),
                option: option_id.to_string(),
            }
        })?;
        if step == Step::Features {
            self.state = next;
        } else {
            self.commit(next);
        }
        Ok(())
    }

    /// Step 0, phase 1. The medical category switches to the medical flow.
    pub fn choose_category(&mut self, category_id: &str) {
        self.state = flow::enter_category(category_id);
    }

    /// Step 0, phase 2.
    pub fn choose_application(&mut self, application: &str) {
        let next = self
            .at(Step::Application)
            .with_application(Some(application.to_string()));
        self.commit(next);
    }

    /// `Custom` ends on the contact screen; `Stock` continues to action.
    pub fn choose_medical_path(&mut self, path: MedicalPath) {
        let next = self.at(Step::MedicalFork).with_medical_path(Some(path));
        self.commit(next);
    }

    pub fn choose_technology(&mut self, technology: Technology) {
        let next = self.at(Step::Technology).with_technology(Some(technology));
        self.commit(next);
    }

    pub fn choose_action(&mut self, action: Action) {
        let next = self.at(Step::Action).with_action(Some(action));
        self.commit(next);
    }

    /// In the medical flow this also fixes the technology to electrical and
    /// lands on the results screen.
    pub fn choose_environment(&mut self, environment: Environment) {
        let base = self.at(Step::Environment);
        let next = if base.flow == Flow::Medical {
            base.with_medical_environment(environment)
        } else {
            base.with_environment(Some(environment))
        };
        self.commit(next);
    }

    pub fn choose_duty(&mut self, duty: Duty) {
        let next = self.at(Step::Duty).with_duty(Some(duty));
        self.commit(next);
    }

    pub fn choose_connection(&mut self, connection: ConnectorType) {
        let next = self.at(Step::Connection).with_connection(Some(connection));
        self.commit(next);
    }

    pub fn choose_circuit_count(&mut self, circuits: CircuitChoice) {
        let next = self.at(Step::CircuitCount).with_circuit_count(Some(circuits));
        self.commit(next);
    }

    pub fn choose_guard(&mut self, guard: Guard) {
        let next = self.at(Step::Guard).with_guard(Some(guard));
        self.commit(next);
    }

    /// Multi-select; the cursor stays on the features step.
    pub fn toggle_feature(&mut self, feature: FeatureChoice) {
        self.state = self.at(Step::Features).with_feature_toggled(feature);
    }

    /// Material is refined on the results screen and does not move the cursor.
    pub fn choose_material(&mut self, material: Option<String>) {
        self.state = self.state.clone().with_material(material);
    }

    /// Leaves a multi-select step.
    pub fn proceed(&mut self) {
        self.state = self.controller.advance(self.state.clone());
    }

    pub fn back(&mut self) {
        self.state = self.controller.back(self.state.clone());
    }

    pub fn restart(&mut self) {
        debug!("wizard restarted");
        self.state = SelectionState::new();
    }

    pub fn restore(&mut self, state: SelectionState) {
        self.state = state;
    }

    /// Restores a session from a share string.
    pub fn restore_from_share(&mut self, query: &str) -> Result<(), ShareCodecError> {
        self.state = share::decode(query)?;
        Ok(())
    }

    pub fn share_link(&self) -> String {
        share::encode(&self.state)
    }

    /// Exact, relaxed or exhausted results for the answers so far.
    pub fn outcome(&self) -> SearchOutcome<'_> {
        self.engine().resolve(&self.state)
    }

    /// The outcome's products refined for display, including the material
    /// chosen on the results screen.
    pub fn project(&self, projector: &ResultProjector) -> Vec<&Product> {
        let outcome = self.outcome();
        match self.state.material.as_deref() {
            Some(material) => projector.with_material(material).project(outcome.products()),
            None => projector.project(outcome.products()),
        }
    }

    fn at(&self, step: Step) -> SelectionState {
        self.state.clone().at_step(step.index())
    }

    fn commit(&mut self, next: SelectionState) {
        self.state = self.controller.advance(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_then_application_advances_to_technology() {
        let mut wizard = Wizard::new(Vec::new());
        wizard.answer("industrial").unwrap();
        assert!(wizard.in_sub_application_phase());
        assert_eq!(wizard.current_display_step(), 1);

        wizard.answer("manufacturing").unwrap();
        assert_eq!(wizard.current_step(), Step::Technology);
        assert_eq!(wizard.current_display_step(), 2);
    }

    #[test]
    fn answers_outside_the_screen_are_rejected() {
        let mut wizard = Wizard::new(Vec::new());
        assert_eq!(
            wizard.answer("pneumatic"),
            Err(WizardError::UnknownOption {
                step: "application",
                option: "pneumatic".into()
            })
        );
        wizard.choose_application("defense");
        assert_eq!(
            wizard.answer("wireless"),
            Err(WizardError::UnavailableOption {
                option: "wireless".into()
            })
        );
    }

    #[test]
    fn features_wait_for_proceed() {
        let mut wizard = Wizard::new(Vec::new());
        wizard.restore(SelectionState::new().at_step(Step::Features.index()));
        wizard.answer("shield").unwrap();
        wizard.answer("twin").unwrap();
        wizard.answer("shield").unwrap();
        assert_eq!(wizard.current_step(), Step::Features);
        assert_eq!(wizard.state().features.len(), 1);

        wizard.proceed();
        assert_eq!(wizard.current_step(), Step::Results);
        assert_eq!(wizard.answer("twin"), Err(WizardError::NoQuestion("results")));
    }

    #[test]
    fn medical_environment_lands_on_results_as_electrical() {
        let mut wizard = Wizard::new(Vec::new());
        wizard.choose_category("medical");
        wizard.choose_medical_path(MedicalPath::Stock);
        wizard.choose_action(Action::Momentary);
        wizard.choose_environment(Environment::Wet);
        assert_eq!(wizard.current_step(), Step::Results);
        assert_eq!(wizard.state().technology, Some(Technology::Electrical));
        assert_eq!(wizard.total_visible_steps(), 5);
    }
}
