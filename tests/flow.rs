//! Integration tests for step navigation and full wizard sessions.
mod common;
use common::{abc_catalog, ids};
use pedalfinder::prelude::*;
use pedalfinder::selection::Dimension;
use pedalfinder::share;

fn standard_states() -> Vec<SelectionState> {
    let technologies = [
        None,
        Some(Technology::Electrical),
        Some(Technology::Pneumatic),
        Some(Technology::Wireless),
    ];
    technologies
        .into_iter()
        .map(|technology| {
            SelectionState::new()
                .with_application(Some("manufacturing".into()))
                .with_technology(technology)
        })
        .collect()
}

#[test]
fn test_next_and_previous_are_inverse_over_visible_steps() {
    let flow = StepFlowController::new();
    for base in standard_states() {
        let visible = flow.visible_steps(&base);
        for pair in visible.windows(2) {
            let here = base.clone().at_step(pair[0].index());
            let there = base.clone().at_step(pair[1].index());
            assert_eq!(flow.next_step(&here), Some(pair[1]));
            assert_eq!(flow.previous_step(&there), Some(pair[0]));
            assert_eq!(flow.back(flow.advance(here.clone())), here);
        }
    }
}

#[test]
fn test_display_indices_are_contiguous() {
    let flow = StepFlowController::new();
    for base in standard_states() {
        let visible = flow.visible_steps(&base);
        let shown: Vec<usize> = visible
            .iter()
            .map(|step| flow.display_index(&base.clone().at_step(step.index())))
            .collect();
        let expected: Vec<usize> = (1..=flow.total_steps(&base)).collect();
        assert_eq!(shown, expected);
    }
}

#[test]
fn test_skipped_steps_are_never_visited() {
    let flow = StepFlowController::new();
    let mut state = SelectionState::new()
        .with_application(Some("manufacturing".into()))
        .with_technology(Some(Technology::Wireless))
        .at_step(Step::Technology.index());
    let mut visited = Vec::new();
    while let Some(step) = flow.next_step(&state) {
        visited.push(step);
        state = flow.advance(state);
    }
    assert!(!visited.contains(&Step::Connection));
    assert!(!visited.contains(&Step::CircuitCount));
    assert_eq!(visited.last(), Some(&Step::Results));
}

#[test]
fn test_wiring_free_walks_are_mirror_images() {
    let flow = StepFlowController::new();
    for technology in [Technology::Pneumatic, Technology::Wireless] {
        let base = SelectionState::new()
            .with_application(Some("manufacturing".into()))
            .with_technology(Some(technology));

        let mut forward = vec![4];
        let mut state = base.clone().at_step(4);
        while flow.current_step(&state) != Step::Results {
            state = flow.advance(state);
            forward.push(state.step);
        }

        let mut backward = vec![9];
        let mut state = base.clone().at_step(9);
        while state.step != 4 {
            state = flow.back(state);
            backward.push(state.step);
        }

        backward.reverse();
        assert_eq!(forward, backward, "{}", technology.as_str());
        assert!(!forward.contains(&5) && !forward.contains(&6));
    }
}

#[test]
fn test_changing_technology_clears_downstream_answers() {
    let mut wizard = Wizard::new(abc_catalog());
    wizard.choose_application("manufacturing");
    wizard.choose_technology(Technology::Electrical);
    wizard.choose_action(Action::Momentary);
    wizard.choose_environment(Environment::Wet);
    assert_eq!(wizard.current_step(), Step::Duty);

    wizard.choose_technology(Technology::Pneumatic);
    assert_eq!(wizard.current_step(), Step::Action);
    assert_eq!(wizard.state().action, None);
    assert_eq!(wizard.state().environment, None);
    assert_eq!(wizard.state().application.as_deref(), Some("manufacturing"));
    assert_eq!(wizard.total_visible_steps(), 8);
}

#[test]
fn test_standard_session_reaches_exact_results() {
    let mut wizard = Wizard::new(abc_catalog());
    wizard.answer("industrial").unwrap();
    wizard.answer("manufacturing").unwrap();
    wizard.answer("electrical").unwrap();
    wizard.answer("momentary").unwrap();
    wizard.answer("wet").unwrap();
    assert_eq!(wizard.candidate_count(Step::Duty, "heavy"), Some(1));
    assert_eq!(wizard.candidate_count(Step::Duty, "light"), Some(0));
    wizard.answer("heavy").unwrap();
    wizard.answer("screw_terminal").unwrap();
    wizard.answer("no_preference").unwrap();
    wizard.answer("yes").unwrap();
    assert_eq!(wizard.current_step(), Step::Features);
    wizard.proceed();

    assert_eq!(wizard.current_step(), Step::Results);
    assert_eq!(wizard.current_display_step(), wizard.total_visible_steps());
    assert_eq!(ids(wizard.outcome().products()), vec!["A"]);
}

#[test]
fn test_material_on_results_keeps_answers_and_outcome() {
    let mut catalog = abc_catalog();
    catalog[0].material = Some("Steel".into());
    let mut wizard = Wizard::new(catalog);
    wizard.choose_application("manufacturing");
    wizard.choose_technology(Technology::Electrical);
    wizard.choose_action(Action::Momentary);
    wizard.choose_environment(Environment::Wet);
    wizard.choose_duty(Duty::Heavy);
    wizard.choose_connection(ConnectorType::ScrewTerminal);
    wizard.choose_circuit_count(CircuitChoice::Single);
    wizard.choose_guard(Guard::Yes);
    wizard.proceed();
    assert_eq!(wizard.current_step(), Step::Results);

    let before = wizard.state().clone();
    let outcome_before = ids(wizard.outcome().products());

    wizard.choose_material(Some("steel".into()));
    assert_eq!(wizard.state().without(Dimension::Material), before);
    assert_eq!(ids(wizard.outcome().products()), outcome_before);
    assert_eq!(ids(&wizard.project(&ResultProjector::default())), vec!["A"]);

    wizard.choose_material(Some("Brass".into()));
    assert_eq!(wizard.state().guard, Some(Guard::Yes));
    assert!(wizard.project(&ResultProjector::default()).is_empty());
}

#[test]
fn test_medical_session_fork_and_exit() {
    let mut wizard = Wizard::new(abc_catalog());
    wizard.answer("medical").unwrap();
    assert_eq!(wizard.state().flow, Flow::Medical);
    assert_eq!(wizard.current_step(), Step::MedicalFork);
    assert_eq!(wizard.current_display_step(), 2);

    wizard.answer("custom").unwrap();
    assert!(wizard.is_contact_screen());
    assert_eq!(wizard.total_visible_steps(), 2);

    wizard.back();
    assert_eq!(wizard.state(), &SelectionState::new());
    assert_eq!(wizard.current_display_step(), 1);
}

#[test]
fn test_back_from_medical_results_reenters_environment() {
    let mut wizard = Wizard::new(abc_catalog());
    wizard.choose_category("medical");
    wizard.choose_medical_path(MedicalPath::Stock);
    wizard.choose_action(Action::Momentary);
    wizard.choose_environment(Environment::Damp);
    assert_eq!(wizard.current_step(), Step::Results);

    wizard.back();
    assert_eq!(wizard.state().flow, Flow::Medical);
    assert_eq!(wizard.current_step(), Step::Environment);
    assert_eq!(wizard.current_display_step(), 4);
}

#[test]
fn test_share_link_restores_answers_on_results() {
    let mut wizard = Wizard::new(abc_catalog());
    wizard.choose_application("manufacturing");
    wizard.choose_technology(Technology::Electrical);
    wizard.choose_action(Action::Momentary);
    wizard.choose_environment(Environment::Wet);
    let link = wizard.share_link();

    let mut restored = Wizard::new(abc_catalog());
    restored.restore_from_share(&link).unwrap();
    assert_eq!(restored.current_step(), Step::Results);
    assert_eq!(restored.state().environment, Some(Environment::Wet));
    assert_eq!(
        ids(restored.outcome().products()),
        ids(wizard.outcome().products())
    );

    let decoded = share::decode(&link).unwrap();
    assert_eq!(decoded.at_step(wizard.state().step), wizard.state().clone());
}

#[test]
fn test_restart_clears_everything() {
    let mut wizard = Wizard::new(abc_catalog());
    wizard.choose_category("office");
    wizard.choose_application("music");
    wizard.restart();
    assert_eq!(wizard.state(), &SelectionState::new());
    assert!(!wizard.in_sub_application_phase());
}
