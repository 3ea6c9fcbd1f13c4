//! Static, catalog-independent option tables for each question.

use super::Step;
use crate::product::Technology;
use crate::selection::SelectionState;

/// When an option may be offered.
#[derive(Clone, Copy)]
pub enum Availability {
    Always,
    /// Offered only when the predicate accepts the answers given so far.
    AvailableFor(fn(&SelectionState) -> bool),
    /// Suppressed under the listed technology choices.
    HideFor(&'static [Technology]),
}

/// A selectable answer for one question.
#[derive(Clone, Copy)]
pub struct ChoiceOption {
    pub id: &'static str,
    pub label: &'static str,
    pub availability: Availability,
}

impl ChoiceOption {
    const fn always(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            availability: Availability::Always,
        }
    }

    const fn hide_for(
        id: &'static str,
        label: &'static str,
        hidden: &'static [Technology],
    ) -> Self {
        Self {
            id,
            label,
            availability: Availability::HideFor(hidden),
        }
    }

    const fn available_for(
        id: &'static str,
        label: &'static str,
        predicate: fn(&SelectionState) -> bool,
    ) -> Self {
        Self {
            id,
            label,
            availability: Availability::AvailableFor(predicate),
        }
    }

    pub fn is_available(&self, state: &SelectionState) -> bool {
        match self.availability {
            Availability::Always => true,
            Availability::AvailableFor(predicate) => predicate(state),
            Availability::HideFor(hidden) => state
                .technology
                .is_none_or(|technology| !hidden.contains(&technology)),
        }
    }
}

impl std::fmt::Debug for ChoiceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceOption")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

/// A top-level application category chosen in step 0, phase 1.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    /// Choosing a medical category switches to the medical flow.
    pub medical: bool,
    pub applications: &'static [ChoiceOption],
}

/// Application tag used for the medical category and its sub-flow.
pub const MEDICAL_APPLICATION: &str = "medical";

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "industrial",
        label: "Industrial",
        medical: false,
        applications: &[
            ChoiceOption::always("manufacturing", "Manufacturing & machinery"),
            ChoiceOption::always("construction", "Construction equipment"),
            ChoiceOption::always("utilities", "Utilities & energy"),
            ChoiceOption::always("agriculture", "Agriculture"),
            ChoiceOption::always("defense", "Defense"),
        ],
    },
    Category {
        id: "medical",
        label: "Medical",
        medical: true,
        applications: &[],
    },
    Category {
        id: "commercial",
        label: "Commercial",
        medical: false,
        applications: &[
            ChoiceOption::always("printing", "Printing & packaging"),
            ChoiceOption::always("sewing", "Sewing & textiles"),
            ChoiceOption::always("food_service", "Food service"),
            ChoiceOption::always("automotive", "Automotive service"),
        ],
    },
    Category {
        id: "office",
        label: "Office & home",
        medical: false,
        applications: &[
            ChoiceOption::always("transcription", "Transcription & dictation"),
            ChoiceOption::always("music", "Music & audio"),
            ChoiceOption::always("accessibility", "Accessibility"),
            ChoiceOption::always("general", "General purpose"),
        ],
    },
];

pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

fn not_defense(state: &SelectionState) -> bool {
    state.application.as_deref() != Some("defense")
}

fn electrical_only(state: &SelectionState) -> bool {
    state.technology == Some(Technology::Electrical)
}

const TECHNOLOGY_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("electrical", "Electrical"),
    ChoiceOption::always("pneumatic", "Pneumatic (air)"),
    ChoiceOption::available_for("wireless", "Wireless", not_defense),
];

const ACTION_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("momentary", "Momentary"),
    ChoiceOption::always("maintained", "Maintained (latching)"),
    ChoiceOption::hide_for("variable", "Variable speed", &[Technology::Wireless]),
];

const ENVIRONMENT_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("open", "Open frame, indoor only"),
    ChoiceOption::always("dry", "Dry indoor"),
    ChoiceOption::always("damp", "Damp or dusty"),
    ChoiceOption::always("wet", "Wet or washdown"),
    ChoiceOption::always("no_preference", "No preference"),
];

const DUTY_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("light", "Light duty"),
    ChoiceOption::always("medium", "Medium duty"),
    ChoiceOption::always("heavy", "Heavy duty"),
];

const CONNECTION_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::available_for("screw_terminal", "Screw terminals", electrical_only),
    ChoiceOption::available_for("quick_connect", "Quick-connect terminals", electrical_only),
    ChoiceOption::available_for("pre_wired", "Pre-wired cord", electrical_only),
];

const CIRCUIT_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("single", "Single circuit"),
    ChoiceOption::always("double", "Double circuit"),
    ChoiceOption::always("no_preference", "No preference"),
];

const GUARD_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("yes", "Yes, guard required"),
    ChoiceOption::always("no", "No preference"),
];

const FEATURE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("shield", "Protective shield"),
    ChoiceOption::always("twin", "Twin pedal"),
    ChoiceOption::hide_for("multi_stage", "Multi-stage", &[Technology::Pneumatic]),
    ChoiceOption::hide_for("custom_cable", "Custom cable length", &[Technology::Wireless]),
    ChoiceOption::hide_for(
        "custom_connector",
        "Custom connector",
        &[Technology::Pneumatic, Technology::Wireless],
    ),
];

const MEDICAL_FORK_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("stock", "Standard catalog switch"),
    ChoiceOption::always("custom", "Custom medical design"),
];

const CATEGORY_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption::always("industrial", "Industrial"),
    ChoiceOption::always("medical", "Medical"),
    ChoiceOption::always("commercial", "Commercial"),
    ChoiceOption::always("office", "Office & home"),
];

/// Every option defined for `step`, ignoring availability.
///
/// Step 0 returns the category list in phase 1 and the chosen category's
/// applications in phase 2.
pub fn options_for(step: Step, state: &SelectionState) -> &'static [ChoiceOption] {
    match step {
        Step::Application => match state.category.as_deref().and_then(category) {
            Some(category) if !category.medical => category.applications,
            _ => CATEGORY_OPTIONS,
        },
        Step::MedicalFork => MEDICAL_FORK_OPTIONS,
        Step::Technology => TECHNOLOGY_OPTIONS,
        Step::Action => ACTION_OPTIONS,
        Step::Environment => ENVIRONMENT_OPTIONS,
        Step::Duty => DUTY_OPTIONS,
        Step::Connection => CONNECTION_OPTIONS,
        Step::CircuitCount => CIRCUIT_OPTIONS,
        Step::Guard => GUARD_OPTIONS,
        Step::Features => FEATURE_OPTIONS,
        Step::Results => &[],
    }
}

/// Options for `step` that are selectable given the current answers.
pub fn available_options(step: Step, state: &SelectionState) -> Vec<&'static ChoiceOption> {
    options_for(step, state)
        .iter()
        .filter(|option| option.is_available(state))
        .collect()
}
