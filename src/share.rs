//! Compact query-string form of a [`SelectionState`] for share links.
//!
//! Each dimension has a short key. Unset dimensions are omitted and features
//! are comma separated. A decoded state lands on the results screen (or the
//! contact screen for a custom medical request).

use crate::error::ShareCodecError;
use crate::flow::Step;
use crate::product::{Action, ConnectorType, Duty, Technology};
use crate::selection::{
    CircuitChoice, Environment, FeatureChoice, Flow, Guard, MedicalPath, SelectionState,
};
use url::form_urlencoded;

pub const KEY_FLOW: &str = "fl";
pub const KEY_CATEGORY: &str = "c";
pub const KEY_APPLICATION: &str = "a";
pub const KEY_MEDICAL_PATH: &str = "mp";
pub const KEY_TECHNOLOGY: &str = "t";
pub const KEY_ACTION: &str = "ac";
pub const KEY_ENVIRONMENT: &str = "e";
pub const KEY_DUTY: &str = "d";
pub const KEY_MATERIAL: &str = "m";
pub const KEY_CONNECTION: &str = "cn";
pub const KEY_CIRCUITS: &str = "cc";
pub const KEY_GUARD: &str = "g";
pub const KEY_FEATURES: &str = "f";

/// Encodes every set answer. The cursor is not part of the link.
pub fn encode(state: &SelectionState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if state.flow != Flow::Standard {
        query.append_pair(KEY_FLOW, state.flow.as_str());
    }

    let pairs = [
        (KEY_CATEGORY, state.category.as_deref()),
        (KEY_APPLICATION, state.application.as_deref()),
        (KEY_MEDICAL_PATH, state.medical_path.as_ref().map(|v| v.as_str())),
        (KEY_TECHNOLOGY, state.technology.as_ref().map(|v| v.as_str())),
        (KEY_ACTION, state.action.as_ref().map(|v| v.as_str())),
        (KEY_ENVIRONMENT, state.environment.as_ref().map(|v| v.as_str())),
        (KEY_DUTY, state.duty.as_ref().map(|v| v.as_str())),
        (KEY_MATERIAL, state.material.as_deref()),
        (KEY_CONNECTION, state.connection.as_ref().map(|v| v.as_str())),
        (KEY_CIRCUITS, state.circuit_count.as_ref().map(|v| v.as_str())),
        (KEY_GUARD, state.guard.as_ref().map(|v| v.as_str())),
    ];
    for (key, value) in pairs {
        if let Some(value) = value {
            query.append_pair(key, value);
        }
    }

    if !state.features.is_empty() {
        let features: Vec<&str> = state.features.iter().map(FeatureChoice::as_str).collect();
        query.append_pair(KEY_FEATURES, &features.join(","));
    }
    query.finish()
}

fn parsed<T>(key: &str, value: &str, parse: fn(&str) -> Option<T>) -> Result<T, ShareCodecError> {
    parse(value).ok_or_else(|| ShareCodecError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Restores a state from a share string. A leading `?` is accepted and
/// unknown keys are ignored; an unknown value for a known key is an error.
pub fn decode(query: &str) -> Result<SelectionState, ShareCodecError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = SelectionState::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            KEY_FLOW => state.flow = parsed(KEY_FLOW, value, Flow::parse)?,
            KEY_CATEGORY => state.category = Some(value.to_string()),
            KEY_APPLICATION => state.application = Some(value.to_string()),
            KEY_MEDICAL_PATH => {
                state.medical_path = Some(parsed(KEY_MEDICAL_PATH, value, MedicalPath::parse)?)
            }
            KEY_TECHNOLOGY => {
                state.technology = Some(parsed(KEY_TECHNOLOGY, value, Technology::parse)?)
            }
            KEY_ACTION => state.action = Some(parsed(KEY_ACTION, value, Action::parse)?),
            KEY_ENVIRONMENT => {
                state.environment = Some(parsed(KEY_ENVIRONMENT, value, Environment::parse)?)
            }
            KEY_DUTY => state.duty = Some(parsed(KEY_DUTY, value, Duty::parse)?),
            KEY_MATERIAL => state.material = Some(value.to_string()),
            KEY_CONNECTION => {
                state.connection = Some(parsed(KEY_CONNECTION, value, ConnectorType::parse)?)
            }
            KEY_CIRCUITS => {
                state.circuit_count = Some(parsed(KEY_CIRCUITS, value, CircuitChoice::parse)?)
            }
            KEY_GUARD => state.guard = Some(parsed(KEY_GUARD, value, Guard::parse)?),
            KEY_FEATURES => {
                for feature in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                    state
                        .features
                        .insert(parsed(KEY_FEATURES, feature, FeatureChoice::parse)?);
                }
            }
            _ => {}
        }
    }

    let landing = if state.flow == Flow::Medical && state.medical_path == Some(MedicalPath::Custom)
    {
        Step::MedicalFork
    } else {
        Step::Results
    };
    Ok(state.at_step(landing.index()))
}
