//! The wizard's answer record and its reducers.
//!
//! [`SelectionState`] is only ever changed through the `with_*` reducers.
//! Each reducer clears every dimension downstream of the one it sets before
//! writing the new value, so a changed upstream answer can never leave a
//! stale lower filter behind.

use crate::product::{Action, ConnectorType, Duty, Technology};
use std::collections::BTreeSet;

mod choices;

pub use choices::*;

/// An independently selectable answer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Category,
    Application,
    MedicalPath,
    Technology,
    Action,
    Environment,
    Duty,
    Connection,
    CircuitCount,
    Guard,
    Features,
    Material,
}

/// Fixed question ordering. Everything after a dimension is downstream of it.
///
/// Material is refined on the results screen, so it comes last and its
/// reducer never clears a question answer.
pub const DIMENSION_ORDER: [Dimension; 12] = [
    Dimension::Category,
    Dimension::Application,
    Dimension::MedicalPath,
    Dimension::Technology,
    Dimension::Action,
    Dimension::Environment,
    Dimension::Duty,
    Dimension::Connection,
    Dimension::CircuitCount,
    Dimension::Guard,
    Dimension::Features,
    Dimension::Material,
];

impl Dimension {
    fn position(&self) -> usize {
        DIMENSION_ORDER
            .iter()
            .position(|d| d == self)
            .unwrap_or(DIMENSION_ORDER.len())
    }

    /// Dimensions strictly after this one in the question ordering.
    pub fn downstream(&self) -> &'static [Dimension] {
        let start = (self.position() + 1).min(DIMENSION_ORDER.len());
        &DIMENSION_ORDER[start..]
    }

    /// Dimensions strictly before this one in the question ordering.
    pub fn upstream(&self) -> &'static [Dimension] {
        &DIMENSION_ORDER[..self.position().min(DIMENSION_ORDER.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Application => "application",
            Dimension::MedicalPath => "medical_path",
            Dimension::Technology => "technology",
            Dimension::Action => "action",
            Dimension::Environment => "environment",
            Dimension::Duty => "duty",
            Dimension::Material => "material",
            Dimension::Connection => "connection",
            Dimension::CircuitCount => "circuit_count",
            Dimension::Guard => "guard",
            Dimension::Features => "features",
        }
    }
}

/// All answers given so far plus the flow/step cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub flow: Flow,
    pub step: usize,
    /// Step 0 phase marker: `Some` once a top-level category was chosen.
    pub category: Option<String>,
    pub application: Option<String>,
    pub medical_path: Option<MedicalPath>,
    pub technology: Option<Technology>,
    pub action: Option<Action>,
    pub environment: Option<Environment>,
    pub duty: Option<Duty>,
    pub material: Option<String>,
    pub connection: Option<ConnectorType>,
    pub circuit_count: Option<CircuitChoice>,
    pub guard: Option<Guard>,
    pub features: BTreeSet<FeatureChoice>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh state positioned at the start of `flow`.
    pub fn for_flow(flow: Flow) -> Self {
        Self {
            flow,
            ..Self::default()
        }
    }

    pub fn is_set(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Category => self.category.is_some(),
            Dimension::Application => self.application.is_some(),
            Dimension::MedicalPath => self.medical_path.is_some(),
            Dimension::Technology => self.technology.is_some(),
            Dimension::Action => self.action.is_some(),
            Dimension::Environment => self.environment.is_some(),
            Dimension::Duty => self.duty.is_some(),
            Dimension::Material => self.material.is_some(),
            Dimension::Connection => self.connection.is_some(),
            Dimension::CircuitCount => self.circuit_count.is_some(),
            Dimension::Guard => self.guard.is_some(),
            Dimension::Features => !self.features.is_empty(),
        }
    }

    /// Copy with one dimension cleared and everything else untouched.
    pub fn without(&self, dimension: Dimension) -> Self {
        let mut next = self.clone();
        next.clear(dimension);
        next
    }

    /// Copy keeping only the answers upstream of `dimension`.
    pub fn upstream_of(&self, dimension: Dimension) -> Self {
        let mut next = self.clone();
        next.clear(dimension);
        next.clear_downstream(dimension);
        next
    }

    fn clear(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Category => self.category = None,
            Dimension::Application => self.application = None,
            Dimension::MedicalPath => self.medical_path = None,
            Dimension::Technology => self.technology = None,
            Dimension::Action => self.action = None,
            Dimension::Environment => self.environment = None,
            Dimension::Duty => self.duty = None,
            Dimension::Material => self.material = None,
            Dimension::Connection => self.connection = None,
            Dimension::CircuitCount => self.circuit_count = None,
            Dimension::Guard => self.guard = None,
            Dimension::Features => self.features.clear(),
        }
    }

    fn clear_downstream(&mut self, dimension: Dimension) {
        for downstream in dimension.downstream() {
            self.clear(*downstream);
        }
    }

    fn reduce(mut self, dimension: Dimension, write: impl FnOnce(&mut Self)) -> Self {
        self.clear_downstream(dimension);
        write(&mut self);
        self
    }

    pub fn with_category(self, value: Option<String>) -> Self {
        self.reduce(Dimension::Category, |s| s.category = value)
    }

    pub fn with_application(self, value: Option<String>) -> Self {
        self.reduce(Dimension::Application, |s| s.application = value)
    }

    pub fn with_medical_path(self, value: Option<MedicalPath>) -> Self {
        self.reduce(Dimension::MedicalPath, |s| s.medical_path = value)
    }

    pub fn with_technology(self, value: Option<Technology>) -> Self {
        self.reduce(Dimension::Technology, |s| s.technology = value)
    }

    pub fn with_action(self, value: Option<Action>) -> Self {
        self.reduce(Dimension::Action, |s| s.action = value)
    }

    pub fn with_environment(self, value: Option<Environment>) -> Self {
        self.reduce(Dimension::Environment, |s| s.environment = value)
    }

    pub fn with_duty(self, value: Option<Duty>) -> Self {
        self.reduce(Dimension::Duty, |s| s.duty = value)
    }

    pub fn with_material(self, value: Option<String>) -> Self {
        self.reduce(Dimension::Material, |s| s.material = value)
    }

    pub fn with_connection(self, value: Option<ConnectorType>) -> Self {
        self.reduce(Dimension::Connection, |s| s.connection = value)
    }

    pub fn with_circuit_count(self, value: Option<CircuitChoice>) -> Self {
        self.reduce(Dimension::CircuitCount, |s| s.circuit_count = value)
    }

    pub fn with_guard(self, value: Option<Guard>) -> Self {
        self.reduce(Dimension::Guard, |s| s.guard = value)
    }

    pub fn with_features(self, value: BTreeSet<FeatureChoice>) -> Self {
        self.reduce(Dimension::Features, |s| s.features = value)
    }

    pub fn with_feature_toggled(self, feature: FeatureChoice) -> Self {
        let mut features = self.features.clone();
        if !features.remove(&feature) {
            features.insert(feature);
        }
        self.with_features(features)
    }

    /// Medical environments are electrical-only. Technology sits upstream of
    /// environment, so it is written directly instead of through its reducer.
    pub fn with_medical_environment(self, value: Environment) -> Self {
        let mut next = self.with_environment(Some(value));
        next.technology = Some(Technology::Electrical);
        next
    }

    pub fn at_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// True when any selected feature asks for an out-of-catalog build.
    pub fn requests_custom_build(&self) -> bool {
        self.features.iter().any(FeatureChoice::is_custom)
            || self.medical_path == Some(MedicalPath::Custom)
    }
}
