use crate::product::{Product, Technology};
use crate::selection::{Dimension, Guard, SelectionState};

/// Dimensions that act as catalog predicates, in question order.
pub const FILTER_DIMENSIONS: [Dimension; 9] = [
    Dimension::Application,
    Dimension::Technology,
    Dimension::Action,
    Dimension::Environment,
    Dimension::Duty,
    Dimension::Connection,
    Dimension::CircuitCount,
    Dimension::Guard,
    Dimension::Features,
];

/// Whether `product` satisfies the state's answer for one dimension.
///
/// An unset dimension always matches. Category, medical path and material
/// carry no catalog predicate.
pub fn dimension_matches(dimension: Dimension, product: &Product, state: &SelectionState) -> bool {
    match dimension {
        Dimension::Application => state
            .application
            .as_ref()
            .is_none_or(|application| product.applications.contains(application)),
        Dimension::Technology => state
            .technology
            .is_none_or(|technology| product.technology == technology),
        Dimension::Action => state
            .action
            .is_none_or(|action| product.actions.contains(&action)),
        Dimension::Environment => state
            .environment
            .is_none_or(|environment| environment.accepts(&product.ip)),
        Dimension::Duty => state.duty.is_none_or(|duty| product.duty == Some(duty)),
        Dimension::Connection => {
            // Pneumatic switches carry no connector type.
            if state.technology == Some(Technology::Pneumatic) {
                return true;
            }
            state
                .connection
                .is_none_or(|connection| product.connector_type == Some(connection))
        }
        Dimension::CircuitCount => state
            .circuit_count
            .and_then(|choice| choice.count())
            .is_none_or(|count| product.circuit_count == Some(count)),
        Dimension::Guard => match state.guard {
            Some(Guard::Yes) => product.features.contains(&crate::product::Feature::Shield),
            Some(Guard::No) | None => true,
        },
        Dimension::Features => state
            .features
            .iter()
            .filter_map(|choice| choice.catalog_feature())
            .all(|feature| product.features.contains(&feature)),
        Dimension::Category | Dimension::MedicalPath | Dimension::Material => true,
    }
}

/// Whether `product` satisfies every answer in `state`.
pub fn matches(product: &Product, state: &SelectionState) -> bool {
    FILTER_DIMENSIONS
        .iter()
        .all(|dimension| dimension_matches(*dimension, product, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Action, ConnectorType, Duty, Feature, IpRating};
    use crate::selection::{CircuitChoice, Environment, FeatureChoice};

    fn product() -> Product {
        Product {
            id: "p".into(),
            series: "S".into(),
            part_number: None,
            description: None,
            technology: Technology::Electrical,
            duty: Some(Duty::Medium),
            ip: IpRating::new("IP56"),
            actions: [Action::Momentary].into_iter().collect(),
            applications: ["general".to_string()].into_iter().collect(),
            features: [Feature::Shield].into_iter().collect(),
            connector_type: None,
            material: None,
            circuit_count: Some(1),
            flagship: false,
        }
    }

    #[test]
    fn environment_ranges() {
        let ip = |code: &str| IpRating::new(code);
        assert!(Environment::Open.accepts(&ip("IPXX")));
        assert!(!Environment::Open.accepts(&ip("IP20")));
        assert!(Environment::Dry.accepts(&ip("IP20")));
        assert!(Environment::Dry.accepts(&ip("IPXX")));
        assert!(Environment::Damp.accepts(&ip("IP56")));
        assert!(Environment::Damp.accepts(&ip("IP68")));
        assert!(!Environment::Wet.accepts(&ip("IP56")));
        assert!(Environment::NoPreference.accepts(&ip("IP10")));
    }

    #[test]
    fn pneumatic_skips_connection_check() {
        let mut p = product();
        p.technology = Technology::Pneumatic;
        let mut state = SelectionState::new().with_connection(Some(ConnectorType::PreWired));
        assert!(!dimension_matches(Dimension::Connection, &p, &state));
        state.technology = Some(Technology::Pneumatic);
        assert!(dimension_matches(Dimension::Connection, &p, &state));
    }

    #[test]
    fn circuit_no_preference_matches_anything() {
        let p = product();
        let state = SelectionState::new().with_circuit_count(Some(CircuitChoice::NoPreference));
        assert!(matches(&p, &state));
        let state = state.with_circuit_count(Some(CircuitChoice::Double));
        assert!(!matches(&p, &state));
    }

    #[test]
    fn guard_no_does_not_exclude_shielded() {
        let mut p = product();
        let state = SelectionState::new().with_guard(Some(Guard::No));
        assert!(matches(&p, &state));
        p.features.clear();
        assert!(matches(&p, &state));
        assert!(!matches(&p, &state.with_guard(Some(Guard::Yes))));
    }

    #[test]
    fn custom_features_are_not_predicates() {
        let p = product();
        let state = SelectionState::new()
            .with_feature_toggled(FeatureChoice::CustomCable)
            .with_feature_toggled(FeatureChoice::Shield)
            .with_feature_toggled(FeatureChoice::CustomConnector);
        assert!(matches(&p, &state));
        assert!(!matches(&p, &state.with_feature_toggled(FeatureChoice::Twin)));
    }
}
