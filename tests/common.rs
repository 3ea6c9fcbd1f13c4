//! Common test utilities for building catalogs and selection states.
use pedalfinder::prelude::*;
use std::collections::BTreeSet;

/// A bare electrical product with medium duty and an IP20 enclosure.
#[allow(dead_code)]
pub fn product(id: &str, series: &str) -> Product {
    Product {
        id: id.to_string(),
        series: series.to_string(),
        part_number: Some(id.to_uppercase()),
        description: None,
        technology: Technology::Electrical,
        duty: Some(Duty::Medium),
        ip: IpRating::new("IP20"),
        actions: BTreeSet::from([Action::Momentary]),
        applications: BTreeSet::from(["manufacturing".to_string()]),
        features: BTreeSet::new(),
        connector_type: Some(ConnectorType::ScrewTerminal),
        material: None,
        circuit_count: Some(1),
        flagship: false,
    }
}

/// Three products over two series.
///
/// - `A`: series X, electrical, heavy, IP68, momentary, shield
/// - `B`: series X, electrical, medium, IP20, momentary
/// - `C`: series Y, pneumatic, heavy, IP20, momentary
#[allow(dead_code)]
pub fn abc_catalog() -> Vec<Product> {
    let mut a = product("A", "X");
    a.duty = Some(Duty::Heavy);
    a.ip = IpRating::new("IP68");
    a.features.insert(Feature::Shield);
    a.flagship = true;

    let b = product("B", "X");

    let mut c = product("C", "Y");
    c.technology = Technology::Pneumatic;
    c.duty = Some(Duty::Heavy);
    c.connector_type = None;
    c.circuit_count = None;
    c.flagship = true;

    vec![a, b, c]
}

/// Electrical, momentary, wet: the state that isolates `A`.
#[allow(dead_code)]
pub fn electrical_momentary_wet() -> SelectionState {
    SelectionState::new()
        .with_technology(Some(Technology::Electrical))
        .with_action(Some(Action::Momentary))
        .with_environment(Some(Environment::Wet))
}

#[allow(dead_code)]
pub fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.clone()).collect()
}
