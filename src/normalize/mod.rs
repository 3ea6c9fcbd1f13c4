//! Raw catalog row to canonical [`Product`] conversion.
//!
//! [`normalize`] is pure: the same row always yields the same product and no
//! row makes it panic. Fields that cannot be resolved stay `None` so that
//! completeness reporting downstream can tell "missing" from "empty".

use crate::product::{Action, Duty, Feature, IpRating, Product, Technology};
use std::collections::BTreeSet;
use tracing::debug;

mod columns;
pub mod rules;

pub use columns::{COLUMN_ALIASES, Column, Columns, RawRow, fold_header};
use rules::*;

/// Converts one provider row into a canonical product.
pub fn normalize(row: &RawRow) -> Product {
    let columns = Columns::resolve(row);

    let part_number = columns.text(Column::PartNumber);
    let series = columns
        .text(Column::Series)
        .or_else(|| part_number.clone())
        .or_else(|| columns.text(Column::Id))
        .unwrap_or_default();
    let id = columns
        .text(Column::Id)
        .or_else(|| part_number.clone())
        .unwrap_or_else(|| series.clone());

    let technology = infer_technology(&columns, &series);

    Product {
        id,
        part_number,
        description: columns.text(Column::Description),
        technology,
        duty: infer_duty(&columns),
        ip: infer_ip(&columns),
        actions: infer_actions(&columns),
        applications: infer_applications(&columns),
        features: infer_features(&columns),
        connector_type: infer_connector(&columns, technology, &series),
        material: columns.text(Column::Material),
        circuit_count: infer_circuits(&columns),
        flagship: false,
        series,
    }
}

/// True when the row names a series, part number or id to build identity from.
pub fn has_identity(row: &RawRow) -> bool {
    let columns = Columns::resolve(row);
    [Column::Series, Column::PartNumber, Column::Id]
        .into_iter()
        .any(|column| columns.text(column).is_some())
}

/// Normalizes a batch and elects one flagship per series.
///
/// Rows without any identity are skipped, so no product ever carries an
/// empty series.
pub fn normalize_all<'a>(rows: impl IntoIterator<Item = &'a RawRow>) -> Vec<Product> {
    let mut products: Vec<Product> = rows
        .into_iter()
        .enumerate()
        .filter(|(index, row)| {
            let keep = has_identity(row);
            if !keep {
                debug!(row = index + 1, "skipping row without series, part number or id");
            }
            keep
        })
        .map(|(_, row)| normalize(row))
        .collect();
    crate::product::assign_flagships(&mut products);
    products
}

fn infer_technology(columns: &Columns<'_>, series: &str) -> Technology {
    first_match(TECHNOLOGY_RULES, columns, series)
        .map(|(_, technology)| technology)
        .unwrap_or(Technology::Electrical)
}

fn infer_actions(columns: &Columns<'_>) -> BTreeSet<Action> {
    let mut actions: BTreeSet<Action> = columns
        .text(Column::OnOff)
        .map(|code| on_off_actions(&code).iter().copied().collect())
        .unwrap_or_default();
    if columns.flag(Column::Linear) {
        actions.insert(Action::Variable);
    }
    actions
}

fn infer_connector(
    columns: &Columns<'_>,
    technology: Technology,
    series: &str,
) -> Option<crate::product::ConnectorType> {
    if technology.skips_wiring() {
        return None;
    }
    first_match(CONNECTOR_RULES, columns, series).map(|(_, connector)| connector)
}

fn infer_ip(columns: &Columns<'_>) -> IpRating {
    let Some(code) = columns.text(Column::Ip) else {
        return IpRating::new(DEFAULT_IP);
    };
    let rewritten = IP_REWRITES
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(&code))
        .map(|(_, to)| to.to_string());
    IpRating::new(rewritten.unwrap_or(code))
}

fn infer_features(columns: &Columns<'_>) -> BTreeSet<Feature> {
    let mut features = BTreeSet::new();

    if let Some(guard) = columns.text(Column::Guard) {
        let guard = guard.to_ascii_lowercase();
        if GUARD_LEVELS_WITH_SHIELD.contains(&guard.as_str()) {
            features.insert(Feature::Shield);
        }
    }
    if columns.number(Column::Pedals).is_some_and(|n| n >= 2.0) {
        features.insert(Feature::Twin);
    }
    if let Some(stages) = columns.text(Column::Stages) {
        let stages = stages.to_ascii_lowercase();
        if MULTI_STAGE_MARKERS.iter().any(|m| stages.contains(m)) {
            features.insert(Feature::MultiStage);
        }
    }
    features
}

fn infer_applications(columns: &Columns<'_>) -> BTreeSet<String> {
    let mut applications: BTreeSet<String> = columns
        .list(Column::Applications)
        .into_iter()
        .map(|tag| tag.to_lowercase())
        .collect();

    if applications.is_empty() {
        applications.insert(DEFAULT_APPLICATION.to_string());
    } else if applications.contains("industrial") {
        applications.extend(INDUSTRIAL_SUBTAGS.iter().map(|t| t.to_string()));
    }
    applications
}

fn infer_duty(columns: &Columns<'_>) -> Option<Duty> {
    let text = columns.text(Column::Duty)?.to_ascii_lowercase();
    let text = text.trim_end_matches("duty").trim();
    match text {
        "hd" => Some(Duty::Heavy),
        "md" => Some(Duty::Medium),
        "ld" => Some(Duty::Light),
        other => Duty::parse(other),
    }
}

fn infer_circuits(columns: &Columns<'_>) -> Option<u8> {
    if let Some(n) = columns.number(Column::Circuits) {
        return (n >= 1.0 && n <= u8::MAX as f64).then_some(n as u8);
    }
    match columns.text(Column::Circuits)?.to_ascii_lowercase().as_str() {
        "single" | "spdt" | "spst" => Some(1),
        "double" | "dpdt" | "dpst" => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ConnectorType;
    use serde_json::json;

    fn row(pairs: &[(&str, serde_json::Value)]) -> RawRow {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn technology_cascade_prefers_wireless_over_pneumatic() {
        let product = normalize(&row(&[
            ("Series", json!("Dolphin")),
            ("Wireless", json!(true)),
            ("Pneumatic Flow", json!(true)),
        ]));
        assert_eq!(product.technology, Technology::Wireless);

        let product = normalize(&row(&[("Air Flow", json!("yes"))]));
        assert_eq!(product.technology, Technology::Pneumatic);

        let product = normalize(&row(&[("Series", json!("Hercules"))]));
        assert_eq!(product.technology, Technology::Electrical);
    }

    #[test]
    fn on_off_either_yields_both_and_linear_adds_variable() {
        let product = normalize(&row(&[("On/Off", json!("Either")), ("Linear", json!("Y"))]));
        let expected: BTreeSet<Action> = [Action::Momentary, Action::Maintained, Action::Variable]
            .into_iter()
            .collect();
        assert_eq!(product.actions, expected);

        let product = normalize(&row(&[("Linear", json!(true))]));
        assert_eq!(product.actions, BTreeSet::from([Action::Variable]));
    }

    #[test]
    fn explicit_connection_wins_over_series_family() {
        let product = normalize(&row(&[
            ("Series", json!("Compact 200")),
            ("Connection Type", json!("Screw Terminals")),
        ]));
        assert_eq!(product.connector_type, Some(ConnectorType::ScrewTerminal));
    }

    #[test]
    fn terminals_only_is_settled_by_series_name() {
        let screw = normalize(&row(&[
            ("Series", json!("Classic Hercules")),
            ("Connection Type", json!("Terminals Only")),
        ]));
        assert_eq!(screw.connector_type, Some(ConnectorType::ScrewTerminal));

        let quick = normalize(&row(&[
            ("Series", json!("Slim Line")),
            ("Connection Type", json!("terminals only")),
        ]));
        assert_eq!(quick.connector_type, Some(ConnectorType::QuickConnect));

        // Ambiguous value with an unknown family does not fall through to the
        // series-only table.
        let unknown = normalize(&row(&[
            ("Series", json!("Dolphin Pro")),
            ("Connection Type", json!("terminals only")),
        ]));
        assert_eq!(unknown.connector_type, None);
    }

    #[test]
    fn series_family_applies_without_explicit_value() {
        let product = normalize(&row(&[("Series", json!("Treadlite II"))]));
        assert_eq!(product.connector_type, Some(ConnectorType::PreWired));

        let product = normalize(&row(&[("Series", json!("Nameless"))]));
        assert_eq!(product.connector_type, None);
    }

    #[test]
    fn pneumatic_and_wireless_never_get_a_connector() {
        let product = normalize(&row(&[
            ("Series", json!("Hercules Air")),
            ("Air Flow", json!(true)),
            ("Connection Type", json!("screw terminal")),
        ]));
        assert_eq!(product.connector_type, None);
    }

    #[test]
    fn ip_rewrites() {
        let ip = |value: serde_json::Value| normalize(&row(&[("IP Rating", value)])).ip;
        assert_eq!(ip(serde_json::Value::Null).as_str(), "IP20");
        assert_eq!(ip(json!("IPXX")).as_str(), "IP20");
        assert_eq!(ip(json!("IPX8")).as_str(), "IP68");
        assert_eq!(ip(json!("IP56")).as_str(), "IP56");
        assert_eq!(normalize(&RawRow::new()).ip.as_str(), "IP20");
    }

    #[test]
    fn features_from_guard_pedals_and_stages() {
        let product = normalize(&row(&[
            ("Guard", json!("Full")),
            ("Pedals", json!(2)),
            ("Stages", json!("3 Stage Momentary")),
        ]));
        let expected: BTreeSet<Feature> = Feature::ALL.into_iter().collect();
        assert_eq!(product.features, expected);

        let product = normalize(&row(&[
            ("Guard", json!("none")),
            ("Pedals", json!("1")),
            ("Stages", json!("Single Stage")),
        ]));
        assert!(product.features.is_empty());
    }

    #[test]
    fn industrial_expands_and_empty_defaults_to_general() {
        let product = normalize(&row(&[("Applications", json!(["Industrial", "medical"]))]));
        let expected = [
            "industrial",
            "medical",
            "manufacturing",
            "construction",
            "utilities",
            "agriculture",
            "defense",
        ];
        for tag in expected {
            assert!(product.applications.contains(tag), "missing {tag}");
        }

        let product = normalize(&RawRow::new());
        assert_eq!(product.applications, BTreeSet::from(["general".to_string()]));
    }

    #[test]
    fn missing_optionals_stay_none() {
        let product = normalize(&row(&[("Series", json!("Hercules"))]));
        assert_eq!(product.part_number, None);
        assert_eq!(product.description, None);
        assert_eq!(product.material, None);
        assert_eq!(product.duty, None);
        assert_eq!(product.circuit_count, None);
        assert_eq!(product.id, "Hercules");
    }

    #[test]
    fn duty_and_circuits_spellings() {
        let product = normalize(&row(&[
            ("Duty", json!("Heavy Duty")),
            ("Circuits", json!("DPDT")),
        ]));
        assert_eq!(product.duty, Some(Duty::Heavy));
        assert_eq!(product.circuit_count, Some(2));
    }

    #[test]
    fn cascade_reports_the_rule_that_fired() {
        let r = row(&[("Series", json!("Slim")), ("Connection", json!("terminals"))]);
        let columns = Columns::resolve(&r);
        let (name, connector) = first_match(CONNECTOR_RULES, &columns, "Slim").unwrap();
        assert_eq!(name, "ambiguous_terminals");
        assert_eq!(connector, ConnectorType::QuickConnect);
        let names: Vec<_> = CONNECTOR_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["explicit_lookup", "ambiguous_terminals", "series_family"]);
    }
}
