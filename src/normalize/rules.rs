//! Ordered inference tables for the normalizer.
//!
//! Each cascade is a slice of named rules evaluated top to bottom; the first
//! rule returning `Some` decides the attribute.

use super::columns::{Column, Columns};
use crate::product::{Action, ConnectorType, Technology};

/// A named step in an inference cascade.
pub struct Rule<T> {
    pub name: &'static str,
    pub apply: fn(&Columns<'_>, &str) -> Option<T>,
}

/// Runs a cascade and reports which rule fired.
pub fn first_match<T>(
    rules: &[Rule<T>],
    columns: &Columns<'_>,
    series: &str,
) -> Option<(&'static str, T)> {
    rules
        .iter()
        .find_map(|rule| (rule.apply)(columns, series).map(|value| (rule.name, value)))
}

pub static TECHNOLOGY_RULES: &[Rule<Technology>] = &[
    Rule {
        name: "wireless_flag",
        apply: wireless_flag,
    },
    Rule {
        name: "pneumatic_flow_flag",
        apply: pneumatic_flow_flag,
    },
    Rule {
        name: "default_electrical",
        apply: default_electrical,
    },
];

fn wireless_flag(columns: &Columns<'_>, _series: &str) -> Option<Technology> {
    columns
        .flag(Column::Wireless)
        .then_some(Technology::Wireless)
}

fn pneumatic_flow_flag(columns: &Columns<'_>, _series: &str) -> Option<Technology> {
    columns
        .flag(Column::PneumaticFlow)
        .then_some(Technology::Pneumatic)
}

fn default_electrical(_columns: &Columns<'_>, _series: &str) -> Option<Technology> {
    Some(Technology::Electrical)
}

/// On/off codes as they appear in provider sheets.
pub const ON_OFF_CODES: &[(&str, &[Action])] = &[
    ("m", &[Action::Momentary]),
    ("mom", &[Action::Momentary]),
    ("momentary", &[Action::Momentary]),
    ("mt", &[Action::Maintained]),
    ("maint", &[Action::Maintained]),
    ("maintained", &[Action::Maintained]),
    ("latching", &[Action::Maintained]),
    ("e", &[Action::Momentary, Action::Maintained]),
    ("either", &[Action::Momentary, Action::Maintained]),
    ("both", &[Action::Momentary, Action::Maintained]),
    ("mom/maint", &[Action::Momentary, Action::Maintained]),
];

pub fn on_off_actions(code: &str) -> &'static [Action] {
    let code = code.trim().to_ascii_lowercase();
    ON_OFF_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, actions)| *actions)
        .unwrap_or(&[])
}

/// Unambiguous connection-type spellings.
pub const CONNECTION_LOOKUP: &[(&str, ConnectorType)] = &[
    ("screw", ConnectorType::ScrewTerminal),
    ("screw terminal", ConnectorType::ScrewTerminal),
    ("screw terminals", ConnectorType::ScrewTerminal),
    ("quick connect", ConnectorType::QuickConnect),
    ("quick-connect", ConnectorType::QuickConnect),
    ("quick connect terminals", ConnectorType::QuickConnect),
    ("spade", ConnectorType::QuickConnect),
    ("faston", ConnectorType::QuickConnect),
    ("pre-wired", ConnectorType::PreWired),
    ("prewired", ConnectorType::PreWired),
    ("cord", ConnectorType::PreWired),
    ("cord and plug", ConnectorType::PreWired),
    ("cable", ConnectorType::PreWired),
    ("plug", ConnectorType::PreWired),
];

/// Explicit values that name terminals without saying which kind.
pub const AMBIGUOUS_CONNECTIONS: &[&str] = &["terminals only", "terminals", "terminal"];

/// Series families used to settle an ambiguous "terminals only" value.
pub const TERMINAL_SERIES_GROUPS: &[(&[&str], ConnectorType)] = &[
    (&["hercules", "classic", "titan"], ConnectorType::ScrewTerminal),
    (&["compact", "slim", "mini"], ConnectorType::QuickConnect),
];

/// Series families used when the row carries no connection value at all.
pub const SERIES_FAMILY_GROUPS: &[(&[&str], ConnectorType)] = &[
    (&["hercules", "classic", "titan", "atlas"], ConnectorType::ScrewTerminal),
    (&["compact", "slim", "mini", "micro"], ConnectorType::QuickConnect),
    (&["treadlite", "dolphin", "ergo", "clipper"], ConnectorType::PreWired),
];

pub static CONNECTOR_RULES: &[Rule<ConnectorType>] = &[
    Rule {
        name: "explicit_lookup",
        apply: explicit_lookup,
    },
    Rule {
        name: "ambiguous_terminals",
        apply: ambiguous_terminals,
    },
    Rule {
        name: "series_family",
        apply: series_family,
    },
];

fn explicit_connection(columns: &Columns<'_>) -> Option<String> {
    columns
        .text(Column::ConnectionType)
        .map(|value| value.to_ascii_lowercase())
}

fn match_series(groups: &[(&[&str], ConnectorType)], series: &str) -> Option<ConnectorType> {
    let series = series.to_ascii_lowercase();
    groups
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| series.contains(keyword)))
        .map(|(_, connector)| *connector)
}

fn explicit_lookup(columns: &Columns<'_>, _series: &str) -> Option<ConnectorType> {
    let value = explicit_connection(columns)?;
    CONNECTION_LOOKUP
        .iter()
        .find(|(known, _)| *known == value)
        .map(|(_, connector)| *connector)
}

fn ambiguous_terminals(columns: &Columns<'_>, series: &str) -> Option<ConnectorType> {
    let value = explicit_connection(columns)?;
    if !AMBIGUOUS_CONNECTIONS.contains(&value.as_str()) {
        return None;
    }
    match_series(TERMINAL_SERIES_GROUPS, series)
}

fn series_family(columns: &Columns<'_>, series: &str) -> Option<ConnectorType> {
    if explicit_connection(columns).is_some() {
        return None;
    }
    match_series(SERIES_FAMILY_GROUPS, series)
}

/// Literal IP codes that are rewritten; everything else passes through.
pub const IP_REWRITES: &[(&str, &str)] = &[("IPXX", "IP20"), ("IPX8", "IP68")];

/// Rating used when a row carries no IP code.
pub const DEFAULT_IP: &str = "IP20";

pub const GUARD_LEVELS_WITH_SHIELD: &[&str] = &["full", "standard"];

pub const MULTI_STAGE_MARKERS: &[&str] = &["2 stage", "3 stage"];

/// Sub-tags implied by the generic `industrial` application.
pub const INDUSTRIAL_SUBTAGS: &[&str] = &[
    "manufacturing",
    "construction",
    "utilities",
    "agriculture",
    "defense",
];

pub const DEFAULT_APPLICATION: &str = "general";
