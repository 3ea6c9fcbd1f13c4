use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw catalog row exactly as the provider delivered it.
///
/// Column names are arbitrary; they are resolved through [`COLUMN_ALIASES`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(pub Map<String, Value>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.0.insert(column.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<Value>) {
        self.0.insert(column.to_string(), value.into());
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Canonical columns the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    PartNumber,
    Series,
    Description,
    Wireless,
    PneumaticFlow,
    OnOff,
    Linear,
    ConnectionType,
    Ip,
    Guard,
    Pedals,
    Stages,
    Applications,
    Duty,
    Material,
    Circuits,
}

/// Provider header spellings per canonical column, compared after folding
/// (lowercase, alphanumerics only).
pub const COLUMN_ALIASES: &[(Column, &[&str])] = &[
    (Column::Id, &["id", "sku", "variantid"]),
    (Column::PartNumber, &["partnumber", "partno", "pn", "part"]),
    (Column::Series, &["series", "seriesname", "family", "productseries"]),
    (Column::Description, &["description", "desc", "shortdescription"]),
    (Column::Wireless, &["wireless", "iswireless", "rf"]),
    (Column::PneumaticFlow, &["pneumaticflow", "airflow", "pneumatic", "air"]),
    (Column::OnOff, &["onoff", "onoffcode", "actiontype", "switchaction"]),
    (Column::Linear, &["linear", "variablespeed", "potentiometer"]),
    (Column::ConnectionType, &["connectiontype", "connection", "termination"]),
    (Column::Ip, &["ip", "iprating", "ingressprotection"]),
    (Column::Guard, &["guard", "guardlevel", "shieldlevel"]),
    (Column::Pedals, &["pedals", "pedalcount", "numberofpedals"]),
    (Column::Stages, &["stages", "stage", "stagedescriptor"]),
    (Column::Applications, &["applications", "application", "industries", "usecases"]),
    (Column::Duty, &["duty", "dutyrating", "dutyclass"]),
    (Column::Material, &["material", "housingmaterial", "housing"]),
    (Column::Circuits, &["circuits", "circuitcount", "numberofcircuits", "poles"]),
];

pub fn fold_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Alias-resolved view over a [`RawRow`].
pub struct Columns<'a> {
    values: AHashMap<Column, &'a Value>,
}

impl<'a> Columns<'a> {
    pub fn resolve(row: &'a RawRow) -> Self {
        let mut values = AHashMap::new();
        // serde_json::Map iterates in key order, so the first spelling wins
        // deterministically when a provider sends two aliases of one column.
        for (header, value) in &row.0 {
            let folded = fold_header(header);
            if let Some((column, _)) = COLUMN_ALIASES
                .iter()
                .find(|(_, aliases)| aliases.contains(&folded.as_str()))
            {
                if !value.is_null() {
                    values.entry(*column).or_insert(value);
                }
            }
        }
        Self { values }
    }

    pub fn raw(&self, column: Column) -> Option<&'a Value> {
        self.values.get(&column).copied()
    }

    /// Trimmed, non-empty text. Numbers are rendered as text.
    pub fn text(&self, column: Column) -> Option<String> {
        let text = match self.raw(column)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn flag(&self, column: Column) -> bool {
        match self.raw(column) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "y" | "yes" | "true" | "1" | "x"
            ),
            _ => false,
        }
    }

    pub fn number(&self, column: Column) -> Option<f64> {
        match self.raw(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// A list column, either a JSON array or a comma/semicolon separated string.
    pub fn list(&self, column: Column) -> Vec<String> {
        let items: Vec<String> = match self.raw(column) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) => s.split([',', ';']).map(str::to_string).collect(),
            _ => Vec::new(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}
