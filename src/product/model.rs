use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How the switch signals its actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technology {
    Electrical,
    Pneumatic,
    Wireless,
}

impl Technology {
    pub const ALL: [Technology; 3] = [
        Technology::Electrical,
        Technology::Pneumatic,
        Technology::Wireless,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Technology::Electrical => "electrical",
            Technology::Pneumatic => "pneumatic",
            Technology::Wireless => "wireless",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Pneumatic and wireless switches are never wired to terminals, so the
    /// connection and circuit questions do not apply to them.
    pub fn skips_wiring(&self) -> bool {
        matches!(self, Technology::Pneumatic | Technology::Wireless)
    }
}

/// Duty class, ordered `Light < Medium < Heavy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duty {
    Light,
    Medium,
    Heavy,
}

impl Duty {
    pub const ALL: [Duty; 3] = [Duty::Light, Duty::Medium, Duty::Heavy];

    /// Ordinal rank: heavy(3) > medium(2) > light(1).
    pub fn rank(&self) -> u8 {
        match self {
            Duty::Light => 1,
            Duty::Medium => 2,
            Duty::Heavy => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Duty::Light => "light",
            Duty::Medium => "medium",
            Duty::Heavy => "heavy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Momentary,
    Maintained,
    Variable,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Momentary, Action::Maintained, Action::Variable];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Momentary => "momentary",
            Action::Maintained => "maintained",
            Action::Variable => "variable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

/// Optional capabilities carried by a catalog variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Shield,
    Twin,
    MultiStage,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Shield, Feature::Twin, Feature::MultiStage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Shield => "shield",
            Feature::Twin => "twin",
            Feature::MultiStage => "multi_stage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorType {
    ScrewTerminal,
    QuickConnect,
    PreWired,
}

impl ConnectorType {
    pub const ALL: [ConnectorType; 3] = [
        ConnectorType::ScrewTerminal,
        ConnectorType::QuickConnect,
        ConnectorType::PreWired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorType::ScrewTerminal => "screw_terminal",
            ConnectorType::QuickConnect => "quick_connect",
            ConnectorType::PreWired => "pre_wired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Ingress protection code such as `IP68`. `IPXX` marks an unrated enclosure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpRating(String);

impl IpRating {
    pub const UNRATED: &'static str = "IPXX";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unrated(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::UNRATED)
    }

    /// Numeric rating with `X` digits read as zero. Unrated and unparsable
    /// codes rank lowest.
    pub fn rank(&self) -> u8 {
        if self.is_unrated() {
            return 0;
        }
        let digits = match self.0.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("IP") => &self.0[2..],
            _ => return 0,
        };
        let mut rank = 0u8;
        for c in digits.chars().take(2) {
            let digit = match c {
                'x' | 'X' => 0,
                d => match d.to_digit(10) {
                    Some(v) => v as u8,
                    None => return 0,
                },
            };
            rank = rank * 10 + digit;
        }
        rank
    }

    pub fn is(&self, code: &str) -> bool {
        self.0.eq_ignore_ascii_case(code)
    }
}

impl fmt::Display for IpRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog variant in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub series: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub technology: Technology,
    #[serde(default)]
    pub duty: Option<Duty>,
    pub ip: IpRating,
    #[serde(default)]
    pub actions: BTreeSet<Action>,
    #[serde(default)]
    pub applications: BTreeSet<String>,
    #[serde(default)]
    pub features: BTreeSet<Feature>,
    #[serde(default)]
    pub connector_type: Option<ConnectorType>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub circuit_count: Option<u8>,
    #[serde(default)]
    pub flagship: bool,
}

impl Product {
    pub fn duty_rank(&self) -> u8 {
        self.duty.map(|d| d.rank()).unwrap_or(0)
    }

    /// Score used to elect the flagship of a series.
    pub fn flagship_score(&self) -> (u8, u8, usize) {
        (self.duty_rank(), self.ip.rank(), self.features.len())
    }

    /// A pre-wired connector means the switch ships with a cord.
    pub fn is_corded(&self) -> bool {
        matches!(self.connector_type, Some(ConnectorType::PreWired))
    }
}
