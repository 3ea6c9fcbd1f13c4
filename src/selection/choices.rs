use crate::product::{Feature, IpRating};
use serde::{Deserialize, Serialize};

/// Defines a wizard answer enum whose variants map one-to-one onto stable
/// string ids used by option tables and share links.
macro_rules! define_choices {
    ( $( $(#[$meta:meta])* $name:ident { $( $variant:ident => $id:literal ),* $(,)? } )* ) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(rename_all = "snake_case")]
            pub enum $name {
                $( $variant, )*
            }

            impl $name {
                pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

                pub fn as_str(&self) -> &'static str {
                    match self {
                        $( $name::$variant => $id, )*
                    }
                }

                pub fn parse(id: &str) -> Option<Self> {
                    match id {
                        $( $id => Some($name::$variant), )*
                        _ => None,
                    }
                }
            }
        )*
    };
}

define_choices! {
    /// Top-level wizard variant.
    Flow {
        Standard => "standard",
        Medical => "medical",
    }

    /// Operating environment, translated into an accepted IP range.
    Environment {
        Open => "open",
        Dry => "dry",
        Damp => "damp",
        Wet => "wet",
        NoPreference => "no_preference",
    }

    /// Whether a toe guard is required. `No` means "don't care".
    Guard {
        Yes => "yes",
        No => "no",
    }

    CircuitChoice {
        Single => "single",
        Double => "double",
        NoPreference => "no_preference",
    }

    /// Fork at the start of the medical sub-flow.
    MedicalPath {
        Stock => "stock",
        Custom => "custom",
    }

    /// Feature answers. The two custom entries request an out-of-catalog quote.
    FeatureChoice {
        Shield => "shield",
        Twin => "twin",
        MultiStage => "multi_stage",
        CustomCable => "custom_cable",
        CustomConnector => "custom_connector",
    }
}

impl Environment {
    /// IP codes acceptable for this environment.
    pub fn accepts(&self, ip: &IpRating) -> bool {
        match self {
            Environment::Open => ip.is_unrated(),
            Environment::Dry => ip.is_unrated() || ip.is("IP20"),
            Environment::Damp => ip.is("IP56") || ip.is("IP68"),
            Environment::Wet => ip.is("IP68"),
            Environment::NoPreference => true,
        }
    }
}

impl CircuitChoice {
    /// Required circuit count, `None` for no preference.
    pub fn count(&self) -> Option<u8> {
        match self {
            CircuitChoice::Single => Some(1),
            CircuitChoice::Double => Some(2),
            CircuitChoice::NoPreference => None,
        }
    }
}

impl FeatureChoice {
    /// The catalog feature this answer requires, if it is a catalog predicate.
    pub fn catalog_feature(&self) -> Option<Feature> {
        match self {
            FeatureChoice::Shield => Some(Feature::Shield),
            FeatureChoice::Twin => Some(Feature::Twin),
            FeatureChoice::MultiStage => Some(Feature::MultiStage),
            FeatureChoice::CustomCable | FeatureChoice::CustomConnector => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.catalog_feature().is_none()
    }
}

impl Default for Flow {
    fn default() -> Self {
        Flow::Standard
    }
}
