use crate::product::Product;
use crate::selection::{Dimension, SelectionState};
use std::fmt;

/// The constraint dropped to recover a non-empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelaxedDimension {
    Features,
    Guard,
    Duty,
    Environment,
    Action,
    Technology,
    /// Everything except the application was dropped.
    All,
}

impl RelaxedDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelaxedDimension::Features => "features",
            RelaxedDimension::Guard => "guard",
            RelaxedDimension::Duty => "duty",
            RelaxedDimension::Environment => "environment",
            RelaxedDimension::Action => "action",
            RelaxedDimension::Technology => "technology",
            RelaxedDimension::All => "all",
        }
    }

    /// The selection dimension this tag clears, `None` for `All`.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            RelaxedDimension::Features => Some(Dimension::Features),
            RelaxedDimension::Guard => Some(Dimension::Guard),
            RelaxedDimension::Duty => Some(Dimension::Duty),
            RelaxedDimension::Environment => Some(Dimension::Environment),
            RelaxedDimension::Action => Some(Dimension::Action),
            RelaxedDimension::Technology => Some(Dimension::Technology),
            RelaxedDimension::All => None,
        }
    }
}

impl fmt::Display for RelaxedDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-dimension drops tried in order before falling back to `All`.
pub const RELAXATION_ORDER: [RelaxedDimension; 6] = [
    RelaxedDimension::Features,
    RelaxedDimension::Guard,
    RelaxedDimension::Duty,
    RelaxedDimension::Environment,
    RelaxedDimension::Action,
    RelaxedDimension::Technology,
];

/// A widened product set and the dimension dropped to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationResult<'a> {
    pub products: Vec<&'a Product>,
    pub dropped: RelaxedDimension,
}

impl RelaxationResult<'_> {
    /// Nothing matched even with only the application kept.
    pub fn is_exhausted(&self) -> bool {
        self.products.is_empty()
    }
}

/// Each candidate state in search order, paired with its tag.
///
/// Every candidate drops exactly one answer from `state`; the final one keeps
/// only the application. Unset dimensions are skipped since dropping them is
/// a no-op.
pub(super) fn candidates(state: &SelectionState) -> Vec<(RelaxedDimension, SelectionState)> {
    let mut candidates: Vec<(RelaxedDimension, SelectionState)> = RELAXATION_ORDER
        .iter()
        .filter_map(|relaxed| {
            let dimension = relaxed.dimension()?;
            state
                .is_set(dimension)
                .then(|| (*relaxed, state.without(dimension)))
        })
        .collect();

    let application_only = SelectionState::for_flow(state.flow)
        .with_application(state.application.clone())
        .at_step(state.step);
    candidates.push((RelaxedDimension::All, application_only));
    candidates
}
