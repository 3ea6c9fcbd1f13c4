//! Cascading catalog filter, one-step lookahead counts and relaxation search.

use crate::flow::{self, MEDICAL_APPLICATION, Step};
use crate::product::Product;
use crate::selection::SelectionState;
use tracing::debug;

mod predicates;
mod relax;

pub use predicates::{FILTER_DIMENSIONS, dimension_matches, matches};
pub use relax::{RELAXATION_ORDER, RelaxationResult, RelaxedDimension};

/// What the results screen should show for a state.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// The exact answer combination matched these products.
    Exact(Vec<&'a Product>),
    /// Nothing matched exactly; one dropped dimension recovered results.
    Relaxed(RelaxationResult<'a>),
    /// Not even the application alone matches. The caller should offer a
    /// sales contact or custom build instead of results.
    Exhausted(RelaxationResult<'a>),
}

impl<'a> SearchOutcome<'a> {
    pub fn products(&self) -> &[&'a Product] {
        match self {
            SearchOutcome::Exact(products) => products,
            SearchOutcome::Relaxed(result) | SearchOutcome::Exhausted(result) => &result.products,
        }
    }

    pub fn relaxed_dimension(&self) -> Option<RelaxedDimension> {
        match self {
            SearchOutcome::Exact(_) => None,
            SearchOutcome::Relaxed(result) | SearchOutcome::Exhausted(result) => {
                Some(result.dropped)
            }
        }
    }
}

/// Evaluates selection states against a borrowed catalog.
///
/// All operations are pure derivations of `(catalog, state)` and cheap enough
/// to recompute on every answer.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'a> {
    products: &'a [Product],
}

impl<'a> FilterEngine<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &'a [Product] {
        self.products
    }

    /// Products matching every answer in `state`, in catalog order.
    pub fn filter(&self, state: &SelectionState) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|product| matches(product, state))
            .collect()
    }

    pub fn count(&self, state: &SelectionState) -> usize {
        self.products
            .iter()
            .filter(|product| matches(product, state))
            .count()
    }

    /// Number of products left if `option_id` were chosen at `step`, given
    /// only the answers upstream of that step.
    ///
    /// Returns `None` for the results step and for ids the step does not know.
    pub fn candidate_count(
        &self,
        state: &SelectionState,
        step: Step,
        option_id: &str,
    ) -> Option<usize> {
        if step == Step::Application && flow::options::category(option_id).is_some() {
            return self.category_count(option_id);
        }
        let dimension = step.dimension()?;
        let base = state.upstream_of(dimension);
        let candidate = flow::apply_answer(base, step, option_id)?;
        Some(self.count(&candidate))
    }

    /// Candidate counts for every available option of `step`.
    pub fn candidate_counts(
        &self,
        state: &SelectionState,
        step: Step,
    ) -> Vec<(&'static str, usize)> {
        flow::available_options(step, state)
            .into_iter()
            .filter_map(|option| {
                self.candidate_count(state, step, option.id)
                    .map(|count| (option.id, count))
            })
            .collect()
    }

    /// Products tagged with any application of a top-level category.
    fn category_count(&self, category_id: &str) -> Option<usize> {
        let category = flow::options::category(category_id)?;
        let count = self
            .products
            .iter()
            .filter(|product| {
                if category.medical {
                    product.applications.contains(MEDICAL_APPLICATION)
                } else {
                    category
                        .applications
                        .iter()
                        .any(|application| product.applications.contains(application.id))
                }
            })
            .count();
        Some(count)
    }

    /// Drops one constraint at a time in [`RELAXATION_ORDER`] and returns the
    /// first non-empty result, falling back to application-only.
    ///
    /// Intended for states whose exact filter is empty.
    pub fn relax(&self, state: &SelectionState) -> RelaxationResult<'a> {
        let mut last = None;
        for (dropped, candidate) in relax::candidates(state) {
            let products = self.filter(&candidate);
            if !products.is_empty() {
                debug!(dropped = %dropped, count = products.len(), "relaxation recovered results");
                return RelaxationResult { products, dropped };
            }
            last = Some(RelaxationResult { products, dropped });
        }
        debug!("relaxation exhausted");
        last.unwrap_or(RelaxationResult {
            products: Vec::new(),
            dropped: RelaxedDimension::All,
        })
    }

    /// Exact matches, or the relaxation outcome when there are none.
    pub fn resolve(&self, state: &SelectionState) -> SearchOutcome<'a> {
        let exact = self.filter(state);
        if !exact.is_empty() {
            return SearchOutcome::Exact(exact);
        }
        let relaxed = self.relax(state);
        if relaxed.is_exhausted() {
            SearchOutcome::Exhausted(relaxed)
        } else {
            SearchOutcome::Relaxed(relaxed)
        }
    }
}
