//! # Pedalfinder - Foot Switch Selection Wizard Core
//!
//! **Pedalfinder** is the decision core behind a guided foot switch selector.
//! It turns an inconsistently formatted vendor catalog into canonical
//! products, walks a user through a short questionnaire, and keeps the
//! catalog filtered against every answer so the screen can show how many
//! products each option would leave.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Catalog**: A [`catalog::CatalogLoader`] fetches raw rows from any
//!     [`catalog::CatalogSource`], bounded by a timeout, and falls back to a bundled
//!     dataset when the source fails. CSV exports go through [`import`].
//! 2.  **Normalize**: [`normalize::normalize`] maps every raw row onto a [`product::Product`]
//!     through alias and rule tables. It never panics and is deterministic.
//! 3.  **Ask**: A [`wizard::Wizard`] records answers in an immutable
//!     [`selection::SelectionState`]. Changing an answer clears everything downstream,
//!     and the [`flow::StepFlowController`] derives next, back, display index and total
//!     from one list of visible steps.
//! 4.  **Filter and Project**: The [`filter::FilterEngine`] returns exact matches or a
//!     relaxed result naming the dropped constraint. The [`projector::ResultProjector`]
//!     applies search, facets, series de-duplication and sorting for display.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pedalfinder::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let loader = CatalogLoader::new(DEFAULT_FETCH_TIMEOUT)?;
//! let catalog = loader.load(&JsonRowsFile::new("data/rows.json")).await?;
//! if let Some(warning) = catalog.warning() {
//!     println!("{warning}");
//! }
//!
//! let mut wizard = Wizard::from_catalog(catalog);
//! wizard.choose_category("industrial");
//! wizard.choose_application("manufacturing");
//! wizard.choose_technology(Technology::Electrical);
//! for (option, count) in wizard.candidate_counts() {
//!     println!("{option}: {count} products");
//! }
//! wizard.choose_action(Action::Momentary);
//!
//! match wizard.outcome() {
//!     SearchOutcome::Exact(products) => println!("{} matches", products.len()),
//!     SearchOutcome::Relaxed(result) => {
//!         println!("Closest matches without {}: {}", result.dropped, result.products.len())
//!     }
//!     SearchOutcome::Exhausted(_) => println!("Contact us for a custom build"),
//! }
//! println!("Share: ?{}", wizard.share_link());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod flow;
pub mod import;
pub mod logging;
pub mod normalize;
pub mod prelude;
pub mod product;
pub mod projector;
pub mod selection;
pub mod share;
pub mod snapshot;
pub mod wizard;
