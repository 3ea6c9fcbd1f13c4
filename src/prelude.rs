//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the pedalfinder
//! crate, so a front end can drive a full wizard session with one import.
//!
//! # Example
//!
//! ```rust,no_run
//! use pedalfinder::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let products = pedalfinder::catalog::fallback::bundled()?;
//! let mut wizard = Wizard::new(products);
//! wizard.restore_from_share("a=printing&t=electrical&ac=momentary")?;
//!
//! let projector = ResultProjector::new(ProjectionOptions {
//!     dedupe_series: true,
//!     sort: SortOrder::Duty,
//!     ..Default::default()
//! });
//! for product in wizard.project(&projector) {
//!     println!("{} ({})", product.series, product.id);
//! }
//! # Ok(())
//! # }
//! ```

// Session and navigation
pub use crate::flow::{ChoiceOption, Step, StepFlowController};
pub use crate::selection::{
    CircuitChoice, Environment, FeatureChoice, Flow, Guard, MedicalPath, SelectionState,
};
pub use crate::wizard::Wizard;

// Catalog data
pub use crate::catalog::{
    CatalogLoader, CatalogOrigin, CatalogSource, DEFAULT_FETCH_TIMEOUT, JsonRowsFile,
    LoadedCatalog, StaticRows,
};
pub use crate::normalize::{RawRow, normalize, normalize_all};
pub use crate::product::{Action, ConnectorType, Duty, Feature, IpRating, Product, Technology};

// Filtering and display
pub use crate::filter::{FilterEngine, RelaxedDimension, SearchOutcome};
pub use crate::projector::{CordFilter, ProjectionOptions, ResultProjector, SortOrder};

// Configuration
pub use crate::config::WizardConfig;

// Error types
pub use crate::error::{
    CatalogError, ConfigError, ImportError, ShareCodecError, SnapshotError, WizardError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
