//! Catalog loading with a bounded wait and a bundled fallback.
//!
//! A [`CatalogLoader`] asks a [`CatalogSource`] for raw rows, normalizes
//! what comes back and falls back to a canonical dataset when the source
//! fails, stalls past the timeout or answers with nothing. Starting a new
//! load cancels the one still in flight.

use crate::config::WizardConfig;
use crate::error::CatalogError;
use crate::normalize::{RawRow, normalize_all};
use crate::product::Product;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub mod fallback;

/// Default bound on a single catalog fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Anything that can produce raw catalog rows.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short label used in logs and in [`CatalogOrigin::Live`].
    fn name(&self) -> &str;

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, CatalogError>;
}

/// Rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRows {
    rows: Vec<RawRow>,
}

impl StaticRows {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl CatalogSource for StaticRows {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, CatalogError> {
        Ok(self.rows.clone())
    }
}

/// A JSON file holding an array of raw rows.
#[derive(Debug, Clone)]
pub struct JsonRowsFile {
    path: PathBuf,
    label: String,
}

impl JsonRowsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonRowsFile {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, CatalogError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Source(format!("{}: {}", self.label, e)))?;
        serde_json::from_str(&json)
            .map_err(|e| CatalogError::Source(format!("{}: {}", self.label, e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    Live { source: String },
    /// The fallback dataset was served; `reason` is why the source was not.
    Fallback { reason: CatalogError },
}

/// Products ready for the filter engine plus where they came from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub products: Vec<Product>,
    pub origin: CatalogOrigin,
}

impl LoadedCatalog {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, CatalogOrigin::Fallback { .. })
    }

    /// Soft warning for the UI when the fallback dataset is in use.
    pub fn warning(&self) -> Option<String> {
        match &self.origin {
            CatalogOrigin::Live { .. } => None,
            CatalogOrigin::Fallback { reason } => {
                Some(format!("Showing the offline catalog: {reason}"))
            }
        }
    }
}

#[derive(Debug)]
pub struct CatalogLoader {
    timeout: Duration,
    fallback: Vec<Product>,
    session: Mutex<CancellationToken>,
}

impl CatalogLoader {
    /// Loader backed by the bundled fallback dataset.
    pub fn new(timeout: Duration) -> Result<Self, CatalogError> {
        Ok(Self::with_fallback(timeout, fallback::bundled()?))
    }

    /// Loader honoring the configured timeout and fallback override.
    pub fn from_config(config: &WizardConfig) -> Result<Self, CatalogError> {
        let fallback = match &config.fallback_path {
            Some(path) => fallback::from_path(path)?,
            None => fallback::bundled()?,
        };
        Ok(Self::with_fallback(config.fetch_timeout(), fallback))
    }

    pub fn with_fallback(timeout: Duration, fallback: Vec<Product>) -> Self {
        Self {
            timeout,
            fallback,
            session: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fallback_products(&self) -> &[Product] {
        &self.fallback
    }

    /// Cancels the in-flight load, if any, and hands out the token for a new one.
    pub fn begin_session(&self) -> CancellationToken {
        let mut current = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    /// Cancels the in-flight load without starting another.
    pub fn cancel(&self) {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    /// Starts a new session and loads the catalog within it.
    pub async fn load(&self, source: &dyn CatalogSource) -> Result<LoadedCatalog, CatalogError> {
        let token = self.begin_session();
        self.load_with(source, token).await
    }

    /// Loads the catalog, serving the fallback on any failure.
    ///
    /// Fails only with [`CatalogError::Cancelled`], when `cancel` fires
    /// before the source answers.
    pub async fn load_with(
        &self,
        source: &dyn CatalogSource,
        cancel: CancellationToken,
    ) -> Result<LoadedCatalog, CatalogError> {
        debug!(source = source.name(), timeout_secs = self.timeout.as_secs(), "fetching catalog");

        let fetched = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!(source = source.name(), "catalog load cancelled");
                return Err(CatalogError::Cancelled);
            }
            result = tokio::time::timeout(self.timeout, source.fetch_rows()) => match result {
                Ok(Ok(rows)) => Ok(rows),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(CatalogError::Timeout(self.timeout.as_secs())),
            },
        };

        // Rows without identity are skipped by the normalizer; none left is empty.
        let normalized = fetched.and_then(|rows| {
            let products = normalize_all(&rows);
            if products.is_empty() {
                Err(CatalogError::Empty)
            } else {
                Ok((rows.len(), products))
            }
        });

        match normalized {
            Ok((rows, products)) => {
                info!(
                    source = source.name(),
                    rows,
                    products = products.len(),
                    "catalog loaded"
                );
                Ok(LoadedCatalog {
                    products,
                    origin: CatalogOrigin::Live {
                        source: source.name().to_string(),
                    },
                })
            }
            Err(reason) => {
                warn!(
                    source = source.name(),
                    error = %reason,
                    "catalog unavailable, serving fallback"
                );
                Ok(LoadedCatalog {
                    products: self.fallback.clone(),
                    origin: CatalogOrigin::Fallback { reason },
                })
            }
        }
    }
}
