use crate::error::CatalogError;
use crate::product::Product;
use std::fs;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../../data/fallback_catalog.json");

/// Origin label reported when the bundled dataset fails to decode.
pub const BUNDLED_ORIGIN: &str = "bundled";

/// The dataset shipped with the crate. Already in canonical form, so it
/// bypasses normalization and keeps its flagship flags as written.
pub fn bundled() -> Result<Vec<Product>, CatalogError> {
    decode(BUNDLED_CATALOG, BUNDLED_ORIGIN)
}

/// Reads a replacement fallback dataset in the same canonical JSON form.
pub fn from_path(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let origin = path.display().to_string();
    let json = fs::read_to_string(path).map_err(|e| CatalogError::FallbackDecode {
        origin: origin.clone(),
        message: e.to_string(),
    })?;
    decode(&json, &origin)
}

fn decode(json: &str, origin: &str) -> Result<Vec<Product>, CatalogError> {
    serde_json::from_str(json).map_err(|e| CatalogError::FallbackDecode {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    #[test]
    fn bundled_catalog_decodes() {
        let products = bundled().unwrap();
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| !p.id.is_empty()));
    }

    #[test]
    fn bundled_catalog_has_one_flagship_per_series() {
        let products = bundled().unwrap();
        let mut flagships: AHashMap<&str, usize> = AHashMap::new();
        for product in &products {
            let count = flagships.entry(product.series.as_str()).or_default();
            if product.flagship {
                *count += 1;
            }
        }
        assert!(flagships.values().all(|&count| count == 1), "{flagships:?}");
    }

    #[test]
    fn wiring_free_technologies_carry_no_connector() {
        let products = bundled().unwrap();
        assert!(
            products
                .iter()
                .filter(|p| p.technology.skips_wiring())
                .all(|p| p.connector_type.is_none())
        );
    }

    #[test]
    fn unreadable_path_reports_origin() {
        let err = from_path(Path::new("/nonexistent/fallback.json")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::FallbackDecode { origin, .. } if origin.contains("nonexistent")
        ));
    }
}
