use super::Product;
use ahash::AHashMap;

/// Marks exactly one variant per series as flagship.
///
/// The winner is the variant with the highest `(duty rank, ip rank, feature
/// count)`; on a tie the first one encountered keeps the title. Any flags set
/// beforehand are discarded so the invariant holds after every call.
pub fn assign_flagships(products: &mut [Product]) {
    let mut best: AHashMap<String, usize> = AHashMap::new();

    for (index, product) in products.iter().enumerate() {
        match best.get(&product.series) {
            Some(&current) if products[current].flagship_score() >= product.flagship_score() => {}
            _ => {
                best.insert(product.series.clone(), index);
            }
        }
    }

    for (index, product) in products.iter_mut().enumerate() {
        product.flagship = best.get(&product.series) == Some(&index);
    }
}
