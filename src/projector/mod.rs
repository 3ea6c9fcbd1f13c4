//! Display-local refinement of a result set: search, facets, series
//! de-duplication and ordering.

use crate::product::{Duty, Product};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Input order, unchanged.
    #[default]
    Relevance,
    /// Heavy to light.
    Duty,
    /// Highest protection first, unrated last.
    Ip,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relevance" => Some(SortOrder::Relevance),
            "duty" => Some(SortOrder::Duty),
            "ip" => Some(SortOrder::Ip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CordFilter {
    Corded,
    Cordless,
}

/// Refinements layered over the wizard's result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Case-insensitive substring over series, description and part number.
    pub query: String,
    /// Empty means any duty.
    pub duties: Vec<Duty>,
    pub cord: Option<CordFilter>,
    /// Empty means any material.
    pub materials: Vec<String>,
    pub dedupe_series: bool,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Default)]
pub struct ResultProjector {
    options: ProjectionOptions,
}

impl ResultProjector {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Copy with `material` added to the material facet.
    pub fn with_material(&self, material: &str) -> Self {
        let mut options = self.options.clone();
        if !options
            .materials
            .iter()
            .any(|m| m.eq_ignore_ascii_case(material))
        {
            options.materials.push(material.to_string());
        }
        Self { options }
    }

    /// Applies search, facets, de-duplication and sort, in that order.
    pub fn project<'a>(&self, products: &[&'a Product]) -> Vec<&'a Product> {
        let query = self.options.query.trim().to_lowercase();
        let filtered: Vec<&'a Product> = products
            .iter()
            .copied()
            .filter(|p| query.is_empty() || matches_query(p, &query))
            .filter(|p| {
                self.options.duties.is_empty()
                    || p.duty.is_some_and(|d| self.options.duties.contains(&d))
            })
            .filter(|p| match self.options.cord {
                Some(CordFilter::Corded) => p.is_corded(),
                Some(CordFilter::Cordless) => !p.is_corded(),
                None => true,
            })
            .filter(|p| self.matches_material(p))
            .collect();

        let deduped = if self.options.dedupe_series {
            dedupe_series(&filtered)
        } else {
            filtered
        };
        sort_products(deduped, self.options.sort)
    }

    fn matches_material(&self, product: &Product) -> bool {
        if self.options.materials.is_empty() {
            return true;
        }
        product.material.as_ref().is_some_and(|material| {
            self.options
                .materials
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(material))
        })
    }
}

fn matches_query(product: &Product, query: &str) -> bool {
    std::iter::once(Some(product.series.as_str()))
        .chain([product.description.as_deref(), product.part_number.as_deref()])
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
}

/// One representative per series, kept at the position where the series
/// first appeared.
///
/// Preference: flagship, then most features, then first encountered.
pub fn dedupe_series<'a>(products: &[&'a Product]) -> Vec<&'a Product> {
    let mut slots: AHashMap<&str, usize> = AHashMap::new();
    let mut kept: Vec<&'a Product> = Vec::new();

    for product in products.iter().copied() {
        match slots.get(product.series.as_str()) {
            Some(&slot) => {
                let current = kept[slot];
                let preference = |p: &Product| (p.flagship, p.features.len());
                if preference(product) > preference(current) {
                    kept[slot] = product;
                }
            }
            None => {
                slots.insert(product.series.as_str(), kept.len());
                kept.push(product);
            }
        }
    }
    kept
}

/// Stable sort by the requested order.
pub fn sort_products(products: Vec<&Product>, order: SortOrder) -> Vec<&Product> {
    match order {
        SortOrder::Relevance => products,
        SortOrder::Duty => products
            .into_iter()
            .sorted_by_key(|p| Reverse(p.duty_rank()))
            .collect(),
        SortOrder::Ip => products
            .into_iter()
            .sorted_by_key(|p| (p.ip.is_unrated(), Reverse(p.ip.rank())))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ConnectorType, Feature, IpRating, Technology};

    fn product(id: &str, series: &str) -> Product {
        Product {
            id: id.into(),
            series: series.into(),
            part_number: Some(format!("PN-{id}")),
            description: None,
            technology: Technology::Electrical,
            duty: Some(Duty::Medium),
            ip: IpRating::new("IP20"),
            actions: Default::default(),
            applications: Default::default(),
            features: Default::default(),
            connector_type: None,
            material: None,
            circuit_count: None,
            flagship: false,
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn search_covers_series_description_and_part_number() {
        let mut a = product("a", "Hercules");
        a.description = Some("Guarded washdown pedal".into());
        let b = product("b", "Compact");
        let all = vec![&a, &b];

        let search = |query: &str| {
            let projector = ResultProjector::new(ProjectionOptions {
                query: query.into(),
                ..Default::default()
            });
            ids(&projector.project(&all))
        };
        assert_eq!(search("hERC"), vec!["a"]);
        assert_eq!(search("washdown"), vec!["a"]);
        assert_eq!(search("pn-b"), vec!["b"]);
        assert_eq!(search("  "), vec!["a", "b"]);
    }

    #[test]
    fn facets_combine() {
        let mut a = product("a", "A");
        a.connector_type = Some(ConnectorType::PreWired);
        a.material = Some("Cast Aluminum".into());
        let mut b = product("b", "B");
        b.duty = Some(Duty::Heavy);
        b.material = Some("Steel".into());
        let all = vec![&a, &b];

        let corded = ResultProjector::new(ProjectionOptions {
            cord: Some(CordFilter::Corded),
            ..Default::default()
        });
        assert_eq!(ids(&corded.project(&all)), vec!["a"]);

        let heavy_steel = ResultProjector::new(ProjectionOptions {
            duties: vec![Duty::Heavy],
            materials: vec!["steel".into()],
            ..Default::default()
        });
        assert_eq!(ids(&heavy_steel.project(&all)), vec!["b"]);
    }

    #[test]
    fn dedupe_prefers_flagship_over_feature_count() {
        let mut flagship = product("flag", "X");
        flagship.flagship = true;
        let mut loaded = product("loaded", "X");
        loaded.features = [Feature::Shield, Feature::Twin].into_iter().collect();
        let other = product("y", "Y");

        let kept = dedupe_series(&[&loaded, &other, &flagship]);
        assert_eq!(ids(&kept), vec!["flag", "y"]);
    }

    #[test]
    fn dedupe_falls_back_to_features_then_first() {
        let plain = product("plain", "X");
        let mut shielded = product("shielded", "X");
        shielded.features.insert(Feature::Shield);
        let mut twin = product("twin", "X");
        twin.features.insert(Feature::Twin);

        assert_eq!(ids(&dedupe_series(&[&plain, &shielded, &twin])), vec!["shielded"]);
    }

    #[test]
    fn ip_sort_puts_unrated_last() {
        let mut a = product("a", "A");
        a.ip = IpRating::new("IPXX");
        let mut b = product("b", "B");
        b.ip = IpRating::new("IP56");
        let mut c = product("c", "C");
        c.ip = IpRating::new("IP68");
        let d = product("d", "D");

        let sorted = sort_products(vec![&a, &b, &c, &d], SortOrder::Ip);
        assert_eq!(ids(&sorted), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn duty_sort_is_stable() {
        let a = product("a", "A");
        let mut b = product("b", "B");
        b.duty = Some(Duty::Heavy);
        let c = product("c", "C");
        let mut d = product("d", "D");
        d.duty = Some(Duty::Light);

        let sorted = sort_products(vec![&a, &b, &c, &d], SortOrder::Duty);
        assert_eq!(ids(&sorted), vec!["b", "a", "c", "d"]);
        let unsorted = sort_products(vec![&d, &a], SortOrder::Relevance);
        assert_eq!(ids(&unsorted), vec!["d", "a"]);
    }
}
