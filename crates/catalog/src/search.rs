//! Case-insensitive product search.

use crate::product::Product;

/// A search box query, lowercased once and matched against name and
/// description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The query as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Substring match over name or description. An empty query matches all.
    pub fn matches(&self, product: &Product) -> bool {
        product.name.to_lowercase().contains(&self.needle)
            || product.description().to_lowercase().contains(&self.needle)
    }

    /// Products matching the query, in their original order.
    pub fn filter<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;
    use shopfront_core::ProductId;

    fn product(id: i64, name: &str, description: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.map(str::to_string),
            price: Price::from_cents(100),
            stock: 5,
        }
    }

    #[test]
    fn pen_example() {
        let products = vec![product(1, "Pen", None)];

        assert_eq!(SearchQuery::new("pen").filter(&products).len(), 1);
        assert!(SearchQuery::new("eraser").filter(&products).is_empty());
    }

    #[test]
    fn matches_description_case_insensitively() {
        let products = vec![
            product(1, "Pen", Some("Smooth BLUE ink")),
            product(2, "Pencil", Some("Graphite")),
        ];

        let hits = SearchQuery::new("blue").filter(&products);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProductId::new(1));
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let products = vec![product(2, "B", None), product(1, "A", None)];
        let ids: Vec<_> = SearchQuery::default()
            .filter(&products)
            .into_iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a product is a hit exactly when its name or description
            /// contains the query, ignoring case.
            #[test]
            fn filter_is_sound_and_complete(
                rows in proptest::collection::vec(
                    ("[A-Za-z ]{0,12}", proptest::option::of("[A-Za-z ]{0,16}")),
                    0..12,
                ),
                query in "[A-Za-z]{0,3}"
            ) {
                let products: Vec<Product> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, (name, description))| product(i as i64, name, description.as_deref()))
                    .collect();

                let search = SearchQuery::new(query.clone());
                let hits = search.filter(&products);
                let needle = query.to_lowercase();
                let contains = |p: &Product| {
                    p.name.to_lowercase().contains(&needle)
                        || p.description().to_lowercase().contains(&needle)
                };

                for hit in &hits {
                    prop_assert!(contains(*hit));
                }
                let expected = products.iter().filter(|p| contains(*p)).count();
                prop_assert_eq!(hits.len(), expected);
            }
        }
    }
}
