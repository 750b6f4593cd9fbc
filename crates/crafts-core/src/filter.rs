use std::cmp::Ordering;

use crate::model::{FilterState, Product, SortKey};

/// Run the shop pipeline: category filter, then search filter, then sort.
///
/// Pure and deterministic: the input slice is never touched and the sort is
/// stable, so equal keys keep their incoming order. An empty result is a
/// normal outcome, not an error.
pub fn apply(products: &[Product], state: &FilterState) -> Vec<Product> {
    let term = state.search.to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| state.category.matches(&p.category))
        .filter(|p| term.is_empty() || matches_search(p, &term))
        .cloned()
        .collect();

    sort_products(&mut result, state.sort);
    result
}

/// Case-insensitive substring match over title, description and category.
/// `term` must already be lower-cased.
fn matches_search(product: &Product, term: &str) -> bool {
    product.title.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
        || product.category.to_lowercase().contains(term)
}

fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Default => products.sort_by_key(|p| p.id),
        SortKey::PriceAscending => products.sort_by(|a, b| cmp_f64(a.price, b.price)),
        SortKey::PriceDescending => products.sort_by(|a, b| cmp_f64(b.price, a.price)),
        SortKey::RatingDescending => products.sort_by(|a, b| cmp_f64(b.rating, a.rating)),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Category name as shown in the sidebar: first character upper-cased.
pub fn display_category(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryFilter;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(3, "Boxing Gloves", "sports-accessories", 45.0)
                .with_description("Padded gloves with a ring tone bell")
                .with_rating(4.1),
            Product::new(1, "Gold Ring", "jewelry", 120.0)
                .with_description("Handmade 18k band")
                .with_rating(4.9),
            Product::new(4, "Oak Table", "furniture", 300.0)
                .with_description("Solid oak")
                .with_rating(3.2),
            Product::new(2, "Silver Necklace", "jewelry", 45.0)
                .with_description("Sterling chain")
                .with_rating(4.5),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_sorts_by_id() {
        let out = apply(&catalog(), &FilterState::default());
        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let state = FilterState::default().with_category("jewelry");
        assert_eq!(ids(&apply(&catalog(), &state)), vec![1, 2]);

        let state = FilterState::default().with_category("Jewelry");
        assert!(apply(&catalog(), &state).is_empty());
    }

    #[test]
    fn test_unknown_category_yields_empty() {
        let state = FilterState {
            category: CategoryFilter::Named("groceries".into()),
            ..Default::default()
        };
        assert!(apply(&catalog(), &state).is_empty());
    }

    #[test]
    fn test_search_matches_any_field() {
        // "ring" hits the title of the Gold Ring and the description of the gloves.
        let state = FilterState::default().with_search("ring");
        assert_eq!(ids(&apply(&catalog(), &state)), vec![1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_covers_category() {
        let state = FilterState::default().with_search("FURNI");
        assert_eq!(ids(&apply(&catalog(), &state)), vec![4]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let state = FilterState::default()
            .with_category("jewelry")
            .with_search("ring");
        assert_eq!(ids(&apply(&catalog(), &state)), vec![1]);
    }

    #[test]
    fn test_price_ascending_is_stable() {
        let state = FilterState::default().with_sort(SortKey::PriceAscending);
        // Gloves (3) and necklace (2) tie at 45.0 and keep input order.
        assert_eq!(ids(&apply(&catalog(), &state)), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_price_orders_reverse_for_distinct_prices() {
        let products = catalog();
        let asc = apply(&products, &FilterState::default().with_sort(SortKey::PriceAscending));
        let desc = apply(&products, &FilterState::default().with_sort(SortKey::PriceDescending));

        let distinct = |v: &[Product]| {
            let mut prices: Vec<f64> = v.iter().map(|p| p.price).collect();
            prices.dedup();
            prices
        };
        let mut reversed = distinct(&desc);
        reversed.reverse();
        assert_eq!(distinct(&asc), reversed);
    }

    #[test]
    fn test_rating_descending() {
        let state = FilterState::default().with_sort(SortKey::RatingDescending);
        assert_eq!(ids(&apply(&catalog(), &state)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_apply_is_pure() {
        let products = catalog();
        let before = products.clone();
        let state = FilterState::default()
            .with_search("o")
            .with_sort(SortKey::PriceDescending);
        let first = apply(&products, &state);
        let second = apply(&products, &state);
        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn test_empty_input() {
        assert!(apply(&[], &FilterState::default()).is_empty());
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("home-decoration"), "Home-decoration");
        assert_eq!(display_category(""), "");
        assert_eq!(display_category("épicerie"), "Épicerie");
    }
}
