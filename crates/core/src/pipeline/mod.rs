//! Derivation of the displayed product list.
//!
//! [`derive`] turns the raw collection and the current [`ViewParameters`] into
//! the page the presentation layer shows. Stages run in a fixed order, each
//! consuming the previous stage's output:
//!
//! 1. category filter (case-insensitive exact match)
//! 2. title search (case-insensitive substring)
//! 3. stable sort by the selected key
//! 4. pagination, with the requested page clamped into range
//!
//! Categories offered by the selector come from the raw collection, not the
//! filtered one, so every category stays selectable whatever the filters are.
//!
//! Every function here is pure; nothing mutates the input collection.

mod collate;

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{PAGE_SIZE, Product, SortOption, ViewParameters};

pub use collate::compare_titles;

/// Output of the view pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    /// Products on the current page, at most [`PAGE_SIZE`].
    pub page_items: Vec<Product>,
    /// Page actually shown, clamped to `[1, max(1, total_pages)]`.
    pub current_page: usize,
    /// `ceil(qualifying / PAGE_SIZE)`; zero when nothing qualifies.
    pub total_pages: usize,
    /// Number of products surviving the category filter and search.
    pub qualifying_count: usize,
    /// Distinct categories of the raw collection, in first-seen order.
    pub available_categories: Vec<String>,
}

impl DerivedView {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Run the full pipeline over `raw` with `params`.
///
/// `params.current_page` is treated as a request; the page actually used is
/// reported in [`DerivedView::current_page`].
#[must_use]
pub fn derive(raw: &[Product], params: &ViewParameters) -> DerivedView {
    let by_category = filter_by_category(raw.iter(), &params.selected_category);
    let searched = filter_by_search(by_category, &params.search_term);
    let sorted = sort_products(searched, params.sort_option);

    let qualifying_count = sorted.len();
    let total_pages = total_pages(qualifying_count);
    let current_page = clamp_page(params.current_page, total_pages);
    let page_items = paginate(&sorted, current_page)
        .into_iter()
        .cloned()
        .collect();

    DerivedView {
        page_items,
        current_page,
        total_pages,
        qualifying_count,
        available_categories: available_categories(raw),
    }
}

/// Keep products whose category equals `category`, ignoring case.
///
/// An empty `category` keeps everything.
pub fn filter_by_category<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    category: &str,
) -> Vec<&'a Product> {
    if category.is_empty() {
        return products.into_iter().collect();
    }
    let wanted = category.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .collect()
}

/// Keep products whose title contains `term`, ignoring case.
///
/// Only the title is searched. An empty `term` keeps everything.
pub fn filter_by_search<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    term: &str,
) -> Vec<&'a Product> {
    if term.is_empty() {
        return products.into_iter().collect();
    }
    let needle = term.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by `option`. Equal keys keep their incoming order.
#[must_use]
pub fn sort_products(mut products: Vec<&Product>, option: SortOption) -> Vec<&Product> {
    match option {
        SortOption::None => {}
        SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::TitleAsc => products.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOption::TitleDesc => products.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
    products
}

/// Number of pages needed for `count` items.
#[must_use]
pub const fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
#[must_use]
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Slice out one page. `page` is one-based; out-of-range pages are empty.
#[must_use]
pub fn paginate<'a>(products: &[&'a Product], page: usize) -> Vec<&'a Product> {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    products
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .copied()
        .collect()
}

/// Distinct categories across `raw`, in first-seen order.
#[must_use]
pub fn available_categories(raw: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter(|p| seen.insert(p.category.as_str()))
        .map(|p| p.category.clone())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::ProductId;

    fn product(id: i64, title: &str, category: &str, price: i64) -> Product {
        Product::new(id, title, category, Decimal::from(price))
    }

    /// Seven products across categories A and B; three are in A.
    fn seven_products() -> Vec<Product> {
        vec![
            product(1, "Blue Shirt", "A", 10),
            product(2, "Red Hat", "B", 5),
            product(3, "Green Shirt", "A", 20),
            product(4, "Wool Socks", "B", 8),
            product(5, "Rain Jacket", "B", 60),
            product(6, "Linen Shirt", "A", 30),
            product(7, "Sun Hat", "B", 15),
        ]
    }

    fn ids(products: &[Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_first_page_of_seven() {
        let raw = seven_products();
        let view = derive(&raw, &ViewParameters::default());

        assert_eq!(view.page_items.len(), 5);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.current_page, 1);
        assert_eq!(ids(&view.page_items), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_second_page_holds_remainder() {
        let raw = seven_products();
        let params = ViewParameters {
            current_page: 2,
            ..ViewParameters::default()
        };
        let view = derive(&raw, &params);

        assert_eq!(ids(&view.page_items), ["6", "7"]);
        assert!(view.has_previous());
        assert!(!view.has_next());
    }

    #[test]
    fn test_category_filter_clamps_page() {
        let raw = seven_products();
        let params = ViewParameters {
            selected_category: "A".to_string(),
            current_page: 2,
            ..ViewParameters::default()
        };
        let view = derive(&raw, &params);

        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.page_items.len(), 3);
    }

    #[test]
    fn test_category_filter_ignores_case_but_not_substrings() {
        let raw = vec![
            product(1, "Tee", "Clothing", 1),
            product(2, "Tee", "clothing", 1),
            product(3, "Tee", "Clothing Accessories", 1),
        ];
        let kept = filter_by_category(&raw, "CLOTHING");
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| p.id != ProductId::from(3)));
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let raw = vec![
            product(1, "Blue Shirt", "A", 10),
            product(2, "Red Hat", "B", 5),
            product(3, "Green Shirt", "B", 20),
        ];
        let params = ViewParameters {
            search_term: "shirt".to_string(),
            ..ViewParameters::default()
        };
        let view = derive(&raw, &params);

        assert_eq!(ids(&view.page_items), ["1", "3"]);
    }

    #[test]
    fn test_search_ignores_description_and_category() {
        let raw = vec![
            product(1, "Mug", "Shirts", 3).with_description("Not a shirt"),
            product(2, "Shirt", "Tops", 3),
        ];
        let kept = filter_by_search(&raw, "Shirt");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, ProductId::from(2));
    }

    #[test]
    fn test_category_applies_before_search() {
        let raw = vec![
            product(1, "Blue Shirt", "A", 10),
            product(2, "Red Shirt", "B", 5),
        ];
        let params = ViewParameters {
            search_term: "shirt".to_string(),
            selected_category: "b".to_string(),
            ..ViewParameters::default()
        };
        let view = derive(&raw, &params);
        assert_eq!(ids(&view.page_items), ["2"]);
    }

    #[test]
    fn test_price_desc() {
        let raw = vec![
            product(1, "a", "A", 10),
            product(2, "b", "A", 5),
            product(3, "c", "A", 20),
        ];
        let params = ViewParameters {
            sort_option: SortOption::PriceDesc,
            ..ViewParameters::default()
        };
        let view = derive(&raw, &params);
        let prices: Vec<Decimal> = view.page_items.iter().map(|p| p.price).collect();
        assert_eq!(
            prices,
            [Decimal::from(20), Decimal::from(10), Decimal::from(5)]
        );
    }

    #[test]
    fn test_price_sort_is_stable() {
        let raw = vec![
            product(1, "first", "A", 5),
            product(2, "second", "A", 1),
            product(3, "third", "A", 5),
        ];
        let refs: Vec<&Product> = raw.iter().collect();
        let asc = sort_products(refs.clone(), SortOption::PriceAsc);
        let desc = sort_products(refs, SortOption::PriceDesc);

        let asc_ids: Vec<&str> = asc.iter().map(|p| p.id.as_str()).collect();
        let desc_ids: Vec<&str> = desc.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(asc_ids, ["2", "1", "3"]);
        assert_eq!(desc_ids, ["1", "3", "2"]);
    }

    #[test]
    fn test_title_sorts() {
        let raw = vec![
            product(1, "banana", "A", 1),
            product(2, "Apple", "A", 1),
            product(3, "cherry", "A", 1),
        ];
        let refs: Vec<&Product> = raw.iter().collect();

        let asc = sort_products(refs.clone(), SortOption::TitleAsc);
        let titles: Vec<&str> = asc.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Apple", "banana", "cherry"]);

        let desc = sort_products(refs, SortOption::TitleDesc);
        let titles: Vec<&str> = desc.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_none_preserves_fetch_order() {
        let raw = seven_products();
        let refs: Vec<&Product> = raw.iter().collect();
        let sorted = sort_products(refs.clone(), SortOption::None);
        assert_eq!(sorted, refs);
    }

    #[test]
    fn test_empty_collection() {
        let view = derive(&[], &ViewParameters::default());
        assert!(view.page_items.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(!view.has_previous());
        assert!(!view.has_next());
    }

    #[test]
    fn test_page_zero_is_clamped_to_one() {
        let raw = seven_products();
        let params = ViewParameters {
            current_page: 0,
            ..ViewParameters::default()
        };
        assert_eq!(derive(&raw, &params).current_page, 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(3, 2), 2);
        assert_eq!(clamp_page(0, 2), 1);
        assert_eq!(clamp_page(9, 0), 1);
        assert_eq!(clamp_page(2, 4), 2);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let raw = seven_products();
        let refs: Vec<&Product> = raw.iter().collect();
        assert!(paginate(&refs, 3).is_empty());
        assert!(paginate(&refs, usize::MAX).is_empty());
    }

    #[test]
    fn test_available_categories_use_raw_collection() {
        let raw = seven_products();
        let params = ViewParameters {
            selected_category: "A".to_string(),
            search_term: "nothing matches".to_string(),
            ..ViewParameters::default()
        };
        let view = derive(&raw, &params);
        assert!(view.page_items.is_empty());
        assert_eq!(view.available_categories, ["A", "B"]);
    }

    #[test]
    fn test_available_categories_first_seen_order() {
        let raw = vec![
            product(1, "x", "tools", 1),
            product(2, "x", "garden", 1),
            product(3, "x", "tools", 1),
            product(4, "x", "kitchen", 1),
        ];
        assert_eq!(available_categories(&raw), ["tools", "garden", "kitchen"]);
    }
}
