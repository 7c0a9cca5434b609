//! # Property-Based Tests
//!
//! Invariants of the filter engine, stores, cart and paginator, checked with
//! proptest over generated collections.

use chrono::{TimeZone, Utc};
use proptest::collection::vec;
use proptest::prelude::*;
use roster_core::filter::apply;
use roster_core::{
    Cart, Cents, EntityStore, FilterPatch, FilterSpec, NumericRange, Paginator, Product,
    ProductDraft, ProductPatch, Record, RecordId, RecordingNotifier, SortDirection,
};
use std::sync::Arc;

// =============================================================================
// GENERATORS
// =============================================================================

const CATEGORIES: &[&str] = &["Electronics", "Home", "Sports"];

fn product(index: usize, price: i64, stock: u32, category: usize) -> Product {
    Product {
        id: RecordId::new(index.to_string()),
        name: format!("Product {}", index % 7),
        description: format!("Item number {index}"),
        price: Cents(price),
        stock,
        category: CATEGORIES[category % CATEGORIES.len()].to_string(),
        image: None,
        created_at: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default(),
    }
}

fn products() -> impl Strategy<Value = Vec<Product>> {
    vec((0i64..200_000, 0u32..5, 0usize..3), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (price, stock, category))| product(i, price, stock, category))
            .collect()
    })
}

fn spec() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of("[a-z ]{0,3}"),
        prop::option::of(0usize..3),
        prop::option::of((0i64..100_000, 0i64..100_000)),
        any::<bool>(),
        prop::sample::select(vec!["name", "price", "stock", "category", "missing"]),
        any::<bool>(),
    )
        .prop_map(|(search, category, range, in_stock, key, descending)| {
            let mut patch = FilterPatch::default().sort(
                key,
                if descending {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            );
            if let Some(search) = search {
                patch = patch.search(search);
            }
            if let Some(category) = category {
                patch = patch.facet("category", [CATEGORIES[category]]);
            }
            if let Some((a, b)) = range {
                patch = patch.range(NumericRange::new("price", a.min(b), a.max(b)));
            }
            let mut spec = FilterSpec::sorted_by("name");
            spec.merge(patch.flag(roster_core::IN_STOCK, in_stock));
            spec
        })
}

fn store_with(records: Vec<Product>) -> EntityStore<Product> {
    let mut store = EntityStore::new(Arc::new(RecordingNotifier::new()));
    let ticket = store.begin_load();
    let _ = store.complete_load(ticket, Ok(records));
    store
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// With every predicate inactive the view is a permutation of the input.
    #[test]
    fn inactive_filters_permute_the_input(items in products()) {
        let spec = FilterSpec::sorted_by("price");
        let view = apply(&items, &spec);

        prop_assert_eq!(view.len(), items.len());
        let mut expected: Vec<&RecordId> = items.iter().map(|p| &p.id).collect();
        let mut actual: Vec<&RecordId> = view.iter().map(|p| &p.id).collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);
    }

    /// The view holds exactly the matching records, and applying twice agrees.
    #[test]
    fn view_is_the_matching_subset(items in products(), spec in spec()) {
        let view = apply(&items, &spec);
        let matching = items.iter().filter(|p| spec.matches(*p)).count();

        prop_assert_eq!(view.len(), matching);
        prop_assert!(view.iter().all(|p| spec.matches(p)));
        prop_assert_eq!(apply(&items, &spec), view);
    }

    /// Records that compare equal keep their input order.
    #[test]
    fn sort_is_stable(items in products()) {
        let spec = FilterSpec::sorted_by("category");
        let view = apply(&items, &spec);

        for pair in view.windows(2) {
            if pair[0].category == pair[1].category {
                let first: usize = pair[0].id.as_str().parse().unwrap_or_default();
                let second: usize = pair[1].id.as_str().parse().unwrap_or_default();
                prop_assert!(first < second);
            }
        }
    }

    /// A created record shows up in the view iff it satisfies the filter.
    #[test]
    fn created_record_visible_iff_matching(
        items in products(),
        spec in spec(),
        price in 0i64..200_000,
        stock in 0u32..3,
    ) {
        let mut store = store_with(items);
        store.set_filter(FilterPatch {
            search: Some(spec.search.clone()),
            facets: spec.facets.clone(),
            range: Some(spec.range.clone()),
            flags: spec.flags.iter().map(|f| (f.clone(), true)).collect(),
            sort_key: Some(spec.sort.key.clone()),
            direction: Some(spec.sort.direction),
        });

        let created = store.create(ProductDraft {
            name: "Fresh".into(),
            description: "New arrival".into(),
            price: Cents(price),
            stock,
            category: "Home".into(),
        }).expect("create");

        let visible = store.filtered_view().iter().any(|p| p.id() == created.id());
        prop_assert_eq!(visible, store.filter().matches(&created));
    }

    /// Updating an absent id under the default policy changes nothing.
    #[test]
    fn update_of_missing_id_is_a_no_op(items in products()) {
        let mut store = store_with(items.clone());
        let updated = store.update(
            &RecordId::new("absent"),
            ProductPatch { name: Some("Renamed".into()), ..ProductPatch::default() },
        ).expect("lenient");

        prop_assert!(updated.is_none());
        prop_assert_eq!(store.records(), items.as_slice());
    }

    /// Delete shrinks the collection by one exactly when the id was present.
    #[test]
    fn delete_changes_length_iff_present(items in products(), target in 0usize..60) {
        let mut store = store_with(items.clone());
        let id = RecordId::new(target.to_string());
        let present = items.iter().any(|p| p.id == id);

        let removed = store.delete(&id).expect("lenient");

        prop_assert_eq!(removed, present);
        prop_assert_eq!(store.records().len() + usize::from(present), items.len());
    }

    /// Adding the same product twice merges into one line with summed quantity.
    #[test]
    fn cart_merges_repeated_adds(a in 1u32..1000, b in 1u32..1000) {
        let item = product(1, 1_999, 10, 0);
        let mut cart = Cart::new();
        cart.add_item(&item, a);
        cart.add_item(&item, b);

        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.total_items(), u64::from(a + b));

        cart.update_quantity(&item.id, 0);
        prop_assert!(cart.is_empty());
    }

    /// Out-of-range jumps are ignored; resizing returns to the first page.
    #[test]
    fn paginator_bounds(len in 0usize..100, size in 1usize..20, target in 0usize..200) {
        let mut paginator = Paginator::new(size);
        let before = paginator.state();
        let accepted = paginator.go_to_page(target, len);

        if target < paginator.page_count(len) {
            prop_assert!(accepted);
            prop_assert_eq!(paginator.state().page_index, target);
        } else {
            prop_assert!(!accepted);
            prop_assert_eq!(paginator.state(), before);
        }

        paginator.set_page_size(size + 1);
        prop_assert_eq!(paginator.state().page_index, 0);
    }
}
