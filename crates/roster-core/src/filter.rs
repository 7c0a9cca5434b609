//! # Filter/Sort Engine
//!
//! Pure derivation of an ordered view from a raw record collection.
//!
//! - Predicates are AND-combined; free-text search is OR-combined across the
//!   record's search fields
//! - Sorting is stable; incomparable pairs keep their relative order
//! - The input collection is never mutated

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// SORT SPECIFICATION
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Which field to sort by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name; unknown names sort nothing.
    pub key: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `key`.
    #[must_use]
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `key`.
    #[must_use]
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

// =============================================================================
// FILTER SPECIFICATION
// =============================================================================

/// Inclusive numeric range over one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Field name (money fields compare in cents).
    pub field: String,
    /// Lower bound, inclusive.
    pub min: i64,
    /// Upper bound, inclusive.
    pub max: i64,
}

impl NumericRange {
    /// Create a range over `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            field: field.into(),
            min,
            max,
        }
    }

    /// Check whether `value` lies within the bounds.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Declarative description of active filters and sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Free-text search; inactive when blank.
    pub search: String,
    /// Inclusion sets keyed by field name; an empty set is inactive.
    pub facets: BTreeMap<String, BTreeSet<String>>,
    /// Optional inclusive numeric range.
    pub range: Option<NumericRange>,
    /// Flags a record must not fail (e.g. `in_stock`).
    pub flags: BTreeSet<String>,
    /// Sort order.
    pub sort: SortSpec,
}

impl FilterSpec {
    /// A spec with every filter inactive, sorted ascending by `sort_key`.
    #[must_use]
    pub fn sorted_by(sort_key: impl Into<String>) -> Self {
        Self {
            search: String::new(),
            facets: BTreeMap::new(),
            range: None,
            flags: BTreeSet::new(),
            sort: SortSpec::asc(sort_key),
        }
    }

    /// Check whether any filtering predicate is active.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !self.search.trim().is_empty()
            || self.facets.values().any(|set| !set.is_empty())
            || self.range.is_some()
            || !self.flags.is_empty()
    }

    /// Shallow-merge a patch into this spec.
    ///
    /// Every field the patch provides replaces the previous value; facets and
    /// flags are merged key by key.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        for (field, values) in patch.facets {
            self.facets.insert(field, values);
        }
        if let Some(range) = patch.range {
            self.range = range;
        }
        for (flag, required) in patch.flags {
            if required {
                self.flags.insert(flag);
            } else {
                self.flags.remove(&flag);
            }
        }
        if let Some(key) = patch.sort_key {
            self.sort.key = key;
        }
        if let Some(direction) = patch.direction {
            self.sort.direction = direction;
        }
    }

    /// Check whether a record satisfies every active predicate.
    #[must_use]
    pub fn matches<E: Record>(&self, record: &E) -> bool {
        let search = self.search.trim();
        if !search.is_empty() {
            let needle = search.to_lowercase();
            let hit = record
                .search_fields()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        for (field, allowed) in &self.facets {
            if allowed.is_empty() {
                continue;
            }
            match record.field(field) {
                Some(value) if allowed.contains(&value.to_string()) => {}
                _ => return false,
            }
        }

        if let Some(range) = &self.range {
            // Records without a numeric value for the field are not range-checked.
            let value = record.field(&range.field).and_then(|v| v.as_number());
            if let Some(n) = value
                && !range.contains(n)
            {
                return false;
            }
        }

        self.flags
            .iter()
            .all(|flag| record.flag(flag) != Some(false))
    }
}

/// Partial filter update for [`FilterSpec::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    /// New search text.
    pub search: Option<String>,
    /// Replacement inclusion sets, per field.
    #[serde(default)]
    pub facets: BTreeMap<String, BTreeSet<String>>,
    /// New range; `Some(None)` clears it.
    pub range: Option<Option<NumericRange>>,
    /// Flags to require (`true`) or drop (`false`).
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    /// New sort key.
    pub sort_key: Option<String>,
    /// New sort direction.
    pub direction: Option<SortDirection>,
}

impl FilterPatch {
    /// Set the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Replace the inclusion set of one field.
    #[must_use]
    pub fn facet<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets
            .insert(field.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Set an inclusive range.
    #[must_use]
    pub fn range(mut self, range: NumericRange) -> Self {
        self.range = Some(Some(range));
        self
    }

    /// Remove the range filter.
    #[must_use]
    pub fn clear_range(mut self) -> Self {
        self.range = Some(None);
        self
    }

    /// Require or drop a flag.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, required: bool) -> Self {
        self.flags.insert(name.into(), required);
        self
    }

    /// Set the sort key and direction.
    #[must_use]
    pub fn sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.direction = Some(direction);
        self
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Compare two records on the `FilterSpec` sort key.
///
/// Missing values, unknown keys and mismatched value kinds compare equal.
#[must_use]
pub fn compare<E: Record>(a: &E, b: &E, sort: &SortSpec) -> Ordering {
    let ordering = match (a.field(&sort.key), b.field(&sort.key)) {
        (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    };
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Derive the filtered, ordered view of `records`.
///
/// Pure: `records` is left untouched and identical inputs give identical
/// output. `sort_by` is stable, so equal elements keep their input order.
#[must_use]
pub fn apply<E: Record>(records: &[E], spec: &FilterSpec) -> Vec<E> {
    let mut view: Vec<E> = records
        .iter()
        .filter(|record| spec.matches(*record))
        .cloned()
        .collect();
    view.sort_by(|a, b| compare(a, b, &spec.sort));
    view
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{mock_products, mock_users};
    use crate::{Cents, Product};
    use chrono::Utc;

    fn names<E: Record>(records: &[E]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.field("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn empty_collection_yields_empty_view() {
        let view = apply::<Product>(&[], &Product::default_filter());
        assert!(view.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let users = mock_users(Utc::now());
        let mut spec = FilterSpec::sorted_by("name");
        spec.search = "EXAMPLE.COM".to_string();
        assert_eq!(apply(&users, &spec).len(), 3);

        spec.search = "jane".to_string();
        assert_eq!(names(&apply(&users, &spec)), vec!["Jane Smith"]);
    }

    #[test]
    fn product_search_matches_description() {
        let products = mock_products(Utc::now());
        let mut spec = FilterSpec::sorted_by("name");
        spec.search = "carafe".to_string();
        assert_eq!(names(&apply(&products, &spec)), vec!["Coffee Maker"]);
    }

    #[test]
    fn facets_are_and_combined() {
        let users = mock_users(Utc::now());
        let mut spec = FilterSpec::sorted_by("name");
        spec.merge(
            FilterPatch::default()
                .facet("role", ["admin", "moderator"])
                .facet("status", ["active"]),
        );
        assert_eq!(names(&apply(&users, &spec)), vec!["John Doe"]);
    }

    #[test]
    fn in_stock_flag_excludes_empty_stock() {
        let products = mock_products(Utc::now());
        let mut spec = FilterSpec::sorted_by("name");
        spec.merge(FilterPatch::default().flag("in_stock", true));
        let view = apply(&products, &spec);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|p| p.stock > 0));
    }

    #[test]
    fn range_is_inclusive() {
        let products = mock_products(Utc::now());
        let mut spec = FilterSpec::sorted_by("price");
        spec.range = Some(NumericRange::new("price", 8999, 12999));
        let view = apply(&products, &spec);
        let prices: Vec<Cents> = view.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![Cents(8999), Cents(12999)]);
    }

    #[test]
    fn sort_descending_reverses() {
        let products = mock_products(Utc::now());
        let mut spec = FilterSpec::sorted_by("price");
        spec.sort.direction = SortDirection::Desc;
        assert_eq!(
            names(&apply(&products, &spec)),
            vec![
                "Smart Watch",
                "Wireless Headphones",
                "Running Shoes",
                "Coffee Maker"
            ]
        );
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let users = mock_users(Utc::now());
        let spec = FilterSpec::sorted_by("shoe_size");
        assert_eq!(names(&apply(&users, &spec)), names(&users));
    }

    #[test]
    fn missing_optional_field_compares_equal() {
        let users = mock_users(Utc::now());
        let spec = FilterSpec::sorted_by("avatar");
        assert_eq!(names(&apply(&users, &spec)), names(&users));
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let mut spec = Product::default_filter();
        spec.merge(FilterPatch::default().search("watch"));
        spec.merge(FilterPatch::default().sort("price", SortDirection::Desc));
        assert_eq!(spec.search, "watch");
        assert_eq!(spec.sort, SortSpec::desc("price"));
        assert!(spec.range.is_some());

        spec.merge(FilterPatch::default().clear_range().flag("in_stock", true));
        assert!(spec.range.is_none());
        assert!(spec.flags.contains("in_stock"));

        spec.merge(FilterPatch::default().flag("in_stock", false));
        assert!(spec.flags.is_empty());
    }

    #[test]
    fn apply_is_pure() {
        let products = mock_products(Utc::now());
        let before = products.clone();
        let spec = Product::default_filter();
        let first = apply(&products, &spec);
        let second = apply(&products, &spec);
        assert_eq!(first, second);
        assert_eq!(products, before);
    }
}
