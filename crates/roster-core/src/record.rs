//! # Record Traits
//!
//! The seams between concrete record types (users, products, cart items) and
//! the generic machinery: the filter/sort engine, entity stores and CSV
//! export.

use crate::filter::FilterSpec;
use crate::{FieldValue, RecordId, RosterError};
use chrono::{DateTime, Utc};

/// Named-field access for anything that can be sorted or exported as a row.
pub trait Fields {
    /// Field names, in column order.
    fn field_names(&self) -> &'static [&'static str];

    /// Value of a named field. `None` for unknown fields and absent optional
    /// values.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A record managed by an [`EntityStore`](crate::store::EntityStore).
///
/// Drafts carry the fields of a create form; patches carry the optional
/// fields of an update form. Neither carries an id or a creation timestamp,
/// so those can never be overwritten by caller-provided data.
pub trait Record: Fields + Clone {
    /// Create-form payload.
    type Draft;
    /// Update-form payload; every field optional.
    type Patch;

    /// Singular label used in notifications, e.g. `User`.
    const LABEL: &'static str;
    /// Plural label used in notifications, e.g. `Users`.
    const PLURAL: &'static str;

    /// The record's opaque key.
    fn id(&self) -> &RecordId;

    /// Creation timestamp.
    fn created_at(&self) -> DateTime<Utc>;

    /// Text fields searched by the free-text filter.
    fn search_fields(&self) -> Vec<&str>;

    /// Boolean flags the filter can require (`None` for unknown flags).
    fn flag(&self, _name: &str) -> Option<bool> {
        None
    }

    /// The filter spec a fresh store starts with.
    fn default_filter() -> FilterSpec;

    /// Build a record from a validated draft.
    fn from_draft(
        id: RecordId,
        created_at: DateTime<Utc>,
        draft: Self::Draft,
    ) -> Result<Self, RosterError>;

    /// Overlay the provided patch fields onto this record.
    ///
    /// Fails without modifying `self` if the patched record is invalid.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), RosterError>;
}
