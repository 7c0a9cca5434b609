//! # Entity Store
//!
//! Owns a raw record collection, its filter spec and a loading flag, and
//! exposes the derived view through the filter/sort engine.
//!
//! ## Outcome reporting
//!
//! Every operation reports to the store's [`Notifier`]. Failures are also
//! returned to the caller; nothing is retried.
//!
//! ## Loads
//!
//! Each load takes a [`LoadTicket`]. Only the most recently issued ticket may
//! complete a load: a result carried by an older ticket is discarded, so the
//! last-initiated load wins.

use crate::filter::{self, FilterPatch, FilterSpec};
use crate::notify::Notifier;
use crate::record::Record;
use crate::{RecordId, RosterError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

// =============================================================================
// POLICIES & TICKETS
// =============================================================================

/// How `update`/`delete` treat an id that is not in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRecordPolicy {
    /// Leave the collection untouched: `update` is silent, `delete` still
    /// reports success.
    #[default]
    Lenient,
    /// Report an error notification and return `RosterError::NotFound`.
    Strict,
}

/// Proof that a load was started; see [`EntityStore::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The records replaced the collection.
    Applied(usize),
    /// A newer load (or a cancellation) superseded this one.
    Superseded,
}

/// Source of records for [`EntityStore::load`].
///
/// This is the seam where a real API client attaches.
pub trait RecordSource<E> {
    /// Fetch the full collection.
    fn fetch(&self) -> impl Future<Output = Result<Vec<E>, RosterError>> + Send;
}

// =============================================================================
// ENTITY STORE
// =============================================================================

/// Store for one record type.
pub struct EntityStore<E: Record> {
    records: Vec<E>,
    filter: FilterSpec,
    is_loading: bool,
    generation: u64,
    revision: u64,
    policy: MissingRecordPolicy,
    notifier: Arc<dyn Notifier>,
}

impl<E: Record> std::fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("kind", &E::LABEL)
            .field("records", &self.records.len())
            .field("is_loading", &self.is_loading)
            .field("revision", &self.revision)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<E: Record> EntityStore<E> {
    /// Create an empty store with the record type's default filter.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            records: Vec::new(),
            filter: E::default_filter(),
            is_loading: false,
            generation: 0,
            revision: 0,
            policy: MissingRecordPolicy::default(),
            notifier,
        }
    }

    /// Set the missing-record policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MissingRecordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Raw collection, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[E] {
        &self.records
    }

    /// Current filter spec.
    #[must_use]
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Counter bumped on every state change; observers compare it to decide
    /// whether to re-read.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// The filtered, ordered view, recomputed on every call.
    #[must_use]
    pub fn filtered_view(&self) -> Vec<E> {
        filter::apply(&self.records, &self.filter)
    }

    /// Distinct text values of `field`, in first-seen order.
    #[must_use]
    pub fn distinct_values(&self, field: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for value in self.records.iter().filter_map(|r| r.field(field)) {
            let text = value.to_string();
            if !seen.contains(&text) {
                seen.push(text);
            }
        }
        seen
    }

    /// Shallow-merge `patch` into the filter spec.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.merge(patch);
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Mark a load as started and issue its ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.saturating_add(1);
        self.is_loading = true;
        self.touch();
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Invalidate the in-flight load, if any.
    pub fn cancel_load(&mut self) {
        if self.is_loading {
            self.generation = self.generation.saturating_add(1);
            self.is_loading = false;
            self.touch();
        }
    }

    /// Complete the load identified by `ticket` with its fetch result.
    ///
    /// Stale tickets change nothing and post no notification.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<E>, RosterError>,
    ) -> Result<LoadOutcome, RosterError> {
        if ticket.generation != self.generation || !self.is_loading {
            return Ok(LoadOutcome::Superseded);
        }
        self.is_loading = false;
        self.touch();
        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.notifier
                    .success(&format!("{} loaded successfully", E::PLURAL));
                Ok(LoadOutcome::Applied(count))
            }
            Err(e) => {
                self.notifier
                    .error(&format!("Failed to load {}", E::PLURAL.to_lowercase()));
                Err(e)
            }
        }
    }

    /// Populate the collection from `fetch`.
    pub async fn load<F>(&mut self, fetch: F) -> Result<LoadOutcome, RosterError>
    where
        F: Future<Output = Result<Vec<E>, RosterError>>,
    {
        let ticket = self.begin_load();
        let result = fetch.await;
        self.complete_load(ticket, result)
    }

    /// Populate the collection from a [`RecordSource`].
    pub async fn load_from<S: RecordSource<E>>(
        &mut self,
        source: &S,
    ) -> Result<LoadOutcome, RosterError> {
        self.load(source.fetch()).await
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Create a record from a form draft and append it.
    pub fn create(&mut self, draft: E::Draft) -> Result<E, RosterError> {
        let label = E::LABEL.to_lowercase();
        match E::from_draft(RecordId::generate(), Utc::now(), draft) {
            Ok(record) => {
                self.records.push(record.clone());
                self.touch();
                self.notifier
                    .success(&format!("{} created successfully", E::LABEL));
                Ok(record)
            }
            Err(e) => {
                self.notifier.error(&format!("Failed to create {label}"));
                Err(e)
            }
        }
    }

    /// Overlay `patch` onto the record with `id`.
    ///
    /// Returns the updated record, or `None` when the id is absent under the
    /// lenient policy.
    pub fn update(&mut self, id: &RecordId, patch: E::Patch) -> Result<Option<E>, RosterError> {
        let label = E::LABEL.to_lowercase();
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            return match self.policy {
                MissingRecordPolicy::Lenient => Ok(None),
                MissingRecordPolicy::Strict => {
                    self.notifier.error(&format!("Failed to update {label}"));
                    Err(RosterError::NotFound {
                        kind: E::LABEL,
                        id: id.clone(),
                    })
                }
            };
        };

        let record = &mut self.records[index];
        if let Err(e) = record.apply_patch(patch) {
            self.notifier.error(&format!("Failed to update {label}"));
            return Err(e);
        }
        let updated = record.clone();
        self.touch();
        self.notifier
            .success(&format!("{} updated successfully", E::LABEL));
        Ok(Some(updated))
    }

    /// Remove the record with `id`.
    ///
    /// Returns whether a record was removed.
    pub fn delete(&mut self, id: &RecordId) -> Result<bool, RosterError> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;

        if !removed && self.policy == MissingRecordPolicy::Strict {
            self.notifier
                .error(&format!("Failed to delete {}", E::LABEL.to_lowercase()));
            return Err(RosterError::NotFound {
                kind: E::LABEL,
                id: id.clone(),
            });
        }
        if removed {
            self.touch();
        }
        self.notifier
            .success(&format!("{} deleted successfully", E::LABEL));
        Ok(removed)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{mock_products, mock_users};
    use crate::notify::{RecordingNotifier, Severity};
    use crate::{Product, Role, User, UserDraft, UserPatch, UserStatus};

    fn user_store() -> (EntityStore<User>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = EntityStore::new(notifier.clone() as Arc<dyn Notifier>);
        (store, notifier)
    }

    fn seeded_user_store() -> (EntityStore<User>, Arc<RecordingNotifier>) {
        let (mut store, notifier) = user_store();
        let ticket = store.begin_load();
        store
            .complete_load(ticket, Ok(mock_users(Utc::now())))
            .expect("load");
        notifier.clear();
        (store, notifier)
    }

    fn draft(name: &str) -> UserDraft {
        UserDraft {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::User,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn begin_load_sets_loading_flag() {
        let (mut store, _) = user_store();
        let _ticket = store.begin_load();
        assert!(store.is_loading());
    }

    #[test]
    fn completed_load_replaces_records_and_notifies() {
        let (mut store, notifier) = user_store();
        let ticket = store.begin_load();
        let outcome = store
            .complete_load(ticket, Ok(mock_users(Utc::now())))
            .expect("load");
        assert_eq!(outcome, LoadOutcome::Applied(3));
        assert!(!store.is_loading());
        let last = notifier.last().expect("notification");
        assert_eq!(last.severity, Severity::Success);
        assert_eq!(last.message, "Users loaded successfully");
    }

    #[test]
    fn failed_load_notifies_and_returns_error() {
        let (mut store, notifier) = user_store();
        let ticket = store.begin_load();
        let result = store.complete_load(ticket, Err(RosterError::Fetch("offline".into())));
        assert!(matches!(result, Err(RosterError::Fetch(_))));
        assert!(!store.is_loading());
        assert!(store.records().is_empty());
        assert_eq!(
            notifier.last().map(|n| n.message),
            Some("Failed to load users".to_string())
        );
    }

    #[test]
    fn last_initiated_load_wins() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut store: EntityStore<Product> = EntityStore::new(notifier.clone());
        let first = store.begin_load();
        let second = store.begin_load();

        let products = mock_products(Utc::now());
        let late = store
            .complete_load(second, Ok(products.clone()))
            .expect("second");
        assert_eq!(late, LoadOutcome::Applied(4));

        let stale = store
            .complete_load(first, Ok(products[..1].to_vec()))
            .expect("first");
        assert_eq!(stale, LoadOutcome::Superseded);
        assert_eq!(store.records().len(), 4);
        assert_eq!(notifier.notifications().len(), 1);
    }

    #[test]
    fn cancelled_load_is_discarded() {
        let (mut store, notifier) = user_store();
        let ticket = store.begin_load();
        store.cancel_load();
        assert!(!store.is_loading());
        let outcome = store
            .complete_load(ticket, Ok(mock_users(Utc::now())))
            .expect("complete");
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert!(store.records().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let (mut store, notifier) = seeded_user_store();
        let created = store.create(draft("Grace")).expect("create");
        assert_eq!(store.records().len(), 4);
        assert!(mock_users(Utc::now()).iter().all(|u| u.id != created.id));
        assert_eq!(
            notifier.last().map(|n| n.message),
            Some("User created successfully".to_string())
        );
    }

    #[test]
    fn invalid_create_notifies_error() {
        let (mut store, notifier) = seeded_user_store();
        let mut bad = draft("Grace");
        bad.email = "grace".into();
        assert!(store.create(bad).is_err());
        assert_eq!(store.records().len(), 3);
        assert_eq!(
            notifier.last().map(|n| n.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn update_overlays_fields() {
        let (mut store, _) = seeded_user_store();
        let id = RecordId::new("2");
        let updated = store
            .update(
                &id,
                UserPatch {
                    role: Some(Role::Moderator),
                    ..UserPatch::default()
                },
            )
            .expect("update")
            .expect("present");
        assert_eq!(updated.role, Role::Moderator);
        assert_eq!(updated.name, "Jane Smith");
        assert_eq!(store.get(&id), Some(&updated));
    }

    #[test]
    fn lenient_update_of_missing_id_is_silent() {
        let (mut store, notifier) = seeded_user_store();
        let before = store.records().to_vec();
        let result = store
            .update(&RecordId::new("404"), UserPatch::default())
            .expect("lenient");
        assert_eq!(result, None);
        assert_eq!(store.records(), before.as_slice());
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn strict_update_of_missing_id_errors() {
        let (store, notifier) = seeded_user_store();
        let mut store = store.with_policy(MissingRecordPolicy::Strict);
        let result = store.update(&RecordId::new("404"), UserPatch::default());
        assert!(matches!(result, Err(RosterError::NotFound { kind: "User", .. })));
        assert_eq!(notifier.last().map(|n| n.severity), Some(Severity::Error));
    }

    #[test]
    fn delete_removes_and_reports() {
        let (mut store, notifier) = seeded_user_store();
        assert!(store.delete(&RecordId::new("1")).expect("delete"));
        assert_eq!(store.records().len(), 2);

        assert!(!store.delete(&RecordId::new("1")).expect("lenient"));
        assert_eq!(store.records().len(), 2);
        assert_eq!(
            notifier.last().map(|n| n.message),
            Some("User deleted successfully".to_string())
        );
    }

    #[test]
    fn strict_delete_of_missing_id_errors() {
        let (store, _) = seeded_user_store();
        let mut store = store.with_policy(MissingRecordPolicy::Strict);
        assert!(store.delete(&RecordId::new("nope")).is_err());
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn set_filter_changes_view_and_revision() {
        let (mut store, _) = seeded_user_store();
        let revision = store.revision();
        store.set_filter(FilterPatch::default().facet("status", ["pending"]));
        assert!(store.revision() > revision);
        let view = store.filtered_view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Bob Wilson");
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut store: EntityStore<Product> = EntityStore::new(notifier);
        let ticket = store.begin_load();
        store
            .complete_load(ticket, Ok(mock_products(Utc::now())))
            .expect("load");
        assert_eq!(
            store.distinct_values("category"),
            vec!["Electronics", "Home", "Sports"]
        );
    }
}
