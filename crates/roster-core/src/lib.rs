//! # roster-core
//!
//! The state layer of Roster, an admin dashboard for users and products.
//!
//! This crate holds everything that is not presentation: typed records,
//! filter/sort/paginate pipelines, entity stores with notifications, the
//! cart and multi-step form workflows, CSV export, the auth gate, locale
//! preference and the route table.
//!
//! ## Architectural Constraints
//!
//! - No async runtime and no logging dependency: async operations take
//!   futures, outcomes are reported through `Result` and the `Notifier` trait
//! - No floats: money is integer cents (`Cents`)
//! - No global state: the application owns one instance of each store and
//!   passes it explicitly

// =============================================================================
// MODULES
// =============================================================================

pub mod auth;
pub mod cart;
pub mod export;
pub mod filter;
pub mod fixtures;
pub mod locale;
pub mod models;
pub mod notify;
pub mod pagination;
pub mod primitives;
pub mod record;
pub mod router;
pub mod storage;
pub mod store;
pub mod types;
pub mod workflow;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Cents, FieldValue, RecordId, RosterError};

// =============================================================================
// RE-EXPORTS: Records and Queries
// =============================================================================

pub use filter::{FilterPatch, FilterSpec, NumericRange, SortDirection, SortSpec};
pub use models::{
    IN_STOCK, Product, ProductDraft, ProductPatch, Role, User, UserDraft, UserPatch, UserStatus,
};
pub use pagination::{PaginationState, Paginator};
pub use record::{Fields, Record};

// =============================================================================
// RE-EXPORTS: Stores and Workflows
// =============================================================================

pub use cart::{Cart, CartItem};
pub use export::{DEFAULT_EXPORT_FILE, to_csv, write_csv};
pub use notify::{
    Notification, Notifier, PendingMessages, RecordingNotifier, Severity, ToastId, track,
};
pub use store::{EntityStore, LoadOutcome, LoadTicket, MissingRecordPolicy, RecordSource};
pub use workflow::{
    ContactDetails, FormData, FormWorkflow, PaymentDetails, ShippingAddress, StepData,
};

// =============================================================================
// RE-EXPORTS: Session, Locale and Navigation
// =============================================================================

pub use auth::{AuthGate, SessionUser};
pub use locale::{Catalog, Locale, set_locale, stored_locale};
pub use router::{Layout, Navigation, Route, Router};
pub use storage::{KeyValueStore, MemoryStorage, RedbStorage};
