//! # Primitives
//!
//! Fixed constants shared across the Roster core.
//!
//! These are compiled in; runtime overrides (page size, simulated latency)
//! live in the app's configuration file.

use crate::Cents;

/// Rows per page for a fresh paginator.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Lower bound of the default product price range (inclusive).
pub const DEFAULT_PRICE_MIN: Cents = Cents::new(0, 0);

/// Upper bound of the default product price range (inclusive).
pub const DEFAULT_PRICE_MAX: Cents = Cents::new(1000, 0);

/// Number of steps in the multi-step form.
pub const FORM_STEP_COUNT: u8 = 3;

/// Simulated latency of a mock fetch, in milliseconds.
pub const FETCH_LATENCY_MS: u64 = 500;

/// Simulated latency of a form submission, in milliseconds.
pub const SUBMIT_LATENCY_MS: u64 = 1000;

// =============================================================================
// LOCAL STORAGE KEYS
// =============================================================================

/// Slot holding the serialized auth session.
pub const AUTH_STORAGE_KEY: &str = "roster_auth_state";

/// Legacy auth slot, cleared on logout.
pub const LEGACY_AUTH_STORAGE_KEY: &str = "roster_auth";

/// Slot holding the locale code.
pub const LOCALE_STORAGE_KEY: &str = "roster_locale";

// =============================================================================
// ROUTES
// =============================================================================

/// Where unauthenticated navigation to a protected route is sent.
pub const LOGIN_PATH: &str = "/login";

/// Where an authenticated visit to the login page lands by default.
pub const HOME_AFTER_LOGIN: &str = "/dashboard";

/// Query parameter carrying the post-login redirect target.
pub const REDIRECT_PARAM: &str = "redirect";
