//! # Application Context
//!
//! Builds every store once and hands them to commands explicitly.

use crate::config::Config;
use crate::error::AppError;
use crate::source::MockSource;
use roster_core::{
    AuthGate, Cart, Catalog, EntityStore, FormWorkflow, KeyValueStore, LoadOutcome, Locale,
    Navigation, Notifier, Paginator, Product, RedbStorage, Route, Router, SessionUser, User,
    set_locale, stored_locale,
};
use std::sync::Arc;

/// Everything a command can touch.
pub struct AppContext {
    pub config: Config,
    pub notifier: Arc<dyn Notifier>,
    pub source: MockSource,
    pub users: EntityStore<User>,
    pub products: EntityStore<Product>,
    pub cart: Cart,
    pub form: FormWorkflow,
    pub paginator: Paginator,
    pub auth: AuthGate,
    pub locale: Locale,
    pub catalog: Catalog,
    pub router: Router,
    storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("users", &self.users)
            .field("products", &self.products)
            .field("auth", &self.auth)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Assemble a context over an already-open storage backend.
    #[must_use]
    pub fn new(
        config: Config,
        storage: Box<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        browser_language: Option<&str>,
    ) -> Self {
        let policy = config.stores.missing_record_policy;
        let auth = AuthGate::restore(storage.as_ref());
        let locale = stored_locale(storage.as_ref(), browser_language);

        Self {
            source: MockSource::new(&config.data),
            users: EntityStore::new(Arc::clone(&notifier)).with_policy(policy),
            products: EntityStore::new(Arc::clone(&notifier)).with_policy(policy),
            cart: Cart::new(),
            form: FormWorkflow::new(Arc::clone(&notifier)),
            notifier,
            paginator: Paginator::new(config.table.page_size),
            auth,
            locale,
            catalog: Catalog::builtin(),
            router: Router::standard(),
            storage,
            config,
        }
    }

    /// Open the redb storage named in the config and assemble a context.
    pub fn open(
        config: Config,
        notifier: Arc<dyn Notifier>,
        browser_language: Option<&str>,
    ) -> Result<Self, AppError> {
        let storage = RedbStorage::open(&config.storage.path)?;
        tracing::debug!(path = %config.storage.path.display(), "Opened local storage");
        Ok(Self::new(config, Box::new(storage), notifier, browser_language))
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, AppError> {
        let user = self.auth.login(self.storage.as_mut(), email, password)?.clone();
        tracing::info!(email = %user.email, "Logged in");
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        self.auth.logout(self.storage.as_mut())?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn change_locale(&mut self, locale: Locale) -> Result<(), AppError> {
        set_locale(self.storage.as_mut(), locale)?;
        self.locale = locale;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Resolve a location for the current session.
    #[must_use]
    pub fn navigate(&self, location: &str) -> Navigation<'_> {
        self.router.resolve(location, self.auth.is_authenticated())
    }

    /// Require that `path` renders for the current session.
    pub fn require(&self, path: &str) -> Result<&Route, AppError> {
        match self.navigate(path) {
            Navigation::Render(route) => Ok(route),
            Navigation::Redirect { to } if to.starts_with(roster_core::primitives::LOGIN_PATH) => {
                Err(AppError::LoginRequired { redirect: to })
            }
            Navigation::Redirect { to } => self.require(&to),
            Navigation::NotFound => Err(AppError::PageNotFound(path.to_string())),
        }
    }

    /// Localized title of `route`, or its name.
    #[must_use]
    pub fn title<'a>(&'a self, route: &'a Route) -> &'a str {
        match route.title_key {
            Some(key) => self.catalog.lookup(self.locale, key),
            None => route.name,
        }
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    pub async fn load_users(&mut self) -> Result<LoadOutcome, AppError> {
        Ok(self.users.load_from(&self.source).await?)
    }

    pub async fn load_products(&mut self) -> Result<LoadOutcome, AppError> {
        Ok(self.products.load_from(&self.source).await?)
    }
}
