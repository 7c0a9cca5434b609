//! Integration tests for the application context: session, navigation and
//! data loading through the mock source.

#![allow(clippy::unwrap_used, clippy::panic)]

use roster::{AppContext, AppError, Config};
use roster_core::{
    Locale, LoadOutcome, MemoryStorage, Navigation, Notifier, RecordingNotifier, RosterError,
    Severity,
};
use std::sync::Arc;
use tempfile::tempdir;

fn instant_config() -> Config {
    let mut config = Config::default();
    config.data.latency_ms = 0;
    config.data.submit_latency_ms = 0;
    config
}

fn memory_context(config: Config) -> (AppContext, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = AppContext::new(
        config,
        Box::new(MemoryStorage::new()),
        notifier.clone() as Arc<dyn Notifier>,
        None,
    );
    (ctx, notifier)
}

// =============================================================================
// SESSION & NAVIGATION
// =============================================================================

#[test]
fn test_protected_pages_require_login() {
    let (mut ctx, _) = memory_context(instant_config());

    match ctx.require("/users") {
        Err(AppError::LoginRequired { redirect }) => {
            assert_eq!(redirect, "/login?redirect=%2Fusers");
        }
        other => panic!("expected login redirect, got {other:?}"),
    }

    ctx.login("ada@example.com", "").unwrap();
    assert_eq!(ctx.require("/users").unwrap().name, "users");
    assert_eq!(ctx.require("/workflows").unwrap().name, "workflow-crud");
    assert!(matches!(
        ctx.require("/missing"),
        Err(AppError::PageNotFound(_))
    ));
}

#[test]
fn test_session_and_locale_survive_reopen() {
    let dir = tempdir().unwrap();
    let mut config = instant_config();
    config.storage.path = dir.path().join("local.redb");

    {
        let mut ctx = AppContext::open(
            config.clone(),
            Arc::new(RecordingNotifier::new()),
            Some("fr_FR.UTF-8"),
        )
        .unwrap();
        assert_eq!(ctx.locale, Locale::Fr);
        ctx.login("grace@example.com", "").unwrap();
        ctx.change_locale(Locale::En).unwrap();
    }

    let ctx = AppContext::open(config, Arc::new(RecordingNotifier::new()), None).unwrap();
    assert!(ctx.auth.is_authenticated());
    assert_eq!(ctx.auth.user().map(|u| u.name.as_str()), Some("grace"));
    assert_eq!(ctx.locale, Locale::En);
    assert_eq!(
        ctx.navigate("/login"),
        Navigation::Redirect {
            to: "/dashboard".into()
        }
    );
}

#[test]
fn test_route_titles_follow_locale() {
    let (mut ctx, _) = memory_context(instant_config());
    let route = ctx.router.by_name("users").unwrap().clone();
    assert_eq!(ctx.title(&route), "Utilisateurs");

    ctx.change_locale(Locale::En).unwrap();
    assert_eq!(ctx.title(&route), "Users");
}

// =============================================================================
// DATA LOADING
// =============================================================================

#[tokio::test]
async fn test_mock_source_loads_both_collections() {
    let (mut ctx, notifier) = memory_context(instant_config());

    assert_eq!(ctx.load_users().await.unwrap(), LoadOutcome::Applied(3));
    assert_eq!(ctx.load_products().await.unwrap(), LoadOutcome::Applied(4));

    let messages: Vec<String> = notifier
        .notifications()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(
        messages,
        ["Users loaded successfully", "Products loaded successfully"]
    );
}

#[tokio::test]
async fn test_fail_fetch_surfaces_error() {
    let mut config = instant_config();
    config.data.fail_fetch = true;
    let (mut ctx, notifier) = memory_context(config);

    let result = ctx.load_products().await;
    assert!(matches!(
        result,
        Err(AppError::Roster(RosterError::Fetch(_)))
    ));
    assert_eq!(notifier.last().map(|n| n.severity), Some(Severity::Error));
    assert_eq!(
        notifier.last().map(|n| n.message),
        Some("Failed to load products".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_simulated() {
    let (mut ctx, _) = memory_context(Config::default());

    let started = tokio::time::Instant::now();
    ctx.load_users().await.unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_millis(500));
}

#[tokio::test]
async fn test_strict_policy_from_config() {
    let mut config = instant_config();
    config.stores.missing_record_policy = roster_core::MissingRecordPolicy::Strict;
    let (mut ctx, _) = memory_context(config);
    ctx.load_users().await.unwrap();

    let result = ctx.users.delete(&roster_core::RecordId::new("404"));
    assert!(matches!(result, Err(RosterError::NotFound { .. })));
    assert_eq!(ctx.users.records().len(), 3);
}
