//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{Cli, PageArgs, ProductFilterArgs, UserFilterArgs, ViewArgs};
use crate::config::Config;
use crate::context::AppContext;
use crate::error::AppError;
use crate::notifier::ConsoleNotifier;
use roster_core::primitives::{DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN};
use roster_core::{
    FilterPatch, IN_STOCK, Locale, Navigation, NumericRange, PendingMessages, Product,
    RecordId, Role, SortDirection, StepData, User, UserDraft, UserPatch, UserStatus, track,
    write_csv,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variables consulted for the system language, in order.
const LANGUAGE_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

// =============================================================================
// CONTEXT
// =============================================================================

/// Load the configuration and open local storage.
pub fn build_context(cli: &Cli) -> Result<AppContext, AppError> {
    let mut config = Config::load(&cli.config)?;
    if let Some(database) = &cli.database {
        config.storage.path.clone_from(database);
    }
    tracing::debug!(config = %cli.config.display(), "Configuration loaded");

    let language = system_language();
    let notifier = Arc::new(ConsoleNotifier::new(cli.quiet));
    AppContext::open(config, notifier, language.as_deref())
}

fn system_language() -> Option<String> {
    LANGUAGE_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SESSION COMMANDS
// =============================================================================

/// Log in with any non-empty email.
pub fn cmd_login(
    ctx: &mut AppContext,
    email: &str,
    password: &str,
    json_mode: bool,
) -> Result<(), AppError> {
    let user = ctx.login(email, password)?;
    if json_mode {
        print_json(&user);
    } else {
        println!("Logged in as {} <{}>", user.name, user.email);
    }
    Ok(())
}

/// Log out and clear the persisted session.
pub fn cmd_logout(ctx: &mut AppContext) -> Result<(), AppError> {
    ctx.logout()?;
    println!("Logged out");
    Ok(())
}

/// Show the current session.
pub fn cmd_whoami(ctx: &AppContext, json_mode: bool) -> Result<(), AppError> {
    if json_mode {
        print_json(&serde_json::json!({
            "isAuthenticated": ctx.auth.is_authenticated(),
            "user": ctx.auth.user(),
            "locale": ctx.locale,
        }));
        return Ok(());
    }

    match ctx.auth.user() {
        Some(user) if ctx.auth.is_authenticated() => {
            println!("{} <{}>", user.name, user.email);
        }
        _ => println!("Not logged in"),
    }
    println!("Locale: {}", ctx.locale);
    Ok(())
}

/// Show or change the locale.
pub fn cmd_locale(
    ctx: &mut AppContext,
    code: Option<&str>,
    json_mode: bool,
) -> Result<(), AppError> {
    if let Some(code) = code {
        let locale: Locale = code.parse()?;
        ctx.change_locale(locale)?;
        tracing::info!(%locale, "Locale changed");
    }
    if json_mode {
        print_json(&serde_json::json!({ "locale": ctx.locale }));
    } else {
        println!("{}", ctx.locale);
    }
    Ok(())
}

// =============================================================================
// NAVIGATION COMMANDS
// =============================================================================

/// Resolve a path for the current session.
pub fn cmd_navigate(ctx: &AppContext, path: &str, json_mode: bool) -> Result<(), AppError> {
    match ctx.navigate(path) {
        Navigation::Render(route) => {
            let title = ctx.title(route);
            if json_mode {
                print_json(&serde_json::json!({
                    "action": "render",
                    "route": route,
                    "title": title,
                }));
            } else {
                println!("{} → {} [{}]", route.path, title, route.layout);
            }
            Ok(())
        }
        Navigation::Redirect { to } => {
            if json_mode {
                print_json(&serde_json::json!({ "action": "redirect", "to": to }));
            } else {
                println!("{path} ⇒ {to}");
            }
            Ok(())
        }
        Navigation::NotFound => Err(AppError::PageNotFound(path.to_string())),
    }
}

/// List the route table.
pub fn cmd_routes(ctx: &AppContext, json_mode: bool) -> Result<(), AppError> {
    if json_mode {
        print_json(&ctx.router.routes());
        return Ok(());
    }

    println!("{:<26} {:<22} {:<8} {:<5} TITLE", "PATH", "NAME", "LAYOUT", "AUTH");
    for route in ctx.router.routes() {
        println!(
            "{:<26} {:<22} {:<8} {:<5} {}",
            route.path,
            route.name,
            route.layout,
            if route.requires_auth { "yes" } else { "no" },
            ctx.title(route)
        );
    }
    Ok(())
}

// =============================================================================
// FILTER BUILDING
// =============================================================================

fn view_patch(view: &ViewArgs) -> FilterPatch {
    let mut patch = FilterPatch::default();
    if let Some(search) = &view.search {
        patch = patch.search(search.clone());
    }
    if let Some(key) = &view.sort {
        patch.sort_key = Some(key.clone());
    }
    if view.desc {
        patch.direction = Some(SortDirection::Desc);
    }
    patch
}

fn user_patch(view: &ViewArgs, filter: &UserFilterArgs) -> FilterPatch {
    let mut patch = view_patch(view);
    if !filter.role.is_empty() {
        patch = patch.facet("role", filter.role.iter().map(|r| r.as_str()));
    }
    if !filter.status.is_empty() {
        patch = patch.facet("status", filter.status.iter().map(|s| s.as_str()));
    }
    patch
}

fn product_patch(view: &ViewArgs, filter: &ProductFilterArgs) -> FilterPatch {
    let mut patch = view_patch(view);
    if !filter.category.is_empty() {
        patch = patch.facet("category", filter.category.iter().cloned());
    }
    if filter.any_price {
        patch = patch.clear_range();
    } else if filter.min_price.is_some() || filter.max_price.is_some() {
        let min = filter.min_price.unwrap_or(DEFAULT_PRICE_MIN);
        let max = filter.max_price.unwrap_or(DEFAULT_PRICE_MAX);
        patch = patch.range(NumericRange::new("price", min.value(), max.value()));
    }
    if filter.in_stock {
        patch = patch.flag(IN_STOCK, true);
    }
    patch
}

/// Apply page options to the context paginator.
fn select_page(ctx: &mut AppContext, page: &PageArgs, len: usize) -> Result<(), AppError> {
    if let Some(size) = page.page_size {
        if size == 0 {
            return Err(AppError::InvalidArgument("page size must be at least 1".into()));
        }
        ctx.paginator.set_page_size(size);
    }
    let index = page.page.saturating_sub(1);
    if index > 0 && !ctx.paginator.go_to_page(index, len) {
        return Err(AppError::InvalidArgument(format!(
            "page {} does not exist ({} pages)",
            page.page,
            ctx.paginator.page_count(len)
        )));
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageView<'a, T> {
    page: usize,
    page_count: usize,
    total: usize,
    has_previous: bool,
    has_next: bool,
    items: &'a [T],
}

fn page_view<'a, T>(ctx: &AppContext, rows: &'a [T]) -> PageView<'a, T> {
    let state = ctx.paginator.state();
    PageView {
        page: state.page_index + 1,
        page_count: ctx.paginator.page_count(rows.len()),
        total: rows.len(),
        has_previous: ctx.paginator.has_previous(),
        has_next: ctx.paginator.has_next(rows.len()),
        items: ctx.paginator.page(rows),
    }
}

fn print_page_footer<T>(view: &PageView<'_, T>) {
    println!();
    println!(
        "Page {} of {} ({} total){}{}",
        view.page,
        view.page_count.max(1),
        view.total,
        if view.has_previous { " [prev]" } else { "" },
        if view.has_next { " [next]" } else { "" },
    );
}

fn export_rows<T: roster_core::Fields>(output: &Path, rows: &[T]) -> Result<(), AppError> {
    if write_csv(output, rows)? {
        println!("Exported {} rows to {}", rows.len(), output.display());
    } else {
        println!("Nothing to export");
    }
    Ok(())
}

// =============================================================================
// USER COMMANDS
// =============================================================================

fn print_users(users: &[User]) {
    println!("{:<38} {:<20} {:<26} {:<10} STATUS", "ID", "NAME", "EMAIL", "ROLE");
    for user in users {
        println!(
            "{:<38} {:<20} {:<26} {:<10} {}",
            user.id, user.name, user.email, user.role, user.status
        );
    }
}

/// Show one page of users.
pub async fn cmd_users_list(
    ctx: &mut AppContext,
    view: &ViewArgs,
    filter: &UserFilterArgs,
    page: &PageArgs,
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/users")?;
    ctx.load_users().await?;
    ctx.users.set_filter(user_patch(view, filter));

    let rows = ctx.users.filtered_view();
    select_page(ctx, page, rows.len())?;
    let listing = page_view(ctx, &rows);

    if json_mode {
        print_json(&listing);
    } else {
        print_users(listing.items);
        print_page_footer(&listing);
    }
    Ok(())
}

/// Export the filtered users.
pub async fn cmd_users_export(
    ctx: &mut AppContext,
    output: &Path,
    view: &ViewArgs,
    filter: &UserFilterArgs,
) -> Result<(), AppError> {
    ctx.require("/users")?;
    ctx.load_users().await?;
    ctx.users.set_filter(user_patch(view, filter));
    export_rows(output, &ctx.users.filtered_view())
}

/// Create a user in the loaded collection.
pub async fn cmd_users_create(
    ctx: &mut AppContext,
    name: String,
    email: String,
    role: Role,
    status: UserStatus,
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/users")?;
    ctx.load_users().await?;
    let user = ctx.users.create(UserDraft {
        name,
        email,
        role,
        status,
    })?;

    if json_mode {
        print_json(&user);
    } else {
        print_users(std::slice::from_ref(&user));
    }
    Ok(())
}

/// Update a user in the loaded collection.
pub async fn cmd_users_update(
    ctx: &mut AppContext,
    id: &str,
    patch: UserPatch,
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/users")?;
    ctx.load_users().await?;

    match ctx.users.update(&RecordId::new(id), patch)? {
        Some(user) if json_mode => print_json(&user),
        Some(user) => print_users(std::slice::from_ref(&user)),
        None => println!("No user with id {id}"),
    }
    Ok(())
}

/// Delete a user from the loaded collection.
pub async fn cmd_users_delete(ctx: &mut AppContext, id: &str) -> Result<(), AppError> {
    ctx.require("/users")?;
    ctx.load_users().await?;

    if ctx.users.delete(&RecordId::new(id))? {
        println!("Deleted {id}; {} users remain", ctx.users.records().len());
    } else {
        println!("No user with id {id}");
    }
    Ok(())
}

// =============================================================================
// PRODUCT COMMANDS
// =============================================================================

fn print_products(products: &[Product]) {
    println!(
        "{:<6} {:<22} {:<12} {:>10} {:>6}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for product in products {
        println!(
            "{:<6} {:<22} {:<12} {:>10} {:>6}",
            product.id, product.name, product.category, product.price, product.stock
        );
    }
}

/// Show one page of products.
pub async fn cmd_products_list(
    ctx: &mut AppContext,
    view: &ViewArgs,
    filter: &ProductFilterArgs,
    page: &PageArgs,
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/products")?;
    ctx.load_products().await?;
    ctx.products.set_filter(product_patch(view, filter));

    let rows = ctx.products.filtered_view();
    select_page(ctx, page, rows.len())?;
    let listing = page_view(ctx, &rows);

    if json_mode {
        print_json(&listing);
    } else {
        print_products(listing.items);
        print_page_footer(&listing);
    }
    Ok(())
}

/// Export the filtered products.
pub async fn cmd_products_export(
    ctx: &mut AppContext,
    output: &Path,
    view: &ViewArgs,
    filter: &ProductFilterArgs,
) -> Result<(), AppError> {
    ctx.require("/products")?;
    ctx.load_products().await?;
    ctx.products.set_filter(product_patch(view, filter));
    export_rows(output, &ctx.products.filtered_view())
}

/// List product categories.
pub async fn cmd_products_categories(
    ctx: &mut AppContext,
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/products")?;
    ctx.load_products().await?;
    let categories = ctx.products.distinct_values("category");

    if json_mode {
        print_json(&categories);
    } else {
        for category in categories {
            println!("{category}");
        }
    }
    Ok(())
}

// =============================================================================
// WORKFLOW COMMANDS
// =============================================================================

/// Create, update and delete a throwaway user against the loaded list.
pub async fn cmd_workflow_crud(ctx: &mut AppContext, json_mode: bool) -> Result<(), AppError> {
    ctx.require("/workflows/crud")?;
    ctx.load_users().await?;

    let created = ctx.users.create(UserDraft {
        name: "Demo User".into(),
        email: "demo@example.com".into(),
        role: Role::User,
        status: UserStatus::Pending,
    })?;
    let updated = ctx.users.update(
        &created.id,
        UserPatch {
            role: Some(Role::Moderator),
            status: Some(UserStatus::Active),
            ..UserPatch::default()
        },
    )?;
    let deleted = ctx.users.delete(&created.id)?;

    if json_mode {
        print_json(&serde_json::json!({
            "created": created,
            "updated": updated,
            "deleted": deleted,
            "remaining": ctx.users.filtered_view(),
        }));
    } else {
        println!("Created  {} ({})", created.name, created.id);
        if let Some(user) = &updated {
            println!("Updated  {} → {} / {}", user.name, user.role, user.status);
        }
        println!("Deleted  {deleted}");
        println!();
        print_users(&ctx.users.filtered_view());
    }
    Ok(())
}

/// Cart workflow options.
#[derive(Debug, Clone, Default)]
pub struct CartOrder {
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub export: Option<PathBuf>,
    pub checkout: bool,
}

/// Parse `ID` or `ID:QTY`.
pub fn parse_cart_entry(entry: &str) -> Result<(RecordId, u32), AppError> {
    let (id, quantity) = match entry.split_once(':') {
        Some((id, qty)) => {
            let qty = qty
                .parse()
                .map_err(|_| AppError::InvalidArgument(format!("bad quantity in {entry:?}")))?;
            (id, qty)
        }
        None => (entry, 1),
    };
    if id.is_empty() {
        return Err(AppError::InvalidArgument(format!("missing product id in {entry:?}")));
    }
    Ok((RecordId::new(id), quantity))
}

/// Fill the cart, show it, and optionally export or check out.
pub async fn cmd_workflow_cart(
    ctx: &mut AppContext,
    order: &CartOrder,
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/workflows/cart")?;
    ctx.load_products().await?;

    for entry in &order.add {
        let (id, quantity) = parse_cart_entry(entry)?;
        let product = ctx
            .products
            .get(&id)
            .ok_or_else(|| roster_core::RosterError::NotFound {
                kind: "Product",
                id: id.clone(),
            })?;
        ctx.cart.add_item(product, quantity);
    }
    for id in &order.remove {
        ctx.cart.remove_item(&RecordId::new(id.as_str()));
    }

    if let Some(path) = &order.export {
        export_rows(path, ctx.cart.items())?;
    }

    if json_mode {
        print_json(&serde_json::json!({
            "items": ctx.cart.items(),
            "totalItems": ctx.cart.total_items(),
            "totalPrice": ctx.cart.total_price(),
        }));
    } else {
        println!("{:<22} {:>4} {:>10}", "PRODUCT", "QTY", "SUBTOTAL");
        for item in ctx.cart.items() {
            println!(
                "{:<22} {:>4} {:>10}",
                item.product.name,
                item.quantity,
                item.subtotal()
            );
        }
        println!(
            "{} items, total {}",
            ctx.cart.total_items(),
            ctx.cart.total_price()
        );
    }

    if order.checkout {
        if ctx.cart.is_empty() {
            return Err(AppError::InvalidArgument("cannot check out an empty cart".into()));
        }
        let messages = PendingMessages::new(
            "Placing order...",
            "Order placed successfully!",
            "Failed to place order",
        );
        track(ctx.notifier.as_ref(), ctx.source.submit(), &messages).await?;
        ctx.cart.clear();
    }
    Ok(())
}

/// Walk the multi-step form and submit it.
pub async fn cmd_workflow_multi_step(
    ctx: &mut AppContext,
    steps: [StepData; 3],
    json_mode: bool,
) -> Result<(), AppError> {
    ctx.require("/workflows/multi-step")?;

    for data in steps {
        let step = data.step();
        ctx.form.set_step(step);
        ctx.form.update_step(data);
        tracing::debug!(step, "Form step filled");
        ctx.form.next_step();
    }
    ctx.form.submit(ctx.source.submit()).await?;

    if json_mode {
        print_json(&serde_json::json!({
            "complete": ctx.form.is_complete(),
            "data": ctx.form.data(),
        }));
    } else {
        println!("Form complete: {}", ctx.form.is_complete());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::Cents;

    #[test]
    fn cart_entries_default_to_one() {
        let (id, qty) = parse_cart_entry("3").expect("parse");
        assert_eq!(id, RecordId::new("3"));
        assert_eq!(qty, 1);
    }

    #[test]
    fn cart_entries_take_quantity() {
        let (id, qty) = parse_cart_entry("1:4").expect("parse");
        assert_eq!(id, RecordId::new("1"));
        assert_eq!(qty, 4);
        assert!(parse_cart_entry("1:x").is_err());
        assert!(parse_cart_entry(":2").is_err());
    }

    #[test]
    fn product_patch_defaults_missing_bound() {
        let filter = ProductFilterArgs {
            min_price: Some(Cents::new(100, 0)),
            ..ProductFilterArgs::default()
        };
        let patch = product_patch(&ViewArgs::default(), &filter);
        assert_eq!(
            patch.range,
            Some(Some(NumericRange::new(
                "price",
                Cents::new(100, 0).value(),
                DEFAULT_PRICE_MAX.value()
            )))
        );
    }

    #[test]
    fn any_price_clears_range() {
        let filter = ProductFilterArgs {
            any_price: true,
            in_stock: true,
            ..ProductFilterArgs::default()
        };
        let patch = product_patch(&ViewArgs::default(), &filter);
        assert_eq!(patch.range, Some(None));
        assert_eq!(patch.flags.get(IN_STOCK), Some(&true));
    }
}
