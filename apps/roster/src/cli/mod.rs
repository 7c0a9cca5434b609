//! # Roster CLI Module
//!
//! This module implements the CLI interface for Roster.
//!
//! ## Available Commands
//!
//! - `login` / `logout` / `whoami` - Mock session management
//! - `locale` - Show or change the interface language
//! - `navigate` / `routes` - Resolve paths through the route guard
//! - `users` - List, export, create, update and delete users
//! - `products` - List and export products, list categories
//! - `workflow` - Run the CRUD, cart and multi-step form workflows

mod commands;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::AppError;
use clap::{Args, Parser, Subcommand};
use roster_core::{Cents, Role, UserStatus};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Roster - admin dashboard for users and products
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress notification output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Path to the local storage database (overrides `storage.path`)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a session (any password is accepted)
    Login {
        email: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// End the session
    Logout,

    /// Show the current session
    Whoami,

    /// Show or set the interface language (en, fr)
    Locale { code: Option<String> },

    /// Resolve a path through redirects and the auth guard
    Navigate { path: String },

    /// List every route
    Routes,

    /// Manage users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Browse products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Run an end-to-end workflow
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Show one page of the filtered user list
    List {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        filter: UserFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Export the filtered user list as CSV
    Export {
        #[arg(short, long, default_value = roster_core::DEFAULT_EXPORT_FILE)]
        output: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        filter: UserFilterArgs,
    },

    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "user")]
        role: Role,
        #[arg(long, default_value = "active")]
        status: UserStatus,
    },

    /// Update fields of a user
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        status: Option<UserStatus>,
    },

    /// Delete a user
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Show one page of the filtered product list
    List {
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        filter: ProductFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Export the filtered product list as CSV
    Export {
        #[arg(short, long, default_value = roster_core::DEFAULT_EXPORT_FILE)]
        output: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        #[command(flatten)]
        filter: ProductFilterArgs,
    },

    /// List distinct product categories
    Categories,
}

#[derive(Subcommand, Debug)]
pub enum WorkflowCommands {
    /// Load, create, update and delete a user in one run
    Crud,

    /// Fill a cart and optionally check out
    Cart {
        /// Product to add, as `ID` or `ID:QUANTITY`
        #[arg(long = "add", value_name = "ID[:QTY]")]
        add: Vec<String>,

        /// Product to remove
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<String>,

        /// Write the cart to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Place the order and empty the cart
        #[arg(long)]
        checkout: bool,
    },

    /// Step through the three-step form and submit it
    MultiStep {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        zip_code: String,
        #[arg(long, default_value = "card")]
        payment_method: String,
        #[arg(long)]
        accept_terms: bool,
    },
}

/// Search and sort options shared by list and export commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

/// Page selection for list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (overrides `table.page_size`)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UserFilterArgs {
    /// Only users with this role (repeatable)
    #[arg(long)]
    pub role: Vec<Role>,

    /// Only users with this status (repeatable)
    #[arg(long)]
    pub status: Vec<UserStatus>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProductFilterArgs {
    /// Only products in this category (repeatable)
    #[arg(long)]
    pub category: Vec<String>,

    /// Lowest price, e.g. `15` or `15.50`
    #[arg(long)]
    pub min_price: Option<Cents>,

    /// Highest price
    #[arg(long)]
    pub max_price: Option<Cents>,

    /// Drop the price range entirely
    #[arg(long, conflicts_with_all = ["min_price", "max_price"])]
    pub any_price: bool,

    /// Only products with stock left
    #[arg(long)]
    pub in_stock: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let mut ctx = build_context(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Login { email, password }) => {
            cmd_login(&mut ctx, &email, &password, json_mode)
        }
        Some(Commands::Logout) => cmd_logout(&mut ctx),
        Some(Commands::Whoami) | None => cmd_whoami(&ctx, json_mode),
        Some(Commands::Locale { code }) => cmd_locale(&mut ctx, code.as_deref(), json_mode),
        Some(Commands::Navigate { path }) => cmd_navigate(&ctx, &path, json_mode),
        Some(Commands::Routes) => cmd_routes(&ctx, json_mode),
        Some(Commands::Users { command }) => match command {
            UserCommands::List { view, filter, page } => {
                cmd_users_list(&mut ctx, &view, &filter, &page, json_mode).await
            }
            UserCommands::Export {
                output,
                view,
                filter,
            } => cmd_users_export(&mut ctx, &output, &view, &filter).await,
            UserCommands::Create {
                name,
                email,
                role,
                status,
            } => cmd_users_create(&mut ctx, name, email, role, status, json_mode).await,
            UserCommands::Update {
                id,
                name,
                email,
                role,
                status,
            } => {
                let patch = roster_core::UserPatch {
                    name,
                    email,
                    role,
                    status,
                };
                cmd_users_update(&mut ctx, &id, patch, json_mode).await
            }
            UserCommands::Delete { id } => cmd_users_delete(&mut ctx, &id).await,
        },
        Some(Commands::Products { command }) => match command {
            ProductCommands::List { view, filter, page } => {
                cmd_products_list(&mut ctx, &view, &filter, &page, json_mode).await
            }
            ProductCommands::Export {
                output,
                view,
                filter,
            } => cmd_products_export(&mut ctx, &output, &view, &filter).await,
            ProductCommands::Categories => cmd_products_categories(&mut ctx, json_mode).await,
        },
        Some(Commands::Workflow { command }) => match command {
            WorkflowCommands::Crud => cmd_workflow_crud(&mut ctx, json_mode).await,
            WorkflowCommands::Cart {
                add,
                remove,
                export,
                checkout,
            } => {
                let order = CartOrder {
                    add,
                    remove,
                    export,
                    checkout,
                };
                cmd_workflow_cart(&mut ctx, &order, json_mode).await
            }
            WorkflowCommands::MultiStep {
                first_name,
                last_name,
                email,
                address,
                city,
                zip_code,
                payment_method,
                accept_terms,
            } => {
                let steps = [
                    roster_core::StepData::Contact(roster_core::ContactDetails {
                        first_name,
                        last_name,
                        email,
                    }),
                    roster_core::StepData::Address(roster_core::ShippingAddress {
                        address,
                        city,
                        zip_code,
                    }),
                    roster_core::StepData::Payment(roster_core::PaymentDetails {
                        payment_method,
                        terms: accept_terms,
                    }),
                ];
                cmd_workflow_multi_step(&mut ctx, steps, json_mode).await
            }
        },
    }
}
