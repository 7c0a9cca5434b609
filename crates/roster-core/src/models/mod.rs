//! # Record Models
//!
//! Concrete record types managed by the entity stores.

pub mod product;
pub mod user;

pub use product::{IN_STOCK, Product, ProductDraft, ProductPatch};
pub use user::{Role, User, UserDraft, UserPatch, UserStatus};
