//! # Mock Datasets
//!
//! Fixed literal data standing in for a remote API. Every record is stamped
//! with the `now` passed in.

use crate::{Cents, Product, RecordId, Role, User, UserStatus};
use chrono::{DateTime, Utc};

/// The three demo users.
#[must_use]
pub fn mock_users(now: DateTime<Utc>) -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role, status| User {
        id: RecordId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        created_at: now,
        avatar: None,
    };
    vec![
        user("1", "John Doe", "john@example.com", Role::Admin, UserStatus::Active),
        user("2", "Jane Smith", "jane@example.com", Role::User, UserStatus::Active),
        user(
            "3",
            "Bob Wilson",
            "bob@example.com",
            Role::Moderator,
            UserStatus::Pending,
        ),
    ]
}

/// The four demo products.
#[must_use]
pub fn mock_products(now: DateTime<Utc>) -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price, stock, category: &str| Product {
        id: RecordId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        stock,
        category: category.to_string(),
        image: None,
        created_at: now,
    };
    vec![
        product(
            "1",
            "Wireless Headphones",
            "High-quality wireless headphones with noise cancellation",
            Cents::new(299, 99),
            50,
            "Electronics",
        ),
        product(
            "2",
            "Smart Watch",
            "Feature-rich smartwatch with health tracking",
            Cents::new(399, 99),
            30,
            "Electronics",
        ),
        product(
            "3",
            "Coffee Maker",
            "Programmable coffee maker with thermal carafe",
            Cents::new(89, 99),
            0,
            "Home",
        ),
        product(
            "4",
            "Running Shoes",
            "Comfortable running shoes with extra cushioning",
            Cents::new(129, 99),
            100,
            "Sports",
        ),
    ]
}
