//! Product records.

use crate::filter::{FilterSpec, NumericRange};
use crate::primitives::{DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN};
use crate::record::{Fields, Record};
use crate::{Cents, FieldValue, RecordId, RosterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: Cents,
    pub stock: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create-form payload for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Cents,
    pub stock: u32,
    pub category: String,
}

/// Update-form payload for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Cents>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}

const PRODUCT_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "price",
    "stock",
    "category",
    "image",
    "createdAt",
];

/// Flag name for "at least one unit in stock".
pub const IN_STOCK: &str = "in_stock";

impl Product {
    /// Check whether at least one unit is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    fn validate(&self) -> Result<(), RosterError> {
        if self.name.trim().is_empty() {
            return Err(RosterError::Validation(
                "Product name must not be empty".into(),
            ));
        }
        if self.price < Cents::ZERO {
            return Err(RosterError::Validation(format!(
                "Product price must not be negative: {}",
                self.price
            )));
        }
        if self.category.trim().is_empty() {
            return Err(RosterError::Validation(
                "Product category must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Fields for Product {
    fn field_names(&self) -> &'static [&'static str] {
        PRODUCT_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.0.clone())),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "price" => Some(FieldValue::Money(self.price)),
            "stock" => Some(FieldValue::Integer(i64::from(self.stock))),
            "category" => Some(FieldValue::Text(self.category.clone())),
            "image" => self.image.clone().map(FieldValue::Text),
            "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

impl Record for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    const LABEL: &'static str = "Product";
    const PLURAL: &'static str = "Products";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == IN_STOCK).then_some(self.in_stock())
    }

    fn default_filter() -> FilterSpec {
        let mut spec = FilterSpec::sorted_by("name");
        spec.range = Some(NumericRange::new(
            "price",
            DEFAULT_PRICE_MIN.value(),
            DEFAULT_PRICE_MAX.value(),
        ));
        spec
    }

    fn from_draft(
        id: RecordId,
        created_at: DateTime<Utc>,
        draft: ProductDraft,
    ) -> Result<Self, RosterError> {
        let product = Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category: draft.category,
            image: None,
            created_at,
        };
        product.validate()?;
        Ok(product)
    }

    fn apply_patch(&mut self, patch: ProductPatch) -> Result<(), RosterError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(stock) = patch.stock {
            next.stock = stock;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}
