//! Storefront resources and their request payloads.
//!
//! # Design
//! The response types double as model wrappers: every field has a default,
//! so a payload with the right shape always deserializes even when the
//! server leaves fields out. Nothing here validates values. View-only
//! helpers (`price_label`, `primary_image`, ...) are computed on demand
//! rather than stored.
//!
//! A product's `category` is kept exactly as the server sent it, as an id,
//! a name, or an embedded record. See `CategoryRef`.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Binds a model to its REST collection and payload types.
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Path segment of the collection endpoint, e.g. `products`.
    const COLLECTION: &'static str;
    /// Registry key under which the `ServiceProvider` stores its service.
    const SERVICE_NAME: &'static str;

    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    fn id(&self) -> i64;
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const SERVICE_NAME: &'static str = "categoriesService";
    type Create = NewCategory;
    type Update = CategoryPatch;

    fn id(&self) -> i64 {
        self.id
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// How a product refers to its category on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
    Embedded(Category),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Product {
    /// Price formatted for display, e.g. `$12.50`.
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// The dedicated `image` if present, else the first gallery image.
    pub fn primary_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }

    /// Category name when the server sent one, either embedded or bare.
    pub fn category_name(&self) -> Option<&str> {
        match self.category.as_ref()? {
            CategoryRef::Embedded(category) => Some(&category.name),
            CategoryRef::Name(name) => Some(name),
            CategoryRef::Id(_) => None,
        }
    }

    /// Category id when the server sent one, either embedded or bare.
    pub fn category_id(&self) -> Option<i64> {
        match self.category.as_ref()? {
            CategoryRef::Embedded(category) => Some(category.id),
            CategoryRef::Id(id) => Some(*id),
            CategoryRef::Name(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const SERVICE_NAME: &'static str = "productService";
    type Create = NewProduct;
    type Update = ProductPatch;

    fn id(&self) -> i64 {
        self.id
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const SERVICE_NAME: &'static str = "userService";
    type Create = NewUser;
    type Update = UserPatch;

    fn id(&self) -> i64 {
        self.id
    }
}
