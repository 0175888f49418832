use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub images: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
}

#[derive(Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub image: String,
}

#[derive(Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,
    pub images: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar: String,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

/// Paging and product filters accepted on every collection endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub title: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,
}

impl ListQuery {
    fn page<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        items
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }

    fn matches(&self, product: &ProductRecord) -> bool {
        if let Some(title) = &self.title {
            if !product.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if self.price_min.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.category_id.is_some_and(|id| product.category_id != id) {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct ProductRecord {
    id: i64,
    title: String,
    price: f64,
    description: String,
    category_id: i64,
    images: Vec<String>,
}

/// In-memory tables with sequential ids per resource, starting at 1.
#[derive(Debug, Default)]
pub struct Store {
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, ProductRecord>,
    users: BTreeMap<i64, User>,
    next_category: i64,
    next_product: i64,
    next_user: i64,
}

impl Store {
    /// A small catalogue for local development.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let clothes = store.insert_category("Clothes", "https://placehold.co/600x400?text=clothes");
        let furniture = store.insert_category("Furniture", "https://placehold.co/600x400?text=furniture");
        store.insert_product(CreateProduct {
            title: "Classic Heather Gray Hoodie".to_string(),
            price: 69.0,
            description: "Soft cotton blend hoodie".to_string(),
            category_id: clothes.id,
            images: vec!["https://placehold.co/600x400?text=hoodie".to_string()],
        });
        store.insert_product(CreateProduct {
            title: "Sleek Wooden Chair".to_string(),
            price: 120.5,
            description: "Solid oak dining chair".to_string(),
            category_id: furniture.id,
            images: vec![],
        });
        store.insert_user(CreateUser {
            name: "Admin".to_string(),
            email: "admin@mail.com".to_string(),
            password: "admin123".to_string(),
            avatar: String::new(),
            role: Some("admin".to_string()),
        });
        store
    }

    fn insert_category(&mut self, name: &str, image: &str) -> Category {
        self.next_category += 1;
        let category = Category {
            id: self.next_category,
            name: name.to_string(),
            image: image.to_string(),
        };
        self.categories.insert(category.id, category.clone());
        category
    }

    fn insert_product(&mut self, input: CreateProduct) -> ProductRecord {
        self.next_product += 1;
        let record = ProductRecord {
            id: self.next_product,
            title: input.title,
            price: input.price,
            description: input.description,
            category_id: input.category_id,
            images: input.images,
        };
        self.products.insert(record.id, record.clone());
        record
    }

    fn insert_user(&mut self, input: CreateUser) -> User {
        self.next_user += 1;
        let user = User {
            id: self.next_user,
            name: input.name,
            role: input.role.unwrap_or_else(|| "customer".to_string()),
            email: input.email,
            password: input.password,
            avatar: input.avatar,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != except)
    }

    /// Products embed their category as it is now, not as it was at creation.
    fn render(&self, record: &ProductRecord) -> Product {
        Product {
            id: record.id,
            title: record.title.clone(),
            price: record.price,
            description: record.description.clone(),
            category: self.categories.get(&record.category_id).cloned(),
            images: record.images.clone(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

async fn list_categories(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Category>> {
    let store = db.read().await;
    Json(query.page(store.categories.values().cloned()))
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CreateCategory>,
) -> (StatusCode, Json<Category>) {
    let category = db.write().await.insert_category(&input.name, &input.image);
    tracing::info!(id = category.id, "category created");
    (StatusCode::CREATED, Json(category))
}

async fn get_category(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Category>, StatusCode> {
    let store = db.read().await;
    store.categories.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCategory>,
) -> Result<Json<Category>, StatusCode> {
    let mut store = db.write().await;
    let category = store.categories.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        category.name = name;
    }
    if let Some(image) = input.image {
        category.image = image;
    }
    Ok(Json(category.clone()))
}

async fn delete_category(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Category>, StatusCode> {
    let mut store = db.write().await;
    store.categories.remove(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

async fn list_products(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Product>> {
    let store = db.read().await;
    let matching = store.products.values().filter(|p| query.matches(p));
    Json(query.page(matching.map(|p| store.render(p))))
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    let mut store = db.write().await;
    if !store.categories.contains_key(&input.category_id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let record = store.insert_product(input);
    tracing::info!(id = record.id, "product created");
    Ok((StatusCode::CREATED, Json(store.render(&record))))
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    let record = store.products.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(store.render(record)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    if !store.products.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    if input.category_id.is_some_and(|c| !store.categories.contains_key(&c)) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let record = store.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        record.title = title;
    }
    if let Some(price) = input.price {
        record.price = price;
    }
    if let Some(description) = input.description {
        record.description = description;
    }
    if let Some(category_id) = input.category_id {
        record.category_id = category_id;
    }
    if let Some(images) = input.images {
        record.images = images;
    }
    let record = record.clone();
    Ok(Json(store.render(&record)))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let record = store.products.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(store.render(&record)))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn list_users(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(query.page(store.users.values().cloned()))
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), StatusCode> {
    let mut store = db.write().await;
    if store.email_taken(&input.email, None) {
        return Err(StatusCode::CONFLICT);
    }
    let user = store.insert_user(input);
    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut store = db.write().await;
    if !store.users.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    if let Some(email) = &input.email {
        if store.email_taken(email, Some(id)) {
            return Err(StatusCode::CONFLICT);
        }
    }
    let user = store.users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(password) = input.password {
        user.password = password;
    }
    if let Some(avatar) = input.avatar {
        user.avatar = avatar;
    }
    if let Some(role) = input.role {
        user.role = role;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    let mut store = db.write().await;
    store.users.remove(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}
