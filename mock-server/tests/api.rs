use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Category, Product, Store, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_categories_empty() {
    let resp = app().oneshot(empty_request("GET", "/categories")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let categories: Vec<Category> = body_json(resp).await;
    assert!(categories.is_empty());
}

#[tokio::test]
async fn list_products_paged() {
    let resp = app_with(Store::seeded())
        .oneshot(empty_request("GET", "/products?offset=1&limit=5"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 2);
}

#[tokio::test]
async fn list_products_by_category() {
    let resp = app_with(Store::seeded())
        .oneshot(empty_request("GET", "/products?categoryId=1"))
        .await
        .unwrap();

    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category.as_ref().unwrap().name, "Clothes");
}

#[tokio::test]
async fn list_products_by_price_range() {
    let resp = app_with(Store::seeded())
        .oneshot(empty_request("GET", "/products?price_min=50&price_max=100"))
        .await
        .unwrap();

    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, 69.0);
}

// --- create ---

#[tokio::test]
async fn create_category_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/categories", r#"{"name":"Shoes","image":"s.png"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Category = body_json(resp).await;
    assert_eq!(category.id, 1);
    assert_eq!(category.name, "Shoes");
}

#[tokio::test]
async fn create_product_embeds_category() {
    let resp = app_with(Store::seeded())
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"title":"Sofa","price":499,"description":"Three seats","categoryId":2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Product = body_json(resp).await;
    assert_eq!(product.id, 3);
    assert_eq!(product.category.unwrap().name, "Furniture");
}

#[tokio::test]
async fn create_product_unknown_category_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"title":"Sofa","price":499,"description":"x","categoryId":42}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_duplicate_email_returns_409() {
    let resp = app_with(Store::seeded())
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Other","email":"admin@mail.com","password":"pw"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_category_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/categories", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_user_not_found() {
    let resp = app().oneshot(empty_request("GET", "/users/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_product_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/products/not-a-number"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_category_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/categories/9", r#"{"name":"Nope"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/users/9")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn user_crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/users",
            r#"{"name":"Ann","email":"ann@mail.com","password":"secret"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    assert_eq!(created.role, "customer");
    let id = created.id;

    // list: contains the one user
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/users"))
        .await
        .unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users, vec![created.clone()]);

    // update: only role
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/users/{id}"), r#"{"role":"admin"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.role, "admin");
    assert_eq!(updated.email, "ann@mail.com"); // unchanged

    // delete returns the removed record
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: User = body_json(resp).await;
    assert_eq!(deleted, updated);

    // get after delete: 404 with empty body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}
