//! Capability traits and the generic resource service.
//!
//! # Design
//! Each CRUD capability is its own trait so a consumer can ask for exactly
//! what it needs (`impl Readable<Product>`), and `CrudService` bundles all
//! four for the `ServiceProvider`. `ResourceService<R>` implements every
//! capability the same way: build the request, hand it to the transport,
//! parse the response. Failures propagate unchanged, with no retries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::{ListParams, ResourceClient};
use crate::error::ApiError;
use crate::transport::HttpTransport;
use crate::types::{Category, Product, Resource, User};

#[async_trait]
pub trait Readable<R: Resource>: Send + Sync {
    /// Fetch the collection, optionally filtered, in server order.
    async fn list(&self, params: ListParams) -> Result<Vec<R>, ApiError>;

    async fn get_by_id(&self, id: i64) -> Result<R, ApiError>;
}

#[async_trait]
pub trait Creatable<R: Resource>: Send + Sync {
    /// Returns the server's representation of the new record.
    async fn create(&self, data: R::Create) -> Result<R, ApiError>;
}

#[async_trait]
pub trait Editable<R: Resource>: Send + Sync {
    async fn update(&self, id: i64, data: R::Update) -> Result<R, ApiError>;
}

#[async_trait]
pub trait Deletable<R: Resource>: Send + Sync {
    /// Returns the record as the server last knew it.
    async fn delete(&self, id: i64) -> Result<R, ApiError>;
}

/// The full CRUD capability set. Implemented for anything that has all four.
pub trait CrudService<R: Resource>: Readable<R> + Creatable<R> + Editable<R> + Deletable<R> {}

impl<R, T> CrudService<R> for T
where
    R: Resource,
    T: Readable<R> + Creatable<R> + Editable<R> + Deletable<R>,
{
}

/// CRUD service over one REST collection.
pub struct ResourceService<R> {
    transport: Arc<dyn HttpTransport>,
    client: ResourceClient<R>,
}

pub type CategoryService = ResourceService<Category>;
pub type ProductService = ResourceService<Product>;
pub type UserService = ResourceService<User>;

impl<R: Resource> ResourceService<R> {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str) -> Self {
        Self {
            transport,
            client: ResourceClient::new(base_url),
        }
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }
}

#[async_trait]
impl<R: Resource> Readable<R> for ResourceService<R> {
    #[tracing::instrument(skip(self), fields(resource = R::COLLECTION))]
    async fn list(&self, params: ListParams) -> Result<Vec<R>, ApiError> {
        tracing::debug!("Sending request");
        let response = self.transport.execute(self.client.build_list(&params)).await?;
        let items = self.client.parse_list(response)?;
        tracing::debug!(count = items.len(), "listed");
        Ok(items)
    }

    #[tracing::instrument(skip(self), fields(resource = R::COLLECTION))]
    async fn get_by_id(&self, id: i64) -> Result<R, ApiError> {
        tracing::debug!("Sending request");
        let response = self.transport.execute(self.client.build_get(id)).await?;
        self.client.parse_one(response)
    }
}

#[async_trait]
impl<R: Resource> Creatable<R> for ResourceService<R> {
    #[tracing::instrument(skip(self, data), fields(resource = R::COLLECTION))]
    async fn create(&self, data: R::Create) -> Result<R, ApiError> {
        tracing::debug!("Sending request");
        let request = self.client.build_create(&data)?;
        let created = self.client.parse_one(self.transport.execute(request).await?)?;
        tracing::debug!(id = created.id(), "created");
        Ok(created)
    }
}

#[async_trait]
impl<R: Resource> Editable<R> for ResourceService<R> {
    #[tracing::instrument(skip(self, data), fields(resource = R::COLLECTION))]
    async fn update(&self, id: i64, data: R::Update) -> Result<R, ApiError> {
        tracing::debug!("Sending request");
        let request = self.client.build_update(id, &data)?;
        self.client.parse_one(self.transport.execute(request).await?)
    }
}

#[async_trait]
impl<R: Resource> Deletable<R> for ResourceService<R> {
    #[tracing::instrument(skip(self), fields(resource = R::COLLECTION))]
    async fn delete(&self, id: i64) -> Result<R, ApiError> {
        tracing::debug!("Sending request");
        let response = self.transport.execute(self.client.build_delete(id)).await?;
        self.client.parse_one(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::types::{NewCategory, UserPatch};

    /// Replays canned responses and records every request it sees.
    struct ScriptedTransport {
        responses: Mutex<Vec<Result<HttpResponse, ApiError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            self.responses.lock().unwrap().pop().expect("no scripted response left")
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[tokio::test]
    async fn list_forwards_params_and_wraps_each_element() {
        let transport = ScriptedTransport::new(vec![ok(
            200,
            r#"[{"id":2,"title":"B","price":5},{"id":1,"title":"A","price":3}]"#,
        )]);
        let service = ProductService::new(transport.clone(), "http://api.test");

        let products = service.list(ListParams::new().limit(2)).await.unwrap();
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(products[1].price_label(), "$3.00");

        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "http://api.test/products");
        assert_eq!(seen[0].query, vec![("limit".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn create_posts_payload() {
        let transport = ScriptedTransport::new(vec![ok(
            201,
            r#"{"id":11,"name":"Toys","image":"toys.png"}"#,
        )]);
        let service = CategoryService::new(transport.clone(), "http://api.test");

        let created = service
            .create(NewCategory {
                name: "Toys".to_string(),
                image: "toys.png".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 11);
        assert_eq!(transport.seen()[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn update_puts_to_item_url() {
        let transport = ScriptedTransport::new(vec![ok(200, r#"{"id":4,"name":"Ann","role":"admin"}"#)]);
        let service = UserService::new(transport.clone(), "http://api.test");

        let patch = UserPatch {
            role: Some("admin".to_string()),
            ..UserPatch::default()
        };
        let user = service.update(4, patch).await.unwrap();
        assert!(user.is_admin());

        let seen = transport.seen();
        assert_eq!(seen[0].method, HttpMethod::Put);
        assert_eq!(seen[0].path, "http://api.test/users/4");
    }

    #[tokio::test]
    async fn delete_returns_last_known_state() {
        let transport = ScriptedTransport::new(vec![ok(200, r#"{"id":4,"name":"Ann"}"#)]);
        let service = UserService::new(transport.clone(), "http://api.test");

        let user = service.delete(4).await.unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(transport.seen()[0].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn get_by_id_not_found() {
        let transport = ScriptedTransport::new(vec![ok(404, "")]);
        let service = ProductService::new(transport, "http://api.test");
        let err = service.get_by_id(99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn transport_failure_propagates_unchanged() {
        let transport = ScriptedTransport::new(vec![Err(ApiError::Transport("connection refused".into()))]);
        let service = ProductService::new(transport.clone(), "http://api.test");
        let err = service.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref msg) if msg == "connection refused"));
        assert_eq!(transport.seen().len(), 1, "no retry");
    }
}
