//! Shared access point for resource services.
//!
//! # Design
//! `ServiceProvider` is an explicit context object: build one at startup
//! and pass it by reference (or in an `Arc`) to whoever needs services.
//! Each resource service is created on first request and memoized, so every
//! caller shares one instance and one transport.
//!
//! The registry maps a resource's `SERVICE_NAME` to a type-erased
//! `Arc<dyn CrudService<R>>`. Registration is generic over `R`, so only a
//! value offering the full CRUD capability set for that resource can be
//! installed. First access re-checks under the write lock, so concurrent
//! callers never build two instances for the same key.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::service::{CrudService, ResourceService};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{Category, Product, Resource, User};

type Slot = Box<dyn Any + Send + Sync>;

pub struct ServiceProvider {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    instances: RwLock<HashMap<&'static str, Slot>>,
}

impl ServiceProvider {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Build a provider talking to `config.base_url` over `reqwest`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), &config.base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn category_service(&self) -> Arc<dyn CrudService<Category>> {
        self.service::<Category>()
    }

    pub fn product_service(&self) -> Arc<dyn CrudService<Product>> {
        self.service::<Product>()
    }

    pub fn user_service(&self) -> Arc<dyn CrudService<User>> {
        self.service::<User>()
    }

    /// Return the memoized service for `R`, building it on first use.
    pub fn service<R: Resource>(&self) -> Arc<dyn CrudService<R>> {
        if let Some(existing) = self.lookup::<R>() {
            return existing;
        }

        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = instances.get(R::SERVICE_NAME).and_then(|slot| downcast::<R>(slot)) {
            return existing;
        }

        tracing::debug!(service = R::SERVICE_NAME, "building service instance");
        let service: Arc<dyn CrudService<R>> =
            Arc::new(ResourceService::<R>::new(self.transport.clone(), &self.base_url));
        instances.insert(R::SERVICE_NAME, Box::new(service.clone()));
        service
    }

    /// Install `service` for `R`, replacing whatever was registered before.
    pub fn set_service<R: Resource>(&self, service: Arc<dyn CrudService<R>>) {
        tracing::debug!(service = R::SERVICE_NAME, "installing service instance");
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(R::SERVICE_NAME, Box::new(service));
    }

    pub fn has_service_instance(&self, name: &str) -> bool {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    fn lookup<R: Resource>(&self) -> Option<Arc<dyn CrudService<R>>> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(R::SERVICE_NAME)
            .and_then(|slot| downcast::<R>(slot))
    }
}

fn downcast<R: Resource>(slot: &Slot) -> Option<Arc<dyn CrudService<R>>> {
    (**slot).downcast_ref::<Arc<dyn CrudService<R>>>().cloned()
}
