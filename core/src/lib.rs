//! Typed client core for the storefront REST API.
//!
//! # Overview
//! Exposes categories, products and users through one CRUD contract.
//! A `ServiceProvider` hands out a shared service per resource; each service
//! builds an `HttpRequest`, runs it through an `HttpTransport` and parses the
//! `HttpResponse` into a typed model.
//!
//! # Design
//! - `ResourceClient<R>` is sans-IO: `build_*` produces requests, `parse_*`
//!   consumes responses, so request mapping is testable without a socket.
//! - `HttpTransport` is the only I/O seam; `ReqwestTransport` is the default.
//! - Capabilities are separate traits (`Readable`, `Creatable`, `Editable`,
//!   `Deletable`) composed into `CrudService`.
//! - Models are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod routes;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{ListParams, ResourceClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use provider::ServiceProvider;
pub use routes::Route;
pub use service::{
    CategoryService, Creatable, CrudService, Deletable, Editable, ProductService, Readable,
    ResourceService, UserService,
};
pub use transport::{HttpTransport, ReqwestTransport};
pub use types::{
    Category, CategoryPatch, CategoryRef, NewCategory, NewProduct, NewUser, Product, ProductPatch,
    Resource, User, UserPatch,
};
