//! Storefront page routes.
//!
//! Maps URL paths to the pages of the storefront and back. Rendering is
//! someone else's job; this only knows which page a path names and which
//! service data it needs an id for.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    ProductDetails(i64),
    CategoryDetails(i64),
    About,
}

impl Route {
    /// Resolve a path such as `/products/12`. Query strings, fragments and
    /// a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["products"] => Some(Route::Products),
            ["products", id] => id.parse().ok().map(Route::ProductDetails),
            ["category", id] => id.parse().ok().map(Route::CategoryDetails),
            ["about"] => Some(Route::About),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Products => "products",
            Route::ProductDetails(_) => "productDetails",
            Route::CategoryDetails(_) => "categoryDetails",
            Route::About => "about",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Products => "/products".to_string(),
            Route::ProductDetails(id) => format!("/products/{id}"),
            Route::CategoryDetails(id) => format!("/category/{id}"),
            Route::About => "/about".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
