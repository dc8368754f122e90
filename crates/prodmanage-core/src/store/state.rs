use prodmanage_types::{Product, Toast};
use serde::Serialize;

/// Products slice of the application state.
///
/// `loading` is set between a request action and its matching success or
/// failure. `products` keeps backend order; creates append.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductsState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub toast: Option<Toast>,
}

impl ProductsState {
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
