//! Product actions and their creators.

use prodmanage_types::Product;
use serde::{Deserialize, Serialize};

/// Everything the products reducer reacts to.
///
/// Serialized as `{ "type": "READ_PRODUCTS_SUCCESS", "payload": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductAction {
    ReadProductsRequest,
    ReadProductsSuccess(Vec<Product>),
    ReadProductsFailure(String),
    CreateProductRequest,
    CreateProductSuccess(Product),
    CreateProductFailure(String),
    UpdateProductRequest,
    UpdateProductSuccess(Product),
    UpdateProductFailure(String),
    DeleteProductRequest,
    /// Carries the id of the removed product.
    DeleteProductSuccess(String),
    DeleteProductFailure(String),
    ClearToast,
}

impl ProductAction {
    /// The action's wire tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReadProductsRequest => "READ_PRODUCTS_REQUEST",
            Self::ReadProductsSuccess(_) => "READ_PRODUCTS_SUCCESS",
            Self::ReadProductsFailure(_) => "READ_PRODUCTS_FAILURE",
            Self::CreateProductRequest => "CREATE_PRODUCT_REQUEST",
            Self::CreateProductSuccess(_) => "CREATE_PRODUCT_SUCCESS",
            Self::CreateProductFailure(_) => "CREATE_PRODUCT_FAILURE",
            Self::UpdateProductRequest => "UPDATE_PRODUCT_REQUEST",
            Self::UpdateProductSuccess(_) => "UPDATE_PRODUCT_SUCCESS",
            Self::UpdateProductFailure(_) => "UPDATE_PRODUCT_FAILURE",
            Self::DeleteProductRequest => "DELETE_PRODUCT_REQUEST",
            Self::DeleteProductSuccess(_) => "DELETE_PRODUCT_SUCCESS",
            Self::DeleteProductFailure(_) => "DELETE_PRODUCT_FAILURE",
            Self::ClearToast => "CLEAR_TOAST",
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::ReadProductsRequest
                | Self::CreateProductRequest
                | Self::UpdateProductRequest
                | Self::DeleteProductRequest
        )
    }

    /// Success and failure actions raise a toast.
    pub fn sets_toast(&self) -> bool {
        !self.is_request() && !matches!(self, Self::ClearToast)
    }
}

pub fn read_products_request() -> ProductAction {
    ProductAction::ReadProductsRequest
}

pub fn read_products_success(products: Vec<Product>) -> ProductAction {
    ProductAction::ReadProductsSuccess(products)
}

pub fn read_products_failure(error: impl Into<String>) -> ProductAction {
    ProductAction::ReadProductsFailure(error.into())
}

pub fn create_product_request() -> ProductAction {
    ProductAction::CreateProductRequest
}

pub fn create_product_success(product: Product) -> ProductAction {
    ProductAction::CreateProductSuccess(product)
}

pub fn create_product_failure(error: impl Into<String>) -> ProductAction {
    ProductAction::CreateProductFailure(error.into())
}

pub fn update_product_request() -> ProductAction {
    ProductAction::UpdateProductRequest
}

pub fn update_product_success(product: Product) -> ProductAction {
    ProductAction::UpdateProductSuccess(product)
}

pub fn update_product_failure(error: impl Into<String>) -> ProductAction {
    ProductAction::UpdateProductFailure(error.into())
}

pub fn delete_product_request() -> ProductAction {
    ProductAction::DeleteProductRequest
}

pub fn delete_product_success(id: impl Into<String>) -> ProductAction {
    ProductAction::DeleteProductSuccess(id.into())
}

pub fn delete_product_failure(error: impl Into<String>) -> ProductAction {
    ProductAction::DeleteProductFailure(error.into())
}

pub fn clear_toast() -> ProductAction {
    ProductAction::ClearToast
}
