//! Product endpoints. All of them require a session.

use prodmanage_types::{Pagination, Product, ProductFormData, ProductPatch, ProductQuery};
use reqwest::Method;
use serde::Deserialize;

use super::{ApiResult, decode, expect_ok};
use crate::auth::AuthContext;

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Product,
}

/// `GET /products`.
///
/// # Errors
/// Returns an error on transport failure, a non-OK status, or a body without
/// a `products` array.
pub async fn list(auth: &mut AuthContext, query: &ProductQuery) -> ApiResult<ProductPage> {
    let request = auth.api().request(Method::GET, &["products"]).query(query);
    let response = auth.make_authenticated_request(request).await?;
    decode(response).await
}

/// `GET /products/:id`.
///
/// # Errors
/// Returns an error on transport failure or a non-OK status.
pub async fn get(auth: &mut AuthContext, id: &str) -> ApiResult<Product> {
    let request = auth.api().request(Method::GET, &["products", id]);
    let response = auth.make_authenticated_request(request).await?;
    let envelope: ProductEnvelope = decode(response).await?;
    Ok(envelope.product)
}

/// `POST /products`.
///
/// # Errors
/// Returns an error on transport failure or a non-OK status.
pub async fn create(auth: &mut AuthContext, form: &ProductFormData) -> ApiResult<Product> {
    let request = auth.api().request(Method::POST, &["products"]).json(form);
    let response = auth.make_authenticated_request(request).await?;
    let envelope: ProductEnvelope = decode(response).await?;
    Ok(envelope.product)
}

/// `PUT /products/:id` with only the fields present in `patch`.
///
/// # Errors
/// Returns an error on transport failure or a non-OK status.
pub async fn update(auth: &mut AuthContext, id: &str, patch: &ProductPatch) -> ApiResult<Product> {
    let request = auth.api().request(Method::PUT, &["products", id]).json(patch);
    let response = auth.make_authenticated_request(request).await?;
    let envelope: ProductEnvelope = decode(response).await?;
    Ok(envelope.product)
}

/// `DELETE /products/:id`. The success body is not inspected.
///
/// # Errors
/// Returns an error on transport failure or a non-OK status.
pub async fn delete(auth: &mut AuthContext, id: &str) -> ApiResult<()> {
    let request = auth.api().request(Method::DELETE, &["products", id]);
    let response = auth.make_authenticated_request(request).await?;
    expect_ok(response).await
}
