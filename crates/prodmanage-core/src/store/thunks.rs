//! Async product operations.
//!
//! Each thunk dispatches a request action, performs exactly one call through
//! the auth context, then dispatches the matching success or failure. The
//! outcome is also returned so callers can react to it (pagination, 401).

use prodmanage_types::{Pagination, Product, ProductFormData, ProductPatch, ProductQuery};
use tracing::warn;

use super::Dispatch;
use super::actions;
use crate::api::{ApiResult, products};
use crate::auth::AuthContext;

pub const FETCH_FALLBACK: &str = "Failed to fetch products";
pub const CREATE_FALLBACK: &str = "Failed to create product";
pub const UPDATE_FALLBACK: &str = "Failed to update product";
pub const DELETE_FALLBACK: &str = "Failed to delete product";

/// Loads a page of products. Returns the pagination block, if the backend
/// sent one.
///
/// # Errors
/// Returns the API error after dispatching `READ_PRODUCTS_FAILURE`.
pub async fn fetch_products<D: Dispatch + ?Sized>(
    dispatch: &mut D,
    auth: &mut AuthContext,
    query: &ProductQuery,
) -> ApiResult<Option<Pagination>> {
    dispatch.dispatch(actions::read_products_request());
    match products::list(auth, query).await {
        Ok(page) => {
            dispatch.dispatch(actions::read_products_success(page.products));
            Ok(page.pagination)
        }
        Err(err) => {
            warn!(error = %err, "fetching products failed");
            dispatch.dispatch(actions::read_products_failure(
                err.failure_message(FETCH_FALLBACK),
            ));
            Err(err)
        }
    }
}

/// # Errors
/// Returns the API error after dispatching `CREATE_PRODUCT_FAILURE`.
pub async fn create_product<D: Dispatch + ?Sized>(
    dispatch: &mut D,
    auth: &mut AuthContext,
    form: &ProductFormData,
) -> ApiResult<Product> {
    dispatch.dispatch(actions::create_product_request());
    match products::create(auth, form).await {
        Ok(product) => {
            dispatch.dispatch(actions::create_product_success(product.clone()));
            Ok(product)
        }
        Err(err) => {
            warn!(error = %err, "creating product failed");
            dispatch.dispatch(actions::create_product_failure(
                err.failure_message(CREATE_FALLBACK),
            ));
            Err(err)
        }
    }
}

/// # Errors
/// Returns the API error after dispatching `UPDATE_PRODUCT_FAILURE`.
pub async fn update_product<D: Dispatch + ?Sized>(
    dispatch: &mut D,
    auth: &mut AuthContext,
    id: &str,
    patch: &ProductPatch,
) -> ApiResult<Product> {
    dispatch.dispatch(actions::update_product_request());
    match products::update(auth, id, patch).await {
        Ok(product) => {
            dispatch.dispatch(actions::update_product_success(product.clone()));
            Ok(product)
        }
        Err(err) => {
            warn!(error = %err, id, "updating product failed");
            dispatch.dispatch(actions::update_product_failure(
                err.failure_message(UPDATE_FALLBACK),
            ));
            Err(err)
        }
    }
}

/// Deletes a product. Success carries the requested id.
///
/// # Errors
/// Returns the API error after dispatching `DELETE_PRODUCT_FAILURE`.
pub async fn delete_product<D: Dispatch + ?Sized>(
    dispatch: &mut D,
    auth: &mut AuthContext,
    id: &str,
) -> ApiResult<()> {
    dispatch.dispatch(actions::delete_product_request());
    match products::delete(auth, id).await {
        Ok(()) => {
            dispatch.dispatch(actions::delete_product_success(id));
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, id, "deleting product failed");
            dispatch.dispatch(actions::delete_product_failure(
                err.failure_message(DELETE_FALLBACK),
            ));
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::{ApiClient, ApiError};
    use crate::storage::{LocalStorage, TOKEN_KEY, USER_KEY};
    use crate::store::{CREATE_SUCCESS_MESSAGE, ProductAction, Store};

    fn signed_in(server: &MockServer) -> AuthContext {
        let mut storage = LocalStorage::in_memory();
        storage.set(TOKEN_KEY, "tok-123").unwrap();
        storage
            .set(
                USER_KEY,
                json!({ "_id": "u1", "name": "Ada", "email": "ada@example.com" }).to_string(),
            )
            .unwrap();
        let api = ApiClient::new(&format!("{}/api", server.uri())).unwrap();
        AuthContext::restore(api, storage)
    }

    fn product_json(id: &str, title: &str) -> serde_json::Value {
        json!({ "id": id, "title": title, "image": "http://x/1.png", "description": "d", "price": 9.99 })
    }

    fn form() -> ProductFormData {
        ProductFormData {
            title: "A".to_string(),
            image: "http://x/1.png".to_string(),
            description: "d".to_string(),
            price: 9.99,
        }
    }

    #[tokio::test]
    async fn test_fetch_dispatches_request_then_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json("1", "A"), product_json("2", "B")]
            })))
            .mount(&server)
            .await;

        let mut auth = signed_in(&server);
        let mut recorded: Vec<ProductAction> = Vec::new();
        let pagination = fetch_products(&mut recorded, &mut auth, &ProductQuery::default())
            .await
            .unwrap();

        assert_eq!(pagination, None);
        let kinds: Vec<_> = recorded.iter().map(ProductAction::kind).collect();
        assert_eq!(kinds, ["READ_PRODUCTS_REQUEST", "READ_PRODUCTS_SUCCESS"]);
        let ProductAction::ReadProductsSuccess(products) = &recorded[1] else {
            panic!("expected success, got {:?}", recorded[1]);
        };
        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn test_create_failure_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Title, description, and price are required"
            })))
            .mount(&server)
            .await;

        let mut auth = signed_in(&server);
        let mut recorded: Vec<ProductAction> = Vec::new();
        let err = create_product(&mut recorded, &mut auth, &form())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(
            recorded,
            vec![
                actions::create_product_request(),
                actions::create_product_failure("Title, description, and price are required"),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_failure_falls_back_without_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/products/p1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
            .mount(&server)
            .await;

        let mut auth = signed_in(&server);
        let mut recorded: Vec<ProductAction> = Vec::new();
        let patch = ProductPatch {
            title: Some("B".to_string()),
            ..Default::default()
        };
        update_product(&mut recorded, &mut auth, "p1", &patch)
            .await
            .unwrap_err();

        assert_eq!(recorded[1], actions::update_product_failure(UPDATE_FALLBACK));
    }

    #[tokio::test]
    async fn test_delete_success_carries_requested_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/products/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let mut auth = signed_in(&server);
        let mut recorded: Vec<ProductAction> = Vec::new();
        delete_product(&mut recorded, &mut auth, "p1").await.unwrap();

        assert_eq!(
            recorded,
            vec![
                actions::delete_product_request(),
                actions::delete_product_success("p1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let api = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        let mut auth = AuthContext::restore(api, LocalStorage::in_memory());
        let mut recorded: Vec<ProductAction> = Vec::new();

        let err = delete_product(&mut recorded, &mut auth, "p1")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        let ProductAction::DeleteProductFailure(message) = &recorded[1] else {
            panic!("expected failure, got {:?}", recorded[1]);
        };
        assert!(message.starts_with("Network error: "));
    }

    #[tokio::test]
    async fn test_unauthorized_fetch_ends_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })),
            )
            .mount(&server)
            .await;

        let mut auth = signed_in(&server);
        let mut store = Store::new();
        let err = fetch_products(&mut store, &mut auth, &ProductQuery::default())
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!auth.is_authenticated());
        let state = store.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Invalid token"));
    }

    #[tokio::test]
    async fn test_create_through_store() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Product created successfully",
                "product": product_json("1", "A")
            })))
            .mount(&server)
            .await;

        let mut auth = signed_in(&server);
        let mut store = Store::new();
        let created = create_product(&mut store, &mut auth, &form()).await.unwrap();

        let state = store.into_state();
        assert_eq!(state.products, vec![created]);
        assert_eq!(state.toast.unwrap().message, CREATE_SUCCESS_MESSAGE);
    }
}
