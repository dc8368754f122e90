//! Products reducer.
//!
//! Pure state transition: takes the previous state by value and returns the
//! next one. No I/O happens here; thunks do that.

use prodmanage_types::Toast;

use super::actions::ProductAction;
use super::state::ProductsState;

pub const READ_SUCCESS_MESSAGE: &str = "Products loaded successfully!";
pub const CREATE_SUCCESS_MESSAGE: &str = "Product created successfully!";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Product updated successfully!";
pub const DELETE_SUCCESS_MESSAGE: &str = "Product deleted successfully!";

pub fn reduce(mut state: ProductsState, action: ProductAction) -> ProductsState {
    match action {
        ProductAction::ReadProductsRequest
        | ProductAction::CreateProductRequest
        | ProductAction::UpdateProductRequest
        | ProductAction::DeleteProductRequest => {
            state.loading = true;
            state.error = None;
        }

        ProductAction::ReadProductsSuccess(products) => {
            state.loading = false;
            state.products = products;
            state.toast = Some(Toast::success(READ_SUCCESS_MESSAGE));
        }

        ProductAction::CreateProductSuccess(product) => {
            state.loading = false;
            state.products.push(product);
            state.toast = Some(Toast::success(CREATE_SUCCESS_MESSAGE));
        }

        ProductAction::UpdateProductSuccess(product) => {
            state.loading = false;
            for existing in state.products.iter_mut().filter(|p| p.id == product.id) {
                *existing = product.clone();
            }
            state.toast = Some(Toast::success(UPDATE_SUCCESS_MESSAGE));
        }

        ProductAction::DeleteProductSuccess(id) => {
            state.loading = false;
            state.products.retain(|p| p.id != id);
            state.toast = Some(Toast::success(DELETE_SUCCESS_MESSAGE));
        }

        ProductAction::ReadProductsFailure(message)
        | ProductAction::CreateProductFailure(message)
        | ProductAction::UpdateProductFailure(message)
        | ProductAction::DeleteProductFailure(message) => {
            state.loading = false;
            state.toast = Some(Toast::error(message.clone()));
            state.error = Some(message);
        }

        ProductAction::ClearToast => {
            state.toast = None;
        }
    }

    state
}
