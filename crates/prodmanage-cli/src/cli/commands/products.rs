//! Product command handlers.
//!
//! Each handler runs one thunk against a fresh store and reports the toast it
//! left behind. Failure toasts become the command's error.

use std::slice;

use anyhow::{Result, bail};
use comfy_table::{ContentArrangement, Table};
use prodmanage_core::api::{self, ApiResult};
use prodmanage_core::auth::AuthContext;
use prodmanage_core::store::{Store, thunks};
use prodmanage_core::validation;
use prodmanage_types::{Pagination, Product, ProductFormData, ProductPatch, ProductQuery};

use super::{LOGIN_HINT, ensure_valid};

pub async fn list(auth: &mut AuthContext, query: &ProductQuery) -> Result<()> {
    let mut store = Store::new();
    let result = thunks::fetch_products(&mut store, auth, query).await;
    let pagination = settle(&store, result)?;

    let products = &store.state().products;
    if products.is_empty() {
        println!("No products found.");
    } else {
        println!("{}", product_table(products));
    }
    if let Some(pagination) = pagination {
        println!("{}", page_summary(&pagination));
    }
    Ok(())
}

pub async fn show(auth: &mut AuthContext, id: &str) -> Result<()> {
    match api::products::get(auth, id).await {
        Ok(product) => {
            println!("{}", product_table(slice::from_ref(&product)));
            if !product.description.is_empty() {
                println!("{}", product.description);
            }
            Ok(())
        }
        Err(err) => {
            if err.is_unauthorized() {
                eprintln!("{LOGIN_HINT}");
            }
            bail!("{}", err.failure_message("Failed to fetch product"))
        }
    }
}

pub async fn create(auth: &mut AuthContext, form: ProductFormData) -> Result<()> {
    let form = validation::normalize_product(form);
    ensure_valid(&validation::validate_product(&form))?;

    let mut store = Store::new();
    let result = thunks::create_product(&mut store, auth, &form).await;
    let product = settle(&store, result)?;
    println!("{}", product_table(slice::from_ref(&product)));
    Ok(())
}

pub async fn update(auth: &mut AuthContext, id: &str, patch: ProductPatch) -> Result<()> {
    if patch.is_empty() {
        bail!("Nothing to update: pass at least one of --title, --image, --description, --price");
    }
    let patch = validation::normalize_patch(patch);
    ensure_valid(&validation::validate_patch(&patch))?;

    let mut store = Store::new();
    let result = thunks::update_product(&mut store, auth, id, &patch).await;
    let product = settle(&store, result)?;
    println!("{}", product_table(slice::from_ref(&product)));
    Ok(())
}

pub async fn delete(auth: &mut AuthContext, id: &str) -> Result<()> {
    let mut store = Store::new();
    let result = thunks::delete_product(&mut store, auth, id).await;
    settle(&store, result)
}

/// Prints the success toast, or turns the failure toast into an error.
fn settle<T>(store: &Store, result: ApiResult<T>) -> Result<T> {
    let state = store.state();
    match result {
        Ok(value) => {
            if let Some(toast) = &state.toast {
                println!("{}", toast.message);
            }
            Ok(value)
        }
        Err(err) => {
            if err.is_unauthorized() {
                eprintln!("{LOGIN_HINT}");
            }
            let message = state.error.clone().unwrap_or_else(|| err.to_string());
            bail!("{message}")
        }
    }
}

fn product_table(products: &[Product]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Title", "Price", "Image"]);
    for product in products {
        table.add_row([
            product.id.clone(),
            product.title.clone(),
            format!("{:.2}", product.price),
            product.image.clone(),
        ]);
    }
    table
}

fn page_summary(pagination: &Pagination) -> String {
    format!(
        "Page {} of {} ({} products)",
        pagination.current_page, pagination.total_pages, pagination.total_items
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_table_formats_price() {
        let product = Product {
            id: "p1".to_string(),
            title: "Lamp".to_string(),
            image: "http://x/1.png".to_string(),
            description: String::new(),
            price: 19.5,
            created_at: None,
            updated_at: None,
        };

        let rendered = product_table(&[product]).to_string();
        assert!(rendered.contains("Lamp"));
        assert!(rendered.contains("19.50"));
    }

    #[test]
    fn test_page_summary() {
        let pagination = Pagination {
            current_page: 2,
            total_pages: 3,
            total_items: 21,
            ..Default::default()
        };
        assert_eq!(page_summary(&pagination), "Page 2 of 3 (21 products)");
    }
}
