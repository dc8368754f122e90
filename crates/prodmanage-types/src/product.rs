use serde::{Deserialize, Serialize};

/// A product record as returned by the backend.
///
/// Identity is `id`. The backend also sends `_id` and `createdBy`, which are
/// ignored. Timestamps are kept as the backend's ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(
        default,
        alias = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        default,
        alias = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

/// Body of a product creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFormData {
    pub title: String,
    pub image: String,
    pub description: String,
    pub price: f64,
}

/// Body of a product update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.image.is_none()
            && self.description.is_none()
            && self.price.is_none()
    }
}

impl From<ProductFormData> for ProductPatch {
    fn from(form: ProductFormData) -> Self {
        Self {
            title: Some(form.title),
            image: Some(form.image),
            description: Some(form.description),
            price: Some(form.price),
        }
    }
}

/// Query parameters accepted by `GET /products`.
///
/// All optional; the backend defaults to page 1, 10 items, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Pagination block that accompanies a product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_accepts_backend_shape() {
        let value = json!({
            "_id": "65f0c0ffee",
            "id": "4b1c",
            "title": "Lamp",
            "description": "Desk lamp",
            "price": 19.5,
            "image": "https://via.placeholder.com/300x200",
            "createdBy": "u1",
            "createdAt": "2025-01-02T03:04:05"
        });

        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.id, "4b1c");
        assert_eq!(product.created_at.as_deref(), Some("2025-01-02T03:04:05"));
        assert_eq!(product.updated_at, None);
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = ProductPatch {
            price: Some(12.0),
            ..Default::default()
        };

        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, json!({ "price": 12.0 }));
        assert!(!patch.is_empty());
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn test_query_serializes_only_set_params() {
        let query = ProductQuery {
            keyword: Some("lamp".to_string()),
            limit: Some(5),
            ..Default::default()
        };

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body, json!({ "limit": 5, "keyword": "lamp" }));
    }
}
