//! Shared data model for ProdManage (products, users, toasts).
//!
//! Plain serde types with no I/O. Field names follow the REST API's JSON.

pub mod product;
pub mod toast;
pub mod user;

pub use product::{Pagination, Product, ProductFormData, ProductPatch, ProductQuery};
pub use toast::{Toast, ToastKind};
pub use user::{LoginForm, RegistrationForm, SessionUser, User};
