//! Core ProdManage library (session, REST client, products store, config).

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod pages;
pub mod storage;
pub mod store;
pub mod validation;
