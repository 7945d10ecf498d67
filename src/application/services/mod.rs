//! Application services orchestrating domain and infrastructure.

mod url_service;

pub use url_service::UrlService;
