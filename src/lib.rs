//! Site Analytic Proxy Library

pub mod config;
pub mod error;
pub mod http;
pub mod upstream;

pub use config::AppConfig;
pub use error::{ProxyError, ProxyResult};
pub use http::HttpServer;
pub use upstream::StoreClient;
