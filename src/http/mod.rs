//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, static assets, middleware)
//!     → handlers.rs (decode request, call store client)
//!     → upstream reply mapped onto the dashboard contract
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::HttpServer;
