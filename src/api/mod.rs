//! HTTP API module: versioned routes, handlers, and middleware.

pub mod cors;
pub mod doc;
pub mod handlers;
pub mod response;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
