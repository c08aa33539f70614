//! HTTP API handlers for revnote-server

pub mod comments;
pub mod debug;
pub mod edit;
pub mod extract;
pub mod health;
pub mod load;

pub use comments::comment_routes;
pub use debug::debug_routes;
pub use edit::edit_routes;
pub use health::health_routes;
pub use load::load_routes;
