//! HTTP API handlers for idea-checker

pub mod admin;
pub mod auth;
pub mod check_idea;
pub mod health;
pub mod info;

pub use admin::{list_ideas, login};
pub use auth::admin_auth_middleware;
pub use check_idea::check_idea;
pub use health::health_routes;
pub use info::index;
