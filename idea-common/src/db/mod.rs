//! Database models and queries

pub mod admins;
pub mod ideas;
pub mod init;

pub use admins::{create_admin, ensure_default_admin, find_admin, verify_admin, Admin, DEFAULT_ADMIN_USERNAME};
pub use ideas::{IdeaStore, SqliteIdeaStore, StoredIdea};
pub use init::{create_tables, init_database};
