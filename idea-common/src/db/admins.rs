//! Admin accounts
//!
//! Admins authenticate to list stored ideas. A default `admin` account is
//! seeded at startup when missing.

use crate::auth::{hash_password, verify_password};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Username of the seeded admin account
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Admin row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl Admin {
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }
}

/// Look up an admin by username
pub async fn find_admin(db: &SqlitePool, username: &str) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, username, password_hash FROM admins WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(db)
    .await?;
    Ok(admin)
}

/// Insert an admin account
pub async fn create_admin(db: &SqlitePool, username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::InvalidInput("admin username is empty".to_string()));
    }
    sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?, ?)")
        .bind(username)
        .bind(hash_password(password))
        .execute(db)
        .await?;
    Ok(())
}

/// Create the default admin if it does not exist yet
///
/// Returns true when the account was created.
pub async fn ensure_default_admin(db: &SqlitePool, password: &str) -> Result<bool> {
    if find_admin(db, DEFAULT_ADMIN_USERNAME).await?.is_some() {
        return Ok(false);
    }
    create_admin(db, DEFAULT_ADMIN_USERNAME, password).await?;
    info!("Default admin user created");
    Ok(true)
}

/// Check credentials; unknown users and wrong passwords both yield false
pub async fn verify_admin(db: &SqlitePool, username: &str, password: &str) -> Result<bool> {
    Ok(find_admin(db, username)
        .await?
        .map(|admin| admin.check_password(password))
        .unwrap_or(false))
}
