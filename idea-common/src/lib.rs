//! # Idea Checker Common Library
//!
//! Shared code for the idea checker service including:
//! - Error and result types
//! - Configuration loading (CLI → ENV → TOML → defaults)
//! - SQLite persistence for stored ideas and admin accounts
//! - Admin password hashing

pub mod auth;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
