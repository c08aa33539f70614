//! # revnote Common Library
//!
//! Shared code for the revnote comment service including:
//! - Database initialization and the `Comment` model
//! - API request/response types
//! - Configuration loading
//! - Input normalization and validation rules

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod validation;

pub use error::{Error, Result};
