//! API types shared between the server and its clients
//!
//! Request payloads, response bodies and the conversions that apply the
//! normalization rules from [`crate::validation`].

pub mod types;

pub use types::*;
