pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod search;
pub mod validation;

pub use error::{ApiError, FieldErrors, Result};
