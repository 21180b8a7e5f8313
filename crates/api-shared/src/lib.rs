//! # API Shared
//!
//! Shared definitions for doctor directory API surfaces.
//!
//! Contains:
//! - Request and response types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the server binary.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
