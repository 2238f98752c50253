//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and OpenAPI document.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod router;

pub use doc::ApiDoc;
pub use handlers::RoundsAppState;
pub use router::{rounds_router, rounds_router_generic};
