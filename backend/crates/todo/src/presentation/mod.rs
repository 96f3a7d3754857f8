//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::TodoAppState;
pub use router::{todo_router, todo_router_generic};
