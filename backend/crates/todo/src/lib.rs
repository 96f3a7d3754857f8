//! Todo Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, ownership services, repository traits
//! - `application/` - One use case per operation
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Every operation runs for an authenticated caller resolved by the gate
//! - Records are resolved, their owner compared with the caller, and only then
//!   read or written (`Forbidden` on mismatch)
//! - Writes are conditional on the owner and checked by affected-row count
//! - List queries are filtered by owner in the store, never after the fact
//! - A todo can only reference a category owned by the same user

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TodoError, TodoResult};
pub use infra::postgres::PgTodoRepository;
pub use presentation::router::todo_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
