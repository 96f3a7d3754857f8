//! Todo Router
//!
//! Routes are returned ungated; the caller installs the bearer-token layer
//! with `route_layer` so that unmatched paths still 404.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::{CategoryRepository, TodoRepository};
use crate::infra::postgres::PgTodoRepository;
use crate::presentation::handlers::{self, TodoAppState};

/// Create the todo router with PostgreSQL repository
pub fn todo_router(repo: PgTodoRepository) -> Router {
    todo_router_generic(repo)
}

/// Create a generic todo router for any repository implementation
pub fn todo_router_generic<R>(repo: R) -> Router
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let state = TodoAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/addtodo", post(handlers::add_todo::<R>))
        .route("/deletetodo", delete(handlers::delete_todo::<R>))
        .route("/edittodo", put(handlers::edit_todo::<R>))
        .route("/getalltodos", get(handlers::get_all_todos::<R>))
        .route(
            "/gettodobycategory",
            get(handlers::get_todo_by_category::<R>),
        )
        .route("/marktodo", post(handlers::mark_todo::<R>))
        .route("/addcategory", post(handlers::add_category::<R>))
        .route("/getcategory", get(handlers::get_categories::<R>))
        .route("/deletecategory", delete(handlers::delete_category::<R>))
        .with_state(state)
}
