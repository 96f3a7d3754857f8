//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Todo, Category and their insert/patch forms)
//! - Domain value objects (TodoTitle, DueDate, CategoryName)
//! - Domain services (ownership check, patch merging)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
