//! # Kanban Shared Library
//!
//! Domain types, persistence and business rules used by the Kanban API
//! server.
//!
//! ## Module Organization
//!
//! - `models`: Plain data records with per-entity validation
//! - `store`: Persistence seam with PostgreSQL and in-memory backends
//! - `db`: Connection pool and migrations for the PostgreSQL backend
//! - `auth`: Token validation, request authentication and the membership guard
//! - `service`: Board, list and task operations, ordering and the activity recorder

pub mod auth;
pub mod db;
pub mod models;
pub mod service;
pub mod store;

/// Current version of the Kanban shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
