//! Database layer for the PostgreSQL backend
//!
//! # Modules
//!
//! - `pool`: Connection pool creation with a startup health check
//! - `migrations`: Embedded sqlx migration runner
//!
//! # Example
//!
//! ```no_run
//! use kanban_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: std::env::var("DATABASE_URL")?,
//!         ..Default::default()
//!     };
//!
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

pub mod migrations;
pub mod pool;
