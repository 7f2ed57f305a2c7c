//! Identity resolution and board authorization
//!
//! Authentication itself (login, session issuance) happens upstream. This
//! module only turns a presented token into an acting user and decides
//! whether that user may touch a given board.
//!
//! # Modules
//!
//! - [`jwt`]: HS256 token validation (and issuance for tooling and tests)
//! - [`middleware`]: Axum middleware resolving the acting user from a Bearer header or `token` cookie
//! - [`authorization`]: Owner/member guard, re-derived from the board on every call

pub mod authorization;
pub mod middleware;
pub mod jwt;
