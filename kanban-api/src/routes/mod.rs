//! API route handlers
//!
//! This module contains all route handlers organized by resource:
//!
//! - `health`: Health check endpoint
//! - `boards`: Boards and membership
//! - `lists`: Lists and batch reordering
//! - `cards`: Tasks, moves and assignment
//! - `activities`: Board activity feed

pub mod activities;
pub mod boards;
pub mod cards;
pub mod health;
pub mod lists;
