//! Integration test modules
//!
//! This module contains all integration test files organized by category.

mod execute;
mod handler;
