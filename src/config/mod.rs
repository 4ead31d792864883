//! Configuration for the channel client, read from the environment.

mod client_config;
pub use client_config::*;
