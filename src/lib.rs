//! Client-side transaction pipeline for a permissioned ledger.
//!
//! A [`domain::ChannelClient`] turns a chaincode [`models::Request`] into a
//! signed proposal, collects and cross-checks endorsements, and for
//! `execute` submits the transaction for ordering and waits for the commit
//! verdict. Every failure surfaces as a [`models::StatusError`].

pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod utils;
