//! Test logging initialization
//!
//! Uses `std::sync::Once` so the logger is installed once per test binary,
//! however many tests call it.

use std::sync::Once;

use simplelog::{Config, LevelFilter, TestLogger};

static INIT: Once = Once::new();

/// Installs a `TestLogger` at debug level; output is captured per test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}
