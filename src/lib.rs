// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod intake;
pub mod logging;
pub mod palette;
pub mod report;
pub mod runtime;
pub mod session;
pub mod time_series;
pub mod ui;
