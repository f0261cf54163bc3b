pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
mod context;
pub mod payload;
pub mod resolve;
pub mod telemetry;

pub use context::AppContext;
