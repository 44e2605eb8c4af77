pub mod api;
mod app;
pub mod auth;
pub mod cms;
pub mod commands;
pub mod guard;
mod redact;
pub mod routes;
pub mod settings;
pub mod state;
pub mod telemetry;
pub mod types;

pub use app::run;
pub use commands::Cli;
