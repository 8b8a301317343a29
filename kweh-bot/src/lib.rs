pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod net;
pub mod rendering;
pub mod repo;
pub mod services;
pub mod state;

// Convenient re-exports (so call sites can do `kweh_bot::Registry`, etc.)
pub use commands::{process_command, CmdCtx, Invocation};
pub use config::Config;
pub use state::{registry::Registry, settings::ServerSettings};
