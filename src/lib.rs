// src/lib.rs
pub mod cli;
pub mod config;
pub mod engine;
pub mod launcher;
pub mod output;
pub mod resolver;
pub mod session;
pub mod sources;
pub mod types;
pub mod utils;

pub use cli::Args;
pub use engine::HostscopeEngine;
pub use types::{Config, HostscopeError, RecordKind, RecordOutcome, ScanStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
