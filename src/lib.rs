// Public modules
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod types;
pub mod utils;
pub mod website;

// Re-exports
pub use client::{Crisp, Transport};
pub use config::{CrispConfig, Credentials};
pub use error::{Error, Result};
pub use types::*;
pub use website::Website;
