pub mod config;
pub mod error;
pub mod frontend;
pub mod llm;
pub mod logging;
pub mod sentiment;
pub mod server;

pub use error::{Error, Result};
