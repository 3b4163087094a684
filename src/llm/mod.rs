mod client;
mod types;

pub use client::{GenerationClient, OllamaClient};
pub use types::*;
