pub mod assistant;
pub mod client;
pub mod prompts;

pub use assistant::*;
pub use client::*;
