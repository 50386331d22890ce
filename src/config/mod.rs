//! Application settings read from the environment.

mod loader;
mod types;

pub use loader::*;
pub use types::*;
