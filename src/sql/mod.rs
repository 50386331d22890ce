//! Safe SQL builder: identifiers from code and config only, values as parameters.

mod builder;
pub use builder::*;
