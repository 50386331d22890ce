//! Request extractors.

mod pageable;
mod payload;
pub use pageable::Pageable;
pub use payload::JsonPayload;
