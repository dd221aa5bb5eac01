//! Application layer: repository traits and catalog services.
//!
//! Services own the write path ordering the cache depends on:
//! validate, recompute derived values, persist, then invalidate.

pub mod brands;
pub mod categories;
pub mod comments;
pub mod error;
pub mod products;
pub mod repos;
pub mod users;
