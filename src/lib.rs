//! Rasteh: an e-commerce catalog backend.
//!
//! Reads go through a keyed read-through cache; writes validate, recompute
//! derived values, persist, and then invalidate exactly the cache keys whose
//! contents they changed.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
