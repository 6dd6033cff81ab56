//! Engine services: the answer-credit write path and read-only rollups.

pub mod objectives;
pub mod sessions;
pub mod stats;
pub mod trophies;
