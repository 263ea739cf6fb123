//! Output Generation
//!
//! Board snapshots, text rendering, and sorting statistics.

pub mod snapshot;
pub mod stats;

pub use snapshot::*;
pub use stats::*;
