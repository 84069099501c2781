//! Run output: fitness history, best-candidate snapshots and viewers.
//!
//! # Files
//!
//! | Output | Written by | Format |
//! |--------|------------|--------|
//! | `fitnessHistory.dat` | [`FitnessHistory`] | `generation average best` per line |
//! | `<dir>/best<g>.png` | [`SnapshotWriter`] | assembled best candidate |

mod history;
mod sink;
mod snapshot;
mod stats;

pub use history::FitnessHistory;
pub use sink::{FileReporter, GenerationSink, MemorySink, Viewer};
pub use snapshot::SnapshotWriter;
pub use stats::GenerationStats;
