//! busybee – simple, interactive parallelism for scripts and notebooks.
//!
//! Applies a function to every item of a collection across a pool of
//! workers, returns the results in the original order, and prints throttled
//! progress updates while doing so:
//!
//! ```text
//! BusyBee: Start processing 1000 items with 8 processes...
//! BusyBee:  500/1000, 50.0% (avg: 10ms, rem: 5.0s)
//! BusyBee: Finished processing 1000 items in 10.1s (avg: 10ms)
//! ```
//!
//! The three operations are [`map`], [`filter`], and [`mk_dict`]; configure
//! them through the [`BusyBee`] builder:
//!
//! ```
//! # fn main() -> anyhow::Result<()> {
//! let evens = busybee::BusyBee::new()
//!     .workers("n/2")
//!     .tag("evens")
//!     .quiet(true)
//!     .filter(|x: &i64| Ok(x % 2 == 0), (0..100).collect())?;
//! assert_eq!(evens.len(), 50);
//! # Ok(())
//! # }
//! ```

mod config;
mod core_spec;
mod error;
mod executor;
mod pipeline;
mod progress;
mod status;
mod util;

pub use crate::config::MapOptions;
pub use crate::core_spec::CoreSpec;
pub use crate::error::Error;
pub use crate::pipeline::{filter, map, mk_dict, BusyBee};

// Expose the progress gate and status-line helpers for callers that embed
// their own reporting around the executor's messages.
pub use crate::progress::ProgressGate;
pub use crate::status::{finish_line, human_duration, progress_line, skip_line, start_line};

// Expose the tracing bootstrap so applications can share the subscriber setup.
pub use crate::util::init_tracing_once;
