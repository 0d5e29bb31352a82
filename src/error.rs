//! Typed failures surfaced by spec resolution and the worker pool.

use thiserror::Error;

/// Failure taxonomy for the crate. Spec-parsing errors are raised before any
/// worker is spawned; a task failure aborts the whole batch with no partial
/// result. All variants travel inside `anyhow::Error` and can be recovered
/// with `downcast_ref::<Error>()`.
#[derive(Debug, Error)]
pub enum Error {
    /// The worker spec is missing, non-numeric, or numeric but non-positive.
    #[error("invalid worker spec `{spec}`; try `1`, `8`, `n/2`, `n-1`")]
    InvalidCoreSpec { spec: String },

    /// A relative worker spec with a bad operator or a missing/non-integer
    /// operand.
    #[error("invalid relative worker spec `{spec}`; try `n`, `n/2`, `n-1`")]
    InvalidRelativeCoreSpec { spec: String },

    /// A dispatched task returned an error (or a worker thread panicked).
    #[error("worker task failed")]
    Task(#[source] anyhow::Error),
}
