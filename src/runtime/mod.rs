//! Scheduler core and task model.
//!
//! The runtime resumes tasks from a FIFO ready queue, one at a time,
//! and cooperates with the reactor to park tasks waiting for socket
//! readiness. See [`Runtime`] for the scheduling rules.

mod core;

pub mod task;

pub use self::core::Runtime;
