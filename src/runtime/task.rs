use std::fmt;
use std::os::fd::RawFd;

use crate::error::Result;

/// A resumable unit of cooperative work.
///
/// Each call to [`resume`](Resume::resume) runs the task until it either
/// requests a suspension or finishes. A task is an explicit state machine:
/// it records where it stopped and continues from that point on the next
/// resumption. No native generator or `async` construct is involved, which
/// keeps the one-syscall-per-resumption contract visible in the code.
///
/// Tasks are fire-and-forget. Completion produces no value and spawning a
/// child (via [`Suspend::Schedule`]) creates no lifetime coupling between
/// parent and child.
pub trait Resume {
    /// Runs the task until its next suspension point or completion.
    ///
    /// # Errors
    ///
    /// Any error returned here is fatal for this task only; the scheduler
    /// logs it and drops the task without affecting the rest of the runtime.
    fn resume(&mut self) -> Result<Step>;
}

/// A boxed, dynamically dispatched task.
pub type Task = Box<dyn Resume>;

/// The outcome of one resumption.
pub enum Step {
    /// The task requests a condition before it may resume.
    Suspend(Suspend),
    /// The task ran to completion and must be dropped.
    Finish,
}

/// The condition a task requests before its next resumption.
///
/// These four variants are the only suspension points in the runtime;
/// no other operation may block the scheduler thread.
pub enum Suspend {
    /// Resume once the socket can be read without blocking.
    Read(RawFd),
    /// Resume once the socket can be written without blocking.
    Write(RawFd),
    /// Enqueue the child task, then resume the requesting task in the
    /// next scheduling round. The requester never waits for the child.
    Schedule(Task),
    /// Voluntarily yield one scheduling round to let other tasks run.
    Pause,
}

impl fmt::Debug for Suspend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suspend::Read(fd) => f.debug_tuple("Read").field(fd).finish(),
            Suspend::Write(fd) => f.debug_tuple("Write").field(fd).finish(),
            Suspend::Schedule(_) => f.write_str("Schedule(..)"),
            Suspend::Pause => f.write_str("Pause"),
        }
    }
}
