use std::io;
use std::os::fd::RawFd;

use thiserror::Error;

/// Errors surfaced by the runtime and its suspension primitives.
///
/// Peer disconnection is deliberately absent: a receive that returns
/// zero bytes is the normal close signal, not a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// A task tried to park a socket that already has a pending
    /// reactor registration.
    ///
    /// Each socket may carry at most one registration at a time, and
    /// each registration exactly one waiting task. Violating this is
    /// fatal for the registering task.
    #[error("socket {fd} already has a pending reactor registration")]
    DoubleRegistration { fd: RawFd },

    /// An underlying accept/recv/send/epoll call failed at the OS level.
    #[error("syscall failed: {0}")]
    Syscall(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
