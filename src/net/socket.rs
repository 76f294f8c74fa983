use crate::reactor::platform::sys_close;

use std::os::fd::RawFd;

/// An exclusively owned, non-blocking connection socket.
///
/// A `Socket` belongs to the task that created or accepted it until it
/// is dropped; ownership is never shared across tasks. Dropping the
/// socket closes the underlying file descriptor, so a handler releases
/// its connection simply by finishing.
pub struct Socket {
    /// File descriptor of the connection.
    fd: RawFd,
}

impl Socket {
    /// Wraps an already non-blocking connected socket descriptor.
    pub(crate) fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    /// Returns the raw file descriptor, for use with the suspension
    /// primitives in [`sock`](crate::net::sock).
    ///
    /// The descriptor stays owned by this `Socket`; it must not be used
    /// after the socket is dropped.
    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for Socket {
    /// Closes the connection.
    fn drop(&mut self) {
        sys_close(self.fd);
    }
}
