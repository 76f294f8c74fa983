//! One-shot socket operations built on suspension requests.
//!
//! Each operation is a small state machine: the first call to `advance`
//! yields the readiness interest the operation needs, and each later
//! call performs **exactly one** non-blocking syscall. If that syscall
//! still reports `WouldBlock` (readiness can be spurious), the operation
//! re-yields the same interest instead of failing.
//!
//! Operations compose transparently: a task embedding one simply
//! forwards every [`OpStep::Yield`] to the scheduler unchanged and picks
//! up its own state machine again on [`OpStep::Done`].

use super::socket::Socket;
use crate::error::Result;
use crate::reactor::platform::{sys_accept, sys_read, sys_write};
use crate::runtime::task::Suspend;

use std::io;
use std::net::SocketAddr;
use std::os::fd::RawFd;

/// Progress of a one-shot socket operation.
pub enum OpStep<T> {
    /// The operation needs the given condition before it can continue;
    /// forward this to the scheduler.
    Yield(Suspend),
    /// The operation completed. The state machine must not be advanced
    /// again afterwards.
    Done(T),
}

/// Accepts a single connection from a listening socket.
pub struct Accept {
    fd: RawFd,
    armed: bool,
}

impl Accept {
    /// Creates an accept operation for `listener_fd`.
    pub fn new(listener_fd: RawFd) -> Self {
        Self {
            fd: listener_fd,
            armed: false,
        }
    }

    /// Drives the operation one step.
    ///
    /// Yields `Read` on the listening socket, then performs one
    /// non-blocking `accept`. The accepted socket is owned by the
    /// returned [`Socket`] and already set non-blocking.
    pub fn advance(&mut self) -> Result<OpStep<(Socket, SocketAddr)>> {
        if !self.armed {
            self.armed = true;
            return Ok(OpStep::Yield(Suspend::Read(self.fd)));
        }

        match sys_accept(self.fd) {
            Ok((fd, peer)) => Ok(OpStep::Done((Socket::new(fd), peer))),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                Ok(OpStep::Yield(Suspend::Read(self.fd)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Receives at most `max` bytes from a socket.
pub struct Recv {
    fd: RawFd,
    max: usize,
    armed: bool,
}

impl Recv {
    /// Creates a receive operation reading up to `max` bytes from `fd`.
    pub fn new(fd: RawFd, max: usize) -> Self {
        Self {
            fd,
            max,
            armed: false,
        }
    }

    /// Drives the operation one step.
    ///
    /// Yields `Read` on the socket, then performs one non-blocking read.
    /// An empty result means the peer closed the connection; that is the
    /// normal termination signal, not an error.
    pub fn advance(&mut self) -> Result<OpStep<Vec<u8>>> {
        if !self.armed {
            self.armed = true;
            return Ok(OpStep::Yield(Suspend::Read(self.fd)));
        }

        let mut buffer = vec![0u8; self.max];
        let n = sys_read(self.fd, &mut buffer);

        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                return Ok(OpStep::Yield(Suspend::Read(self.fd)));
            }
            return Err(err.into());
        }

        buffer.truncate(n as usize);

        Ok(OpStep::Done(buffer))
    }
}

/// Sends an entire buffer to a socket.
///
/// One send attempt is made per resumption. A short write is **not** an
/// error: the operation keeps its progress and yields `Write` again, so
/// the full buffer drains across as many suspensions as the socket
/// requires. (The behavior this runtime was modeled on stopped after a
/// single attempt; that limitation is corrected here deliberately.)
pub struct SendAll {
    fd: RawFd,
    data: Vec<u8>,
    sent: usize,
    armed: bool,
}

impl SendAll {
    /// Creates a send operation writing all of `data` to `fd`.
    pub fn new(fd: RawFd, data: Vec<u8>) -> Self {
        Self {
            fd,
            data,
            sent: 0,
            armed: false,
        }
    }

    /// Drives the operation one step.
    pub fn advance(&mut self) -> Result<OpStep<()>> {
        if !self.armed {
            self.armed = true;
            return Ok(OpStep::Yield(Suspend::Write(self.fd)));
        }

        let n = sys_write(self.fd, &self.data[self.sent..]);

        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                return Ok(OpStep::Yield(Suspend::Write(self.fd)));
            }
            return Err(err.into());
        }

        self.sent += n as usize;

        if self.sent < self.data.len() {
            return Ok(OpStep::Yield(Suspend::Write(self.fd)));
        }

        Ok(OpStep::Done(()))
    }
}
