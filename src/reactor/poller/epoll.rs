//! Linux `epoll`-based poller.
//!
//! Thin wrapper over an `epoll` instance, used by the reactor to block
//! the scheduler thread until at least one registered socket is ready.
//!
//! Unlike a general-purpose poller there is no wake-up channel: the
//! runtime is single-threaded and nothing can submit work while the
//! thread is parked inside `epoll_wait`, so the reactor only enters
//! `poll` when at least one registration is pending.

use crate::reactor::Interest;
use crate::reactor::event::Event;

use libc::{
    EPOLL_CLOEXEC, EPOLL_CTL_ADD, EPOLL_CTL_DEL, EPOLLERR, EPOLLHUP, EPOLLIN, EPOLLOUT,
    epoll_create1, epoll_ctl, epoll_event, epoll_wait,
};
use std::io;
use std::os::unix::io::RawFd;

/// Initial capacity of the reusable `epoll_event` buffer.
const EVENT_CAPACITY: usize = 64;

/// Linux `epoll` poller.
///
/// Owns the `epoll` instance and a reusable event buffer. Registrations
/// are single-shot at the reactor level: the reactor deregisters every
/// descriptor it reports as ready.
pub(crate) struct EpollPoller {
    /// Epoll file descriptor.
    epoll: RawFd,

    /// Reusable buffer for raw epoll events.
    buffer: Vec<epoll_event>,
}

impl EpollPoller {
    /// Creates a new `EpollPoller`.
    pub(crate) fn new() -> Self {
        let epoll = unsafe { epoll_create1(EPOLL_CLOEXEC) };
        assert!(epoll >= 0, "epoll_create1 failed");

        Self {
            epoll,
            buffer: Vec::with_capacity(EVENT_CAPACITY),
        }
    }

    /// Registers a file descriptor with the poller.
    ///
    /// The `token` is carried back verbatim in the event payload.
    pub(crate) fn register(&self, fd: RawFd, token: usize, interest: Interest) -> io::Result<()> {
        let flags = match interest {
            Interest::Read => EPOLLIN,
            Interest::Write => EPOLLOUT,
        };

        let mut event = epoll_event {
            events: flags as u32,
            u64: token as u64,
        };

        let rc = unsafe { epoll_ctl(self.epoll, EPOLL_CTL_ADD, fd, &mut event) };
        if rc < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    /// Removes a file descriptor from the poller.
    pub(crate) fn deregister(&self, fd: RawFd) {
        unsafe {
            epoll_ctl(self.epoll, EPOLL_CTL_DEL, fd, std::ptr::null_mut());
        }
    }

    /// Blocks until at least one registered descriptor becomes ready.
    ///
    /// Readiness is translated into [`Event`]s appended to `events`.
    /// An interrupted wait (`EINTR`) yields an empty event set rather
    /// than an error; the caller simply polls again.
    pub(crate) fn poll(&mut self, events: &mut Vec<Event>) -> io::Result<()> {
        events.clear();

        let n = unsafe {
            epoll_wait(
                self.epoll,
                self.buffer.as_mut_ptr(),
                self.buffer.capacity() as i32,
                -1,
            )
        };

        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(());
            }
            return Err(err);
        }

        // epoll_wait wrote `n` events into the spare capacity.
        unsafe {
            self.buffer.set_len(n as usize);
        }

        for ev in &self.buffer {
            let token = ev.u64 as usize;

            // Error and hang-up conditions satisfy either interest, so the
            // waiting task wakes up and observes the failure on its syscall.
            let readable = ev.events & ((EPOLLIN | EPOLLERR | EPOLLHUP) as u32) != 0;
            let writable = ev.events & ((EPOLLOUT | EPOLLERR | EPOLLHUP) as u32) != 0;

            events.push(Event {
                token,
                readable,
                writable,
            });
        }

        self.buffer.clear();

        Ok(())
    }
}

impl Drop for EpollPoller {
    /// Closes the `epoll` instance.
    fn drop(&mut self) {
        unsafe {
            libc::close(self.epoll);
        }
    }
}
