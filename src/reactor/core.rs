use super::event::Event;
use super::poller::Poller;
use crate::error::{Error, Result};
use crate::runtime::task::Task;
use crate::utils::Slab;

use std::collections::HashMap;
use std::mem;
use std::os::fd::RawFd;

/// The readiness interest of a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Interest {
    /// Wake when the socket can be read without blocking.
    Read,
    /// Wake when the socket can be written without blocking.
    Write,
}

/// A parked task waiting for readiness on one socket.
struct Waiting {
    fd: RawFd,
    interest: Interest,
    task: Task,
}

/// The readiness-based I/O multiplexer.
///
/// The reactor maps each registered socket to the single task waiting on
/// it. Registrations are **single-shot**: every registration reported by
/// [`wait`](Reactor::wait) is removed before the task is handed back, and
/// the task must register again on its next suspension.
///
/// The reactor is owned by the scheduler and only ever touched from its
/// thread, so no synchronization is involved.
pub(crate) struct Reactor {
    poller: Poller,

    /// Reusable buffer of poller readiness events.
    events: Vec<Event>,

    /// Registrations, indexed by the token carried in the event payload.
    registrations: Slab<Waiting>,

    /// Socket to registration token, to enforce one registration per socket.
    by_fd: HashMap<RawFd, usize>,
}

impl Reactor {
    pub(crate) fn new() -> Self {
        Self {
            poller: Poller::new(),
            events: Vec::with_capacity(64),
            registrations: Slab::new(64),
            by_fd: HashMap::new(),
        }
    }

    /// Whether the reactor currently holds no registration.
    pub(crate) fn is_empty(&self) -> bool {
        self.registrations.len() == 0
    }

    /// Parks `task` until `fd` satisfies `interest`.
    ///
    /// # Errors
    ///
    /// [`Error::DoubleRegistration`] if the socket already has a pending
    /// registration, or [`Error::Syscall`] if the poller rejects the
    /// descriptor. In both cases the task is dropped by the caller's
    /// error handling; it is already consumed here.
    pub(crate) fn register(&mut self, fd: RawFd, interest: Interest, task: Task) -> Result<()> {
        if self.by_fd.contains_key(&fd) {
            return Err(Error::DoubleRegistration { fd });
        }

        let token = self.registrations.insert(Waiting { fd, interest, task });

        if let Err(e) = self.poller.register(fd, token, interest) {
            self.registrations.remove(token);
            return Err(e.into());
        }

        self.by_fd.insert(fd, token);

        Ok(())
    }

    /// Blocks until at least one registered socket is ready.
    ///
    /// Returns the `(socket, task)` pairs whose interest was satisfied,
    /// in the order the OS reported them, and removes their registrations.
    ///
    /// Must not be called while [`is_empty`](Reactor::is_empty) is true:
    /// with nothing registered the poller would block forever.
    pub(crate) fn wait(&mut self) -> Result<Vec<(RawFd, Task)>> {
        debug_assert!(!self.is_empty(), "wait() with zero registrations");

        let mut events = mem::take(&mut self.events);
        self.poller.poll(&mut events)?;

        let mut ready = Vec::with_capacity(events.len());

        for event in events.drain(..) {
            let satisfied = match self.registrations.get(event.token) {
                Some(waiting) => match waiting.interest {
                    Interest::Read => event.readable,
                    Interest::Write => event.writable,
                },
                // Stale event for a slot already consumed this round.
                None => false,
            };

            if !satisfied {
                continue;
            }

            let Waiting { fd, task, .. } = self.registrations.remove(event.token);
            self.by_fd.remove(&fd);
            self.poller.deregister(fd);

            ready.push((fd, task));
        }

        self.events = events;

        Ok(ready)
    }
}
